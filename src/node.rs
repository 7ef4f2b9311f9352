//! The node model: scalar holders, sequence holders, and the state every
//! group carries.
//!
//! Nodes are plain data. They know whether they hold a value and whether
//! they are allowed not to, but nothing about formats or paths. Bindings in
//! [`bind`](crate::bind) and [`config`](crate::config) are what move values in
//! and out of them.

use std::cmp::Ordering;
use std::fmt;

use crate::error::ConfbindError;
use crate::validate::Validator;

/// State shared by every node kind.
pub trait Object {
    /// The node currently holds a value (groups: every mandatory child does).
    fn initialized(&self) -> bool;

    /// The node may legitimately stay uninitialized.
    fn optional(&self) -> bool;
}

/// A single typed configuration value.
///
/// Constructed empty and mandatory with [`Variable::new`], empty and optional
/// with [`Variable::optional`], or pre-seeded with [`Variable::with_default`]
/// (which also makes it optional).
#[derive(Clone)]
pub struct Variable<T> {
    value: Option<T>,
    optional: bool,
    validator: Option<Validator<T>>,
}

impl<T> Variable<T> {
    pub fn new() -> Self {
        Self {
            value: None,
            optional: false,
            validator: None,
        }
    }

    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::new()
        }
    }

    pub fn with_default(value: T) -> Self {
        Self {
            value: Some(value),
            optional: true,
            validator: None,
        }
    }

    /// Attach a hook run on every freshly parsed value.
    pub fn with_validator<V>(mut self, check: V) -> Self
    where
        V: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Validator::new(check));
        self
    }

    pub fn get(&self) -> Result<&T, ConfbindError> {
        self.value.as_ref().ok_or(ConfbindError::Unset)
    }

    pub fn get_mut(&mut self) -> Result<&mut T, ConfbindError> {
        self.value.as_mut().ok_or(ConfbindError::Unset)
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }

    pub(crate) fn validator(&self) -> Option<&Validator<T>> {
        self.validator.as_ref()
    }
}

impl<T> Default for Variable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Object for Variable<T> {
    fn initialized(&self) -> bool {
        self.value.is_some()
    }

    fn optional(&self) -> bool {
        self.optional
    }
}

impl<T: PartialEq> PartialEq for Variable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Unset sorts before any value.
impl<T: PartialOrd> PartialOrd for Variable<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

/// Compares the held value; an unset variable equals nothing.
impl<T: PartialEq> PartialEq<T> for Variable<T> {
    fn eq(&self, other: &T) -> bool {
        self.value.as_ref() == Some(other)
    }
}

/// An unset variable is unordered against every value.
impl<T: PartialOrd> PartialOrd<T> for Variable<T> {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.value.as_ref()?.partial_cmp(other)
    }
}

impl<T> From<T> for Variable<T> {
    fn from(value: T) -> Self {
        Self::with_default(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("value", &self.value)
            .field("optional", &self.optional)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => value.fmt(f),
            None => f.write_str("[not set]"),
        }
    }
}

/// An ordered, homogeneous list of elements.
///
/// Same lifecycle as [`Variable`]; the payload is replaced wholesale by every
/// parse that finds at least one element.
#[derive(Clone, PartialEq)]
pub struct Vector<T> {
    inner: Variable<Vec<T>>,
}

impl<T> Vector<T> {
    pub fn new() -> Self {
        Self {
            inner: Variable::new(),
        }
    }

    pub fn optional() -> Self {
        Self {
            inner: Variable::optional(),
        }
    }

    pub fn with_default(elements: Vec<T>) -> Self {
        Self {
            inner: Variable::with_default(elements),
        }
    }

    /// Attach a hook run on every freshly parsed list.
    pub fn with_validator<V>(mut self, check: V) -> Self
    where
        V: Fn(&Vec<T>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.inner = self.inner.with_validator(check);
        self
    }

    pub fn get(&self) -> Result<&Vec<T>, ConfbindError> {
        self.inner.get()
    }

    pub fn get_mut(&mut self) -> Result<&mut Vec<T>, ConfbindError> {
        self.inner.get_mut()
    }

    /// Element at `index`. `Unset` if the vector has no value.
    pub fn at(&self, index: usize) -> Result<Option<&T>, ConfbindError> {
        Ok(self.get()?.get(index))
    }

    /// Number of elements; an unset vector has none.
    pub fn len(&self) -> usize {
        self.inner.value().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set(&mut self, elements: Vec<T>) {
        self.inner.set(elements);
    }

    pub fn into_inner(self) -> Option<Vec<T>> {
        self.inner.into_inner()
    }

    pub(crate) fn validator(&self) -> Option<&Validator<Vec<T>>> {
        self.inner.validator()
    }

    pub(crate) fn elements_mut(&mut self) -> Option<&mut Vec<T>> {
        self.inner.value.as_mut()
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Object for Vector<T> {
    fn initialized(&self) -> bool {
        self.inner.initialized()
    }

    fn optional(&self) -> bool {
        self.inner.optional()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("elements", &self.inner.value)
            .field("optional", &self.inner.optional)
            .finish()
    }
}

/// Per-group state: whether the group is optional, whether its last
/// parse or emit pass found every mandatory child initialized, and whether
/// its last parse was rejected by [`Config::validate`](crate::Config::validate).
///
/// A rejected group stays uninitialized until the next parse, whatever its
/// children hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    optional: bool,
    initialized: bool,
    rejected: bool,
}

impl Section {
    pub fn mandatory() -> Self {
        Self::default()
    }

    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected
    }

    pub(crate) fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized && !self.rejected;
    }

    pub(crate) fn set_rejected(&mut self, rejected: bool) {
        self.rejected = rejected;
        if rejected {
            self.initialized = false;
        }
    }
}
