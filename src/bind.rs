//! Scalar and sequence bindings.
//!
//! [`Bind<F>`] is the per node kind × format contract: parse a node from a
//! source at a path, emit it into a destination, under a strict or lenient
//! policy. This module implements it for [`Variable`] and [`Vector`]; groups
//! get theirs in [`config`](crate::config).

use tracing::trace;

use crate::error::ConfbindError;
use crate::format::{Codec, Format};
use crate::node::{Object, Variable, Vector};
use crate::validate::{self, Verdict};

/// Parse/emit a node with format `F`.
///
/// `strict` selects the error policy: when set, a missing mandatory value is
/// an error; when clear, it is reported through the returned `bool` and the
/// node's [`Object::initialized`] state.
pub trait Bind<F: Format>: Object {
    /// Returns whether anything was found in `source` for this node.
    fn parse_node(
        &mut self,
        format: &F,
        path: &str,
        source: &F::Source,
        strict: bool,
    ) -> Result<bool, ConfbindError>;

    fn emit_node(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError>;

    /// Re-derive and return the initialized state. Only groups, and
    /// sequences holding groups, have anything to recompute.
    fn settle(&mut self, _format: &F, _path: &str) -> bool {
        self.initialized()
    }
}

/// Missing-value policy shared by scalar and sequence emit.
fn emit_missing(
    optional: bool,
    format: &'static str,
    path: &str,
    strict: bool,
) -> Result<(), ConfbindError> {
    if optional || !strict {
        return Ok(());
    }
    Err(ConfbindError::NotEmitted {
        format,
        path: path.to_string(),
    })
}

pub(crate) fn emit_scalar<F: Codec<T>, T>(
    format: &F,
    path: &str,
    dest: &mut F::Dest,
    value: &T,
) -> Result<(), ConfbindError> {
    format
        .emit(dest, path, value)
        .map_err(|reason| ConfbindError::Serialize {
            format: F::NAME,
            path: path.to_string(),
            reason,
        })
}

impl<F: Codec<T>, T> Bind<F> for Variable<T> {
    fn parse_node(
        &mut self,
        format: &F,
        path: &str,
        source: &F::Source,
        strict: bool,
    ) -> Result<bool, ConfbindError> {
        let Some(value) = format.parse(source, path) else {
            trace!(format = F::NAME, path, "variable not found");
            if self.initialized() || !strict {
                return Ok(false);
            }
            return Err(ConfbindError::NotSet {
                format: F::NAME,
                path: path.to_string(),
            });
        };

        match validate::run(self.validator(), &value, F::NAME, path, strict)? {
            Verdict::Accepted => {
                trace!(format = F::NAME, path, "variable parsed");
                self.set(value);
                Ok(true)
            }
            Verdict::Rejected => Ok(false),
        }
    }

    fn emit_node(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError> {
        match self.value() {
            Some(value) => emit_scalar(format, path, dest, value),
            None => emit_missing(self.optional(), F::NAME, path, strict),
        }
    }
}

/// A type that can be an element of a [`Vector`] for format `F`.
///
/// Elements are always parsed strictly: any failure ends the scan of the
/// enclosing sequence.
pub trait Element<F: Format>: Sized {
    fn parse_element(format: &F, path: &str, source: &F::Source) -> Result<Self, ConfbindError>;

    fn emit_element(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError>;

    /// Re-derive the state of an element that holds groups.
    fn settle_element(&mut self, _format: &F, _path: &str) {}
}

macro_rules! scalar_elements {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<F: Codec<$ty>> Element<F> for $ty {
                fn parse_element(
                    format: &F,
                    path: &str,
                    source: &F::Source,
                ) -> Result<Self, ConfbindError> {
                    format.parse(source, path).ok_or_else(|| ConfbindError::NotSet {
                        format: F::NAME,
                        path: path.to_string(),
                    })
                }

                fn emit_element(
                    &mut self,
                    format: &F,
                    path: &str,
                    dest: &mut F::Dest,
                    _strict: bool,
                ) -> Result<(), ConfbindError> {
                    emit_scalar(format, path, dest, self)
                }
            }
        )*
    };
}

scalar_elements!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

/// Read `path`'s elements at indices `0, 1, ...` until one fails.
///
/// Returns every element parsed before the first failure, plus that failure.
pub(crate) fn scan_elements<F: Format, T: Element<F>>(
    format: &F,
    path: &str,
    source: &F::Source,
) -> (Vec<T>, Option<ConfbindError>) {
    let mut elements = Vec::new();
    loop {
        let element_path = format.element_path(path, elements.len());
        match T::parse_element(format, &element_path, source) {
            Ok(element) => elements.push(element),
            Err(err) => {
                trace!(format = F::NAME, path, count = elements.len(), "sequence scan stopped");
                return (elements, Some(err));
            }
        }
    }
}

fn emit_elements<F: Format, T: Element<F>>(
    elements: &mut [T],
    format: &F,
    path: &str,
    dest: &mut F::Dest,
    strict: bool,
) -> Result<(), ConfbindError> {
    for (index, element) in elements.iter_mut().enumerate() {
        let element_path = format.element_path(path, index);
        element.emit_element(format, &element_path, dest, strict)?;
    }
    Ok(())
}

/// Nested sequences: an element that is itself a list.
impl<F: Format, T: Element<F>> Element<F> for Vec<T> {
    fn parse_element(format: &F, path: &str, source: &F::Source) -> Result<Self, ConfbindError> {
        match scan_elements(format, path, source) {
            (elements, _) if !elements.is_empty() => Ok(elements),
            (_, Some(err)) => Err(err),
            (_, None) => Err(ConfbindError::NotSet {
                format: F::NAME,
                path: path.to_string(),
            }),
        }
    }

    fn emit_element(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError> {
        emit_elements(self, format, path, dest, strict)
    }

    fn settle_element(&mut self, format: &F, path: &str) {
        settle_elements(self, format, path);
    }
}

fn settle_elements<F: Format, T: Element<F>>(elements: &mut [T], format: &F, path: &str) {
    for (index, element) in elements.iter_mut().enumerate() {
        element.settle_element(format, &format.element_path(path, index));
    }
}

impl<F: Format, T: Element<F>> Bind<F> for Vector<T> {
    fn parse_node(
        &mut self,
        format: &F,
        path: &str,
        source: &F::Source,
        strict: bool,
    ) -> Result<bool, ConfbindError> {
        let (elements, last_error) = scan_elements::<F, T>(format, path, source);
        let count = elements.len();

        if count > 0 {
            match validate::run(self.validator(), &elements, F::NAME, path, strict)? {
                Verdict::Accepted => self.set(elements),
                Verdict::Rejected => return Ok(false),
            }
        }

        if !self.initialized() && !self.optional() && strict {
            return Err(last_error.unwrap_or_else(|| ConfbindError::NotSet {
                format: F::NAME,
                path: path.to_string(),
            }));
        }

        trace!(format = F::NAME, path, count, "vector parsed");
        Ok(count > 0)
    }

    fn emit_node(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError> {
        let optional = self.optional();
        match self.elements_mut() {
            Some(elements) => emit_elements(elements, format, path, dest, strict),
            None => emit_missing(optional, F::NAME, path, strict),
        }
    }

    fn settle(&mut self, format: &F, path: &str) -> bool {
        if let Some(elements) = self.elements_mut() {
            settle_elements(elements, format, path);
        }
        self.initialized()
    }
}
