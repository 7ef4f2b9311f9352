//! Pass-scoped child registration for groups.
//!
//! Every parse or emit of a group starts by running its
//! [`Config::init`](crate::Config::init) against a fresh [`Registrar`] for the
//! active format. Fields registered for other formats are dropped on the
//! spot, so the resulting binding list only contains what this pass can
//! traverse. The list borrows the group's fields and is discarded when the
//! pass over that group ends; nothing is kept on the nodes.

use std::any::TypeId;
use std::marker::PhantomData;

use crate::bind::Bind;
use crate::error::ConfbindError;
use crate::format::{self, Format};

/// A child node bound to a path for one pass with format `F`.
pub trait Binding<F: Format> {
    fn path(&self) -> &str;

    fn parse(
        &mut self,
        format: &F,
        source: &F::Source,
        strict: bool,
    ) -> Result<bool, ConfbindError>;

    fn emit(&mut self, format: &F, dest: &mut F::Dest, strict: bool) -> Result<(), ConfbindError>;

    fn settle(&mut self, format: &F) -> bool;

    fn initialized(&self) -> bool;

    fn optional(&self) -> bool;
}

/// Binding of a node registered for format `G`, usable in a pass whose
/// format type is `G` as well. Only ever built when the types match.
struct FieldBinding<'a, G, N: ?Sized> {
    path: String,
    node: &'a mut N,
    _format: PhantomData<fn() -> G>,
}

impl<F, G, N> Binding<F> for FieldBinding<'_, G, N>
where
    F: Format,
    G: Format,
    N: Bind<G> + ?Sized,
{
    fn path(&self) -> &str {
        &self.path
    }

    fn parse(
        &mut self,
        format: &F,
        source: &F::Source,
        strict: bool,
    ) -> Result<bool, ConfbindError> {
        match format::narrow::<F, G>(format, source) {
            Some((format, source)) => self.node.parse_node(format, &self.path, source, strict),
            None => Ok(false),
        }
    }

    fn emit(&mut self, format: &F, dest: &mut F::Dest, strict: bool) -> Result<(), ConfbindError> {
        match format::narrow_mut::<F, G>(format, dest) {
            Some((format, dest)) => self.node.emit_node(format, &self.path, dest, strict),
            None => Ok(()),
        }
    }

    fn settle(&mut self, format: &F) -> bool {
        match format::narrow_format::<F, G>(format) {
            Some(format) => self.node.settle(format, &self.path),
            None => self.node.initialized(),
        }
    }

    fn initialized(&self) -> bool {
        self.node.initialized()
    }

    fn optional(&self) -> bool {
        self.node.optional()
    }
}

/// Collects the child bindings of one group for one pass with format `F`.
pub struct Registrar<'a, F: Format> {
    bindings: Vec<Box<dyn Binding<F> + 'a>>,
}

impl<'a, F: Format> Registrar<'a, F> {
    pub(crate) fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register `node` at `path` for format `G`. Ignored unless `G` is the
    /// format of the current pass.
    pub fn register<G, N>(&mut self, path: impl Into<String>, node: &'a mut N) -> &mut Self
    where
        G: Format,
        N: Bind<G> + 'a,
    {
        if TypeId::of::<G>() == TypeId::of::<F>() {
            self.bindings.push(Box::new(FieldBinding::<G, N> {
                path: path.into(),
                node,
                _format: PhantomData,
            }));
        }
        self
    }

    /// Start registering one field under several formats:
    ///
    /// ```ignore
    /// r.field(&mut self.port).at::<EnvFormat>("PORT").at::<JsonFormat>("/port");
    /// ```
    pub fn field<'r, N: 'a>(&'r mut self, node: &'a mut N) -> Field<'r, 'a, F, N> {
        Field {
            registrar: self,
            node: Some(node),
        }
    }

    pub(crate) fn finish(self) -> Vec<Box<dyn Binding<F> + 'a>> {
        self.bindings
    }
}

/// One field awaiting its per-format paths. See [`Registrar::field`].
pub struct Field<'r, 'a, F: Format, N> {
    registrar: &'r mut Registrar<'a, F>,
    node: Option<&'a mut N>,
}

impl<'a, F: Format, N: 'a> Field<'_, 'a, F, N> {
    /// Path of this field for format `G`.
    pub fn at<G>(mut self, path: impl Into<String>) -> Self
    where
        G: Format,
        N: Bind<G>,
    {
        if TypeId::of::<G>() == TypeId::of::<F>()
            && let Some(node) = self.node.take()
        {
            self.registrar.register::<G, N>(path, node);
        }
        self
    }
}
