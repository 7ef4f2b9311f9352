//! The backend contract: how a single value is read from and written to a
//! source, and how sequence element paths are derived.
//!
//! A format knows nothing about trees. Groups, sequences and optionality are
//! handled by the bindings; a format only answers "what is at this path" and
//! "put this value at this path".

use std::any::Any;

/// A configuration backend.
///
/// Implementors are plain strategy objects. `Source` is what the tree is
/// parsed from, `Dest` is what it is emitted into.
pub trait Format: Any {
    /// Short tag used in error messages, e.g. `[ENV]`.
    const NAME: &'static str;

    type Source: Any;
    type Dest: Any;

    /// Path of the element at `index` inside the sequence at `vector_path`.
    ///
    /// Must be a pure function of its inputs: sequences are read by calling
    /// it for `0, 1, 2, ...` until an element is missing.
    fn element_path(&self, vector_path: &str, index: usize) -> String;
}

/// Conversion of one scalar type `T` for a format.
pub trait Codec<T>: Format {
    /// Read the value at `path`.
    ///
    /// Returns `None` both when nothing is there and when what is there does
    /// not convert to `T`. Neither case is an error at this level.
    fn parse(&self, source: &Self::Source, path: &str) -> Option<T>;

    /// Write `value` at `path`.
    ///
    /// Only fails when the backend cannot represent the value at all; the
    /// returned reason ends up in [`ConfbindError::Serialize`](crate::ConfbindError::Serialize).
    fn emit(&self, dest: &mut Self::Dest, path: &str, value: &T) -> Result<(), String>;
}

pub(crate) fn narrow_format<F: Format, G: Format>(format: &F) -> Option<&G> {
    (format as &dyn Any).downcast_ref::<G>()
}

/// Narrow a borrowed format and source to the format type `G` a binding was
/// registered for. `None` unless `F` and `G` are the same type.
pub(crate) fn narrow<'s, F: Format, G: Format>(
    format: &'s F,
    source: &'s F::Source,
) -> Option<(&'s G, &'s G::Source)> {
    let format = narrow_format::<F, G>(format)?;
    let source = (source as &dyn Any).downcast_ref::<G::Source>()?;
    Some((format, source))
}

/// Mutable counterpart of [`narrow`] for emit passes.
pub(crate) fn narrow_mut<'s, F: Format, G: Format>(
    format: &'s F,
    dest: &'s mut F::Dest,
) -> Option<(&'s G, &'s mut G::Dest)> {
    let format = narrow_format::<F, G>(format)?;
    let dest = (dest as &mut dyn Any).downcast_mut::<G::Dest>()?;
    Some((format, dest))
}
