//! Groups: user structs that declare their children.
//!
//! A group implements [`Config`]: it owns a [`Section`] and its child nodes,
//! and registers those children (with one path per supported format) from
//! [`Config::init`]. The engine calls `init` at the start of every parse and
//! emit of the group, traverses the bindings it produced, then drops them.
//!
//! # Completeness
//!
//! A group is initialized when every non-optional child registered for the
//! active format is initialized. Optionality of a nested group does not leak
//! upward: the parent only sees the nested group's own initialized state.
//! The state is recorded in the group's [`Section`] at the end of each pass,
//! so [`Object::initialized`] on a group reflects the last pass over it. A
//! group whose [`Config::validate`] rejected the last parse stays
//! uninitialized until it is parsed again.
//!
//! Emitting through [`ConfigExt::emit`] first re-derives the state of the
//! whole tree once, so values assigned directly (e.g. [`Variable::set`](crate::Variable::set))
//! count without a prior parse.
//!
//! # Re-entrancy
//!
//! Passes take `&mut` on the tree. A validation hook only gets `&self` and
//! cannot start another pass over the group it validates.

use tracing::debug;

use crate::bind::{Bind, Element};
use crate::error::ConfbindError;
use crate::format::Format;
use crate::node::{Object, Section};
use crate::registry::{Binding, Registrar};
use crate::validate;

/// A configuration group.
///
/// ```ignore
/// #[derive(Default)]
/// struct Database {
///     section: Section,
///     url: Variable<String>,
///     pool_size: Variable<u32>,
/// }
///
/// impl Config for Database {
///     fn section(&self) -> &Section { &self.section }
///     fn section_mut(&mut self) -> &mut Section { &mut self.section }
///
///     fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
///         r.field(&mut self.url)
///             .at::<EnvFormat>(format!("{path}_URL"))
///             .at::<JsonFormat>(format!("{path}/url"));
///         r.field(&mut self.pool_size)
///             .at::<EnvFormat>(format!("{path}_POOL_SIZE"))
///             .at::<JsonFormat>(format!("{path}/pool_size"));
///     }
/// }
/// ```
pub trait Config {
    fn section(&self) -> &Section;

    fn section_mut(&mut self) -> &mut Section;

    /// Register every child at its path under `path`, the group's own path
    /// in the active format's convention.
    fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>);

    /// Cross-field check run after a parse leaves the group initialized.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl<G: Config> Object for G {
    fn initialized(&self) -> bool {
        self.section().is_initialized()
    }

    fn optional(&self) -> bool {
        self.section().is_optional()
    }
}

fn build<'a, F: Format, G: Config>(group: &'a mut G, path: &str) -> Vec<Box<dyn Binding<F> + 'a>> {
    let mut registrar = Registrar::new();
    group.init(path, &mut registrar);
    registrar.finish()
}

fn all_mandatory_initialized<F: Format>(bindings: &[Box<dyn Binding<F> + '_>]) -> bool {
    bindings.iter().all(|b| b.optional() || b.initialized())
}

pub(crate) fn parse_group<F: Format, G: Config>(
    group: &mut G,
    format: &F,
    path: &str,
    source: &F::Source,
    strict: bool,
) -> Result<bool, ConfbindError> {
    let mut parsed = false;
    let mut first_error = None;
    group.section_mut().set_rejected(false);

    let mut bindings = build::<F, G>(group, path);
    for binding in bindings.iter_mut() {
        match binding.parse(format, source, strict) {
            Ok(found) => parsed |= found,
            Err(err) => {
                let fatal = strict && (!binding.optional() || !err.is_not_set());
                if fatal && first_error.is_none() {
                    first_error = Some(err);
                } else {
                    debug!(format = F::NAME, path = binding.path(), %err, "child skipped");
                }
            }
        }
    }
    let initialized = all_mandatory_initialized(&bindings);
    drop(bindings);

    group.section_mut().set_initialized(initialized);
    debug!(format = F::NAME, path, parsed, initialized, "group parsed");

    if let Some(err) = first_error {
        return Err(err);
    }

    if initialized && let Err(reason) = group.validate() {
        group.section_mut().set_rejected(true);
        validate::fold(Err(reason), F::NAME, path, strict)?;
    }

    Ok(parsed)
}

/// Re-derive the initialized state of `group` and its whole subtree. A
/// rejected group stays uninitialized.
pub(crate) fn settle_group<F: Format, G: Config>(
    group: &mut G,
    format: &F,
    path: &str,
) -> bool {
    let mut bindings = build::<F, G>(group, path);
    for binding in bindings.iter_mut() {
        binding.settle(format);
    }
    let initialized = all_mandatory_initialized(&bindings);
    drop(bindings);

    group.section_mut().set_initialized(initialized);
    group.initialized()
}

/// Emit `group` using the state recorded by the last parse or settle.
pub(crate) fn emit_group<F: Format, G: Config>(
    group: &mut G,
    format: &F,
    path: &str,
    dest: &mut F::Dest,
    strict: bool,
) -> Result<(), ConfbindError> {
    if !group.initialized() && group.optional() {
        debug!(format = F::NAME, path, "optional group not set, skipped");
        return Ok(());
    }

    let mut bindings = build::<F, G>(group, path);
    for binding in bindings.iter_mut() {
        binding.emit(format, dest, strict)?;
    }
    Ok(())
}

impl<F: Format, G: Config> Bind<F> for G {
    fn parse_node(
        &mut self,
        format: &F,
        path: &str,
        source: &F::Source,
        strict: bool,
    ) -> Result<bool, ConfbindError> {
        parse_group(self, format, path, source, strict)
    }

    fn emit_node(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError> {
        emit_group(self, format, path, dest, strict)
    }

    fn settle(&mut self, format: &F, path: &str) -> bool {
        settle_group(self, format, path)
    }
}

/// Groups as sequence elements: each element starts from `Default` and must
/// parse completely, otherwise the scan stops there.
impl<F: Format, G: Config + Default> Element<F> for G {
    fn parse_element(format: &F, path: &str, source: &F::Source) -> Result<Self, ConfbindError> {
        let mut element = G::default();
        let parsed = parse_group(&mut element, format, path, source, true)?;
        if !parsed || !element.initialized() {
            return Err(ConfbindError::NotSet {
                format: F::NAME,
                path: path.to_string(),
            });
        }
        Ok(element)
    }

    fn emit_element(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError> {
        emit_group(self, format, path, dest, strict)
    }

    fn settle_element(&mut self, format: &F, path: &str) {
        settle_group(self, format, path);
    }
}

/// Entry points for binding a whole tree rooted at a group.
pub trait ConfigExt: Config + Sized {
    /// Parse the group at `path` from `source`.
    ///
    /// Returns whether anything for this group was found. In strict mode an
    /// error names the first missing or invalid mandatory field in
    /// declaration order; in lenient mode check [`Object::initialized`]
    /// before trusting the tree.
    fn parse<F: Format>(
        &mut self,
        format: &F,
        path: &str,
        source: &F::Source,
        strict: bool,
    ) -> Result<bool, ConfbindError> {
        parse_group(self, format, path, source, strict)
    }

    /// Emit the group at `path` into `dest`. Unset optional values and unset
    /// optional groups produce no output.
    fn emit<F: Format>(
        &mut self,
        format: &F,
        path: &str,
        dest: &mut F::Dest,
        strict: bool,
    ) -> Result<(), ConfbindError> {
        settle_group(self, format, path);
        emit_group(self, format, path, dest, strict)
    }
}

impl<G: Config> ConfigExt for G {}
