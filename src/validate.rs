//! Post-parse validation hooks.
//!
//! A hook sees a freshly parsed value before it is stored. A rejection is
//! reported as [`ConfbindError::Invalid`] in strict mode; in lenient mode the
//! value is dropped, the node keeps what it had, and a warning is logged.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::ConfbindError;

/// User check run on a parsed value. `Err` carries a human-readable reason.
pub type ValidateFn<T> = dyn Fn(&T) -> Result<(), String> + Send + Sync;

/// Shareable validation hook attached to a [`Variable`](crate::Variable) or
/// [`Vector`](crate::Vector).
pub struct Validator<T>(Arc<ValidateFn<T>>);

impl<T> Validator<T> {
    pub fn new<V>(check: V) -> Self
    where
        V: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    pub fn check(&self, value: &T) -> Result<(), String> {
        (self.0)(value)
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Outcome of running a hook under a strictness policy.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Accepted,
    Rejected,
}

/// Fold a hook result into the error taxonomy.
///
/// Strict: a rejection becomes `Err(Invalid)`. Lenient: a rejection is logged
/// and reported as [`Verdict::Rejected`].
pub(crate) fn fold(
    outcome: Result<(), String>,
    format: &'static str,
    path: &str,
    strict: bool,
) -> Result<Verdict, ConfbindError> {
    match outcome {
        Ok(()) => Ok(Verdict::Accepted),
        Err(reason) if strict => Err(ConfbindError::Invalid {
            format,
            path: path.to_string(),
            reason,
        }),
        Err(reason) => {
            warn!(format, path, %reason, "validation rejected value");
            Ok(Verdict::Rejected)
        }
    }
}

/// Run an optional hook against `value`.
pub(crate) fn run<T>(
    validator: Option<&Validator<T>>,
    value: &T,
    format: &'static str,
    path: &str,
    strict: bool,
) -> Result<Verdict, ConfbindError> {
    match validator {
        Some(validator) => fold(validator.check(value), format, path, strict),
        None => Ok(Verdict::Accepted),
    }
}
