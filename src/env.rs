//! Environment-variable format.
//!
//! Paths are variable names. Sequence element `i` of `NAME` lives at
//! `NAME_i`, so nested paths just concatenate with `_`. Values are plain
//! strings converted per target type with [`EnvValue`]: the text must
//! survive a round trip through the target type unchanged, otherwise it is
//! treated as absent.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::format::{Codec, Format};

/// The `[ENV]` format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvFormat;

/// Where environment values are read from.
///
/// `Process` reads the live process environment on every lookup. `Vars` is a
/// captured set of pairs so tests can pass synthetic data instead of
/// `std::env::vars()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Process,
    Vars(BTreeMap<String, String>),
}

impl Environment {
    pub fn process() -> Self {
        Environment::Process
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Environment::Vars(vars.into_iter().collect())
    }

    /// Value of `name`, if set and valid unicode.
    pub fn get(&self, name: &str) -> Option<String> {
        match self {
            Environment::Process => std::env::var(name).ok(),
            Environment::Vars(vars) => vars.get(name).cloned(),
        }
    }
}

impl From<BTreeMap<String, String>> for Environment {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Environment::Vars(vars)
    }
}

impl Format for EnvFormat {
    const NAME: &'static str = "[ENV]";

    type Source = Environment;
    type Dest = BTreeMap<String, String>;

    fn element_path(&self, vector_path: &str, index: usize) -> String {
        format!("{vector_path}_{index}")
    }
}

/// Text conversion of a scalar stored in an environment variable.
pub trait EnvValue: Sized {
    /// `None` if `raw` is not exactly representable as `Self`.
    fn from_env_str(raw: &str) -> Option<Self>;

    fn to_env_string(&self) -> String;
}

/// Parse `raw`, then require that rendering the value reproduces `raw`
/// exactly. Rejects padding, signs, leading zeros, exponents and anything
/// that loses precision, e.g. `123456.789` as `f32`.
fn round_trip<T: FromStr + ToString>(raw: &str) -> Option<T> {
    let value: T = raw.parse().ok()?;
    (value.to_string() == raw).then_some(value)
}

macro_rules! env_round_trip {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn from_env_str(raw: &str) -> Option<Self> {
                    round_trip(raw)
                }

                fn to_env_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

env_round_trip!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl EnvValue for String {
    fn from_env_str(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn to_env_string(&self) -> String {
        self.clone()
    }
}

impl<T: EnvValue> Codec<T> for EnvFormat {
    fn parse(&self, source: &Environment, path: &str) -> Option<T> {
        T::from_env_str(&source.get(path)?)
    }

    fn emit(&self, dest: &mut BTreeMap<String, String>, path: &str, value: &T) -> Result<(), String> {
        dest.insert(path.to_string(), value.to_env_string());
        Ok(())
    }
}
