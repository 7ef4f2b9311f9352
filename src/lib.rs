//! Declarative, multi-format configuration binding. Declare a typed tree
//! once, then read it from and write it to any supported format.
//!
//! A configuration is a tree of nodes. Leaves are [`Variable`]s (one typed
//! value) and [`Vector`]s (an ordered list), interior nodes are groups: your
//! own structs implementing [`Config`]. Each group says, per format, at which
//! path every child lives. The engine walks the tree, pulls values out of a
//! source or pushes them into a destination, and tracks which nodes ended up
//! holding a value.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Server {
//!     section: Section,
//!     host: Variable<String>,
//!     port: Variable<u16>,
//! }
//!
//! impl Config for Server {
//!     fn section(&self) -> &Section { &self.section }
//!     fn section_mut(&mut self) -> &mut Section { &mut self.section }
//!
//!     fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
//!         r.field(&mut self.host)
//!             .at::<EnvFormat>(format!("{path}_HOST"))
//!             .at::<JsonFormat>(format!("{path}/host"));
//!         r.field(&mut self.port)
//!             .at::<EnvFormat>(format!("{path}_PORT"))
//!             .at::<JsonFormat>(format!("{path}/port"));
//!     }
//! }
//!
//! let mut server = Server::default();
//! Binder::json().parse_str(&mut server, r#"{"host": "db", "port": 5432}"#)?;
//! let vars = Binder::env().path("APP").emit(&mut server)?;
//! // {"APP_HOST": "db", "APP_PORT": "5432"}
//! ```
//!
//! # Node model
//!
//! Every node is either **mandatory** or **optional**. A mandatory value
//! must come from the source; an optional one may stay unset. Constructing
//! a node with a default ([`Variable::with_default`],
//! [`Vector::with_default`]) makes it optional and already initialized, so
//! a missing source value simply keeps the default.
//!
//! A group is **initialized** when all of its mandatory children are. A
//! group marked optional ([`Section::optional`]) may be entirely absent;
//! when present, its own mandatory children still apply.
//!
//! Sequences are discovered by scanning: element `0`, `1`, `2`, ... at the
//! format's element path until one is missing. Elements can be scalars,
//! groups, or nested lists.
//!
//! # Formats
//!
//! | Format         | Source / Dest                     | Path            | Element       |
//! |----------------|-----------------------------------|-----------------|---------------|
//! | [`EnvFormat`]  | [`Environment`] / `BTreeMap`      | `NAME`          | `NAME_0`      |
//! | [`JsonFormat`] | `serde_json::Value`               | `/a/b` pointer  | `/a/b/0`      |
//! | [`TomlFormat`] | `toml::Table`                     | `a.b` dotted    | `a.b.0`       |
//!
//! A value present in the source but not convertible to the target type is
//! treated as absent. New formats implement [`Format`] plus [`Codec<T>`] for
//! the scalar types they support.
//!
//! One tree can carry paths for several formats at once. Registrations for
//! formats other than the one being bound are ignored, so a field only
//! registered for env stays untouched by a JSON pass.
//!
//! # Strict and lenient
//!
//! Every pass takes a `strict` flag ([`Binder::strict`]).
//!
//! - **Strict**: the first missing or rejected mandatory value aborts the
//!   pass with a [`ConfbindError`] naming the format and path. Sibling
//!   nodes are still visited, so everything that could be bound is.
//! - **Lenient**: nothing missing is an error. Check
//!   [`Object::initialized`] on the root before trusting the tree.
//!
//! Emit follows the same rule: unset optional nodes and unset optional
//! groups produce no output, and an unset mandatory value is an error only
//! in strict mode.
//!
//! # Validation
//!
//! [`Variable::with_validator`] and [`Vector::with_validator`] attach a hook
//! that sees each freshly parsed value before it is stored;
//! [`Config::validate`] checks a whole group after it parsed completely. A
//! rejection is [`ConfbindError::Invalid`] in strict mode. In lenient mode
//! the value is dropped with a warning and the node keeps its previous
//! state. Defaults are not validated.
//!
//! # Logging
//!
//! Passes log through [`tracing`]: group summaries and [`Binder`] entry
//! points at `debug`, individual values at `trace`, lenient validation
//! rejections at `warn`. No subscriber is installed.

pub mod error;

mod bind;
mod builder;
mod config;
mod env;
mod format;
mod json;
mod node;
mod registry;
mod toml_doc;
mod validate;

#[cfg(test)]
mod fixtures;

pub use bind::{Bind, Element};
pub use builder::Binder;
pub use config::{Config, ConfigExt};
pub use env::{EnvFormat, EnvValue, Environment};
pub use error::ConfbindError;
pub use format::{Codec, Format};
pub use json::JsonFormat;
pub use node::{Object, Section, Variable, Vector};
pub use registry::{Binding, Field, Registrar};
pub use toml_doc::TomlFormat;
pub use validate::{ValidateFn, Validator};
