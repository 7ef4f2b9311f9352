//! JSON document format.
//!
//! Paths are JSON pointers (RFC 6901): `""` is the whole document, `/a/b`
//! descends through objects, and numeric tokens index arrays. Sequence
//! element `i` of `/list` lives at `/list/i`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::format::{Codec, Format};

/// The `[JSON]` format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormat;

impl Format for JsonFormat {
    const NAME: &'static str = "[JSON]";

    type Source = Value;
    type Dest = Value;

    fn element_path(&self, vector_path: &str, index: usize) -> String {
        format!("{vector_path}/{index}")
    }
}

impl<T: Serialize + DeserializeOwned> Codec<T> for JsonFormat {
    fn parse(&self, source: &Value, path: &str) -> Option<T> {
        T::deserialize(source.pointer(path)?).ok()
    }

    fn emit(&self, dest: &mut Value, path: &str, value: &T) -> Result<(), String> {
        let value = serde_json::to_value(value).map_err(|e| e.to_string())?;
        set_pointer(dest, path, value)
    }
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn is_index(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Write `value` at pointer `path`, creating intermediate containers.
///
/// A missing container becomes an array when the token that indexes it is
/// numeric, otherwise an object. Arrays are only written at an existing index
/// or extended by one at the end; an index past the end fails.
pub(crate) fn set_pointer(dest: &mut Value, path: &str, value: Value) -> Result<(), String> {
    if path.is_empty() {
        *dest = value;
        return Ok(());
    }
    let Some(rest) = path.strip_prefix('/') else {
        return Err(format!("invalid JSON pointer '{path}'"));
    };

    let mut current = dest;
    for token in rest.split('/').map(unescape) {
        if current.is_null() {
            *current = if is_index(&token) {
                Value::Array(Vec::new())
            } else {
                Value::Object(Map::new())
            };
        }
        current = match current {
            Value::Object(map) => map.entry(token).or_insert(Value::Null),
            Value::Array(items) => {
                let index: usize = token
                    .parse()
                    .map_err(|_| format!("'{token}' does not index an array in '{path}'"))?;
                if index > items.len() {
                    return Err(format!(
                        "index {index} leaves a gap in an array of {} in '{path}'",
                        items.len()
                    ));
                }
                if index == items.len() {
                    items.push(Value::Null);
                }
                &mut items[index]
            }
            _ => return Err(format!("'{path}' runs through a scalar")),
        };
    }
    *current = value;
    Ok(())
}
