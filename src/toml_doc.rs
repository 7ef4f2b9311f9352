//! TOML document format.
//!
//! Paths are dotted keys into a [`toml::Table`]: `database.url`. Numeric
//! segments index arrays, so sequence element `i` of `servers` lives at
//! `servers.i`. Empty segments are skipped, which lets a group rooted at `""`
//! register its children as `".host"` and still land on `host`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::format::{Codec, Format};

/// The `[TOML]` format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TomlFormat;

impl Format for TomlFormat {
    const NAME: &'static str = "[TOML]";

    type Source = Table;
    type Dest = Table;

    fn element_path(&self, vector_path: &str, index: usize) -> String {
        format!("{vector_path}.{index}")
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('.').filter(|s| !s.is_empty()).collect()
}

fn lookup(table: &Table, segments: &[&str]) -> Option<Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(Value::Table(table.clone()));
    };
    let mut current = table.get(*first)?;
    for segment in rest {
        current = match current {
            Value::Table(t) => t.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current.clone())
}

fn container_for(next: &str) -> Value {
    if next.parse::<usize>().is_ok() {
        Value::Array(Vec::new())
    } else {
        Value::Table(Table::new())
    }
}

fn set_nested(table: &mut Table, segments: &[&str], value: Value) -> Result<(), String> {
    let Some((first, rest)) = segments.split_first() else {
        return Err("empty key".to_string());
    };
    match rest.first() {
        None => {
            table.insert(first.to_string(), value);
            Ok(())
        }
        Some(next) => {
            let child = table
                .entry(first.to_string())
                .or_insert_with(|| container_for(next));
            set_in(child, rest, value)
        }
    }
}

fn set_in(slot: &mut Value, segments: &[&str], value: Value) -> Result<(), String> {
    match slot {
        Value::Table(table) => set_nested(table, segments, value),
        Value::Array(items) => {
            let Some((first, rest)) = segments.split_first() else {
                return Err("empty key".to_string());
            };
            let index: usize = first
                .parse()
                .map_err(|_| format!("'{first}' does not index an array"))?;
            if index > items.len() {
                return Err(format!("index {index} leaves a gap in an array of {}", items.len()));
            }
            match rest.first() {
                None if index == items.len() => items.push(value),
                None => items[index] = value,
                Some(next) => {
                    if index == items.len() {
                        items.push(container_for(next));
                    }
                    return set_in(&mut items[index], rest, value);
                }
            }
            Ok(())
        }
        _ => Err("key runs through a scalar".to_string()),
    }
}

impl<T: Serialize + DeserializeOwned> Codec<T> for TomlFormat {
    fn parse(&self, source: &Table, path: &str) -> Option<T> {
        lookup(source, &segments(path))?.try_into().ok()
    }

    fn emit(&self, dest: &mut Table, path: &str, value: &T) -> Result<(), String> {
        let value = Value::try_from(value).map_err(|e| e.to_string())?;
        let segments = segments(path);
        if !segments.is_empty() {
            return set_nested(dest, &segments, value);
        }
        match value {
            Value::Table(table) => {
                *dest = table;
                Ok(())
            }
            other => Err(format!("document root must be a table, got {}", other.type_str())),
        }
    }
}
