//! Store — flat-file persistence for raw and clean record collections.
//!
//! Both datasets are JSON arrays, pretty-printed with four-space indentation
//! and written as UTF-8 without ASCII escaping, so accented text stays
//! readable when inspected by hand.

use crate::error::{Error, Result};
use crate::types::{CanonicalEvent, RawEvent};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::Path;

/// Load the raw dataset. The file must hold a JSON array of objects.
pub fn load_raw(path: &Path) -> Result<Vec<RawEvent>> {
    let value: Value = read_json(path)?;
    let Value::Array(items) = value else {
        return Err(Error::Shape {
            path: path.to_path_buf(),
            found: format!("top level is {}", kind(&value)),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(RawEvent::from(map)),
            other => Err(Error::Shape {
                path: path.to_path_buf(),
                found: format!("element {index} is {}", kind(&other)),
            }),
        })
        .collect()
}

pub fn save_raw(path: &Path, events: &[RawEvent]) -> Result<()> {
    write_pretty(path, events)
}

pub fn load_clean(path: &Path) -> Result<Vec<CanonicalEvent>> {
    read_json(path)
}

pub fn save_clean(path: &Path, events: &[CanonicalEvent]) -> Result<()> {
    write_pretty(path, events)
}

/// Render `value` exactly as it is written to disk.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| Error::json(path, e))
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let json = to_pretty_json(value).map_err(|e| Error::json(path, e))?;
    std::fs::write(path, json).map_err(|e| Error::io(path, e))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
