//! Ordered transformer arguments.
//!
//! [`Args`] is the single source for a transformer's equality and its
//! textual rendering. It keeps insertion order so that renderings are
//! deterministic and match the order in which arguments were declared.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write as _};

use crate::columns::ColumnSelection;
use crate::policy::Policy;

/// A single argument value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ArgValue>),
    Map(Args),
}

impl ArgValue {
    /// Deep equality, optionally treating two NaNs as equal.
    pub fn equals(&self, other: &ArgValue, equal_nan: bool) -> bool {
        match (self, other) {
            (ArgValue::Null, ArgValue::Null) => true,
            (ArgValue::Bool(a), ArgValue::Bool(b)) => a == b,
            (ArgValue::Int(a), ArgValue::Int(b)) => a == b,
            (ArgValue::Float(a), ArgValue::Float(b)) => {
                a == b || (equal_nan && a.is_nan() && b.is_nan())
            }
            (ArgValue::Str(a), ArgValue::Str(b)) => a == b,
            (ArgValue::List(a), ArgValue::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y, equal_nan))
            }
            (ArgValue::Map(a), ArgValue::Map(b)) => a.equals(b, equal_nan),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Float(v) => Some(*v),
            ArgValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Args> {
        match self {
            ArgValue::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    /// Render the value. Strings are quoted in repr form; nested values are
    /// always rendered in repr form.
    fn render(&self, out: &mut String, repr: bool) {
        match self {
            ArgValue::Null => out.push_str("null"),
            ArgValue::Bool(v) => {
                let _ = write!(out, "{v}");
            }
            ArgValue::Int(v) => {
                let _ = write!(out, "{v}");
            }
            ArgValue::Float(v) => {
                let _ = write!(out, "{v:?}");
            }
            ArgValue::Str(v) if repr => {
                let _ = write!(out, "{v:?}");
            }
            ArgValue::Str(v) => out.push_str(v),
            ArgValue::List(items) => {
                out.push('[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    item.render(out, true);
                }
                out.push(']');
            }
            ArgValue::Map(map) => {
                out.push('{');
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{key:?}: ");
                    value.render(out, true);
                }
                out.push('}');
            }
        }
    }

    /// Repr rendering (strings quoted).
    pub fn to_repr(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, true);
        out
    }
}

impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, false)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out, false);
        f.write_str(&out)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        ArgValue::Str(value.clone())
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(value: Vec<T>) -> Self {
        ArgValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ArgValue::Null, Into::into)
    }
}

impl From<Args> for ArgValue {
    fn from(value: Args) -> Self {
        ArgValue::Map(value)
    }
}

impl From<Policy> for ArgValue {
    fn from(value: Policy) -> Self {
        ArgValue::Str(value.as_str().to_string())
    }
}

impl From<&ColumnSelection> for ArgValue {
    fn from(value: &ColumnSelection) -> Self {
        match value {
            ColumnSelection::All => ArgValue::Null,
            ColumnSelection::Explicit(columns) => {
                ArgValue::List(columns.iter().map(ArgValue::from).collect())
            }
        }
    }
}

/// Insertion-ordered mapping of argument names to values.
#[derive(Debug, Clone, Default)]
pub struct Args {
    entries: Vec<(String, ArgValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Args::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append every entry of `other`, replacing values for existing keys.
    pub fn extend(&mut self, other: Args) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deep equality of two mappings. Key order does not matter.
    pub fn equals(&self, other: &Args, equal_nan: bool) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| {
                other
                    .get(key)
                    .is_some_and(|theirs| value.equals(theirs, equal_nan))
            })
    }

    /// `key="value", key=[...]` with quoted strings.
    pub fn to_repr_line(&self) -> String {
        self.render_line(true)
    }

    /// `key=value, key=[...]` with bare top-level strings.
    pub fn to_str_line(&self) -> String {
        self.render_line(false)
    }

    fn render_line(&self, repr: bool) -> String {
        let mut out = String::new();
        for (idx, (key, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            out.push_str(key);
            out.push('=');
            value.render(&mut out, repr);
        }
        out
    }
}

impl PartialEq for Args {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, false)
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (key, value) in iter {
            args.insert(key, value);
        }
        args
    }
}

impl IntoIterator for Args {
    type Item = (String, ArgValue);
    type IntoIter = std::vec::IntoIter<(String, ArgValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Args {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ArgsVisitor;

impl<'de> Visitor<'de> for ArgsVisitor {
    type Value = Args;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of argument names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut args = Args::new();
        while let Some((key, value)) = access.next_entry::<String, ArgValue>()? {
            args.insert(key, value);
        }
        Ok(args)
    }
}

impl<'de> Deserialize<'de> for Args {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ArgsVisitor)
    }
}
