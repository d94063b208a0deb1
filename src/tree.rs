//! Value representation for structured data, plus the paths that address into it.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// A node representing a value in structured data (JSON, YAML, TOML).
///
/// Objects keep their keys in insertion order: field order is part of what a
/// comparison reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    /// An explicitly missing value. Never produced by the parsers.
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Object(IndexMap<String, Node>),
    Array(Vec<Node>),
    /// A host value without a plain shape. The label is only used for display.
    Opaque(String),
}

/// The classified kind of a compared value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Unknown,
}

impl ValueType {
    /// Classifies a possibly missing value. A missing value is `Undefined`.
    pub fn of(node: Option<&Node>) -> Self {
        node.map_or(ValueType::Undefined, Node::value_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Object => "object",
            ValueType::Array => "array",
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
            ValueType::Undefined => "undefined",
            ValueType::Unknown => "unknown",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ValueType::Object | ValueType::Array)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Classification order is object, array, string, number, boolean, null,
    /// undefined; everything else is unknown.
    pub fn value_type(&self) -> ValueType {
        match self {
            Node::Object(_) => ValueType::Object,
            Node::Array(_) => ValueType::Array,
            Node::String(_) => ValueType::String,
            Node::Number(_) => ValueType::Number,
            Node::Bool(_) => ValueType::Boolean,
            Node::Null => ValueType::Null,
            Node::Undefined => ValueType::Undefined,
            Node::Opaque(_) => ValueType::Unknown,
        }
    }

    pub fn type_name(&self) -> &str {
        self.value_type().as_str()
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.value_type().is_container()
    }

    /// Follows `path` from this node. Returns `None` when any step is missing.
    pub fn lookup(&self, path: &Path) -> Option<&Node> {
        path.segments().iter().try_fold(self, |node, segment| match (node, segment) {
            (Node::Object(map), PathSegment::Key(key)) => map.get(key),
            (Node::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        })
    }

    /// Returns a short preview of the node's value, truncated to max_len.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Node::Null => "null".to_string(),
            Node::Undefined => "undefined".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => format_number(*n),
            Node::String(s) => format!("\"{}\"", s),
            Node::Opaque(label) => format!("<{}>", label),
            Node::Object(map) => match map.len() {
                0 => "{}".to_string(),
                1 => "{ 1 key }".to_string(),
                count => format!("{{ {} keys }}", count),
            },
            Node::Array(arr) => match arr.len() {
                0 => "[]".to_string(),
                1 => "[ 1 item ]".to_string(),
                count => format!("[ {} items ]", count),
            },
        };

        if preview.chars().count() > max_len {
            let kept: String = preview.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            preview
        }
    }
}

/// Formats a number the way dynamic-language hosts print it: integral values
/// carry no fraction, zero has no sign, infinities are spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => Node::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(Node::from).collect()),
            serde_json::Value::Object(obj) => {
                Node::Object(obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null | Node::Undefined => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            // Integral values inside the exactly representable range print without a fraction
            Node::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Node::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Node::Number(n) => serializer.serialize_str(&format_number(*n)),
            Node::String(s) => serializer.serialize_str(s),
            Node::Opaque(label) => serializer.serialize_str(label),
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// One step of a [`Path`]: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a value inside a root value.
///
/// Displays as `items[0].name`; keys containing `-` or a space, and the empty
/// key, are single-quoted. The root path displays as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Returns a new path one step deeper.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Key(key) if needs_quotes(key) => write!(f, "'{}'", key),
            PathSegment::Key(key) => f.write_str(key),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Keys that cannot be written bare in the rendered views.
pub(crate) fn needs_quotes(key: &str) -> bool {
    key.is_empty() || key.contains(['-', ' '])
}
