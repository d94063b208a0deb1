//! File parsing for JSON, YAML and TOML formats.
//!
//! This module turns structured data into [`Node`] trees. Object keys keep
//! the order they have in the document, since field order is reported by the
//! diff. The format is detected from the file extension; when the extension
//! is unknown or missing, JSON, TOML and YAML are tried in that order.
//!
//! # Examples
//!
//! ```no_run
//! use vdiff_rs::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse a JSON file
//! let node = parse_file(Path::new("data.json"))?;
//!
//! // Parse a YAML file
//! let node = parse_file(Path::new("config.yaml"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::tree::Node;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Which format a piece of content is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    /// Try JSON, then TOML, then YAML.
    #[default]
    Auto,
    Json,
    Yaml,
    Toml,
}

impl FormatHint {
    /// Detects the format from a file extension. Unknown extensions give `Auto`.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            Some("toml") => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a file into a Node.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist (`ParseError::FileNotFound`)
/// - The file cannot be read (`ParseError::ReadError`)
/// - The content is invalid for the format of its extension
///   (`ParseError::JsonError`, `ParseError::YamlError`, `ParseError::TomlError`)
/// - The extension is unknown and no format accepts the content
///   (`ParseError::UnknownFormat`)
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    let label = path.to_string_lossy().to_string();
    if !path.exists() {
        return Err(ParseError::file_not_found(label));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(&label, e))?;
    parse_content(&content, FormatHint::from_path(path), &label)
}

/// Parses standard input. `label` in errors is `<stdin>`.
pub fn parse_stdin(hint: FormatHint) -> Result<Node, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| ParseError::read_error("<stdin>", e))?;
    parse_content(&content, hint, "<stdin>")
}

/// Parses a string in the given format. `label` names the input in errors.
///
/// # Examples
///
/// ```
/// use vdiff_rs::parser::{parse_content, FormatHint};
///
/// let node = parse_content("name = 'Alice'", FormatHint::Auto, "inline").unwrap();
/// assert!(node.as_object().is_some());
/// ```
pub fn parse_content(content: &str, hint: FormatHint, label: &str) -> Result<Node, ParseError> {
    match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(label, e)),
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(label, e)),
        FormatHint::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(label, e)),
        FormatHint::Auto => {
            // YAML goes last: nearly any text is a valid YAML scalar.
            if let Ok(node) = parse_json(content) {
                return Ok(node);
            }
            if let Ok(node) = parse_toml(content) {
                debug!(input = label, "detected TOML content");
                return Ok(node);
            }
            parse_yaml(content).map_err(|_| ParseError::unknown_format(label))
        }
    }
}

/// Parses a JSON string into a Node.
///
/// # Examples
///
/// ```
/// use vdiff_rs::parser::parse_json;
///
/// let json = r#"{"name": "Alice", "age": 30}"#;
/// let node = parse_json(json).unwrap();
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(Node::from(value))
}

/// Parses a YAML string into a Node.
///
/// Anchors and aliases are resolved by the YAML parser; tags are dropped and
/// the tagged value kept. Non-string keys become strings.
///
/// # Examples
///
/// ```
/// use vdiff_rs::parser::parse_yaml;
///
/// let yaml = "name: Alice\nage: 30";
/// let node = parse_yaml(yaml).unwrap();
/// ```
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Parses a TOML document into a Node. The root is always an object.
///
/// # Examples
///
/// ```
/// use vdiff_rs::parser::parse_toml;
///
/// let node = parse_toml("[server]\nport = 8080").unwrap();
/// ```
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    let value: toml::Value = toml::from_str(content)?;
    Ok(toml_to_node(value))
}

fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        // Every YAML number has an f64 form, including .nan and .inf
        serde_yaml::Value::Number(n) => Node::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::Array(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(map) => Node::Object(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_node(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_json::to_string(&yaml_to_node(other)).unwrap_or_default(),
    }
}

fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::String(s),
        toml::Value::Integer(i) => Node::Number(i as f64),
        toml::Value::Float(f) => Node::Number(f),
        toml::Value::Boolean(b) => Node::Bool(b),
        toml::Value::Datetime(dt) => Node::String(dt.to_string()),
        toml::Value::Array(arr) => Node::Array(arr.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => Node::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_node(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn keys(node: &Node) -> Vec<&str> {
        node.as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_json_primitives() {
        assert_eq!(parse_json("null").unwrap(), Node::Null);
        assert_eq!(parse_json("true").unwrap(), Node::Bool(true));
        assert_eq!(parse_json("42").unwrap(), Node::Number(42.0));
        assert_eq!(parse_json("3.15").unwrap(), Node::Number(3.15));
        assert_eq!(
            parse_json(r#""hello""#).unwrap(),
            Node::String("hello".to_string())
        );
    }

    #[test]
    fn test_parse_json_keeps_key_order() {
        let node = parse_json(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        assert_eq!(keys(&node), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(parse_json("{invalid json}").is_err());
        assert!(parse_json("[1, 2,]").is_err());
    }

    #[test]
    fn test_parse_yaml_keeps_key_order() {
        let node = parse_yaml("b: 1\na: 2\nc: 3").unwrap();
        assert_eq!(keys(&node), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_yaml_special_floats() {
        match parse_yaml("- .nan\n- .inf").unwrap() {
            Node::Array(items) => {
                assert!(matches!(items[0], Node::Number(n) if n.is_nan()));
                assert_eq!(items[1], Node::Number(f64::INFINITY));
            }
            other => panic!("Expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_yaml_non_string_keys() {
        let node = parse_yaml("1: first\ntrue: yes\n~: nothing").unwrap();
        assert_eq!(keys(&node), vec!["1", "true", "null"]);
    }

    #[test]
    fn test_yaml_tags_are_ignored() {
        let node = parse_yaml("value: !custom {a: 1}").unwrap();
        let value = node.as_object().unwrap().get("value").unwrap();
        assert_eq!(keys(value), vec!["a"]);
    }

    #[test]
    fn test_parse_toml() {
        let node = parse_toml("title = 'x'\n[owner]\nborn = 1979-05-27\nage = 44").unwrap();
        let owner = node.as_object().unwrap().get("owner").unwrap();
        let owner = owner.as_object().unwrap();
        assert_eq!(owner.get("born"), Some(&Node::String("1979-05-27".into())));
        assert_eq!(owner.get("age"), Some(&Node::Number(44.0)));
    }

    #[test]
    fn test_parse_content_auto_detection() {
        assert!(parse_content("[1, 2]", FormatHint::Auto, "t").unwrap().as_array().is_some());
        let toml = parse_content("a = 1", FormatHint::Auto, "t").unwrap();
        assert_eq!(keys(&toml), vec!["a"]);
        let yaml = parse_content("a: 1", FormatHint::Auto, "t").unwrap();
        assert_eq!(keys(&yaml), vec!["a"]);
    }

    #[test]
    fn test_parse_content_explicit_format_errors() {
        let err = parse_content("a: 1", FormatHint::Json, "input").unwrap_err();
        assert!(matches!(err, ParseError::JsonError { ref path, .. } if path == "input"));
        let err = parse_content("a: [", FormatHint::Auto, "input").unwrap_err();
        assert!(matches!(err, ParseError::UnknownFormat { .. }));
    }

    #[test]
    fn test_format_hint_from_path() {
        assert_eq!(FormatHint::from_path(Path::new("a.JSON")), FormatHint::Json);
        assert_eq!(FormatHint::from_path(Path::new("a.yml")), FormatHint::Yaml);
        assert_eq!(FormatHint::from_path(Path::new("Cargo.toml")), FormatHint::Toml);
        assert_eq!(FormatHint::from_path(Path::new("data")), FormatHint::Auto);
    }

    #[test]
    fn test_parse_file_by_extension() {
        let file = temp_file(".yaml", "key: value\n");
        let node = parse_file(file.path()).unwrap();
        assert_eq!(
            node.as_object().unwrap().get("key"),
            Some(&Node::String("value".to_string()))
        );
    }

    #[test]
    fn test_parse_file_unknown_extension() {
        let file = temp_file(".txt", r#"{"key": "value"}"#);
        assert!(parse_file(file.path()).unwrap().as_object().is_some());
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = parse_file(Path::new("/nonexistent/file.json"));
        assert!(matches!(result, Err(ParseError::FileNotFound { .. })));
    }
}
