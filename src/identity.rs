//! Identity extraction for list elements.
//!
//! When two versions of a list are compared, elements that carry a stable
//! identity (an `id` field, a primary key, ...) are matched by that identity
//! instead of by position. An [`IdentityHook`] decides what the identity of an
//! element is.
//!
//! # Examples
//!
//! ```
//! use vdiff_rs::{compute_diff, DiffConfig, KeyField, Node};
//!
//! let old = Node::from(serde_json::json!([{"id": 1, "v": "a"}, {"id": 2, "v": "b"}]));
//! let new = Node::from(serde_json::json!([{"id": 2, "v": "b"}, {"id": 1, "v": "a"}]));
//!
//! let config = DiffConfig::with_identity(KeyField::new("id"));
//! let diff = compute_diff(&old, &new, &config).unwrap();
//! assert!(diff.same_value());
//! ```

use crate::error::{IdentityError, VdiffError};
use crate::tree::{format_number, Node, Path};
use std::fmt;

/// A correlation key extracted from a list element.
///
/// Strings (including the empty string) and numbers (including zero) are
/// usable keys. `NaN` is never usable.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ElementId {
    Number(f64),
    String(String),
}

impl ElementId {
    pub fn is_usable(&self) -> bool {
        !matches!(self, ElementId::Number(n) if n.is_nan())
    }

    /// The form keys are correlated by. `1` and `"1"` share a key.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Reads a key out of a node: strings and numbers qualify, nothing else does.
    pub fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::String(s) => Some(ElementId::String(s.clone())),
            Node::Number(n) => Some(ElementId::Number(*n)),
            _ => None,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Number(n) => f.write_str(&format_number(*n)),
            ElementId::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        ElementId::String(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        ElementId::String(value)
    }
}

impl From<f64> for ElementId {
    fn from(value: f64) -> Self {
        ElementId::Number(value)
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        ElementId::Number(value as f64)
    }
}

/// Extracts the identity of a list element.
///
/// The engine only asks about elements that are themselves objects or arrays.
/// `path` is the element's location on the side being scanned (`None` when
/// that side has no location), `parent` is the list the element belongs to.
///
/// Returning `Ok(None)` means "no identity": the element is then paired by
/// position. Returning an error aborts the whole comparison.
pub trait IdentityHook {
    fn identify(
        &self,
        element: &Node,
        path: Option<&Path>,
        parent: &[Node],
    ) -> Result<Option<ElementId>, IdentityError>;
}

impl<F> IdentityHook for F
where
    F: Fn(&Node, Option<&Path>, &[Node]) -> Option<ElementId>,
{
    fn identify(
        &self,
        element: &Node,
        path: Option<&Path>,
        parent: &[Node],
    ) -> Result<Option<ElementId>, IdentityError> {
        Ok(self(element, path, parent))
    }
}

/// Never assigns an identity; every list is compared positionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIdentity;

impl IdentityHook for NoIdentity {
    fn identify(
        &self,
        _element: &Node,
        _path: Option<&Path>,
        _parent: &[Node],
    ) -> Result<Option<ElementId>, IdentityError> {
        Ok(None)
    }
}

/// Uses a field of object elements as identity.
///
/// With several candidate fields the first one holding a string or a number
/// wins. Array elements and objects without any candidate field get no
/// identity.
#[derive(Debug, Clone)]
pub struct KeyField {
    fields: Vec<String>,
}

impl KeyField {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            fields: vec![field.into()],
        }
    }

    /// Builds a hook from several candidate fields, tried in order.
    pub fn from_fields<I, S>(fields: I) -> Result<Self, VdiffError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(VdiffError::ConfigError {
                message: "identity requires at least one key field".to_string(),
            });
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl IdentityHook for KeyField {
    fn identify(
        &self,
        element: &Node,
        _path: Option<&Path>,
        _parent: &[Node],
    ) -> Result<Option<ElementId>, IdentityError> {
        let Some(map) = element.as_object() else {
            return Ok(None);
        };
        Ok(self
            .fields
            .iter()
            .filter_map(|field| map.get(field))
            .find_map(ElementId::from_node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usable_ids() {
        assert!(ElementId::from(0i64).is_usable());
        assert!(ElementId::from("").is_usable());
        assert!(!ElementId::Number(f64::NAN).is_usable());
    }

    #[test]
    fn test_key_unifies_numbers_and_strings() {
        assert_eq!(ElementId::from(1i64).key(), ElementId::from("1").key());
        assert_eq!(ElementId::from(2.5).key(), "2.5");
    }

    #[test]
    fn test_key_field_reads_first_candidate() {
        let hook = KeyField::from_fields(["uuid", "id"]).unwrap();
        let element = Node::from(json!({"id": 7, "name": "x"}));
        let id = hook.identify(&element, None, &[]).unwrap();
        assert_eq!(id, Some(ElementId::Number(7.0)));
    }

    #[test]
    fn test_key_field_ignores_non_key_values() {
        let hook = KeyField::new("id");
        let element = Node::from(json!({"id": true}));
        assert_eq!(hook.identify(&element, None, &[]).unwrap(), None);
        let element = Node::from(json!([1, 2]));
        assert_eq!(hook.identify(&element, None, &[]).unwrap(), None);
    }

    #[test]
    fn test_key_field_requires_fields() {
        let result = KeyField::from_fields(Vec::<String>::new());
        assert!(matches!(result, Err(VdiffError::ConfigError { .. })));
    }

    #[test]
    fn test_closure_hook() {
        let hook = |node: &Node, _: Option<&Path>, _: &[Node]| {
            node.as_array().map(|items| ElementId::from(items.len() as i64))
        };
        let element = Node::from(json!([1, 2, 3]));
        assert_eq!(
            hook.identify(&element, None, &[]).unwrap(),
            Some(ElementId::Number(3.0))
        );
    }
}
