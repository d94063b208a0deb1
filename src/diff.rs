//! Core structural diff algorithm.
//!
//! This module compares two [`Node`] trees and produces a [`Comparison`]
//! tree: one node per compared position (the root, every object field, every
//! list element), recursively. Each node records where the value lives on
//! both sides, how it classifies, whether it was added, removed or changed,
//! and the comparisons of its children.
//!
//! Lists are matched in two passes. Elements for which the configured
//! [`IdentityHook`] returns a key are correlated by that key regardless of
//! position; the remaining elements are paired by position, optionally after
//! a grouped sort (see [`DiffConfig::sort_array_items`]).
//!
//! # Examples
//!
//! ```
//! use vdiff_rs::{compute_diff, DiffConfig, Node};
//!
//! let old = Node::from(serde_json::json!({"age": 30}));
//! let new = Node::from(serde_json::json!({"age": 31}));
//!
//! let diff = compute_diff(&old, &new, &DiffConfig::new()).unwrap();
//! assert!(diff.changed());
//! assert!(diff.field("age").unwrap().changed());
//! ```

use crate::collate::natural_cmp;
use crate::error::DiffError;
use crate::identity::{ElementId, IdentityHook, NoIdentity};
use crate::sort::grouped_sort;
use crate::tree::{Node, Path, ValueType};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

/// Configuration for the diff algorithm.
#[derive(Debug, Clone)]
pub struct DiffConfig<H = NoIdentity> {
    /// Sort list elements without identity before pairing them by position.
    ///
    /// `[1, 2, 3]` against `[3, 1, 2]` is then unchanged. Genuine reorders of
    /// such elements become invisible.
    pub sort_array_items: bool,
    /// Extracts correlation keys from list elements.
    pub identity: H,
}

impl DiffConfig {
    /// Positional list matching, no sorting.
    pub fn new() -> Self {
        Self::with_identity(NoIdentity)
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: IdentityHook> DiffConfig<H> {
    pub fn with_identity(identity: H) -> Self {
        Self {
            sort_array_items: false,
            identity,
        }
    }

    pub fn sort_array_items(mut self, sort: bool) -> Self {
        self.sort_array_items = sort;
        self
    }
}

/// The children of a container comparison.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Children<'a> {
    /// One entry per key of either side, source keys first.
    Fields(IndexMap<String, Comparison<'a>>),
    /// Identity-correlated elements first, then positionally paired ones.
    Elements(Vec<Comparison<'a>>),
}

impl<'a> Children<'a> {
    pub fn len(&self) -> usize {
        match self {
            Children::Fields(fields) => fields.len(),
            Children::Elements(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the children in order, with the field name for object children.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (Option<&str>, &Comparison<'a>)> + '_> {
        match self {
            Children::Fields(fields) => {
                Box::new(fields.iter().map(|(key, child)| (Some(key.as_str()), child)))
            }
            Children::Elements(elements) => Box::new(elements.iter().map(|child| (None, child))),
        }
    }
}

/// The comparison of one position in the source tree with one position in
/// the target tree.
///
/// Values are borrowed from the compared inputs. A comparison never changes
/// after it is built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison<'a> {
    source_path: Option<Path>,
    target_path: Option<Path>,
    source_value: Option<&'a Node>,
    target_value: Option<&'a Node>,
    same_value: bool,
    same_value_zero: bool,
    retrieved_id: Option<ElementId>,
    source_order: Option<usize>,
    target_order: Option<usize>,
    same_order: Option<bool>,
    source_type: ValueType,
    target_type: ValueType,
    same_type: bool,
    added: bool,
    removed: bool,
    changed: bool,
    children: Option<Children<'a>>,
}

impl<'a> Comparison<'a> {
    /// Location on the source side, `None` when the value is not in the source.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_ref()
    }

    /// Location on the target side, `None` when the value is not in the target.
    pub fn target_path(&self) -> Option<&Path> {
        self.target_path.as_ref()
    }

    pub fn source_value(&self) -> Option<&'a Node> {
        self.source_value
    }

    pub fn target_value(&self) -> Option<&'a Node> {
        self.target_value
    }

    /// Deep structural equality.
    pub fn same_value(&self) -> bool {
        self.same_value
    }

    /// Equality at this level only, with `NaN` equal to itself. Containers
    /// are only equal this way when both sides are the same borrowed value.
    pub fn same_value_zero(&self) -> bool {
        self.same_value_zero
    }

    pub fn retrieved_id(&self) -> Option<&ElementId> {
        self.retrieved_id.as_ref()
    }

    /// Field index or array index on the source side.
    pub fn source_order(&self) -> Option<usize> {
        self.source_order
    }

    pub fn target_order(&self) -> Option<usize> {
        self.target_order
    }

    /// `None` unless both sides have an order.
    pub fn same_order(&self) -> Option<bool> {
        self.same_order
    }

    pub fn source_type(&self) -> ValueType {
        self.source_type
    }

    pub fn target_type(&self) -> ValueType {
        self.target_type
    }

    pub fn same_type(&self) -> bool {
        self.same_type
    }

    pub fn added(&self) -> bool {
        self.added
    }

    pub fn removed(&self) -> bool {
        self.removed
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn children(&self) -> Option<&Children<'a>> {
        self.children.as_ref()
    }

    /// Child comparison for an object field.
    pub fn field(&self, key: &str) -> Option<&Comparison<'a>> {
        match &self.children {
            Some(Children::Fields(fields)) => fields.get(key),
            _ => None,
        }
    }

    /// Child comparison at a position of the element list.
    pub fn element(&self, position: usize) -> Option<&Comparison<'a>> {
        match &self.children {
            Some(Children::Elements(elements)) => elements.get(position),
            _ => None,
        }
    }

    /// Visits this node and all descendants, depth first, parents first.
    pub fn walk(&self) -> Vec<&Comparison<'a>> {
        let mut out = vec![self];
        if let Some(children) = &self.children {
            for (_, child) in children.iter() {
                out.extend(child.walk());
            }
        }
        out
    }
}

/// Counts of changed positions in a comparison tree.
///
/// Added and removed subtrees count once; containers of the same type on both
/// sides are counted through their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of added values
    pub added: usize,
    /// Number of removed values
    pub removed: usize,
    /// Number of modified values
    pub modified: usize,
    /// Number of unchanged values
    pub unchanged: usize,
}

impl DiffStats {
    /// Creates a new DiffStats with all counts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies the positions of a comparison tree.
    pub fn of(diff: &Comparison<'_>) -> Self {
        let mut stats = Self::new();
        stats.tally(diff);
        stats
    }

    fn tally(&mut self, node: &Comparison<'_>) {
        if node.added {
            self.added += 1;
        } else if node.removed {
            self.removed += 1;
        } else if let Some(children) = node.children.as_ref().filter(|_| node.same_type) {
            for (_, child) in children.iter() {
                self.tally(child);
            }
        } else if node.changed {
            self.modified += 1;
        } else {
            self.unchanged += 1;
        }
    }

    /// Returns the total number of changes (excluding unchanged).
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }

    /// Returns true if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// One side of a compared position.
#[derive(Debug, Clone, Default)]
struct Side<'a> {
    path: Option<Path>,
    order: Option<usize>,
    value: Option<&'a Node>,
}

impl<'a> Side<'a> {
    fn root(value: &'a Node) -> Self {
        Self {
            path: Some(Path::root()),
            order: None,
            value: Some(value),
        }
    }

    fn missing() -> Self {
        Self::default()
    }

    fn field(parent: &Side<'a>, key: &str) -> Self {
        let map = parent.value.and_then(Node::as_object);
        match map.and_then(|map| map.get_full(key)) {
            Some((index, _, value)) => Self {
                path: parent.path.as_ref().map(|path| path.child(key)),
                order: Some(index),
                value: Some(value),
            },
            None => Self::missing(),
        }
    }

    fn element(parent_path: Option<&Path>, index: usize, value: &'a Node) -> Self {
        Self {
            path: parent_path.map(|path| path.child(index)),
            order: Some(index),
            value: Some(value),
        }
    }

    fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// How a child relates to its parent. Known before the child is built.
#[derive(Debug, Clone, Default)]
struct Link {
    retrieved_id: Option<ElementId>,
    added: bool,
    removed: bool,
}

impl Link {
    fn between(source: &Side<'_>, target: &Side<'_>, retrieved_id: Option<ElementId>) -> Self {
        Self {
            retrieved_id,
            added: !source.is_present() && target.is_present(),
            removed: source.is_present() && !target.is_present(),
        }
    }
}

/// The identified and non-identified elements of one side of a list.
struct Partition<'a> {
    identified: IndexMap<String, (ElementId, usize, &'a Node)>,
    rest: Vec<(usize, &'a Node)>,
}

/// Computes the structural diff between two nodes.
///
/// This is the main entry point for the diff algorithm. The returned tree
/// mirrors the shape of both inputs; its root has empty paths and no order.
///
/// # Errors
///
/// Returns [`DiffError::Identity`] when the identity hook fails. No partial
/// tree is returned in that case.
///
/// # Examples
///
/// ```
/// use vdiff_rs::{compute_diff, DiffConfig, Node};
///
/// let (old, new) = (Node::Number(42.0), Node::Number(43.0));
/// let diff = compute_diff(&old, &new, &DiffConfig::new()).unwrap();
/// assert!(diff.changed());
/// assert!(diff.children().is_none());
/// ```
pub fn compute_diff<'a, H: IdentityHook>(
    source: &'a Node,
    target: &'a Node,
    config: &DiffConfig<H>,
) -> Result<Comparison<'a>, DiffError> {
    let engine = Engine { config };
    engine.compare(Side::root(source), Side::root(target), Link::default())
}

struct Engine<'c, H> {
    config: &'c DiffConfig<H>,
}

impl<H: IdentityHook> Engine<'_, H> {
    /// Builds the comparison of one position. Children are built first, so
    /// every field is final when the node is constructed.
    fn compare<'a>(
        &self,
        source: Side<'a>,
        target: Side<'a>,
        link: Link,
    ) -> Result<Comparison<'a>, DiffError> {
        let source_type = ValueType::of(source.value);
        let target_type = ValueType::of(target.value);
        let same_type = source_type == target_type;

        let location = source.path.as_ref().or(target.path.as_ref());
        trace!(
            path = %location.map(Path::to_string).unwrap_or_default(),
            %source_type,
            %target_type,
            "comparing"
        );

        let (children, same_value) =
            if source_type == ValueType::Object || target_type == ValueType::Object {
                let (fields, all_same) = self.compare_fields(&source, &target)?;
                (Some(Children::Fields(fields)), same_type && all_same)
            } else if source_type == ValueType::Array || target_type == ValueType::Array {
                let (elements, all_same) = self.compare_elements(&source, &target)?;
                (Some(Children::Elements(elements)), same_type && all_same)
            } else {
                (None, strict_equals(source.value, target.value))
            };

        let same_order = match (source.order, target.order) {
            (Some(a), Some(b)) => Some(a == b),
            _ => None,
        };

        Ok(Comparison {
            same_value_zero: same_value_zero(source.value, target.value),
            source_path: source.path,
            target_path: target.path,
            source_value: source.value,
            target_value: target.value,
            same_value,
            retrieved_id: link.retrieved_id,
            source_order: source.order,
            target_order: target.order,
            same_order,
            source_type,
            target_type,
            same_type,
            added: link.added,
            removed: link.removed,
            changed: !same_value,
            children,
        })
    }

    fn compare_fields<'a>(
        &self,
        source: &Side<'a>,
        target: &Side<'a>,
    ) -> Result<(IndexMap<String, Comparison<'a>>, bool), DiffError> {
        let source_map = source.value.and_then(Node::as_object);
        let target_map = target.value.and_then(Node::as_object);

        let mut keys: Vec<&str> = source_map
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        if let Some(target_map) = target_map {
            keys.extend(
                target_map
                    .keys()
                    .map(String::as_str)
                    .filter(|key| !source_map.is_some_and(|map| map.contains_key(*key))),
            );
        }

        let mut fields = IndexMap::with_capacity(keys.len());
        let mut all_same = true;
        for key in keys {
            let child_source = Side::field(source, key);
            let child_target = Side::field(target, key);
            let link = Link::between(&child_source, &child_target, None);
            let child = self.compare(child_source, child_target, link)?;
            all_same &= child.same_value;
            fields.insert(key.to_string(), child);
        }
        Ok((fields, all_same))
    }

    fn compare_elements<'a>(
        &self,
        source: &Side<'a>,
        target: &Side<'a>,
    ) -> Result<(Vec<Comparison<'a>>, bool), DiffError> {
        let source_items = source.value.and_then(Node::as_array).unwrap_or_default();
        let target_items = target.value.and_then(Node::as_array).unwrap_or_default();

        let source_part = self.partition(source_items, source.path.as_ref())?;
        let target_part = self.partition(target_items, target.path.as_ref())?;

        let mut ids: Vec<&String> = source_part.identified.keys().collect();
        ids.extend(
            target_part
                .identified
                .keys()
                .filter(|key| !source_part.identified.contains_key(*key)),
        );
        ids.sort_by(|a, b| natural_cmp(a, b));

        debug!(
            identified = ids.len(),
            source_rest = source_part.rest.len(),
            target_rest = target_part.rest.len(),
            sorted = self.config.sort_array_items,
            "partitioned list elements"
        );

        let mut elements = Vec::with_capacity(ids.len());
        let mut all_same = true;

        for key in ids {
            let source_hit = source_part.identified.get(key);
            let target_hit = target_part.identified.get(key);
            let retrieved_id = source_hit.or(target_hit).map(|(id, _, _)| id.clone());

            let child_source = source_hit.map_or_else(Side::missing, |&(_, index, value)| {
                Side::element(source.path.as_ref(), index, value)
            });
            let child_target = target_hit.map_or_else(Side::missing, |&(_, index, value)| {
                Side::element(target.path.as_ref(), index, value)
            });
            let link = Link::between(&child_source, &child_target, retrieved_id);
            let child = self.compare(child_source, child_target, link)?;
            all_same &= child.same_value;
            elements.push(child);
        }

        let mut source_rest = source_part.rest;
        let mut target_rest = target_part.rest;
        if self.config.sort_array_items {
            grouped_sort(&mut source_rest);
            grouped_sort(&mut target_rest);
        }

        for position in 0..source_rest.len().max(target_rest.len()) {
            let child_source = source_rest
                .get(position)
                .map_or_else(Side::missing, |&(index, value)| {
                    Side::element(source.path.as_ref(), index, value)
                });
            let child_target = target_rest
                .get(position)
                .map_or_else(Side::missing, |&(index, value)| {
                    Side::element(target.path.as_ref(), index, value)
                });
            let link = Link::between(&child_source, &child_target, None);
            let child = self.compare(child_source, child_target, link)?;
            all_same &= child.same_value;
            elements.push(child);
        }

        Ok((elements, all_same))
    }

    /// Splits one side of a list into identified and non-identified elements.
    /// Only objects and arrays are offered to the identity hook.
    fn partition<'a>(
        &self,
        items: &'a [Node],
        parent_path: Option<&Path>,
    ) -> Result<Partition<'a>, DiffError> {
        let mut partition = Partition {
            identified: IndexMap::new(),
            rest: Vec::new(),
        };

        for (index, value) in items.iter().enumerate() {
            if !value.is_container() {
                partition.rest.push((index, value));
                continue;
            }

            let path = parent_path.map(|path| path.child(index));
            let id = self
                .config
                .identity
                .identify(value, path.as_ref(), items)
                .map_err(|source| {
                    let location = path
                        .as_ref()
                        .map_or_else(|| format!("[{}]", index), Path::to_string);
                    DiffError::identity(location, source)
                })?
                .filter(ElementId::is_usable);

            match id {
                // The last occurrence of a key wins; earlier ones pair by position.
                Some(id) => {
                    let key = id.key();
                    if let Some((_, earlier, displaced)) =
                        partition.identified.insert(key, (id, index, value))
                    {
                        debug!(index = earlier, "duplicate identity key, pairing by position");
                        partition.rest.push((earlier, displaced));
                    }
                }
                None => partition.rest.push((index, value)),
            }
        }

        partition.rest.sort_by_key(|&(index, _)| index);
        Ok(partition)
    }
}

/// Strict equality of two scalars. Missing and `Undefined` are the same
/// thing; opaque values are only equal to themselves.
fn strict_equals(source: Option<&Node>, target: Option<&Node>) -> bool {
    match (source, target) {
        (None | Some(Node::Undefined), None | Some(Node::Undefined)) => true,
        (Some(Node::Null), Some(Node::Null)) => true,
        (Some(Node::Bool(a)), Some(Node::Bool(b))) => a == b,
        (Some(Node::Number(a)), Some(Node::Number(b))) => a == b,
        (Some(Node::String(a)), Some(Node::String(b))) => a == b,
        (Some(a @ Node::Opaque(_)), Some(b @ Node::Opaque(_))) => std::ptr::eq(a, b),
        _ => false,
    }
}

/// Like [`strict_equals`], but `NaN` equals `NaN` and containers compare by
/// reference.
fn same_value_zero(source: Option<&Node>, target: Option<&Node>) -> bool {
    match (source, target) {
        (Some(Node::Number(a)), Some(Node::Number(b))) => a == b || (a.is_nan() && b.is_nan()),
        (Some(a), Some(b)) if a.is_container() && b.is_container() => std::ptr::eq(a, b),
        _ => strict_equals(source, target),
    }
}
