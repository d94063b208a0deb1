//! Grouped sort for list elements that are paired without identity.
//!
//! Elements are ordered by bucket: numbers, strings, `true`, `false`, `null`,
//! `undefined`, objects, arrays. Numbers are sorted ascending and strings by
//! [`natural_cmp`]; every other bucket keeps its original order. Opaque values
//! trail after arrays, also in original order.

use crate::collate::natural_cmp;
use crate::tree::Node;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Number,
    String,
    True,
    False,
    Null,
    Undefined,
    Object,
    Array,
    Opaque,
}

impl Bucket {
    fn of(node: &Node) -> Self {
        match node {
            Node::Number(_) => Bucket::Number,
            Node::String(_) => Bucket::String,
            Node::Bool(true) => Bucket::True,
            Node::Bool(false) => Bucket::False,
            Node::Null => Bucket::Null,
            Node::Undefined => Bucket::Undefined,
            Node::Object(_) => Bucket::Object,
            Node::Array(_) => Bucket::Array,
            Node::Opaque(_) => Bucket::Opaque,
        }
    }
}

fn within_bucket(a: &Node, b: &Node) -> Ordering {
    match (a, b) {
        (Node::Number(x), Node::Number(y)) => x.total_cmp(y),
        (Node::String(x), Node::String(y)) => natural_cmp(x, y),
        _ => Ordering::Equal,
    }
}

/// Stable sort of `(original index, element)` pairs into bucket order.
pub(crate) fn grouped_sort(items: &mut [(usize, &Node)]) {
    items.sort_by(|(_, a), (_, b)| {
        Bucket::of(a)
            .cmp(&Bucket::of(b))
            .then_with(|| within_bucket(a, b))
    });
}
