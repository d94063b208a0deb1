//! Output formatting for diff results.
//!
//! Four views of a [`Comparison`] tree are available:
//!
//! - **annotated**: the source document reprinted with `// +`, `// -` and
//!   `// ~` markers on added, removed and changed positions;
//! - **side-by-side**: each side reconstructed in its own shape, laid out in
//!   two columns;
//! - **changes**: one row per changed leaf, grouped under the container or
//!   identified element it belongs to, followed by a summary;
//! - **json**: the full comparison tree.
//!
//! # Examples
//!
//! ```
//! use vdiff_rs::{compute_diff, format_diff, DiffConfig, Node, OutputFormat, OutputOptions};
//!
//! let old = Node::Number(42.0);
//! let new = Node::Number(43.0);
//! let diff = compute_diff(&old, &new, &DiffConfig::new()).unwrap();
//!
//! let output = format_diff(&diff, &OutputFormat::Changes, &OutputOptions::default()).unwrap();
//! assert!(output.contains("42 -> 43"));
//! ```

use crate::diff::{Children, Comparison, DiffStats};
use crate::error::OutputError;
use crate::tree::{format_number, needs_quotes, Node, ValueType};
use colored::*;
use std::str::FromStr;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The source document with change markers
    Annotated,
    /// Both documents next to each other
    SideBySide,
    /// Aligned `path: before -> after` rows
    #[default]
    Changes,
    /// JSON representation of the comparison tree
    Json,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annotated" => Ok(OutputFormat::Annotated),
            "side-by-side" | "sidebyside" => Ok(OutputFormat::SideBySide),
            "changes" => Ok(OutputFormat::Changes),
            "json" => Ok(OutputFormat::Json),
            _ => Err(OutputError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Options for controlling output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Emit ANSI colors
    pub color: bool,
}

/// Formats a diff according to the specified format and options.
///
/// # Errors
///
/// Only the JSON format can fail, with `OutputError::JsonSerializationError`.
pub fn format_diff(
    diff: &Comparison<'_>,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Annotated => Ok(render_annotated(diff, options.color)),
        OutputFormat::SideBySide => Ok(format_columns(
            &render_side_by_side(diff),
            options.color,
        )),
        OutputFormat::Changes => Ok(render_changes(diff, options.color)),
        OutputFormat::Json => format_json(diff),
    }
}

/// Where a rendered value sits in its parent.
#[derive(Debug, Clone, Copy)]
enum Slot<'k> {
    Root,
    Field(&'k str),
    Element,
}

impl<'k> Slot<'k> {
    fn child(key: Option<&'k str>) -> Self {
        key.map_or(Slot::Element, Slot::Field)
    }

    fn prefix(&self) -> String {
        match self {
            Slot::Field(key) => key_prefix(key),
            Slot::Root | Slot::Element => String::new(),
        }
    }

    fn comma(&self) -> &'static str {
        match self {
            Slot::Root => "",
            Slot::Field(_) | Slot::Element => ",",
        }
    }
}

fn key_prefix(key: &str) -> String {
    if needs_quotes(key) {
        format!("'{}': ", key)
    } else {
        format!("{}: ", key)
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "\\'"))
}

/// A single-line rendering of a value: scalars as literals, containers as
/// compact JSON.
fn literal(value: Option<&Node>) -> String {
    match value {
        None | Some(Node::Undefined) => "undefined".to_string(),
        Some(Node::Null) => "null".to_string(),
        Some(Node::Bool(b)) => b.to_string(),
        Some(Node::Number(n)) => format_number(*n),
        Some(Node::String(s)) => quote(s),
        Some(Node::Opaque(label)) => label.clone(),
        Some(node) => serde_json::to_string(node).unwrap_or_else(|_| node.preview(80)),
    }
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Added,
    Removed,
    Changed,
}

impl Mark {
    fn of(node: &Comparison<'_>) -> Option<Self> {
        if node.added() {
            Some(Mark::Added)
        } else if node.removed() {
            Some(Mark::Removed)
        } else if node.changed() {
            Some(Mark::Changed)
        } else {
            None
        }
    }

    fn paint(self, text: &str, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        match self {
            Mark::Added => text.green().to_string(),
            Mark::Removed => text.red().to_string(),
            Mark::Changed => text.yellow().to_string(),
        }
    }
}

/// Renders the annotated view.
///
/// # Examples
///
/// ```
/// use vdiff_rs::{compute_diff, render_annotated, DiffConfig, Node};
///
/// let old = Node::from(serde_json::json!({"a": 1}));
/// let new = Node::from(serde_json::json!({"a": 2}));
/// let diff = compute_diff(&old, &new, &DiffConfig::new()).unwrap();
/// assert_eq!(render_annotated(&diff, false), "{\n  a: 1, // ~ 2\n} // ~");
/// ```
pub fn render_annotated(diff: &Comparison<'_>, color: bool) -> String {
    let mut lines = Vec::new();
    annotate(diff, Slot::Root, 0, color, &mut lines);
    lines.join("\n")
}

fn annotate(
    node: &Comparison<'_>,
    slot: Slot<'_>,
    level: usize,
    color: bool,
    out: &mut Vec<String>,
) {
    let indent = "  ".repeat(level);
    let prefix = slot.prefix();
    let comma = slot.comma();

    // Children are laid out under the source shape, or the target shape of an
    // added container.
    let shape = if node.added() {
        node.target_type()
    } else {
        node.source_type()
    };
    let brackets = match (shape, node.children()) {
        (ValueType::Object, Some(children @ Children::Fields(_))) => Some(("{", "}", children)),
        (ValueType::Array, Some(children @ Children::Elements(_))) => Some(("[", "]", children)),
        _ => None,
    };

    match brackets {
        Some((open, close, children)) => {
            out.push(format!("{}{}{}", indent, prefix, open));
            for (key, child) in children.iter() {
                annotate(child, Slot::child(key), level + 1, color, out);
            }
            let marker = match Mark::of(node) {
                Some(mark @ Mark::Added) => mark.paint(" // +", color),
                Some(mark @ Mark::Removed) => mark.paint(" // -", color),
                Some(mark @ Mark::Changed) if !node.same_type() => {
                    mark.paint(&format!(" // ~ {}", literal(node.target_value())), color)
                }
                Some(mark @ Mark::Changed) => mark.paint(" // ~", color),
                None => String::new(),
            };
            out.push(format!("{}{}{}{}", indent, close, comma, marker));
        }
        _ => {
            let body = match Mark::of(node) {
                // Added list items sit inside the comment; added fields keep their key.
                Some(mark @ Mark::Added) if matches!(slot, Slot::Element) => format!(
                    "{} {}",
                    mark.paint("// +", color),
                    literal(node.target_value())
                ),
                Some(mark @ Mark::Added) => format!(
                    "{}, {}",
                    literal(node.target_value()),
                    mark.paint("// +", color)
                ),
                Some(mark @ Mark::Removed) => format!(
                    "{}{}{}",
                    literal(node.source_value()),
                    comma,
                    mark.paint(" // -", color)
                ),
                Some(mark @ Mark::Changed) => format!(
                    "{}{}{}",
                    literal(node.source_value()),
                    comma,
                    mark.paint(&format!(" // ~ {}", literal(node.target_value())), color)
                ),
                None => format!("{}{}", literal(node.source_value()), comma),
            };
            out.push(format!("{}{}{}", indent, prefix, body));
        }
    }
}

/// The two sides of a comparison, each rendered in its own shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBySide {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Source,
    Target,
}

/// Renders both sides of a comparison. Positions absent on a side are left
/// out of that side.
pub fn render_side_by_side(diff: &Comparison<'_>) -> SideBySide {
    let mut source = Vec::new();
    let mut target = Vec::new();
    reconstruct(diff, Side::Source, Slot::Root, 0, &mut source);
    reconstruct(diff, Side::Target, Slot::Root, 0, &mut target);
    SideBySide {
        source: source.join("\n"),
        target: target.join("\n"),
    }
}

fn reconstruct(
    node: &Comparison<'_>,
    side: Side,
    slot: Slot<'_>,
    level: usize,
    out: &mut Vec<String>,
) {
    let (present, value) = match side {
        Side::Source => (!node.added(), node.source_value()),
        Side::Target => (!node.removed(), node.target_value()),
    };
    if !present {
        return;
    }

    let indent = "  ".repeat(level);
    let brackets = match (ValueType::of(value), node.children()) {
        (ValueType::Object, Some(children @ Children::Fields(_))) => Some(("{", "}", children)),
        (ValueType::Array, Some(children @ Children::Elements(_))) => Some(("[", "]", children)),
        _ => None,
    };

    match brackets {
        Some((open, close, children)) => {
            out.push(format!("{}{}{}", indent, slot.prefix(), open));
            for (key, child) in children.iter() {
                reconstruct(child, side, Slot::child(key), level + 1, out);
            }
            out.push(format!("{}{}{}", indent, close, slot.comma()));
        }
        None => out.push(format!(
            "{}{}{}{}",
            indent,
            slot.prefix(),
            literal(value),
            slot.comma()
        )),
    }
}

/// Lays the two sides out in columns under `source` / `target` headings.
fn format_columns(view: &SideBySide, color: bool) -> String {
    let left: Vec<&str> = view.source.lines().collect();
    let right: Vec<&str> = view.target.lines().collect();
    let width = left
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max("source".len());

    let heading = format!("{:<width$} | {}", "source", "target", width = width);
    let mut output = vec![if color {
        heading.bold().to_string()
    } else {
        heading
    }];

    for row in 0..left.len().max(right.len()) {
        let l = left.get(row).copied().unwrap_or("");
        let r = right.get(row).copied().unwrap_or("");
        let line = format!("{:<width$} | {}", l, r, width = width);
        output.push(line.trim_end().to_string());
    }
    output.join("\n")
}

/// One row of the changes view.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeRow<'a> {
    /// Opens a group: the retrieved id of an element, or the last step of a
    /// container's path.
    Header { depth: usize, label: String },
    /// A changed position that is not broken down further.
    Entry {
        depth: usize,
        path: String,
        source: Option<&'a Node>,
        target: Option<&'a Node>,
    },
}

impl ChangeRow<'_> {
    /// The row without colors or alignment.
    pub fn raw(&self) -> String {
        match self {
            ChangeRow::Header { label, .. } => label.clone(),
            ChangeRow::Entry {
                path,
                source,
                target,
                ..
            } => format!(
                "{}: {} -> {}",
                path,
                inspect(*source, false).raw,
                inspect(*target, false).raw
            ),
        }
    }
}

/// Collects the rows of the changes view, parents first.
///
/// Containers of the same type on both sides are broken down into their
/// children; every other changed position is one entry.
pub fn change_rows<'a>(diff: &Comparison<'a>) -> Vec<ChangeRow<'a>> {
    let mut rows = Vec::new();
    collect_rows(diff, 0, &mut rows);
    rows
}

fn collect_rows<'a>(node: &Comparison<'a>, depth: usize, rows: &mut Vec<ChangeRow<'a>>) {
    if node.same_value() {
        return;
    }

    if let Some(children) = node.children().filter(|_| node.same_type()) {
        let mut nested = Vec::new();
        for (_, child) in children.iter() {
            collect_rows(child, depth + 1, &mut nested);
        }
        if !nested.is_empty() {
            if depth > 0 {
                rows.push(ChangeRow::Header {
                    depth,
                    label: header_label(node),
                });
            }
            rows.extend(nested);
            return;
        }
    }

    let path = node
        .source_path()
        .or(node.target_path())
        .filter(|path| !path.is_root())
        .map_or_else(|| "(root)".to_string(), ToString::to_string);
    rows.push(ChangeRow::Entry {
        depth,
        path,
        source: node.source_value(),
        target: node.target_value(),
    });
}

fn header_label(node: &Comparison<'_>) -> String {
    if let Some(id) = node.retrieved_id() {
        return id.to_string();
    }
    node.source_path()
        .and_then(|path| path.last())
        .or_else(|| node.target_path().and_then(|path| path.last()))
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// A rendered value, with and without styling. Padding is computed on `raw`.
struct Cell {
    raw: String,
    pretty: String,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            pretty: text.clone(),
            raw: text,
        }
    }

    fn styled(text: String, color: bool, paint: fn(&str) -> ColoredString) -> Self {
        let pretty = if color {
            paint(&text).to_string()
        } else {
            text.clone()
        };
        Self { raw: text, pretty }
    }

    fn keyed(self, key: &str) -> Self {
        let prefix = key_prefix(key);
        Self {
            raw: format!("{}{}", prefix, self.raw),
            pretty: format!("{}{}", prefix, self.pretty),
        }
    }

    fn join(open: &str, cells: impl Iterator<Item = Cell>, close: &str) -> Self {
        let cells: Vec<Cell> = cells.collect();
        let raw: Vec<&str> = cells.iter().map(|cell| cell.raw.as_str()).collect();
        let pretty: Vec<&str> = cells.iter().map(|cell| cell.pretty.as_str()).collect();
        Self {
            raw: format!("{}{}{}", open, raw.join(", "), close),
            pretty: format!("{}{}{}", open, pretty.join(", "), close),
        }
    }

    fn padded(&self, width: usize) -> String {
        let pad = width.saturating_sub(self.raw.chars().count());
        format!("{}{}", self.pretty, " ".repeat(pad))
    }
}

/// Renders a value the way an interactive inspector shows it.
fn inspect(value: Option<&Node>, color: bool) -> Cell {
    match value {
        None | Some(Node::Undefined) => Cell::styled("undefined".into(), color, |s| s.dimmed()),
        Some(Node::Null) => Cell::styled("null".into(), color, |s| s.bold()),
        Some(Node::Bool(b)) => Cell::styled(b.to_string(), color, |s| s.yellow()),
        Some(Node::Number(n)) => Cell::styled(format_number(*n), color, |s| s.yellow()),
        Some(Node::String(s)) => Cell::styled(quote(s), color, |s| s.green()),
        Some(Node::Opaque(label)) => Cell::styled(format!("[{}]", label), color, |s| s.cyan()),
        Some(Node::Array(items)) if items.is_empty() => Cell::plain("[]"),
        Some(Node::Array(items)) => Cell::join(
            "[ ",
            items.iter().map(|item| inspect(Some(item), color)),
            " ]",
        ),
        Some(Node::Object(map)) if map.is_empty() => Cell::plain("{}"),
        Some(Node::Object(map)) => Cell::join(
            "{ ",
            map.iter().map(|(key, item)| inspect(Some(item), color).keyed(key)),
            " }",
        ),
    }
}

/// Renders the changes view followed by a summary line.
pub fn render_changes(diff: &Comparison<'_>, color: bool) -> String {
    let rows = change_rows(diff);
    if rows.is_empty() {
        let message = "No changes detected.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    // Entries line up one level below the deepest header.
    let entry_indent = rows
        .iter()
        .filter_map(|row| match row {
            ChangeRow::Header { depth, .. } => Some(depth * 2),
            ChangeRow::Entry { .. } => None,
        })
        .max()
        .unwrap_or(0);

    let entries: Vec<(Cell, Cell, Cell)> = rows
        .iter()
        .filter_map(|row| match row {
            ChangeRow::Entry {
                path,
                source,
                target,
                ..
            } => {
                let label = format!("{}:", path);
                let label = match (source, target) {
                    (None, _) => Cell::styled(label, color, |s| s.green()),
                    (_, None) => Cell::styled(label, color, |s| s.red()),
                    _ => Cell::styled(label, color, |s| s.yellow()),
                };
                Some((label, inspect(*source, color), inspect(*target, color)))
            }
            ChangeRow::Header { .. } => None,
        })
        .collect();

    let path_width = entries
        .iter()
        .map(|(label, _, _)| label.raw.chars().count())
        .max()
        .unwrap_or(0);
    let source_width = entries
        .iter()
        .map(|(_, source, _)| source.raw.chars().count())
        .max()
        .unwrap_or(0);
    let arrow = if color {
        "->".dimmed().to_string()
    } else {
        "->".to_string()
    };

    let mut entries = entries.into_iter();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    for row in &rows {
        match row {
            ChangeRow::Header { depth, label } => {
                let indent = "  ".repeat(depth.saturating_sub(1));
                let label = if color {
                    label.bold().to_string()
                } else {
                    label.clone()
                };
                lines.push(format!("{}{}", indent, label));
            }
            ChangeRow::Entry { .. } => {
                if let Some((label, source, target)) = entries.next() {
                    lines.push(format!(
                        "{}{} {} {} {}",
                        " ".repeat(entry_indent),
                        label.padded(path_width),
                        source.padded(source_width),
                        arrow,
                        target.pretty
                    ));
                }
            }
        }
    }

    lines.push(String::new());
    lines.push(format_summary(&DiffStats::of(diff)));
    lines.join("\n")
}

/// Formats a diff as JSON.
fn format_json(diff: &Comparison<'_>) -> Result<String, OutputError> {
    serde_json::to_string_pretty(diff)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

/// Formats summary statistics.
fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.modified > 0 {
        parts.push(format!("{} modified", stats.modified));
    }
    if stats.unchanged > 0 {
        parts.push(format!("{} unchanged", stats.unchanged));
    }

    format!("Summary: {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{compute_diff, DiffConfig};
    use serde_json::json;

    fn nodes(source: serde_json::Value, target: serde_json::Value) -> (Node, Node) {
        (Node::from(source), Node::from(target))
    }

    #[test]
    fn test_literal_values() {
        assert_eq!(literal(None), "undefined");
        assert_eq!(literal(Some(&Node::String("it's".into()))), "'it\\'s'");
        assert_eq!(literal(Some(&Node::Number(f64::NAN))), "NaN");
        assert_eq!(literal(Some(&Node::from(json!({"a": [1]})))), r#"{"a":[1]}"#);
    }

    #[test]
    fn test_inspect_values() {
        let value = Node::from(json!({"a": 1, "b-c": "x"}));
        assert_eq!(inspect(Some(&value), false).raw, "{ a: 1, 'b-c': 'x' }");
        assert_eq!(inspect(Some(&Node::from(json!([1, null]))), false).raw, "[ 1, null ]");
        assert_eq!(inspect(Some(&Node::from(json!([]))), false).raw, "[]");
        assert_eq!(inspect(Some(&Node::Undefined), false).raw, "undefined");
    }

    #[test]
    fn test_cell_padding_ignores_styling() {
        let cell = Cell::styled("ab".into(), true, |s| s.red());
        assert!(cell.padded(5).ends_with("   "));
    }

    #[test]
    fn test_annotated_type_change() {
        let (source, target) = nodes(json!({"v": 2}), json!({"v": {"foo": 2}}));
        let diff = compute_diff(&source, &target, &DiffConfig::new()).unwrap();
        let output = render_annotated(&diff, false);
        assert!(output.contains(r#"  v: 2, // ~ {"foo":2}"#));
    }

    #[test]
    fn test_annotated_added_container() {
        let (source, target) = nodes(json!({}), json!({"list": [1]}));
        let diff = compute_diff(&source, &target, &DiffConfig::new()).unwrap();
        assert_eq!(
            render_annotated(&diff, false),
            "{\n  list: [\n    // + 1\n  ], // +\n} // ~"
        );
    }

    #[test]
    fn test_side_by_side_omits_absent_positions() {
        let (source, target) = nodes(json!({"a": 1, "gone": true}), json!({"a": 1, "new": [2]}));
        let diff = compute_diff(&source, &target, &DiffConfig::new()).unwrap();
        let view = render_side_by_side(&diff);
        assert_eq!(view.source, "{\n  a: 1,\n  gone: true,\n}");
        assert_eq!(view.target, "{\n  a: 1,\n  new: [\n    2,\n  ],\n}");
    }

    #[test]
    fn test_format_columns() {
        let view = SideBySide {
            source: "{\n}".to_string(),
            target: "[\n  1,\n]".to_string(),
        };
        assert_eq!(
            format_columns(&view, false),
            "source | target\n{      | [\n       |   1,\n}      | ]"
        );
    }

    #[test]
    fn test_change_rows_group_under_headers() {
        let (source, target) = nodes(
            json!({"a": {"b": 1, "c": 2}}),
            json!({"a": {"b": 1, "c": 3}}),
        );
        let diff = compute_diff(&source, &target, &DiffConfig::new()).unwrap();
        let rows = change_rows(&diff);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ChangeRow::Header {
                depth: 1,
                label: "a".to_string()
            }
        );
        assert_eq!(rows[1].raw(), "a.c: 2 -> 3");
        assert!(render_changes(&diff, false).starts_with("a\n  a.c: 2 -> 3"));
    }

    #[test]
    fn test_render_changes_aligns_columns() {
        let (source, target) = nodes(
            json!({"bar": "test", "foo": "test", "bam": "deleted"}),
            json!({"foo": "test2", "bar": "test", "baz": "added"}),
        );
        let diff = compute_diff(&source, &target, &DiffConfig::new()).unwrap();
        let output = render_changes(&diff, false);
        assert!(output.contains("foo: 'test'    -> 'test2'\n"));
        assert!(output.contains("bam: 'deleted' -> undefined\n"));
        assert!(output.contains("baz: undefined -> 'added'\n"));
        assert!(output.ends_with("Summary: 1 added, 1 removed, 1 modified, 1 unchanged"));
    }

    #[test]
    fn test_render_changes_no_changes() {
        let value = Node::from(json!({"a": [1, 2]}));
        let diff = compute_diff(&value, &value, &DiffConfig::new()).unwrap();
        assert_eq!(render_changes(&diff, false), "No changes detected.");
    }

    #[test]
    fn test_root_scalar_change() {
        let (source, target) = (Node::Bool(true), Node::Null);
        let diff = compute_diff(&source, &target, &DiffConfig::new()).unwrap();
        assert_eq!(change_rows(&diff)[0].raw(), "(root): true -> null");
    }

    #[test]
    fn test_format_json_uses_camel_case() {
        let (source, target) = nodes(json!([1]), json!([2]));
        let diff = compute_diff(&source, &target, &DiffConfig::new()).unwrap();
        let output = format_diff(&diff, &OutputFormat::Json, &OutputOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["sameValue"], json!(false));
        assert_eq!(value["children"][0]["sourcePath"], json!([0]));
        assert_eq!(value["children"][0]["targetValue"], json!(2));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("side-by-side".parse::<OutputFormat>().unwrap(), OutputFormat::SideBySide);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(OutputError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_format_summary_empty() {
        assert_eq!(format_summary(&DiffStats::new()), "Summary: No changes");
    }

    #[test]
    fn test_format_summary_with_changes() {
        let stats = DiffStats {
            added: 2,
            removed: 1,
            modified: 3,
            unchanged: 5,
        };
        assert_eq!(
            format_summary(&stats),
            "Summary: 2 added, 1 removed, 3 modified, 5 unchanged"
        );
    }
}
