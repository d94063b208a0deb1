//! VDIFF - Structural diff for nested data.
//!
//! This library compares two value trees (parsed from JSON, YAML or TOML, or
//! built directly) and produces a [`Comparison`] tree with one node per
//! compared position. Every node tells where the value sits on each side, how
//! it classifies, and whether it was added, removed or changed. List elements
//! can be correlated by an identity key instead of by position.
//!
//! # Example
//!
//! ```no_run
//! use vdiff_rs::{
//!     compute_diff, format_diff, parse_file, DiffConfig, KeyField, OutputFormat, OutputOptions,
//! };
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse two files
//! let old = parse_file(Path::new("old.json"))?;
//! let new = parse_file(Path::new("new.json"))?;
//!
//! // Match list elements by their "id" field
//! let config = DiffConfig::with_identity(KeyField::new("id"));
//! let diff = compute_diff(&old, &new, &config)?;
//!
//! // Format the output
//! let output = format_diff(&diff, &OutputFormat::Changes, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod collate;
pub mod diff;
pub mod error;
pub mod identity;
pub mod output;
pub mod parser;
mod sort;
pub mod tree;

// Re-export commonly used types for convenience
pub use diff::{compute_diff, Children, Comparison, DiffConfig, DiffStats};
pub use error::{DiffError, IdentityError, OutputError, ParseError, VdiffError};
pub use identity::{ElementId, IdentityHook, KeyField, NoIdentity};
pub use output::{
    change_rows, format_diff, render_annotated, render_changes, render_side_by_side, ChangeRow,
    OutputFormat, OutputOptions, SideBySide,
};
pub use parser::{
    parse_content, parse_file, parse_json, parse_stdin, parse_toml, parse_yaml, FormatHint,
};
pub use tree::{Node, Path, PathSegment, ValueType};
