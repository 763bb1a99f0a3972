//! xmlpath-diff - Path-addressed XML tree comparison
//!
//! This library turns XML documents into normalized trees in which every
//! element carries a deterministic, root-anchored path, and compares two such
//! trees by aligning nodes on those paths.
//!
//! # Overview
//!
//! - [`TreeBuilder`] parses one document (through an injected [`DomParser`])
//!   and assigns paths such as `/root/item[2]`.
//! - [`compare`] classifies every path as matched, different, left-only or
//!   right-only, and [`resolve_status`] turns that into a per-side display
//!   status.
//!
//! Comparison is by path identity only. A moved element shows up as one
//! path removed and another added; there is no reorder detection.
//!
//! # Example
//!
//! ```
//! use xmlpath_diff::{compare_documents, BuildSettings};
//!
//! let comparison = compare_documents(
//!     "<root><a>1</a><b/></root>",
//!     "<root><a>2</a><c/></root>",
//!     &BuildSettings::default(),
//! )
//! .unwrap();
//!
//! assert!(comparison.report.different().contains("/root/a"));
//! assert!(comparison.report.left_only().contains("/root/b"));
//! assert!(comparison.report.right_only().contains("/root/c"));
//! ```

pub mod builder;
pub mod compare;
pub mod constants;
pub mod error;
pub mod node;
pub mod protocol;
pub mod session;
pub mod settings;
pub mod xml;

// Re-export commonly used types
pub use builder::{build_tree, TreeBuilder};
pub use compare::{compare, resolve_status, DiffReport, DiffStats, DiffStatus, Side};
pub use error::{Error, Result, ValidationError};
pub use node::{all_paths, count_nodes, find_node, DfsTreeIterator, TreeNode};
pub use protocol::{handle_request, CompareRequest, CompareResponse, Outcome};
pub use session::{compare_documents, Comparison, ComparisonError};
pub use settings::BuildSettings;
pub use xml::{DomElement, DomNode, DomParser, QuickXmlParser};
