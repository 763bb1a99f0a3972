//! Paired build-and-compare for two documents.
//!
//! The two builds are independent, so they run concurrently on the rayon
//! pool; comparison starts once both have finished.

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::builder::TreeBuilder;
use crate::compare::{compare, DiffReport};
use crate::error::Error;
use crate::node::TreeNode;
use crate::settings::BuildSettings;
use crate::xml::DomParser;

/// Both trees and the report of one comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Tree built from the left document.
    pub left: TreeNode,
    /// Tree built from the right document.
    pub right: TreeNode,
    /// Classification of every path.
    pub report: DiffReport,
}

/// Build failure on one or both sides. Comparison was skipped.
#[derive(Debug)]
pub struct ComparisonError {
    /// Error building the left document, if it failed.
    pub left: Option<Error>,
    /// Error building the right document, if it failed.
    pub right: Option<Error>,
}

impl fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.left, &self.right) {
            (Some(l), Some(r)) => write!(f, "left document: {}; right document: {}", l, r),
            (Some(l), None) => write!(f, "left document: {}", l),
            (None, Some(r)) => write!(f, "right document: {}", r),
            (None, None) => write!(f, "comparison failed"),
        }
    }
}

impl std::error::Error for ComparisonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.left
            .as_ref()
            .or(self.right.as_ref())
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Pairs two build results; compares only when both succeeded.
pub fn pair_results(
    left: Result<TreeNode, Error>,
    right: Result<TreeNode, Error>,
) -> Result<Comparison, ComparisonError> {
    match (left, right) {
        (Ok(left), Ok(right)) => {
            let report = compare(&left, &right);
            Ok(Comparison {
                left,
                right,
                report,
            })
        }
        (left, right) => Err(ComparisonError {
            left: left.err(),
            right: right.err(),
        }),
    }
}

impl<P: DomParser + Sync> TreeBuilder<P> {
    /// Builds both documents concurrently and compares them.
    ///
    /// Both sides use the same settings.
    #[instrument(level = "debug", skip_all)]
    pub fn compare_documents(
        &self,
        left_xml: &str,
        right_xml: &str,
        settings: &BuildSettings,
    ) -> Result<Comparison, ComparisonError> {
        let (left, right) = rayon::join(
            || self.build(left_xml, settings),
            || self.build(right_xml, settings),
        );
        debug!(
            left_ok = left.is_ok(),
            right_ok = right.is_ok(),
            "built both documents"
        );
        pair_results(left, right)
    }
}

/// Builds and compares two documents with the default parser.
pub fn compare_documents(
    left_xml: &str,
    right_xml: &str,
    settings: &BuildSettings,
) -> Result<Comparison, ComparisonError> {
    TreeBuilder::<crate::xml::QuickXmlParser>::default().compare_documents(
        left_xml, right_xml, settings,
    )
}
