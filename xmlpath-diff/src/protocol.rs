//! Request/response messages for running comparisons off the caller's thread.
//!
//! A request carries the two documents as raw JSON values, since senders are
//! not guaranteed to pass strings. Each request gets exactly one response
//! with the same `id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::builder::TreeBuilder;
use crate::compare::DiffReport;
use crate::node::TreeNode;
use crate::session::pair_results;
use crate::settings::BuildSettings;
use crate::xml::{DomParser, QuickXmlParser};

/// A request to build and compare two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    /// Correlates the response with this request.
    pub id: u64,
    /// Left document; must be a JSON string.
    #[serde(default)]
    pub xml_left: Value,
    /// Right document; must be a JSON string.
    #[serde(default)]
    pub xml_right: Value,
    /// Settings applied to both sides. Defaults when absent.
    #[serde(default)]
    pub settings: Option<BuildSettings>,
}

/// Outcome of one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    /// Id of the request this answers.
    pub id: u64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Either both trees plus the report, or the errors of the failed sides.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Ok {
        left: TreeNode,
        right: TreeNode,
        report: DiffReport,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        left_error: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        right_error: Option<String>,
    },
    /// The request itself could not be decoded.
    Invalid { message: String },
}

impl CompareResponse {
    /// Builds the response for a request that could not be decoded.
    pub fn invalid(id: u64, message: impl Into<String>) -> Self {
        CompareResponse {
            id,
            outcome: Outcome::Invalid {
                message: message.into(),
            },
        }
    }
}

impl<P: DomParser + Sync> TreeBuilder<P> {
    /// Answers one request.
    pub fn handle_request(&self, request: &CompareRequest) -> CompareResponse {
        let settings = request.settings.clone().unwrap_or_default();
        let (left, right) = rayon::join(
            || self.build_value(&request.xml_left, &settings),
            || self.build_value(&request.xml_right, &settings),
        );

        let outcome = match pair_results(left, right) {
            Ok(comparison) => Outcome::Ok {
                left: comparison.left,
                right: comparison.right,
                report: comparison.report,
            },
            Err(err) => Outcome::Error {
                left_error: err.left.map(|e| e.to_string()),
                right_error: err.right.map(|e| e.to_string()),
            },
        };
        debug!(id = request.id, "handled request");
        CompareResponse {
            id: request.id,
            outcome,
        }
    }
}

/// Answers one request with the default parser.
pub fn handle_request(request: &CompareRequest) -> CompareResponse {
    TreeBuilder::new(QuickXmlParser).handle_request(request)
}
