//! HTTP request handlers, one module per resource.

pub mod chat;
pub mod draft;
pub mod feedback;
pub mod session;

use serde::Serialize;
use uuid::Uuid;

use copilot_types::validation::ValidationWarning;

use crate::http::error::AppError;

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// A validation warning as shown to API clients.
#[derive(Debug, Serialize)]
pub struct WarningView {
    pub code: &'static str,
    pub message: String,
}

pub(crate) fn warning_views(warnings: &[ValidationWarning]) -> Vec<WarningView> {
    warnings
        .iter()
        .map(|w| WarningView {
            code: w.code(),
            message: w.to_string(),
        })
        .collect()
}
