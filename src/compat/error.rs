use crate::catalog::{BuildId, RuleId};
use thiserror::Error;

/// Failures the compatibility engine and its request facade can report.
///
/// Missing components are *not* errors: they produce the fixed
/// `component_not_found` verdict. Unknown rule names are not errors either.
#[derive(Debug, Error)]
pub enum CompatError {
    #[error("both component1_id and component2_id are required (missing {missing})")]
    MissingComponentId { missing: &'static str },

    #[error("no components found in build")]
    EmptyBuild,

    #[error("build {0} not found")]
    BuildNotFound(BuildId),

    #[error("compatibility rule {rule_id} has a malformed condition payload: {source}")]
    MalformedRule {
        rule_id: RuleId,
        #[source]
        source: serde_json::Error,
    },
}

/// How a caller-facing layer should surface a [`CompatError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request itself was incomplete.
    ClientError,
    NotFound,
    /// Administrator-authored data is broken; not the caller's fault.
    Configuration,
}

impl CompatError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CompatError::MissingComponentId { .. } => ErrorClass::ClientError,
            CompatError::EmptyBuild | CompatError::BuildNotFound(_) => ErrorClass::NotFound,
            CompatError::MalformedRule { .. } => ErrorClass::Configuration,
        }
    }
}

impl ErrorClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::ClientError => "client_error",
            ErrorClass::NotFound => "not_found",
            ErrorClass::Configuration => "configuration",
        }
    }
}
