//! Error mapping helpers for the SDK gateway implementations.

use std::error::Error;

use aws_sdk_codecommit::error::DisplayErrorContext;

use crate::codecommit::error::AdapterError;

/// Wraps an SDK failure with the attempted operation and its target.
pub(super) fn map_sdk_error<E>(operation: &str, target: &str, error: &E) -> AdapterError
where
    E: Error,
{
    AdapterError::UpstreamApi {
        operation: operation.to_owned(),
        target: target.to_owned(),
        message: DisplayErrorContext(error).to_string(),
    }
}

pub(super) fn missing_field(operation: &str, target: &str, field: &str) -> AdapterError {
    AdapterError::IncompleteResponse {
        operation: operation.to_owned(),
        target: target.to_owned(),
        field: field.to_owned(),
    }
}
