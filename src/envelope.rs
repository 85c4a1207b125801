use crate::error::Error;

use serde::Serialize;

/// The operation an envelope reports on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Create a table.
    CreateTable,
    /// Describe a table.
    DescribeTable,
    /// Delete a table.
    DeleteTable,
    /// Add a global secondary index.
    AddIndex,
    /// Put an item.
    PutItem,
    /// Get an item.
    GetItem,
    /// Update an item.
    UpdateItem,
    /// Delete an item.
    DeleteItem,
    /// Query items.
    Query,
    /// Scan a table.
    Scan,
}

impl Operation {
    /// The label reported as `error.kind` when the operation fails.
    pub fn error_kind(self) -> &'static str {
        match self {
            Self::CreateTable => "CreateTableError",
            Self::DescribeTable => "DescribeTableError",
            Self::DeleteTable => "DeleteTableError",
            Self::AddIndex => "AddIndexError",
            Self::PutItem => "PutItemError",
            Self::GetItem => "GetItemError",
            Self::UpdateItem => "UpdateItemError",
            Self::DeleteItem => "DeleteItemError",
            Self::Query => "QueryError",
            Self::Scan => "ScanError",
        }
    }
}

/// Failure details of an envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnvelopeError {
    /// Human readable message.
    pub message: String,
    /// Operation-specific label, e.g. `CreateTableError`.
    pub kind: &'static str,
}

/// Uniform result of every facade operation.
///
/// `data` is serialized exactly when `success` is true, `error` exactly when
/// it is false.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<EnvelopeError>,
}

impl<T> Envelope<T> {
    /// A successful envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed envelope.
    pub fn failure(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(EnvelopeError {
                message: message.into(),
                kind: operation.error_kind(),
            }),
        }
    }

    /// Normalize an operation result, logging failures.
    pub fn from_result(result: Result<T, Error>, operation: Operation) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => {
                tracing::warn!(kind = operation.error_kind(), %error, "operation failed");
                Self::failure(operation, error.to_string())
            }
        }
    }

    /// The success payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The failure details, if any.
    pub fn error(&self) -> Option<&EnvelopeError> {
        self.error.as_ref()
    }

    /// Consume the envelope, returning the success payload.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
