//! Table lifecycle operations.
//!
//! This module provides operations for managing DynamoDB tables:
//! - Creating a table with a partition key and optional sort key
//! - Describing and deleting a table
//! - Adding a global secondary index to an existing table

/// Add a global secondary index to an existing table.
pub mod add_index;

/// Create table operation.
pub mod create_table;

/// Delete table operation.
pub mod delete_table;

/// Describe table operation.
pub mod describe_table;

/// Serializable view of a table description.
pub mod descriptor;

use aws_sdk_dynamodb::{error::BuildError, types};

/// Capacity units provisioned for new tables.
pub(crate) const TABLE_CAPACITY_UNITS: i64 = 10;

/// Capacity units provisioned for new global secondary indexes.
pub(crate) const INDEX_CAPACITY_UNITS: i64 = 5;

pub(crate) fn provisioned_throughput(
    capacity_units: i64,
) -> Result<types::ProvisionedThroughput, BuildError> {
    types::ProvisionedThroughput::builder()
        .read_capacity_units(capacity_units)
        .write_capacity_units(capacity_units)
        .build()
}
