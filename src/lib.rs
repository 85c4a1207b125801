#![warn(missing_docs)]

//! # DynamoDB REST
//!
//! A thin REST facade over Amazon DynamoDB table and item operations.
//!
//! ## Overview
//!
//! Every endpoint maps to exactly one DynamoDB call:
//! - table lifecycle: create, describe, delete, add a global secondary index
//! - items: put, get, update, delete, query, scan
//!
//! Results are normalized into a uniform [`envelope::Envelope`]
//! (`{ success, data, error }`) before they leave the [`facade`].
//!
//! ## Partial updates
//!
//! Updates take a flat, ordered mapping of attribute names to values and turn it
//! into a `SET` expression with positional placeholders. List values are appended
//! to whatever list is already stored, every other value overwrites:
//!
//! ```
//! use dynamodb_rest::write::update_item::UpdateAttributes;
//! use indexmap::IndexMap;
//! use serde_json::json;
//!
//! let attributes = UpdateAttributes(IndexMap::from([
//!     ("name".to_string(), json!("Jane")),
//!     ("tags".to_string(), json!(["new"])),
//! ]));
//! let expression = attributes.update_expression().unwrap();
//! assert_eq!(
//!     expression,
//!     "SET #field0 = :value0, #field1 = list_append(if_not_exists(#field1, :empty_list), :value1)",
//! );
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Item marshalling, keys and expression placeholders
//! - [`mod@read`] - Read operations (GetItem, Query, Scan)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)
//! - [`mod@table`] - Table operations (CreateTable, DescribeTable, DeleteTable, UpdateTable)
//! - [`mod@facade`] - One call per operation, normalized into envelopes
//! - [`mod@server`] - HTTP routing on top of the facade

/// Item marshalling, key schemas and expression placeholders.
pub mod common;

/// Runtime configuration read from the environment.
pub mod config;

/// Uniform success/error envelope returned by every operation.
pub mod envelope;

/// Error types.
pub mod error;

/// Store operations normalized into envelopes.
pub mod facade;

/// Read operations for retrieving data from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Querying items with key conditions
/// - Scanning entire tables
pub mod read;

/// HTTP layer: routing, request decoding and response encoding.
pub mod server;

/// Table lifecycle operations.
pub mod table;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Updating items from a flat attribute mapping
/// - Deleting items by key
pub mod write;

pub use error::{Error, Result};
