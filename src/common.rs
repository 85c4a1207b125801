//! Common utilities for DynamoDB operations.
//!
//! This module provides shared types and utilities used across read, write and
//! table operations, including key schemas, item marshalling and expression
//! placeholders.

/// Key schema types for tables and indexes.
pub mod key;

use aws_sdk_dynamodb::types;
use serde_dynamo::{Result, from_item, from_items};
use serde_json::{Map, Value};
use std::collections;

/// An item as exchanged over HTTP: attribute name to plain JSON value.
pub type Item = Map<String, Value>;

/// An item as exchanged with DynamoDB.
pub type AttributeMap = collections::HashMap<String, types::AttributeValue>;

/// Convert a DynamoDB item into plain JSON.
pub fn unmarshall(attributes: AttributeMap) -> Result<Item> {
    from_item(attributes)
}

/// Convert an optional DynamoDB item into plain JSON, keeping absence as `None`.
pub fn unmarshall_optional(attributes: Option<AttributeMap>) -> Result<Option<Item>> {
    attributes.map(unmarshall).transpose()
}

/// Convert a page of DynamoDB items into plain JSON.
pub fn unmarshall_all(items: Option<Vec<AttributeMap>>) -> Result<Vec<Item>> {
    from_items(items.unwrap_or_default())
}

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// expression operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: AttributeMap,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<AttributeMap>,
    ) -> String {
        match names {
            Some(existing) => existing.extend(self.expression_attribute_names),
            None => *names = Some(self.expression_attribute_names),
        }
        match values {
            Some(existing) => existing.extend(self.expression_attribute_values),
            None => *values = Some(self.expression_attribute_values),
        }
        self.expression
    }
}
