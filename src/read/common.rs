use crate::common;

use serde::Serialize;
use serde_dynamo::{Error, Result, to_item};
use std::collections;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MultipleReadInput {
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values: Option<common::AttributeMap>,
    pub(crate) filter_expression: Option<String>,
    pub(crate) index_name: Option<String>,
    pub(crate) table_name: String,
}

/// Arguments for multiple-item read operations (Query, Scan).
///
/// Expressions are passed through verbatim: placeholders used in the key
/// condition or filter must be bound in `expression_attribute_names` and
/// `expression_attribute_values`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleReadArgs<T> {
    /// Placeholder to attribute name bindings (`#name` to `name`).
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Placeholder to value bindings, as a map-like value (`:value` to value).
    pub expression_attribute_values: Option<T>,
    /// Filter applied to the matching items before they are returned.
    pub filter_expression: Option<String>,
    /// The name of a global or local secondary index to read instead of the base table.
    pub index_name: Option<String>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<MultipleReadArgs<T>> for MultipleReadInput {
    type Error = Error;

    fn try_from(multiple_read_args: MultipleReadArgs<T>) -> Result<Self> {
        let expression_attribute_values = multiple_read_args
            .expression_attribute_values
            .map(to_item)
            .transpose()?;
        let operation = Self {
            expression_attribute_names: multiple_read_args.expression_attribute_names,
            expression_attribute_values,
            filter_expression: multiple_read_args.filter_expression,
            index_name: multiple_read_args.index_name,
            table_name: multiple_read_args.table_name,
        };
        Ok(operation)
    }
}

/// apply common multiple read operation settings to a builder
#[macro_export]
macro_rules! apply_multiple_read_operation {
    ($builder:expr, $multiple_read_operation:expr) => {
        $builder
            .set_expression_attribute_names($multiple_read_operation.expression_attribute_names)
            .set_expression_attribute_values($multiple_read_operation.expression_attribute_values)
            .set_filter_expression($multiple_read_operation.filter_expression)
            .set_index_name($multiple_read_operation.index_name)
            .table_name($multiple_read_operation.table_name)
    };
}
