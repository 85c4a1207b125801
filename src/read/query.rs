use crate::read;

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// query operation
#[derive(Clone, Debug, Default, PartialEq)]
struct QueryInput {
    key_condition_expression: String,
    multiple_read_operation: read::common::MultipleReadInput,
}

/// Query operation.
///
/// A single `Query` call: the result holds at most one page of items.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_rest::read;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let query = read::query::Query {
///     key_condition_expression: "userId = :id".to_string(),
///     multiple_read_args: read::common::MultipleReadArgs {
///         expression_attribute_values: Some(json!({":id": "u1"})),
///         table_name: "Users".to_string(),
///         ..Default::default()
///     },
/// };
/// query.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query<T> {
    /// The key condition, passed through verbatim.
    pub key_condition_expression: String,
    /// Additional read operation arguments (table, index, filter, bindings).
    pub multiple_read_args: read::common::MultipleReadArgs<T>,
}

impl<T: Serialize> TryFrom<Query<T>> for QueryInput {
    type Error = Error;

    fn try_from(query: Query<T>) -> Result<Self> {
        let multiple_read_operation: read::common::MultipleReadInput =
            query.multiple_read_args.try_into()?;
        let operation = Self {
            key_condition_expression: query.key_condition_expression,
            multiple_read_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize + std::fmt::Debug> Query<T> {
    /// Execute the query operation.
    #[tracing::instrument(name = "dynamodb_rest.query", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::query::QueryOutput, error::SdkError<operation::query::QueryError>> {
        let query: QueryInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .query()
            .key_condition_expression(query.key_condition_expression);
        crate::apply_multiple_read_operation!(builder, query.multiple_read_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::collections;

    #[rstest]
    #[case::base_table(
        Query {
            key_condition_expression: "userId = :id".to_string(),
            multiple_read_args: read::common::MultipleReadArgs {
                expression_attribute_values: Some(
                    json!(
                        {
                            ":id": "u1"
                        }
                    )
                ),
                table_name: "Users".to_string(),
                ..Default::default()
            },
        },
        QueryInput {
            key_condition_expression: "userId = :id".to_string(),
            multiple_read_operation: read::common::MultipleReadInput {
                expression_attribute_values: Some(
                    common::AttributeMap::from(
                        [
                            (
                                ":id".to_string(),
                                types::AttributeValue::S(
                                    "u1".to_string()
                                )
                            ),
                        ]
                    )
                ),
                table_name: "Users".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::index_with_filter(
        Query {
            key_condition_expression: "#e = :email".to_string(),
            multiple_read_args: read::common::MultipleReadArgs {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#e".to_string(), "email".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    json!(
                        {
                            ":email": "a@b.c",
                            ":min": 18
                        }
                    )
                ),
                filter_expression: Some("age >= :min".to_string()),
                index_name: Some("byEmail".to_string()),
                table_name: "Users".to_string(),
            },
        },
        QueryInput {
            key_condition_expression: "#e = :email".to_string(),
            multiple_read_operation: read::common::MultipleReadInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#e".to_string(), "email".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    common::AttributeMap::from(
                        [
                            (
                                ":email".to_string(),
                                types::AttributeValue::S(
                                    "a@b.c".to_string()
                                )
                            ),
                            (
                                ":min".to_string(),
                                types::AttributeValue::N(
                                    "18".to_string()
                                )
                            ),
                        ]
                    )
                ),
                filter_expression: Some("age >= :min".to_string()),
                index_name: Some("byEmail".to_string()),
                table_name: "Users".to_string(),
            },
        }
    )]
    fn test_query_to_input(#[case] query: Query<Value>, #[case] expected: QueryInput) {
        let actual: QueryInput = query.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
