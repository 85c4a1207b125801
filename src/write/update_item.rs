use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value, to_item};
use std::collections;

/// Value placeholder shared by every list-valued attribute.
const EMPTY_LIST_PLACEHOLDER: &str = ":empty_list";

fn name_placeholder(index: usize) -> String {
    format!("#field{index}")
}

fn value_placeholder(index: usize) -> String {
    format!(":value{index}")
}

/// Flat, ordered mapping of attribute names to their new values.
///
/// Entry `i` is addressed through `#field{i}` and `:value{i}`. List values are
/// appended to the stored list (initialized from an empty list when the
/// attribute is missing); every other value, nested maps included, replaces
/// the stored one.
///
/// ```rust
/// use dynamodb_rest::write::update_item::UpdateAttributes;
/// use indexmap::IndexMap;
///
/// let attributes = UpdateAttributes(IndexMap::from([
///     ("name".to_string(), "Jane".to_string()),
/// ]));
/// assert_eq!(attributes.update_expression().unwrap(), "SET #field0 = :value0");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateAttributes<T>(pub IndexMap<String, T>);

impl<T> UpdateAttributes<T> {
    /// Whether there is nothing to update.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of attributes to update.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T: Serialize> UpdateAttributes<T> {
    fn get_set_expression(&self) -> Result<common::ExpressionInput> {
        let mut operations = Vec::with_capacity(self.0.len());
        for (index, (key, value)) in self.0.iter().enumerate() {
            let placeholder = name_placeholder(index);
            let value_placeholder = value_placeholder(index);
            let value: types::AttributeValue = to_attribute_value(value)?;
            let mut expression_attribute_values = common::AttributeMap::with_capacity(2);
            let expression = if matches!(value, types::AttributeValue::L(_)) {
                expression_attribute_values.insert(
                    EMPTY_LIST_PLACEHOLDER.to_string(),
                    types::AttributeValue::L(Vec::new()),
                );
                format!(
                    "{placeholder} = list_append(if_not_exists({placeholder}, {EMPTY_LIST_PLACEHOLDER}), {value_placeholder})"
                )
            } else {
                format!("{placeholder} = {value_placeholder}")
            };
            expression_attribute_values.insert(value_placeholder, value);
            let expression_attribute_names =
                collections::HashMap::from([(placeholder, key.clone())]);
            let operation = common::ExpressionInput {
                expression,
                expression_attribute_names,
                expression_attribute_values,
            };
            operations.push(operation);
        }
        let mut operation = common::ExpressionInput::merge(", ", operations);
        operation.expression = format!("SET {}", operation.expression);
        Ok(operation)
    }

    /// Render the `SET` update expression for these attributes.
    pub fn update_expression(&self) -> Result<String> {
        let operation = self.get_set_expression()?;
        Ok(operation.expression)
    }
}

impl<T: Serialize> TryFrom<UpdateAttributes<T>> for common::ExpressionInput {
    type Error = Error;

    fn try_from(update_attributes: UpdateAttributes<T>) -> Result<Self> {
        update_attributes.get_set_expression()
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: common::AttributeMap,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::ReturnValue};
/// use dynamodb_rest::write;
/// use indexmap::IndexMap;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: json!({"userId": "u1"}),
///     attributes: write::update_item::UpdateAttributes(IndexMap::from([
///         ("tags".to_string(), json!(["b"])),
///     ])),
///     write_args: write::common::WriteArgs {
///         return_values: Some(ReturnValue::AllNew),
///         table_name: "Users".to_string(),
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub key: T,
    /// The attributes to assign, in order.
    pub attributes: UpdateAttributes<T>,
    /// Additional write operation arguments (table name, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let key = to_item(update_item.key)?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let operation: common::ExpressionInput = update_item.attributes.try_into()?;
        let update_expression = write_operation.merge_expression(operation);
        let operation = Self {
            key,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize + std::fmt::Debug> UpdateItem<T> {
    /// Execute the update item operation.
    #[tracing::instrument(name = "dynamodb_rest.update_item", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::scalar(
        UpdateAttributes(
            IndexMap::from(
                [
                    (
                        "name".to_string(),
                        json!("Jane")
                    ),
                ]
            )
        ),
        common::ExpressionInput {
            expression: "SET #field0 = :value0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#field0".to_string(), "name".to_string()),
                ]
            ),
            expression_attribute_values: common::AttributeMap::from(
                [
                    (
                        ":value0".to_string(),
                        types::AttributeValue::S(
                            "Jane".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::list(
        UpdateAttributes(
            IndexMap::from(
                [
                    (
                        "tags".to_string(),
                        json!(["b"])
                    ),
                ]
            )
        ),
        common::ExpressionInput {
            expression: "SET #field0 = list_append(if_not_exists(#field0, :empty_list), :value0)".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#field0".to_string(), "tags".to_string()),
                ]
            ),
            expression_attribute_values: common::AttributeMap::from(
                [
                    (
                        ":empty_list".to_string(),
                        types::AttributeValue::L(
                            vec![]
                        )
                    ),
                    (
                        ":value0".to_string(),
                        types::AttributeValue::L(
                            vec![
                                types::AttributeValue::S(
                                    "b".to_string()
                                ),
                            ]
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::nested_map_overwrites(
        UpdateAttributes(
            IndexMap::from(
                [
                    (
                        "profile".to_string(),
                        json!({"tags": ["a"]})
                    ),
                ]
            )
        ),
        common::ExpressionInput {
            expression: "SET #field0 = :value0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#field0".to_string(), "profile".to_string()),
                ]
            ),
            expression_attribute_values: common::AttributeMap::from(
                [
                    (
                        ":value0".to_string(),
                        types::AttributeValue::M(
                            collections::HashMap::from(
                                [
                                    (
                                        "tags".to_string(),
                                        types::AttributeValue::L(
                                            vec![
                                                types::AttributeValue::S(
                                                    "a".to_string()
                                                ),
                                            ]
                                        )
                                    ),
                                ]
                            )
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::mixed(
        UpdateAttributes(
            IndexMap::from(
                [
                    (
                        "count".to_string(),
                        json!(3)
                    ),
                    (
                        "tags".to_string(),
                        json!(["x"])
                    ),
                    (
                        "active".to_string(),
                        json!(false)
                    ),
                ]
            )
        ),
        common::ExpressionInput {
            expression: "SET #field0 = :value0, #field1 = list_append(if_not_exists(#field1, :empty_list), :value1), #field2 = :value2".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#field0".to_string(), "count".to_string()),
                    ("#field1".to_string(), "tags".to_string()),
                    ("#field2".to_string(), "active".to_string()),
                ]
            ),
            expression_attribute_values: common::AttributeMap::from(
                [
                    (
                        ":value0".to_string(),
                        types::AttributeValue::N(
                            "3".to_string()
                        )
                    ),
                    (
                        ":empty_list".to_string(),
                        types::AttributeValue::L(
                            vec![]
                        )
                    ),
                    (
                        ":value1".to_string(),
                        types::AttributeValue::L(
                            vec![
                                types::AttributeValue::S(
                                    "x".to_string()
                                ),
                            ]
                        )
                    ),
                    (
                        ":value2".to_string(),
                        types::AttributeValue::Bool(
                            false
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::empty(
        UpdateAttributes(
            IndexMap::new()
        ),
        common::ExpressionInput {
            expression: "SET ".to_string(),
            ..Default::default()
        }
    )]
    fn test_update_attributes_to_expression_input(
        #[case] update_attributes: UpdateAttributes<Value>,
        #[case] expected: common::ExpressionInput,
    ) {
        let actual: common::ExpressionInput = update_attributes.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::no_lists(vec![json!("a"), json!(1), json!({"k": "v"})], false)]
    #[case::one_list(vec![json!("a"), json!([1, 2]), json!(null)], true)]
    #[case::only_lists(vec![json!([]), json!(["a"])], true)]
    fn test_placeholders_match_entries(#[case] values: Vec<Value>, #[case] has_list: bool) {
        let entries = values.len();
        let update_attributes = UpdateAttributes(
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (format!("attr{index}"), value))
                .collect(),
        );
        let actual: common::ExpressionInput = update_attributes.try_into().unwrap();
        let clauses = (0..entries + 1)
            .filter(|index| actual.expression.contains(&format!("#field{index} = ")))
            .count();
        let value_placeholders = actual
            .expression_attribute_values
            .keys()
            .filter(|placeholder| placeholder.starts_with(":value"))
            .count();
        assert_eq!(clauses, entries);
        assert_eq!(actual.expression_attribute_names.len(), entries);
        assert_eq!(value_placeholders, entries);
        assert_eq!(
            actual
                .expression_attribute_values
                .contains_key(EMPTY_LIST_PLACEHOLDER),
            has_list
        );
    }

    #[test]
    fn test_placeholder_index_ignores_neighbor_types() {
        let update_attributes = UpdateAttributes(IndexMap::from([
            ("first".to_string(), json!(["a"])),
            ("second".to_string(), json!("b")),
        ]));
        let actual: common::ExpressionInput = update_attributes.try_into().unwrap();
        assert_eq!(
            actual.expression_attribute_names.get("#field1"),
            Some(&"second".to_string())
        );
        assert_eq!(
            actual.expression_attribute_values.get(":value1"),
            Some(&types::AttributeValue::S("b".to_string()))
        );
    }

    #[rstest]
    #[case::all_new(
        UpdateItem {
            key: json!(
                {
                    "userId": "u1"
                }
            ),
            attributes: UpdateAttributes(
                IndexMap::from(
                    [
                        (
                            "tags".to_string(),
                            json!(["b"])
                        ),
                    ]
                )
            ),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::AllNew),
                table_name: "Users".to_string(),
            },
        },
        UpdateItemInput {
            key: common::AttributeMap::from(
                [
                    (
                        "userId".to_string(),
                        types::AttributeValue::S(
                            "u1".to_string()
                        )
                    ),
                ]
            ),
            update_expression: "SET #field0 = list_append(if_not_exists(#field0, :empty_list), :value0)".to_string(),
            write_operation: write::common::WriteInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#field0".to_string(), "tags".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    common::AttributeMap::from(
                        [
                            (
                                ":empty_list".to_string(),
                                types::AttributeValue::L(
                                    vec![]
                                )
                            ),
                            (
                                ":value0".to_string(),
                                types::AttributeValue::L(
                                    vec![
                                        types::AttributeValue::S(
                                            "b".to_string()
                                        ),
                                    ]
                                )
                            ),
                        ]
                    )
                ),
                return_values: Some(types::ReturnValue::AllNew),
                table_name: "Users".to_string(),
            },
        }
    )]
    fn test_update_item_to_input(
        #[case] update_item: UpdateItem<Value>,
        #[case] expected: UpdateItemInput,
    ) {
        let actual: UpdateItemInput = update_item.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_update_item_rejects_non_object_key() {
        let update_item = UpdateItem {
            key: json!("u1"),
            attributes: UpdateAttributes(IndexMap::from([("a".to_string(), json!(1))])),
            write_args: write::common::WriteArgs::default(),
        };
        let actual: Result<UpdateItemInput> = update_item.try_into();
        assert!(actual.is_err());
    }
}
