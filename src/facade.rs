//! One store call per operation, normalized into envelopes.
//!
//! The [`Facade`] trait is the boundary between the HTTP layer and the store.
//! [`DynamoFacade`] implements it on top of the typed operations in
//! [`crate::read`], [`crate::write`] and [`crate::table`].

use crate::common::{self, Item};
use crate::envelope::{Envelope, Operation};
use crate::error::Result;
use crate::read::{get_item::GetItem, query::Query, scan::Scan};
use crate::table::{
    add_index::AddIndex, create_table::CreateTable, delete_table::DeleteTable,
    describe_table::DescribeTable, descriptor::TableDescriptor,
};
use crate::write::{delete_item::DeleteItem, put_item::PutItem, update_item::UpdateItem};

use aws_sdk_dynamodb::{Client, types};
use serde_json::Value;

/// Store operations exposed over HTTP.
///
/// Every method issues at most one store call and never fails: errors are
/// reported inside the returned [`Envelope`].
#[async_trait::async_trait]
pub trait Facade: Send + Sync + 'static {
    /// Create a table and echo its description.
    async fn create_table(&self, create_table: CreateTable) -> Envelope<TableDescriptor>;

    /// Describe an existing table.
    async fn describe_table(&self, describe_table: DescribeTable) -> Envelope<TableDescriptor>;

    /// Delete a table, returning its last description.
    async fn delete_table(&self, delete_table: DeleteTable) -> Envelope<TableDescriptor>;

    /// Add a global secondary index, returning the updated description.
    async fn add_index(&self, add_index: AddIndex) -> Envelope<TableDescriptor>;

    /// Put an item. The success payload is an empty acknowledgment.
    async fn put_item(&self, put_item: PutItem<Value>) -> Envelope<Item>;

    /// Get an item by key; `None` when it does not exist.
    async fn get_item(&self, get_item: GetItem<Value>) -> Envelope<Option<Item>>;

    /// Update an item, returning it as stored after the update.
    async fn update_item(&self, update_item: UpdateItem<Value>) -> Envelope<Item>;

    /// Delete an item, returning it as stored before deletion.
    async fn delete_item(&self, delete_item: DeleteItem<Value>) -> Envelope<Option<Item>>;

    /// Query a table or index; a single page of results.
    async fn query(&self, query: Query<Value>) -> Envelope<Vec<Item>>;

    /// Scan a table or index; a single page of results.
    async fn scan(&self, scan: Scan<Value>) -> Envelope<Vec<Item>>;
}

/// [`Facade`] backed by a DynamoDB client.
#[derive(Clone, Debug)]
pub struct DynamoFacade {
    client: Client,
}

impl DynamoFacade {
    /// Wrap a configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn try_create_table(&self, create_table: CreateTable) -> Result<TableDescriptor> {
        let output = create_table.send(&self.client).await?;
        Ok(describe(output.table_description()))
    }

    async fn try_describe_table(&self, describe_table: DescribeTable) -> Result<TableDescriptor> {
        let output = describe_table.send(&self.client).await?;
        Ok(describe(output.table()))
    }

    async fn try_delete_table(&self, delete_table: DeleteTable) -> Result<TableDescriptor> {
        let output = delete_table.send(&self.client).await?;
        Ok(describe(output.table_description()))
    }

    async fn try_add_index(&self, add_index: AddIndex) -> Result<TableDescriptor> {
        let output = add_index.send(&self.client).await?;
        Ok(describe(output.table_description()))
    }

    async fn try_put_item(&self, put_item: PutItem<Value>) -> Result<Item> {
        put_item.send(&self.client).await?;
        Ok(Item::new())
    }

    async fn try_get_item(&self, get_item: GetItem<Value>) -> Result<Option<Item>> {
        let output = get_item.send(&self.client).await?;
        Ok(common::unmarshall_optional(output.item)?)
    }

    async fn try_update_item(&self, mut update_item: UpdateItem<Value>) -> Result<Item> {
        update_item.write_args.return_values = Some(types::ReturnValue::AllNew);
        let output = update_item.send(&self.client).await?;
        Ok(common::unmarshall_optional(output.attributes)?.unwrap_or_default())
    }

    async fn try_delete_item(&self, mut delete_item: DeleteItem<Value>) -> Result<Option<Item>> {
        delete_item.write_args.return_values = Some(types::ReturnValue::AllOld);
        let output = delete_item.send(&self.client).await?;
        Ok(common::unmarshall_optional(output.attributes)?)
    }

    async fn try_query(&self, query: Query<Value>) -> Result<Vec<Item>> {
        let output = query.send(&self.client).await?;
        Ok(common::unmarshall_all(output.items)?)
    }

    async fn try_scan(&self, scan: Scan<Value>) -> Result<Vec<Item>> {
        let output = scan.send(&self.client).await?;
        Ok(common::unmarshall_all(output.items)?)
    }
}

fn describe(table: Option<&types::TableDescription>) -> TableDescriptor {
    table.map(TableDescriptor::from).unwrap_or_default()
}

#[async_trait::async_trait]
impl Facade for DynamoFacade {
    async fn create_table(&self, create_table: CreateTable) -> Envelope<TableDescriptor> {
        Envelope::from_result(
            self.try_create_table(create_table).await,
            Operation::CreateTable,
        )
    }

    async fn describe_table(&self, describe_table: DescribeTable) -> Envelope<TableDescriptor> {
        Envelope::from_result(
            self.try_describe_table(describe_table).await,
            Operation::DescribeTable,
        )
    }

    async fn delete_table(&self, delete_table: DeleteTable) -> Envelope<TableDescriptor> {
        Envelope::from_result(
            self.try_delete_table(delete_table).await,
            Operation::DeleteTable,
        )
    }

    async fn add_index(&self, add_index: AddIndex) -> Envelope<TableDescriptor> {
        Envelope::from_result(self.try_add_index(add_index).await, Operation::AddIndex)
    }

    async fn put_item(&self, put_item: PutItem<Value>) -> Envelope<Item> {
        Envelope::from_result(self.try_put_item(put_item).await, Operation::PutItem)
    }

    async fn get_item(&self, get_item: GetItem<Value>) -> Envelope<Option<Item>> {
        Envelope::from_result(self.try_get_item(get_item).await, Operation::GetItem)
    }

    async fn update_item(&self, update_item: UpdateItem<Value>) -> Envelope<Item> {
        Envelope::from_result(self.try_update_item(update_item).await, Operation::UpdateItem)
    }

    async fn delete_item(&self, delete_item: DeleteItem<Value>) -> Envelope<Option<Item>> {
        Envelope::from_result(self.try_delete_item(delete_item).await, Operation::DeleteItem)
    }

    async fn query(&self, query: Query<Value>) -> Envelope<Vec<Item>> {
        Envelope::from_result(self.try_query(query).await, Operation::Query)
    }

    async fn scan(&self, scan: Scan<Value>) -> Envelope<Vec<Item>> {
        Envelope::from_result(self.try_scan(scan).await, Operation::Scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::write::{common::WriteArgs, update_item::UpdateAttributes};
    use aws_sdk_dynamodb::{
        error::ErrorMetadata,
        operation::{
            delete_item::DeleteItemOutput,
            describe_table::{DescribeTableError, DescribeTableOutput},
            get_item::GetItemOutput,
            update_item::UpdateItemOutput,
        },
    };
    use aws_smithy_mocks::{mock, mock_client};
    use indexmap::IndexMap;
    use serde_json::json;

    fn users_key() -> Value {
        json!({"userId": "missing"})
    }

    fn users_args() -> WriteArgs {
        WriteArgs {
            table_name: "Users".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_should_describe_missing_table_as_default() {
        assert_eq!(describe(None), TableDescriptor::default());
    }

    #[test]
    fn test_should_describe_table_name() {
        let table = types::TableDescription::builder()
            .table_name("Users")
            .build();
        assert_eq!(describe(Some(&table)).table_name.as_deref(), Some("Users"));
    }

    #[tokio::test]
    async fn test_should_return_null_for_missing_item() {
        let rule = mock!(Client::get_item).then_output(|| GetItemOutput::builder().build());
        let facade = DynamoFacade::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let envelope = facade
            .get_item(GetItem {
                key: users_key(),
                table_name: "Users".to_string(),
            })
            .await;

        assert!(envelope.success);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "data": null})
        );
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_should_return_null_when_deleting_missing_key() {
        let rule = mock!(Client::delete_item)
            .match_requests(|input| input.return_values() == Some(&types::ReturnValue::AllOld))
            .then_output(|| DeleteItemOutput::builder().build());
        let facade = DynamoFacade::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let envelope = facade
            .delete_item(DeleteItem {
                key: users_key(),
                write_args: users_args(),
            })
            .await;

        assert!(envelope.success);
        assert_eq!(envelope.data(), Some(&None));
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_should_return_item_after_update() {
        let rule = mock!(Client::update_item)
            .match_requests(|input| input.return_values() == Some(&types::ReturnValue::AllNew))
            .then_output(|| {
                UpdateItemOutput::builder()
                    .attributes("userId", types::AttributeValue::S("u1".to_string()))
                    .attributes("name", types::AttributeValue::S("Jane".to_string()))
                    .build()
            });
        let facade = DynamoFacade::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let envelope = facade
            .update_item(UpdateItem {
                key: json!({"userId": "u1"}),
                attributes: UpdateAttributes(IndexMap::from([(
                    "name".to_string(),
                    json!("Jane"),
                )])),
                write_args: users_args(),
            })
            .await;

        assert!(envelope.success);
        assert_eq!(
            envelope.into_data().map(Value::Object),
            Some(json!({"userId": "u1", "name": "Jane"}))
        );
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_should_report_store_error_in_envelope() {
        let rule = mock!(Client::describe_table).then_error(|| {
            DescribeTableError::ResourceNotFoundException(
                types::error::ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .meta(
                        ErrorMetadata::builder()
                            .code("ResourceNotFoundException")
                            .message("Requested resource not found")
                            .build(),
                    )
                    .build(),
            )
        });
        let facade = DynamoFacade::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let envelope = facade
            .describe_table(DescribeTable {
                table_name: "Missing".to_string(),
            })
            .await;

        assert!(!envelope.success);
        assert!(envelope.data().is_none());
        let failure = envelope.error().unwrap();
        assert_eq!(failure.kind, "DescribeTableError");
        assert_eq!(failure.message, "Requested resource not found");
    }

    #[tokio::test]
    async fn test_should_describe_table_from_store() {
        let rule = mock!(Client::describe_table).then_output(|| {
            DescribeTableOutput::builder()
                .table(
                    types::TableDescription::builder()
                        .table_name("Users")
                        .build(),
                )
                .build()
        });
        let facade = DynamoFacade::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let envelope = facade
            .describe_table(DescribeTable {
                table_name: "Users".to_string(),
            })
            .await;

        assert!(envelope.success);
        assert_eq!(
            envelope.data().and_then(|table| table.table_name.as_deref()),
            Some("Users")
        );
    }
}
