use crate::{common, table};

use aws_sdk_dynamodb::{Client, error, operation, types};

/// create table operation
#[derive(Clone, Debug, PartialEq)]
struct CreateTableInput {
    key_definitions: common::key::KeyDefinitions,
    provisioned_throughput: types::ProvisionedThroughput,
    table_name: String,
}

/// Create table operation.
///
/// Tables are created with provisioned throughput of 10 read and 10 write
/// capacity units.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::ScalarAttributeType};
/// use dynamodb_rest::{common::key, table};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let create_table = table::create_table::CreateTable {
///     key_schema: key::KeySchema {
///         partition_key: key::KeyAttribute {
///             name: "userId".to_string(),
///             attribute_type: ScalarAttributeType::S,
///         },
///         sort_key: None,
///     },
///     table_name: "Users".to_string(),
/// };
/// create_table.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CreateTable {
    /// The primary key of the new table.
    pub key_schema: common::key::KeySchema,
    /// The name of the table to create.
    pub table_name: String,
}

impl TryFrom<CreateTable> for CreateTableInput {
    type Error = error::BuildError;

    fn try_from(create_table: CreateTable) -> Result<Self, Self::Error> {
        let operation = Self {
            key_definitions: create_table.key_schema.try_into()?,
            provisioned_throughput: table::provisioned_throughput(table::TABLE_CAPACITY_UNITS)?,
            table_name: create_table.table_name,
        };
        Ok(operation)
    }
}

impl CreateTable {
    /// Execute the create table operation.
    #[tracing::instrument(name = "dynamodb_rest.create_table", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::create_table::CreateTableOutput,
        error::SdkError<operation::create_table::CreateTableError>,
    > {
        let create_table: CreateTableInput = self.try_into()?;
        client
            .create_table()
            .set_key_schema(Some(create_table.key_definitions.key_schema))
            .set_attribute_definitions(Some(create_table.key_definitions.attribute_definitions))
            .provisioned_throughput(create_table.provisioned_throughput)
            .table_name(create_table.table_name)
            .send()
            .await
    }
}
