use aws_sdk_dynamodb::{Client, error, operation};

/// Describe table operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_rest::table;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let describe_table = table::describe_table::DescribeTable {
///     table_name: "Users".to_string(),
/// };
/// describe_table.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescribeTable {
    /// The name of the table to describe.
    pub table_name: String,
}

impl DescribeTable {
    /// Execute the describe table operation.
    #[tracing::instrument(name = "dynamodb_rest.describe_table", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::describe_table::DescribeTableOutput,
        error::SdkError<operation::describe_table::DescribeTableError>,
    > {
        client
            .describe_table()
            .table_name(self.table_name)
            .send()
            .await
    }
}
