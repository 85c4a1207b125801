use aws_sdk_dynamodb::{Client, error, operation};

/// Delete table operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteTable {
    /// The name of the table to delete.
    pub table_name: String,
}

impl DeleteTable {
    /// Execute the delete table operation.
    #[tracing::instrument(name = "dynamodb_rest.delete_table", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_table::DeleteTableOutput,
        error::SdkError<operation::delete_table::DeleteTableError>,
    > {
        client
            .delete_table()
            .table_name(self.table_name)
            .send()
            .await
    }
}
