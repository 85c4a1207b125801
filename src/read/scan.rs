use crate::read;

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    multiple_read_operation: read::common::MultipleReadInput,
}

/// Scan operation.
///
/// A single `Scan` call: the result holds at most one page of items.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_rest::read;
/// use serde_json::Value;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan: read::scan::Scan<Value> = read::scan::Scan {
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "Users".to_string(),
///         ..Default::default()
///     },
/// };
/// scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan<T> {
    /// Read operation arguments (table, index, filter, bindings).
    pub multiple_read_args: read::common::MultipleReadArgs<T>,
}

impl<T: Serialize> TryFrom<Scan<T>> for ScanInput {
    type Error = Error;

    fn try_from(scan: Scan<T>) -> Result<Self> {
        let multiple_read_operation: read::common::MultipleReadInput =
            scan.multiple_read_args.try_into()?;
        Ok(Self {
            multiple_read_operation,
        })
    }
}

impl<T: Serialize + std::fmt::Debug> Scan<T> {
    /// Execute the scan operation.
    #[tracing::instrument(name = "dynamodb_rest.scan", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.scan();
        crate::apply_multiple_read_operation!(builder, scan.multiple_read_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case::table_only(
        Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "Users".to_string(),
                ..Default::default()
            },
        },
        ScanInput {
            multiple_read_operation: read::common::MultipleReadInput {
                table_name: "Users".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_scan_to_input(#[case] scan: Scan<Value>, #[case] expected: ScanInput) {
        let actual: ScanInput = scan.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
