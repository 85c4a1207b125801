use crate::{common, table};

use aws_sdk_dynamodb::{Client, error, operation, types};

/// Projection of a secondary index.
///
/// `non_key_attributes` is only sent when the projection type is `INCLUDE`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexProjection {
    /// Which attributes the index copies from the base table.
    pub projection_type: types::ProjectionType,
    /// Non-key attributes copied under an `INCLUDE` projection.
    pub non_key_attributes: Option<Vec<String>>,
}

impl Default for IndexProjection {
    fn default() -> Self {
        Self {
            projection_type: types::ProjectionType::All,
            non_key_attributes: None,
        }
    }
}

impl From<IndexProjection> for types::Projection {
    fn from(index_projection: IndexProjection) -> Self {
        let non_key_attributes = match index_projection.projection_type {
            types::ProjectionType::Include => index_projection.non_key_attributes,
            _ => None,
        };
        types::Projection::builder()
            .projection_type(index_projection.projection_type)
            .set_non_key_attributes(non_key_attributes)
            .build()
    }
}

/// add index operation
#[derive(Clone, Debug, PartialEq)]
struct AddIndexInput {
    attribute_definitions: Vec<types::AttributeDefinition>,
    global_secondary_index_update: types::GlobalSecondaryIndexUpdate,
    table_name: String,
}

/// Add a global secondary index to an existing table.
///
/// Issues a single `UpdateTable` call with one index creation. The index is
/// provisioned with 5 read and 5 write capacity units.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::ScalarAttributeType};
/// use dynamodb_rest::{common::key, table};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let add_index = table::add_index::AddIndex {
///     index_name: "byEmail".to_string(),
///     key_schema: key::KeySchema {
///         partition_key: key::KeyAttribute {
///             name: "email".to_string(),
///             attribute_type: ScalarAttributeType::S,
///         },
///         sort_key: None,
///     },
///     projection: Default::default(),
///     table_name: "Users".to_string(),
/// };
/// add_index.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AddIndex {
    /// The name of the new index.
    pub index_name: String,
    /// The key of the new index.
    pub key_schema: common::key::KeySchema,
    /// Which attributes the index copies.
    pub projection: IndexProjection,
    /// The table to add the index to.
    pub table_name: String,
}

impl TryFrom<AddIndex> for AddIndexInput {
    type Error = error::BuildError;

    fn try_from(add_index: AddIndex) -> Result<Self, Self::Error> {
        let key_definitions: common::key::KeyDefinitions = add_index.key_schema.try_into()?;
        let create = types::CreateGlobalSecondaryIndexAction::builder()
            .index_name(add_index.index_name)
            .set_key_schema(Some(key_definitions.key_schema))
            .projection(add_index.projection.into())
            .provisioned_throughput(table::provisioned_throughput(table::INDEX_CAPACITY_UNITS)?)
            .build()?;
        let global_secondary_index_update = types::GlobalSecondaryIndexUpdate::builder()
            .create(create)
            .build();
        let operation = Self {
            attribute_definitions: key_definitions.attribute_definitions,
            global_secondary_index_update,
            table_name: add_index.table_name,
        };
        Ok(operation)
    }
}

impl AddIndex {
    /// Execute the add index operation.
    #[tracing::instrument(name = "dynamodb_rest.add_index", skip(client), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_table::UpdateTableOutput,
        error::SdkError<operation::update_table::UpdateTableError>,
    > {
        let add_index: AddIndexInput = self.try_into()?;
        client
            .update_table()
            .set_attribute_definitions(Some(add_index.attribute_definitions))
            .global_secondary_index_updates(add_index.global_secondary_index_update)
            .table_name(add_index.table_name)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn key_schema(sort_key: Option<&str>) -> common::key::KeySchema {
        common::key::KeySchema {
            partition_key: common::key::KeyAttribute {
                name: "email".to_string(),
                attribute_type: types::ScalarAttributeType::S,
            },
            sort_key: sort_key.map(|name| common::key::KeyAttribute {
                name: name.to_string(),
                attribute_type: types::ScalarAttributeType::N,
            }),
        }
    }

    #[rstest]
    #[case::all(
        IndexProjection::default(),
        types::Projection::builder()
            .projection_type(types::ProjectionType::All)
            .build()
    )]
    #[case::include(
        IndexProjection {
            projection_type: types::ProjectionType::Include,
            non_key_attributes: Some(vec!["name".to_string()]),
        },
        types::Projection::builder()
            .projection_type(types::ProjectionType::Include)
            .non_key_attributes("name")
            .build()
    )]
    #[case::keys_only_drops_non_key_attributes(
        IndexProjection {
            projection_type: types::ProjectionType::KeysOnly,
            non_key_attributes: Some(vec!["name".to_string()]),
        },
        types::Projection::builder()
            .projection_type(types::ProjectionType::KeysOnly)
            .build()
    )]
    fn test_index_projection_to_projection(
        #[case] index_projection: IndexProjection,
        #[case] expected: types::Projection,
    ) {
        let actual: types::Projection = index_projection.into();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::partition_key_only(None, 1)]
    #[case::with_sort_key(Some("createdAt"), 2)]
    fn test_add_index_to_input(#[case] sort_key: Option<&str>, #[case] keys: usize) {
        let add_index = AddIndex {
            index_name: "byEmail".to_string(),
            key_schema: key_schema(sort_key),
            projection: IndexProjection::default(),
            table_name: "Users".to_string(),
        };
        let actual: AddIndexInput = add_index.try_into().unwrap();
        assert_eq!(actual.table_name, "Users");
        assert_eq!(actual.attribute_definitions.len(), keys);
        let create = actual.global_secondary_index_update.create().unwrap();
        assert_eq!(create.index_name(), "byEmail");
        assert_eq!(create.key_schema().len(), keys);
        assert_eq!(
            create.key_schema()[0].key_type(),
            &types::KeyType::Hash
        );
        assert_eq!(
            create
                .provisioned_throughput()
                .map(|throughput| throughput.read_capacity_units()),
            Some(table::INDEX_CAPACITY_UNITS)
        );
    }
}
