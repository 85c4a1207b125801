use aws_sdk_dynamodb::types;
use serde::Serialize;

/// Key schema element as returned to HTTP callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyDescriptor {
    /// The key attribute name.
    pub attribute_name: String,
    /// `HASH` or `RANGE`.
    pub key_type: String,
}

impl From<&types::KeySchemaElement> for KeyDescriptor {
    fn from(element: &types::KeySchemaElement) -> Self {
        Self {
            attribute_name: element.attribute_name().to_string(),
            key_type: element.key_type().as_str().to_string(),
        }
    }
}

/// Attribute definition as returned to HTTP callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDescriptor {
    /// The attribute name.
    pub attribute_name: String,
    /// `S`, `N` or `B`.
    pub attribute_type: String,
}

impl From<&types::AttributeDefinition> for AttributeDescriptor {
    fn from(definition: &types::AttributeDefinition) -> Self {
        Self {
            attribute_name: definition.attribute_name().to_string(),
            attribute_type: definition.attribute_type().as_str().to_string(),
        }
    }
}

/// Global secondary index as returned to HTTP callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexDescriptor {
    /// The index name.
    pub index_name: Option<String>,
    /// The index status, e.g. `CREATING` or `ACTIVE`.
    pub index_status: Option<String>,
    /// The index key schema.
    pub key_schema: Vec<KeyDescriptor>,
    /// The projection type of the index.
    pub projection_type: Option<String>,
    /// The non-key attributes of an `INCLUDE` projection.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub non_key_attributes: Vec<String>,
}

impl From<&types::GlobalSecondaryIndexDescription> for IndexDescriptor {
    fn from(index: &types::GlobalSecondaryIndexDescription) -> Self {
        let projection = index.projection();
        Self {
            index_name: index.index_name().map(str::to_string),
            index_status: index
                .index_status()
                .map(|status| status.as_str().to_string()),
            key_schema: index.key_schema().iter().map(KeyDescriptor::from).collect(),
            projection_type: projection
                .and_then(types::Projection::projection_type)
                .map(|projection_type| projection_type.as_str().to_string()),
            non_key_attributes: projection
                .map(|projection| projection.non_key_attributes().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// Table description as returned to HTTP callers.
///
/// Field names follow the DynamoDB wire naming so the JSON looks like the
/// `TableDescription` the store returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescriptor {
    /// The table name.
    pub table_name: Option<String>,
    /// The table status, e.g. `CREATING` or `ACTIVE`.
    pub table_status: Option<String>,
    /// The table ARN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_arn: Option<String>,
    /// The primary key schema.
    pub key_schema: Vec<KeyDescriptor>,
    /// The attribute definitions of every key attribute.
    pub attribute_definitions: Vec<AttributeDescriptor>,
    /// Global secondary indexes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global_secondary_indexes: Vec<IndexDescriptor>,
    /// Approximate number of items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    /// Approximate size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_size_bytes: Option<i64>,
    /// Creation time in seconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_time: Option<i64>,
}

impl From<&types::TableDescription> for TableDescriptor {
    fn from(table: &types::TableDescription) -> Self {
        Self {
            table_name: table.table_name().map(str::to_string),
            table_status: table
                .table_status()
                .map(|status| status.as_str().to_string()),
            table_arn: table.table_arn().map(str::to_string),
            key_schema: table.key_schema().iter().map(KeyDescriptor::from).collect(),
            attribute_definitions: table
                .attribute_definitions()
                .iter()
                .map(AttributeDescriptor::from)
                .collect(),
            global_secondary_indexes: table
                .global_secondary_indexes()
                .iter()
                .map(IndexDescriptor::from)
                .collect(),
            item_count: table.item_count(),
            table_size_bytes: table.table_size_bytes(),
            creation_date_time: table.creation_date_time().map(|date_time| date_time.secs()),
        }
    }
}
