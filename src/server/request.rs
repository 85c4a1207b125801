//! Request bodies and their conversion into store operations.
//!
//! Bodies are camelCase JSON objects. Every field is optional at the decoding
//! stage; the conversions decide which ones are required.

use crate::common::key::{KeyAttribute, KeySchema};
use crate::error::{Error, Result};
use crate::read::{common::MultipleReadArgs, get_item::GetItem, query::Query, scan::Scan};
use crate::table::{
    add_index::{AddIndex, IndexProjection},
    create_table::CreateTable,
};
use crate::write::{
    common::WriteArgs,
    delete_item::DeleteItem,
    put_item::PutItem,
    update_item::{UpdateAttributes, UpdateItem},
};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Message returned when a required field is missing.
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

/// Message returned when an update carries no attributes.
pub const NO_ATTRIBUTES_TO_UPDATE: &str = "No attributes to update";

/// Decode a JSON request body. An empty body reads as `{}`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    Ok(serde_json::from_slice(body)?)
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

fn required(value: Option<String>) -> Result<String> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(Error::Validation(MISSING_REQUIRED_FIELDS))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// `null`, `false`, `0` and `""` count as missing.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|number| number != 0.0),
        Some(Value::String(string)) => !string.is_empty(),
        Some(Value::Array(_) | Value::Object(_) | Value::Bool(true)) => true,
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn scalar_type(attribute_type: Option<String>) -> types::ScalarAttributeType {
    attribute_type
        .filter(|attribute_type| !attribute_type.is_empty())
        .map_or(types::ScalarAttributeType::S, |attribute_type| {
            types::ScalarAttributeType::from(attribute_type.as_str())
        })
}

/// `POST /tables`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    table_name: Option<String>,
    attribute_name: Option<String>,
    attribute_type: Option<String>,
    sort_key_name: Option<String>,
    sort_key_type: Option<String>,
}

impl TryFrom<CreateTableRequest> for CreateTable {
    type Error = Error;

    fn try_from(request: CreateTableRequest) -> Result<Self> {
        let sort_key = request
            .sort_key_name
            .filter(|name| !name.is_empty())
            .map(|name| KeyAttribute {
                name,
                attribute_type: scalar_type(request.sort_key_type),
            });
        Ok(Self {
            key_schema: KeySchema {
                partition_key: KeyAttribute {
                    name: request.attribute_name.unwrap_or_default(),
                    attribute_type: scalar_type(request.attribute_type),
                },
                sort_key,
            },
            table_name: request.table_name.unwrap_or_default(),
        })
    }
}

/// Key attribute as sent by callers (`{"AttributeName", "AttributeType"}`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyDescriptorRequest {
    attribute_name: Option<String>,
    attribute_type: Option<String>,
}

impl TryFrom<KeyDescriptorRequest> for KeyAttribute {
    type Error = Error;

    fn try_from(key: KeyDescriptorRequest) -> Result<Self> {
        Ok(Self {
            name: required(key.attribute_name)?,
            attribute_type: types::ScalarAttributeType::from(
                required(key.attribute_type)?.as_str(),
            ),
        })
    }
}

/// `POST /tables/addIndex`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIndexRequest {
    table_name: Option<String>,
    index_name: Option<String>,
    partition_key: Option<KeyDescriptorRequest>,
    sort_key: Option<KeyDescriptorRequest>,
    projection_type: Option<String>,
    non_key_attributes: Option<Vec<String>>,
}

impl TryFrom<AddIndexRequest> for AddIndex {
    type Error = Error;

    fn try_from(request: AddIndexRequest) -> Result<Self> {
        let table_name = required(request.table_name)?;
        let index_name = required(request.index_name)?;
        let partition_key = request
            .partition_key
            .ok_or(Error::Validation(MISSING_REQUIRED_FIELDS))?;
        let partition_key = KeyAttribute::try_from(partition_key)?;
        let sort_key = request.sort_key.map(KeyAttribute::try_from).transpose()?;
        let projection_type = request
            .projection_type
            .filter(|projection_type| !projection_type.is_empty())
            .map_or(types::ProjectionType::All, |projection_type| {
                types::ProjectionType::from(projection_type.as_str())
            });
        Ok(Self {
            index_name,
            key_schema: KeySchema {
                partition_key,
                sort_key,
            },
            projection: IndexProjection {
                projection_type,
                non_key_attributes: request.non_key_attributes,
            },
            table_name,
        })
    }
}

/// `POST /records`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutItemRequest {
    table_name: Option<String>,
    data: Option<Value>,
}

impl TryFrom<PutItemRequest> for PutItem<Value> {
    type Error = Error;

    fn try_from(request: PutItemRequest) -> Result<Self> {
        Ok(Self {
            item: request.data.unwrap_or_else(empty_object),
            write_args: WriteArgs {
                table_name: request.table_name.unwrap_or_default(),
                ..Default::default()
            },
        })
    }
}

/// `POST /records/retrieveRecord` and `DELETE /records`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRequest {
    table_name: Option<String>,
    key: Option<Value>,
}

impl TryFrom<KeyRequest> for GetItem<Value> {
    type Error = Error;

    fn try_from(request: KeyRequest) -> Result<Self> {
        Ok(Self {
            key: request.key.unwrap_or_else(empty_object),
            table_name: request.table_name.unwrap_or_default(),
        })
    }
}

impl TryFrom<KeyRequest> for DeleteItem<Value> {
    type Error = Error;

    fn try_from(request: KeyRequest) -> Result<Self> {
        Ok(Self {
            key: request.key.unwrap_or_else(empty_object),
            write_args: WriteArgs {
                table_name: request.table_name.unwrap_or_default(),
                ..Default::default()
            },
        })
    }
}

/// `PUT /records`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    table_name: Option<String>,
    key: Option<Value>,
    data: Option<IndexMap<String, Value>>,
}

impl TryFrom<UpdateItemRequest> for UpdateItem<Value> {
    type Error = Error;

    fn try_from(request: UpdateItemRequest) -> Result<Self> {
        let attributes = UpdateAttributes(request.data.unwrap_or_default());
        if attributes.is_empty() {
            return Err(Error::Validation(NO_ATTRIBUTES_TO_UPDATE));
        }
        Ok(Self {
            key: request.key.unwrap_or_else(empty_object),
            attributes,
            write_args: WriteArgs {
                table_name: request.table_name.unwrap_or_default(),
                ..Default::default()
            },
        })
    }
}

/// `POST /records/query`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    table_name: Option<String>,
    key_condition_expression: Option<String>,
    expression_attribute_values: Option<Value>,
    index_name: Option<String>,
    filter_expression: Option<String>,
    expression_attribute_names: Option<HashMap<String, String>>,
}

impl TryFrom<QueryRequest> for Query<Value> {
    type Error = Error;

    fn try_from(request: QueryRequest) -> Result<Self> {
        if !present(request.table_name.as_deref())
            || !present(request.key_condition_expression.as_deref())
            || !truthy(request.expression_attribute_values.as_ref())
        {
            return Err(Error::Validation(MISSING_REQUIRED_FIELDS));
        }
        Ok(Self {
            key_condition_expression: request.key_condition_expression.unwrap_or_default(),
            multiple_read_args: MultipleReadArgs {
                expression_attribute_names: request.expression_attribute_names,
                expression_attribute_values: request.expression_attribute_values,
                filter_expression: non_empty(request.filter_expression),
                index_name: non_empty(request.index_name),
                table_name: request.table_name.unwrap_or_default(),
            },
        })
    }
}

/// `POST /records/scan`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    table_name: Option<String>,
    index_name: Option<String>,
    filter_expression: Option<String>,
    expression_attribute_names: Option<HashMap<String, String>>,
    expression_attribute_values: Option<Value>,
}

impl TryFrom<ScanRequest> for Scan<Value> {
    type Error = Error;

    fn try_from(request: ScanRequest) -> Result<Self> {
        Ok(Self {
            multiple_read_args: MultipleReadArgs {
                expression_attribute_names: request.expression_attribute_names,
                expression_attribute_values: request.expression_attribute_values,
                filter_expression: non_empty(request.filter_expression),
                index_name: non_empty(request.index_name),
                table_name: request.table_name.unwrap_or_default(),
            },
        })
    }
}
