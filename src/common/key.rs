use aws_sdk_dynamodb::{error::BuildError, types};

/// Key attribute: a name and its scalar type.
///
/// ```rust
/// use aws_sdk_dynamodb::types::ScalarAttributeType;
/// use dynamodb_rest::common::key;
///
/// let key = key::KeyAttribute {
///     name: "userId".to_string(),
///     attribute_type: ScalarAttributeType::S,
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KeyAttribute {
    /// The attribute name of the key.
    pub name: String,
    /// The scalar type of the key (`S`, `N` or `B`).
    pub attribute_type: types::ScalarAttributeType,
}

impl KeyAttribute {
    fn get_definitions(
        self,
        key_type: types::KeyType,
    ) -> Result<(types::KeySchemaElement, types::AttributeDefinition), BuildError> {
        let key_schema_element = types::KeySchemaElement::builder()
            .attribute_name(self.name.clone())
            .key_type(key_type)
            .build()?;
        let attribute_definition = types::AttributeDefinition::builder()
            .attribute_name(self.name)
            .attribute_type(self.attribute_type)
            .build()?;
        Ok((key_schema_element, attribute_definition))
    }
}

/// Primary key schema (partition key and optional sort key).
///
/// ```rust
/// use aws_sdk_dynamodb::types::ScalarAttributeType;
/// use dynamodb_rest::common::key;
///
/// let key_schema = key::KeySchema {
///     partition_key: key::KeyAttribute {
///         name: "userId".to_string(),
///         attribute_type: ScalarAttributeType::S,
///     },
///     sort_key: None,
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KeySchema {
    /// The partition key (required).
    pub partition_key: KeyAttribute,
    /// The sort key (optional, only for composite primary keys).
    pub sort_key: Option<KeyAttribute>,
}

/// Key schema elements and attribute definitions, in schema order.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct KeyDefinitions {
    pub(crate) key_schema: Vec<types::KeySchemaElement>,
    pub(crate) attribute_definitions: Vec<types::AttributeDefinition>,
}

impl TryFrom<KeySchema> for KeyDefinitions {
    type Error = BuildError;

    fn try_from(key_schema: KeySchema) -> Result<Self, BuildError> {
        let (partition_key, partition_key_definition) = key_schema
            .partition_key
            .get_definitions(types::KeyType::Hash)?;
        let mut definitions = Self {
            key_schema: vec![partition_key],
            attribute_definitions: vec![partition_key_definition],
        };
        if let Some(sort_key) = key_schema.sort_key {
            let (sort_key, sort_key_definition) = sort_key.get_definitions(types::KeyType::Range)?;
            definitions.key_schema.push(sort_key);
            definitions
                .attribute_definitions
                .push(sort_key_definition);
        }
        Ok(definitions)
    }
}
