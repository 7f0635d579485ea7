//! Attribute schemas of the provider, its resources and its data sources

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::data_sources::{DataSource, LabelDataSource, LabelsDataSource};
use crate::error::{GmailError, Result};
use crate::resources::{FilterResource, LabelResource, Resource};

/// Value type of an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Bool,
    Int,
    Set(Box<Kind>),
    Map(Box<Kind>),
    List(Vec<Attribute>),
}

/// Who supplies an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: Kind,
    pub mode: Mode,
    /// Changing the value replaces the resource
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Attribute {
    pub fn new(name: &'static str, kind: Kind, mode: Mode) -> Self {
        Self {
            name,
            kind,
            mode,
            force_new: false,
            default: None,
        }
    }

    pub fn required(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Mode::Required)
    }

    pub fn optional(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Mode::Optional)
    }

    pub fn computed(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Mode::Computed)
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Ordered attribute list of one block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check a config object against the schema: every key must be a
    /// settable attribute and every required attribute must be present.
    pub fn check_config(&self, config: &Value) -> Result<()> {
        let object = config
            .as_object()
            .ok_or_else(|| GmailError::Validation("configuration must be an object".to_string()))?;

        for key in object.keys() {
            match self.attribute(key) {
                None => {
                    return Err(GmailError::Validation(format!(
                        "unsupported argument '{}'",
                        key
                    )))
                }
                Some(attribute) if attribute.mode == Mode::Computed => {
                    return Err(GmailError::Validation(format!(
                        "'{}' is computed and cannot be set",
                        key
                    )))
                }
                Some(_) => {}
            }
        }

        for attribute in &self.attributes {
            if attribute.mode == Mode::Required && !object.contains_key(attribute.name) {
                return Err(GmailError::Validation(format!(
                    "missing required argument '{}'",
                    attribute.name
                )));
            }
        }

        Ok(())
    }
}

/// Every schema the provider declares, keyed by type name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resources: BTreeMap<&'static str, Schema>,
    pub data_sources: BTreeMap<&'static str, Schema>,
}

fn string_map() -> Kind {
    Kind::Map(Box::new(Kind::String))
}

fn int_map() -> Kind {
    Kind::Map(Box::new(Kind::Int))
}

fn string_set() -> Kind {
    Kind::Set(Box::new(Kind::String))
}

fn label_attributes() -> Vec<Attribute> {
    vec![
        Attribute::computed("id", Kind::String),
        Attribute::computed("name", Kind::String),
        Attribute::computed("messages", int_map()),
        Attribute::computed("threads", int_map()),
        Attribute::computed("visibility", string_map()),
        Attribute::computed("color", string_map()),
    ]
}

pub fn provider_config_schema() -> Schema {
    Schema::new()
        .with_attribute(
            Attribute::optional("token_file", Kind::String).with_default(json!("token.json")),
        )
        .with_attribute(
            Attribute::optional("credentials_file", Kind::String)
                .with_default(json!("credentials.json")),
        )
        .with_attribute(Attribute::optional("user_id", Kind::String).with_default(json!("me")))
        .with_attribute(Attribute::optional("access", Kind::String).with_default(json!("read_write")))
}

pub fn label_resource_schema() -> Schema {
    Schema::new()
        .with_attribute(Attribute::computed("id", Kind::String))
        .with_attribute(Attribute::optional("user_id", Kind::String).force_new())
        .with_attribute(Attribute::required("name", Kind::String))
        .with_attribute(Attribute::optional("visibility", string_map()))
        .with_attribute(Attribute::required("color", string_map()))
        .with_attribute(Attribute::computed("messages", int_map()))
        .with_attribute(Attribute::computed("threads", int_map()))
}

pub fn filter_resource_schema() -> Schema {
    let strings = [
        "user_id",
        "from",
        "to",
        "subject",
        "query",
        "negated_query",
    ];

    let mut schema = Schema::new().with_attribute(Attribute::computed("id", Kind::String));
    for name in strings {
        schema = schema.with_attribute(Attribute::optional(name, Kind::String).force_new());
    }
    schema
        .with_attribute(
            Attribute::optional("has_attachment", Kind::Bool)
                .force_new()
                .with_default(json!(false)),
        )
        .with_attribute(
            Attribute::optional("exclude_chats", Kind::Bool)
                .force_new()
                .with_default(json!(false)),
        )
        .with_attribute(
            Attribute::optional("size", Kind::Int)
                .force_new()
                .with_default(json!(0)),
        )
        .with_attribute(Attribute::optional("size_comparison", Kind::String).force_new())
        .with_attribute(Attribute::optional("add_labels", string_set()).force_new())
        .with_attribute(Attribute::optional("remove_labels", string_set()).force_new())
        .with_attribute(Attribute::optional("forward", Kind::String).force_new())
}

pub fn label_data_source_schema() -> Schema {
    let mut schema = Schema::new()
        .with_attribute(Attribute::optional("user_id", Kind::String))
        .with_attribute(Attribute::required("name", Kind::String));
    schema
        .attributes
        .extend(label_attributes().into_iter().filter(|a| a.name != "name"));
    schema
}

pub fn labels_data_source_schema() -> Schema {
    Schema::new()
        .with_attribute(Attribute::computed("id", Kind::String))
        .with_attribute(Attribute::optional("user_id", Kind::String))
        .with_attribute(Attribute::computed("labels", Kind::List(label_attributes())))
}

pub fn provider_schema() -> ProviderSchema {
    let mut resources = BTreeMap::new();
    resources.insert(LabelResource::TYPE_NAME, label_resource_schema());
    resources.insert(FilterResource::TYPE_NAME, filter_resource_schema());

    let mut data_sources = BTreeMap::new();
    data_sources.insert(LabelDataSource::TYPE_NAME, label_data_source_schema());
    data_sources.insert(LabelsDataSource::TYPE_NAME, labels_data_source_schema());

    ProviderSchema {
        provider: provider_config_schema(),
        resources,
        data_sources,
    }
}
