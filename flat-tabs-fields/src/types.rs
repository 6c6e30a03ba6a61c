//! Field, validation error and value types shared by the resolver.
//!
//! These mirror the JSON the host form hands to a field interface. Only the
//! keys the resolver reads are typed; everything else is kept in `extra` so a
//! descriptor survives a load/save cycle untouched and deep equality still
//! sees every key.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `meta.special` tag that marks a field as a group container.
pub const GROUP_SPECIAL: &str = "group";

/// Current or initial form data, keyed by field name, in insertion order.
pub type ValueMap = IndexMap<String, Value>;

/// Interface-level metadata for a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldMeta {
    /// The field's own identifying name. Group members reference it through `group`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Name of the parent group, or `None` for a top-level field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One field of a record schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FieldMeta>,
    /// Set on the tab field itself when it heads its own section.
    #[serde(default, rename = "hideLabel", skip_serializing_if = "std::ops::Not::not")]
    pub hide_label: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    /// A top-level field with no metadata.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: None,
            meta: None,
            hide_label: false,
            extra: Map::new(),
        }
    }

    /// Set the human-readable label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Place this field inside the group called `group`.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.meta_mut().group = Some(group.into());
        self
    }

    /// Mark this field as a group container identified by its own field name.
    pub fn as_group(mut self) -> Self {
        let field = self.field.clone();
        let meta = self.meta_mut();
        meta.field = Some(field);
        meta.special
            .get_or_insert_with(Vec::new)
            .push(GROUP_SPECIAL.to_string());
        self
    }

    fn meta_mut(&mut self) -> &mut FieldMeta {
        self.meta.get_or_insert_with(FieldMeta::default)
    }

    /// Parent group name, if any.
    pub fn group(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.group.as_deref())
    }

    /// True when `meta.special` carries the `group` tag.
    pub fn is_group(&self) -> bool {
        self.meta
            .as_ref()
            .and_then(|m| m.special.as_ref())
            .is_some_and(|special| special.iter().any(|s| s == GROUP_SPECIAL))
    }

    /// The name members use to reference this field as their group.
    ///
    /// Falls back to `field` when `meta.field` is absent.
    pub fn group_name(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|m| m.field.as_deref())
            .unwrap_or(&self.field)
    }

    /// Label shown on the tab trigger.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.field)
    }

    /// True for fields with no metadata or no parent group.
    pub fn is_top_level(&self) -> bool {
        self.group().is_none()
    }
}

/// A validation failure reported by the host form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: None,
            type_: None,
            extra: Map::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }
}
