//! Form snapshots on disk and a strict field index.
//!
//! A snapshot captures what the host form hands the interface on one render:
//! the field list, current edits, initial values and validation errors. It is
//! read from a `.json`, `.yaml` or `.yml` file.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::{FlatTabsError, Result};
use crate::resolver::GroupResolver;
use crate::types::{FieldDescriptor, ValidationError, ValueMap};

/// Snapshot file format detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Everything the host form passes to the interface on one render.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: ValueMap,
    #[serde(default, alias = "initial_values", deserialize_with = "null_as_default")]
    pub initial_values: ValueMap,
    #[serde(default, alias = "validation_errors", deserialize_with = "null_as_default")]
    pub validation_errors: Vec<ValidationError>,
}

impl FormSnapshot {
    /// Read a snapshot, picking the parser from the file extension.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format =
            SnapshotFormat::from_path(path).ok_or_else(|| FlatTabsError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let content = fs::read_to_string(path).await?;
        let snapshot = Self::parse(&content, format)?;
        debug!(
            ?path,
            fields = snapshot.fields.len(),
            errors = snapshot.validation_errors.len(),
            "form snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self> {
        Ok(match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml_ng::from_str(content)?,
        })
    }

    /// Build a strict index over the snapshot's fields.
    pub fn index(&self) -> Result<FieldIndex> {
        FieldIndex::new(self.fields.clone())
    }
}

/// A field list checked for unique names.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    fields: Vec<FieldDescriptor>,
    name_index: HashMap<String, usize>,
}

impl FieldIndex {
    /// Index `fields` by name, rejecting duplicates.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let mut name_index = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            if name_index.insert(field.field.clone(), idx).is_some() {
                return Err(FlatTabsError::DuplicateFieldName {
                    name: field.field.clone(),
                });
            }
        }
        Ok(Self { fields, name_index })
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.name_index.get(name).map(|&i| &self.fields[i])
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field that must be a group container.
    pub fn group(&self, name: &str) -> Result<&FieldDescriptor> {
        let field = self
            .get(name)
            .ok_or_else(|| FlatTabsError::FieldNotFound { name: name.into() })?;
        if !field.is_group() {
            return Err(FlatTabsError::NotAGroup { name: name.into() });
        }
        Ok(field)
    }

    /// Fields whose `meta.group` names no group field in the list.
    ///
    /// These never show up under any tab; the interface does not treat that
    /// as an error, but tooling may want to report it.
    pub fn dangling(&self) -> Vec<&FieldDescriptor> {
        let group_names: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.is_group())
            .map(FieldDescriptor::group_name)
            .collect();
        self.fields
            .iter()
            .filter(|f| f.group().is_some_and(|g| !group_names.contains(&g)))
            .collect()
    }

    pub fn resolver(&self) -> GroupResolver<'_> {
        GroupResolver::new(&self.fields)
    }
}
