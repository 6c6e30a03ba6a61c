//! The form section rendered inside one tab panel.

use std::collections::HashSet;

use crate::resolver::GroupResolver;
use crate::types::{FieldDescriptor, ValidationError, ValueMap};

/// Error code the host uses for unique-constraint violations.
pub const RECORD_NOT_UNIQUE: &str = "RECORD_NOT_UNIQUE";

/// Translation key prefix for validation messages.
const MESSAGE_KEY_PREFIX: &str = "validationError";

/// The fields shown in one tab: the tab field itself (label hidden, since the
/// trigger already shows it) followed by everything nested under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    field: FieldDescriptor,
    fields: Vec<FieldDescriptor>,
}

impl Section {
    pub fn new(resolver: &GroupResolver<'_>, field: &FieldDescriptor) -> Self {
        let mut head = field.clone();
        head.hide_label = true;

        let mut fields = vec![head];
        if field.is_group() {
            fields.extend(
                resolver
                    .members_of(field.group_name())
                    .into_iter()
                    .cloned(),
            );
        }

        Self {
            field: field.clone(),
            fields,
        }
    }

    /// The tab field this section belongs to.
    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    /// Fields handed to the host form, tab field first.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_names(&self) -> HashSet<&str> {
        self.fields.iter().map(|f| f.field.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.field == name)
    }

    /// True when the user has edited any field in this section.
    pub fn is_edited(&self, edits: &ValueMap) -> bool {
        edits.keys().any(|key| self.contains(key))
    }

    /// First error raised on the tab field or any field inside it.
    pub fn validation_error<'e>(&self, errors: &'e [ValidationError]) -> Option<&'e ValidationError> {
        errors
            .iter()
            .find(|error| error.field == self.field.field || self.contains(&error.field))
    }

    /// Translation key for the section's first validation error.
    ///
    /// Unique-constraint failures share one message; everything else is keyed
    /// by the error type.
    pub fn validation_message_key(&self, errors: &[ValidationError]) -> Option<String> {
        let error = self.validation_error(errors)?;
        if error.code.as_deref() == Some(RECORD_NOT_UNIQUE) {
            return Some(format!("{MESSAGE_KEY_PREFIX}.unique"));
        }
        let kind = error.type_.as_deref().unwrap_or("unknown");
        Some(format!("{MESSAGE_KEY_PREFIX}.{kind}"))
    }

    /// Initial values limited to the fields of this section.
    pub fn filter_initial_values(&self, initial: &ValueMap) -> ValueMap {
        let names = self.field_names();
        initial
            .iter()
            .filter(|(key, _)| names.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
