//! Active-tab state for one tab-group interface instance.
//!
//! A `TabGroup` is owned by whoever renders the interface and handed to both
//! the tab list and the panels. Nothing here is global, so two forms on the
//! same page never share a selection.
//!
//! The host re-renders with fresh inputs; each `sync_*` call recomputes its
//! derived value and only replaces the cached one when it actually differs.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resolver::GroupResolver;
use crate::section::Section;
use crate::types::{FieldDescriptor, ValidationError, ValueMap};

/// Rendered as the `data-state` attribute on triggers and panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    Active,
    Inactive,
}

impl TabState {
    pub fn as_str(self) -> &'static str {
        match self {
            TabState::Active => "active",
            TabState::Inactive => "inactive",
        }
    }
}

impl fmt::Display for TabState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabGroup {
    container: String,
    tabs: Vec<FieldDescriptor>,
    values: ValueMap,
    errors: Vec<ValidationError>,
    active: Option<String>,
}

impl TabGroup {
    /// A tab group for the container whose `meta.field` is `container`.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            tabs: Vec::new(),
            values: ValueMap::new(),
            errors: Vec::new(),
            active: None,
        }
    }

    /// A tab group for the given tab-group field.
    pub fn for_field(field: &FieldDescriptor) -> Self {
        Self::new(field.group_name())
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Tab header fields in display order.
    pub fn tabs(&self) -> &[FieldDescriptor] {
        &self.tabs
    }

    /// Form values scoped to this group's tabs.
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recompute the tab list from the full field list.
    ///
    /// Selects the first tab when nothing is selected yet, or when the
    /// selected tab has disappeared. Returns whether the tab list changed.
    pub fn sync_fields(&mut self, all_fields: &[FieldDescriptor]) -> bool {
        let resolver = GroupResolver::new(all_fields);
        let tabs: Vec<FieldDescriptor> = resolver
            .resolve_tabs(&self.container)
            .into_iter()
            .cloned()
            .collect();

        let changed = tabs != self.tabs;
        if changed {
            debug!(container = %self.container, tabs = tabs.len(), "tab list changed");
            self.tabs = tabs;
        }

        let selection_valid = self
            .active
            .as_deref()
            .is_some_and(|active| self.has_tab(active));
        if !selection_valid {
            let first = self.tabs.first().map(|tab| tab.field.clone());
            if first != self.active {
                debug!(container = %self.container, tab = ?first, "defaulting to first tab");
                self.active = first;
            }
        }

        changed
    }

    /// Recompute the scoped values. Returns whether they changed.
    pub fn sync_values(&mut self, all_fields: &[FieldDescriptor], values: &ValueMap) -> bool {
        let resolver = GroupResolver::new(all_fields);
        let scoped = resolver.filter_values_for_scope(values, &self.tabs);
        // IndexMap equality ignores order; the cache should not.
        if scoped.iter().eq(self.values.iter()) {
            return false;
        }
        self.values = scoped;
        true
    }

    /// React to a new validation error list.
    ///
    /// A list equal to the previous one is ignored, so an unchanged error set
    /// never overrides a tab the user picked since. Otherwise the tab holding
    /// the first error becomes active. Returns the tab switched to, if any.
    pub fn sync_validation_errors(
        &mut self,
        all_fields: &[FieldDescriptor],
        errors: &[ValidationError],
    ) -> Option<&str> {
        if errors == self.errors.as_slice() {
            return None;
        }
        self.errors = errors.to_vec();

        let first = errors.first()?;
        let resolver = GroupResolver::new(all_fields);
        let tab = resolver.pick_active_tab_for_error(&first.field, &self.tabs)?;
        debug!(container = %self.container, field = %first.field, tab = %tab, "switching to tab with error");
        self.active = Some(tab);
        self.active.as_deref()
    }

    /// Explicit selection from the tab list. Always takes effect.
    pub fn select_tab(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(container = %self.container, tab = %name, "tab selected");
        self.active = Some(name);
    }

    pub fn has_tab(&self, name: &str) -> bool {
        self.tabs.iter().any(|tab| tab.field == name)
    }

    pub fn tab_state(&self, name: &str) -> TabState {
        if self.active.as_deref() == Some(name) {
            TabState::Active
        } else {
            TabState::Inactive
        }
    }

    /// The section mounted in the active panel, if a tab is active.
    pub fn active_section(&self, all_fields: &[FieldDescriptor]) -> Option<Section> {
        let active = self.active.as_deref()?;
        let tab = self.tabs.iter().find(|tab| tab.field == active)?;
        let resolver = GroupResolver::new(all_fields);
        Some(Section::new(&resolver, tab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("tabs").as_group(),
            FieldDescriptor::new("sectionA").as_group().in_group("tabs"),
            FieldDescriptor::new("sectionB").as_group().in_group("tabs"),
            FieldDescriptor::new("w").in_group("sectionA"),
            FieldDescriptor::new("x").in_group("sectionB"),
            FieldDescriptor::new("other"),
        ]
    }

    fn synced() -> (Vec<FieldDescriptor>, TabGroup) {
        let fields = fields();
        let mut group = TabGroup::new("tabs");
        group.sync_fields(&fields);
        (fields, group)
    }

    #[test]
    fn first_tab_active_on_first_sync() {
        let fields = fields();
        let mut group = TabGroup::new("tabs");
        assert_eq!(group.active_tab(), None);

        assert!(group.sync_fields(&fields));
        assert_eq!(group.active_tab(), Some("sectionA"));
        assert_eq!(group.tabs().len(), 2);
    }

    #[test]
    fn resync_with_same_fields_is_unchanged() {
        let (fields, mut group) = synced();
        group.select_tab("sectionB");
        assert!(!group.sync_fields(&fields));
        assert_eq!(group.active_tab(), Some("sectionB"));
    }

    #[test]
    fn no_tabs_means_no_selection() {
        let fields = vec![FieldDescriptor::new("tabs").as_group()];
        let mut group = TabGroup::new("tabs");
        assert!(!group.sync_fields(&fields));
        assert_eq!(group.active_tab(), None);
    }

    #[test]
    fn removed_tab_falls_back_to_first() {
        let (mut fields, mut group) = synced();
        group.select_tab("sectionB");
        fields.retain(|f| f.field != "sectionB");

        assert!(group.sync_fields(&fields));
        assert_eq!(group.active_tab(), Some("sectionA"));
    }

    #[test]
    fn error_switches_to_its_tab() {
        let (fields, mut group) = synced();
        assert_eq!(group.active_tab(), Some("sectionA"));

        let errors = vec![ValidationError::new("x").with_type("required")];
        assert_eq!(
            group.sync_validation_errors(&fields, &errors),
            Some("sectionB")
        );
        assert_eq!(group.active_tab(), Some("sectionB"));
    }

    #[test]
    fn unchanged_errors_do_not_override_user_selection() {
        let (fields, mut group) = synced();
        let errors = vec![ValidationError::new("x").with_type("required")];
        group.sync_validation_errors(&fields, &errors);
        group.select_tab("sectionA");

        assert_eq!(group.sync_validation_errors(&fields, &errors.clone()), None);
        assert_eq!(group.active_tab(), Some("sectionA"));
    }

    #[test]
    fn empty_or_unresolvable_errors_keep_selection() {
        let (fields, mut group) = synced();
        group.select_tab("sectionB");

        assert_eq!(group.sync_validation_errors(&fields, &[]), None);
        let errors = vec![ValidationError::new("other").with_type("required")];
        assert_eq!(group.sync_validation_errors(&fields, &errors), None);
        assert_eq!(group.active_tab(), Some("sectionB"));
    }

    #[test]
    fn values_scoped_and_cached() {
        let (fields, mut group) = synced();
        let values: ValueMap = [("w", json!(1)), ("x", json!(2)), ("other", json!(3))]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        assert!(group.sync_values(&fields, &values));
        assert_eq!(group.values().keys().collect::<Vec<_>>(), vec!["w", "x"]);
        assert!(!group.sync_values(&fields, &values));
    }

    #[test]
    fn tab_states_follow_selection() {
        let (_, mut group) = synced();
        assert_eq!(group.tab_state("sectionA"), TabState::Active);
        assert_eq!(group.tab_state("sectionB"), TabState::Inactive);

        group.select_tab("sectionB");
        assert_eq!(group.tab_state("sectionA").to_string(), "inactive");
        assert_eq!(group.tab_state("sectionB").to_string(), "active");
    }

    #[test]
    fn active_section_mounts_only_the_active_tab() {
        let (fields, mut group) = synced();
        let section = group.active_section(&fields).unwrap();
        assert_eq!(section.field().field, "sectionA");
        assert!(section.contains("w"));
        assert!(!section.contains("x"));

        group.select_tab("nowhere");
        assert!(group.active_section(&fields).is_none());
    }

    #[test]
    fn separate_groups_do_not_share_selection() {
        let fields = fields();
        let mut first = TabGroup::new("tabs");
        let mut second = TabGroup::new("tabs");
        first.sync_fields(&fields);
        second.sync_fields(&fields);

        first.select_tab("sectionB");
        assert_eq!(first.active_tab(), Some("sectionB"));
        assert_eq!(second.active_tab(), Some("sectionA"));
    }

    #[test]
    fn for_field_uses_group_name() {
        let container = FieldDescriptor::new("tabs").as_group();
        assert_eq!(TabGroup::for_field(&container).container(), "tabs");
    }
}
