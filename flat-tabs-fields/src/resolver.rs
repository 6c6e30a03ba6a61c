//! Tab and member resolution over a flat field list.
//!
//! The host form supplies every field of the record as one flat list. Group
//! fields are containers: a field belongs to a group when its `meta.group`
//! equals the group's `meta.field`. The resolver indexes that list once and
//! answers downward questions (which fields live under this group?) and
//! upward ones (which tab contains this field?).

use std::collections::{HashMap, HashSet};

use tracing::{trace, warn};

use crate::types::{FieldDescriptor, ValueMap};

/// Read-only view over a field list with name and parent indexes.
///
/// Field names are expected to be unique. When they are not, the first
/// descriptor with a given name wins for lookups; use
/// [`FieldIndex`](crate::schema::FieldIndex) to reject such lists up front.
#[derive(Debug)]
pub struct GroupResolver<'a> {
    fields: &'a [FieldDescriptor],
    by_name: HashMap<&'a str, &'a FieldDescriptor>,
    children: HashMap<&'a str, Vec<&'a FieldDescriptor>>,
    top_level: Vec<&'a FieldDescriptor>,
}

impl<'a> GroupResolver<'a> {
    pub fn new(fields: &'a [FieldDescriptor]) -> Self {
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut children: HashMap<&'a str, Vec<&'a FieldDescriptor>> = HashMap::new();
        let mut top_level = Vec::new();
        for field in fields {
            by_name.entry(field.field.as_str()).or_insert(field);
            match field.group() {
                Some(group) => children.entry(group).or_default().push(field),
                None => top_level.push(field),
            }
        }
        Self {
            fields,
            by_name,
            children,
            top_level,
        }
    }

    /// The full field list, in declaration order.
    pub fn fields(&self) -> &'a [FieldDescriptor] {
        self.fields
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&'a FieldDescriptor> {
        self.by_name.get(name).copied()
    }

    fn direct_children(&self, group: Option<&str>) -> &[&'a FieldDescriptor] {
        match group {
            Some(name) => self
                .children
                .get(name)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => &self.top_level,
        }
    }

    /// Direct children of the tab-group field `container_group`, in list order.
    ///
    /// These are the tab headers. A child that is not itself a group still
    /// gets a tab; it just has no nested members.
    pub fn resolve_tabs(&self, container_group: &str) -> Vec<&'a FieldDescriptor> {
        self.direct_children(Some(container_group)).to_vec()
    }

    /// Every field transitively nested under `group`.
    ///
    /// Direct children come first, followed by each group child's own subtree
    /// in the order the children appear. `None` selects top-level fields.
    ///
    /// `visited` records group names as they are expanded. A group already in
    /// the set is listed but not expanded again, which keeps the result free
    /// of duplicates and bounds the walk on a cyclic schema.
    pub fn collect_group_members(
        &self,
        group: Option<&str>,
        visited: &mut HashSet<String>,
    ) -> Vec<&'a FieldDescriptor> {
        if let Some(name) = group {
            visited.insert(name.to_string());
        }

        let direct = self.direct_children(group);
        let mut members = direct.to_vec();
        for child in direct {
            if !child.is_group() {
                continue;
            }
            let child_group = child.group_name();
            if visited.contains(child_group) {
                trace!(group = child_group, "group already expanded");
                continue;
            }
            trace!(parent = ?group, group = child_group, "expanding nested group");
            members.extend(self.collect_group_members(Some(child_group), visited));
        }
        members
    }

    /// Transitive members of `group`, collected with a fresh visited set.
    pub fn members_of(&self, group: &str) -> Vec<&'a FieldDescriptor> {
        self.collect_group_members(Some(group), &mut HashSet::new())
    }

    /// Names of the scoped fields plus the nested members of any scoped group.
    pub fn scope_names<'f, I>(&self, scoped_fields: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'f FieldDescriptor>,
    {
        let mut names = HashSet::new();
        for field in scoped_fields {
            names.insert(field.field.clone());
            if field.is_group() {
                for nested in self.members_of(field.group_name()) {
                    names.insert(nested.field.clone());
                }
            }
        }
        names
    }

    /// Restrict `values` to the fields in scope.
    ///
    /// Keys missing from `values` stay missing; order follows `values`.
    pub fn filter_values_for_scope<'f, I>(&self, values: &ValueMap, scoped_fields: I) -> ValueMap
    where
        I: IntoIterator<Item = &'f FieldDescriptor>,
    {
        let names = self.scope_names(scoped_fields);
        values
            .iter()
            .filter(|(key, _)| names.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// The tab that contains `error_field`, walking up through nested groups.
    ///
    /// Returns `None` when the field is unknown, has no group, or its group
    /// chain ends (or loops back on itself) without reaching one of `tabs`.
    pub fn pick_active_tab_for_error<'f, I>(&self, error_field: &str, tabs: I) -> Option<String>
    where
        I: IntoIterator<Item = &'f FieldDescriptor>,
    {
        let tab_names: HashSet<&str> = tabs.into_iter().map(|tab| tab.field.as_str()).collect();

        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = error_field;
        loop {
            if !visited.insert(current) {
                warn!(field = error_field, at = current, "group chain loops, no tab selected");
                return None;
            }
            let group = self.get(current)?.group()?;
            if tab_names.contains(group) {
                trace!(field = error_field, tab = group, "error resolved to tab");
                return Some(group.to_string());
            }
            current = group;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(fields: &[&FieldDescriptor]) -> Vec<String> {
        fields.iter().map(|f| f.field.clone()).collect()
    }

    /// tabs
    ///  ├─ general (group): title, slug
    ///  └─ seo (group): meta_title, social (group): og_image
    /// plus a top-level id
    fn article_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id"),
            FieldDescriptor::new("tabs").as_group(),
            FieldDescriptor::new("general").as_group().in_group("tabs"),
            FieldDescriptor::new("seo").as_group().in_group("tabs"),
            FieldDescriptor::new("title").in_group("general"),
            FieldDescriptor::new("slug").in_group("general"),
            FieldDescriptor::new("meta_title").in_group("seo"),
            FieldDescriptor::new("social").as_group().in_group("seo"),
            FieldDescriptor::new("og_image").in_group("social"),
        ]
    }

    #[test]
    fn resolve_tabs_keeps_list_order() {
        let fields = vec![
            FieldDescriptor::new("tabs").as_group(),
            FieldDescriptor::new("a").in_group("tabs"),
            FieldDescriptor::new("b").in_group("tabs"),
        ];
        let resolver = GroupResolver::new(&fields);
        assert_eq!(names(&resolver.resolve_tabs("tabs")), vec!["a", "b"]);
    }

    #[test]
    fn resolve_tabs_unknown_group_is_empty() {
        let fields = article_fields();
        let resolver = GroupResolver::new(&fields);
        assert!(resolver.resolve_tabs("missing").is_empty());
    }

    #[test]
    fn collect_members_parent_first_then_subtrees() {
        let fields = article_fields();
        let resolver = GroupResolver::new(&fields);
        let mut visited = HashSet::new();
        let members = resolver.collect_group_members(Some("tabs"), &mut visited);
        assert_eq!(
            names(&members),
            vec!["general", "seo", "title", "slug", "meta_title", "social", "og_image"]
        );
        assert!(visited.contains("general"));
        assert!(visited.contains("seo"));
        assert!(visited.contains("social"));
    }

    #[test]
    fn collect_members_skips_already_visited_groups() {
        let fields = article_fields();
        let resolver = GroupResolver::new(&fields);
        let mut visited = HashSet::from(["seo".to_string()]);
        let members = resolver.collect_group_members(Some("tabs"), &mut visited);
        assert_eq!(names(&members), vec!["general", "seo", "title", "slug"]);
    }

    #[test]
    fn collect_members_of_none_is_top_level() {
        let fields = vec![
            FieldDescriptor::new("id"),
            FieldDescriptor::new("box").as_group(),
            FieldDescriptor::new("inner").in_group("box"),
        ];
        let resolver = GroupResolver::new(&fields);
        let members = resolver.collect_group_members(None, &mut HashSet::new());
        assert_eq!(names(&members), vec!["id", "box", "inner"]);
    }

    #[test]
    fn collect_members_terminates_on_cycle() {
        let fields = vec![
            FieldDescriptor::new("a").as_group().in_group("b"),
            FieldDescriptor::new("b").as_group().in_group("a"),
            FieldDescriptor::new("leaf").in_group("b"),
        ];
        let resolver = GroupResolver::new(&fields);
        let members = resolver.members_of("a");
        assert_eq!(names(&members), vec!["b", "a", "leaf"]);
    }

    #[test]
    fn filter_values_keeps_only_scoped_keys() {
        let fields = vec![
            FieldDescriptor::new("a"),
            FieldDescriptor::new("b"),
            FieldDescriptor::new("c"),
        ];
        let resolver = GroupResolver::new(&fields);
        let values: ValueMap = [("a", json!(1)), ("b", json!(2)), ("c", json!(3))]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let filtered = resolver.filter_values_for_scope(&values, &fields[..2]);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.get("a"), Some(&json!(1)));
        assert_eq!(filtered.get("b"), Some(&json!(2)));
        assert!(filtered.get("c").is_none());
    }

    #[test]
    fn filter_values_expands_nested_groups() {
        let fields = article_fields();
        let resolver = GroupResolver::new(&fields);
        let values: ValueMap = [
            ("id", json!(7)),
            ("title", json!("Hello")),
            ("og_image", json!("img.png")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let tabs = resolver.resolve_tabs("tabs");
        let filtered = resolver.filter_values_for_scope(&values, tabs.iter().copied());
        assert_eq!(
            filtered.keys().collect::<Vec<_>>(),
            vec!["title", "og_image"]
        );
    }

    #[test]
    fn filter_values_does_not_default_missing_keys() {
        let fields = article_fields();
        let resolver = GroupResolver::new(&fields);
        let filtered = resolver.filter_values_for_scope(&ValueMap::new(), resolver.fields());
        assert!(filtered.is_empty());
    }

    #[test]
    fn pick_tab_for_direct_member() {
        let fields = vec![
            FieldDescriptor::new("tabs").as_group(),
            FieldDescriptor::new("sectionA").as_group().in_group("tabs"),
            FieldDescriptor::new("x").in_group("sectionA"),
        ];
        let resolver = GroupResolver::new(&fields);
        let tabs = resolver.resolve_tabs("tabs");
        assert_eq!(
            resolver.pick_active_tab_for_error("x", tabs.iter().copied()),
            Some("sectionA".to_string())
        );
    }

    #[test]
    fn pick_tab_walks_up_nested_groups() {
        let fields = article_fields();
        let resolver = GroupResolver::new(&fields);
        let tabs = resolver.resolve_tabs("tabs");
        assert_eq!(
            resolver.pick_active_tab_for_error("og_image", tabs.iter().copied()),
            Some("seo".to_string())
        );
    }

    #[test]
    fn pick_tab_unknown_or_top_level_is_none() {
        let fields = article_fields();
        let resolver = GroupResolver::new(&fields);
        let tabs = resolver.resolve_tabs("tabs");
        assert_eq!(
            resolver.pick_active_tab_for_error("nope", tabs.iter().copied()),
            None
        );
        assert_eq!(
            resolver.pick_active_tab_for_error("id", tabs.iter().copied()),
            None
        );
    }

    #[test]
    fn pick_tab_dangling_group_is_none() {
        let fields = vec![
            FieldDescriptor::new("tabs").as_group(),
            FieldDescriptor::new("a").as_group().in_group("tabs"),
            FieldDescriptor::new("orphan").in_group("ghost"),
        ];
        let resolver = GroupResolver::new(&fields);
        let tabs = resolver.resolve_tabs("tabs");
        assert_eq!(
            resolver.pick_active_tab_for_error("orphan", tabs.iter().copied()),
            None
        );
    }

    #[test]
    fn pick_tab_terminates_on_cycle() {
        let fields = vec![
            FieldDescriptor::new("tabs").as_group(),
            FieldDescriptor::new("a").as_group().in_group("tabs"),
            FieldDescriptor::new("loop1").as_group().in_group("loop2"),
            FieldDescriptor::new("loop2").as_group().in_group("loop1"),
            FieldDescriptor::new("x").in_group("loop1"),
        ];
        let resolver = GroupResolver::new(&fields);
        let tabs = resolver.resolve_tabs("tabs");
        assert_eq!(
            resolver.pick_active_tab_for_error("x", tabs.iter().copied()),
            None
        );
    }

    #[test]
    fn duplicate_names_first_wins() {
        let fields = vec![
            FieldDescriptor::new("x").in_group("first"),
            FieldDescriptor::new("x").in_group("second"),
        ];
        let resolver = GroupResolver::new(&fields);
        assert_eq!(resolver.get("x").and_then(FieldDescriptor::group), Some("first"));
    }
}
