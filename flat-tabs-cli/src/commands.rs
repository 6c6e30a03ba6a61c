//! Subcommand implementations.

use std::path::Path;

use comfy_table::{presets::UTF8_FULL, Table};
use flat_tabs_config::load_configuration;
use flat_tabs_fields::{
    Align, FieldDescriptor, FieldIndex, FormSnapshot, GroupResolver, InterfaceDef, Section,
    TabGroup, TabState,
};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CliResult;

/// A loaded snapshot with its index and the resolved container group name.
struct Loaded {
    snapshot: FormSnapshot,
    index: FieldIndex,
    container: String,
}

async fn load(path: &Path, group: &str) -> CliResult<Loaded> {
    let snapshot = FormSnapshot::load(path).await?;
    let index = snapshot.index()?;
    let container = index.group(group)?.group_name().to_string();

    for field in index.dangling() {
        warn!(
            field = %field.field,
            group = ?field.group(),
            "field references a missing group and belongs to no tab"
        );
    }
    debug!(group, container = %container, "tab group resolved");

    Ok(Loaded {
        snapshot,
        index,
        container,
    })
}

fn member_names(resolver: &GroupResolver<'_>, tab: &FieldDescriptor) -> Vec<String> {
    if !tab.is_group() {
        return Vec::new();
    }
    resolver
        .members_of(tab.group_name())
        .into_iter()
        .map(|f| f.field.clone())
        .collect()
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header);
    table
}

#[derive(Debug, Serialize)]
struct TabRow {
    field: String,
    label: String,
    group: bool,
    members: usize,
}

/// `flat-tabs tabs`
pub async fn run_tabs(path: &Path, group: &str, json: bool) -> CliResult<String> {
    let loaded = load(path, group).await?;
    let resolver = loaded.index.resolver();

    let rows: Vec<TabRow> = resolver
        .resolve_tabs(&loaded.container)
        .into_iter()
        .map(|tab| TabRow {
            field: tab.field.clone(),
            label: tab.display_name().to_string(),
            group: tab.is_group(),
            members: member_names(&resolver, tab).len(),
        })
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut table = new_table(vec!["Tab", "Label", "Group", "Members"]);
    for row in &rows {
        table.add_row(vec![
            row.field.clone(),
            row.label.clone(),
            row.group.to_string(),
            row.members.to_string(),
        ]);
    }
    Ok(table.to_string())
}

/// `flat-tabs members`
pub async fn run_members(path: &Path, group: &str, json: bool) -> CliResult<String> {
    let loaded = load(path, group).await?;
    let resolver = loaded.index.resolver();

    let members: IndexMap<String, Vec<String>> = resolver
        .resolve_tabs(&loaded.container)
        .into_iter()
        .map(|tab| (tab.field.clone(), member_names(&resolver, tab)))
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&members)?);
    }

    let mut table = new_table(vec!["Tab", "Members"]);
    for (tab, names) in &members {
        table.add_row(vec![tab.clone(), names.join(", ")]);
    }
    Ok(table.to_string())
}

/// `flat-tabs scope`
pub async fn run_scope(path: &Path, group: &str, initial: bool) -> CliResult<String> {
    let loaded = load(path, group).await?;
    let resolver = loaded.index.resolver();

    let source = if initial {
        &loaded.snapshot.initial_values
    } else {
        &loaded.snapshot.values
    };
    let tabs = resolver.resolve_tabs(&loaded.container);
    let scoped = resolver.filter_values_for_scope(source, tabs.iter().copied());
    Ok(serde_json::to_string_pretty(&scoped)?)
}

#[derive(Debug, Serialize)]
struct TabStatus {
    field: String,
    label: String,
    state: TabState,
    edited: bool,
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ActiveReport {
    active: Option<String>,
    switched_by_error: bool,
    align_class: String,
    tabs: Vec<TabStatus>,
}

/// `flat-tabs active`
///
/// Replays one render: fields and values arrive, the user optionally picks a
/// tab, then the snapshot's validation errors come in.
pub async fn run_active(
    path: &Path,
    group: &str,
    select: Option<&str>,
    json: bool,
) -> CliResult<String> {
    let loaded = load(path, group).await?;
    let fields = loaded.index.fields();
    let snapshot = &loaded.snapshot;

    let mut state = TabGroup::new(loaded.container.clone());
    state.sync_fields(fields);
    state.sync_values(fields, &snapshot.values);
    if let Some(tab) = select {
        state.select_tab(tab);
    }
    let switched_by_error = state
        .sync_validation_errors(fields, &snapshot.validation_errors)
        .is_some();

    let align = loaded
        .index
        .group(group)?
        .meta
        .as_ref()
        .and_then(|meta| meta.extra.get("options"))
        .and_then(|options| options.get("align"))
        .and_then(|align| align.as_str())
        .and_then(|align| align.parse::<Align>().ok())
        .unwrap_or_default();

    let resolver = loaded.index.resolver();
    let tabs: Vec<TabStatus> = state
        .tabs()
        .iter()
        .map(|tab| {
            let section = Section::new(&resolver, tab);
            TabStatus {
                field: tab.field.clone(),
                label: tab.display_name().to_string(),
                state: state.tab_state(&tab.field),
                edited: section.is_edited(&snapshot.values),
                message: section.validation_message_key(&snapshot.validation_errors),
            }
        })
        .collect();

    let report = ActiveReport {
        active: state.active_tab().map(str::to_string),
        switched_by_error,
        align_class: align.css_class(),
        tabs,
    };

    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut table = new_table(vec!["Tab", "Label", "State", "Edited", "Message"]);
    for tab in &report.tabs {
        table.add_row(vec![
            tab.field.clone(),
            tab.label.clone(),
            tab.state.to_string(),
            tab.edited.to_string(),
            tab.message.clone().unwrap_or_default(),
        ]);
    }
    let active = report.active.as_deref().unwrap_or("(none)");
    Ok(format!("Active tab: {active}\n{table}"))
}

/// `flat-tabs interface`
pub fn run_interface(align: Option<Align>) -> CliResult<String> {
    let align = match align {
        Some(align) => align,
        None => load_configuration()?.align,
    };
    Ok(serde_json::to_string_pretty(&InterfaceDef::flat_tabs(align))?)
}
