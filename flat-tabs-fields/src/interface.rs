//! Interface definition handed to the host extension registry.
//!
//! The registry only needs metadata and the option schema; alignment is a
//! layout concern and never reaches the resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INTERFACE_ID: &str = "sr-flat-tabs-interface";

/// How tab triggers are laid out along the tab list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
    Between,
    Stretch,
}

impl Align {
    pub const ALL: [Align; 5] = [
        Align::Left,
        Align::Right,
        Align::Center,
        Align::Between,
        Align::Stretch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
            Align::Center => "center",
            Align::Between => "between",
            Align::Stretch => "stretch",
        }
    }

    /// Label shown in the option dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Align::Left => "Left",
            Align::Right => "Right",
            Align::Center => "Center",
            Align::Between => "Between",
            Align::Stretch => "Stretch",
        }
    }

    /// Class applied to the tabs root, e.g. `align-left`.
    pub fn css_class(self) -> String {
        format!("align-{}", self.as_str())
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alignment '{0}', expected one of: left, right, center, between, stretch")]
pub struct ParseAlignError(pub String);

impl FromStr for Align {
    type Err = ParseAlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Align::ALL
            .into_iter()
            .find(|align| align.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAlignError(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub text: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceOptions {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionMeta {
    pub interface: String,
    pub options: ChoiceOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionSchema {
    pub default_value: String,
}

/// One configurable option of the interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceOption {
    pub field: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    pub meta: OptionMeta,
    pub schema: OptionSchema,
}

impl InterfaceOption {
    /// The "Align Tabs" select option.
    pub fn align(default: Align) -> Self {
        Self {
            field: "align".into(),
            type_: "select".into(),
            name: "Align Tabs".into(),
            meta: OptionMeta {
                interface: "select-dropdown".into(),
                options: ChoiceOptions {
                    choices: Align::ALL
                        .into_iter()
                        .map(|align| Choice {
                            text: align.label().into(),
                            value: align.as_str().into(),
                        })
                        .collect(),
                },
            },
            schema: OptionSchema {
                default_value: default.as_str().into(),
            },
        }
    }
}

/// Registration metadata for a field interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDef {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub group: String,
    pub description: String,
    pub local_types: Vec<String>,
    pub types: Vec<String>,
    pub options: Vec<InterfaceOption>,
}

impl InterfaceDef {
    /// The flat tabs group interface.
    pub fn flat_tabs(default_align: Align) -> Self {
        Self {
            id: INTERFACE_ID.into(),
            name: "Flat Tabs".into(),
            icon: "tab".into(),
            group: "group".into(),
            description: "A tab group interface as an alternative to accordion groups".into(),
            local_types: vec!["group".into()],
            types: vec!["alias".into()],
            options: vec![InterfaceOption::align(default_align)],
        }
    }
}
