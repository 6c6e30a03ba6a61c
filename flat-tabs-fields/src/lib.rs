//! Group-field resolver for the flat tabs interface
//!
//! `flat-tabs-fields` answers the two questions a tab-group field asks every time
//! the enclosing form renders: which fields belong to which tab, and which tab
//! should be open. It works on the flat field list the host form hands over and
//! holds no state of its own beyond the active-tab value owned by [`TabGroup`].
//!
//! # Architecture
//!
//! - **Pure resolution**: [`GroupResolver`] indexes the field list by name and
//!   walks `meta.group` references down (members) and up (error → tab)
//! - **Cycle-safe**: both walks carry a visited set, so a malformed schema
//!   terminates instead of recursing forever
//! - **Explicit state**: [`TabGroup`] owns the active tab for one interface
//!   instance and is passed to whoever renders the tab list and panels
//! - **Snapshots on disk**: [`FormSnapshot`] loads fields, values and
//!   validation errors from YAML or JSON for tooling and tests

pub mod error;
pub mod interface;
pub mod resolver;
pub mod schema;
pub mod section;
pub mod state;
pub mod types;

pub use error::{FlatTabsError, Result};
pub use interface::{Align, InterfaceDef, InterfaceOption, ParseAlignError};
pub use resolver::GroupResolver;
pub use schema::{FieldIndex, FormSnapshot, SnapshotFormat};
pub use section::Section;
pub use state::{TabGroup, TabState};
pub use types::{FieldDescriptor, FieldMeta, ValidationError, ValueMap, GROUP_SPECIAL};
