//! workprompt core
//!
//! Role catalog, per-role selection state and prompt composition

mod catalog;
mod prompts;
mod roles;
mod state;
mod types;

pub use catalog::RoleCatalog;
pub use prompts::{
    compose, effective_instruction, effective_task, points_section, role_intro, BASE_RULES_HEADER, CLOSING_LINE,
    NO_POINTS_LINE, OUTPUT_RULES_HEADER, POINTS_HEADER, USER_REQUEST_HEADER,
};
pub use state::{RoleStates, SelectionState, SelectionStore};
pub use types::{RoleDefinition, RoleKey, RolePoint};
