//! Per-role selection state and the store that scopes edits to the active role

use crate::catalog::RoleCatalog;
use crate::prompts::compose;
use crate::types::{RoleDefinition, RoleKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Mutable selection for one role
///
/// `point_text` and `point_details` hold an entry for every point of the
/// role from creation on, so key presence doubles as the "known point" check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    task: String,
    selected_point_ids: Vec<String>,
    point_text: BTreeMap<String, String>,
    point_details: BTreeMap<String, Vec<String>>,
}

impl SelectionState {
    /// Fresh state: recommended points selected, snippets and default details seeded
    pub fn new(role: &RoleDefinition) -> Self {
        let point_text = role
            .points
            .iter()
            .map(|p| (p.id.clone(), p.snippet.clone()))
            .collect();

        let point_details = role
            .points
            .iter()
            .map(|p| {
                let mut details = Vec::new();
                for value in &p.default_details {
                    push_unique(&mut details, value);
                }
                (p.id.clone(), details)
            })
            .collect();

        Self {
            task: String::new(),
            selected_point_ids: role.recommended_points().map(|p| p.id.clone()).collect(),
            point_text,
            point_details,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    /// Selected ids in selection order (composition uses catalog order)
    pub fn selected_point_ids(&self) -> &[String] {
        &self.selected_point_ids
    }

    pub fn is_selected(&self, point_id: &str) -> bool {
        self.selected_point_ids.iter().any(|id| id == point_id)
    }

    /// Stored instruction text, unknown ids give `None`
    pub fn instruction_text(&self, point_id: &str) -> Option<&str> {
        self.point_text.get(point_id).map(String::as_str)
    }

    /// Attached details in insertion order
    pub fn details(&self, point_id: &str) -> &[String] {
        self.point_details
            .get(point_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn knows(&self, point_id: &str) -> bool {
        self.point_text.contains_key(point_id)
    }

    /// Replace the task verbatim; trimming happens at composition time
    pub fn set_task(&mut self, text: &str) -> bool {
        if self.task == text {
            return false;
        }
        self.task = text.to_string();
        true
    }

    /// Deselect if selected, otherwise append to the selection
    pub fn toggle_point(&mut self, point_id: &str) -> bool {
        if !self.knows(point_id) {
            debug!("toggle ignored for unknown point '{}'", point_id);
            return false;
        }

        if let Some(pos) = self.selected_point_ids.iter().position(|id| id == point_id) {
            self.selected_point_ids.remove(pos);
        } else {
            self.selected_point_ids.push(point_id.to_string());
        }
        true
    }

    pub fn set_instruction_text(&mut self, point_id: &str, text: &str) -> bool {
        match self.point_text.get_mut(point_id) {
            Some(current) if current != text => {
                *current = text.to_string();
                true
            }
            Some(_) => false,
            None => {
                debug!("edit ignored for unknown point '{}'", point_id);
                false
            }
        }
    }

    /// Append a trimmed, non-blank, not-yet-present detail
    pub fn add_detail(&mut self, point_id: &str, value: &str) -> bool {
        match self.point_details.get_mut(point_id) {
            Some(details) => push_unique(details, value),
            None => {
                debug!("detail ignored for unknown point '{}'", point_id);
                false
            }
        }
    }

    /// Remove an exact match, no-op when absent
    pub fn remove_detail(&mut self, point_id: &str, value: &str) -> bool {
        let Some(details) = self.point_details.get_mut(point_id) else {
            return false;
        };
        match details.iter().position(|d| d == value) {
            Some(pos) => {
                details.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Select every point of `role`, in catalog order
    pub fn select_all(&mut self, role: &RoleDefinition) -> bool {
        let all: Vec<String> = role
            .point_ids()
            .filter(|id| self.knows(id))
            .map(str::to_string)
            .collect();
        if self.selected_point_ids == all {
            return false;
        }
        self.selected_point_ids = all;
        true
    }

    pub fn clear_all(&mut self) -> bool {
        if self.selected_point_ids.is_empty() {
            return false;
        }
        self.selected_point_ids.clear();
        true
    }
}

fn push_unique(details: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || details.iter().any(|d| d == value) {
        return false;
    }
    details.push(value.to_string());
    true
}

/// One independent state per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStates {
    pub frontend: SelectionState,
    pub ppt: SelectionState,
    pub pm: SelectionState,
}

impl RoleStates {
    pub fn new(catalog: &RoleCatalog) -> Self {
        Self {
            frontend: SelectionState::new(catalog.get(RoleKey::Frontend)),
            ppt: SelectionState::new(catalog.get(RoleKey::Ppt)),
            pm: SelectionState::new(catalog.get(RoleKey::Pm)),
        }
    }

    pub fn get(&self, key: RoleKey) -> &SelectionState {
        match key {
            RoleKey::Frontend => &self.frontend,
            RoleKey::Ppt => &self.ppt,
            RoleKey::Pm => &self.pm,
        }
    }

    pub fn get_mut(&mut self, key: RoleKey) -> &mut SelectionState {
        match key {
            RoleKey::Frontend => &mut self.frontend,
            RoleKey::Ppt => &mut self.ppt,
            RoleKey::Pm => &mut self.pm,
        }
    }
}

/// Session state: catalog, active role and all per-role selections
///
/// Every mutating operation applies to the active role only and returns
/// whether anything changed.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    catalog: RoleCatalog,
    active: RoleKey,
    states: RoleStates,
}

impl SelectionStore {
    pub fn new(catalog: RoleCatalog, active: RoleKey) -> Self {
        let states = RoleStates::new(&catalog);
        Self {
            catalog,
            active,
            states,
        }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn active_key(&self) -> RoleKey {
        self.active
    }

    pub fn active_role(&self) -> &RoleDefinition {
        self.catalog.get(self.active)
    }

    pub fn active_state(&self) -> &SelectionState {
        self.states.get(self.active)
    }

    pub fn state(&self, key: RoleKey) -> &SelectionState {
        self.states.get(key)
    }

    fn current(&mut self) -> &mut SelectionState {
        self.states.get_mut(self.active)
    }

    /// Change the active role without touching any state
    pub fn switch_role(&mut self, key: RoleKey) -> bool {
        if self.active == key {
            return false;
        }
        debug!(from = %self.active, to = %key, "switch role");
        self.active = key;
        true
    }

    pub fn set_task(&mut self, text: &str) -> bool {
        self.current().set_task(text)
    }

    pub fn toggle_point(&mut self, point_id: &str) -> bool {
        let changed = self.current().toggle_point(point_id);
        if changed {
            debug!(role = %self.active, point = point_id, selected = self.active_state().is_selected(point_id), "toggle point");
        }
        changed
    }

    pub fn set_instruction_text(&mut self, point_id: &str, text: &str) -> bool {
        self.current().set_instruction_text(point_id, text)
    }

    pub fn add_detail(&mut self, point_id: &str, value: &str) -> bool {
        let changed = self.current().add_detail(point_id, value);
        if changed {
            debug!(role = %self.active, point = point_id, detail = value.trim(), "add detail");
        }
        changed
    }

    /// Add the preset option at `index` of the point's `detail_options`
    pub fn add_preset_detail(&mut self, point_id: &str, index: usize) -> bool {
        let preset = self
            .active_role()
            .point(point_id)
            .and_then(|p| p.detail_options.get(index))
            .cloned();
        match preset {
            Some(value) => self.add_detail(point_id, &value),
            None => {
                debug!("no preset #{} for point '{}'", index, point_id);
                false
            }
        }
    }

    pub fn remove_detail(&mut self, point_id: &str, value: &str) -> bool {
        let changed = self.current().remove_detail(point_id, value);
        if changed {
            debug!(role = %self.active, point = point_id, detail = value, "remove detail");
        }
        changed
    }

    pub fn select_all(&mut self) -> bool {
        let role = self.catalog.get(self.active);
        self.states.get_mut(self.active).select_all(role)
    }

    pub fn clear_all(&mut self) -> bool {
        self.current().clear_all()
    }

    /// Recreate the active role's state from the catalog
    pub fn reset_role(&mut self) -> bool {
        let fresh = SelectionState::new(self.catalog.get(self.active));
        let state = self.current();
        if *state == fresh {
            return false;
        }
        *state = fresh;
        true
    }

    /// Compose the active role; never cached
    pub fn compose(&self) -> String {
        compose(self.active_role(), self.active_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SelectionStore {
        SelectionStore::new(RoleCatalog::builtin(), RoleKey::Frontend)
    }

    #[test]
    fn test_initial_selection_is_recommended() {
        let catalog = RoleCatalog::builtin();
        for role in catalog.roles() {
            let state = SelectionState::new(role);
            let recommended: Vec<String> = role.recommended_points().map(|p| p.id.clone()).collect();
            assert_eq!(state.selected_point_ids(), recommended.as_slice());
            for point in &role.points {
                assert_eq!(state.instruction_text(&point.id), Some(point.snippet.as_str()));
                assert_eq!(state.details(&point.id), point.default_details.as_slice());
            }
            assert_eq!(state.task(), "");
        }
    }

    #[test]
    fn test_add_detail_is_idempotent() {
        let mut store = store();
        assert!(store.add_detail("perf", "lazy loading"));
        assert!(!store.add_detail("perf", "  lazy loading  "));
        assert_eq!(store.active_state().details("perf"), ["lazy loading"]);
    }

    #[test]
    fn test_blank_detail_is_ignored() {
        let mut store = store();
        let before = store.active_state().details("stack").to_vec();
        assert!(!store.add_detail("stack", ""));
        assert!(!store.add_detail("stack", "   "));
        assert_eq!(store.active_state().details("stack"), before.as_slice());
    }

    #[test]
    fn test_remove_then_add_moves_to_end() {
        let mut store = store();
        assert!(store.remove_detail("stack", "Next.js App Router"));
        assert!(store.add_detail("stack", "Next.js App Router"));
        assert_eq!(
            store.active_state().details("stack"),
            ["TypeScript", "styled-components", "Next.js App Router"]
        );
    }

    #[test]
    fn test_remove_absent_detail() {
        let mut store = store();
        assert!(!store.remove_detail("stack", "Svelte"));
        assert!(!store.remove_detail("nope", "TypeScript"));
        assert_eq!(store.active_state().details("stack").len(), 3);
    }

    #[test]
    fn test_toggle_keeps_point_edits() {
        let mut store = store();
        store.set_instruction_text("a11y", "스크린리더 우선");
        store.add_detail("a11y", "색 대비(Contrast)");

        assert!(store.toggle_point("a11y"));
        assert!(!store.active_state().is_selected("a11y"));
        assert!(store.toggle_point("a11y"));
        assert!(store.active_state().is_selected("a11y"));

        let state = store.active_state();
        assert_eq!(state.instruction_text("a11y"), Some("스크린리더 우선"));
        assert_eq!(state.details("a11y").last().map(String::as_str), Some("색 대비(Contrast)"));
    }

    #[test]
    fn test_toggle_appends_in_selection_order() {
        let mut store = store();
        store.clear_all();
        store.toggle_point("dx");
        store.toggle_point("stack");
        assert_eq!(store.active_state().selected_point_ids(), ["dx", "stack"]);
    }

    #[test]
    fn test_unknown_point_is_noop() {
        let mut store = store();
        let before = store.active_state().clone();
        assert!(!store.toggle_point("ratio"));
        assert!(!store.set_instruction_text("ratio", "x"));
        assert!(!store.add_detail("ratio", "16:9"));
        assert_eq!(store.active_state(), &before);
    }

    #[test]
    fn test_select_all_and_clear_all() {
        let mut store = store();
        store.toggle_point("dx");
        assert!(store.select_all());
        let ids: Vec<&str> = store.active_role().point_ids().collect();
        assert_eq!(store.active_state().selected_point_ids(), ids.as_slice());
        assert!(!store.select_all());

        assert!(store.clear_all());
        assert!(store.active_state().selected_point_ids().is_empty());
        assert!(!store.clear_all());
    }

    #[test]
    fn test_switch_role_isolates_state() {
        let mut store = store();
        store.set_task("로그인 폼");
        store.toggle_point("perf");
        store.add_detail("perf", "lazy loading");
        let frontend = store.active_state().clone();

        assert!(store.switch_role(RoleKey::Ppt));
        store.set_task("IR 덱");
        store.clear_all();
        store.add_detail("ratio", "4:3");
        assert!(store.switch_role(RoleKey::Frontend));

        assert_eq!(store.active_state(), &frontend);
        assert_eq!(store.state(RoleKey::Ppt).task(), "IR 덱");
        assert_eq!(store.state(RoleKey::Pm), &SelectionState::new(store.catalog().get(RoleKey::Pm)));
    }

    #[test]
    fn test_set_task_is_verbatim() {
        let mut store = store();
        assert!(store.set_task("  spaced  "));
        assert_eq!(store.active_state().task(), "  spaced  ");
        assert!(!store.set_task("  spaced  "));
    }

    #[test]
    fn test_add_preset_detail() {
        let mut store = store();
        assert!(store.add_preset_detail("perf", 3));
        assert_eq!(store.active_state().details("perf"), ["lazy loading"]);
        assert!(!store.add_preset_detail("perf", 3));
        assert!(!store.add_preset_detail("perf", 99));
    }

    #[test]
    fn test_reset_role_only_touches_active() {
        let mut store = store();
        store.set_task("폼");
        store.switch_role(RoleKey::Pm);
        store.set_task("PRD");
        assert!(store.reset_role());
        assert_eq!(store.active_state().task(), "");
        assert!(!store.reset_role());
        assert_eq!(store.state(RoleKey::Frontend).task(), "폼");
    }
}
