//! Non-interactive rendering and role listings

use crate::clipboard::{Clipboard, CopyOutcome};
use serde::Serialize;
use std::fmt::Write as _;
use std::io;
use tracing::warn;
use workprompt_common::{Result, WorkPromptError};
use workprompt_prompt::{RoleCatalog, RoleKey, SelectionState, SelectionStore};

/// Selections for a one-shot render
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub role: RoleKey,
    pub task: String,
    pub points: Vec<String>,
    pub no_defaults: bool,
    pub all: bool,
    pub details: Vec<(String, String)>,
    pub instructions: Vec<(String, String)>,
}

impl RenderRequest {
    /// Apply the request to a fresh store
    ///
    /// Unknown point ids are skipped with a warning.
    pub fn build(&self, catalog: RoleCatalog) -> SelectionStore {
        let mut store = SelectionStore::new(catalog, self.role);
        store.set_task(&self.task);

        if self.no_defaults {
            store.clear_all();
        }
        if self.all {
            store.select_all();
        }

        for point in &self.points {
            if !store.active_role().contains_point(point) {
                warn!("Skipping unknown point '{}' for role '{}'", point, self.role);
                continue;
            }
            if !store.active_state().is_selected(point) {
                store.toggle_point(point);
            }
        }

        for (point, text) in &self.instructions {
            if !store.set_instruction_text(point, text) && !store.active_role().contains_point(point) {
                warn!("Skipping instruction for unknown point '{}'", point);
            }
        }

        for (point, value) in &self.details {
            if !store.add_detail(point, value) && !store.active_role().contains_point(point) {
                warn!("Skipping detail for unknown point '{}'", point);
            }
        }

        store
    }
}

/// Split `ID=VALUE` arguments
pub fn parse_pairs(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|item| match item.split_once('=') {
            Some((id, value)) if !id.trim().is_empty() => {
                Ok((id.trim().to_string(), value.to_string()))
            }
            _ => Err(WorkPromptError::invalid_input(format!(
                "expected ID=VALUE, got '{}'",
                item
            ))),
        })
        .collect()
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    role: RoleKey,
    prompt: &'a str,
    state: &'a SelectionState,
}

/// JSON document with the prompt and the state it came from
pub fn to_json(store: &SelectionStore, prompt: &str) -> Result<String> {
    let output = RenderOutput {
        role: store.active_key(),
        prompt,
        state: store.active_state(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Print `output`, then copy `prompt` when a clipboard is given
///
/// `out` receives nothing but `output`; the acknowledgement goes to `status`.
pub fn emit<O, S>(
    output: &str,
    prompt: &str,
    clipboard: Option<&Clipboard>,
    out: &mut O,
    status: &mut S,
) -> Result<Option<CopyOutcome>>
where
    O: io::Write,
    S: io::Write,
{
    writeln!(out, "{}", output)?;
    out.flush()?;

    let Some(clipboard) = clipboard else {
        return Ok(None);
    };
    let outcome = clipboard.copy(prompt);
    if outcome.copied() {
        writeln!(status, "✅ 복사됨")?;
    }
    Ok(Some(outcome))
}

/// Human-readable catalog overview
pub fn roles_listing(catalog: &RoleCatalog, only: Option<RoleKey>) -> String {
    let mut out = String::new();

    for role in catalog.roles().filter(|r| only.map_or(true, |k| k == r.key)) {
        let _ = writeln!(out, "{} {} ({})", role.emoji, role.label, role.key);
        let _ = writeln!(out, "  {}", role.help);
        for point in &role.points {
            let badge = if point.recommended { " *" } else { "" };
            let _ = write!(out, "  - {}: {}{}", point.id, point.label, badge);
            if let Some(desc) = &point.description {
                let _ = write!(out, " ({})", desc);
            }
            out.push('\n');
            if !point.detail_options.is_empty() {
                let _ = writeln!(out, "      옵션: {}", point.detail_options.join(" | "));
            }
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}
