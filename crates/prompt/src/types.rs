use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use workprompt_common::WorkPromptError;

/// Professional role a prompt is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKey {
    /// Frontend developer
    Frontend,
    /// Presentation (PPT) designer
    Ppt,
    /// Document-writing project manager
    Pm,
}

impl RoleKey {
    /// All roles in display order
    pub const ALL: [RoleKey; 3] = [RoleKey::Frontend, RoleKey::Ppt, RoleKey::Pm];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKey::Frontend => "frontend",
            RoleKey::Ppt => "ppt",
            RoleKey::Pm => "pm",
        }
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleKey {
    type Err = WorkPromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(RoleKey::Frontend),
            "ppt" => Ok(RoleKey::Ppt),
            "pm" => Ok(RoleKey::Pm),
            other => Err(WorkPromptError::unknown_role(other)),
        }
    }
}

/// Selectable concern that contributes an instruction block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePoint {
    /// Unique within its role
    pub id: String,

    /// Display label, also the block title in the prompt
    pub label: String,

    /// Short hint shown next to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default instruction text
    pub snippet: String,

    /// Selected in a fresh state
    #[serde(default)]
    pub recommended: bool,

    /// Preset detail tags offered for this point
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail_options: Vec<String>,

    /// Details attached in a fresh state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_details: Vec<String>,
}

/// Static description of one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub key: RoleKey,
    pub label: String,
    pub emoji: String,
    pub help: String,
    pub task_placeholder: String,
    pub base_rules: Vec<String>,
    pub output_rules: Vec<String>,
    pub points: Vec<RolePoint>,
}

impl RoleDefinition {
    /// Look up a point by id
    pub fn point(&self, id: &str) -> Option<&RolePoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn contains_point(&self, id: &str) -> bool {
        self.point(id).is_some()
    }

    /// Point ids in catalog order
    pub fn point_ids(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.id.as_str())
    }

    /// Points flagged as recommended, in catalog order
    pub fn recommended_points(&self) -> impl Iterator<Item = &RolePoint> {
        self.points.iter().filter(|p| p.recommended)
    }
}
