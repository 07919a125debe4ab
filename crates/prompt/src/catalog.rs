//! Role catalog: read-only role definitions

use crate::roles::builtin_role;
use crate::types::{RoleDefinition, RoleKey};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};
use workprompt_common::{Result, WorkPromptError};

/// The three role definitions, one slot per role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    frontend: RoleDefinition,
    ppt: RoleDefinition,
    pm: RoleDefinition,
}

impl RoleCatalog {
    /// Catalog shipped with the binary
    pub fn builtin() -> Self {
        Self {
            frontend: builtin_role(RoleKey::Frontend),
            ppt: builtin_role(RoleKey::Ppt),
            pm: builtin_role(RoleKey::Pm),
        }
    }

    pub fn get(&self, key: RoleKey) -> &RoleDefinition {
        match key {
            RoleKey::Frontend => &self.frontend,
            RoleKey::Ppt => &self.ppt,
            RoleKey::Pm => &self.pm,
        }
    }

    /// Roles in display order
    pub fn roles(&self) -> impl Iterator<Item = &RoleDefinition> {
        RoleKey::ALL.into_iter().map(move |key| self.get(key))
    }

    /// Load a catalog from a JSON array of role definitions
    pub fn from_json_str(json: &str) -> Result<Self> {
        let roles: Vec<RoleDefinition> = serde_json::from_str(json)?;
        Self::from_roles(roles)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        info!("Loading role catalog from {}", path.display());
        let data = std::fs::read_to_string(path).map_err(|e| {
            WorkPromptError::catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&data)
    }

    /// Serialize as the JSON array accepted by [`RoleCatalog::from_json_str`]
    pub fn to_json_pretty(&self) -> Result<String> {
        let roles: Vec<&RoleDefinition> = self.roles().collect();
        Ok(serde_json::to_string_pretty(&roles)?)
    }

    fn from_roles(roles: Vec<RoleDefinition>) -> Result<Self> {
        let mut frontend = None;
        let mut ppt = None;
        let mut pm = None;

        for role in roles {
            validate_role(&role)?;
            let slot = match role.key {
                RoleKey::Frontend => &mut frontend,
                RoleKey::Ppt => &mut ppt,
                RoleKey::Pm => &mut pm,
            };
            if slot.is_some() {
                return Err(WorkPromptError::catalog(format!(
                    "role '{}' defined more than once",
                    role.key
                )));
            }
            debug!("Catalog role '{}' with {} points", role.key, role.points.len());
            *slot = Some(role);
        }

        let missing = |key: RoleKey| WorkPromptError::catalog(format!("role '{}' is missing", key));

        Ok(Self {
            frontend: frontend.ok_or_else(|| missing(RoleKey::Frontend))?,
            ppt: ppt.ok_or_else(|| missing(RoleKey::Ppt))?,
            pm: pm.ok_or_else(|| missing(RoleKey::Pm))?,
        })
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_role(role: &RoleDefinition) -> Result<()> {
    let mut seen = HashSet::new();

    for point in &role.points {
        if point.id.trim().is_empty() {
            return Err(WorkPromptError::catalog(format!(
                "role '{}' has a point with an empty id",
                role.key
            )));
        }
        if !seen.insert(point.id.as_str()) {
            return Err(WorkPromptError::catalog(format!(
                "role '{}' has duplicate point id '{}'",
                role.key, point.id
            )));
        }
        if point.snippet.trim().is_empty() {
            return Err(WorkPromptError::catalog(format!(
                "point '{}' of role '{}' has an empty snippet",
                point.id, role.key
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = RoleCatalog::builtin();
        for key in RoleKey::ALL {
            let role = catalog.get(key);
            assert_eq!(role.key, key);
            assert!(!role.points.is_empty());
            assert!(validate_role(role).is_ok());
        }
        assert_eq!(catalog.get(RoleKey::Frontend).label, "프론트엔드 개발자");
    }

    #[test]
    fn test_roles_in_display_order() {
        let catalog = RoleCatalog::builtin();
        let keys: Vec<RoleKey> = catalog.roles().map(|r| r.key).collect();
        assert_eq!(keys, RoleKey::ALL.to_vec());
    }

    #[test]
    fn test_json_export_reloads() {
        let catalog = RoleCatalog::builtin();
        let json = catalog.to_json_pretty().unwrap();
        assert_eq!(RoleCatalog::from_json_str(&json).unwrap(), catalog);
    }

    #[test]
    fn test_missing_role_rejected() {
        let catalog = RoleCatalog::builtin();
        let roles = vec![catalog.get(RoleKey::Frontend).clone(), catalog.get(RoleKey::Pm).clone()];
        let err = RoleCatalog::from_roles(roles).unwrap_err();
        assert!(err.to_string().contains("'ppt' is missing"));
    }

    #[test]
    fn test_duplicate_point_rejected() {
        let catalog = RoleCatalog::builtin();
        let mut frontend = catalog.get(RoleKey::Frontend).clone();
        let dup = frontend.points[0].clone();
        frontend.points.push(dup);
        let roles = vec![frontend, catalog.get(RoleKey::Ppt).clone(), catalog.get(RoleKey::Pm).clone()];
        let err = RoleCatalog::from_roles(roles).unwrap_err();
        assert!(matches!(err, WorkPromptError::Catalog(_)));
        assert!(err.to_string().contains("duplicate point id 'stack'"));
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let catalog = RoleCatalog::builtin();
        let roles = vec![
            catalog.get(RoleKey::Frontend).clone(),
            catalog.get(RoleKey::Frontend).clone(),
            catalog.get(RoleKey::Ppt).clone(),
            catalog.get(RoleKey::Pm).clone(),
        ];
        assert!(RoleCatalog::from_roles(roles).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut catalog = RoleCatalog::builtin();
        catalog.pm.label = "문서 PM".to_string();
        file.write_all(catalog.to_json_pretty().unwrap().as_bytes()).unwrap();

        let loaded = RoleCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(loaded.get(RoleKey::Pm).label, "문서 PM");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = RoleCatalog::from_json_file(Path::new("/no/such/catalog.json")).unwrap_err();
        assert!(matches!(err, WorkPromptError::Catalog(_)));
    }
}
