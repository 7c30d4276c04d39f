use crate::domain::rbac::RoleMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RbacError {
    #[error("role `{0}` is not defined for this organization")]
    UnknownRole(String),
}

/// The effective permission set for one role, recomputed on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRole {
    pub key: String,
    pub weight: i32,
    pub aggregated_permissions: Vec<String>,
}

/// Looks up `role_key` in the organization's role table and aggregates the
/// role's own permissions with those of each inherited role, in declaration
/// order. Duplicates are kept. Inherited keys with no matching role are
/// skipped; only the caller's own key missing is an error.
pub fn resolve_role(roles: &RoleMap, role_key: &str) -> Result<ResolvedRole, RbacError> {
    let role = roles
        .get(role_key)
        .ok_or_else(|| RbacError::UnknownRole(role_key.to_string()))?;

    let mut aggregated_permissions = role.permissions.clone();
    if let Some(inherits) = &role.inherits {
        for key in inherits.keys() {
            if let Some(parent) = roles.get(key) {
                aggregated_permissions.extend(parent.permissions.iter().cloned());
            }
        }
    }

    Ok(ResolvedRole {
        key: role.key.clone(),
        weight: role.weight,
        aggregated_permissions,
    })
}

impl ResolvedRole {
    /// Any-of check: passes when at least one of `required` is present in
    /// the aggregated set. Call sites that need a single permission pass a
    /// one-element slice.
    pub fn check_permissions(&self, required: &[&str]) -> bool {
        required
            .iter()
            .any(|needed| self.aggregated_permissions.iter().any(|have| have == needed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rbac::{Inherits, Role};

    fn role(key: &str, permissions: &[&str], inherits: Option<Inherits>) -> Role {
        Role {
            label: key.to_string(),
            key: key.to_string(),
            weight: 0,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            inherits,
        }
    }

    fn role_map(roles: Vec<Role>) -> RoleMap {
        roles.into_iter().map(|r| (r.key.clone(), r)).collect()
    }

    #[test]
    fn test_no_inherits_equals_own_permissions() {
        let roles = role_map(vec![role("user", &["team:view", "task:view"], None)]);

        let resolved = resolve_role(&roles, "user").unwrap();

        assert_eq!(
            vec!["team:view".to_string(), "task:view".to_string()],
            resolved.aggregated_permissions
        );
    }

    #[test]
    fn test_inherits_concatenates_in_declaration_order() {
        let roles = role_map(vec![
            role("admin", &["c", "d"], None),
            role("user", &["e"], None),
            role(
                "superuser",
                &["a", "b"],
                Some(Inherits::Many(vec![
                    "admin".to_string(),
                    "user".to_string(),
                ])),
            ),
        ]);

        let resolved = resolve_role(&roles, "superuser").unwrap();

        assert_eq!(
            vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
                "e".to_string()
            ],
            resolved.aggregated_permissions
        );
    }

    #[test]
    fn test_inherits_single_key() {
        let roles = role_map(vec![
            role("admin", &["a"], None),
            role(
                "superuser",
                &["b"],
                Some(Inherits::One("admin".to_string())),
            ),
        ]);

        let resolved = resolve_role(&roles, "superuser").unwrap();

        assert_eq!(
            vec!["b".to_string(), "a".to_string()],
            resolved.aggregated_permissions
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let roles = role_map(vec![
            role("admin", &["a"], None),
            role("superuser", &["a"], Some(Inherits::One("admin".to_string()))),
        ]);

        let resolved = resolve_role(&roles, "superuser").unwrap();

        assert_eq!(
            vec!["a".to_string(), "a".to_string()],
            resolved.aggregated_permissions
        );
    }

    #[test]
    fn test_unknown_inherited_key_is_skipped() {
        let roles = role_map(vec![role(
            "superuser",
            &["a"],
            Some(Inherits::Many(vec!["ghost".to_string()])),
        )]);

        let resolved = resolve_role(&roles, "superuser").unwrap();

        assert_eq!(vec!["a".to_string()], resolved.aggregated_permissions);
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let roles = role_map(vec![role("user", &[], None)]);

        let result = resolve_role(&roles, "ghost");

        assert_eq!(Err(RbacError::UnknownRole("ghost".to_string())), result);
    }

    #[test]
    fn test_check_permissions_single() {
        let resolved = ResolvedRole {
            key: "user".to_string(),
            weight: 0,
            aggregated_permissions: vec!["x".to_string()],
        };

        assert!(resolved.check_permissions(&["x"]));
        assert!(!resolved.check_permissions(&["y"]));
    }

    #[test]
    fn test_check_permissions_any_of() {
        let resolved = ResolvedRole {
            key: "user".to_string(),
            weight: 0,
            aggregated_permissions: vec!["x".to_string()],
        };

        assert!(resolved.check_permissions(&["x", "y"]));
        assert!(resolved.check_permissions(&["y", "x"]));
        assert!(!resolved.check_permissions(&["y", "z"]));
    }

    #[test]
    fn test_check_permissions_empty_required_fails() {
        let resolved = ResolvedRole {
            key: "user".to_string(),
            weight: 0,
            aggregated_permissions: vec!["x".to_string()],
        };

        assert!(!resolved.check_permissions(&[]));
    }
}
