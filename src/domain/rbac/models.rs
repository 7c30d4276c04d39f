use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-organization role table, keyed by role key.
pub type RoleMap = BTreeMap<String, Role>;

/// A role may inherit from a single role key or a list of them. The list
/// order is the order in which inherited permissions are aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inherits {
    One(String),
    Many(Vec<String>),
}

impl Inherits {
    pub fn keys(&self) -> &[String] {
        match self {
            Inherits::One(key) => std::slice::from_ref(key),
            Inherits::Many(keys) => keys.as_slice(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub label: String,
    pub key: String,
    pub weight: i32,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<Inherits>,
}

/// Role table seeded into a new organization. The creator gets `owner`.
pub fn default_role_map() -> RoleMap {
    let mut roles = RoleMap::new();
    roles.insert(
        "owner".to_string(),
        Role {
            label: "Owner".to_string(),
            key: "owner".to_string(),
            weight: 100,
            permissions: vec!["org:delete".to_string(), "org:transfer".to_string()],
            inherits: Some(Inherits::One("admin".to_string())),
        },
    );
    roles.insert(
        "admin".to_string(),
        Role {
            label: "Administrator".to_string(),
            key: "admin".to_string(),
            weight: 50,
            permissions: vec![
                "org:update".to_string(),
                "role:manage".to_string(),
                "member:manage".to_string(),
                "member:invite".to_string(),
                "team:manage".to_string(),
                "task:manage".to_string(),
            ],
            inherits: Some(Inherits::One("user".to_string())),
        },
    );
    roles.insert(
        "user".to_string(),
        Role {
            label: "User".to_string(),
            key: "user".to_string(),
            weight: 10,
            permissions: vec![
                "team:view".to_string(),
                "task:view".to_string(),
                "timeclock:use".to_string(),
            ],
            inherits: None,
        },
    );

    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherits_deserializes_from_string() {
        let role: Role = serde_json::from_str(
            r#"{"label":"Superuser","key":"superuser","weight":60,"permissions":["b"],"inherits":"admin"}"#,
        )
        .unwrap();

        assert_eq!(Some(Inherits::One("admin".to_string())), role.inherits);
    }

    #[test]
    fn test_inherits_deserializes_from_array() {
        let role: Role = serde_json::from_str(
            r#"{"label":"Superuser","key":"superuser","weight":60,"inherits":["admin","user"]}"#,
        )
        .unwrap();

        assert_eq!(
            Some(Inherits::Many(vec![
                "admin".to_string(),
                "user".to_string()
            ])),
            role.inherits
        );
        assert!(role.permissions.is_empty());
    }

    #[test]
    fn test_default_role_map_keys_are_consistent() {
        let roles = default_role_map();

        for (key, role) in &roles {
            assert_eq!(key, &role.key);
        }
    }
}
