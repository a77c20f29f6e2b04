//! Directory group to application role mapping

use tracing::{debug, info};

pub const FULL_ACCESS: &str = "Full access";
pub const READ_ONLY: &str = "Read only";

const GROUP_ROLES: &[(&str, &str)] = &[("scientists", FULL_ACCESS), ("mathematicians", READ_ONLY)];

/// Role granted by membership in `group`, if any. Names match exactly.
pub fn role_for_group(group: &str) -> Option<&'static str> {
    GROUP_ROLES
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, role)| *role)
}

/// Map groups to roles, keeping directory order and dropping duplicates.
/// Groups without a role are ignored.
pub fn map_groups_to_roles(username: &str, groups: &[String]) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();

    for group in groups {
        match role_for_group(group) {
            Some(role) => {
                info!("User {} is in group {} and gets role: {}", username, group, role);
                if !roles.iter().any(|r| r == role) {
                    roles.push(role.to_string());
                }
            }
            None => debug!("Ignoring group: {}", group),
        }
    }

    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_groups() {
        assert_eq!(role_for_group("scientists"), Some(FULL_ACCESS));
        assert_eq!(role_for_group("mathematicians"), Some(READ_ONLY));
        assert_eq!(role_for_group("chemists"), None);
        assert_eq!(role_for_group("Scientists"), None);
    }

    #[test]
    fn test_mapping_keeps_order_and_dedups() {
        let roles = map_groups_to_roles(
            "tesla",
            &groups(&["italians", "mathematicians", "scientists", "mathematicians"]),
        );
        assert_eq!(roles, vec![READ_ONLY, FULL_ACCESS]);
    }

    #[test]
    fn test_no_qualifying_group() {
        assert!(map_groups_to_roles("curie", &groups(&["chemists"])).is_empty());
        assert!(map_groups_to_roles("nobody", &[]).is_empty());
    }
}
