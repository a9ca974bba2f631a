use serde::{Deserialize, Serialize};

pub const WILDCARD: &str = "*";

/// Permission strings the current user holds on the viewed server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions(Vec<String>);

impl Permissions {
    pub fn new(permissions: Vec<String>) -> Self {
        Permissions(permissions)
    }

    /// Root admins see everything, whatever the server handed out.
    pub fn for_viewer(permissions: Vec<String>, root_admin: bool) -> Self {
        if root_admin {
            Permissions(vec![WILDCARD.to_string()])
        } else {
            Permissions(permissions)
        }
    }

    fn holds(&self, action: &str) -> bool {
        if self.0.iter().any(|p| p == WILDCARD) {
            return true;
        }
        match action.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('.') => self.0.iter().any(|p| p.starts_with(prefix)),
            _ => self.0.iter().any(|p| p == action),
        }
    }

    /// `match_any` passes when at least one action is held, otherwise every
    /// action must be. An empty action list never passes.
    pub fn can<S: AsRef<str>>(&self, actions: &[S], match_any: bool) -> bool {
        if actions.is_empty() {
            return false;
        }
        let mut held = actions.iter().map(|action| self.holds(action.as_ref()));
        if match_any { held.any(|h| h) } else { held.all(|h| h) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(list: &[&str]) -> Permissions {
        Permissions::new(list.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = perms(&["*"]);
        assert!(p.can(&["file.read", "backup.create"], false));
    }

    #[test]
    fn wildcard_counts_in_any_position() {
        let p = perms(&["file.read", "*"]);
        assert!(p.can(&["user.*"], true));
    }

    #[test]
    fn group_wildcard_matches_prefix() {
        let p = perms(&["file.read", "database.view"]);
        assert!(p.can(&["file.*"], true));
        assert!(!p.can(&["schedule.*"], true));
        // "files.x" must not satisfy "file.*"
        assert!(!perms(&["files.read"]).can(&["file.*"], true));
    }

    #[test]
    fn match_any_versus_all() {
        let p = perms(&["file.sftp"]);
        assert!(p.can(&["settings.*", "file.sftp"], true));
        assert!(!p.can(&["settings.*", "file.sftp"], false));
    }

    #[test]
    fn root_admin_overrides_list() {
        let p = Permissions::for_viewer(vec![], true);
        assert!(p.can(&["user.*"], true));
        assert!(!Permissions::for_viewer(vec![], false).can(&["user.*"], true));
    }
}
