use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user, injected by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelUser {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub root_admin: bool,
}

impl Default for PanelUser {
    fn default() -> Self {
        PanelUser {
            uuid: Uuid::nil(),
            username: String::new(),
            email: String::new(),
            root_admin: false,
        }
    }
}
