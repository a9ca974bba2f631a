use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use super::FractalList;

/// Lifecycle status reported by the panel for a server that is not simply
/// available. `None` on the server means it is usable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServerStatus {
    Installing,
    InstallFailed,
    ReinstallFailed,
    Suspended,
    RestoringBackup,
    /// A status this client does not know yet. Still blocks the server.
    #[serde(other)]
    Unknown,
}

impl ServerStatus {
    pub fn is_installing(self) -> bool {
        matches!(
            self,
            ServerStatus::Installing | ServerStatus::InstallFailed | ServerStatus::ReinstallFailed
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLimits {
    pub memory: u64,
    pub swap: i64,
    pub disk: u64,
    pub io: u64,
    pub cpu: u64,
    #[serde(default)]
    pub threads: Option<String>,
    #[serde(default)]
    pub oom_disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLimits {
    pub databases: u32,
    pub allocations: u32,
    pub backups: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SftpDetails {
    pub ip: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: u32,
    pub ip: String,
    #[serde(default)]
    pub ip_alias: Option<String>,
    pub port: u16,
    #[serde(default)]
    pub notes: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRelationships {
    #[serde(default)]
    pub allocations: Option<FractalList<Allocation>>,
}

/// Server attributes as returned by `GET /api/client/servers/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Short identifier used in URLs.
    #[serde(rename = "identifier")]
    pub id: String,
    pub uuid: Uuid,
    pub internal_id: u32,
    pub egg_id: u32,
    pub name: String,
    pub node: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<ServerStatus>,
    #[serde(default)]
    pub is_transferring: bool,
    #[serde(default)]
    pub is_node_under_maintenance: bool,
    #[serde(default)]
    pub invocation: String,
    #[serde(default)]
    pub docker_image: String,
    #[serde(default)]
    pub sftp_details: Option<SftpDetails>,
    #[serde(default)]
    pub limits: ServerLimits,
    #[serde(default)]
    pub feature_limits: FeatureLimits,
    #[serde(default)]
    pub egg_features: Vec<String>,
    #[serde(default)]
    pub relationships: ServerRelationships,
}

impl Server {
    pub fn allocations(&self) -> Vec<Allocation> {
        self.relationships
            .allocations
            .as_ref()
            .map(|list| list.data.iter().map(|item| item.attributes.clone()).collect())
            .unwrap_or_default()
    }

    pub fn default_allocation(&self) -> Option<Allocation> {
        self.allocations().into_iter().find(|a| a.is_default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMeta {
    #[serde(default)]
    pub is_server_owner: bool,
    #[serde(default)]
    pub user_permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub object: String,
    pub attributes: Server,
    #[serde(default)]
    pub meta: ServerMeta,
}

impl ServerResponse {
    /// Owners hold every permission regardless of what the list says.
    pub fn into_parts(self) -> (Server, Vec<String>) {
        let permissions = if self.meta.is_server_owner {
            vec!["*".to_string()]
        } else {
            self.meta.user_permissions
        };
        (self.attributes, permissions)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    fn fixture(status: serde_json::Value, owner: bool) -> serde_json::Value {
        json!({
            "object": "server",
            "attributes": {
                "identifier": "1a7ce997",
                "uuid": "1a7ce997-259b-452e-8b4e-cecc464142ca",
                "internal_id": 12,
                "egg_id": 5,
                "name": "Survival",
                "node": "node-eu-1",
                "status": status,
                "is_transferring": false,
                "limits": { "memory": 2048, "swap": 0, "disk": 10240, "io": 500, "cpu": 200 },
                "relationships": {
                    "allocations": {
                        "object": "list",
                        "data": [
                            { "object": "allocation", "attributes": {
                                "id": 3, "ip": "10.0.0.2", "port": 25565, "is_default": true } },
                            { "object": "allocation", "attributes": {
                                "id": 4, "ip": "10.0.0.2", "port": 25566, "is_default": false } }
                        ]
                    }
                }
            },
            "meta": { "is_server_owner": owner, "user_permissions": ["file.read", "file.create"] }
        })
    }

    #[test]
    fn decodes_identity_fields() {
        let response: ServerResponse = serde_json::from_value(fixture(json!(null), false)).unwrap();
        let server = &response.attributes;
        assert_eq!(server.id, "1a7ce997");
        assert_eq!(server.internal_id, 12);
        assert_eq!(server.egg_id, 5);
        assert_eq!(server.status, None);
        assert_eq!(server.default_allocation().map(|a| a.port), Some(25565));
    }

    #[test]
    fn decodes_lifecycle_status() {
        let response: ServerResponse =
            serde_json::from_value(fixture(json!("restoring_backup"), false)).unwrap();
        assert_eq!(response.attributes.status, Some(ServerStatus::RestoringBackup));
        assert_eq!(ServerStatus::from_str("install_failed").unwrap(), ServerStatus::InstallFailed);
        assert!(ServerStatus::ReinstallFailed.is_installing());
        assert!(!ServerStatus::Suspended.is_installing());
    }

    #[test]
    fn unknown_status_still_decodes() {
        let response: ServerResponse =
            serde_json::from_value(fixture(json!("reinstalling"), false)).unwrap();
        assert_eq!(response.attributes.status, Some(ServerStatus::Unknown));
    }

    #[test]
    fn owner_gets_wildcard_permission() {
        let response: ServerResponse = serde_json::from_value(fixture(json!(null), true)).unwrap();
        let (_, permissions) = response.into_parts();
        assert_eq!(permissions, vec!["*".to_string()]);

        let response: ServerResponse = serde_json::from_value(fixture(json!(null), false)).unwrap();
        let (_, permissions) = response.into_parts();
        assert_eq!(permissions, vec!["file.read", "file.create"]);
    }
}
