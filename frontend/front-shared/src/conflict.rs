use shared::models::{Server, ServerStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Normal,
    Conflicted,
}

/// Decides whether the conflict screen replaces the routed sub-views.
///
/// Root admins can always open the overview (`.../server/{id}`) of a
/// conflicted server; every other conflicted path is blocked for everyone.
pub fn conflict_gate(in_conflict: bool, root_admin: bool, pathname: &str, server_id: &str) -> GateState {
    if !in_conflict {
        return GateState::Normal;
    }
    let overview = format!("/server/{server_id}");
    if root_admin && pathname.ends_with(&overview) {
        GateState::Normal
    } else {
        GateState::Conflicted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    Installing,
    Suspended,
    NodeMaintenance,
    Transferring,
    RestoringBackup,
    Unavailable,
}

impl ConflictReason {
    pub fn of(server: &Server) -> Option<Self> {
        match server.status {
            Some(status) if status.is_installing() => Some(ConflictReason::Installing),
            Some(ServerStatus::Suspended) => Some(ConflictReason::Suspended),
            _ if server.is_node_under_maintenance => Some(ConflictReason::NodeMaintenance),
            _ if server.is_transferring => Some(ConflictReason::Transferring),
            Some(ServerStatus::RestoringBackup) => Some(ConflictReason::RestoringBackup),
            Some(_) => Some(ConflictReason::Unavailable),
            None => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ConflictReason::Installing => "Running Installer",
            ConflictReason::Suspended => "Server Suspended",
            ConflictReason::NodeMaintenance => "Node under Maintenance",
            ConflictReason::Transferring => "Transferring",
            ConflictReason::RestoringBackup => "Restoring from Backup",
            ConflictReason::Unavailable => "Server Unavailable",
        }
    }

    pub fn image(self) -> &'static str {
        match self {
            ConflictReason::Installing => "/public/server_installing.svg",
            ConflictReason::Suspended | ConflictReason::NodeMaintenance => "/public/server_error.svg",
            _ => "/public/server_restore.svg",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConflictReason::Installing => {
                "Your server should be ready soon, please try again in a few minutes."
            }
            ConflictReason::Suspended => "This server is suspended and cannot be accessed.",
            ConflictReason::NodeMaintenance => {
                "The node of this server is currently under maintenance and all actions are unavailable."
            }
            ConflictReason::Transferring => {
                "Your server is being transferred to a new node, please check back later."
            }
            ConflictReason::RestoringBackup => {
                "Your server is currently being restored from a backup, please check back in a few minutes."
            }
            ConflictReason::Unavailable => {
                "This server is currently unavailable, please check back in a few minutes."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(status: Option<ServerStatus>, transferring: bool, maintenance: bool) -> Server {
        let mut server: Server = serde_json::from_value(serde_json::json!({
            "identifier": "abc",
            "uuid": "1a7ce997-259b-452e-8b4e-cecc464142ca",
            "internal_id": 12,
            "egg_id": 5,
            "name": "Survival",
            "node": "node-eu-1"
        }))
        .unwrap();
        server.status = status;
        server.is_transferring = transferring;
        server.is_node_under_maintenance = maintenance;
        server
    }

    #[test]
    fn reason_for_each_status() {
        let cases = [
            (ServerStatus::Installing, ConflictReason::Installing),
            (ServerStatus::InstallFailed, ConflictReason::Installing),
            (ServerStatus::ReinstallFailed, ConflictReason::Installing),
            (ServerStatus::Suspended, ConflictReason::Suspended),
            (ServerStatus::RestoringBackup, ConflictReason::RestoringBackup),
            (ServerStatus::Unknown, ConflictReason::Unavailable),
        ];
        for (status, reason) in cases {
            assert_eq!(ConflictReason::of(&server(Some(status), false, false)), Some(reason));
        }
        assert_eq!(ConflictReason::of(&server(None, false, false)), None);
        assert_eq!(
            ConflictReason::of(&server(None, true, false)),
            Some(ConflictReason::Transferring)
        );
    }

    #[test]
    fn blocked_servers_use_the_error_image() {
        assert_eq!(ConflictReason::Suspended.image(), "/public/server_error.svg");
        assert_eq!(ConflictReason::NodeMaintenance.image(), "/public/server_error.svg");
        assert_eq!(ConflictReason::Installing.image(), "/public/server_installing.svg");
        assert_eq!(ConflictReason::Transferring.image(), "/public/server_restore.svg");
    }

    #[test]
    fn reason_precedence() {
        assert_eq!(
            ConflictReason::of(&server(Some(ServerStatus::Suspended), true, false)),
            Some(ConflictReason::Suspended)
        );
        assert_eq!(
            ConflictReason::of(&server(None, true, true)),
            Some(ConflictReason::NodeMaintenance)
        );
        assert_eq!(
            ConflictReason::of(&server(Some(ServerStatus::RestoringBackup), true, false)),
            Some(ConflictReason::Transferring)
        );
    }

    #[test]
    fn normal_when_not_conflicted() {
        assert_eq!(conflict_gate(false, false, "/server/abc/files", "abc"), GateState::Normal);
    }

    #[test]
    fn blocks_every_path_for_regular_users() {
        for path in ["/server/abc", "/server/abc/files", "/server/abc/"] {
            assert_eq!(conflict_gate(true, false, path, "abc"), GateState::Conflicted);
        }
    }

    #[test]
    fn root_admin_keeps_overview() {
        assert_eq!(conflict_gate(true, true, "/server/abc", "abc"), GateState::Normal);
        assert_eq!(conflict_gate(true, true, "/server/abc/files", "abc"), GateState::Conflicted);
    }
}
