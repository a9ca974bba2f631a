use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Events the daemon websocket emits, plus the ones the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
pub enum SocketEvent {
    #[strum(serialize = "auth")]
    Auth,
    #[strum(serialize = "auth success")]
    AuthSuccess,
    #[strum(serialize = "token expiring")]
    TokenExpiring,
    #[strum(serialize = "token expired")]
    TokenExpired,
    #[strum(serialize = "jwt error")]
    JwtError,
    #[strum(serialize = "daemon message")]
    DaemonMessage,
    #[strum(serialize = "daemon error")]
    DaemonError,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "stats")]
    Stats,
    #[strum(serialize = "console output")]
    ConsoleOutput,
    #[strum(serialize = "install output")]
    InstallOutput,
    #[strum(serialize = "install started")]
    InstallStarted,
    #[strum(serialize = "install completed")]
    InstallCompleted,
    #[strum(serialize = "transfer logs")]
    TransferLogs,
    #[strum(serialize = "transfer status")]
    TransferStatus,
    #[strum(serialize = "backup completed")]
    BackupCompleted,
    #[strum(serialize = "backup restore completed")]
    BackupRestoreCompleted,
    #[strum(serialize = "set state")]
    SetState,
    #[strum(serialize = "send command")]
    SendCommand,
    #[strum(serialize = "send logs")]
    SendLogs,
}

/// A frame on the daemon websocket: `{"event": "...", "args": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketMessage {
    pub event: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl SocketMessage {
    pub fn new(event: SocketEvent, args: Vec<String>) -> Self {
        SocketMessage { event: event.as_ref().to_string(), args }
    }

    pub fn auth(token: &str) -> Self {
        SocketMessage::new(SocketEvent::Auth, vec![token.to_string()])
    }

    pub fn set_state(action: PowerAction) -> Self {
        SocketMessage::new(SocketEvent::SetState, vec![action.as_ref().to_string()])
    }

    pub fn send_command(command: &str) -> Self {
        SocketMessage::new(SocketEvent::SendCommand, vec![command.to_string()])
    }

    pub fn send_logs() -> Self {
        SocketMessage::new(SocketEvent::SendLogs, vec![])
    }

    pub fn decode(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Unknown event names yield `None`; the daemon may be newer than us.
    pub fn kind(&self) -> Option<SocketEvent> {
        SocketEvent::from_str(&self.event).ok()
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PowerState {
    Offline,
    Starting,
    Running,
    Stopping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PowerAction {
    Start,
    Stop,
    Restart,
    Kill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Processing,
    Starting,
    Success,
    Completed,
    Failed,
    Cancelled,
}

/// Token problems that a fresh token fixes; anything else is fatal.
const RECOVERABLE_JWT_ERRORS: &[&str] = &[
    "jwt: exp claim is invalid",
    "jwt: created too far in past (denylist)",
];

pub fn is_recoverable_jwt_error(message: &str) -> bool {
    let message = message.to_lowercase();
    RECOVERABLE_JWT_ERRORS.iter().any(|e| message.contains(e))
}

/// Follow-up work a listener asks the view to perform after reducing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerAction {
    None,
    RefetchServer,
    RefreshToken,
    Reconnect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_daemon_frames() {
        let msg = SocketMessage::decode(r#"{"event":"status","args":["running"]}"#).unwrap();
        assert_eq!(msg.kind(), Some(SocketEvent::Status));
        assert_eq!(msg.first_arg(), Some("running"));

        let msg = SocketMessage::decode(r#"{"event":"install completed"}"#).unwrap();
        assert_eq!(msg.kind(), Some(SocketEvent::InstallCompleted));
        assert!(msg.args.is_empty());

        let msg = SocketMessage::decode(r#"{"event":"something new","args":[]}"#).unwrap();
        assert_eq!(msg.kind(), None);
    }

    #[test]
    fn encodes_client_frames() {
        assert_eq!(
            SocketMessage::auth("abc").encode().unwrap(),
            r#"{"event":"auth","args":["abc"]}"#
        );
        assert_eq!(
            SocketMessage::set_state(PowerAction::Restart).encode().unwrap(),
            r#"{"event":"set state","args":["restart"]}"#
        );
        assert_eq!(SocketMessage::send_logs().encode().unwrap(), r#"{"event":"send logs"}"#);
    }

    #[test]
    fn classifies_jwt_errors() {
        assert!(is_recoverable_jwt_error("jwt: exp claim is invalid"));
        assert!(is_recoverable_jwt_error("JWT: Created too far in past (denylist)"));
        assert!(!is_recoverable_jwt_error("jwt: signature is invalid"));
    }
}
