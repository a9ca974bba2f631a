use std::collections::VecDeque;
use std::str::FromStr;

use shared::models::{Server, ServerStatus};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::SOCKET_CONSOLE_LIMIT;
use crate::permissions::Permissions;
use crate::socket::{
    ListenerAction, PowerState, SocketEvent, SocketMessage, TransferStatus, is_recoverable_jwt_error,
};

/// Identifiers of the server currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub id: String,
    pub uuid: Uuid,
    pub internal_id: u32,
    pub egg_id: u32,
}

/// Ticket handed out when a fetch starts. Results carrying an outdated
/// ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchGeneration(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketError {
    Connecting,
    Fatal(String),
}

impl SocketError {
    pub fn message(&self) -> &str {
        match self {
            SocketError::Connecting => {
                "We're having some trouble connecting to your server, please wait..."
            }
            SocketError::Fatal(message) => message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketState {
    pub connected: bool,
    pub error: Option<SocketError>,
}

/// Everything the server view and its listeners share about the viewed
/// server. A single instance lives in the UI context; mutation goes through
/// the methods below.
#[derive(Debug, Clone, Default)]
pub struct ServerState {
    data: Option<Server>,
    permissions: Vec<String>,
    power: Option<PowerState>,
    console: VecDeque<String>,
    socket: SocketState,
    generation: u64,
}

impl ServerState {
    pub fn server(&self) -> Option<&Server> {
        self.data.as_ref()
    }

    pub fn identity(&self) -> Option<ServerIdentity> {
        self.data.as_ref().map(|s| ServerIdentity {
            id: s.id.clone(),
            uuid: s.uuid,
            internal_id: s.internal_id,
            egg_id: s.egg_id,
        })
    }

    /// Both the short id and the uuid are known.
    pub fn is_ready(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|s| !s.id.is_empty() && !s.uuid.is_nil())
    }

    pub fn in_conflict_state(&self) -> bool {
        self.data.as_ref().is_some_and(|s| {
            s.status.is_some() || s.is_transferring || s.is_node_under_maintenance
        })
    }

    pub fn permissions(&self, root_admin: bool) -> Permissions {
        Permissions::for_viewer(self.permissions.clone(), root_admin)
    }

    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    pub fn console(&self) -> impl Iterator<Item = &str> {
        self.console.iter().map(String::as_str)
    }

    pub fn socket(&self) -> &SocketState {
        &self.socket
    }

    pub fn generation(&self) -> FetchGeneration {
        FetchGeneration(self.generation)
    }

    /// Drops everything known about the server and invalidates fetches that
    /// are still in flight.
    pub fn clear(&mut self) {
        debug!(generation = self.generation, "clearing server state");
        self.data = None;
        self.permissions.clear();
        self.power = None;
        self.console.clear();
        self.socket = SocketState::default();
        self.generation += 1;
    }

    /// Clears the state and returns the ticket for the fetch about to start.
    pub fn begin_fetch(&mut self) -> FetchGeneration {
        self.clear();
        self.generation()
    }

    pub fn set_server(&mut self, server: Server, permissions: Vec<String>) {
        self.data = Some(server);
        self.permissions = permissions;
    }

    /// Stores a fetch result if it belongs to the current generation.
    /// Returns whether it was applied.
    pub fn apply_fetch(
        &mut self,
        generation: FetchGeneration,
        server: Server,
        permissions: Vec<String>,
    ) -> bool {
        if generation.0 != self.generation {
            debug!(
                stale = generation.0,
                current = self.generation,
                "discarding stale server fetch"
            );
            return false;
        }
        self.set_server(server, permissions);
        true
    }

    pub fn set_install_status(&mut self, status: Option<ServerStatus>) {
        if let Some(server) = self.data.as_mut() {
            server.status = status;
        }
    }

    pub fn set_transferring(&mut self, transferring: bool) {
        if let Some(server) = self.data.as_mut() {
            server.is_transferring = transferring;
        }
    }

    pub fn set_power_state(&mut self, power: Option<PowerState>) {
        self.power = power;
    }

    pub fn push_console_line(&mut self, line: &str) {
        if self.console.len() == SOCKET_CONSOLE_LIMIT {
            self.console.pop_front();
        }
        self.console.push_back(line.to_string());
    }

    pub fn set_socket_connected(&mut self, connected: bool) {
        self.socket.connected = connected;
        if connected {
            self.socket.error = None;
        }
    }

    pub fn set_socket_error(&mut self, error: Option<SocketError>) {
        self.socket.error = error;
    }

    /// Install lifecycle: the daemon tells us when an install starts or
    /// ends and when a backup restore finishes.
    pub fn apply_install_event(&mut self, message: &SocketMessage) -> ListenerAction {
        match message.kind() {
            Some(SocketEvent::InstallStarted) => {
                self.set_install_status(Some(ServerStatus::Installing));
                ListenerAction::None
            }
            Some(SocketEvent::InstallCompleted) => ListenerAction::RefetchServer,
            Some(SocketEvent::BackupRestoreCompleted) => {
                self.set_install_status(None);
                ListenerAction::None
            }
            _ => ListenerAction::None,
        }
    }

    /// Transfer lifecycle: pending/processing marks the server as moving,
    /// a failure unmarks it and completion reloads it from the API.
    pub fn apply_transfer_event(&mut self, message: &SocketMessage) -> ListenerAction {
        if message.kind() != Some(SocketEvent::TransferStatus) {
            return ListenerAction::None;
        }
        match message.first_arg().and_then(|s| TransferStatus::from_str(s).ok()) {
            Some(TransferStatus::Pending | TransferStatus::Processing) => {
                self.set_transferring(true);
                ListenerAction::None
            }
            Some(TransferStatus::Failed) => {
                self.set_transferring(false);
                ListenerAction::None
            }
            Some(TransferStatus::Completed) => ListenerAction::RefetchServer,
            _ => ListenerAction::None,
        }
    }

    /// Connection-level events handled by the websocket itself.
    pub fn apply_connection_event(&mut self, message: &SocketMessage) -> ListenerAction {
        match message.kind() {
            Some(SocketEvent::AuthSuccess) => {
                self.set_socket_connected(true);
                ListenerAction::None
            }
            Some(SocketEvent::Status) => {
                let power = message.first_arg().and_then(|s| PowerState::from_str(s).ok());
                self.set_power_state(power);
                ListenerAction::None
            }
            Some(SocketEvent::ConsoleOutput | SocketEvent::InstallOutput | SocketEvent::TransferLogs) => {
                for line in &message.args {
                    self.push_console_line(line);
                }
                ListenerAction::None
            }
            Some(SocketEvent::DaemonError) => {
                warn!(message = ?message.first_arg(), "got error message from daemon socket");
                ListenerAction::None
            }
            Some(SocketEvent::TokenExpiring | SocketEvent::TokenExpired) => ListenerAction::RefreshToken,
            Some(SocketEvent::JwtError) => {
                self.set_socket_connected(false);
                let error = message.first_arg().unwrap_or_default();
                warn!(error, "jwt validation error from daemon");
                if is_recoverable_jwt_error(error) {
                    ListenerAction::RefreshToken
                } else {
                    self.set_socket_error(Some(SocketError::Fatal(
                        "There was an error validating the credentials provided for the websocket. Please refresh the page."
                            .to_string(),
                    )));
                    ListenerAction::None
                }
            }
            Some(SocketEvent::TransferStatus) => {
                // Reconnecting lands us on the target node so its transfer
                // logs reach the console.
                let status = message.first_arg().and_then(|s| TransferStatus::from_str(s).ok());
                if matches!(status, Some(TransferStatus::Starting | TransferStatus::Success)) {
                    return ListenerAction::None;
                }
                self.set_socket_connected(false);
                self.set_socket_error(Some(SocketError::Connecting));
                ListenerAction::Reconnect
            }
            _ => ListenerAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::SocketEvent;

    fn server(id: &str) -> Server {
        serde_json::from_value(serde_json::json!({
            "identifier": id,
            "uuid": "1a7ce997-259b-452e-8b4e-cecc464142ca",
            "internal_id": 12,
            "egg_id": 5,
            "name": "Survival",
            "node": "node-eu-1"
        }))
        .unwrap()
    }

    fn event(event: SocketEvent, args: &[&str]) -> SocketMessage {
        SocketMessage::new(event, args.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn ready_needs_id_and_uuid() {
        let mut state = ServerState::default();
        assert!(!state.is_ready());
        state.set_server(server(""), vec![]);
        assert!(!state.is_ready());
        state.set_server(server("1a7ce997"), vec![]);
        assert!(state.is_ready());
        assert_eq!(state.identity().unwrap().egg_id, 5);
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut state = ServerState::default();
        let first = state.begin_fetch();
        let second = state.begin_fetch();
        assert!(!state.apply_fetch(first, server("old"), vec![]));
        assert!(state.server().is_none());
        assert!(state.apply_fetch(second, server("new"), vec![]));
        assert_eq!(state.identity().unwrap().id, "new");
    }

    #[test]
    fn clear_resets_identity_and_conflict() {
        let mut state = ServerState::default();
        let generation = state.begin_fetch();
        state.apply_fetch(generation, server("abc"), vec!["*".into()]);
        state.set_transferring(true);
        state.push_console_line("hello");
        assert!(state.in_conflict_state());

        state.clear();
        assert!(state.identity().is_none());
        assert!(!state.in_conflict_state());
        assert_eq!(state.console().count(), 0);
        assert!(!state.apply_fetch(generation, server("abc"), vec![]));
    }

    #[test]
    fn install_events_drive_conflict_state() {
        let mut state = ServerState::default();
        state.set_server(server("abc"), vec![]);
        assert_eq!(state.apply_install_event(&event(SocketEvent::InstallStarted, &[])), ListenerAction::None);
        assert!(state.in_conflict_state());
        assert_eq!(
            state.apply_install_event(&event(SocketEvent::InstallCompleted, &[])),
            ListenerAction::RefetchServer
        );
        state.set_install_status(Some(ServerStatus::RestoringBackup));
        state.apply_install_event(&event(SocketEvent::BackupRestoreCompleted, &[]));
        assert!(!state.in_conflict_state());
    }

    #[test]
    fn transfer_events_toggle_transferring() {
        let mut state = ServerState::default();
        state.set_server(server("abc"), vec![]);
        state.apply_transfer_event(&event(SocketEvent::TransferStatus, &["processing"]));
        assert!(state.in_conflict_state());
        state.apply_transfer_event(&event(SocketEvent::TransferStatus, &["failed"]));
        assert!(!state.in_conflict_state());
        assert_eq!(
            state.apply_transfer_event(&event(SocketEvent::TransferStatus, &["completed"])),
            ListenerAction::RefetchServer
        );
        assert_eq!(
            state.apply_transfer_event(&event(SocketEvent::Status, &["completed"])),
            ListenerAction::None
        );
    }

    #[test]
    fn connection_events() {
        let mut state = ServerState::default();
        state.apply_connection_event(&event(SocketEvent::AuthSuccess, &[]));
        assert!(state.socket().connected);

        state.apply_connection_event(&event(SocketEvent::Status, &["running"]));
        assert_eq!(state.power(), Some(PowerState::Running));

        assert_eq!(
            state.apply_connection_event(&event(SocketEvent::TokenExpiring, &[])),
            ListenerAction::RefreshToken
        );
        assert_eq!(
            state.apply_connection_event(&event(SocketEvent::JwtError, &["jwt: exp claim is invalid"])),
            ListenerAction::RefreshToken
        );
        assert_eq!(
            state.apply_connection_event(&event(SocketEvent::JwtError, &["jwt: bad signature"])),
            ListenerAction::None
        );
        assert!(matches!(state.socket().error, Some(SocketError::Fatal(_))));

        assert_eq!(
            state.apply_connection_event(&event(SocketEvent::TransferStatus, &["starting"])),
            ListenerAction::None
        );
        assert_eq!(
            state.apply_connection_event(&event(SocketEvent::TransferStatus, &["processing"])),
            ListenerAction::Reconnect
        );
        assert_eq!(state.socket().error, Some(SocketError::Connecting));
    }

    #[test]
    fn output_events_feed_the_console() {
        let mut state = ServerState::default();
        state.apply_connection_event(&event(SocketEvent::ConsoleOutput, &["[Server] Done", "> list"]));
        state.apply_connection_event(&event(SocketEvent::InstallOutput, &["Installing packages"]));
        state.apply_connection_event(&event(SocketEvent::TransferLogs, &["Archive received"]));
        assert_eq!(
            state.console().collect::<Vec<_>>(),
            vec!["[Server] Done", "> list", "Installing packages", "Archive received"]
        );
    }

    #[test]
    fn expired_token_and_daemon_error() {
        let mut state = ServerState::default();
        state.apply_connection_event(&event(SocketEvent::AuthSuccess, &[]));
        assert_eq!(
            state.apply_connection_event(&event(SocketEvent::TokenExpired, &[])),
            ListenerAction::RefreshToken
        );
        assert_eq!(
            state.apply_connection_event(&event(SocketEvent::DaemonError, &["server is offline"])),
            ListenerAction::None
        );
        assert!(state.socket().connected);
        assert_eq!(state.socket().error, None);
        assert_eq!(state.console().count(), 0);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn store_notices_reach_the_subscriber() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut state = ServerState::default();
            let stale = state.begin_fetch();
            state.begin_fetch();
            state.apply_fetch(stale, server("old"), vec![]);
            state.apply_connection_event(&event(SocketEvent::JwtError, &["jwt: bad signature"]));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("discarding stale server fetch"));
        assert!(output.contains("WARN"));
        assert!(output.contains("jwt validation error from daemon"));
    }

    #[test]
    fn console_buffer_is_bounded() {
        let mut state = ServerState::default();
        for i in 0..SOCKET_CONSOLE_LIMIT + 5 {
            state.push_console_line(&i.to_string());
        }
        assert_eq!(state.console().count(), SOCKET_CONSOLE_LIMIT);
        assert_eq!(state.console().next(), Some("5"));
    }
}
