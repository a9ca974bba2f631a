//! Client-side logic of the server view that does not depend on the UI
//! framework: the shared server store, permission checks, the route table
//! types and matching, sidebar filtering, the conflict gate and the daemon
//! websocket protocol.

pub mod bus;
pub mod config;
pub mod conflict;
pub mod error;
pub mod permissions;
pub mod routes;
pub mod sidebar;
pub mod socket;
pub mod store;
pub mod view_state;

pub use config::SiteConfiguration;
pub use conflict::{ConflictReason, GateState, conflict_gate};
pub use error::{HttpError, http_error_to_human};
pub use permissions::Permissions;
pub use routes::{RouteDescriptor, RouteMatch, join_route, match_route};
pub use sidebar::{SidebarContext, SidebarLink, sidebar_links};
pub use socket::{ListenerAction, PowerAction, PowerState, SocketEvent, SocketMessage};
pub use store::{FetchGeneration, ServerIdentity, ServerState, SocketError};
pub use view_state::ViewState;
