//! End-to-end walk through what the server view does with the store: fetch,
//! lifecycle events, gating and sidebar output.

use front_shared::{
    GateState, HttpError, ListenerAction, RouteDescriptor, RouteMatch, ServerState, SidebarContext,
    SocketMessage, ViewState, conflict_gate, http_error_to_human, match_route, sidebar_links,
};
use shared::models::ServerResponse;

const BASE: &str = "/server/1a7ce997";

fn table() -> Vec<RouteDescriptor<&'static str>> {
    vec![
        RouteDescriptor {
            path: "/",
            name: Some("Console"),
            permission: None,
            egg_ids: None,
            icon: "",
            exact: true,
            component: "console",
        },
        RouteDescriptor {
            path: "/files",
            name: Some("Files"),
            permission: Some(&["file.*"]),
            egg_ids: None,
            icon: "",
            exact: false,
            component: "files",
        },
        RouteDescriptor {
            path: "/plugins",
            name: Some("Plugins"),
            permission: None,
            egg_ids: Some(&[1, 2, 3]),
            icon: "",
            exact: false,
            component: "plugins",
        },
    ]
}

fn response(status: Option<&str>) -> ServerResponse {
    serde_json::from_value(serde_json::json!({
        "object": "server",
        "attributes": {
            "identifier": "1a7ce997",
            "uuid": "1a7ce997-259b-452e-8b4e-cecc464142ca",
            "internal_id": 12,
            "egg_id": 5,
            "name": "Survival",
            "node": "node-eu-1",
            "status": status
        },
        "meta": { "is_server_owner": false, "user_permissions": ["file.read"] }
    }))
    .unwrap()
}

fn view_state(state: &ServerState, error: Option<&str>) -> ViewState {
    ViewState::resolve(state.is_ready(), error)
}

#[test]
fn failed_fetch_shows_error_only() {
    let mut state = ServerState::default();
    let _ = state.begin_fetch();
    let err = HttpError::Status {
        code: 404,
        body: r#"{"errors":[{"detail":"Server not found."}]}"#.into(),
    };
    let message = http_error_to_human(&err);
    assert_eq!(view_state(&state, Some(&message)), ViewState::Error("Server not found.".into()));
}

#[test]
fn fetched_server_renders_shell_and_sidebar() {
    let mut state = ServerState::default();
    let generation = state.begin_fetch();
    assert_eq!(view_state(&state, None), ViewState::Loading);

    let (server, permissions) = response(None).into_parts();
    assert!(state.apply_fetch(generation, server, permissions));
    assert_eq!(view_state(&state, None), ViewState::Ready);

    let identity = state.identity().unwrap();
    let permissions = state.permissions(false);
    let links = sidebar_links(
        &table(),
        SidebarContext {
            base_url: BASE,
            egg_id: identity.egg_id,
            permissions: &permissions,
            root_admin: false,
            admin_url: "/admin/servers/view/12",
        },
    );
    let names: Vec<_> = links.iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Console", "Files"]);

    match match_route(&table(), BASE, "/server/1a7ce997/files") {
        RouteMatch::Matched { route, .. } => assert_eq!(route.component, "files"),
        RouteMatch::NotFound => panic!("files route should match"),
    }
}

#[test]
fn install_lifecycle_gates_routes() {
    let mut state = ServerState::default();
    let generation = state.begin_fetch();
    let (server, permissions) = response(None).into_parts();
    state.apply_fetch(generation, server, permissions);

    let started = SocketMessage::decode(r#"{"event":"install started"}"#).unwrap();
    assert_eq!(state.apply_install_event(&started), ListenerAction::None);
    assert!(state.in_conflict_state());

    let id = state.identity().unwrap().id;
    assert_eq!(
        conflict_gate(state.in_conflict_state(), false, BASE, &id),
        GateState::Conflicted
    );
    assert_eq!(conflict_gate(state.in_conflict_state(), true, BASE, &id), GateState::Normal);
    assert_eq!(
        conflict_gate(state.in_conflict_state(), true, "/server/1a7ce997/files", &id),
        GateState::Conflicted
    );

    let completed = SocketMessage::decode(r#"{"event":"install completed"}"#).unwrap();
    assert_eq!(state.apply_install_event(&completed), ListenerAction::RefetchServer);

    // A refetch keeps the current generation and lifts the conflict.
    let (server, permissions) = response(None).into_parts();
    assert!(state.apply_fetch(state.generation(), server, permissions));
    assert!(!state.in_conflict_state());
}

#[test]
fn navigating_away_discards_late_results() {
    let mut state = ServerState::default();
    let generation = state.begin_fetch();
    state.clear();

    let (server, permissions) = response(Some("suspended")).into_parts();
    assert!(!state.apply_fetch(generation, server, permissions));
    assert!(state.identity().is_none());
    assert!(!state.in_conflict_state());
}
