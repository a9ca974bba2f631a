use front_shared::RouteDescriptor;
use leptos::prelude::*;

use super::pages::{
    activity::ActivityPage,
    backups::BackupsPage,
    console::ConsolePage,
    databases::DatabasesPage,
    files::{FileEditPage, FilesPage},
    network::NetworkPage,
    plugins::PluginsPage,
    schedules::{ScheduleDetailPage, SchedulesPage},
    settings::{SettingsPage, StartupPage},
    users::UsersPage,
};

/// Builds the view for a route. Only called once the route is matched.
pub type PageFactory = fn() -> AnyView;

/// Eggs that ship a plugin directory.
const PLUGIN_EGGS: &[u32] = &[1, 2, 3, 4, 5];

pub fn server_routes() -> Vec<RouteDescriptor<PageFactory>> {
    vec![
        RouteDescriptor {
            path: "/",
            name: Some("Console"),
            permission: None,
            egg_ids: None,
            icon: "/public/icons/terminal.svg",
            exact: true,
            component: || view! { <ConsolePage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/files",
            name: Some("Files"),
            permission: Some(&["file.*"]),
            egg_ids: None,
            icon: "/public/icons/folder-open.svg",
            exact: false,
            component: || view! { <FilesPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/files/:action(edit|new)",
            name: None,
            permission: Some(&["file.*"]),
            egg_ids: None,
            icon: "",
            exact: true,
            component: || view! { <FileEditPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/databases",
            name: Some("Databases"),
            permission: Some(&["database.*"]),
            egg_ids: None,
            icon: "/public/icons/database.svg",
            exact: false,
            component: || view! { <DatabasesPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/schedules",
            name: Some("Schedules"),
            permission: Some(&["schedule.*"]),
            egg_ids: None,
            icon: "/public/icons/clock.svg",
            exact: false,
            component: || view! { <SchedulesPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/schedules/:id",
            name: None,
            permission: Some(&["schedule.*"]),
            egg_ids: None,
            icon: "",
            exact: true,
            component: || view! { <ScheduleDetailPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/users",
            name: Some("Users"),
            permission: Some(&["user.*"]),
            egg_ids: None,
            icon: "/public/icons/users.svg",
            exact: false,
            component: || view! { <UsersPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/backups",
            name: Some("Backups"),
            permission: Some(&["backup.*"]),
            egg_ids: None,
            icon: "/public/icons/archive.svg",
            exact: false,
            component: || view! { <BackupsPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/network",
            name: Some("Network"),
            permission: Some(&["allocation.*"]),
            egg_ids: None,
            icon: "/public/icons/network-wired.svg",
            exact: false,
            component: || view! { <NetworkPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/plugins",
            name: Some("Plugins"),
            permission: Some(&["file.*"]),
            egg_ids: Some(PLUGIN_EGGS),
            icon: "/public/icons/puzzle-piece.svg",
            exact: false,
            component: || view! { <PluginsPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/startup",
            name: Some("Startup"),
            permission: Some(&["startup.*"]),
            egg_ids: None,
            icon: "/public/icons/play-circle.svg",
            exact: false,
            component: || view! { <StartupPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/settings",
            name: Some("Settings"),
            permission: Some(&["settings.*", "file.sftp"]),
            egg_ids: None,
            icon: "/public/icons/cogs.svg",
            exact: false,
            component: || view! { <SettingsPage /> }.into_any(),
        },
        RouteDescriptor {
            path: "/activity",
            name: Some("Activity"),
            permission: Some(&["activity.*"]),
            egg_ids: None,
            icon: "/public/icons/stream.svg",
            exact: false,
            component: || view! { <ActivityPage /> }.into_any(),
        },
    ]
}
