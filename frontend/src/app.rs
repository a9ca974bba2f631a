use crate::dashboard::Dashboard;
use crate::server::ServerView;
use crate::utils::{screen_block::NotFound, window_global};

use front_shared::{ServerState, SiteConfiguration};
use leptos::{context, logging, prelude::*};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use shared::models::PanelUser;

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/app.module.css"
);

/// The shared server store. One instance for the whole app; the server view
/// fills and clears it.
pub type ServerStore = RwSignal<ServerState>;

#[component]
pub fn App() -> impl IntoView {
    let config = window_global::<SiteConfiguration>("SiteConfiguration").unwrap_or_else(|e| {
        logging::warn!("Using default site configuration: {}", e);
        SiteConfiguration::default()
    });
    let user = window_global::<PanelUser>("PanelUser").unwrap_or_else(|e| {
        logging::error!("No signed-in user available: {}", e);
        PanelUser::default()
    });
    logging::log!("Signed in as {:?} (root admin: {})", user.username, user.root_admin);

    context::provide_context(config);
    context::provide_context(user);
    context::provide_context::<ServerStore>(RwSignal::new(ServerState::default()));

    view! {
        <Router>
            <main class=style::app>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=Dashboard />
                    <Route path=path!("/server/:id/*any") view=ServerView />
                </Routes>
            </main>
        </Router>
    }
}
