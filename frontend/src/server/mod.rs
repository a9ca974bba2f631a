mod conflict;
mod listeners;
mod pages;
mod routes;
mod sidebar;
mod switch;

use front_shared::{
    FetchGeneration, GateState, HttpError, SiteConfiguration, ViewState, conflict_gate,
    http_error_to_human,
};
use leptos::{
    context,
    logging::{error, log},
    prelude::*,
    task::spawn_local,
};
use leptos_router::hooks::{use_location, use_params_map};
use shared::models::{PanelUser, Server, ServerResponse};

use crate::app::ServerStore;
use crate::navigation::NavigationBar;
use crate::utils::{
    api,
    screen_block::ServerError,
    spinner::{Spinner, SpinnerSize},
};
use conflict::ConflictStateRenderer;
use listeners::{InstallListener, SocketHandle, TransferListener, WebsocketHandler};
use sidebar::Sidebar;
use switch::RouteSwitch;

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/server/server.module.css"
);

async fn get_server(
    config: &SiteConfiguration,
    id: &str,
) -> Result<(Server, Vec<String>), HttpError> {
    let response: ServerResponse = api::get_json(&config.server_endpoint(id)).await?;
    Ok(response.into_parts())
}

/// Reloads the current server without clearing what is on screen.
pub(crate) fn refetch_server(store: ServerStore, config: SiteConfiguration) {
    let Some((id, generation)) =
        store.with_untracked(|s| s.identity().map(|identity| (identity.id, s.generation())))
    else {
        return;
    };
    spawn_local(async move {
        match get_server(&config, &id).await {
            Ok((server, permissions)) => {
                store.update(|s| {
                    s.apply_fetch(generation, server, permissions);
                });
            }
            Err(e) => error!("Failed to refresh server {}: {}", id, e),
        }
    });
}

fn load_server(
    store: ServerStore,
    config: SiteConfiguration,
    id: String,
    generation: FetchGeneration,
    set_load_error: WriteSignal<Option<String>>,
) {
    spawn_local(async move {
        match get_server(&config, &id).await {
            Ok((server, permissions)) => {
                let applied = store
                    .try_update(|s| s.apply_fetch(generation, server, permissions))
                    .unwrap_or(false);
                log!("Loaded server {} (applied: {})", id, applied);
            }
            Err(e) => {
                error!("Failed to load server {}: {:?}", id, e);
                let current = store.try_with_untracked(|s| s.generation() == generation);
                if current == Some(true) {
                    let _ = set_load_error.try_set(Some(http_error_to_human(&e)));
                }
            }
        }
    });
}

/// Routed view for `/server/:id/*`.
#[component]
pub fn ServerView() -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    let params = use_params_map();
    let (load_error, set_load_error) = signal(None::<String>);

    let server_id = Memo::new(move |_| {
        params.with(|p| p.get("id").map(|id| id.to_string())).unwrap_or_default()
    });

    // Every id change starts from a clean store; results of fetches for a
    // previous id are discarded by generation.
    Effect::new(move || {
        let id = server_id.get();
        set_load_error.set(None);
        let Some(generation) = store.try_update(|s| s.begin_fetch()) else {
            return;
        };
        load_server(store, config.clone(), id, generation, set_load_error);
    });

    on_cleanup(move || {
        let _ = store.try_update(|s| s.clear());
    });

    let view_state = Memo::new(move |_| {
        ViewState::resolve(store.with(|s| s.is_ready()), load_error.get().as_deref())
    });

    view! {
        <NavigationBar />
        {move || match view_state.get() {
            ViewState::Loading => {
                view! { <Spinner size=SpinnerSize::Large centered=true /> }.into_any()
            }
            ViewState::Error(message) => view! { <ServerError message=message /> }.into_any(),
            ViewState::Ready => view! { <ServerShell server_id=server_id /> }.into_any(),
        }}
    }
}

/// Sidebar, lifecycle listeners and the gated route switch of a loaded server.
#[component]
fn ServerShell(server_id: Memo<String>) -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let user = context::use_context::<PanelUser>().expect("PanelUser context not found");
    let location = use_location();

    context::provide_context(SocketHandle::new());

    let base_url = Signal::derive(move || format!("/server/{}", server_id.get()));
    let root_admin = user.root_admin;
    let gate = Memo::new(move |_| {
        let (in_conflict, id) = store.with(|s| {
            (
                s.in_conflict_state(),
                s.identity().map(|identity| identity.id).unwrap_or_default(),
            )
        });
        location
            .pathname
            .with(|pathname| conflict_gate(in_conflict, root_admin, pathname, &id))
    });

    view! {
        <div class=style::server_layout>
            <Sidebar base_url=base_url />
            <InstallListener />
            <TransferListener />
            <WebsocketHandler />
            <section class=style::content>
                {move || match gate.get() {
                    GateState::Conflicted => view! { <ConflictStateRenderer /> }.into_any(),
                    GateState::Normal => view! { <RouteSwitch base_url=base_url /> }.into_any(),
                }}
            </section>
        </div>
    }
}
