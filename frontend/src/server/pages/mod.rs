pub mod activity;
pub mod backups;
pub mod console;
pub mod databases;
pub mod files;
pub mod network;
pub mod plugins;
pub mod schedules;
pub mod settings;
pub mod users;

use front_shared::{ServerIdentity, SiteConfiguration, http_error_to_human};
use leptos::{context, logging::warn, prelude::*, task::spawn_local};
use serde::de::DeserializeOwned;
use shared::models::{FractalItem, FractalList};

use crate::app::ServerStore;
use crate::utils::{api, screen_block::ServerError, spinner::Spinner};

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/server/pages/pages.module.css"
);

/// `None` until the request finishes.
pub type Loaded<T> = RwSignal<Option<Result<T, String>>>;

fn current_server() -> Option<(ServerIdentity, SiteConfiguration)> {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    store
        .with_untracked(|s| s.identity())
        .map(|identity| (identity, config))
}

fn load<T, F, Fut>(resource: String, fetch: F) -> Loaded<T>
where
    T: Send + Sync + 'static,
    F: FnOnce(String) -> Fut + 'static,
    Fut: std::future::Future<Output = Result<T, front_shared::HttpError>> + 'static,
{
    let loaded = RwSignal::new(None);
    let Some((identity, config)) = current_server() else {
        loaded.set(Some(Err("The server is not loaded.".to_string())));
        return loaded;
    };
    let url = config.server_resource(&identity.id, &resource);
    spawn_local(async move {
        let result = fetch(url.clone()).await;
        if let Err(e) = &result {
            warn!("Failed to load {}: {}", url, e);
        }
        let _ = loaded.try_set(Some(result.map_err(|e| http_error_to_human(&e))));
    });
    loaded
}

/// Fetches a list endpoint of the current server, e.g. `databases`.
pub fn load_list<T>(resource: impl Into<String>) -> Loaded<Vec<T>>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    load(resource.into(), |url| async move {
        api::get_json::<FractalList<T>>(&url)
            .await
            .map(FractalList::into_attributes)
    })
}

pub fn load_item<T>(resource: impl Into<String>) -> Loaded<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    load(resource.into(), |url| async move {
        api::get_json::<FractalItem<T>>(&url)
            .await
            .map(|item| item.attributes)
    })
}

/// Renders a loaded value, with the spinner while it is still on its way.
#[component]
pub fn LoadedView<T, F, V>(loaded: Loaded<T>, render: F) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || match loaded.get() {
        None => view! { <Spinner centered=true /> }.into_any(),
        Some(Err(message)) => view! { <ServerError message=message /> }.into_any(),
        Some(Ok(value)) => render(value).into_any(),
    }
}

#[component]
pub fn ResourceList<T, F, V>(
    loaded: Loaded<Vec<T>>,
    empty: &'static str,
    row: F,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    view! {
        <LoadedView
            loaded=loaded
            render={move |items: Vec<T>| {
                if items.is_empty() {
                    return view! { <p class=style::empty>{empty}</p> }.into_any();
                }
                let row = row.clone();
                view! {
                    <ul class=style::resource_list>
                        {items
                            .into_iter()
                            .map(|item| view! { <li class=style::resource_row>{row(item)}</li> })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        />
    }
}

#[component]
pub fn PageTitle(#[prop(into)] title: String) -> impl IntoView {
    view! { <h1 class=style::page_title>{title}</h1> }
}
