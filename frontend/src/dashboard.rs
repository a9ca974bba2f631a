use front_shared::{SiteConfiguration, http_error_to_human};
use leptos::{context, logging::log, prelude::*, task::spawn_local};
use leptos_router::components::A;
use shared::models::{FractalList, Server};

use crate::navigation::NavigationBar;
use crate::utils::{
    api,
    screen_block::ServerError,
    spinner::{Spinner, SpinnerSize},
};

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/dashboard.module.css"
);

/// Servers the signed-in user can access.
#[component]
pub fn Dashboard() -> impl IntoView {
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    let servers = RwSignal::new(None);

    spawn_local(async move {
        let result = api::get_json::<FractalList<Server>>(&config.api_base)
            .await
            .map(FractalList::into_attributes);
        if let Err(e) = &result {
            log!("Failed to fetch servers: {}", e);
        }
        let _ = servers.try_set(Some(result.map_err(|e| http_error_to_human(&e))));
    });

    view! {
        <NavigationBar />
        <div class=style::dashboard>
            {move || match servers.get() {
                None => view! { <Spinner size=SpinnerSize::Large centered=true /> }.into_any(),
                Some(Err(message)) => view! { <ServerError message=message /> }.into_any(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class=style::empty>"There are no servers associated with your account."</p> }
                        .into_any()
                }
                Some(Ok(list)) => {
                    view! {
                        <ul class=style::server_list>
                            <For
                                each=move || list.clone()
                                key=|server: &Server| server.uuid
                                let(server)
                            >
                                <li class=style::server_row>
                                    <A href=format!("/server/{}", server.id)>
                                        <span class=style::server_name>{server.name.clone()}</span>
                                        <span class=style::server_node>
                                            {server
                                                .default_allocation()
                                                .map(|a| format!("{}:{} ", a.ip_alias.unwrap_or(a.ip), a.port))
                                                .unwrap_or_default()}
                                            {server.node.clone()}
                                        </span>
                                    </A>
                                </li>
                            </For>
                        </ul>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
