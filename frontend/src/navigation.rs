use front_shared::SiteConfiguration;
use leptos::{context, logging::error, prelude::*, task::spawn_local};
use leptos_router::components::A;
use shared::models::PanelUser;

use crate::utils::api;

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/navigation.module.css"
);

fn logout() {
    spawn_local(async move {
        if let Err(e) = api::post_text("/auth/logout", String::new()).await {
            error!("Logout failed: {}", e);
            return;
        }
        if let Err(e) = window().location().set_href("/") {
            error!("Failed to redirect after logout: {:?}", e);
        }
    });
}

#[component]
pub fn NavigationBar() -> impl IntoView {
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    let user = context::use_context::<PanelUser>().expect("PanelUser context not found");

    view! {
        <header class=style::navigation>
            <A href="/">
                <span class=style::brand>{config.name.clone()}</span>
            </A>
            <nav class=style::links>
                <A href="/">
                    <span class=style::link>"Dashboard"</span>
                </A>
                <Show when=move || user.root_admin>
                    <a class=style::link href=config.admin_base.clone() rel="noreferrer">
                        "Admin"
                    </a>
                </Show>
                <a class=style::link href="/account">
                    "Account"
                </a>
                <button class=style::link on:click=move |_| logout()>
                    "Logout"
                </button>
            </nav>
        </header>
    }
}
