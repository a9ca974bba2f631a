use front_shared::{SidebarContext, SidebarLink, SiteConfiguration, sidebar_links};
use leptos::{context, prelude::*};
use leptos_router::components::A;
use shared::models::PanelUser;

use super::routes::server_routes;
use crate::app::ServerStore;

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/server/server.module.css"
);

#[component]
fn SidebarEntry(link: SidebarLink) -> impl IntoView {
    let content = view! {
        <div class=style::sidebar_link>
            <img class=style::icon src=link.icon />
            {link.name}
        </div>
    };
    if link.external {
        view! {
            <a href=link.href target="_blank" rel="noopener">
                {content}
            </a>
        }
            .into_any()
    } else {
        view! {
            <A href=link.href exact=link.exact>
                {content}
            </A>
        }
            .into_any()
    }
}

#[component]
pub fn Sidebar(base_url: Signal<String>) -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    let root_admin = context::use_context::<PanelUser>()
        .expect("PanelUser context not found")
        .root_admin;
    let table = StoredValue::new(server_routes());

    let links = Memo::new(move |_| {
        let Some(identity) = store.with(|s| s.identity()) else {
            return vec![];
        };
        let permissions = store.with(|s| s.permissions(root_admin));
        let admin_url = config.admin_server_url(identity.internal_id);
        let base = base_url.get();
        table.with_value(|table| {
            sidebar_links(
                table,
                SidebarContext {
                    base_url: &base,
                    egg_id: identity.egg_id,
                    permissions: &permissions,
                    root_admin,
                    admin_url: &admin_url,
                },
            )
        })
    });

    view! {
        <nav class=style::sidebar>
            <For each=move || links.get() key=|link: &SidebarLink| link.href.clone() let(link)>
                <SidebarEntry link=link />
            </For>
        </nav>
    }
}
