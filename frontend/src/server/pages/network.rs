use leptos::{context, prelude::*};
use shared::models::Allocation;

use super::{PageTitle, style};
use crate::app::ServerStore;

#[component]
fn AllocationRow(allocation: Allocation) -> impl IntoView {
    let host = allocation.ip_alias.clone().unwrap_or_else(|| allocation.ip.clone());
    let is_default = allocation.is_default;
    view! {
        <li class=style::resource_row>
            <span>
                {format!("{}:{}", host, allocation.port)}
                <Show when=move || is_default>
                    " "
                    <span class=style::badge>"Primary"</span>
                </Show>
            </span>
            <span class=style::muted>{allocation.notes.clone().unwrap_or_default()}</span>
        </li>
    }
}

/// Allocations ship with the server payload, so nothing is fetched here.
#[component]
pub fn NetworkPage() -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let allocations = Memo::new(move |_| {
        store.with(|s| s.server().map(|server| server.allocations()).unwrap_or_default())
    });

    view! {
        <PageTitle title="Network" />
        <Show
            when=move || !allocations.with(Vec::is_empty)
            fallback=|| view! { <p class=style::empty>"No allocations are assigned."</p> }
        >
            <ul class=style::resource_list>
                <For
                    each=move || allocations.get()
                    key=|allocation: &Allocation| allocation.id
                    let(allocation)
                >
                    <AllocationRow allocation=allocation />
                </For>
            </ul>
        </Show>
    }
}
