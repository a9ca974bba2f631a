use front_shared::{RouteMatch, match_route, routes::RouteParams};
use leptos::{context, prelude::*};
use leptos_router::hooks::use_location;

use super::routes::server_routes;
use crate::utils::{can::PermissionRoute, screen_block::NotFound};

/// Parameters captured by the matched server route, for the page to read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageParams(pub RouteParams);

/// Picks the sub-view for the current path. The page is only built once its
/// route matches, behind the route's permission guard.
#[component]
pub fn RouteSwitch(base_url: Signal<String>) -> impl IntoView {
    let location = use_location();
    let table = StoredValue::new(server_routes());

    let matched = Memo::new(move |_| {
        let base = base_url.get();
        location.pathname.with(|pathname| {
            table.with_value(|table| match match_route(table, &base, pathname) {
                RouteMatch::Matched { route, params } => table
                    .iter()
                    .position(|candidate| std::ptr::eq(candidate, route))
                    .map(|index| (index, params)),
                RouteMatch::NotFound => None,
            })
        })
    });

    move || match matched.get() {
        Some((index, params)) => {
            let (permission, factory) =
                table.with_value(|table| (table[index].permission, table[index].component));
            context::provide_context(PageParams(params));
            view! {
                <PermissionRoute permission=permission>
                    {factory()}
                </PermissionRoute>
            }
                .into_any()
        }
        None => view! { <NotFound /> }.into_any(),
    }
}
