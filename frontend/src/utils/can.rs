use leptos::{context, prelude::*};
use shared::models::PanelUser;

use crate::app::ServerStore;
use crate::utils::screen_block::AccessDenied;

fn use_permission(actions: &'static [&'static str], match_any: bool) -> Memo<bool> {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let root_admin = context::use_context::<PanelUser>()
        .expect("PanelUser context not found")
        .root_admin;
    Memo::new(move |_| store.with(|s| s.permissions(root_admin).can(actions, match_any)))
}

/// Renders its children only when the viewer holds the given actions.
#[component]
pub fn Can(
    actions: &'static [&'static str],
    #[prop(optional)] match_any: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let allowed = use_permission(actions, match_any);
    view! {
        <Show when=move || allowed.get()>
            {children()}
        </Show>
    }
}

/// Guard around a routed page. Pages without a permission are always shown;
/// the others fall back to an access-denied screen.
#[component]
pub fn PermissionRoute(
    permission: Option<&'static [&'static str]>,
    children: ChildrenFn,
) -> impl IntoView {
    let allowed = permission.map(|actions| use_permission(actions, true));
    view! {
        <Show
            when=move || allowed.is_none_or(|allowed| allowed.get())
            fallback=|| view! { <AccessDenied /> }
        >
            {children()}
        </Show>
    }
}
