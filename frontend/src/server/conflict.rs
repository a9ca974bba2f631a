use front_shared::ConflictReason;
use leptos::{context, prelude::*};

use crate::app::ServerStore;
use crate::utils::screen_block::ScreenBlock;

/// Shown instead of the routed pages while the server is installing,
/// suspended, transferring or otherwise unavailable.
#[component]
pub fn ConflictStateRenderer() -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let reason = Memo::new(move |_| store.with(|s| s.server().and_then(ConflictReason::of)));

    move || {
        reason.get().map(|reason| {
            view! { <ScreenBlock title=reason.title() message=reason.message() image=reason.image() /> }
        })
    }
}
