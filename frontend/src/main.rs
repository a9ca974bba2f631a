mod app;
mod dashboard;
mod navigation;
mod server;
pub mod utils;

use app::*;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    // Routes the front-shared `tracing` events to the browser console.
    tracing_wasm::set_as_global_default();
    mount_to_body(|| {
        view! { <App /> }
    })
}
