use leptos::prelude::*;

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/utils/screen_block.module.css"
);

/// Full-width message block used for errors and blocked states.
#[component]
pub fn ScreenBlock(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional, into)] image: Option<String>,
) -> impl IntoView {
    view! {
        <div class=style::screen_block>
            <div class=style::content>
                {image.map(|src| view! { <img class=style::image src=src /> })}
                <h2 class=style::title>{title}</h2>
                <p class=style::message>{message}</p>
            </div>
        </div>
    }
}

#[component]
pub fn ServerError(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <ScreenBlock title="Something went wrong!" message=message image="/public/server_error.svg" />
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <ScreenBlock
            title="404"
            message="The requested resource was not found."
            image="/public/not_found.svg"
        />
    }
}

#[component]
pub fn AccessDenied() -> impl IntoView {
    view! {
        <ScreenBlock
            title="Access Denied"
            message="You do not have permission to access this page."
            image="/public/server_error.svg"
        />
    }
}
