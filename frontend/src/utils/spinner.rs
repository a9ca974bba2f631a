use leptos::prelude::*;
use stylance::classes;

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/utils/spinner.module.css"
);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SpinnerSize {
    Small,
    #[default]
    Base,
    Large,
}

#[component]
pub fn Spinner(
    #[prop(optional)] size: SpinnerSize,
    #[prop(optional)] centered: bool,
) -> impl IntoView {
    view! {
        <div class=classes!(if centered { Some(style::centered) } else { None })>
            <div class=classes!(
                style::spinner,
                match size {
                    SpinnerSize::Small => style::small,
                    SpinnerSize::Base => style::base,
                    SpinnerSize::Large => style::large,
                }
            ) />
        </div>
    }
}
