use leptos::prelude::*;
use shared::models::Plugin;

use super::{PageTitle, ResourceList, load_list, style};

#[component]
pub fn PluginsPage() -> impl IntoView {
    let loaded = load_list::<Plugin>("plugins");

    view! {
        <PageTitle title="Plugins" />
        <ResourceList
            loaded=loaded
            empty="No plugins are installed."
            row=|plugin: Plugin| {
                view! {
                    <span>{plugin.name.clone()}</span>
                    <span class=style::muted>
                        {plugin.version.clone().unwrap_or_else(|| "unknown version".to_string())}
                        " "
                        <span class=style::badge>
                            {if plugin.enabled { "Enabled" } else { "Disabled" }}
                        </span>
                    </span>
                }
            }
        />
    }
}
