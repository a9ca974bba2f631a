use leptos::prelude::*;
use shared::models::ActivityLog;

use super::{PageTitle, ResourceList, load_list, style};

#[component]
pub fn ActivityPage() -> impl IntoView {
    let loaded = load_list::<ActivityLog>("activity");

    view! {
        <PageTitle title="Activity" />
        <ResourceList
            loaded=loaded
            empty="No activity logs available for this server."
            row=|log: ActivityLog| {
                view! {
                    <span>
                        <span class=style::badge>{log.event.clone()}</span>
                        " "
                        {log.description.clone().unwrap_or_default()}
                    </span>
                    <span class=style::muted>
                        {log.ip.clone().unwrap_or_default()}
                        " "
                        {log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()}
                    </span>
                }
            }
        />
    }
}
