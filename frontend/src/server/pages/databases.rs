use leptos::prelude::*;
use shared::models::Database;

use super::{PageTitle, ResourceList, load_list, style};

#[component]
pub fn DatabasesPage() -> impl IntoView {
    let loaded = load_list::<Database>("databases");

    view! {
        <PageTitle title="Databases" />
        <ResourceList
            loaded=loaded
            empty="It looks like you have no databases."
            row=|database: Database| {
                let endpoint = format!("{}:{}", database.host.address, database.host.port);
                view! {
                    <span>{database.name.clone()}</span>
                    <span class=style::muted>
                        {database.username.clone()}
                        " @ "
                        {endpoint}
                        " from "
                        {database.connections_from.clone()}
                    </span>
                }
            }
        />
    }
}
