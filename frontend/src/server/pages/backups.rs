use leptos::prelude::*;
use shared::models::Backup;

use super::{PageTitle, ResourceList, load_list, style};
use crate::utils::bytes_to_string;

fn backup_state(backup: &Backup) -> &'static str {
    match (backup.completed_at, backup.is_successful) {
        (None, _) => "In progress",
        (Some(_), false) => "Failed",
        (Some(_), true) if backup.is_locked => "Locked",
        (Some(_), true) => "Completed",
    }
}

#[component]
pub fn BackupsPage() -> impl IntoView {
    let loaded = load_list::<Backup>("backups");

    view! {
        <PageTitle title="Backups" />
        <ResourceList
            loaded=loaded
            empty="It looks like there are no backups currently stored for this server."
            row=|backup: Backup| {
                let state = backup_state(&backup);
                view! {
                    <span>
                        {backup.name.clone()}
                        " "
                        <span class=style::badge>{state}</span>
                    </span>
                    <span class=style::muted>
                        {bytes_to_string(backup.bytes)}
                        " "
                        {backup.created_at.format("%Y-%m-%d %H:%M").to_string()}
                    </span>
                }
            }
        />
    }
}
