use chrono::{DateTime, Utc};
use front_shared::join_route;
use leptos::{context, prelude::*};
use leptos_router::components::A;
use shared::models::Schedule;

use super::{LoadedView, PageTitle, ResourceList, load_item, load_list, style};
use crate::app::ServerStore;
use crate::server::switch::PageParams;

fn schedules_base() -> String {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let id = store
        .with_untracked(|s| s.identity().map(|identity| identity.id))
        .unwrap_or_default();
    format!("/server/{}/schedules", id)
}

fn run_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[component]
pub fn SchedulesPage() -> impl IntoView {
    let loaded = load_list::<Schedule>("schedules");
    let base = schedules_base();

    view! {
        <PageTitle title="Schedules" />
        <ResourceList
            loaded=loaded
            empty="There are no schedules configured for this server."
            row=move |schedule: Schedule| {
                let href = join_route(&base, &schedule.id.to_string());
                view! {
                    <A href=href>{schedule.name.clone()}</A>
                    <span class=style::muted>
                        {schedule.cron.expression()}
                        " "
                        <span class=style::badge>
                            {if schedule.is_active { "Active" } else { "Inactive" }}
                        </span>
                    </span>
                }
            }
        />
    }
}

#[component]
pub fn ScheduleDetailPage() -> impl IntoView {
    let params = context::use_context::<PageParams>().expect("PageParams context not found");
    let id = params.0.get("id").unwrap_or_default().to_string();
    let loaded = load_item::<Schedule>(format!("schedules/{}", id));
    let back = schedules_base();

    view! {
        <LoadedView
            loaded=loaded
            render=|schedule: Schedule| {
                view! {
                    <PageTitle title=schedule.name.clone() />
                    <dl class=style::details>
                        <dt>"Cron"</dt>
                        <dd>{schedule.cron.expression()}</dd>
                        <dt>"Status"</dt>
                        <dd>
                            {match (schedule.is_active, schedule.is_processing) {
                                (_, true) => "Processing",
                                (true, false) => "Active",
                                (false, false) => "Inactive",
                            }}
                        </dd>
                        <dt>"Last run"</dt>
                        <dd>{run_time(schedule.last_run_at)}</dd>
                        <dt>"Next run"</dt>
                        <dd>{run_time(schedule.next_run_at)}</dd>
                    </dl>
                }
            }
        />
        <A href=back>"Back to schedules"</A>
    }
}
