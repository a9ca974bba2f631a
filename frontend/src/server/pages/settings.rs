use leptos::{context, prelude::*};
use shared::models::{PanelUser, Server, StartupVariable};

use super::{PageTitle, ResourceList, load_list, style};
use crate::app::ServerStore;
use crate::utils::can::Can;

fn sftp_address(server: &Server, username: &str) -> Option<String> {
    server.sftp_details.as_ref().map(|sftp| {
        format!("sftp://{}.{}@{}:{}", username, server.id, sftp.ip, sftp.port)
    })
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let user = context::use_context::<PanelUser>().expect("PanelUser context not found");
    let server = Memo::new(move |_| store.with(|s| s.server().cloned()));

    move || {
        let Some(server) = server.get() else {
            return ().into_any();
        };
        let sftp = sftp_address(&server, &user.username)
            .unwrap_or_else(|| "Unavailable".to_string());
        let sftp_user = format!("{}.{}", user.username, server.id);
        let Server { name, description, node, uuid, .. } = server;
        view! {
            <PageTitle title="Settings" />
            <Can actions=&["file.sftp"]>
                <h2>"SFTP Details"</h2>
                <dl class=style::details>
                    <dt>"Server Address"</dt>
                    <dd>{sftp.clone()}</dd>
                    <dt>"Username"</dt>
                    <dd>{sftp_user.clone()}</dd>
                </dl>
            </Can>
            <Can actions=&["settings.*"]>
                <h2>"Server Details"</h2>
                <dl class=style::details>
                    <dt>"Name"</dt>
                    <dd>{name.clone()}</dd>
                    <dt>"Description"</dt>
                    <dd>{description.clone()}</dd>
                    <dt>"Node"</dt>
                    <dd>{node.clone()}</dd>
                    <dt>"Server ID"</dt>
                    <dd>{uuid.to_string()}</dd>
                </dl>
            </Can>
        }
            .into_any()
    }
}

#[component]
pub fn StartupPage() -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let (invocation, image) = store.with_untracked(|s| {
        s.server()
            .map(|server| (server.invocation.clone(), server.docker_image.clone()))
            .unwrap_or_default()
    });
    let loaded = load_list::<StartupVariable>("startup");

    view! {
        <PageTitle title="Startup" />
        <dl class=style::details>
            <dt>"Startup Command"</dt>
            <dd>
                <code>{invocation}</code>
            </dd>
            <dt>"Docker Image"</dt>
            <dd>
                <code>{image}</code>
            </dd>
        </dl>
        <ResourceList
            loaded=loaded
            empty="This egg has no variables."
            row=|variable: StartupVariable| {
                let value = variable
                    .server_value
                    .clone()
                    .unwrap_or_else(|| variable.default_value.clone());
                let read_only = !variable.is_editable;
                view! {
                    <span>
                        {variable.name.clone()}
                        " "
                        <span class=style::muted>{variable.env_variable.clone()}</span>
                    </span>
                    <span>
                        <code>{value}</code>
                        <Show when=move || read_only>
                            " "
                            <span class=style::badge>"Read only"</span>
                        </Show>
                    </span>
                }
            }
        />
    }
}
