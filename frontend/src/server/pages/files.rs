use front_shared::{SiteConfiguration, http_error_to_human, join_route};
use leptos::{
    context,
    logging::{error, log},
    prelude::*,
    task::spawn_local,
};
use leptos_router::{components::A, hooks::use_location};
use shared::models::FileObject;

use super::{Loaded, LoadedView, PageTitle, ResourceList, load, load_list, style};
use crate::app::ServerStore;
use crate::server::switch::PageParams;
use crate::utils::{api, bytes_to_string, encode_query};

/// Directory or file path carried in the URL fragment, always rooted.
fn fragment_path(hash: &str) -> String {
    let path = hash.trim_start_matches('#');
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn child_path(directory: &str, name: &str) -> String {
    format!("{}/{}", directory.trim_end_matches('/'), name)
}

fn server_base() -> String {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let id = store
        .with_untracked(|s| s.identity().map(|identity| identity.id))
        .unwrap_or_default();
    format!("/server/{}", id)
}

#[component]
pub fn FilesPage() -> impl IntoView {
    let location = use_location();
    let base = server_base();

    move || {
        let directory = fragment_path(&location.hash.get());
        let loaded: Loaded<Vec<FileObject>> =
            load_list(format!("files/list?directory={}", encode_query(&directory)));
        let base = base.clone();
        let title = format!("Files: {}", directory);
        view! {
            <PageTitle title=title />
            <ResourceList
                loaded=loaded
                empty="This directory is empty."
                row=move |file: FileObject| {
                    let path = child_path(&directory, &file.name);
                    let href = if file.is_file {
                        format!("{}#{}", join_route(&base, "files/edit"), path)
                    } else {
                        format!("{}#{}", join_route(&base, "files"), path)
                    };
                    view! {
                        <A href=href>{file.name.clone()}</A>
                        <span class=style::muted>
                            {if file.is_file { bytes_to_string(file.size) } else { String::new() }}
                            " "
                            {file.modified_at.format("%Y-%m-%d %H:%M").to_string()}
                        </span>
                    }
                }
            />
        }
    }
}

/// Editor for an existing file (`edit`) or a file about to be created (`new`).
#[component]
pub fn FileEditPage() -> impl IntoView {
    let params = context::use_context::<PageParams>().expect("PageParams context not found");
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    let location = use_location();
    let creating = params.0.get("action") == Some("new");
    let path = fragment_path(&location.hash.get_untracked());
    let base = server_base();
    let server = base.trim_start_matches("/server/").to_string();

    let title = if creating {
        format!("New file in {}", path)
    } else {
        format!("Editing {}", path)
    };

    let (contents, set_contents) = signal(String::new());
    let (file_name, set_file_name) = signal(String::new());
    let (status, set_status) = signal(None::<String>);

    let loaded: Loaded<String> = if creating {
        RwSignal::new(Some(Ok(String::new())))
    } else {
        load(format!("files/contents?file={}", encode_query(&path)), |url| async move {
            api::get_text(&url).await
        })
    };

    Effect::new(move || {
        if let Some(Ok(text)) = loaded.get() {
            set_contents.set(text);
        }
    });

    let target = {
        let path = path.clone();
        move || {
            if creating {
                child_path(&path, &file_name.get_untracked())
            } else {
                path.clone()
            }
        }
    };

    let save = move |_| {
        let target = target();
        let resource = format!("files/write?file={}", encode_query(&target));
        let url = config.server_resource(&server, &resource);
        let body = contents.get_untracked();
        spawn_local(async move {
            match api::post_text(&url, body).await {
                Ok(()) => {
                    log!("Saved {}", target);
                    set_status.set(Some(format!("Saved {}", target)));
                }
                Err(e) => {
                    error!("Failed to save {}: {}", target, e);
                    set_status.set(Some(http_error_to_human(&e)));
                }
            }
        });
    };

    view! {
        <PageTitle title=title />
        <LoadedView
            loaded=loaded
            render=move |_: String| {
                view! {
                    <Show when=move || creating>
                        <input
                            class=style::command
                            type="text"
                            placeholder="File name"
                            prop:value=move || file_name.get()
                            on:input=move |ev| set_file_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <textarea
                        class=style::editor
                        prop:value=move || contents.get()
                        on:input=move |ev| set_contents.set(event_target_value(&ev))
                    />
                }
            }
        />
        <div class=style::toolbar>
            <span class=style::muted>{move || status.get().unwrap_or_default()}</span>
            <button class=style::button on:click=save>
                {if creating { "Create File" } else { "Save Content" }}
            </button>
        </div>
        <A href=join_route(&base, "files")>"Back to files"</A>
    }
}
