use front_shared::{PowerAction, PowerState, SocketMessage};
use leptos::{context, logging::warn, prelude::*};

use super::style;
use crate::app::ServerStore;
use crate::server::listeners::SocketHandle;
use crate::utils::can::Can;

#[component]
pub fn ConsolePage() -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let socket = context::use_context::<SocketHandle>().expect("SocketHandle context not found");

    let power = Memo::new(move |_| store.with(|s| s.power()));
    let connected = Memo::new(move |_| store.with(|s| s.socket().connected));
    let output = Memo::new(move |_| store.with(|s| s.console().collect::<Vec<_>>().join("\n")));
    let (command, set_command) = signal(String::new());

    // The daemon replays recent output on request; ask once per connection.
    Effect::new(move || {
        if connected.get() {
            socket.send(SocketMessage::send_logs());
        }
    });

    let power_action = move |action: PowerAction| {
        if !socket.send(SocketMessage::set_state(action)) {
            warn!("Websocket is not connected, dropping power action {}", action);
        }
    };

    let submit = move || {
        let line = command.get_untracked();
        if line.trim().is_empty() {
            return;
        }
        if socket.send(SocketMessage::send_command(&line)) {
            set_command.set(String::new());
        } else {
            warn!("Websocket is not connected, command not sent");
        }
    };

    view! {
        <div class=style::toolbar>
            <h1 class=style::page_title>"Console"</h1>
            <span class=style::badge>
                {move || power.get().map(|p| p.to_string()).unwrap_or_else(|| "unknown".to_string())}
            </span>
            <div class=style::buttons>
                <Can actions=&["control.start"]>
                    <button
                        class=style::button
                        disabled=move || !connected.get() || power.get() != Some(PowerState::Offline)
                        on:click=move |_| power_action(PowerAction::Start)
                    >
                        "Start"
                    </button>
                </Can>
                <Can actions=&["control.restart"]>
                    <button
                        class=style::button
                        disabled=move || !connected.get() || power.get().is_none()
                        on:click=move |_| power_action(PowerAction::Restart)
                    >
                        "Restart"
                    </button>
                </Can>
                <Can actions=&["control.stop"]>
                    <button
                        class=format!("{} {}", style::button, style::danger)
                        disabled=move || !connected.get() || power.get() == Some(PowerState::Offline)
                        on:click=move |_| {
                            if power.get_untracked() == Some(PowerState::Stopping) {
                                power_action(PowerAction::Kill)
                            } else {
                                power_action(PowerAction::Stop)
                            }
                        }
                    >
                        {move || if power.get() == Some(PowerState::Stopping) { "Kill" } else { "Stop" }}
                    </button>
                </Can>
            </div>
        </div>
        <pre class=style::console>{move || output.get()}</pre>
        <Can actions=&["control.console"]>
            <input
                class=style::command
                type="text"
                placeholder="Type a command..."
                disabled=move || !connected.get()
                prop:value=move || command.get()
                on:input=move |ev| set_command.set(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        submit();
                    }
                }
            />
        </Can>
    }
}
