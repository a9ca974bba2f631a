use std::time::Duration;

use front_shared::{
    HttpError, ListenerAction, ServerState, SiteConfiguration, SocketError, SocketMessage,
    bus::{EventBus, SubscriptionId},
};
use futures::{
    SinkExt, StreamExt,
    channel::mpsc::{self, UnboundedSender},
    future::abortable,
};
use gloo_net::websocket::{Message, futures::WebSocket};
use gloo_timers::future::sleep;
use leptos::{
    context,
    logging::{error, log, warn},
    prelude::*,
    task::spawn_local,
};
use shared::models::{WebsocketCredentials, WebsocketCredentialsResponse};

use super::refetch_server;
use crate::app::ServerStore;
use crate::utils::{
    api,
    spinner::{Spinner, SpinnerSize},
};

stylance::import_crate_style!(
    #[allow(dead_code)]
    style,
    "src/server/server.module.css"
);

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Handle to the daemon websocket of the viewed server: sends frames while a
/// connection is up and fans incoming frames out to the listeners.
#[derive(Clone, Copy)]
pub struct SocketHandle {
    sender: StoredValue<Option<UnboundedSender<SocketMessage>>, LocalStorage>,
    bus: StoredValue<EventBus<SocketMessage>, LocalStorage>,
}

impl SocketHandle {
    pub fn new() -> Self {
        SocketHandle {
            sender: StoredValue::new_local(None),
            bus: StoredValue::new_local(EventBus::default()),
        }
    }

    /// Returns false when no connection is up.
    pub fn send(&self, message: SocketMessage) -> bool {
        self.sender
            .try_with_value(|sender| {
                sender
                    .as_ref()
                    .is_some_and(|sender| sender.unbounded_send(message).is_ok())
            })
            .unwrap_or(false)
    }

    fn attach(&self, sender: Option<UnboundedSender<SocketMessage>>) {
        let _ = self.sender.try_update_value(|current| *current = sender);
    }

    pub fn subscribe(&self, handler: impl Fn(&SocketMessage) + 'static) -> Option<SubscriptionId> {
        self.bus.try_update_value(|bus| bus.subscribe(handler))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let _ = self.bus.try_update_value(|bus| bus.unsubscribe(id));
    }

    fn publish(&self, message: &SocketMessage) {
        let handlers = self.bus.try_with_value(|bus| bus.handlers()).unwrap_or_default();
        for handler in handlers {
            handler(message);
        }
    }
}

/// Runs `reduce` against the store for every socket frame while mounted and
/// performs the follow-up it asks for.
fn use_socket_listener(reduce: fn(&mut ServerState, &SocketMessage) -> ListenerAction) {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    let socket = context::use_context::<SocketHandle>().expect("SocketHandle context not found");

    let subscription = socket.subscribe(move |message| {
        let action = store
            .try_update(|s| reduce(s, message))
            .unwrap_or(ListenerAction::None);
        if action == ListenerAction::RefetchServer {
            refetch_server(store, config.clone());
        }
    });
    on_cleanup(move || {
        if let Some(subscription) = subscription {
            socket.unsubscribe(subscription);
        }
    });
}

#[component]
pub fn InstallListener() -> impl IntoView {
    use_socket_listener(ServerState::apply_install_event);
}

#[component]
pub fn TransferListener() -> impl IntoView {
    use_socket_listener(ServerState::apply_transfer_event);
}

async fn get_credentials(
    config: &SiteConfiguration,
    server: &str,
) -> Result<WebsocketCredentials, HttpError> {
    let response: WebsocketCredentialsResponse =
        api::get_json(&config.server_resource(server, "websocket")).await?;
    Ok(response.data)
}

fn refresh_token(socket: SocketHandle, config: SiteConfiguration, server: String) {
    spawn_local(async move {
        match get_credentials(&config, &server).await {
            Ok(credentials) => {
                if !socket.send(SocketMessage::auth(&credentials.token)) {
                    warn!("Websocket closed before the refreshed token could be sent");
                }
            }
            Err(e) => error!("Failed to refresh websocket token: {}", e),
        }
    });
}

enum SocketExit {
    Reconnect,
    Closed,
}

async fn run_socket(
    credentials: WebsocketCredentials,
    store: ServerStore,
    socket: SocketHandle,
    config: SiteConfiguration,
    server: String,
) -> SocketExit {
    let ws = match WebSocket::open(&credentials.socket) {
        Ok(ws) => ws,
        Err(e) => {
            warn!("Failed to open websocket {}: {}", credentials.socket, e);
            return SocketExit::Closed;
        }
    };
    let (mut write, mut read) = ws.split();
    let (sender, mut outgoing) = mpsc::unbounded::<SocketMessage>();

    spawn_local(async move {
        while let Some(message) = outgoing.next().await {
            let frame = match message.encode() {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Failed to encode websocket frame: {}", e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::Text(frame)).await {
                warn!("Failed to write to websocket: {}", e);
                break;
            }
        }
    });

    let _ = sender.unbounded_send(SocketMessage::auth(&credentials.token));
    socket.attach(Some(sender));

    while let Some(frame) = read.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Bytes(_)) => continue,
            Err(e) => {
                warn!("Websocket closed: {}", e);
                break;
            }
        };
        let message = match SocketMessage::decode(&text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Ignoring malformed websocket frame: {}", e);
                continue;
            }
        };
        let action = store
            .try_update(|s| s.apply_connection_event(&message))
            .unwrap_or(ListenerAction::None);
        socket.publish(&message);
        match action {
            ListenerAction::RefreshToken => refresh_token(socket, config.clone(), server.clone()),
            ListenerAction::Reconnect => {
                socket.attach(None);
                return SocketExit::Reconnect;
            }
            ListenerAction::RefetchServer | ListenerAction::None => {}
        }
    }

    socket.attach(None);
    let _ = store.try_update(|s| s.set_socket_connected(false));
    SocketExit::Closed
}

async fn connection_loop(
    store: ServerStore,
    socket: SocketHandle,
    config: SiteConfiguration,
    server: String,
) {
    loop {
        match get_credentials(&config, &server).await {
            Ok(credentials) => {
                let exit =
                    run_socket(credentials, store, socket, config.clone(), server.clone()).await;
                if matches!(exit, SocketExit::Reconnect) {
                    log!("Reconnecting websocket for {}", server);
                    continue;
                }
            }
            Err(e) => error!("Failed to fetch websocket credentials for {}: {}", server, e),
        }

        let fatal = store
            .try_update(|s| {
                let fatal = matches!(s.socket().error, Some(SocketError::Fatal(_)));
                if !fatal {
                    s.set_socket_error(Some(SocketError::Connecting));
                }
                fatal
            })
            .unwrap_or(true);
        if fatal {
            break;
        }
        sleep(RECONNECT_DELAY).await;
    }
}

/// Keeps the daemon websocket of the viewed server connected and shows a
/// banner while it is not.
#[component]
pub fn WebsocketHandler() -> impl IntoView {
    let store = context::use_context::<ServerStore>().expect("ServerStore context not found");
    let config =
        context::use_context::<SiteConfiguration>().expect("SiteConfiguration context not found");
    let socket = context::use_context::<SocketHandle>().expect("SocketHandle context not found");

    if let Some(uuid) = store.with_untracked(|s| s.identity().map(|identity| identity.uuid)) {
        let (task, handle) = abortable(connection_loop(store, socket, config, uuid.to_string()));
        spawn_local(async move {
            let _ = task.await;
        });
        on_cleanup(move || {
            handle.abort();
            socket.attach(None);
        });
    }

    let error = Memo::new(move |_| store.with(|s| s.socket().error.clone()));

    move || {
        error.get().map(|error| {
            let connecting = error == SocketError::Connecting;
            view! {
                <div class=style::socket_overlay>
                    <Show when=move || connecting>
                        <Spinner size=SpinnerSize::Small />
                    </Show>
                    <p>{error.message().to_string()}</p>
                </div>
            }
        })
    }
}
