//! Async driver that connects [`Header`] to the provider stack.
//!
//! The controller owns the header for the length of one mount: it holds the
//! connection subscription and a single pointer listener, runs effects as
//! spawned tasks, and feeds their results back in as events.

use std::sync::Arc;

use sollink_chain::{ConnectionState, ProviderStack, evm};
use sollink_core::notifications::NoticeBoard;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::header::{Effect, Header, HeaderEvent, HeaderState};
use crate::region::{PointerHub, PointerListener, Region};
use crate::view::HeaderView;

pub struct HeaderController {
    header: Header,
    stack: Arc<ProviderStack>,
    connection_rx: watch::Receiver<ConnectionState>,
    pointer: PointerListener,
    settled_tx: mpsc::UnboundedSender<HeaderEvent>,
    settled_rx: mpsc::UnboundedReceiver<HeaderEvent>,
}

impl HeaderController {
    /// Mount the header. Dropping the controller unmounts it and detaches
    /// its pointer listener.
    pub fn mount(
        stack: Arc<ProviderStack>,
        hub: &PointerHub,
        wallet_container: Arc<dyn Region>,
        notices: NoticeBoard,
    ) -> Self {
        let mut connection_rx = stack.subscribe();
        let initial = connection_rx.borrow_and_update().clone();
        let header = Header::new(initial, wallet_container, notices);
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        info!(state = ?header.state(), "header mounted");

        Self {
            header,
            stack,
            connection_rx,
            pointer: hub.listen(),
            settled_tx,
            settled_rx,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn state(&self) -> HeaderState {
        self.header.state()
    }

    pub fn view(&self) -> HeaderView {
        HeaderView::build(
            &self.header,
            self.stack.network(),
            self.stack.endpoint(),
            self.stack.wallet_options(),
        )
    }

    /// Apply one event and start whatever effect it asks for.
    pub fn handle(&mut self, event: HeaderEvent) {
        if let Some(effect) = self.header.apply(event) {
            self.spawn_effect(effect);
        }
    }

    fn spawn_effect(&self, effect: Effect) {
        debug!(?effect, "running effect");
        let stack = Arc::clone(&self.stack);
        let tx = self.settled_tx.clone();

        tokio::spawn(async move {
            let event = match effect {
                Effect::SelectWallet(name) => {
                    HeaderEvent::WalletPickSettled(stack.select(&name).await)
                }
                Effect::ConnectSelected => HeaderEvent::WalletPickSettled(stack.connect().await),
                Effect::Disconnect => HeaderEvent::DisconnectSettled(stack.disconnect().await),
                Effect::ConnectEvm => match evm::connect_evm_wallet().await {
                    Ok(_) => return,
                    Err(e) => HeaderEvent::EvmSettled(e),
                },
            };
            // The controller may have unmounted while the effect ran.
            let _ = tx.send(event);
        });
    }

    /// Wait for the next event coming from the wallet layer, the pointer hub,
    /// or a finished effect. Returns `None` once the wallet layer is gone.
    pub async fn next_event(&mut self) -> Option<HeaderEvent> {
        tokio::select! {
            changed = self.connection_rx.changed() => match changed {
                Ok(()) => {
                    let state = self.connection_rx.borrow_and_update().clone();
                    Some(HeaderEvent::ConnectionChanged(state))
                }
                Err(_) => None,
            },
            Some(point) = self.pointer.recv() => Some(HeaderEvent::PointerDown(point)),
            Some(event) = self.settled_rx.recv() => Some(event),
        }
    }

    /// Handle the next internal event. Returns `false` once the wallet layer
    /// is gone.
    pub async fn pump(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => {
                self.handle(event);
                true
            }
            None => false,
        }
    }

    /// Drive the header until `commands` closes, calling `render` after
    /// every handled event.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<HeaderEvent>,
        mut render: impl FnMut(&HeaderView),
    ) {
        render(&self.view());
        loop {
            let event = tokio::select! {
                command = commands.recv() => match command {
                    Some(event) => event,
                    None => break,
                },
                Some(event) = self.next_event() => event,
            };
            self.handle(event);
            render(&self.view());
        }
        info!("header unmounted");
    }
}
