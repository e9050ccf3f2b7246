//! Connect/disconnect state machine for the header.
//!
//! [`Header`] is a pure reducer: [`Header::apply`] consumes one
//! [`HeaderEvent`] and may hand back a single [`Effect`] for the caller to
//! run against the wallet layer. The outcome of that effect comes back as
//! another event. Nothing in here awaits.

use std::sync::Arc;

use sollink_chain::{Chain, ConnectionState, WalletError, WalletName};
use sollink_core::error_handler::{SollinkError, classify_error};
use sollink_core::notifications::{Notice, NoticeBoard, NoticeKind};
use tracing::{debug, error, info, warn};

use crate::region::{Point, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    DisconnectedIdle,
    ChainSelectOpen,
    WalletSelectOpen,
    ConnectedCollapsed,
    ConnectedExpanded,
}

impl HeaderState {
    pub fn is_connected(self) -> bool {
        matches!(self, Self::ConnectedCollapsed | Self::ConnectedExpanded)
    }

    pub fn modal_open(self) -> bool {
        matches!(self, Self::ChainSelectOpen | Self::WalletSelectOpen)
    }
}

/// Everything the header reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderEvent {
    // User input
    ConnectClicked,
    ChainPicked(Chain),
    WalletPicked(WalletName),
    /// Connect the already picked wallet (auto-connect off).
    ConnectSelectedClicked,
    ModalDismissed,
    AddressClicked,
    DisconnectClicked,
    DismissNotice(String),
    DismissAllNotices,
    PointerDown(Point),

    // Wallet layer
    ConnectionChanged(ConnectionState),
    WalletPickSettled(Result<(), WalletError>),
    DisconnectSettled(Result<(), WalletError>),
    EvmSettled(WalletError),
}

/// Work the header asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SelectWallet(WalletName),
    ConnectSelected,
    Disconnect,
    ConnectEvm,
}

pub struct Header {
    state: HeaderState,
    connection: ConnectionState,
    connect_in_flight: bool,
    disconnect_in_flight: bool,
    wallet_container: Arc<dyn Region>,
    notices: NoticeBoard,
}

impl Header {
    /// Mount the header over the current connection state.
    ///
    /// `wallet_container` is the on-screen area of the address button and
    /// its dropdown; pointer-downs outside it collapse the dropdown.
    pub fn new(
        connection: ConnectionState,
        wallet_container: Arc<dyn Region>,
        notices: NoticeBoard,
    ) -> Self {
        let state = if connection.connected {
            HeaderState::ConnectedCollapsed
        } else {
            HeaderState::DisconnectedIdle
        };
        Self {
            state,
            connection,
            connect_in_flight: false,
            disconnect_in_flight: false,
            wallet_container,
            notices,
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn connect_in_flight(&self) -> bool {
        self.connect_in_flight
    }

    pub fn disconnect_in_flight(&self) -> bool {
        self.disconnect_in_flight
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn apply(&mut self, event: HeaderEvent) -> Option<Effect> {
        use HeaderState::*;

        let before = self.state;
        let effect = match (self.state, event) {
            (DisconnectedIdle, HeaderEvent::ConnectClicked) => {
                self.state = ChainSelectOpen;
                None
            }
            (ChainSelectOpen, HeaderEvent::ChainPicked(Chain::Solana)) => {
                self.state = WalletSelectOpen;
                None
            }
            (ChainSelectOpen, HeaderEvent::ChainPicked(Chain::Evm)) => Some(Effect::ConnectEvm),
            (WalletSelectOpen, HeaderEvent::WalletPicked(name)) => {
                self.request_connect(Effect::SelectWallet(name))
            }
            (WalletSelectOpen, HeaderEvent::ConnectSelectedClicked) => {
                self.request_connect(Effect::ConnectSelected)
            }
            (ChainSelectOpen | WalletSelectOpen, HeaderEvent::ModalDismissed) => {
                self.state = DisconnectedIdle;
                None
            }
            (ConnectedCollapsed, HeaderEvent::AddressClicked) => {
                self.state = ConnectedExpanded;
                None
            }
            (ConnectedExpanded, HeaderEvent::AddressClicked) => {
                self.state = ConnectedCollapsed;
                None
            }
            (ConnectedExpanded, HeaderEvent::PointerDown(point)) => {
                if !self.wallet_container.contains(point) {
                    self.state = ConnectedCollapsed;
                }
                None
            }
            (ConnectedExpanded, HeaderEvent::DisconnectClicked) => self.request_disconnect(),
            (_, HeaderEvent::ConnectionChanged(connection)) => {
                self.on_connection_changed(connection);
                None
            }
            (_, HeaderEvent::DisconnectSettled(result)) => {
                self.on_disconnect_settled(result);
                None
            }
            (_, HeaderEvent::WalletPickSettled(result)) => {
                self.connect_in_flight = false;
                if let Err(e) = result {
                    self.report_connect_failure(e);
                }
                None
            }
            (_, HeaderEvent::EvmSettled(e)) => {
                let err = SollinkError::Unsupported("EVM wallet connection".into());
                warn!(error = %e, category = ?err.category(), "EVM wallet connection requested");
                self.notify(NoticeKind::Warning, err.user_message());
                None
            }
            (_, HeaderEvent::DismissNotice(id)) => {
                self.notices.dismiss(&id);
                None
            }
            (_, HeaderEvent::DismissAllNotices) => {
                let dismissed = self.notices.dismiss_all();
                debug!(dismissed, "notices dismissed");
                None
            }
            (state, event) => {
                debug!(?state, ?event, "event ignored");
                None
            }
        };

        if self.state != before {
            debug!(from = ?before, to = ?self.state, "header transition");
        }
        effect
    }

    fn request_connect(&mut self, effect: Effect) -> Option<Effect> {
        if self.connect_in_flight {
            debug!("connect already in flight");
            return None;
        }
        self.connect_in_flight = true;
        Some(effect)
    }

    fn request_disconnect(&mut self) -> Option<Effect> {
        if self.disconnect_in_flight {
            debug!("disconnect already in flight");
            return None;
        }
        if !self.connection.connected {
            return None;
        }
        self.disconnect_in_flight = true;
        Some(Effect::Disconnect)
    }

    fn on_connection_changed(&mut self, connection: ConnectionState) {
        if connection.connected {
            // Connecting closes both modals no matter where the header was.
            if !self.state.is_connected() {
                info!(
                    public_key = ?connection.public_key,
                    closed_modal = self.state.modal_open(),
                    "wallet connected"
                );
                self.state = HeaderState::ConnectedCollapsed;
            }
        } else if self.state.is_connected() {
            info!("wallet disconnected");
            self.state = HeaderState::DisconnectedIdle;
        }
        self.connection = connection;
    }

    fn on_disconnect_settled(&mut self, result: Result<(), WalletError>) {
        self.disconnect_in_flight = false;
        match result {
            Ok(()) => {
                if self.state.is_connected() {
                    self.state = HeaderState::DisconnectedIdle;
                }
                self.connection = ConnectionState::disconnected();
            }
            Err(e) => {
                let err = SollinkError::Disconnect(e.to_string());
                error!(error = %e, category = ?err.category(), "Failed to disconnect");
                self.notify(NoticeKind::Error, err.user_message());
            }
        }
    }

    fn report_connect_failure(&mut self, e: WalletError) {
        let classified = classify_error(&anyhow::Error::new(e));
        warn!(
            error = %classified.message,
            category = ?classified.category,
            "wallet connection failed"
        );
        self.notify(NoticeKind::Error, classified.user_message);
    }

    fn notify(&mut self, kind: NoticeKind, message: String) {
        self.notices.push(Notice::new(kind, message));
    }
}
