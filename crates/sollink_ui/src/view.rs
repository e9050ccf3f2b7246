use std::fmt::Write as _;

use sollink_chain::{Chain, Network, WalletOption};
use sollink_core::notifications::NoticeKind;

use crate::address::format_address;
use crate::header::{Header, HeaderState};

pub const TITLE: &str = "Wallet Connection Demo";
pub const CONNECT_HINT: &str = "Click the \"Select Wallet\" button above to connect your wallet";

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderButton {
    Connect,
    Address { short: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownView {
    pub full_address: String,
    pub disconnect_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalView {
    ChainSelect { options: Vec<Chain> },
    WalletSelect { options: Vec<WalletOption> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    pub id: String,
    pub kind: NoticeKind,
    pub message: String,
}

/// Snapshot of everything the header draws.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub network: Network,
    pub endpoint: String,
    pub button: HeaderButton,
    pub dropdown: Option<DropdownView>,
    pub modal: Option<ModalView>,
    pub notices: Vec<NoticeView>,
    pub hint: Option<&'static str>,
}

impl HeaderView {
    pub fn build(
        header: &Header,
        network: Network,
        endpoint: String,
        wallet_options: Vec<WalletOption>,
    ) -> Self {
        let public_key = header.connection().public_key.clone().unwrap_or_default();

        let button = if header.state().is_connected() {
            HeaderButton::Address {
                short: format_address(&public_key),
            }
        } else {
            HeaderButton::Connect
        };

        let dropdown = (header.state() == HeaderState::ConnectedExpanded).then(|| DropdownView {
            full_address: public_key.clone(),
            disconnect_enabled: !header.disconnect_in_flight(),
        });

        let modal = match header.state() {
            HeaderState::ChainSelectOpen => Some(ModalView::ChainSelect {
                options: Chain::ALL.to_vec(),
            }),
            HeaderState::WalletSelectOpen => Some(ModalView::WalletSelect {
                options: wallet_options,
            }),
            _ => None,
        };

        let notices = header
            .notices()
            .active()
            .map(|n| NoticeView {
                id: n.id.clone(),
                kind: n.kind,
                message: n.message.clone(),
            })
            .collect();

        Self {
            network,
            endpoint,
            button,
            dropdown,
            modal,
            notices,
            hint: (!header.state().is_connected()).then_some(CONNECT_HINT),
        }
    }
}

/// Plain-text rendering for terminals and logs.
pub fn render_text(view: &HeaderView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {TITLE} [{}] ==", view.network);

    match &view.button {
        HeaderButton::Connect => {
            let _ = writeln!(out, "[ Connect Wallet ]");
        }
        HeaderButton::Address { short } => {
            let arrow = if view.dropdown.is_some() { "▲" } else { "▼" };
            let _ = writeln!(out, "[ {short} {arrow} ]");
        }
    }

    if let Some(dropdown) = &view.dropdown {
        let _ = writeln!(out, "  | {}", dropdown.full_address);
        if dropdown.disconnect_enabled {
            let _ = writeln!(out, "  | [ Disconnect ]");
        } else {
            let _ = writeln!(out, "  | [ Disconnecting... ]");
        }
    }

    match &view.modal {
        Some(ModalView::ChainSelect { options }) => {
            let _ = writeln!(out, "+-- Select Chain --+");
            for chain in options {
                let _ = writeln!(out, "|  {}", chain.label());
            }
            let _ = writeln!(out, "+------------------+");
        }
        Some(ModalView::WalletSelect { options }) => {
            let _ = writeln!(out, "+-- Select Wallet --+");
            for (i, option) in options.iter().enumerate() {
                let marker = if option.selected { "*" } else { " " };
                let _ = writeln!(out, "|{marker} {}. {}", i + 1, option.name);
            }
            let _ = writeln!(out, "+-------------------+");
        }
        None => {}
    }

    for notice in &view.notices {
        let _ = writeln!(
            out,
            "({}) {} [dismiss {}]",
            notice.kind.tag(),
            notice.message,
            short_id(&notice.id)
        );
    }

    if let Some(hint) = view.hint {
        let _ = writeln!(out, "{hint}");
    }
    out
}

/// Leading segment of a notice id, enough to dismiss it by prefix.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
