//! Line commands for driving the header from a terminal.

use anyhow::{Context, Result, bail};
use sollink_chain::{Chain, Network, WalletName, WalletOption};
use sollink_ui::{HeaderEvent, Point};

pub const HELP: &str = "\
commands:
  connect              open the chain picker
  solana | evm         pick a chain
  wallet <n|name>      pick a wallet from the wallet modal
  connect-selected     connect the picked wallet (when auto-connect is off)
  close                dismiss the open modal
  address              toggle the address dropdown
  disconnect           disconnect the wallet
  click <x> <y>        pointer-down anywhere on the page
  dismiss <id|all>     dismiss a notice by id prefix, or all of them
  revoke               revoke the session from the wallet side
  network <name>       switch cluster (devnet, testnet, mainnet-beta)
  rpc <url|reset>      set or drop the custom RPC endpoint for this cluster
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forwarded to the header as-is.
    Header(HeaderEvent),
    Wallet(String),
    Click(Point),
    Dismiss(String),
    Revoke,
    Network(Network),
    Rpc(String),
    RpcReset,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("connect", []) => Command::Header(HeaderEvent::ConnectClicked),
        ("solana", []) => Command::Header(HeaderEvent::ChainPicked(Chain::Solana)),
        ("evm", []) => Command::Header(HeaderEvent::ChainPicked(Chain::Evm)),
        ("close", []) => Command::Header(HeaderEvent::ModalDismissed),
        ("address", []) => Command::Header(HeaderEvent::AddressClicked),
        ("disconnect", []) => Command::Header(HeaderEvent::DisconnectClicked),
        ("connect-selected", []) => Command::Header(HeaderEvent::ConnectSelectedClicked),
        ("wallet", [_, ..]) => Command::Wallet(rest.join(" ")),
        ("click", [x, y]) => {
            let x = x.parse().with_context(|| format!("bad x coordinate: {x}"))?;
            let y = y.parse().with_context(|| format!("bad y coordinate: {y}"))?;
            Command::Click(Point::new(x, y))
        }
        ("dismiss", ["all"]) => Command::Header(HeaderEvent::DismissAllNotices),
        ("dismiss", [id]) => Command::Dismiss(id.to_string()),
        ("revoke", []) => Command::Revoke,
        ("network", [name]) => Command::Network(name.parse()?),
        ("rpc", ["reset"]) => Command::RpcReset,
        ("rpc", [url]) => Command::Rpc(url.to_string()),
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit" | "q", []) => Command::Quit,
        (verb, _) => bail!("unrecognized command: {verb} (try `help`)"),
    };
    Ok(Some(command))
}

/// Resolve a `wallet` argument against the modal rows: a 1-based row number
/// or a case-insensitive name. Unmatched names pass through unchanged.
pub fn resolve_wallet(arg: &str, options: &[WalletOption]) -> WalletName {
    if let Ok(n) = arg.parse::<usize>()
        && let Some(option) = n.checked_sub(1).and_then(|i| options.get(i))
    {
        return option.name.clone();
    }
    options
        .iter()
        .find(|o| o.name.as_str().eq_ignore_ascii_case(arg))
        .map(|o| o.name.clone())
        .unwrap_or_else(|| WalletName::new(arg))
}

/// Find the full notice id that starts with `prefix`.
pub fn resolve_notice<'a>(prefix: &str, ids: impl IntoIterator<Item = &'a str>) -> Option<String> {
    ids.into_iter()
        .find(|id| id.starts_with(prefix))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<WalletOption> {
        ["Ledger", "Phantom", "Sollet (Extension)"]
            .into_iter()
            .map(|name| WalletOption {
                name: WalletName::from(name),
                icon: String::new(),
                selected: false,
            })
            .collect()
    }

    #[test]
    fn parses_header_commands() {
        assert_eq!(
            parse("connect").unwrap(),
            Some(Command::Header(HeaderEvent::ConnectClicked))
        );
        assert_eq!(
            parse("  EVM ").unwrap(),
            Some(Command::Header(HeaderEvent::ChainPicked(Chain::Evm)))
        );
        assert_eq!(
            parse("disconnect").unwrap(),
            Some(Command::Header(HeaderEvent::DisconnectClicked))
        );
        assert_eq!(
            parse("connect-selected").unwrap(),
            Some(Command::Header(HeaderEvent::ConnectSelectedClicked))
        );
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            parse("click 12 40.5").unwrap(),
            Some(Command::Click(Point::new(12.0, 40.5)))
        );
        assert_eq!(
            parse("wallet sollet (extension)").unwrap(),
            Some(Command::Wallet("sollet (extension)".into()))
        );
        assert_eq!(
            parse("network mainnet").unwrap(),
            Some(Command::Network(Network::MainnetBeta))
        );
        assert_eq!(parse("dismiss 1b4e").unwrap(), Some(Command::Dismiss("1b4e".into())));
        assert_eq!(
            parse("dismiss all").unwrap(),
            Some(Command::Header(HeaderEvent::DismissAllNotices))
        );
        assert_eq!(parse("rpc reset").unwrap(), Some(Command::RpcReset));
        assert_eq!(
            parse("rpc http://localhost:8899").unwrap(),
            Some(Command::Rpc("http://localhost:8899".into()))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("click 1").is_err());
        assert!(parse("click a b").is_err());
        assert!(parse("network localnet").is_err());
        assert!(parse("launch").is_err());
        assert!(parse("connect now").is_err());
    }

    #[test]
    fn resolves_wallet_by_number_or_name() {
        let options = options();
        assert_eq!(resolve_wallet("2", &options).as_str(), "Phantom");
        assert_eq!(resolve_wallet("sollet (extension)", &options).as_str(), "Sollet (Extension)");
        assert_eq!(resolve_wallet("9", &options).as_str(), "9");
        assert_eq!(resolve_wallet("0", &options).as_str(), "0");
        assert_eq!(resolve_wallet("Backpack", &options).as_str(), "Backpack");
    }

    #[test]
    fn resolves_notice_prefix() {
        let ids = ["1b4e28ba-2fa1", "9c0d11aa-0000"];
        assert_eq!(resolve_notice("9c0d", ids), Some("9c0d11aa-0000".into()));
        assert_eq!(resolve_notice("ffff", ids), None);
    }
}
