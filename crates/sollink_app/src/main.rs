mod cli;
mod commands;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use sollink_chain::{Network, ProviderStack, SimulatedWallet, default_adapters};
use sollink_core::config::{ConfigManager, SollinkConfig};
use sollink_core::logging;
use sollink_core::notifications::NoticeBoard;
use sollink_ui::{HeaderController, HeaderEvent, HeaderView, PointerHub, Rect, render_text};

use crate::cli::CliArgs;
use crate::commands::{Command, HELP};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the wallet button and its dropdown sit on the page.
const WALLET_CONTAINER: Rect = Rect {
    x: 600.0,
    y: 0.0,
    width: 240.0,
    height: 160.0,
};

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

fn load_config(args: &CliArgs) -> Result<(ConfigManager, SollinkConfig)> {
    let manager = match &args.config {
        Some(path) => ConfigManager::from_path(path)?,
        None => ConfigManager::new()?,
    };
    let mut config = manager.get();
    args.apply(&mut config)?;
    Ok((manager, config))
}

fn notice_board(config: &SollinkConfig) -> NoticeBoard {
    if config.notifications_enabled {
        NoticeBoard::new(config.max_notices)
    } else {
        NoticeBoard::disabled()
    }
}

fn print_endpoint(stack: &ProviderStack) {
    let origin = if stack.endpoint_is_custom() { " (custom)" } else { "" };
    println!("endpoint: {}{origin}", stack.endpoint());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let (config_manager, config) = load_config(&args)?;
    let _log_guard = logging::init_logging(config.log_level.as_deref())?;
    info!("Starting sollink v{VERSION}");
    info!("Config loaded from {}", config_manager.path().display());

    let network: Network = config.network.parse()?;
    let backend = Arc::new(SimulatedWallet::for_adapters(&default_adapters(network)));
    let stack = Arc::new(
        ProviderStack::from_config(&config, backend.clone())
            .inspect_err(|e| error!("Provider stack init failed: {e:#}"))?,
    );
    info!(
        network = %stack.network(),
        endpoint = %stack.endpoint(),
        wallets = stack.wallets().len(),
        "Provider stack ready"
    );

    let hub = PointerHub::new();
    let controller = HeaderController::mount(
        Arc::clone(&stack),
        &hub,
        Arc::new(WALLET_CONTAINER),
        notice_board(&config),
    );

    let last_view: Arc<Mutex<Option<HeaderView>>> = Arc::default();
    let (events_tx, events_rx) = mpsc::channel::<HeaderEvent>(32);
    let ui = tokio::spawn({
        let last_view = Arc::clone(&last_view);
        controller.run(events_rx, move |view| {
            println!("{}", render_text(view));
            *last_view.lock() = Some(view.clone());
        })
    });

    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e:#}");
                continue;
            }
        };

        let event = match command {
            Command::Header(event) => event,
            Command::Wallet(arg) => {
                HeaderEvent::WalletPicked(commands::resolve_wallet(&arg, &stack.wallet_options()))
            }
            Command::Click(point) => {
                hub.pointer_down(point);
                continue;
            }
            Command::Dismiss(prefix) => {
                let id = last_view.lock().as_ref().and_then(|view| {
                    commands::resolve_notice(&prefix, view.notices.iter().map(|n| n.id.as_str()))
                });
                match id {
                    Some(id) => HeaderEvent::DismissNotice(id),
                    None => {
                        println!("no notice matches {prefix}");
                        continue;
                    }
                }
            }
            Command::Revoke => {
                backend.revoke();
                continue;
            }
            Command::Network(network) => {
                match stack.set_network(network) {
                    Ok(()) => {
                        config_manager.update(|c| c.network = network.as_str().to_string())?;
                        print!("network: {network}, ");
                        print_endpoint(&stack);
                    }
                    Err(e) => println!("{e:#}"),
                }
                continue;
            }
            Command::Rpc(url) => {
                match stack.set_custom_endpoint(&url) {
                    Ok(()) => {
                        let cluster = stack.network().as_str().to_string();
                        config_manager.update(|c| {
                            c.custom_rpc_urls.insert(cluster, url);
                        })?;
                        print_endpoint(&stack);
                    }
                    Err(e) => println!("{e:#}"),
                }
                continue;
            }
            Command::RpcReset => {
                stack.reset_endpoint();
                let cluster = stack.network().as_str();
                config_manager.update(|c| {
                    c.custom_rpc_urls.remove(cluster);
                })?;
                print_endpoint(&stack);
                continue;
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        };

        if events_tx.send(event).await.is_err() {
            error!("Header task stopped");
            break;
        }
    }

    drop(events_tx);
    ui.await?;

    if stack.connection_state().connected {
        info!("Disconnecting on exit");
        if let Err(e) = stack.disconnect().await {
            warn!("Disconnect on exit failed: {e}");
        }
    }
    info!("Shutdown complete");
    Ok(())
}
