use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sollink_chain::{Chain, ProviderStack, SimulatedWallet, WalletConnection, WalletName};
use sollink_core::config::SollinkConfig;
use sollink_core::notifications::{NoticeBoard, NoticeKind};
use sollink_ui::*;
use tokio::sync::mpsc;

const KEY: &str = "ABCDEFGH1234";

fn wallet_container() -> Arc<dyn Region> {
    Arc::new(Rect::new(600.0, 0.0, 240.0, 160.0))
}

fn setup(backend: SimulatedWallet) -> (Arc<SimulatedWallet>, Arc<ProviderStack>, PointerHub) {
    setup_with(backend, &SollinkConfig::default())
}

fn setup_with(
    backend: SimulatedWallet,
    config: &SollinkConfig,
) -> (Arc<SimulatedWallet>, Arc<ProviderStack>, PointerHub) {
    let backend = Arc::new(backend);
    let stack = ProviderStack::from_config(config, backend.clone()).unwrap();
    (backend, Arc::new(stack), PointerHub::new())
}

fn phantom_backend() -> SimulatedWallet {
    SimulatedWallet::new().with_account(WalletName::from("Phantom"), KEY)
}

async fn pump_until(ctl: &mut HeaderController, done: impl Fn(&HeaderController) -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !done(ctl) {
            assert!(ctl.pump().await, "wallet layer went away");
        }
    })
    .await
    .expect("header did not settle");
}

async fn connected_controller(
    backend: &SimulatedWallet,
    stack: &Arc<ProviderStack>,
    hub: &PointerHub,
) -> HeaderController {
    let mut ctl = HeaderController::mount(
        Arc::clone(stack),
        hub,
        wallet_container(),
        NoticeBoard::default(),
    );
    backend.connect(&WalletName::from("Phantom")).await.unwrap();
    pump_until(&mut ctl, |c| c.state() == HeaderState::ConnectedCollapsed).await;
    ctl
}

#[tokio::test]
async fn end_to_end_connect_and_disconnect() {
    let (backend, stack, hub) = setup(phantom_backend());
    let mut ctl = HeaderController::mount(stack, &hub, wallet_container(), NoticeBoard::default());
    assert_eq!(ctl.state(), HeaderState::DisconnectedIdle);

    ctl.handle(HeaderEvent::ConnectClicked);
    assert_eq!(ctl.state(), HeaderState::ChainSelectOpen);

    ctl.handle(HeaderEvent::ChainPicked(Chain::Solana));
    assert_eq!(ctl.state(), HeaderState::WalletSelectOpen);

    ctl.handle(HeaderEvent::WalletPicked(WalletName::from("Phantom")));
    pump_until(&mut ctl, |c| c.state() == HeaderState::ConnectedCollapsed).await;

    let view = ctl.view();
    assert!(view.modal.is_none());
    assert_eq!(
        view.button,
        HeaderButton::Address {
            short: "ABCD...1234".into()
        }
    );

    ctl.handle(HeaderEvent::AddressClicked);
    assert_eq!(ctl.state(), HeaderState::ConnectedExpanded);
    assert_eq!(ctl.view().dropdown.unwrap().full_address, KEY);

    ctl.handle(HeaderEvent::DisconnectClicked);
    pump_until(&mut ctl, |c| c.state() == HeaderState::DisconnectedIdle).await;

    assert!(!backend.state().connected);
    assert_eq!(backend.disconnect_calls(), 1);
    assert_eq!(ctl.view().button, HeaderButton::Connect);
}

#[tokio::test]
async fn outside_pointer_from_hub_collapses_dropdown() {
    let (backend, stack, hub) = setup(phantom_backend());
    let mut ctl = connected_controller(&backend, &stack, &hub).await;
    ctl.handle(HeaderEvent::AddressClicked);

    // Inside the wallet container: stays open.
    assert_eq!(hub.pointer_down(Point::new(700.0, 100.0)), 1);
    assert!(ctl.pump().await);
    assert_eq!(ctl.state(), HeaderState::ConnectedExpanded);

    hub.pointer_down(Point::new(20.0, 300.0));
    pump_until(&mut ctl, |c| c.state() == HeaderState::ConnectedCollapsed).await;
}

#[tokio::test]
async fn second_disconnect_click_while_pending_is_ignored() {
    let (backend, stack, hub) = setup(phantom_backend().with_held_disconnects());
    let mut ctl = connected_controller(&backend, &stack, &hub).await;
    ctl.handle(HeaderEvent::AddressClicked);

    ctl.handle(HeaderEvent::DisconnectClicked);
    tokio::task::yield_now().await;
    ctl.handle(HeaderEvent::DisconnectClicked);
    assert!(ctl.header().disconnect_in_flight());
    assert!(!ctl.view().dropdown.unwrap().disconnect_enabled);

    backend.release_disconnect();
    pump_until(&mut ctl, |c| {
        c.state() == HeaderState::DisconnectedIdle && !c.header().disconnect_in_flight()
    })
    .await;
    assert_eq!(backend.disconnect_calls(), 1);
}

#[tokio::test]
async fn failed_disconnect_surfaces_notice() {
    let (backend, stack, hub) = setup(phantom_backend());
    let mut ctl = connected_controller(&backend, &stack, &hub).await;
    ctl.handle(HeaderEvent::AddressClicked);

    backend.fail_next_disconnect("adapter closed");
    ctl.handle(HeaderEvent::DisconnectClicked);
    pump_until(&mut ctl, |c| !c.header().disconnect_in_flight()).await;

    assert_eq!(ctl.state(), HeaderState::ConnectedExpanded);
    assert!(backend.state().connected);
    let notices = ctl.view().notices;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);

    ctl.handle(HeaderEvent::DismissNotice(notices[0].id.clone()));
    assert!(ctl.view().notices.is_empty());
}

#[tokio::test]
async fn external_revocation_returns_to_idle() {
    let (backend, stack, hub) = setup(phantom_backend());
    let mut ctl = connected_controller(&backend, &stack, &hub).await;
    ctl.handle(HeaderEvent::AddressClicked);

    backend.revoke();
    pump_until(&mut ctl, |c| c.state() == HeaderState::DisconnectedIdle).await;
}

#[tokio::test]
async fn rejected_connection_keeps_wallet_modal_open() {
    let (backend, stack, hub) = setup(phantom_backend());
    let mut ctl = HeaderController::mount(stack, &hub, wallet_container(), NoticeBoard::default());
    backend.reject_next_connect();

    ctl.handle(HeaderEvent::ConnectClicked);
    ctl.handle(HeaderEvent::ChainPicked(Chain::Solana));
    ctl.handle(HeaderEvent::WalletPicked(WalletName::from("Phantom")));
    pump_until(&mut ctl, |c| c.header().notices().active_count() == 1).await;

    assert_eq!(ctl.state(), HeaderState::WalletSelectOpen);
    assert!(!backend.state().connected);
}

#[tokio::test]
async fn connect_selected_reports_rejection_then_connects() {
    let config = SollinkConfig {
        auto_connect: false,
        ..Default::default()
    };
    let (backend, stack, hub) = setup_with(phantom_backend(), &config);
    let mut ctl = HeaderController::mount(
        Arc::clone(&stack),
        &hub,
        wallet_container(),
        NoticeBoard::default(),
    );

    ctl.handle(HeaderEvent::ConnectClicked);
    ctl.handle(HeaderEvent::ChainPicked(Chain::Solana));
    ctl.handle(HeaderEvent::WalletPicked(WalletName::from("Phantom")));
    pump_until(&mut ctl, |c| !c.header().connect_in_flight()).await;

    assert_eq!(ctl.state(), HeaderState::WalletSelectOpen);
    assert_eq!(stack.selected(), Some(WalletName::from("Phantom")));
    assert!(!backend.state().connected);

    backend.reject_next_connect();
    ctl.handle(HeaderEvent::ConnectSelectedClicked);
    pump_until(&mut ctl, |c| c.header().notices().active_count() == 1).await;

    assert_eq!(ctl.state(), HeaderState::WalletSelectOpen);
    assert_eq!(ctl.view().notices[0].kind, NoticeKind::Error);

    ctl.handle(HeaderEvent::ConnectSelectedClicked);
    pump_until(&mut ctl, |c| c.state() == HeaderState::ConnectedCollapsed).await;
    assert!(backend.state().connected);
}

#[tokio::test]
async fn evm_pick_warns_without_changing_state() {
    let (_backend, stack, hub) = setup(phantom_backend());
    let mut ctl = HeaderController::mount(stack, &hub, wallet_container(), NoticeBoard::default());

    ctl.handle(HeaderEvent::ConnectClicked);
    ctl.handle(HeaderEvent::ChainPicked(Chain::Evm));
    pump_until(&mut ctl, |c| c.header().notices().active_count() == 1).await;

    assert_eq!(ctl.state(), HeaderState::ChainSelectOpen);
    assert_eq!(ctl.view().notices[0].kind, NoticeKind::Warning);
}

#[tokio::test]
async fn remounting_does_not_leak_listeners() {
    let (backend, stack, hub) = setup(phantom_backend());
    assert_eq!(hub.listener_count(), 0);

    for _ in 0..3 {
        let ctl = HeaderController::mount(
            Arc::clone(&stack),
            &hub,
            wallet_container(),
            NoticeBoard::default(),
        );
        assert_eq!(hub.listener_count(), 1);
        drop(ctl);
    }
    assert_eq!(hub.listener_count(), 0);

    // Mounting over an existing session starts connected.
    backend.connect(&WalletName::from("Phantom")).await.unwrap();
    let ctl = HeaderController::mount(stack, &hub, wallet_container(), NoticeBoard::default());
    assert_eq!(ctl.state(), HeaderState::ConnectedCollapsed);
}

#[tokio::test]
async fn run_renders_after_every_event() {
    let (_backend, stack, hub) = setup(phantom_backend());
    let ctl = HeaderController::mount(stack, &hub, wallet_container(), NoticeBoard::default());
    let rendered: Arc<Mutex<Vec<HeaderView>>> = Arc::default();
    let (tx, rx) = mpsc::channel(8);

    let task = tokio::spawn({
        let rendered = Arc::clone(&rendered);
        ctl.run(rx, move |view| rendered.lock().push(view.clone()))
    });

    tx.send(HeaderEvent::ConnectClicked).await.unwrap();
    tx.send(HeaderEvent::ChainPicked(Chain::Solana)).await.unwrap();
    tx.send(HeaderEvent::WalletPicked(WalletName::from("Phantom")))
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let connected = rendered
                .lock()
                .last()
                .is_some_and(|v| matches!(v.button, HeaderButton::Address { .. }));
            if connected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("never rendered a connected header");

    drop(tx);
    task.await.unwrap();

    let views = rendered.lock();
    assert_eq!(views[0].button, HeaderButton::Connect);
    assert!(matches!(
        views[1].modal,
        Some(ModalView::ChainSelect { .. })
    ));
    assert!(matches!(
        views[2].modal,
        Some(ModalView::WalletSelect { .. })
    ));
}
