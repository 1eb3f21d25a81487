//! Navigation cancellation against a slow backend
//!
//! These tests assemble the navigator by hand on top of a demo server
//! configured with an artificial response delay, so a newer navigation
//! always arrives while the previous fetch is still in flight.
//!
//! Run with: cargo test --test navigation_cancel_test

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use factline_core::adapters::{DemoConfig, DemoServer, FileVault, HttpGateway};
use factline_core::history::{EntryPoint, HistoryLog};
use factline_core::navigation::{ListingFilter, NavOutcome, Navigator, Route};
use factline_core::ports::SessionVault;
use factline_core::stores::{CurrentNewsStore, NewsFilterStore, SessionStore};
use factline_core::{Role, User};

struct Rig {
    navigator: Arc<Navigator>,
    session: Arc<SessionStore>,
    filter: Arc<NewsFilterStore>,
    current: Arc<CurrentNewsStore>,
    history: Arc<HistoryLog>,
    _server: DemoServer,
    _dir: TempDir,
}

/// Wire a navigator to a demo server that answers after `delay_ms`
fn rig(delay_ms: u64) -> Rig {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let server = DemoServer::start(DemoConfig {
        delay_ms,
        ..Default::default()
    })
    .expect("Failed to start demo server");

    let vault: Arc<dyn SessionVault> = Arc::new(FileVault::new(dir.path()));
    let gateway = Arc::new(
        HttpGateway::new(&server.base_url(), vault.clone()).expect("Failed to build gateway"),
    );
    let history =
        Arc::new(HistoryLog::new(dir.path(), EntryPoint::Desktop, "test").expect("history log"));
    let session = Arc::new(SessionStore::new(gateway.clone(), vault));
    let current = Arc::new(CurrentNewsStore::new());
    let filter = Arc::new(NewsFilterStore::new());
    let navigator = Arc::new(Navigator::new(
        gateway,
        session.clone(),
        current.clone(),
        filter.clone(),
        history.clone(),
    ));

    Rig {
        navigator,
        session,
        filter,
        current,
        history,
        _server: server,
        _dir: dir,
    }
}

fn reader() -> User {
    User {
        id: 3,
        firstname: "Mina".to_string(),
        lastname: "Sato".to_string(),
        email: "reader@factline.dev".to_string(),
        image: String::new(),
        roles: vec![Role::Reader],
    }
}

#[tokio::test]
async fn test_newer_navigation_wins_while_fetch_is_in_flight() {
    let rig = rig(500);
    rig.session.restore("demo-token-3", reader());

    let first = {
        let navigator = rig.navigator.clone();
        tokio::spawn(async move { navigator.navigate(Route::parse("/")).await })
    };

    // Let the listing fetch get onto the wire, then navigate away
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = rig.navigator.navigate(Route::parse("/login")).await;
    assert_eq!(second, NavOutcome::Entered(Route::Login));

    let first = first.await.expect("navigation task panicked");
    assert_eq!(first, NavOutcome::Superseded);
    assert!(
        rig.filter.all_news().is_empty(),
        "a superseded listing must not publish items"
    );
}

#[tokio::test]
async fn test_back_to_back_navigations_keep_only_the_last() {
    let rig = rig(150);
    rig.session.restore("demo-token-3", reader());

    let (first, second) = tokio::join!(
        rig.navigator.navigate(Route::parse("/")),
        rig.navigator.navigate(Route::parse("/news/trusted")),
    );

    assert_eq!(first, NavOutcome::Superseded);
    assert_eq!(
        second,
        NavOutcome::Entered(Route::Listing {
            filter: ListingFilter::Trusted
        })
    );
    assert_eq!(rig.filter.all_news().len(), 8);
}

#[tokio::test]
async fn test_superseded_detail_leaves_the_newer_item_staged() {
    let rig = rig(400);

    let first = {
        let navigator = rig.navigator.clone();
        tokio::spawn(async move { navigator.navigate(Route::parse("/news/1")).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = rig.navigator.navigate(Route::parse("/news/2")).await;

    assert_eq!(second, NavOutcome::Redirected(Route::NewsComment { id: 2 }));
    assert_eq!(first.await.expect("task panicked"), NavOutcome::Superseded);
    assert_eq!(
        rig.current.news().map(|n| n.id),
        Some(2),
        "only the newer navigation may stage the current item"
    );
}

#[tokio::test]
async fn test_supersession_is_recorded() {
    let rig = rig(400);
    rig.session.restore("demo-token-3", reader());

    let first = {
        let navigator = rig.navigator.clone();
        tokio::spawn(async move { navigator.navigate(Route::parse("/")).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    rig.navigator.navigate(Route::parse("/login")).await;
    first.await.expect("task panicked");

    let events: Vec<String> = rig
        .history
        .get_recent(10)
        .unwrap()
        .into_iter()
        .map(|e| e.event)
        .collect();
    assert!(events.contains(&"navigation_superseded".to_string()));
    assert!(events.contains(&"navigation_entered".to_string()));
}
