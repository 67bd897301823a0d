//! Integration tests for the process-wide bind registration
//!
//! The registration is process-wide state, so every test here serializes on
//! a lock and restores what it found before finishing.

use std::sync::{Arc, Mutex, PoisonError};

use actionlink::{
    install, restore, ActivationEvent, ActivationOutcome, Config, NavigationOutcome, Registration,
    ResponseStrategy, Session,
};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static REGISTRATION_LOCK: Mutex<()> = Mutex::new(());

const PAGE: &str =
    r#"<button id="close" data-request-method="post" data-request-uri="/x">x</button>"#;

#[tokio::test]
async fn test_install_disables_auto_bind_and_restore_reenables() {
    let _guard = REGISTRATION_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let base = Url::parse("http://tracker.example/").expect("base should parse");

    let previous = install(Arc::new(Registration {
        auto_bind: false,
        ..Default::default()
    }));

    let session = Session::load(PAGE, base.clone(), Config::default())
        .await
        .expect("session should load");
    assert!(
        session.binder().is_empty(),
        "auto-binding must be suppressed while the registration disables it"
    );

    // Hand back what install returned: the previous registration comes back
    let replaced = restore(previous);
    assert!(replaced.is_some_and(|r| !r.auto_bind));

    let session = Session::load(PAGE, base, Config::default())
        .await
        .expect("session should load");
    assert_eq!(session.binder().len(), 1);
}

#[tokio::test]
async fn test_registered_strategy_becomes_the_binding_default() {
    let _guard = REGISTRATION_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200).insert_header("Location", "/y"))
        .expect(1)
        .mount(&server)
        .await;

    // A strategy that never navigates, whatever the reply says
    let previous = install(Arc::new(Registration {
        auto_bind: true,
        strategy: ResponseStrategy::new(
            Arc::new(|_| NavigationOutcome::Stay),
            Arc::new(|_| NavigationOutcome::Stay),
        ),
    }));

    let base = Url::parse(&server.uri()).expect("mock server URI should parse");
    let mut session = Session::load(PAGE, base, Config::default())
        .await
        .expect("session should load");

    let outcome = session
        .activate("#close", ActivationEvent::Click)
        .await
        .expect("activation should run");

    assert_eq!(
        outcome,
        ActivationOutcome::Intercepted {
            navigation: NavigationOutcome::Stay
        }
    );
    assert_eq!(
        session.location().path(),
        "/",
        "the Location header must be ignored by the installed strategy"
    );

    restore(previous);
}
