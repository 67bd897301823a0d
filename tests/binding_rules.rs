//! Integration tests for binding semantics
//!
//! These tests exercise the bind surface without touching the network:
//! auto-initialization, the plain-GET-hyperlink skip rule, rebind
//! idempotency, and the named-method dispatch path.

use actionlink::{
    ActivationEvent, ActivationOutcome, ActivityType, BindDirective, BindOptions, Config, Session,
};
use url::Url;

const PAGE: &str = r#"
    <html><body>
        <a id="plain" href="/read">read</a>
        <a id="declared-get" data-request-method="get" href="/read">read</a>
        <button id="close" data-request-method="post" data-request-uri="/issues/1/close">x</button>
        <span id="label">label</span>
    </body></html>
"#;

async fn page_session() -> Session {
    let base = Url::parse("http://tracker.example/issues/1").expect("base should parse");
    Session::load(PAGE, base, Config::default())
        .await
        .expect("session should load")
}

#[tokio::test]
async fn test_auto_init_binds_only_declared_elements() {
    let session = page_session().await;

    // #declared-get and #close carry the attribute; #plain and #label don't
    assert_eq!(session.binder().len(), 2);
    assert!(session.binding("#close").is_some());
    assert!(session.binding("#declared-get").is_some());
    assert!(session.binding("#plain").is_none());
    assert!(session.binding("#label").is_none());
}

#[tokio::test]
async fn test_plain_get_anchor_bind_is_passthrough() {
    let mut session = page_session().await;

    let count = session.bind("#plain", BindDirective::Options(BindOptions::default()));
    assert_eq!(count, 1);

    let bound = session.binding("#plain").expect("binding should be stored");
    assert!(!bound.intercepts());
    assert!(bound.cursor().is_none());

    // Native navigation is left alone and no request goes out
    let outcome = session
        .activate("#plain", ActivationEvent::Click)
        .await
        .expect("activation should run");
    assert_eq!(outcome, ActivationOutcome::Passthrough);
    assert!(!outcome.default_prevented());
    assert_eq!(session.stats().count(ActivityType::RequestSent), 0);
}

#[tokio::test]
async fn test_declared_get_anchor_is_passthrough_too() {
    let mut session = page_session().await;

    let outcome = session
        .activate("#declared-get", ActivationEvent::Click)
        .await
        .expect("activation should run");
    assert_eq!(outcome, ActivationOutcome::Passthrough);
    assert_eq!(session.stats().count(ActivityType::PassthroughActivation), 1);
}

#[tokio::test]
async fn test_intercepting_binding_reports_pointer_cursor() {
    let session = page_session().await;

    let bound = session.binding("#close").expect("auto-bound");
    assert!(bound.intercepts());
    assert_eq!(bound.cursor(), Some("pointer"));
    assert_eq!(bound.descriptor().method(), "post");
    assert_eq!(bound.descriptor().target(), Some("/issues/1/close"));
}

#[tokio::test]
async fn test_rebinding_keeps_stored_descriptor() {
    let mut session = page_session().await;

    // Auto-init already bound #close; later options must not replace it
    session.bind(
        "#close",
        BindDirective::Options(BindOptions {
            method: Some("delete".to_string()),
            target: Some("/elsewhere".to_string()),
            ..Default::default()
        }),
    );

    let bound = session.binding("#close").expect("binding should remain");
    assert_eq!(bound.descriptor().method(), "post");
    assert_eq!(bound.descriptor().target(), Some("/issues/1/close"));
}

#[tokio::test]
async fn test_activation_without_binding_is_noop() {
    let mut session = page_session().await;

    // Selector matching nothing
    let outcome = session
        .activate("#missing", ActivationEvent::Click)
        .await
        .expect("activation should run");
    assert_eq!(outcome, ActivationOutcome::NotBound);

    // Element present but never bound
    let outcome = session
        .activate("#label", ActivationEvent::Click)
        .await
        .expect("activation should run");
    assert_eq!(outcome, ActivationOutcome::NotBound);

    assert_eq!(session.stats().count(ActivityType::UnboundActivation), 2);
    assert_eq!(session.stats().count(ActivityType::RequestSent), 0);
}

#[tokio::test]
async fn test_invoke_dispatch_is_a_noop() {
    let mut session = page_session().await;

    // Invoke on an unbound element binds it with defaults first, then the
    // named dispatch misses: no public methods exist
    let count = session.bind("#label", BindDirective::Invoke("refresh".to_string()));
    assert_eq!(count, 1);

    let bound = session.binding("#label").expect("invoke still binds");
    assert_eq!(bound.descriptor().method(), "get");
    assert_eq!(session.stats().count(ActivityType::UnknownInvoke), 1);

    // Invoke on an already-bound element keeps its descriptor intact
    session.bind("#close", BindDirective::Invoke("refresh".to_string()));
    let bound = session.binding("#close").expect("binding should remain");
    assert_eq!(bound.descriptor().method(), "post");
    assert_eq!(session.stats().count(ActivityType::UnknownInvoke), 2);
}

#[tokio::test]
async fn test_bind_counts_whole_collection() {
    let mut session = page_session().await;

    // Both anchors match; one is already bound from auto-init
    let count = session.bind("a", BindDirective::Options(BindOptions::default()));
    assert_eq!(count, 2);
    assert!(session.binding("#plain").is_some());
}
