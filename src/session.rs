//! Session orchestration.
//!
//! A [`Session`] stands in for the browser side of the contract: it owns the
//! current location and document, auto-binds declared elements when a
//! document loads, routes activations to their bindings, and applies
//! whatever navigation the response handlers decide.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::Url;

use crate::binding::{
    ActivationEvent, ActivationOutcome, BindDirective, BindOptions, Binder, BoundElement,
};
use crate::config::Config;
use crate::dom::DocumentView;
use crate::error_handling::{ActivationStats, ActivityType, TransportError};
use crate::initialization::{active_registration, init_client};
use crate::navigation::{resolve_target, NavigationOutcome};
use crate::transport::send_request;

/// A document, its location, and the bindings attached to its elements.
///
/// Documents are re-parsed inside synchronous scopes as needed
/// (`scraper::Html` is not `Send`); bindings are keyed by element position
/// and dropped whenever the document is replaced.
pub struct Session {
    client: Arc<reqwest::Client>,
    config: Config,
    location: Url,
    source: String,
    binder: Binder,
    stats: Arc<ActivationStats>,
}

impl Session {
    /// Opens a session by fetching the document at `url`.
    ///
    /// Declared elements are auto-bound according to the active
    /// registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built, the URL does not
    /// parse, or the initial document cannot be fetched.
    pub async fn open(url: &str, config: Config) -> Result<Self> {
        let client = init_client(&config)
            .await
            .context("Failed to initialize HTTP client")?;
        let location = Url::parse(url).context("Invalid session URL")?;
        let source = fetch_document(&client, &location, config.max_document_bytes)
            .await
            .context("Failed to fetch initial document")?;

        Ok(Self::assemble(client, config, location, source))
    }

    /// Loads a session from markup already in hand.
    ///
    /// `location` becomes the base against which relative targets resolve.
    /// Declared elements are auto-bound according to the active
    /// registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub async fn load(
        source: impl Into<String>,
        location: Url,
        config: Config,
    ) -> Result<Self> {
        let client = init_client(&config)
            .await
            .context("Failed to initialize HTTP client")?;

        Ok(Self::assemble(client, config, location, source.into()))
    }

    fn assemble(
        client: Arc<reqwest::Client>,
        config: Config,
        location: Url,
        source: String,
    ) -> Self {
        let mut session = Session {
            client,
            config,
            location,
            source,
            binder: Binder::new(),
            stats: Arc::new(ActivationStats::new()),
        };
        session.autobind();
        session
    }

    /// Binds every element matching `selector` according to the directive.
    ///
    /// Already-bound elements keep their stored descriptor. An
    /// [`BindDirective::Invoke`] directive still ensures each element is
    /// bound (with defaults) before dispatching the named method, which today
    /// always misses.
    ///
    /// Returns the number of elements in the collection.
    pub fn bind(&mut self, selector: &str, directive: BindDirective) -> usize {
        let registration = active_registration();
        let view = DocumentView::parse(&self.source);
        let ids = view.select_all(selector);

        for &id in &ids {
            let Some(element) = view.element(id) else {
                continue;
            };
            match &directive {
                BindDirective::Options(options) => {
                    self.binder
                        .bind(id, element, options.clone(), &registration.strategy);
                }
                BindDirective::Invoke(name) => {
                    self.binder
                        .bind(id, element, BindOptions::default(), &registration.strategy);
                    if !self.binder.dispatch(id, name) {
                        self.stats.increment(ActivityType::UnknownInvoke);
                    }
                }
            }
        }
        ids.len()
    }

    /// Delivers an activation to the first element matching `selector`.
    ///
    /// Accepted activations send the bound request and apply the resulting
    /// navigation before returning. There is no guard against overlapping
    /// activations: each one sends its own independent request.
    ///
    /// # Errors
    ///
    /// Activation itself never fails; transport and navigation failures are
    /// logged, counted, and folded into the outcome. The `Result` covers
    /// internal invariants only.
    pub async fn activate(
        &mut self,
        selector: &str,
        event: ActivationEvent,
    ) -> Result<ActivationOutcome> {
        let id = DocumentView::parse(&self.source).select_first(selector);
        let Some(id) = id else {
            log::debug!("no element matches {selector:?}");
            self.stats.increment(ActivityType::UnboundActivation);
            return Ok(ActivationOutcome::NotBound);
        };

        let navigation = match self.binder.get(id) {
            None => {
                log::debug!("element {selector:?} has no stored descriptor");
                self.stats.increment(ActivityType::UnboundActivation);
                return Ok(ActivationOutcome::NotBound);
            }
            Some(bound) if !bound.intercepts() => {
                self.stats.increment(ActivityType::PassthroughActivation);
                return Ok(ActivationOutcome::Passthrough);
            }
            Some(_) if !event.activates() => {
                self.stats.increment(ActivityType::KeydownIgnored);
                return Ok(ActivationOutcome::Ignored);
            }
            Some(bound) => {
                self.stats.increment(ActivityType::RequestSent);
                match send_request(&self.client, bound.descriptor(), &self.location).await {
                    Ok(reply) => {
                        log::debug!("{} reply for activation on {selector:?}", reply.status());
                        let navigation = bound.descriptor().strategy().on_reply(&reply);
                        if navigation == NavigationOutcome::Stay && !reply.is_success() {
                            self.stats.increment(ActivityType::UnhandledErrorStatus);
                        }
                        navigation
                    }
                    Err(e) => {
                        self.stats.increment(ActivityType::TransportFailure);
                        log::warn!("activation request failed: {e}");
                        NavigationOutcome::Stay
                    }
                }
            }
        };

        self.apply_navigation(&navigation).await;
        Ok(ActivationOutcome::Intercepted { navigation })
    }

    /// The session's current location.
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// The current document source.
    pub fn document_source(&self) -> &str {
        &self.source
    }

    /// The binding side table for the current document.
    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    /// The binding stored for the first element matching `selector`.
    pub fn binding(&self, selector: &str) -> Option<&BoundElement> {
        let id = DocumentView::parse(&self.source).select_first(selector)?;
        self.binder.get(id)
    }

    /// Activation statistics for this session.
    pub fn stats(&self) -> &ActivationStats {
        &self.stats
    }

    /// A shareable handle to the activation statistics.
    pub fn shared_stats(&self) -> Arc<ActivationStats> {
        Arc::clone(&self.stats)
    }

    async fn apply_navigation(&mut self, navigation: &NavigationOutcome) {
        match navigation {
            NavigationOutcome::Navigate(target) => match resolve_target(&self.location, target) {
                Ok(url) => {
                    self.stats.increment(ActivityType::NavigationApplied);
                    log::info!("navigating to {url}");
                    self.goto(url).await;
                }
                Err(e) => {
                    log::warn!("cannot resolve navigation target {target:?}: {e}");
                }
            },
            NavigationOutcome::Reload => {
                self.stats.increment(ActivityType::ReloadApplied);
                log::info!("reloading {}", self.location);
                self.goto(self.location.clone()).await;
            }
            NavigationOutcome::Stay => {}
        }
    }

    /// Replaces the current document with whatever `url` serves.
    ///
    /// The location changes even when the fetch fails; navigating away is
    /// the one cancellation path the contract has, so a dead target leaves
    /// an empty document rather than the old one.
    async fn goto(&mut self, url: Url) {
        let source =
            match fetch_document(&self.client, &url, self.config.max_document_bytes).await {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("failed to fetch {url}: {e}");
                    String::new()
                }
            };
        self.location = url;
        self.source = source;
        self.binder.clear();
        self.autobind();
    }

    fn autobind(&mut self) {
        let registration = active_registration();
        if !registration.auto_bind {
            log::debug!("auto-binding disabled by active registration");
            return;
        }

        let view = DocumentView::parse(&self.source);
        let declared = view.declared_elements();
        for &id in &declared {
            if let Some(element) = view.element(id) {
                self.binder
                    .bind(id, element, BindOptions::default(), &registration.strategy);
            }
        }
        if !declared.is_empty() {
            log::debug!(
                "auto-bound {} declared element(s) at {}",
                declared.len(),
                self.location
            );
        }
    }
}

async fn fetch_document(
    client: &reqwest::Client,
    url: &Url,
    max_bytes: usize,
) -> Result<String, TransportError> {
    let response = client
        .get(url.clone())
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await?;

    let status = response.status();
    log::debug!("{status} fetching document {url}");

    let bytes = response.bytes().await?;
    if bytes.len() > max_bytes {
        log::warn!("document at {url} exceeds {max_bytes} bytes, dropping body");
        return Ok(String::new());
    }
    Ok(String::from_utf8_lossy(&bytes).to_string())
}
