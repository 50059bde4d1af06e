//! Alert chain: ordered escalation of alerts through handler links.
//!
//! Each alert is offered to the links in order; the first one that handles
//! it stops propagation. When every link passes, the chain reports
//! [`AlertOutcome::Unhandled`], which is a normal outcome rather than an error.

mod handlers;

pub use handlers::LevelHandler;

use smarthome_domain::alert::{Alert, AlertOutcome};

use crate::ports::AlertHandler;

/// Ordered list of [`AlertHandler`] links.
///
/// Editing the chain only changes traversal order; handlers never see
/// their neighbours.
#[derive(Default)]
pub struct AlertChain {
    links: Vec<Box<dyn AlertHandler>>,
}

impl AlertChain {
    /// Create an empty chain (every alert is unhandled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The household escalation order: sensor → hub → user.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(LevelHandler::sensor())
            .with(LevelHandler::hub())
            .with(LevelHandler::user())
    }

    /// Append `handler` as the new last link.
    #[must_use]
    pub fn with(mut self, handler: impl AlertHandler + 'static) -> Self {
        self.push(handler);
        self
    }

    /// Append `handler` as the new last link.
    pub fn push(&mut self, handler: impl AlertHandler + 'static) {
        self.links.push(Box::new(handler));
    }

    /// Insert `handler` at `index`, clamped to the end of the chain.
    pub fn insert(&mut self, index: usize, handler: impl AlertHandler + 'static) {
        let index = index.min(self.links.len());
        self.links.insert(index, Box::new(handler));
    }

    /// Remove the first link named `name`, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn AlertHandler>> {
        let index = self.links.iter().position(|link| link.name() == name)?;
        Some(self.links.remove(index))
    }

    /// Link names in traversal order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.links.iter().map(|link| link.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Offer `alert` to each link in order until one handles it.
    #[tracing::instrument(skip(self, alert), fields(level = %alert.level))]
    pub fn handle(&self, alert: &Alert) -> AlertOutcome {
        for link in &self.links {
            let outcome = link.handle(alert);
            if outcome.is_handled() {
                tracing::debug!(handler = link.name(), "alert handled");
                return outcome;
            }
            tracing::trace!(handler = link.name(), "alert passed on");
        }
        tracing::warn!(message = %alert.message, "no handler took the alert");
        AlertOutcome::Unhandled
    }
}
