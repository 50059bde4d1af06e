//! Alert handler port: one link of the escalation chain.

use smarthome_domain::alert::{Alert, AlertOutcome};

/// A link in an [`AlertChain`](crate::alert_chain::AlertChain).
///
/// Handlers only decide whether they take an alert. They know nothing about
/// their position in the chain or what comes after them.
pub trait AlertHandler: Send + Sync {
    /// Name used to locate the link when editing the chain.
    fn name(&self) -> &str;

    /// Either consume the alert ([`AlertOutcome::Handled`]) or pass
    /// ([`AlertOutcome::Unhandled`]).
    fn handle(&self, alert: &Alert) -> AlertOutcome;
}
