//! Registry of flows that can intercept a prompt by intent.
//!
//! Flows are declared once, in registration order, and installed into a
//! host's namespace lazily the first time one of their matchers fires.
//!
//! Lookups are a linear scan: the first registered flow whose matcher
//! accepts the intent wins, regardless of how other flows would score. The
//! trigger and cancel intent sets are expected to be curated so they do not
//! overlap.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::matcher::{IntentMatch, IntentMatcher};
use crate::domain::foundation::{FlowId, FlowRef};
use crate::ports::{CallSession, Dialog};

/// A flow being declared to the registry.
pub struct IntentFlow {
    dialog: Arc<dyn Dialog>,
    trigger: Option<IntentMatcher>,
    cancel: Option<IntentMatcher>,
}

impl IntentFlow {
    /// Wraps the flow to run when a matcher fires.
    pub fn new(dialog: Arc<dyn Dialog>) -> Self {
        Self {
            dialog,
            trigger: None,
            cancel: None,
        }
    }

    /// Starts this flow when `matcher` accepts a classified intent.
    pub fn trigger_action(mut self, matcher: IntentMatcher) -> Self {
        self.trigger = Some(matcher);
        self
    }

    /// Unwinds this flow's frame when `matcher` accepts a classified intent.
    pub fn cancel_action(mut self, matcher: IntentMatcher) -> Self {
        self.cancel = Some(matcher);
        self
    }
}

/// A flow held by the registry.
pub struct RegisteredFlow {
    id: FlowId,
    trigger: Option<IntentMatcher>,
    cancel: Option<IntentMatcher>,
    dialog: Arc<dyn Dialog>,
}

impl RegisteredFlow {
    pub fn id(&self) -> FlowId {
        self.id
    }

    /// Address of this flow in the host namespace.
    pub fn flow_ref(&self) -> FlowRef {
        FlowRef::Intent(self.id)
    }

    pub fn trigger(&self) -> Option<&IntentMatcher> {
        self.trigger.as_ref()
    }

    pub fn cancel(&self) -> Option<&IntentMatcher> {
        self.cancel.as_ref()
    }

    pub fn dialog(&self) -> &Arc<dyn Dialog> {
        &self.dialog
    }
}

impl fmt::Debug for RegisteredFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredFlow")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

/// Ordered, append-only catalog of intent flows.
///
/// Writes are serialized behind a lock so a host driving several calls
/// concurrently can share one registry.
#[derive(Default)]
pub struct IntentRegistry {
    flows: RwLock<Vec<Arc<RegisteredFlow>>>,
}

impl IntentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a flow and assigns it the next ordinal, starting at 1.
    pub fn register(&self, flow: IntentFlow) -> Arc<RegisteredFlow> {
        let mut flows = self.flows.write().unwrap_or_else(PoisonError::into_inner);
        let registered = Arc::new(RegisteredFlow {
            id: FlowId::from_ordinal(flows.len() as u64 + 1),
            trigger: flow.trigger,
            cancel: flow.cancel,
            dialog: flow.dialog,
        });
        flows.push(Arc::clone(&registered));
        tracing::debug!(flow = %registered.flow_ref(), "Registered intent flow");
        registered
    }

    /// Number of registered flows.
    pub fn len(&self) -> usize {
        self.flows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First flow whose trigger matcher accepts `intent`, installed into the
    /// session's namespace.
    pub fn find_trigger(
        &self,
        session: &dyn CallSession,
        intent: Option<&IntentMatch>,
    ) -> Option<Arc<RegisteredFlow>> {
        self.find(session, intent, RegisteredFlow::trigger)
    }

    /// First flow whose cancel matcher accepts `intent`, installed into the
    /// session's namespace.
    pub fn find_cancel(
        &self,
        session: &dyn CallSession,
        intent: Option<&IntentMatch>,
    ) -> Option<Arc<RegisteredFlow>> {
        self.find(session, intent, RegisteredFlow::cancel)
    }

    fn find(
        &self,
        session: &dyn CallSession,
        intent: Option<&IntentMatch>,
        matcher: fn(&RegisteredFlow) -> Option<&IntentMatcher>,
    ) -> Option<Arc<RegisteredFlow>> {
        // A pass that never got classified has nothing to match.
        let intent = intent?;

        let found = self
            .flows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|flow| matcher(flow).is_some_and(|m| m.matches(intent)))
            .cloned()?;

        Self::install(session, &found);
        Some(found)
    }

    fn install(session: &dyn CallSession, flow: &RegisteredFlow) {
        let flow_ref = flow.flow_ref();
        if !session.has_flow(&flow_ref) {
            tracing::debug!(flow = %flow_ref, "Installing intent flow into host namespace");
            session.install_flow(flow_ref, Arc::clone(&flow.dialog));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCallSession, NoopDialog};

    fn dialog() -> Arc<dyn Dialog> {
        Arc::new(NoopDialog)
    }

    fn matcher(name: &str) -> IntentMatcher {
        IntentMatcher::new(name).unwrap()
    }

    mod register {
        use super::*;

        #[test]
        fn assigns_increasing_ordinals_from_one() {
            let registry = IntentRegistry::new();
            let first = registry.register(IntentFlow::new(dialog()));
            let second = registry.register(IntentFlow::new(dialog()));
            assert_eq!(first.id(), FlowId::from_ordinal(1));
            assert_eq!(second.id(), FlowId::from_ordinal(2));
            assert_eq!(registry.len(), 2);
        }

        #[test]
        fn separate_registries_do_not_share_flows() {
            let a = IntentRegistry::new();
            let b = IntentRegistry::new();
            a.register(IntentFlow::new(dialog()));
            assert_eq!(a.len(), 1);
            assert!(b.is_empty());
        }
    }

    mod find_trigger {
        use super::*;

        #[test]
        fn returns_none_without_classified_intent() {
            let registry = IntentRegistry::new();
            registry.register(IntentFlow::new(dialog()).trigger_action(matcher("help")));
            let session = InMemoryCallSession::new();
            assert!(registry.find_trigger(&session, None).is_none());
            assert!(session.installed_flows().is_empty());
        }

        #[test]
        fn first_registered_match_wins_over_higher_threshold() {
            let registry = IntentRegistry::new();
            let first = registry.register(IntentFlow::new(dialog()).trigger_action(matcher("help")));
            registry.register(
                IntentFlow::new(dialog())
                    .trigger_action(matcher("help").with_min_score(0.8).unwrap()),
            );
            let session = InMemoryCallSession::new();

            let found = registry
                .find_trigger(&session, Some(&IntentMatch::new("help", 0.95)))
                .unwrap();
            assert_eq!(found.id(), first.id());
        }

        #[test]
        fn skips_flows_without_trigger_matcher() {
            let registry = IntentRegistry::new();
            registry.register(IntentFlow::new(dialog()).cancel_action(matcher("help")));
            let session = InMemoryCallSession::new();
            assert!(registry
                .find_trigger(&session, Some(&IntentMatch::new("help", 0.9)))
                .is_none());
        }

        #[test]
        fn installs_matched_flow_once() {
            let registry = IntentRegistry::new();
            let flow = registry.register(IntentFlow::new(dialog()).trigger_action(matcher("help")));
            let session = InMemoryCallSession::new();
            let intent = IntentMatch::new("help", 0.9);

            registry.find_trigger(&session, Some(&intent));
            registry.find_trigger(&session, Some(&intent));

            assert_eq!(session.installed_flows(), vec![flow.flow_ref()]);
            assert_eq!(session.install_count(), 1);
        }
    }

    mod find_cancel {
        use super::*;

        #[test]
        fn matches_against_cancel_matcher_only() {
            let registry = IntentRegistry::new();
            registry.register(IntentFlow::new(dialog()).trigger_action(matcher("cancel_order")));
            let cancelling = registry.register(
                IntentFlow::new(dialog())
                    .cancel_action(matcher("cancel_order").with_min_score(0.5).unwrap()),
            );
            let session = InMemoryCallSession::new();

            let found = registry
                .find_cancel(&session, Some(&IntentMatch::new("cancel_order", 0.9)))
                .unwrap();
            assert_eq!(found.id(), cancelling.id());
        }

        #[test]
        fn below_threshold_is_no_match() {
            let registry = IntentRegistry::new();
            registry.register(
                IntentFlow::new(dialog())
                    .cancel_action(matcher("cancel_order").with_min_score(0.5).unwrap()),
            );
            let session = InMemoryCallSession::new();
            assert!(registry
                .find_cancel(&session, Some(&IntentMatch::new("cancel_order", 0.3)))
                .is_none());
            assert!(session.installed_flows().is_empty());
        }
    }
}
