//! Assemble a [`RepairEngine`] from a snapshot and whichever ports the host supplies.

use crate::adapters::{ItemTagStore, NoopScheduler, PermissionSet, SystemClock, TracingFeedback};
use repairkit_config::ConfigSnapshot;
use repairkit_domain::ports::{
    Clock, CurrencySink, FeedbackSink, PermissionOracle, Scheduler, TagStore,
};
use repairkit_domain::{EnginePorts, RepairEngine};
use std::sync::Arc;

/// Builder for [`RepairEngine`].
///
/// Unset ports default to: no permissions, item-backed tags, the system clock, a discarding
/// scheduler, log-only feedback and no currency port.
pub struct EngineBuilder {
    snapshot: ConfigSnapshot,
    permissions: Option<Arc<dyn PermissionOracle>>,
    tags: Option<Arc<dyn TagStore>>,
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    feedback: Option<Arc<dyn FeedbackSink>>,
    currency: Option<Arc<dyn CurrencySink>>,
}

impl EngineBuilder {
    pub fn new(snapshot: ConfigSnapshot) -> Self {
        Self {
            snapshot,
            permissions: None,
            tags: None,
            clock: None,
            scheduler: None,
            feedback: None,
            currency: None,
        }
    }

    pub fn permissions(mut self, permissions: Arc<dyn PermissionOracle>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn tags(mut self, tags: Arc<dyn TagStore>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn feedback(mut self, feedback: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn currency(mut self, currency: Arc<dyn CurrencySink>) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn build(self) -> RepairEngine {
        let permissions: Arc<dyn PermissionOracle> = match self.permissions {
            Some(permissions) => permissions,
            None => Arc::new(PermissionSet::new()),
        };
        let tags: Arc<dyn TagStore> = match self.tags {
            Some(tags) => tags,
            None => Arc::new(ItemTagStore),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let scheduler: Arc<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(NoopScheduler),
        };
        let feedback: Arc<dyn FeedbackSink> = match self.feedback {
            Some(feedback) => feedback,
            None => Arc::new(TracingFeedback),
        };

        let ports = EnginePorts {
            permissions,
            tags,
            clock,
            scheduler,
            feedback,
            currency: self.currency,
        };
        RepairEngine::new(self.snapshot, ports)
    }
}
