//! Per-type plan cache.

use super::{TypePlan, compile_plan};
use crate::config::RuleConfiguration;
use crate::value::TypeDescriptor;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Memoizes compiled plans per configured type for the life of the cache.
///
/// Reads take a shared lock. On a miss the lock is released, the plan is
/// compiled, and then inserted under the write lock; if another caller
/// stored a plan for the same type meanwhile, that stored plan is kept and
/// returned.
///
/// Only types with a configuration section are stored, so the cache never
/// holds more entries than the configuration names types (times the
/// descriptors they are seen through). Type names taken from input
/// documents cannot grow it.
#[derive(Debug)]
pub struct PlanCache {
    config: RuleConfiguration,
    plans: RwLock<HashMap<TypeDescriptor, Arc<TypePlan>>>,
}

impl PlanCache {
    pub fn new(config: RuleConfiguration) -> Self {
        Self {
            config,
            plans: RwLock::new(HashMap::new()),
        }
    }

    /// Plan for `descriptor`, compiling it on first use.
    ///
    /// An unconfigured type gets a fresh empty plan that is not stored.
    pub fn plan_for(&self, descriptor: &TypeDescriptor) -> Arc<TypePlan> {
        if let Some(plan) = self.plans.read().get(descriptor) {
            return Arc::clone(plan);
        }

        if self.config.type_section(descriptor.name()).is_none() {
            trace!(type_name = descriptor.name(), "no rule configuration for type");
            return Arc::new(TypePlan::empty(descriptor.name()));
        }

        let compiled = Arc::new(compile_plan(&self.config, descriptor));

        let mut plans = self.plans.write();
        let stored = plans.entry(descriptor.clone()).or_insert_with(|| {
            debug!(type_name = descriptor.name(), "caching validation plan");
            compiled
        });
        Arc::clone(stored)
    }

    /// True once a plan for `descriptor` has been compiled and stored.
    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.plans.read().contains_key(descriptor)
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &RuleConfiguration {
        &self.config
    }
}
