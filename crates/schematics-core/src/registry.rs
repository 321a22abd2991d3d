//! Plugin registries for validators, operators, and conditions
//!
//! Three independent name-indexed registries, each mapping a string
//! identifier to a pluggable function. Registries are plain values owned by
//! the caller's [`crate::Schematics`] instance; there is no process-global
//! state. Registration overwrites any existing name, so re-registration is
//! idempotent. Each registry carries an [`UnknownPolicy`] deciding what a
//! lookup miss means: validators default to `Skip`, operators to `Fail`.
//!
//! Registries are treated as immutable once validation/operation begins;
//! the validation engine takes an owned snapshot before fanning out.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::SchemaState;
use crate::schema::Attributes;

/// Validator contract: `(value, attributes) -> error | ok`.
pub type ValidatorFn = Arc<dyn Fn(&Value, &Attributes) -> anyhow::Result<()> + Send + Sync>;

/// Operator contract: `(value, attributes) -> transformed | None` where
/// `None` means "no change".
pub type OperatorFn = Arc<dyn Fn(&Value, &Attributes) -> Option<Value> + Send + Sync>;

/// Condition contract: `(field-as-record, attributes, schema state) -> bool`.
pub type ConditionFn =
    Arc<dyn for<'a> Fn(&Value, &Attributes, &SchemaState<'a>) -> bool + Send + Sync>;

/// Policy applied when a configured plugin name has no registered function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Silently skip the unknown name.
    Skip,
    /// Fail the surrounding call.
    Fail,
}

/// Name-indexed validator functions.
pub struct ValidatorRegistry {
    fns: HashMap<String, ValidatorFn>,
    policy: UnknownPolicy,
}

impl ValidatorRegistry {
    /// Empty registry with the default skip-unknown policy.
    pub fn new() -> Self {
        Self {
            fns: HashMap::new(),
            policy: UnknownPolicy::Skip,
        }
    }

    /// Registry pre-loaded with the built-in validator set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_validators(&mut registry);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value, &Attributes) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        log::debug!("registering validator: {name}");
        self.fns.insert(name, Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorFn> {
        self.fns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }

    pub fn policy(&self) -> UnknownPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: UnknownPolicy) {
        self.policy = policy;
    }

    /// Owned snapshot handed to concurrent validation tasks.
    pub(crate) fn snapshot(&self) -> ValidatorTable {
        ValidatorTable {
            fns: self.fns.clone(),
            policy: self.policy,
        }
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("names", &self.fns.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Immutable validator snapshot shared by the fan-out tasks of one field.
#[derive(Clone)]
pub(crate) struct ValidatorTable {
    fns: HashMap<String, ValidatorFn>,
    policy: UnknownPolicy,
}

impl ValidatorTable {
    pub(crate) fn get(&self, name: &str) -> Option<&ValidatorFn> {
        self.fns.get(name)
    }

    pub(crate) fn policy(&self) -> UnknownPolicy {
        self.policy
    }
}

/// Name-indexed operator functions.
pub struct OperatorRegistry {
    fns: HashMap<String, OperatorFn>,
    policy: UnknownPolicy,
}

impl OperatorRegistry {
    /// Empty registry with the default fail-unknown policy.
    pub fn new() -> Self {
        Self {
            fns: HashMap::new(),
            policy: UnknownPolicy::Fail,
        }
    }

    /// Registry pre-loaded with the built-in operator set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_operators(&mut registry);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value, &Attributes) -> Option<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        log::debug!("registering operator: {name}");
        self.fns.insert(name, Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&OperatorFn> {
        self.fns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }

    pub fn policy(&self) -> UnknownPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: UnknownPolicy) {
        self.policy = policy;
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("names", &self.fns.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Name-indexed condition predicates.
pub struct ConditionRegistry {
    fns: HashMap<String, ConditionFn>,
}

impl ConditionRegistry {
    pub fn new() -> Self {
        Self {
            fns: HashMap::new(),
        }
    }

    /// Registry pre-loaded with the built-in condition set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_conditions(&mut registry);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: for<'a> Fn(&Value, &Attributes, &SchemaState<'a>) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        log::debug!("registering condition: {name}");
        self.fns.insert(name, Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&ConditionFn> {
        self.fns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("names", &self.fns.keys().collect::<Vec<_>>())
            .finish()
    }
}
