//! Skill registry - name to handler mapping
//!
//! The registry is the only shared mutable state in the crate. Reads
//! (lookup, listing) share a read lock; register and unregister take the
//! write lock. Skills are handed out as `Arc`s, so an invocation that has
//! already resolved its skill is unaffected by a later unregister.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::handler::FnHandler;
use super::traits::SkillHandler;
use crate::config::DuplicatePolicy;
use crate::error::{Error, Result};
use crate::schema::{ParameterShape, SchemaType};

/// A registered skill (immutable once built)
#[derive(Clone)]
pub struct Skill {
    name: String,
    description: String,
    parameter_schema: Option<String>,
    parameter: ParameterShape,
    handler: Arc<dyn SkillHandler>,
}

impl Skill {
    /// Create a skill whose parameter schema will be inferred from `parameter`
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter: ParameterShape,
        handler: Arc<dyn SkillHandler>,
    ) -> Self {
        Skill {
            name: name.into(),
            description: description.into(),
            parameter_schema: None,
            parameter,
            handler,
        }
    }

    /// Create a skill from an async closure taking one typed argument.
    ///
    /// The declared parameter type comes from `T`'s [`SchemaType`].
    pub fn from_fn<T, R, F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        param: impl Into<String>,
        func: F,
    ) -> Self
    where
        T: SchemaType + DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        let param = param.into();
        let shape = ParameterShape::of::<T>(param.clone());
        Self::new(name, description, shape, Arc::new(FnHandler::new(param, func)))
    }

    /// Attach a pre-authored JSON-Schema for the parameters
    pub fn with_parameter_schema(mut self, schema: impl Into<String>) -> Self {
        self.parameter_schema = Some(schema.into());
        self
    }

    /// Skill name (also the tool name shown to the model)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description shown to the model
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Explicit parameter schema, if one was supplied
    pub fn parameter_schema(&self) -> Option<&str> {
        self.parameter_schema.as_deref()
    }

    /// The handler's single input parameter
    pub fn parameter(&self) -> &ParameterShape {
        &self.parameter
    }

    /// Shared reference to the handler
    pub fn handler(&self) -> Arc<dyn SkillHandler> {
        Arc::clone(&self.handler)
    }
}

impl std::fmt::Debug for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skill")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameter_schema", &self.parameter_schema)
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}

/// Case-insensitive registry key
fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Registry of skills keyed by case-insensitive name
pub struct SkillRegistry {
    skills: RwLock<BTreeMap<String, Arc<Skill>>>,
    duplicate_policy: DuplicatePolicy,
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillRegistry {
    /// Create a new empty registry that rejects duplicate names
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create a new empty registry with the given duplicate policy
    pub fn with_policy(duplicate_policy: DuplicatePolicy) -> Self {
        SkillRegistry {
            skills: RwLock::new(BTreeMap::new()),
            duplicate_policy,
        }
    }

    // Every mutation is a single insert or remove, so a poisoned lock
    // never guards a half-updated map.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<Skill>>> {
        self.skills.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<Skill>>> {
        self.skills.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Duplicate-name policy in effect
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Register a skill
    pub fn register(&self, skill: Skill) -> Result<()> {
        if skill.name().trim().is_empty() {
            return Err(Error::InvalidSkill("Skill name must not be empty".to_string()));
        }

        let key = fold(skill.name());
        let mut skills = self.write();

        if let Some(existing) = skills.get(&key) {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(Error::DuplicateSkill(skill.name().to_string()));
                }
                DuplicatePolicy::Ignore => {
                    warn!(
                        skill = %skill.name(),
                        existing = %existing.name(),
                        "Skill already registered, keeping the existing registration"
                    );
                    return Ok(());
                }
                DuplicatePolicy::Replace => {
                    warn!(
                        skill = %skill.name(),
                        existing = %existing.name(),
                        "Skill already registered, replacing it"
                    );
                }
            }
        }

        info!(skill = %skill.name(), "Registering skill");
        skills.insert(key, Arc::new(skill));
        Ok(())
    }

    /// Unregister a skill, returning it if it was present
    pub fn unregister(&self, name: &str) -> Option<Arc<Skill>> {
        info!(skill = %name, "Unregistering skill");
        self.write().remove(&fold(name))
    }

    /// Get a skill by name
    pub fn get(&self, name: &str) -> Option<Arc<Skill>> {
        self.read().get(&fold(name)).cloned()
    }

    /// Get a skill by name, failing if it is not registered
    pub fn lookup(&self, name: &str) -> Result<Arc<Skill>> {
        self.get(name)
            .ok_or_else(|| Error::UnknownSkill(name.to_string()))
    }

    /// Snapshot of every registered skill
    pub fn list_all(&self) -> Vec<Arc<Skill>> {
        self.read().values().cloned().collect()
    }

    /// Check whether a skill is registered
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(&fold(name))
    }

    /// List skill names as registered
    pub fn names(&self) -> Vec<String> {
        self.read().values().map(|s| s.name().to_string()).collect()
    }

    /// Get skill count
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
