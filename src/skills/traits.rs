//! Core skill handler trait
//!
//! A handler is the external unit of work bound to a skill. The registry
//! only holds a shared reference to it; the dispatcher drives it through
//! this asynchronous, cancellable contract.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::invoker::InvocationContext;

/// How a handler finished when it did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The handler returned a value (JSON `null` counts as no result)
    Value(Value),
    /// The handler ran but its return value, if any, is not discoverable
    Void,
}

impl Completion {
    /// Capture any serializable return value
    pub fn value<T: Serialize>(value: T) -> anyhow::Result<Self> {
        Ok(Completion::Value(serde_json::to_value(value)?))
    }

    /// The returned value, if any
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Completion::Value(value) => Some(value),
            Completion::Void => None,
        }
    }
}

/// Executable bound to a skill
#[async_trait]
pub trait SkillHandler: Send + Sync {
    /// Run the handler against one invocation.
    ///
    /// `cancel` fires when the caller abandons the call. Handlers that
    /// notice it may return `Error::Cancelled`; the dispatcher also stops
    /// waiting on its own.
    async fn invoke(
        &self,
        ctx: &InvocationContext,
        cancel: CancellationToken,
    ) -> anyhow::Result<Completion>;
}
