//! Closure-backed handlers
//!
//! Binds the skill's single parameter out of the `{"param": value}`
//! argument object, calls the closure, and captures its return value.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::traits::{Completion, SkillHandler};
use crate::invoker::InvocationContext;

/// Handler wrapping an async closure over one typed argument
pub struct FnHandler<T, R, F, Fut> {
    param: String,
    func: F,
    _marker: PhantomData<fn(T) -> (R, Fut)>,
}

impl<T, R, F, Fut> FnHandler<T, R, F, Fut>
where
    T: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    /// Create a handler binding the argument named `param`
    pub fn new(param: impl Into<String>, func: F) -> Self {
        FnHandler {
            param: param.into(),
            func,
            _marker: PhantomData,
        }
    }

    /// Name of the bound parameter
    pub fn param(&self) -> &str {
        &self.param
    }
}

#[async_trait]
impl<T, R, F, Fut> SkillHandler for FnHandler<T, R, F, Fut>
where
    T: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    async fn invoke(
        &self,
        ctx: &InvocationContext,
        _cancel: CancellationToken,
    ) -> anyhow::Result<Completion> {
        let input: T = ctx.argument(&self.param)?;
        let output = (self.func)(input).await?;
        Completion::value(output)
    }
}

/// Shorthand for [`FnHandler::new`]
pub fn handler_fn<T, R, F, Fut>(param: impl Into<String>, func: F) -> FnHandler<T, R, F, Fut>
where
    T: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    FnHandler::new(param, func)
}
