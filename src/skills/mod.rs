//! Skills module - Externally implemented capabilities the assistant can call
//!
//! A skill pairs a name and description with a handler that does the work.
//! Skills are registered into a `SkillRegistry`; the invoker advertises them
//! to the model as function tools and dispatches calls back to them.
//!
//! ## Adding a Skill
//!
//! 1. Implement `SkillHandler` for a type, or use `Skill::from_fn` with an
//!    async closure over one typed argument
//! 2. Build a `Skill` (optionally with a hand-written parameter schema)
//! 3. Register it with `SkillRegistry::register`

mod handler;
mod registry;
mod traits;

// Core trait and types
pub use traits::{Completion, SkillHandler};

// Registry
pub use registry::{Skill, SkillRegistry};

// Closure adapter
pub use handler::{handler_fn, FnHandler};
