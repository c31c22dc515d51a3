//! Shared type definitions for compiled guideflow workflows.
//!
//! The compiler crate produces these values and downstream consumers (the
//! conversational runtime, the CLI) read them. Everything here serializes to
//! plain JSON objects with camelCase keys.

pub mod workflow;

pub use workflow::{Step, TaskType, Transition, Workflow};
