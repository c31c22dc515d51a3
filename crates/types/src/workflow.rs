//! Strongly typed model of a compiled workflow graph.
//!
//! A [`Workflow`] is a flat map from step identifier to [`Step`], plus the
//! identifier of the step to start from. Steps reference each other only by
//! identifier through [`Transition::step_name`], so the structure has no
//! cycles in memory even when the described process loops. The step map
//! preserves insertion order (via `IndexMap`) so serialized output is stable
//! across runs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod validation;

pub use validation::DanglingTransition;

/// Fully compiled workflow ready for runtime consumption.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Caller supplied identifier, opaque to the compiler.
    pub name: String,
    /// Identifier of the first step to execute.
    pub entry_point: String,
    /// Compiled steps keyed by their source element identifier.
    #[serde(default)]
    pub steps: IndexMap<String, Step>,
}

impl Workflow {
    /// Creates an empty workflow with the given name and no entry point yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_point: String::new(),
            steps: IndexMap::new(),
        }
    }

    /// Returns the step registered under `id`, if any.
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.get(id)
    }

    /// Returns the step the workflow starts from.
    pub fn entry_step(&self) -> Option<&Step> {
        self.steps.get(&self.entry_point)
    }

    /// Number of compiled steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when no steps were compiled.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A single compiled node of the workflow graph.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Step {
    /// A unit of work with exactly one way forward.
    #[serde(rename_all = "camelCase")]
    Task {
        title: String,
        prompt: String,
        task_type: TaskType,
        outgoing: Transition,
    },
    /// A branch point offering one transition per answer.
    #[serde(rename_all = "camelCase")]
    Condition {
        title: String,
        prompt: String,
        outgoing: Vec<Transition>,
    },
    /// Terminal step.
    End { title: String },
}

impl Step {
    /// Builds a terminal step.
    pub fn end(title: impl Into<String>) -> Self {
        Step::End { title: title.into() }
    }

    /// Display title of the step regardless of its kind.
    pub fn title(&self) -> &str {
        match self {
            Step::Task { title, .. } | Step::Condition { title, .. } | Step::End { title } => title,
        }
    }

    /// Outgoing transitions in declaration order. Empty for end steps.
    pub fn transitions(&self) -> &[Transition] {
        match self {
            Step::Task { outgoing, .. } => std::slice::from_ref(outgoing),
            Step::Condition { outgoing, .. } => outgoing,
            Step::End { .. } => &[],
        }
    }

    /// Mutable view over the outgoing transitions.
    pub fn transitions_mut(&mut self) -> &mut [Transition] {
        match self {
            Step::Task { outgoing, .. } => std::slice::from_mut(outgoing),
            Step::Condition { outgoing, .. } => outgoing,
            Step::End { .. } => &mut [],
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Step::End { .. })
    }
}

/// How a task is carried out at runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub enum TaskType {
    /// Automatable work, sourced from service tasks.
    #[serde(rename = "ai-executed")]
    AiExecuted,
    /// Instructions a human follows.
    #[serde(rename = "guideline")]
    Guideline,
}

/// Directed edge from one step to the next.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Identifier of the step to move to.
    pub step_name: String,
    /// Label shown on the control that takes this transition.
    pub button_text: String,
    /// Branch answer, present on condition transitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Transition {
    pub fn new(step_name: impl Into<String>, button_text: impl Into<String>) -> Self {
        Self {
            step_name: step_name.into(),
            button_text: button_text.into(),
            answer: None,
        }
    }

    /// Attaches a branch answer.
    pub fn with_answer(mut self, answer: Option<String>) -> Self {
        self.answer = answer;
        self
    }
}
