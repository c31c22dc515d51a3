//! Structural checks over a compiled workflow.
//!
//! The compiler guarantees that every transition resolves once compilation
//! finishes, but consumers loading workflows from disk get no such promise.
//! These helpers report broken references without failing hard so callers can
//! decide how strict to be.

use std::fmt;

use super::Workflow;

/// A transition whose target is not a registered step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingTransition {
    /// Step that owns the transition.
    pub from: String,
    /// Missing target identifier.
    pub to: String,
}

impl fmt::Display for DanglingTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition from step {} points to unknown step {}", self.from, self.to)
    }
}

impl Workflow {
    /// Lists every transition whose `step_name` has no matching step, in step order.
    pub fn dangling_transitions(&self) -> Vec<DanglingTransition> {
        let steps = &self.steps;
        steps
            .iter()
            .flat_map(move |(from, step)| {
                step.transitions()
                    .iter()
                    .filter(move |transition| !steps.contains_key(&transition.step_name))
                    .map(move |transition| DanglingTransition {
                        from: from.clone(),
                        to: transition.step_name.clone(),
                    })
            })
            .collect()
    }

    /// Iterates over every transition target referenced by any step.
    pub fn step_targets(&self) -> impl Iterator<Item = &str> {
        self.steps
            .values()
            .flat_map(|step| step.transitions().iter().map(|transition| transition.step_name.as_str()))
    }

    /// True when the entry point and every transition resolve to a registered step.
    pub fn is_closed(&self) -> bool {
        self.steps.contains_key(&self.entry_point) && self.dangling_transitions().is_empty()
    }
}
