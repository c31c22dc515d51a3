//! Graph walk that turns indexed BPMN elements into workflow steps.
//!
//! Traversal is a pre-order walk driven by an explicit stack, so deep diagrams
//! cannot exhaust the call stack. Each visited element registers at most one
//! step under its own id. Elements already registered are skipped, which is
//! what stops cycles and diamonds. Single-flow gateways never register a step;
//! they are remembered in `elided` instead so they are skipped too.

mod condition;
mod redirect;
mod task;

use std::collections::HashMap;

use guideflow_types::{Step, Workflow};
use tracing::debug;

use crate::document::{BpmnDocument, BpmnElement};
use crate::element::ElementKind;
use crate::flow::{LiveFlow, live_outgoing};
use crate::warning::Diagnostics;

pub(crate) struct Compiler<'d, 's> {
    document: &'d BpmnDocument,
    workflow: Workflow,
    /// Elided gateway id to the id that replaced it in transitions.
    elided: HashMap<String, String>,
    diagnostics: Diagnostics<'s>,
}

impl<'d, 's> Compiler<'d, 's> {
    pub(crate) fn new(document: &'d BpmnDocument, name: &str, diagnostics: Diagnostics<'s>) -> Self {
        Self {
            document,
            workflow: Workflow::new(name),
            elided: HashMap::new(),
            diagnostics,
        }
    }

    /// Walks everything reachable from `entry` and returns the finished workflow.
    pub(crate) fn run(mut self, entry: &'d BpmnElement) -> (Workflow, Diagnostics<'s>) {
        self.workflow.entry_point = entry.id.clone();

        let mut pending = vec![entry];
        while let Some(element) = pending.pop() {
            let successors = self.visit(element);
            pending.extend(successors.into_iter().rev());
        }

        (self.workflow, self.diagnostics)
    }

    /// Builds the step for `element` and returns the elements to visit next.
    fn visit(&mut self, element: &'d BpmnElement) -> Vec<&'d BpmnElement> {
        if self.workflow.steps.contains_key(&element.id) {
            return Vec::new();
        }
        if let Some(replacement) = self.elided.get(&element.id).cloned() {
            // Another predecessor reached a gateway that was already bypassed.
            let target = self.final_replacement(&element.id, &replacement).unwrap_or(replacement);
            self.redirect(&element.id, &target);
            return Vec::new();
        }

        debug!(id = %element.id, kind = %element.kind, "visiting element");
        let outgoing = live_outgoing(self.document, &element.id, ElementKind::is_flow_target, &mut self.diagnostics);

        match element.kind {
            ElementKind::ExclusiveGateway => self.build_condition(element, outgoing),
            ElementKind::EndEvent => {
                let title = element.name.clone().unwrap_or_default();
                self.register(&element.id, Step::end(title));
                outgoing.into_iter().map(|flow| flow.target).collect()
            }
            // Every other kind is treated as a task.
            _ => self.build_task(element, outgoing),
        }
    }

    /// Inserts `step` under `id` unless the id is taken. Returns whether it was inserted.
    fn register(&mut self, id: &str, step: Step) -> bool {
        if self.workflow.steps.contains_key(id) {
            debug!(%id, "step already registered, skipping");
            return false;
        }
        self.workflow.steps.insert(id.to_string(), step);
        true
    }

    fn warn(&mut self, message: String) {
        self.diagnostics.warn(message);
    }
}

/// Prompt text for a step built from `element`.
fn prompt_of(element: &BpmnElement) -> String {
    element.documentation.clone().unwrap_or_default()
}

fn targets<'d>(flows: &[LiveFlow<'d>]) -> Vec<&'d BpmnElement> {
    flows.iter().map(|flow| flow.target).collect()
}
