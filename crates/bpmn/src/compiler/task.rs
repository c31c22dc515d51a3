use guideflow_types::{Step, TaskType, Transition};

use super::{Compiler, prompt_of};
use crate::document::BpmnElement;
use crate::element::ElementKind;
use crate::flow::LiveFlow;

const DEFAULT_BUTTON_TEXT: &str = "Continue";
const SYNTHETIC_END_TITLE: &str = "End of workflow";
const SYNTHETIC_END_BUTTON_TEXT: &str = "End the workflow";

/// Id of the end step added after a task that leads nowhere.
pub(crate) fn synthetic_end_id(task_id: &str) -> String {
    format!("endEvent-{task_id}")
}

impl<'d> Compiler<'d, '_> {
    /// Registers a task step with a single transition.
    ///
    /// A task without live flows gets a synthetic end step. Extra flows are
    /// reported and dropped; only the first target is walked.
    pub(super) fn build_task(&mut self, element: &'d BpmnElement, outgoing: Vec<LiveFlow<'d>>) -> Vec<&'d BpmnElement> {
        let task_type = match element.kind {
            ElementKind::ServiceTask => TaskType::AiExecuted,
            _ => TaskType::Guideline,
        };

        let (transition, successors) = match outgoing.first() {
            None => {
                self.warn(format!(
                    "no flow going out of task {}, adding EndEvent after it",
                    element.id
                ));
                let end_id = synthetic_end_id(&element.id);
                self.register(&end_id, Step::end(SYNTHETIC_END_TITLE));
                (Transition::new(end_id, SYNTHETIC_END_BUTTON_TEXT), Vec::new())
            }
            Some(first) => {
                if outgoing.len() > 1 {
                    self.warn(format!(
                        "multiple outgoing flows from task {}, keeping only the first one",
                        element.id
                    ));
                }
                let button_text = first.label().unwrap_or(DEFAULT_BUTTON_TEXT);
                (Transition::new(first.target.id.clone(), button_text), vec![first.target])
            }
        };

        self.register(
            &element.id,
            Step::Task {
                title: element.name.clone().unwrap_or_default(),
                prompt: prompt_of(element),
                task_type,
                outgoing: transition,
            },
        );
        successors
    }
}
