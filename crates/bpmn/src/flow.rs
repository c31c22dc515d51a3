//! Flow liveness.
//!
//! A sequence flow is live for its source when its `targetRef` resolves to
//! exactly one element of an accepted kind. Flows that fail to resolve are
//! reported and dropped, so they never count toward fan-out.

use crate::document::{BpmnDocument, BpmnElement, SequenceFlow};
use crate::element::ElementKind;
use crate::warning::Diagnostics;

/// A sequence flow paired with the element it resolves to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LiveFlow<'d> {
    pub flow: &'d SequenceFlow,
    pub target: &'d BpmnElement,
}

impl LiveFlow<'_> {
    /// Label of the flow, if it has one.
    pub fn label(&self) -> Option<&str> {
        self.flow.name.as_deref()
    }
}

/// Live outgoing flows of `source_id` whose targets satisfy `accept`, in document order.
pub(crate) fn live_outgoing<'d>(
    document: &'d BpmnDocument,
    source_id: &str,
    accept: fn(ElementKind) -> bool,
    diagnostics: &mut Diagnostics<'_>,
) -> Vec<LiveFlow<'d>> {
    document
        .outgoing_flows(source_id)
        .filter_map(|flow| match document.resolve(&flow.target_ref, accept) {
            Ok(target) => Some(LiveFlow { flow, target }),
            Err(error) => {
                diagnostics.warn(format!("error while searching task: {error}"));
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_unresolvable_and_ambiguous_targets() {
        let xml = r#"<definitions><process>
            <task id="A" /><task id="B" /><task id="Dup" /><userTask id="Dup" /><endEvent id="E" />
            <sequenceFlow id="f1" sourceRef="A" targetRef="B" />
            <sequenceFlow id="f2" sourceRef="A" targetRef="Ghost" />
            <sequenceFlow id="f3" sourceRef="A" targetRef="Dup" />
            <sequenceFlow id="f4" name="Finish" sourceRef="A" targetRef="E" />
        </process></definitions>"#;
        let document = BpmnDocument::parse(xml).expect("parse");
        let mut warnings: Vec<String> = Vec::new();
        let mut diagnostics = Diagnostics::new(&mut warnings);

        let live = live_outgoing(&document, "A", ElementKind::is_flow_target, &mut diagnostics);
        let targets: Vec<_> = live.iter().map(|flow| flow.target.id.as_str()).collect();
        assert_eq!(targets, vec!["B", "E"]);
        assert_eq!(live[1].label(), Some("Finish"));
        drop(diagnostics);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("error while searching task:"));
        assert!(warnings[0].contains("Ghost"));
        assert!(warnings[1].contains("Dup"));
    }

    #[test]
    fn task_like_filter_drops_end_event_targets() {
        let xml = r#"<definitions><process>
            <startEvent id="S" /><endEvent id="E" /><task id="A" />
            <sequenceFlow sourceRef="S" targetRef="E" />
            <sequenceFlow sourceRef="S" targetRef="A" />
        </process></definitions>"#;
        let document = BpmnDocument::parse(xml).expect("parse");
        let mut warnings: Vec<String> = Vec::new();
        let mut diagnostics = Diagnostics::new(&mut warnings);

        let live = live_outgoing(&document, "S", ElementKind::is_task_like, &mut diagnostics);
        let targets: Vec<_> = live.iter().map(|flow| flow.target.id.as_str()).collect();
        assert_eq!(targets, vec!["A"]);
        drop(diagnostics);

        assert_eq!(warnings, vec!["error while searching task: no task found with id E".to_string()]);
    }
}
