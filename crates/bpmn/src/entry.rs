//! Entry point resolution.
//!
//! The first start event, in document order, that leads to a task-like
//! element wins. Every other start event is reported and ignored, as are
//! start events without a usable outgoing flow.

use tracing::debug;

use crate::document::{BpmnDocument, BpmnElement};
use crate::element::{ElementKind, SUPPORTED_ENTRY_TAGS};
use crate::error::CompileError;
use crate::flow::live_outgoing;
use crate::warning::Diagnostics;

/// The chosen start event and the first element reached from it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EntryPoint<'d> {
    pub start: &'d BpmnElement,
    pub first: &'d BpmnElement,
}

pub(crate) fn resolve_entry_point<'d>(
    document: &'d BpmnDocument,
    diagnostics: &mut Diagnostics<'_>,
) -> Result<EntryPoint<'d>, CompileError> {
    let mut chosen: Option<EntryPoint<'d>> = None;

    for start in document.start_events() {
        if let Some(entry) = &chosen {
            diagnostics.warn(format!(
                "multiple start events detected, keeping only the first ({}), ignoring {}",
                entry.start.id, start.id
            ));
            continue;
        }
        chosen = entry_from_start(document, start, diagnostics);
    }

    chosen.ok_or_else(|| CompileError::NoEntryPoint {
        supported: SUPPORTED_ENTRY_TAGS.join(", "),
    })
}

fn entry_from_start<'d>(
    document: &'d BpmnDocument,
    start: &'d BpmnElement,
    diagnostics: &mut Diagnostics<'_>,
) -> Option<EntryPoint<'d>> {
    let outgoing = live_outgoing(document, &start.id, ElementKind::is_task_like, diagnostics);
    let Some(flow) = outgoing.first() else {
        diagnostics.warn(format!("no flow going out of start event {}, ignoring it", start.id));
        return None;
    };
    if outgoing.len() > 1 {
        diagnostics.warn(format!(
            "multiple outgoing flows from start event {}, keeping only the first one",
            start.id
        ));
    }

    debug!(start = %start.id, entry = %flow.target.id, "resolved entry point");
    Some(EntryPoint {
        start,
        first: flow.target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(xml: &str) -> (Result<String, CompileError>, Vec<String>) {
        let document = BpmnDocument::parse(xml).expect("parse");
        let mut warnings: Vec<String> = Vec::new();
        let mut diagnostics = Diagnostics::new(&mut warnings);
        let entry = resolve_entry_point(&document, &mut diagnostics).map(|entry| entry.first.id.clone());
        drop(diagnostics);
        (entry, warnings)
    }

    #[test]
    fn picks_first_target_of_single_start() {
        let (entry, warnings) = resolve(
            r#"<definitions><process>
                <startEvent id="S" /><userTask id="A" />
                <sequenceFlow sourceRef="S" targetRef="A" />
            </process></definitions>"#,
        );
        assert_eq!(entry.expect("entry"), "A");
        assert!(warnings.is_empty());
    }

    #[test]
    fn keeps_first_start_and_warns_about_the_rest() {
        let (entry, warnings) = resolve(
            r#"<definitions><process>
                <startEvent id="S1" /><startEvent id="S2" /><task id="A" /><task id="B" />
                <sequenceFlow sourceRef="S1" targetRef="A" />
                <sequenceFlow sourceRef="S2" targetRef="B" />
            </process></definitions>"#,
        );
        assert_eq!(entry.expect("entry"), "A");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("multiple start events"));
        assert!(warnings[0].contains("S2"));
    }

    #[test]
    fn skips_start_without_flows_and_uses_next_one() {
        let (entry, warnings) = resolve(
            r#"<definitions><process>
                <startEvent id="S1" /><startEvent id="S2" /><task id="B" />
                <sequenceFlow sourceRef="S2" targetRef="B" />
            </process></definitions>"#,
        );
        assert_eq!(entry.expect("entry"), "B");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("no flow going out of start event S1"));
    }

    #[test]
    fn warns_about_extra_start_flows() {
        let (entry, warnings) = resolve(
            r#"<definitions><process>
                <startEvent id="S" /><task id="A" /><task id="B" />
                <sequenceFlow sourceRef="S" targetRef="A" />
                <sequenceFlow sourceRef="S" targetRef="B" />
            </process></definitions>"#,
        );
        assert_eq!(entry.expect("entry"), "A");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("keeping only the first one"));
    }

    #[test]
    fn start_wired_straight_to_end_is_discarded() {
        let (entry, warnings) = resolve(
            r#"<definitions><process>
                <startEvent id="S" /><endEvent id="E" />
                <sequenceFlow sourceRef="S" targetRef="E" />
            </process></definitions>"#,
        );
        assert!(matches!(entry, Err(CompileError::NoEntryPoint { .. })));
        assert_eq!(warnings.len(), 2, "warnings: {:?}", warnings);
        assert!(warnings[0].contains("error while searching task"));
        assert!(warnings[1].contains("no flow going out of start event S"));
    }

    #[test]
    fn end_event_flow_does_not_hide_later_task_flow() {
        let (entry, warnings) = resolve(
            r#"<definitions><process>
                <startEvent id="S" /><endEvent id="E" /><task id="A" />
                <sequenceFlow sourceRef="S" targetRef="E" />
                <sequenceFlow sourceRef="S" targetRef="A" />
                <sequenceFlow sourceRef="A" targetRef="E" />
            </process></definitions>"#,
        );
        assert_eq!(entry.expect("entry"), "A");
        assert_eq!(warnings.len(), 1, "warnings: {:?}", warnings);
        assert!(warnings[0].contains("no task found with id E"));
        assert!(!warnings.iter().any(|warning| warning.contains("multiple outgoing flows")));
    }

    #[test]
    fn start_with_unresolvable_target_falls_through_to_next_start() {
        let (entry, warnings) = resolve(
            r#"<definitions><process>
                <startEvent id="S1" /><startEvent id="S2" /><task id="B" />
                <sequenceFlow sourceRef="S1" targetRef="Ghost" />
                <sequenceFlow sourceRef="S2" targetRef="B" />
            </process></definitions>"#,
        );
        assert_eq!(entry.expect("entry"), "B");
        assert_eq!(warnings.len(), 2, "warnings: {:?}", warnings);
        assert!(warnings[0].contains("Ghost"));
        assert!(warnings[1].contains("no flow going out of start event S1"));
    }

    #[test]
    fn missing_start_event_is_fatal() {
        let (entry, warnings) = resolve("<definitions><process><task id=\"A\" /></process></definitions>");
        let error = entry.expect_err("no start event");
        assert!(error.to_string().contains("exclusiveGateway"));
        assert!(warnings.is_empty());
    }
}
