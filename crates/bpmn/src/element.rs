//! Classification of BPMN element tags.
//!
//! Only a small subset of BPMN is understood. Anything else in the document is
//! ignored by the pre-pass and can never become a step.

use std::fmt;

/// Element kinds the compiler recognizes, keyed by local tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    StartEvent,
    Task,
    UserTask,
    ServiceTask,
    ExclusiveGateway,
    EndEvent,
}

/// Tags an entry point may resolve to.
pub const SUPPORTED_ENTRY_TAGS: [&str; 4] = ["task", "userTask", "serviceTask", "exclusiveGateway"];

/// Local tag name of a sequence flow.
pub const SEQUENCE_FLOW_TAG: &str = "sequenceFlow";

impl ElementKind {
    /// Classifies a local tag name (namespace prefix already stripped).
    ///
    /// Matching is exact: `userTask` is recognized, `usertask` is not.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "startEvent" => Some(Self::StartEvent),
            "task" => Some(Self::Task),
            "userTask" => Some(Self::UserTask),
            "serviceTask" => Some(Self::ServiceTask),
            "exclusiveGateway" => Some(Self::ExclusiveGateway),
            "endEvent" => Some(Self::EndEvent),
            _ => None,
        }
    }

    /// The BPMN tag this kind was read from.
    pub fn tag(self) -> &'static str {
        match self {
            Self::StartEvent => "startEvent",
            Self::Task => "task",
            Self::UserTask => "userTask",
            Self::ServiceTask => "serviceTask",
            Self::ExclusiveGateway => "exclusiveGateway",
            Self::EndEvent => "endEvent",
        }
    }

    /// Tasks of any flavour and exclusive gateways.
    pub fn is_task_like(self) -> bool {
        matches!(self, Self::Task | Self::UserTask | Self::ServiceTask | Self::ExclusiveGateway)
    }

    /// Kinds a sequence flow may legitimately point at.
    pub fn is_flow_target(self) -> bool {
        self.is_task_like() || self == Self::EndEvent
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_supported_tag() {
        for tag in ["startEvent", "task", "userTask", "serviceTask", "exclusiveGateway", "endEvent"] {
            let kind = ElementKind::from_tag(tag).expect("known tag");
            assert_eq!(kind.tag(), tag);
        }
    }

    #[test]
    fn rejects_unsupported_and_miscased_tags() {
        assert_eq!(ElementKind::from_tag("parallelGateway"), None);
        assert_eq!(ElementKind::from_tag("subProcess"), None);
        assert_eq!(ElementKind::from_tag("UserTask"), None);
    }

    #[test]
    fn end_events_are_flow_targets_but_not_task_like() {
        assert!(ElementKind::EndEvent.is_flow_target());
        assert!(!ElementKind::EndEvent.is_task_like());
        assert!(!ElementKind::StartEvent.is_flow_target());
        assert!(ElementKind::ExclusiveGateway.is_task_like());
    }

    #[test]
    fn entry_tags_match_task_like_kinds() {
        for tag in SUPPORTED_ENTRY_TAGS {
            assert!(ElementKind::from_tag(tag).is_some_and(ElementKind::is_task_like));
        }
    }
}
