//! Owned, indexed view of a BPMN document.
//!
//! The XML tree is walked once. Recognized elements are copied into a table in
//! document order, and two indexes are built on top of it: element positions
//! by `id`, and outgoing sequence flows by `sourceRef`. Every later lookup is a
//! hash probe instead of a scan over the tree.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::element::{ElementKind, SEQUENCE_FLOW_TAG};
use crate::error::{CompileError, LookupError};

/// Identifier used for a start event that carries no `id` attribute.
pub const DEFAULT_START_ID: &str = "start";

/// A recognized flow node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpmnElement {
    pub id: String,
    /// The `name` attribute. Empty names are treated as absent.
    pub name: Option<String>,
    pub kind: ElementKind,
    /// Trimmed text of the first `documentation` child, if any.
    pub documentation: Option<String>,
}

/// A directed, optionally labelled edge between two elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFlow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub source_ref: String,
    pub target_ref: String,
}

#[derive(Debug, Clone, Default)]
pub struct BpmnDocument {
    elements: Vec<BpmnElement>,
    flows: Vec<SequenceFlow>,
    by_id: HashMap<String, Vec<usize>>,
    outgoing: HashMap<String, Vec<usize>>,
    start_events: Vec<usize>,
}

impl BpmnDocument {
    /// Parses XML text and indexes it.
    pub fn parse(xml: &str) -> Result<Self, CompileError> {
        let document = Document::parse(xml)?;
        Ok(Self::from_xml(&document))
    }

    /// Indexes an already parsed XML tree.
    pub fn from_xml(document: &Document<'_>) -> Self {
        let mut indexed = Self::default();
        for node in document.descendants().filter(Node::is_element) {
            let tag = node.tag_name().name();
            if tag == SEQUENCE_FLOW_TAG {
                indexed.push_flow(read_flow(&node));
            } else if let Some(kind) = ElementKind::from_tag(tag) {
                indexed.push_element(read_element(&node, kind));
            }
        }
        indexed
    }

    fn push_element(&mut self, element: BpmnElement) {
        let position = self.elements.len();
        if element.kind == ElementKind::StartEvent {
            self.start_events.push(position);
        }
        self.by_id.entry(element.id.clone()).or_default().push(position);
        self.elements.push(element);
    }

    fn push_flow(&mut self, flow: SequenceFlow) {
        let position = self.flows.len();
        if !flow.source_ref.is_empty() {
            self.outgoing.entry(flow.source_ref.clone()).or_default().push(position);
        }
        self.flows.push(flow);
    }

    /// All recognized elements in document order.
    pub fn elements(&self) -> &[BpmnElement] {
        &self.elements
    }

    /// All sequence flows in document order.
    pub fn flows(&self) -> &[SequenceFlow] {
        &self.flows
    }

    /// Start events in document order.
    pub fn start_events(&self) -> impl Iterator<Item = &BpmnElement> {
        self.start_events.iter().map(|&position| &self.elements[position])
    }

    /// Sequence flows whose `sourceRef` is `source_id`, in document order.
    pub fn outgoing_flows(&self, source_id: &str) -> impl Iterator<Item = &SequenceFlow> {
        self.outgoing
            .get(source_id)
            .into_iter()
            .flatten()
            .map(|&position| &self.flows[position])
    }

    /// Resolves `id` to exactly one element whose kind satisfies `accept`.
    ///
    /// Elements of other kinds sharing the id are ignored, so a task and an
    /// unrelated start event with the same id do not count as a duplicate.
    pub fn resolve(&self, id: &str, accept: impl Fn(ElementKind) -> bool) -> Result<&BpmnElement, LookupError> {
        let mut matches = self
            .by_id
            .get(id)
            .into_iter()
            .flatten()
            .map(|&position| &self.elements[position])
            .filter(|element| accept(element.kind));

        let Some(first) = matches.next() else {
            return Err(LookupError::TaskNotFound { id: id.to_string() });
        };
        let extra = matches.count();
        if extra > 0 {
            return Err(LookupError::DuplicateTask {
                id: id.to_string(),
                count: extra + 1,
            });
        }
        Ok(first)
    }
}

fn non_empty_attribute(node: &Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn read_element(node: &Node<'_, '_>, kind: ElementKind) -> BpmnElement {
    let id = match non_empty_attribute(node, "id") {
        Some(id) => id,
        None if kind == ElementKind::StartEvent => DEFAULT_START_ID.to_string(),
        None => String::new(),
    };
    let documentation = node
        .children()
        .find(|child| child.is_element() && child.tag_name().name() == "documentation")
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    BpmnElement {
        id,
        name: non_empty_attribute(node, "name"),
        kind,
        documentation,
    }
}

fn read_flow(node: &Node<'_, '_>) -> SequenceFlow {
    SequenceFlow {
        id: non_empty_attribute(node, "id"),
        name: non_empty_attribute(node, "name"),
        source_ref: node.attribute("sourceRef").unwrap_or_default().to_string(),
        target_ref: node.attribute("targetRef").unwrap_or_default().to_string(),
    }
}
