//! Compiler from BPMN 2.0 process diagrams to guideflow workflows.
//!
//! Only start events, tasks (plain, user and service), exclusive gateways, end
//! events and sequence flows are understood. The output is a flat
//! [`Workflow`] whose steps reference each other by id.
//!
//! Recoverable anomalies in the diagram (dangling tasks, degenerate gateways,
//! flows to unknown ids, extra start events) are reported through a
//! [`WarningSink`] and compilation carries on. Only a document without any
//! usable start event, or one that is not XML at all, fails.
//!
//! ```
//! let xml = r#"<definitions><process>
//!     <startEvent id="start" /><userTask id="greet" name="Greet the customer" /><endEvent id="done" />
//!     <sequenceFlow sourceRef="start" targetRef="greet" />
//!     <sequenceFlow sourceRef="greet" targetRef="done" />
//! </process></definitions>"#;
//!
//! let mut warnings: Vec<String> = Vec::new();
//! let workflow = guideflow_bpmn::compile_with_warnings(xml, "welcome", &mut warnings)?;
//! assert_eq!(workflow.entry_point, "greet");
//! assert_eq!(workflow.steps.len(), 2);
//! assert!(warnings.is_empty());
//! # Ok::<(), guideflow_bpmn::CompileError>(())
//! ```

pub mod document;
pub mod element;
pub mod error;
pub mod options;
pub mod warning;

mod compiler;
mod entry;
mod flow;

use tracing::info;

pub use document::{BpmnDocument, BpmnElement, SequenceFlow};
pub use element::{ElementKind, SUPPORTED_ENTRY_TAGS};
pub use error::{CompileError, LookupError};
pub use guideflow_types::{Step, TaskType, Transition, Workflow};
pub use options::CompileOptions;
pub use warning::{TracingSink, WarningSink};

use compiler::Compiler;
use entry::resolve_entry_point;
use warning::Diagnostics;

/// Compiles `xml` into a workflow named `name`, logging warnings through `tracing`.
pub fn compile(xml: &str, name: &str) -> Result<Workflow, CompileError> {
    compile_with_warnings(xml, name, &mut TracingSink)
}

/// Compiles `xml`, delivering each warning to `sink`.
pub fn compile_with_warnings(xml: &str, name: &str, sink: &mut impl WarningSink) -> Result<Workflow, CompileError> {
    compile_with_options(xml, &CompileOptions::new(name), sink)
}

/// Compiles `xml` with explicit options.
pub fn compile_with_options(
    xml: &str,
    options: &CompileOptions,
    sink: &mut impl WarningSink,
) -> Result<Workflow, CompileError> {
    let document = BpmnDocument::parse(xml)?;
    compile_document(&document, options, sink)
}

/// Compiles an already indexed document.
///
/// # Errors
///
/// - [`CompileError::NoEntryPoint`] when no start event leads to a task or gateway.
/// - [`CompileError::StrictWarnings`] when `options.strict` is set and anything was reported.
pub fn compile_document(
    document: &BpmnDocument,
    options: &CompileOptions,
    sink: &mut dyn WarningSink,
) -> Result<Workflow, CompileError> {
    let mut diagnostics = Diagnostics::new(sink);
    let entry = resolve_entry_point(document, &mut diagnostics)?;

    let (workflow, mut diagnostics) = Compiler::new(document, &options.name, diagnostics).run(entry.first);

    if options.validate {
        for dangling in workflow.dangling_transitions() {
            diagnostics.warn(dangling.to_string());
        }
    }

    info!(
        workflow = %workflow.name,
        start = %entry.start.id,
        steps = workflow.steps.len(),
        warnings = diagnostics.count(),
        "compiled BPMN workflow"
    );

    if options.strict && diagnostics.count() > 0 {
        return Err(CompileError::StrictWarnings {
            count: diagnostics.count(),
            first: diagnostics.first().unwrap_or_default().to_string(),
        });
    }
    Ok(workflow)
}
