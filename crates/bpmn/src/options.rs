//! Compilation settings.

/// Knobs accepted by [`compile_with_options`](crate::compile_with_options).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Name stored on the produced workflow.
    pub name: String,
    /// Turn any warning into [`CompileError::StrictWarnings`](crate::CompileError::StrictWarnings).
    pub strict: bool,
    /// Report transitions that do not resolve to a step once traversal ends.
    pub validate: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            strict: false,
            validate: true,
        }
    }
}

impl CompileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}
