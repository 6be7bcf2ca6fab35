/// Build outcome of a shader program and its diagnostics

use std::fmt;

use crate::driver::ShaderStage;

/// Which part of the build produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticTag {
    /// Vertex stage compilation
    Vertex,
    /// Fragment stage compilation
    Fragment,
    /// Program linking
    Program,
}

impl DiagnosticTag {
    /// Upper-case tag ("VERTEX", "FRAGMENT", "PROGRAM")
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticTag::Vertex => "VERTEX",
            DiagnosticTag::Fragment => "FRAGMENT",
            DiagnosticTag::Program => "PROGRAM",
        }
    }

    /// Stage this tag refers to (`None` for the program)
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            DiagnosticTag::Vertex => Some(ShaderStage::Vertex),
            DiagnosticTag::Fragment => Some(ShaderStage::Fragment),
            DiagnosticTag::Program => None,
        }
    }
}

impl From<ShaderStage> for DiagnosticTag {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => DiagnosticTag::Vertex,
            ShaderStage::Fragment => DiagnosticTag::Fragment,
        }
    }
}

impl fmt::Display for DiagnosticTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compile or link failure reported by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    /// Failing stage, or `Program` for link failures
    pub tag: DiagnosticTag,
    /// Driver info log, verbatim
    pub log: String,
}

impl ShaderDiagnostic {
    /// Create a diagnostic
    pub fn new(tag: DiagnosticTag, log: impl Into<String>) -> Self {
        Self { tag, log: log.into() }
    }
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            DiagnosticTag::Program => {
                write!(f, "ERROR::PROGRAM_LINKING_ERROR of type: {}\n{}", self.tag, self.log)
            }
            _ => write!(f, "ERROR::SHADER_COMPILATION_ERROR of type: {}\n{}", self.tag, self.log),
        }
    }
}

/// Outcome of building a program
///
/// A program is `Unusable` when any stage failed to compile or linking
/// failed. It is still safe to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramStatus {
    /// Linked and ready for `use_program`
    Usable,
    /// At least one failure, in build order
    Unusable(Vec<ShaderDiagnostic>),
}

impl ProgramStatus {
    /// Whether the program linked
    pub fn is_usable(&self) -> bool {
        matches!(self, ProgramStatus::Usable)
    }

    /// Diagnostics collected during the build (empty when usable)
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        match self {
            ProgramStatus::Usable => &[],
            ProgramStatus::Unusable(diagnostics) => diagnostics,
        }
    }
}

#[cfg(test)]
#[path = "program_status_tests.rs"]
mod tests;
