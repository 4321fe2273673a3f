//! Dependency report schema: the resolver's output.
//!
//! The report is the final, ordered answer to "which projects does this
//! method need", plus the unresolved-reference diagnostics gathered along
//! the way. The persisted rendering is deliberately minimal - one project
//! file path per line, alphabetically sorted, no header - so downstream
//! tooling can diff two runs textually.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::ProjectPath;

/// Why a reference could not be attributed to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// The semantic model produced no binding for the identifier.
    UnboundSymbol,

    /// The declaration is in source, but no project in the workspace
    /// produces its containing assembly.
    NoProjectForAssembly,

    /// The assembly came from the package cache, but no project in the
    /// reference closure declares the derived package identity.
    PackageNotIndexed,

    /// The metadata reference matched neither the platform-runtime nor the
    /// package-cache pattern, or was not file-based at all.
    UnrecognizedMetadataReference,
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            UnresolvedReason::UnboundSymbol => "no symbol binding",
            UnresolvedReason::NoProjectForAssembly => {
                "no project found for containing assembly"
            }
            UnresolvedReason::PackageNotIndexed => {
                "no containing project found for package identity name"
            }
            UnresolvedReason::UnrecognizedMetadataReference => {
                "unrecognized metadata reference"
            }
        };
        f.write_str(text)
    }
}

/// A reference that resolution completed on but could not attribute.
///
/// Diagnostics never abort a run; the caller decides whether they are
/// warnings or hard failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedDiagnostic {
    /// The referenced identifier, as written in the method body.
    pub reference: String,

    pub reason: UnresolvedReason,

    /// The package identity or assembly file path in question, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl std::fmt::Display for UnresolvedDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => {
                write!(f, "{}: {} ({detail})", self.reference, self.reason)
            }
            None => write!(f, "{}: {}", self.reference, self.reason),
        }
    }
}

/// The resolved dependency set for one method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyReport {
    /// Project file paths the method needs, deduplicated and sorted
    /// lexicographically. Always contains at least the method's own
    /// containing project.
    pub projects: Vec<ProjectPath>,

    /// Unresolved references, in extraction order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<UnresolvedDiagnostic>,
}

impl DependencyReport {
    /// Writes the persisted text rendering: one project path per line,
    /// UTF-8, no header, no trailing metadata.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn write_lines(&self, output: &mut dyn Write) -> io::Result<()> {
        for project in &self.projects {
            writeln!(output, "{project}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_lines_one_path_per_line() {
        let report = DependencyReport {
            projects: vec![
                ProjectPath::new("source/App/App.csproj"),
                ProjectPath::new("source/Utils/Utils.csproj"),
            ],
            diagnostics: Vec::new(),
        };

        let mut output = Vec::new();
        report.write_lines(&mut output).expect("write should succeed");

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "source/App/App.csproj\nsource/Utils/Utils.csproj\n"
        );
    }

    #[test]
    fn test_write_lines_empty_report() {
        let report = DependencyReport::default();

        let mut output = Vec::new();
        report.write_lines(&mut output).expect("write should succeed");

        assert!(output.is_empty());
    }

    #[test]
    fn test_diagnostic_display_includes_detail() {
        let diagnostic = UnresolvedDiagnostic {
            reference: "JObject".to_string(),
            reason: UnresolvedReason::PackageNotIndexed,
            detail: Some("newtonsoft.json".to_string()),
        };
        assert_eq!(
            diagnostic.to_string(),
            "JObject: no containing project found for package identity name \
             (newtonsoft.json)"
        );
    }
}
