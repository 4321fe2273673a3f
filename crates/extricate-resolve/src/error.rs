//! Error types for the extricate-resolve crate.

use std::backtrace::Backtrace;
use std::fmt;

/// Error type for method dependency resolution operations.
///
/// Only structural precondition violations are raised as errors: a cyclic
/// project graph, a collaborator that cannot produce analysis input, or a
/// failure at the stream boundary. Per-reference resolution failures are
/// data (unresolved diagnostics), not errors.
#[derive(Debug)]
pub struct ResolveError {
    kind: ResolveErrorKind,
    backtrace: Backtrace,
}

/// Internal error variants. Not exposed publicly; use `is_xxx()` methods instead.
#[derive(Debug)]
pub(crate) enum ResolveErrorKind {
    /// The project reference graph contains a cycle.
    CyclicDependency { project: String },
    /// The workspace service could not supply analysis input (missing
    /// project, unresolvable method, absent semantic model).
    AnalysisUnavailable(Box<dyn std::error::Error + Send + Sync>),
    /// The input is not a valid workspace snapshot.
    Deserialization(serde_json::Error),
    /// I/O error at the stream boundary.
    Io(std::io::Error),
}

impl ResolveError {
    /// Creates an error from an error kind, capturing a backtrace.
    pub(crate) fn new(kind: ResolveErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a cyclic-dependency error naming a project on the cycle.
    pub(crate) fn cyclic_dependency(project: impl Into<String>) -> Self {
        Self::new(ResolveErrorKind::CyclicDependency {
            project: project.into(),
        })
    }

    /// Creates an analysis-unavailable error from any collaborator failure.
    pub(crate) fn analysis_unavailable(
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::new(ResolveErrorKind::AnalysisUnavailable(err.into()))
    }

    /// Returns true if this error is due to a project reference cycle.
    pub fn is_cyclic_dependency(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::CyclicDependency { .. })
    }

    /// Returns true if this error is due to missing analysis input.
    pub fn is_analysis_unavailable(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::AnalysisUnavailable(_))
    }

    /// Returns true if this error is due to snapshot deserialization failure.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::Deserialization(_))
    }

    /// Returns true if this error is due to I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::Io(_))
    }

    /// Returns the backtrace captured when this error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for ResolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveErrorKind::CyclicDependency { project } => {
                write!(f, "project reference cycle through '{project}'")
            }
            ResolveErrorKind::AnalysisUnavailable(err) => {
                write!(f, "analysis unavailable: {err}")
            }
            ResolveErrorKind::Deserialization(err) => {
                write!(f, "failed to parse workspace snapshot: {err}")
            }
            ResolveErrorKind::Io(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Summary of what happened.
        writeln!(f, "{}", self.kind)?;

        // Backtrace (will be empty unless RUST_BACKTRACE is set).
        write!(f, "{}", self.backtrace)
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ResolveErrorKind::CyclicDependency { .. } => None,
            ResolveErrorKind::AnalysisUnavailable(err) => Some(err.as_ref()),
            ResolveErrorKind::Deserialization(err) => Some(err),
            ResolveErrorKind::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ResolveErrorKind::Io(err))
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ResolveErrorKind::Deserialization(err))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_cyclic_dependency() {
        let err = ResolveError::cyclic_dependency("A.csproj");

        assert!(err.is_cyclic_dependency());
        assert!(!err.is_analysis_unavailable());
        assert!(!err.is_io());

        assert!(err.to_string().contains("cycle through 'A.csproj'"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_analysis_unavailable() {
        let err =
            ResolveError::analysis_unavailable("no semantic model produced");

        assert!(err.is_analysis_unavailable());
        assert!(!err.is_cyclic_dependency());

        assert!(err.to_string().contains("analysis unavailable"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_deserialization_from() {
        let json_err =
            serde_json::from_str::<String>("not valid json").unwrap_err();
        let err = ResolveError::from(json_err);

        assert!(err.is_deserialization());
        assert!(!err.is_io());

        assert!(err.to_string().contains("failed to parse workspace snapshot"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_from() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ResolveError::from(io_err);

        assert!(err.is_io());
        assert!(!err.is_deserialization());

        assert!(err.to_string().contains("I/O error"));
        assert!(err.source().is_some());
    }
}
