//! The workspace service boundary.
//!
//! Everything the resolver needs from the outside world - the project
//! graph, method selection, and per-identifier symbol resolution - comes
//! through the [`Workspace`] trait. The resolver holds the handle for the
//! duration of a single resolution call and only reads through it; it never
//! caches anything across calls.
//!
//! [`SnapshotWorkspace`] is the production implementation, backed by a
//! [`WorkspaceSnapshot`] the compiler front end serialized ahead of time.

use std::collections::HashMap;

use extricate_schemas::{
    MethodBody, Project, ProjectPath, SymbolInfo, SymbolReferenceNode,
    WorkspaceSnapshot,
};
use tracing::debug;

use crate::error::ResolveError;

/// Read-only access to one resolution run's analysis context.
///
/// `Sync` is required so independent references can be classified on a
/// worker pool; implementations must not mutate shared state on reads.
pub trait Workspace: Sync {
    /// Looks up a project by its file path.
    ///
    /// # Errors
    ///
    /// Returns an analysis-unavailable error if the workspace has no
    /// project at `path` - the reference closure is a collaborator
    /// guarantee, so a dangling project reference is a contract violation.
    fn project(&self, path: &str) -> Result<&Project, ResolveError>;

    /// Resolves the analysis target method by its selection coordinates.
    ///
    /// # Errors
    ///
    /// Returns an analysis-unavailable error if the method is unknown.
    fn resolve_method(
        &self,
        project: &str,
        type_name: &str,
        method_name: &str,
    ) -> Result<&MethodBody, ResolveError>;

    /// Returns the front end's binding for an identifier node, if it
    /// produced one. Absence is a valid answer, surfaced downstream as an
    /// unresolved diagnostic.
    fn resolve_symbol(&self, node: &SymbolReferenceNode) -> Option<SymbolInfo>;

    /// Maps an assembly identity name to the project that produces it.
    /// Returns `None` when no project does - i.e. the assembly is not a
    /// project output.
    fn assembly_to_project(&self, assembly_name: &str) -> Option<&ProjectPath>;

    /// Returns the on-disk file path of the compilation's metadata
    /// reference for an assembly, if the reference is file-based.
    fn metadata_reference_file_path(&self, assembly_name: &str)
    -> Option<&str>;
}

/// A [`Workspace`] backed by a serialized snapshot.
///
/// Construction indexes the snapshot's projects by path and by produced
/// assembly name; all trait methods are then map lookups.
pub struct SnapshotWorkspace<'a> {
    snapshot: &'a WorkspaceSnapshot,
    projects_by_path: HashMap<&'a str, &'a Project>,
    projects_by_assembly: HashMap<&'a str, &'a ProjectPath>,
}

impl<'a> SnapshotWorkspace<'a> {
    /// Builds the lookup indexes over a snapshot.
    pub fn new(snapshot: &'a WorkspaceSnapshot) -> Self {
        let mut projects_by_path = HashMap::new();
        let mut projects_by_assembly = HashMap::new();

        for project in &snapshot.projects {
            if let Some(previous) =
                projects_by_path.insert(project.path.as_str(), project)
            {
                debug!(
                    path = %previous.path,
                    "duplicate project path in snapshot, keeping later entry"
                );
            }
            // First writer wins for assembly names: two projects producing
            // the same assembly is a workspace configuration problem, and
            // keeping the first matches the path-ordering the snapshot
            // producer emitted.
            projects_by_assembly
                .entry(project.assembly_name())
                .or_insert(&project.path);
        }

        Self {
            snapshot,
            projects_by_path,
            projects_by_assembly,
        }
    }
}

impl Workspace for SnapshotWorkspace<'_> {
    fn project(&self, path: &str) -> Result<&Project, ResolveError> {
        self.projects_by_path.get(path).copied().ok_or_else(|| {
            ResolveError::analysis_unavailable(format!(
                "project not present in snapshot: {path}"
            ))
        })
    }

    fn resolve_method(
        &self,
        project: &str,
        type_name: &str,
        method_name: &str,
    ) -> Result<&MethodBody, ResolveError> {
        self.snapshot
            .methods
            .iter()
            .find(|m| {
                m.project.as_str() == project
                    && m.type_name == type_name
                    && m.method_name == method_name
            })
            .map(|m| &m.body)
            .ok_or_else(|| {
                ResolveError::analysis_unavailable(format!(
                    "method not present in snapshot: \
                     {project} {type_name}.{method_name}"
                ))
            })
    }

    fn resolve_symbol(
        &self,
        node: &SymbolReferenceNode,
    ) -> Option<SymbolInfo> {
        // The snapshot embeds each node's binding directly.
        node.symbol.clone()
    }

    fn assembly_to_project(&self, assembly_name: &str) -> Option<&ProjectPath> {
        self.projects_by_assembly.get(assembly_name).copied()
    }

    fn metadata_reference_file_path(
        &self,
        assembly_name: &str,
    ) -> Option<&str> {
        self.snapshot
            .metadata_references
            .get(assembly_name)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use extricate_schemas::MethodSnapshot;

    use super::*;

    fn snapshot_with_projects(paths: &[&str]) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            projects: paths
                .iter()
                .map(|&path| Project {
                    path: ProjectPath::new(path),
                    project_references: Vec::new(),
                    package_references: Vec::new(),
                    assembly_name: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_project_lookup() {
        let snapshot = snapshot_with_projects(&["A.csproj", "B.csproj"]);
        let workspace = SnapshotWorkspace::new(&snapshot);

        assert_eq!(
            workspace.project("B.csproj").unwrap().path.as_str(),
            "B.csproj"
        );
    }

    #[test]
    fn test_missing_project_is_analysis_unavailable() {
        let snapshot = snapshot_with_projects(&["A.csproj"]);
        let workspace = SnapshotWorkspace::new(&snapshot);

        let err = workspace.project("Z.csproj").unwrap_err();
        assert!(err.is_analysis_unavailable());
    }

    #[test]
    fn test_assembly_to_project_uses_file_stem_default() {
        let snapshot = snapshot_with_projects(&["source/Utils/Utils.csproj"]);
        let workspace = SnapshotWorkspace::new(&snapshot);

        assert_eq!(
            workspace.assembly_to_project("Utils").map(ProjectPath::as_str),
            Some("source/Utils/Utils.csproj")
        );
        assert_eq!(workspace.assembly_to_project("Other"), None);
    }

    #[test]
    fn test_resolve_method_by_coordinates() {
        let mut snapshot = snapshot_with_projects(&["A.csproj"]);
        snapshot.methods.push(MethodSnapshot {
            project: ProjectPath::new("A.csproj"),
            type_name: "Program".to_string(),
            method_name: "Main".to_string(),
            body: MethodBody::default(),
        });
        let workspace = SnapshotWorkspace::new(&snapshot);

        assert!(
            workspace.resolve_method("A.csproj", "Program", "Main").is_ok()
        );

        let err = workspace
            .resolve_method("A.csproj", "Program", "Other")
            .unwrap_err();
        assert!(err.is_analysis_unavailable());
    }
}
