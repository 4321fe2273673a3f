//! Method-level project dependency resolution.
//!
//! Given one method inside a multi-project source tree, this crate computes
//! the minimal set of project references the method transitively requires -
//! the set of projects it could not compile without if it were lifted out.
//! The hard part is attribution: a referenced symbol may live in another
//! project's source, or in a third-party package that some project in the
//! reference closure is responsible for supplying.
//!
//! ## Pipeline
//!
//! 1. Order the target project's transitive references least-dependent
//!    first (`order`).
//! 2. Build the package ownership index over that order (`ownership`).
//! 3. Extract the dependency-relevant references from the method body
//!    (`extract`).
//! 4. Classify each reference by declaration provenance (`classify`,
//!    `assembly_paths`).
//! 5. Aggregate into the deduplicated, alphabetically ordered report
//!    (`aggregate`).
//!
//! Compilation and parsing stay outside: the [`Workspace`] trait is the
//! boundary, and [`SnapshotWorkspace`] adapts a serialized
//! [`WorkspaceSnapshot`] produced by the compiler front end.
//!
//! ## Usage
//!
//! ```no_run
//! use extricate_resolve::{ResolveRequest, run};
//!
//! let input = std::fs::File::open("snapshot.json").unwrap();
//! let mut output = Vec::new();
//! run(input, &mut output, &ResolveRequest::default()).unwrap();
//! ```

mod aggregate;
mod assembly_paths;
mod classify;
mod error;
mod extract;
mod order;
mod ownership;
mod workspace;

use std::io::{Read, Write};

// Re-export schema types for convenience.
#[doc(inline)]
pub use extricate_schemas::{
    DependencyReport, MethodBody, MethodSnapshot, PackageIdentity,
    PackageReference, Project, ProjectPath, UnresolvedDiagnostic,
    UnresolvedReason, WorkspaceSnapshot,
};
use rayon::prelude::*;
use tracing::{debug, debug_span, warn};

#[doc(inline)]
pub use crate::aggregate::aggregate;
#[doc(inline)]
pub use crate::assembly_paths::{
    AssemblyPathKind, PathMarkers, classify_assembly_path,
    package_identity_from_path,
};
#[doc(inline)]
pub use crate::classify::{Provenance, classify};
#[doc(inline)]
pub use crate::error::ResolveError;
#[doc(inline)]
pub use crate::extract::{ReferenceKind, SymbolReference, method_references};
#[doc(inline)]
pub use crate::order::dependency_order;
#[doc(inline)]
pub use crate::ownership::{AmbiguousPackageOwner, PackageOwnershipIndex};
#[doc(inline)]
pub use crate::workspace::{SnapshotWorkspace, Workspace};

/// Resolves the full project dependency set for one method.
///
/// This is the crate's core operation. The workspace handle is read-only
/// and valid for this call only; nothing is cached across calls. The
/// operation is atomic - on error no partial dependency set is returned.
///
/// Independent references are classified on rayon's worker pool (results
/// are collected in extraction order, so output stays deterministic) and
/// drained by a single aggregation pass.
///
/// # Errors
///
/// Returns [`ResolveError`] if:
/// - The project reference graph has a cycle
///   ([`ResolveError::is_cyclic_dependency`])
/// - The workspace cannot supply the project, the method, or its analysis
///   context ([`ResolveError::is_analysis_unavailable`])
pub fn resolve_method_dependencies(
    workspace: &impl Workspace,
    markers: &PathMarkers,
    project_path: &str,
    type_name: &str,
    method_name: &str,
) -> Result<DependencyReport, ResolveError> {
    let _span = debug_span!(
        "resolve_method_dependencies",
        project_path,
        type_name,
        method_name
    )
    .entered();

    let own_project = workspace.project(project_path)?.path.clone();

    // Step 1: order the reference closure, least dependent first. The
    // target project itself stays out of the ownership walk: its packages
    // are assumed to be supplied via provider projects, not declared
    // locally.
    let ordered = dependency_order(workspace, project_path)?;

    // Step 2: first declarer in that order owns each package identity.
    let index = {
        let projects = ordered
            .iter()
            .map(|path| workspace.project(path.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        PackageOwnershipIndex::build(projects)
    };
    debug!(
        package_count = index.len(),
        ambiguity_count = index.ambiguities().len(),
        "built package ownership index"
    );

    // Step 3: extract and classify. The reference list is materialized so
    // classification can fan out; each classification is independent.
    let body = workspace.resolve_method(project_path, type_name, method_name)?;
    let references: Vec<_> = method_references(body).collect();
    let classifications: Vec<Provenance> = references
        .par_iter()
        .map(|reference| classify(workspace, &index, markers, reference))
        .collect();

    // Step 4: single aggregation point.
    let report = aggregate(&own_project, classifications);

    for diagnostic in &report.diagnostics {
        warn!(%diagnostic, "reference left unresolved");
    }

    Ok(report)
}

/// Selection of the analysis target within a snapshot, plus the path
/// markers to classify assembly locations with.
///
/// When the coordinates are `None` and the snapshot contains exactly one
/// method, that method is the target.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub project: Option<String>,
    pub type_name: Option<String>,
    pub method_name: Option<String>,
    pub markers: PathMarkers,
}

/// Picks the target method from the snapshot per the request.
fn select_method<'a>(
    snapshot: &'a WorkspaceSnapshot,
    request: &ResolveRequest,
) -> Result<&'a MethodSnapshot, ResolveError> {
    match (&request.project, &request.type_name, &request.method_name) {
        (Some(project), Some(type_name), Some(method_name)) => snapshot
            .methods
            .iter()
            .find(|m| {
                m.project.as_str() == project.as_str()
                    && &m.type_name == type_name
                    && &m.method_name == method_name
            })
            .ok_or_else(|| {
                ResolveError::analysis_unavailable(format!(
                    "method not present in snapshot: \
                     {project} {type_name}.{method_name}"
                ))
            }),
        (None, None, None) => match snapshot.methods.as_slice() {
            [method] => Ok(method),
            [] => Err(ResolveError::analysis_unavailable(
                "snapshot contains no methods",
            )),
            _ => Err(ResolveError::analysis_unavailable(
                "snapshot contains several methods; \
                 select one with --project, --type and --method",
            )),
        },
        _ => Err(ResolveError::analysis_unavailable(
            "--project, --type and --method must be given together",
        )),
    }
}

/// Run the resolve operation against a serialized snapshot.
///
/// Reads a [`WorkspaceSnapshot`] from the input, resolves the selected
/// method's dependency set, and writes the report to the output in its
/// persisted text form: one project file path per line, alphabetically
/// sorted, no header. Unresolved references are logged at `warn`.
///
/// # Errors
///
/// Returns [`ResolveError`] if:
/// - Reading the input fails ([`ResolveError::is_io`])
/// - The input is not a valid snapshot ([`ResolveError::is_deserialization`])
/// - Resolution itself fails (see [`resolve_method_dependencies`])
/// - Writing the report fails ([`ResolveError::is_io`])
pub fn run(
    mut input: impl Read,
    output: &mut dyn Write,
    request: &ResolveRequest,
) -> Result<(), ResolveError> {
    let _span = debug_span!("run").entered();

    // Step 1: read and parse the snapshot.
    let mut json = String::new();
    input.read_to_string(&mut json)?;
    let snapshot: WorkspaceSnapshot = serde_json::from_str(&json)?;

    // Step 2: resolve the selected method.
    let method = select_method(&snapshot, request)?;
    let workspace = SnapshotWorkspace::new(&snapshot);
    let report = resolve_method_dependencies(
        &workspace,
        &request.markers,
        method.project.as_str(),
        &method.type_name,
        &method.method_name,
    )?;

    // Step 3: persist the report.
    report.write_lines(output)?;

    Ok(())
}
