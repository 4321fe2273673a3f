//! Provenance classification for extracted references.
//!
//! Given one reference and the ownership index, decide where the referenced
//! declaration comes from. The decision order is fixed:
//!
//! 1. Declaration in source → the project producing its containing assembly.
//! 2. Metadata path under the platform-runtime marker → platform, no
//!    dependency.
//! 3. Metadata path under the package-cache marker → derive the package
//!    identity and look up its owning project.
//! 4. Anything else (unmatched path, or no file-based metadata reference at
//!    all) → unresolved.
//!
//! Classification never fails for a well-formed reference: every branch
//! terminates in one of the four [`Provenance`] variants, and absence of
//! project or package information is modeled as data, not an error.

use extricate_schemas::{ProjectPath, UnresolvedDiagnostic, UnresolvedReason};

use crate::assembly_paths::{
    AssemblyPathKind, PathMarkers, classify_assembly_path,
    package_identity_from_path,
};
use crate::extract::SymbolReference;
use crate::ownership::PackageOwnershipIndex;
use crate::workspace::Workspace;

/// Where a referenced declaration comes from.
///
/// Closed variant set; consumers must handle all four cases.
#[derive(Debug, Clone, PartialEq)]
pub enum Provenance {
    /// Declared in project source; the path is the declaring project.
    SourceProject(ProjectPath),
    /// Declared in a package-cache assembly; the path is the project that
    /// owns the package identity.
    PackageOwned(ProjectPath),
    /// Declared in a platform reference assembly. Contributes no
    /// dependency.
    PlatformRuntime,
    /// Could not be attributed. Recorded, never fatal.
    Unresolved(UnresolvedDiagnostic),
}

fn unresolved(
    reference: &SymbolReference<'_>,
    reason: UnresolvedReason,
    detail: Option<String>,
) -> Provenance {
    Provenance::Unresolved(UnresolvedDiagnostic {
        reference: reference.name().to_string(),
        reason,
        detail,
    })
}

/// Classifies one reference by declaration provenance.
pub fn classify(
    workspace: &impl Workspace,
    index: &PackageOwnershipIndex,
    markers: &PathMarkers,
    reference: &SymbolReference<'_>,
) -> Provenance {
    let Some(symbol) = workspace.resolve_symbol(reference.node) else {
        return unresolved(reference, UnresolvedReason::UnboundSymbol, None);
    };

    if symbol.in_source {
        // Declared in source: the dependency is on whichever project
        // produces the containing assembly.
        return match workspace.assembly_to_project(&symbol.containing_assembly)
        {
            Some(project) => Provenance::SourceProject(project.clone()),
            None => unresolved(
                reference,
                UnresolvedReason::NoProjectForAssembly,
                Some(symbol.containing_assembly.clone()),
            ),
        };
    }

    // Declared in metadata: attribute by the assembly's on-disk path.
    // A reference without a file-based metadata reference (a non-PE
    // reference, say) cannot be attributed at all.
    let Some(assembly_path) =
        workspace.metadata_reference_file_path(&symbol.containing_assembly)
    else {
        return unresolved(
            reference,
            UnresolvedReason::UnrecognizedMetadataReference,
            Some(symbol.containing_assembly.clone()),
        );
    };

    match classify_assembly_path(assembly_path, markers) {
        AssemblyPathKind::PlatformRuntime => Provenance::PlatformRuntime,
        AssemblyPathKind::PackageSupplied => {
            let Some(identity) =
                package_identity_from_path(assembly_path, markers)
            else {
                // Matched the cache marker but nothing followed it; the
                // path is malformed as a cache layout.
                return unresolved(
                    reference,
                    UnresolvedReason::UnrecognizedMetadataReference,
                    Some(assembly_path.to_string()),
                );
            };
            match index.owner(&identity) {
                Some(owner) => Provenance::PackageOwned(owner.clone()),
                None => unresolved(
                    reference,
                    UnresolvedReason::PackageNotIndexed,
                    Some(identity.as_str().to_string()),
                ),
            }
        }
        AssemblyPathKind::Unclassified => unresolved(
            reference,
            UnresolvedReason::UnrecognizedMetadataReference,
            Some(assembly_path.to_string()),
        ),
    }
}
