//! Workspace snapshot schema: the front end's view of one resolution run.
//!
//! A snapshot is a read-only capture of everything the workspace service
//! knows that the resolver needs: the project graph with declared project
//! and package references, the analyzed method bodies with per-identifier
//! symbol resolution results, and the compilation's resolved metadata
//! reference file paths.
//!
//! ## Terminology
//!
//! - **Project**: a compilable unit identified by its unique file path,
//!   with direct project references and declared package references.
//! - **Package reference**: a declared dependency on a third-party package.
//!   Identity comparison is by lowercased name only; the version is carried
//!   but never participates in identity.
//! - **Symbol reference node**: one identifier occurrence in a method body,
//!   together with the front end's resolution result (if it produced one).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A project file path, used as the project's identity throughout.
///
/// Paths are compared and ordered as plain strings; the snapshot producer
/// is responsible for emitting them in a consistent form (absolute, one
/// separator style). Ordering is lexicographic, which is what the report
/// format requires.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProjectPath(String);

impl ProjectPath {
    /// Creates a project path from a raw string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the underlying string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the file stem of the path: the final path segment with its
    /// extension removed.
    ///
    /// Both separator styles are accepted since snapshots may originate on
    /// either platform. `"source/App/App.csproj"` yields `"App"`.
    pub fn file_stem(&self) -> &str {
        let file_name = self
            .0
            .rsplit(['/', '\\'])
            .next()
            .expect("rsplit always yields at least one segment");
        file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _ext)| stem)
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ProjectPath {
    /// Enables `HashMap<ProjectPath, _>::get("path")` lookups.
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A package identity: the lowercased package name.
///
/// Two package references with the same name but different versions are the
/// same package for ownership purposes, so the identity deliberately drops
/// the version and case-folds the name at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageIdentity(String);

impl PackageIdentity {
    /// Creates an identity from a package name, lowercasing it.
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    /// Returns the lowercased identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared package reference: name plus version as written in the
/// project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    pub name: String,
    pub version: String,
}

impl PackageReference {
    /// Returns the version-independent identity of this reference.
    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity::new(&self.name)
    }
}

/// One project in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project file path; the project's identity.
    pub path: ProjectPath,

    /// Direct project references, as project file paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project_references: Vec<ProjectPath>,

    /// Directly declared package references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub package_references: Vec<PackageReference>,

    /// Name of the assembly this project compiles to, when it differs from
    /// the project file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_name: Option<String>,
}

impl Project {
    /// Returns the name of the assembly this project produces.
    ///
    /// Falls back to the project file stem, which is the build system's
    /// default when no explicit assembly name is configured.
    pub fn assembly_name(&self) -> &str {
        self.assembly_name
            .as_deref()
            .unwrap_or_else(|| self.path.file_stem())
    }
}

/// The front end's resolution result for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// True when the declaration's location is in source code (as opposed
    /// to compiled metadata).
    pub in_source: bool,

    /// Identity name of the assembly containing the declaration.
    pub containing_assembly: String,
}

/// One identifier occurrence inside the analyzed method body.
///
/// `symbol` is `None` when the semantic model produced no binding for the
/// identifier; the resolver surfaces that as an unresolved diagnostic
/// rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolReferenceNode {
    /// The identifier text, used in diagnostics.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolInfo>,
}

/// One parameter declared inside the analyzed method body.
///
/// `type_reference` is `None` when the parameter's type could not be
/// determined (an implicitly typed loop variable, for example). Such
/// parameters are skipped during extraction, not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterNode {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_reference: Option<SymbolReferenceNode>,
}

/// The syntax-level contents of one method body, reduced to the two
/// reference kinds that act as dependency signals.
///
/// Both lists are in document order of occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodBody {
    /// The accessed-name node of every member-access expression.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_accesses: Vec<SymbolReferenceNode>,

    /// Every parameter declaration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterNode>,
}

/// One analyzed method: its selection coordinates plus its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSnapshot {
    /// Path of the project containing the method.
    pub project: ProjectPath,

    /// Name of the type declaring the method.
    pub type_name: String,

    /// Name of the method.
    pub method_name: String,

    pub body: MethodBody,
}

/// Root structure: everything the workspace service captured for one
/// resolution run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    /// All projects reachable from the analysis target, in no particular
    /// order. Ordering is the resolver's job.
    pub projects: Vec<Project>,

    /// The analyzed methods. Usually one; the selection coordinates pick
    /// the target when several are present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodSnapshot>,

    /// On-disk file path of each resolved metadata reference, keyed by
    /// assembly identity name. Assemblies absent from this map had no
    /// file-based metadata reference in the compilation.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata_references: HashMap<String, String>,
}
