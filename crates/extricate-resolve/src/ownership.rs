//! Package ownership: which project supplies which package.
//!
//! A package may be declared by several projects across the reference
//! closure. The ownership index picks one declarer per package identity
//! under a first-writer-wins rule: projects are fed in dependency order
//! (least dependent first), so the first declaration seen comes from the
//! shallowest project - the deliberate single-purpose "package provider"
//! shim, rather than a consumer that re-declares the package transitively.
//!
//! Ties between unrelated projects at the same depth are resolved by
//! traversal order. That is acceptable nondeterminism bounded by "some
//! declarer is chosen"; every discarded later declaration is recorded as an
//! ambiguity for auditing.

use extricate_schemas::{PackageIdentity, Project, ProjectPath};
use indexmap::IndexMap;
use tracing::debug;

/// Audit record for a discarded package declaration.
///
/// Informational, not an error: the index kept `owner` and ignored the
/// declaration in `discarded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousPackageOwner {
    pub identity: PackageIdentity,
    /// The project that won ownership.
    pub owner: ProjectPath,
    /// The later declarer whose declaration was ignored.
    pub discarded: ProjectPath,
}

/// Mapping from package identity to the project that owns it.
#[derive(Debug, Default)]
pub struct PackageOwnershipIndex {
    owners: IndexMap<PackageIdentity, ProjectPath>,
    ambiguities: Vec<AmbiguousPackageOwner>,
}

impl PackageOwnershipIndex {
    /// Builds the index from projects in least-dependent-first order.
    ///
    /// For each project's directly declared package references, the first
    /// declaration of an identity wins; later ones are skipped and recorded.
    /// Version never participates: `P@1.0` and `P@2.0` are the same package.
    pub fn build<'a>(
        ordered_projects: impl IntoIterator<Item = &'a Project>,
    ) -> Self {
        let mut index = Self::default();

        for project in ordered_projects {
            for reference in &project.package_references {
                let identity = reference.identity();
                match index.owners.get(&identity) {
                    None => {
                        index.owners.insert(identity, project.path.clone());
                    }
                    Some(owner) => {
                        debug!(
                            package = %identity,
                            owner = %owner,
                            discarded = %project.path,
                            "package already owned, ignoring later declaration"
                        );
                        index.ambiguities.push(AmbiguousPackageOwner {
                            identity,
                            owner: owner.clone(),
                            discarded: project.path.clone(),
                        });
                    }
                }
            }
        }

        index
    }

    /// Returns the owning project for a package identity, if any project
    /// in the walk declared it. Absence is a valid state handled by the
    /// classifier.
    pub fn owner(&self, identity: &PackageIdentity) -> Option<&ProjectPath> {
        self.owners.get(identity)
    }

    /// Returns the discarded-declaration audit records, in encounter order.
    pub fn ambiguities(&self) -> &[AmbiguousPackageOwner] {
        &self.ambiguities
    }

    /// Returns the number of owned package identities.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if no package identities are owned.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use extricate_schemas::PackageReference;

    use super::*;

    /// Builds a project declaring the given (name, version) packages.
    fn make_project(path: &str, packages: &[(&str, &str)]) -> Project {
        Project {
            path: ProjectPath::new(path),
            project_references: Vec::new(),
            package_references: packages
                .iter()
                .map(|&(name, version)| PackageReference {
                    name: name.to_string(),
                    version: version.to_string(),
                })
                .collect(),
            assembly_name: None,
        }
    }

    #[test]
    fn test_first_writer_wins_across_versions() {
        // A is least dependent and declares P@1.0; B re-declares P@2.0.
        // A must own the package regardless of version.
        let a = make_project("A.csproj", &[("P", "1.0")]);
        let b = make_project("B.csproj", &[("P", "2.0")]);

        let index = PackageOwnershipIndex::build([&a, &b]);

        assert_eq!(
            index.owner(&PackageIdentity::new("p")).map(ProjectPath::as_str),
            Some("A.csproj")
        );
    }

    #[test]
    fn test_identity_lookup_is_case_insensitive() {
        let a = make_project("A.csproj", &[("Newtonsoft.Json", "13.0.1")]);

        let index = PackageOwnershipIndex::build([&a]);

        assert!(index.owner(&PackageIdentity::new("NEWTONSOFT.JSON")).is_some());
        assert!(index.owner(&PackageIdentity::new("newtonsoft.json")).is_some());
    }

    #[test]
    fn test_discarded_declaration_recorded() {
        let a = make_project("A.csproj", &[("P", "1.0")]);
        let b = make_project("B.csproj", &[("P", "2.0")]);

        let index = PackageOwnershipIndex::build([&a, &b]);

        assert_eq!(
            index.ambiguities(),
            &[AmbiguousPackageOwner {
                identity: PackageIdentity::new("p"),
                owner: ProjectPath::new("A.csproj"),
                discarded: ProjectPath::new("B.csproj"),
            }]
        );
    }

    #[test]
    fn test_distinct_packages_coexist() {
        let a = make_project("A.csproj", &[("P", "1.0"), ("Q", "1.0")]);
        let b = make_project("B.csproj", &[("R", "1.0")]);

        let index = PackageOwnershipIndex::build([&a, &b]);

        assert_eq!(index.len(), 3);
        assert_eq!(
            index.owner(&PackageIdentity::new("r")).map(ProjectPath::as_str),
            Some("B.csproj")
        );
    }

    #[test]
    fn test_empty_input_builds_empty_index() {
        let index = PackageOwnershipIndex::build(std::iter::empty::<&Project>());

        assert!(index.is_empty());
        assert!(index.owner(&PackageIdentity::new("p")).is_none());
    }
}
