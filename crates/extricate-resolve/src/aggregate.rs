//! Aggregation of classified references into the final dependency set.

use std::collections::BTreeSet;

use extricate_schemas::{DependencyReport, ProjectPath};

use crate::classify::Provenance;

/// Folds classifications into a deduplicated, ordered dependency report.
///
/// `SourceProject` and `PackageOwned` contribute their project path;
/// `PlatformRuntime` contributes nothing; `Unresolved` contributes only a
/// diagnostic. The method's own containing project is always a member -
/// a method that uses other members of its own project cannot be lifted
/// out without extricating those first, and the report has to say so.
///
/// The set is kept in a `BTreeSet`, so the rendered sequence is
/// lexicographically sorted and reproducible.
pub fn aggregate(
    own_project: &ProjectPath,
    classifications: impl IntoIterator<Item = Provenance>,
) -> DependencyReport {
    let mut projects = BTreeSet::from([own_project.clone()]);
    let mut diagnostics = Vec::new();

    for classification in classifications {
        match classification {
            Provenance::SourceProject(path)
            | Provenance::PackageOwned(path) => {
                projects.insert(path);
            }
            Provenance::PlatformRuntime => {}
            Provenance::Unresolved(diagnostic) => {
                diagnostics.push(diagnostic);
            }
        }
    }

    DependencyReport {
        projects: projects.into_iter().collect(),
        diagnostics,
    }
}
