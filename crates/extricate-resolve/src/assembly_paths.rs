//! Assembly file path classification.
//!
//! There is no explicit signal on a metadata reference saying where its
//! assembly came from; the only evidence is the on-disk path shape.
//! Package-cache assemblies look like
//! `~/.nuget/packages/cliwrap/3.6.3/lib/netcoreapp3.0/CliWrap.dll`, while
//! platform reference assemblies look like
//! `.../dotnet/packs/Microsoft.NETCore.App.Ref/6.0.16/ref/net6.0/...`.
//! Both markers are installation conventions, not semantic facts, so they
//! are configuration (`PathMarkers`), not constants.
//!
//! The identity derivation below assumes the package cache lays packages
//! out as `<root>/<identity>/<version>/...` and makes no attempt to check
//! that against a package manifest. Everything here is a pure string
//! function; keeping it isolated is what makes the fragility testable.

use extricate_schemas::PackageIdentity;

/// The environment-specific path fragments used to classify assembly file
/// paths. Write markers with forward slashes; paths are normalized before
/// matching so snapshots from either platform compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMarkers {
    /// Path-segment substring identifying the platform's own reference
    /// assemblies.
    pub platform_runtime: String,

    /// Path-segment substring identifying the local package cache root.
    pub package_cache: String,
}

impl Default for PathMarkers {
    fn default() -> Self {
        Self {
            platform_runtime: "dotnet/packs/".to_string(),
            package_cache: ".nuget/packages/".to_string(),
        }
    }
}

/// Structural classification of a metadata reference's on-disk path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPathKind {
    /// Under the platform-runtime install marker.
    PlatformRuntime,
    /// Under the package-cache root marker.
    PackageSupplied,
    /// Matched neither marker.
    Unclassified,
}

/// Replaces backslashes so marker matching sees one separator style.
fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Classifies an assembly file path by substring containment.
///
/// The platform marker is checked first: a path matching both markers (not
/// observed in practice) is treated as platform, which errs on the side of
/// contributing no dependency. Matching is case-sensitive.
pub fn classify_assembly_path(
    path: &str,
    markers: &PathMarkers,
) -> AssemblyPathKind {
    let path = normalize(path);
    if path.contains(&markers.platform_runtime) {
        AssemblyPathKind::PlatformRuntime
    } else if path.contains(&markers.package_cache) {
        AssemblyPathKind::PackageSupplied
    } else {
        AssemblyPathKind::Unclassified
    }
}

/// Derives the package identity from a package-cache assembly path.
///
/// Splits on the cache root marker, then takes the first path segment of
/// the remainder: the `<identity>` in `<root>/<identity>/<version>/...` -
/// case-folded to lowercase. Returns `None` when the marker is absent or
/// nothing follows it.
pub fn package_identity_from_path(
    path: &str,
    markers: &PathMarkers,
) -> Option<PackageIdentity> {
    let path = normalize(path);
    let (_, remainder) = path.split_once(&markers.package_cache)?;
    let identity = remainder
        .split('/')
        .next()
        .expect("split always yields at least one token");
    if identity.is_empty() {
        return None;
    }
    Some(PackageIdentity::new(identity))
}
