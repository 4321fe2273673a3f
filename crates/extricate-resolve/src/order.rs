//! Dependency ordering for project reference closures.
//!
//! This module answers: "what does a project transitively reference, and in
//! what build order?" The ordering is what makes package ownership work -
//! when several projects declare the same package, the least dependent
//! declarer must be seen first (see `ownership`), so the closure is sorted
//! topologically with every referenced project ahead of its referencers.
//!
//! Cycle detection is advisory: the workspace service guarantees acyclic
//! project graphs in practice, but if one ever shows up we fail with a
//! cyclic-dependency error instead of looping.

use extricate_schemas::ProjectPath;
use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::error::ResolveError;
use crate::workspace::Workspace;

/// Computes the root project's transitive project references, ordered from
/// least dependent to most dependent.
///
/// For every pair where A is a (direct or transitive) reference of B, A
/// appears before B. The root project itself is not included; call sites
/// that want it append it themselves.
///
/// # Errors
///
/// Returns a cyclic-dependency error if the reference graph has a cycle,
/// and propagates workspace lookup failures (a dangling project reference
/// is a collaborator contract violation).
pub fn dependency_order(
    workspace: &impl Workspace,
    root: &str,
) -> Result<Vec<ProjectPath>, ResolveError> {
    // Step 1: Collect the reachable closure with an explicit work stack.
    // IndexMap keeps discovery order, which keeps node indices (and the
    // eventual topological tie-breaks) deterministic for a given snapshot.
    let mut nodes: IndexMap<String, NodeIndex> = IndexMap::new();
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut stack = vec![root.to_owned()];

    while let Some(path) = stack.pop() {
        if nodes.contains_key(&path) {
            continue;
        }
        let node = graph.add_node(path.clone());
        nodes.insert(path.clone(), node);

        let project = workspace.project(&path)?;
        for reference in &project.project_references {
            if !nodes.contains_key(reference.as_str()) {
                stack.push(reference.as_str().to_owned());
            }
        }
    }

    // Step 2: Add one edge per direct reference, pointing from the
    // referenced project to its referencer so a topological sort yields
    // dependencies first.
    for (path, &node) in &nodes {
        let project = workspace.project(path)?;
        for reference in &project.project_references {
            let referenced = nodes[reference.as_str()];
            graph.add_edge(referenced, node, ());
        }
    }

    // Step 3: Topological sort. petgraph reports the first node it finds on
    // a cycle, which is all the diagnostic we need.
    let order = toposort(&graph, None).map_err(|cycle| {
        ResolveError::cyclic_dependency(graph[cycle.node_id()].clone())
    })?;

    let ordered: Vec<ProjectPath> = order
        .into_iter()
        .map(|node| graph[node].as_str())
        .filter(|path| *path != root)
        .map(ProjectPath::new)
        .collect();

    debug!(
        root,
        reference_count = ordered.len(),
        "ordered transitive project references"
    );

    Ok(ordered)
}
