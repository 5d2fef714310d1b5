//! Graph construction: entities plus resolver output become nodes and edges.

use crate::resolver::Resolver;
use skilltree_core::config::ResolverConfig;
use skilltree_core::model::{Diagnostic, Edge, Entity, Node, TrickGraph};
use std::collections::HashSet;
use tracing::debug;

/// Build the prerequisite graph for an entity collection.
///
/// Exactly one node per entity, in input order; isolated entities are kept.
/// Each raw reference is resolved against the full candidate set and, when
/// it lands on an existing node, becomes a directed edge from the
/// prerequisite into its dependent. Edges are deduplicated by
/// (source, target). References that resolve to nothing — or to an id with
/// no node — are recorded as diagnostics and skipped. Cyclic input is
/// accepted as-is; acyclicity is the layout engine's concern.
pub fn build(entities: &[Entity], config: &ResolverConfig) -> TrickGraph {
    let resolver = Resolver::new(entities, config.clone());
    let node_ids: HashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();

    let nodes: Vec<Node> = entities
        .iter()
        .map(|e| Node { entity: e.clone() })
        .collect();
    let mut edges: Vec<Edge> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for entity in entities {
        for raw in &entity.prerequisite_refs {
            let resolved = resolver.resolve(raw);
            match resolved.target_id {
                Some(source) if node_ids.contains(source.as_str()) => {
                    if seen.insert((source.clone(), entity.id.clone())) {
                        edges.push(Edge {
                            source,
                            target: entity.id.clone(),
                        });
                    }
                }
                _ => diagnostics.push(Diagnostic {
                    entity_id: entity.id.clone(),
                    raw: raw.clone(),
                    distance: resolved.distance,
                }),
            }
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        skipped = diagnostics.len(),
        "built prerequisite graph"
    );

    TrickGraph {
        nodes,
        edges,
        diagnostics,
    }
}
