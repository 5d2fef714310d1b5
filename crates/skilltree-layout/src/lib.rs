//! Layered (Sugiyama-style) layout for prerequisite graphs.
//!
//! Three deterministic phases, no force simulation: longest-path rank
//! assignment (cycle-tolerant), barycenter crossing reduction, and fixed-grid
//! coordinate assignment. The caller-supplied orientation picks which axis
//! ranks map to; nothing here is auto-detected.

use skilltree_core::config::LayoutConfig;
use skilltree_core::model::{Edge, Orientation, Position};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Where one node landed: layer index, slot within the layer, and the
/// final 2D position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rank: usize,
    pub order: usize,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Compute a placement for every node.
///
/// Deterministic for identical input. Edges whose endpoints are not both in
/// `node_ids` are ignored. Cyclic input never loops: an edge back into a
/// node still on the traversal path is skipped for ranking purposes only.
///
/// For acyclic input every edge satisfies `rank(target) > rank(source)`;
/// for cyclic input this holds for all edges except the skipped back-edges.
pub fn layout(
    node_ids: &[&str],
    edges: &[Edge],
    orientation: Orientation,
    config: &LayoutConfig,
) -> BTreeMap<String, Placement> {
    if node_ids.is_empty() {
        return BTreeMap::new();
    }

    let known: HashSet<&str> = node_ids.iter().copied().collect();
    let mut preds: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut succs: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        if known.contains(edge.source.as_str()) && known.contains(edge.target.as_str()) {
            preds
                .entry(edge.target.as_str())
                .or_default()
                .push(edge.source.as_str());
            succs
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
    }

    let ranks = assign_ranks(node_ids, &preds);

    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let mut buckets: Vec<Vec<&str>> = vec![Vec::new(); max_rank + 1];
    // Initial within-rank order is first-appearance order in the input.
    for &id in node_ids {
        buckets[ranks[id]].push(id);
    }

    if node_ids.len() <= config.ordering_node_cap {
        reduce_crossings(&mut buckets, &preds, &succs, config.ordering_passes);
    }

    let mut placements = BTreeMap::new();
    for (rank, bucket) in buckets.iter().enumerate() {
        for (order, id) in bucket.iter().enumerate() {
            let primary = rank as f64 * config.rank_separation;
            let secondary = order as f64 * config.node_separation;
            let position = match orientation {
                Orientation::Horizontal => Position {
                    x: primary,
                    y: secondary,
                },
                Orientation::Vertical => Position {
                    x: secondary,
                    y: primary,
                },
            };
            placements.insert(
                (*id).to_string(),
                Placement {
                    rank,
                    order,
                    position,
                },
            );
        }
    }

    debug!(
        nodes = node_ids.len(),
        ranks = buckets.len(),
        "layout complete"
    );
    placements
}

/// Longest-path layering: a node's rank is the maximum over its
/// predecessors' ranks plus one, zero for sources. Every node gets a rank,
/// including nodes only reachable through a cycle.
fn assign_ranks<'a>(
    node_ids: &[&'a str],
    preds: &HashMap<&'a str, Vec<&'a str>>,
) -> HashMap<&'a str, usize> {
    let mut ranks: HashMap<&'a str, usize> = HashMap::new();
    let mut marks: HashMap<&'a str, Mark> = HashMap::new();
    for &id in node_ids {
        rank_of(id, preds, &mut ranks, &mut marks);
    }
    ranks
}

fn rank_of<'a>(
    id: &'a str,
    preds: &HashMap<&'a str, Vec<&'a str>>,
    ranks: &mut HashMap<&'a str, usize>,
    marks: &mut HashMap<&'a str, Mark>,
) -> usize {
    if marks.get(id) == Some(&Mark::Done) {
        return ranks.get(id).copied().unwrap_or(0);
    }
    marks.insert(id, Mark::InProgress);

    let mut rank = 0;
    if let Some(sources) = preds.get(id) {
        for source in sources {
            // A predecessor still on the traversal path closes a cycle.
            // Skip it here; the edge itself is still drawn.
            if marks.get(source) == Some(&Mark::InProgress) {
                continue;
            }
            rank = rank.max(rank_of(source, preds, ranks, marks) + 1);
        }
    }

    marks.insert(id, Mark::Done);
    ranks.insert(id, rank);
    rank
}

/// Barycenter crossing reduction: alternating sweeps reorder each rank by
/// the mean position of its neighbors in the adjacent rank. A fixed number
/// of passes; correctness never depends on convergence.
fn reduce_crossings<'a>(
    buckets: &mut [Vec<&'a str>],
    preds: &HashMap<&'a str, Vec<&'a str>>,
    succs: &HashMap<&'a str, Vec<&'a str>>,
    passes: usize,
) {
    if buckets.len() <= 1 {
        return;
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    update_positions(buckets, &mut positions);

    for pass in 0..passes {
        if pass % 2 == 0 {
            // Sweep from rank 0 upward, pulling nodes toward their predecessors.
            for rank in 1..buckets.len() {
                sort_bucket(&mut buckets[rank], preds, &positions);
                update_positions(buckets, &mut positions);
            }
        } else {
            // Sweep from the max rank downward, pulling toward successors.
            for rank in (0..buckets.len() - 1).rev() {
                sort_bucket(&mut buckets[rank], succs, &positions);
                update_positions(buckets, &mut positions);
            }
        }
    }
}

fn update_positions<'a>(buckets: &[Vec<&'a str>], positions: &mut HashMap<&'a str, usize>) {
    positions.clear();
    for bucket in buckets {
        for (idx, &id) in bucket.iter().enumerate() {
            positions.insert(id, idx);
        }
    }
}

fn sort_bucket<'a>(
    bucket: &mut [&'a str],
    neighbors: &HashMap<&'a str, Vec<&'a str>>,
    positions: &HashMap<&'a str, usize>,
) {
    if bucket.len() <= 1 {
        return;
    }
    let current: HashMap<&str, usize> = bucket
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();
    bucket.sort_by(|a, b| {
        let a_score = barycenter(a, neighbors, positions, &current);
        let b_score = barycenter(b, neighbors, positions, &current);
        match a_score.partial_cmp(&b_score) {
            Some(std::cmp::Ordering::Equal) | None => {
                // Stable tie-break: keep the current relative order.
                let a_pos = current.get(a).copied().unwrap_or(0);
                let b_pos = current.get(b).copied().unwrap_or(0);
                a_pos.cmp(&b_pos)
            }
            Some(ordering) => ordering,
        }
    });
}

/// Mean position of a node's neighbors in the adjacent rank; nodes with no
/// neighbors keep their current slot.
fn barycenter(
    id: &str,
    neighbors: &HashMap<&str, Vec<&str>>,
    positions: &HashMap<&str, usize>,
    current: &HashMap<&str, usize>,
) -> f64 {
    let Some(list) = neighbors.get(id) else {
        return current.get(id).copied().unwrap_or(0) as f64;
    };
    let mut total = 0.0;
    let mut count = 0.0;
    for neighbor in list {
        if let Some(pos) = positions.get(neighbor) {
            total += *pos as f64;
            count += 1.0;
        }
    }
    if count == 0.0 {
        current.get(id).copied().unwrap_or(0) as f64
    } else {
        total / count
    }
}
