//! Graph data model for the skill tree: entities, nodes, edges, diagnostics,
//! and the render-ready output consumed by an external drawing surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single trick record as supplied by the data-access layer.
///
/// The engine never mutates entities; it copies them into graph nodes and
/// derives everything else (ranks, positions, completion) on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique id, also used as the node id.
    pub id: String,
    pub name: String,
    /// Raw prerequisite references in listed order. Each may be another
    /// entity's id, its exact name, or a near-miss spelling.
    #[serde(default)]
    pub prerequisite_refs: Vec<String>,
    /// Ordinal difficulty (0 = easiest).
    #[serde(default)]
    pub difficulty: u8,
    pub category_id: String,
}

/// How a raw prerequisite reference was matched to a canonical entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// Normalized raw equals a normalized candidate name.
    Exact,
    /// Raw (trimmed, case-sensitive) equals a known entity id verbatim.
    DirectId,
    /// Nearest candidate by edit distance, within the acceptance thresholds.
    Fuzzy,
    /// No candidate matched; no edge will be created for this reference.
    Unresolved,
}

/// The outcome of resolving one raw prerequisite reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    pub raw: String,
    pub target_id: Option<String>,
    pub method: ResolutionMethod,
    /// Edit distance to the chosen (or nearest) candidate name.
    /// Present for fuzzy and unresolved outcomes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

/// A graph node. Exactly one exists per entity, isolated entities included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub entity: Entity,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn label(&self) -> &str {
        &self.entity.name
    }
}

/// A directed prerequisite edge: the source must be completed before the target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// A prerequisite reference that was skipped during graph construction,
/// with enough context to trace it back to the owning entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Entity whose prerequisite list contained the reference.
    pub entity_id: String,
    /// Original raw text of the reference.
    pub raw: String,
    /// Best edit distance found, when any candidate existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

/// The structural graph: nodes in input order, deduplicated edges, and
/// diagnostics for every reference that produced no edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrickGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TrickGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in input order.
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(Node::id).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id() == id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// All edges touching the given node, as source or target.
    pub fn edges_for(&self, id: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.source == id || e.target == id)
            .collect()
    }
}

/// A 2D position assigned by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Which axis the rank (topological depth) maps to.
/// Never auto-detected; the caller picks based on its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Rank maps to x; within-rank order maps to y.
    Horizontal,
    /// Rank maps to y; within-rank order maps to x.
    Vertical,
}

/// Style hint for drawing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Both endpoints completed; draw solid/static.
    Completed,
    /// At least one endpoint pending; draw animated/dashed.
    Pending,
}

/// A node ready to draw: position, label, and completion decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub rank: usize,
    pub completed: bool,
}

/// An edge ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub source: String,
    pub target: String,
    pub completed: bool,
    pub style: EdgeStyle,
}

/// The complete render-ready structure handed to the drawing surface,
/// plus legend-ready summary counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderTree {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub completed_count: usize,
    pub total_count: usize,
    /// Number of prerequisite references that resolved to nothing.
    /// Surfaced so callers can warn about data-entry errors instead of
    /// silently dropping them.
    pub unresolved_count: usize,
}

/// One row of the external completion store, used to import or export a
/// user's completion snapshot. The engine itself only consumes the ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub entity_id: String,
    pub completed: bool,
    pub achieved_at: DateTime<Utc>,
}
