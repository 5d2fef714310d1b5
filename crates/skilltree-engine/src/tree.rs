//! Skill tree orchestration: composes resolver, builder, and layout into a
//! render-ready structure, recomputing only what changed.
//!
//! Structure (resolve + build + layout) is the expensive, pure part and is
//! cached until the entity collection, category filter, or orientation
//! changes. Completion decoration is cheap — O(nodes + edges) — and is
//! refreshed lazily from the tracker's revision counter.

use crate::builder;
use crate::completion::CompletionTracker;
use skilltree_core::config::TreeConfig;
use skilltree_core::model::{
    Diagnostic, EdgeStyle, Entity, Orientation, RenderEdge, RenderNode, RenderTree, TrickGraph,
};
use skilltree_layout::Placement;
use std::collections::BTreeMap;
use tracing::debug;

/// The cached structural computation: graph plus placements.
#[derive(Debug, Clone)]
struct Structure {
    graph: TrickGraph,
    placements: BTreeMap<String, Placement>,
}

/// Holds the latest entity collection, view settings, and completion state,
/// and exposes the render-ready tree.
#[derive(Debug, Clone)]
pub struct SkillTree {
    entities: Vec<Entity>,
    category: Option<String>,
    orientation: Orientation,
    config: TreeConfig,
    tracker: CompletionTracker,
    structure: Option<Structure>,
    rendered: RenderTree,
    rendered_revision: Option<u64>,
}

impl SkillTree {
    pub fn new(config: TreeConfig, orientation: Orientation) -> Self {
        Self {
            entities: Vec::new(),
            category: None,
            orientation,
            config,
            tracker: CompletionTracker::new(),
            structure: None,
            rendered: RenderTree::default(),
            rendered_revision: None,
        }
    }

    /// Seed the completion state from an external fetch.
    pub fn with_tracker(mut self, tracker: CompletionTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Replace the entity collection (a fresh external fetch). Invalidates
    /// the structural cache only when the collection actually changed.
    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        if self.entities != entities {
            self.entities = entities;
            self.invalidate();
        }
    }

    /// Restrict the tree to a single category, or clear the filter.
    pub fn set_category(&mut self, category: Option<String>) {
        if self.category != category {
            self.category = category;
            self.invalidate();
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.invalidate();
        }
    }

    /// Flip completion for one entity; returns the new state. Never
    /// invalidates the structural cache — only the decoration goes stale.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.tracker.toggle(id)
    }

    pub fn tracker(&self) -> &CompletionTracker {
        &self.tracker
    }

    /// Diagnostics from the most recent build: one entry per prerequisite
    /// reference that produced no edge.
    pub fn diagnostics(&mut self) -> &[Diagnostic] {
        self.ensure_structure();
        self.structure
            .as_ref()
            .map_or(&[], |s| s.graph.diagnostics.as_slice())
    }

    /// The render-ready tree. Rebuilds structure only when invalidated;
    /// otherwise refreshes the completion decoration when the tracker moved.
    pub fn render(&mut self) -> &RenderTree {
        let rebuilt = self.structure.is_none();
        self.ensure_structure();

        let revision = self.tracker.revision();
        if rebuilt || self.rendered_revision != Some(revision) {
            if let Some(structure) = &self.structure {
                self.rendered = decorate(structure, &self.tracker);
            }
            self.rendered_revision = Some(revision);
        }
        &self.rendered
    }

    fn invalidate(&mut self) {
        self.structure = None;
        self.rendered_revision = None;
    }

    fn ensure_structure(&mut self) {
        if self.structure.is_some() {
            return;
        }
        let visible: Vec<Entity> = match &self.category {
            Some(category) => self
                .entities
                .iter()
                .filter(|e| &e.category_id == category)
                .cloned()
                .collect(),
            None => self.entities.clone(),
        };

        let graph = builder::build(&visible, &self.config.resolver);
        let node_ids = graph.node_ids();
        let placements = skilltree_layout::layout(
            &node_ids,
            &graph.edges,
            self.orientation,
            &self.config.layout,
        );

        debug!(
            entities = self.entities.len(),
            visible = visible.len(),
            category = self.category.as_deref().unwrap_or("all"),
            "recomputed skill tree structure"
        );
        self.structure = Some(Structure { graph, placements });
    }
}

/// Derive the completed decoration for every node and edge. Pure over the
/// current completed set; positions and ranks come from the cached structure.
fn decorate(structure: &Structure, tracker: &CompletionTracker) -> RenderTree {
    let nodes: Vec<RenderNode> = structure
        .graph
        .nodes
        .iter()
        .map(|node| {
            let (x, y, rank) = structure
                .placements
                .get(node.id())
                .map_or((0.0, 0.0, 0), |p| (p.position.x, p.position.y, p.rank));
            RenderNode {
                id: node.id().to_string(),
                label: node.label().to_string(),
                x,
                y,
                rank,
                completed: tracker.is_node_completed(node.id()),
            }
        })
        .collect();

    let edges: Vec<RenderEdge> = structure
        .graph
        .edges
        .iter()
        .map(|edge| {
            let completed = tracker.is_edge_completed(&edge.source, &edge.target);
            RenderEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                completed,
                style: if completed {
                    EdgeStyle::Completed
                } else {
                    EdgeStyle::Pending
                },
            }
        })
        .collect();

    // Count against the visible nodes, not the raw tracker set — the tracker
    // may hold ids filtered out by the current category.
    let completed_count = nodes.iter().filter(|n| n.completed).count();
    let total_count = nodes.len();
    let unresolved_count = structure.graph.diagnostics.len();

    RenderTree {
        nodes,
        edges,
        completed_count,
        total_count,
        unresolved_count,
    }
}
