use skilltree_core::config::ResolverConfig;
use skilltree_core::model::Entity;
use skilltree_engine::builder::build;

fn make_entity(id: &str, name: &str, prereqs: &[&str]) -> Entity {
    Entity {
        id: id.to_string(),
        name: name.to_string(),
        prerequisite_refs: prereqs.iter().map(ToString::to_string).collect(),
        difficulty: 0,
        category_id: "vaults".to_string(),
    }
}

#[test]
fn test_empty_collection_builds_empty_graph() {
    let graph = build(&[], &ResolverConfig::default());
    assert!(graph.is_empty());
    assert!(graph.edges.is_empty());
    assert!(graph.diagnostics.is_empty());
}

#[test]
fn test_one_node_per_entity_in_input_order() {
    let entities = vec![
        make_entity("t2", "Kong Vault", &[]),
        make_entity("t1", "Safety Roll", &[]),
    ];
    let graph = build(&entities, &ResolverConfig::default());
    assert_eq!(graph.node_ids(), vec!["t2", "t1"]);
}

#[test]
fn test_duplicate_references_collapse_to_one_edge() {
    // t2 lists t1 both by id and by name; only one edge results.
    let entities = vec![
        make_entity("t1", "Safety Roll", &[]),
        make_entity("t2", "Kong Vault", &["t1", "Safety Roll"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "t1");
    assert_eq!(graph.edges[0].target, "t2");
    assert!(graph.diagnostics.is_empty());
}

#[test]
fn test_edge_points_from_prerequisite_into_dependent() {
    let entities = vec![
        make_entity("roll", "Safety Roll", &[]),
        make_entity("kong", "Kong Vault", &["Safety Roll"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "roll");
    assert_eq!(graph.edges[0].target, "kong");
}

#[test]
fn test_unresolved_reference_becomes_diagnostic() {
    let entities = vec![
        make_entity("t1", "Safety Roll", &[]),
        make_entity("t2", "Kong Vault", &["Quadruple Backflip Supreme"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    assert!(graph.edges.is_empty());
    assert_eq!(graph.diagnostics.len(), 1);
    assert_eq!(graph.diagnostics[0].entity_id, "t2");
    assert_eq!(graph.diagnostics[0].raw, "Quadruple Backflip Supreme");
}

#[test]
fn test_fuzzy_reference_still_creates_edge() {
    let entities = vec![
        make_entity("t1", "Safety Roll", &[]),
        make_entity("t2", "Kong Vault", &["Safety Rol"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "t1");
}

#[test]
fn test_isolated_entities_are_kept() {
    let entities = vec![
        make_entity("t1", "Safety Roll", &[]),
        make_entity("loner", "Precision Jump", &[]),
        make_entity("t2", "Kong Vault", &["t1"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.contains("loner"));
    assert!(graph.edges_for("loner").is_empty());
}

#[test]
fn test_cyclic_input_is_accepted() {
    let entities = vec![
        make_entity("a", "Trick A", &["Trick B"]),
        make_entity("b", "Trick B", &["Trick A"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 2);
    assert!(graph.diagnostics.is_empty());
}

#[test]
fn test_references_keep_listed_order_in_edges() {
    let entities = vec![
        make_entity("t1", "Safety Roll", &[]),
        make_entity("t2", "Kong Vault", &[]),
        make_entity("t3", "Double Kong", &["Kong Vault", "Safety Roll"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.edges[0].source, "t2");
    assert_eq!(graph.edges[1].source, "t1");
}

#[test]
fn test_multiple_diagnostics_in_encounter_order() {
    let entities = vec![
        make_entity("t1", "Safety Roll", &["nope-one", "nope-two"]),
        make_entity("t2", "Kong Vault", &["nope-three"]),
    ];
    let graph = build(&entities, &ResolverConfig::default());

    let raws: Vec<&str> = graph.diagnostics.iter().map(|d| d.raw.as_str()).collect();
    assert_eq!(raws, vec!["nope-one", "nope-two", "nope-three"]);
}
