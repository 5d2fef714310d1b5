//! Prerequisite reference resolution: raw free-text strings to canonical
//! entity ids.
//!
//! A raw reference may hold another entity's id, its exact name, or a
//! near-miss spelling; the tagged [`ResolvedReference`] preserves which path
//! matched so callers can audit the data instead of guessing.

use skilltree_core::config::ResolverConfig;
use skilltree_core::model::{Entity, ResolutionMethod, ResolvedReference};
use std::collections::{HashMap, HashSet};

/// Collapse case and internal whitespace so near-identical names compare equal.
pub(crate) fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves raw prerequisite references against a fixed candidate set.
///
/// The name index is built once per candidate set; every `resolve` call is
/// a pure function over it.
#[derive(Debug, Clone)]
pub struct Resolver {
    /// Normalized candidate names with their ids, in first-encounter order.
    /// Scanned linearly for fuzzy matching so tie-breaking stays
    /// deterministic: lowest distance, then first-inserted.
    names: Vec<(String, String)>,
    /// Normalized name → id. On duplicate normalized names the
    /// first-encountered id wins (accepted ambiguity).
    by_name: HashMap<String, String>,
    ids: HashSet<String>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(candidates: &[Entity], config: ResolverConfig) -> Self {
        let mut names = Vec::with_capacity(candidates.len());
        let mut by_name: HashMap<String, String> = HashMap::new();
        let mut ids = HashSet::new();
        for entity in candidates {
            let norm = normalize(&entity.name);
            by_name
                .entry(norm.clone())
                .or_insert_with(|| entity.id.clone());
            names.push((norm, entity.id.clone()));
            ids.insert(entity.id.clone());
        }
        Self {
            names,
            by_name,
            ids,
            config,
        }
    }

    /// Resolve one raw reference. Unresolved is a reported outcome, never
    /// an error.
    ///
    /// Resolution order: exact normalized-name match, then verbatim id
    /// match (trimmed, case-sensitive), then nearest candidate by
    /// Levenshtein distance within the configured thresholds.
    pub fn resolve(&self, raw: &str) -> ResolvedReference {
        let norm = normalize(raw);

        if let Some(id) = self.by_name.get(&norm) {
            return ResolvedReference {
                raw: raw.to_string(),
                target_id: Some(id.clone()),
                method: ResolutionMethod::Exact,
                distance: None,
            };
        }

        let trimmed = raw.trim();
        if self.ids.contains(trimmed) {
            return ResolvedReference {
                raw: raw.to_string(),
                target_id: Some(trimmed.to_string()),
                method: ResolutionMethod::DirectId,
                distance: None,
            };
        }

        let mut best: Option<(usize, &str)> = None;
        for (name, id) in &self.names {
            let distance = strsim::levenshtein(&norm, name);
            // Strict comparison: equidistant later candidates never displace
            // an earlier one.
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, id));
            }
        }

        match best {
            Some((distance, id)) if self.accepts(distance, norm.chars().count()) => {
                ResolvedReference {
                    raw: raw.to_string(),
                    target_id: Some(id.to_string()),
                    method: ResolutionMethod::Fuzzy,
                    distance: Some(distance),
                }
            }
            Some((distance, _)) => ResolvedReference {
                raw: raw.to_string(),
                target_id: None,
                method: ResolutionMethod::Unresolved,
                distance: Some(distance),
            },
            None => ResolvedReference {
                raw: raw.to_string(),
                target_id: None,
                method: ResolutionMethod::Unresolved,
                distance: None,
            },
        }
    }

    /// Accept within the absolute cap, or when the distance is small
    /// relative to the reference length.
    fn accepts(&self, distance: usize, raw_len: usize) -> bool {
        distance <= self.config.max_distance
            || (distance as f64) / ((raw_len + 1) as f64) < self.config.relative_threshold
    }
}
