use crate::domain::class_name::{ClassName, NESTING_SEPARATOR};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// Dependency -> number of textual occurrences.
pub type DependencyCounts = BTreeMap<ClassName, u32>;

/// Dependency Graph - class name to its weighted outgoing edges.
///
/// Edges are only ever added or strengthened. A class never depends on itself
/// and every stored vertex has at least one edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<ClassName, DependencyCounts>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one file's counts into the graph, summing weights of edges that
    /// already exist.
    pub fn merge(&mut self, class_name: ClassName, counts: DependencyCounts) {
        let counts: Vec<(ClassName, u32)> = counts
            .into_iter()
            .filter(|(dependency, weight)| *weight > 0 && *dependency != class_name)
            .collect();
        if counts.is_empty() {
            return;
        }

        let existing = self.edges.entry(class_name).or_default();
        for (dependency, weight) in counts {
            let entry = existing.entry(dependency).or_insert(0);
            *entry = entry.saturating_add(weight);
        }
    }

    /// The graph itself, or with `collapse_inner` a copy without nested-class
    /// vertices and edge targets. Vertices left without edges are dropped.
    pub fn project(&self, collapse_inner: bool) -> Cow<'_, DependencyGraph> {
        if !collapse_inner {
            return Cow::Borrowed(self);
        }

        let edges = self
            .edges
            .iter()
            .filter(|(source, _)| !is_nested(source))
            .filter_map(|(source, deps)| {
                let kept: DependencyCounts = deps
                    .iter()
                    .filter(|(target, _)| !is_nested(target))
                    .map(|(target, weight)| (target.clone(), *weight))
                    .collect();
                (!kept.is_empty()).then(|| (source.clone(), kept))
            })
            .collect();
        Cow::Owned(DependencyGraph { edges })
    }

    pub fn dependencies_of(&self, class_name: &str) -> Option<&DependencyCounts> {
        self.edges.get(class_name)
    }

    pub fn weight(&self, source: &str, target: &str) -> Option<u32> {
        self.edges.get(source)?.get(target).copied()
    }

    pub fn contains_class(&self, class_name: &str) -> bool {
        self.edges.contains_key(class_name)
    }

    /// Number of classes with outgoing edges.
    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    pub fn total_weight(&self) -> u64 {
        self.edges
            .values()
            .flat_map(BTreeMap::values)
            .map(|&w| u64::from(w))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassName, &DependencyCounts)> {
        self.edges.iter()
    }

    /// `(source, target, weight)` triples in sorted order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.edges.iter().flat_map(|(source, deps)| {
            deps.iter()
                .map(move |(target, &weight)| (source.as_str(), target.as_str(), weight))
        })
    }

    /// Petgraph view for downstream metrics; every source and target becomes
    /// a node.
    pub fn to_petgraph(&self) -> DiGraph<ClassName, u32> {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for (source, target, weight) in self.edges() {
            let s = *nodes
                .entry(source)
                .or_insert_with(|| graph.add_node(source.to_string()));
            let t = *nodes
                .entry(target)
                .or_insert_with(|| graph.add_node(target.to_string()));
            graph.add_edge(s, t, weight);
        }
        graph
    }
}

fn is_nested(class_name: &str) -> bool {
    class_name.contains(NESTING_SEPARATOR)
}
