//! In-memory knowledge graph store
//!
//! Nodes and edges are kept as flat lists; matching is case-insensitive
//! containment with optional one-hop neighbor expansion. Referential
//! integrity is enforced at write time, so every returned subgraph is
//! consistent by construction.

use crate::routing::{GraphContext, GraphEdge, GraphNode, KnowledgeGraph, NodeLabel};
use crate::syllabus::{default_exam_profiles, default_syllabus};
use actuaria_common::config::GraphConfig;
use actuaria_common::errors::{AppError, Result};
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// Concept-graph store backed by in-process adjacency lists
pub struct InMemoryKnowledgeGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    config: GraphConfig,
}

impl InMemoryKnowledgeGraph {
    /// Create an empty store
    pub fn new(config: GraphConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            config,
        }
    }

    /// Create a store seeded with the built-in actuarial corpus
    pub fn with_default_corpus() -> Self {
        let mut graph = Self::new(GraphConfig::default());
        graph.seed_default_corpus();
        graph
    }

    /// Insert a node; the id must be unique within the store
    pub fn insert_node(&mut self, node: GraphNode) -> Result<()> {
        if self.contains_node(&node.id) {
            return Err(AppError::Validation {
                message: format!("duplicate node id: {}", node.id),
                field: Some("id".into()),
            });
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Insert an edge; both endpoints must already exist
    pub fn insert_edge(&mut self, edge: GraphEdge) -> Result<()> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(AppError::Validation {
                    message: format!("edge endpoint not in store: {}", endpoint),
                    field: None,
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Seed the base concepts, the syllabus topics with their formulas, the
    /// exam profiles, and the typed relationships among them.
    pub fn seed_default_corpus(&mut self) {
        // Base concepts
        self.push_node("c1", NodeLabel::Concept, "Survival Function", None);
        self.push_node("c2", NodeLabel::Concept, "Force of Mortality", None);
        self.push_node("c3", NodeLabel::Concept, "Life Table", None);
        self.push_node("c4", NodeLabel::Concept, "Annuity Due", None);
        self.push_node(
            "f1",
            NodeLabel::Formula,
            "S_x(t) = e^{-\\int_0^t \\mu_{x+s} ds}",
            None,
        );
        self.push_node("th1", NodeLabel::Theorem, "Law of Large Numbers", None);

        // Syllabus topics and their formulas
        for topic in default_syllabus() {
            let props = HashMap::from([
                ("weight".to_string(), json!(topic.weight)),
                ("level".to_string(), json!(topic.level.as_str())),
            ]);
            self.push_node(&topic.id, NodeLabel::Concept, &topic.title, Some(props));

            for (index, formula) in topic.formulas.iter().enumerate() {
                let formula_id = format!("{}-f{}", topic.id, index + 1);
                self.push_node(&formula_id, NodeLabel::Formula, formula, None);
                self.push_edge(&formula_id, &topic.id, "DEFINES");
            }
        }

        // Exam profiles
        for profile in default_exam_profiles() {
            let props = HashMap::from([
                ("question_style".to_string(), json!(profile.question_style.as_str())),
                ("avg_marks".to_string(), json!(profile.avg_marks)),
            ]);
            self.push_node(&profile.id, NodeLabel::Exam, &profile.name, Some(props));
        }

        // Relationships
        self.push_edge("c2", "c1", "DERIVED_FROM");
        self.push_edge("f1", "c1", "DEFINES");
        self.push_edge("c3", "c1", "DEPENDS_ON");
        self.push_edge("th1", "c1", "MENTIONS");
        self.push_edge("t2", "c1", "DEPENDS_ON");
        self.push_edge("t3", "t2", "DEPENDS_ON");
        self.push_edge("t4", "t1", "DEPENDS_ON");
        self.push_edge("t5", "t4", "DEPENDS_ON");
        self.push_edge("c4", "t4", "DEPENDS_ON");
        self.push_edge("c1", "e1", "TESTED_IN");
        self.push_edge("t1", "e2", "TESTED_IN");
        self.push_edge("t2", "e1", "TESTED_IN");
        self.push_edge("t3", "e1", "TESTED_IN");
        self.push_edge("t4", "e1", "TESTED_IN");
        self.push_edge("t5", "e1", "TESTED_IN");
    }

    // Seeding helpers; ids are controlled above, so no integrity checks
    fn push_node(
        &mut self,
        id: &str,
        label: NodeLabel,
        name: &str,
        properties: Option<HashMap<String, serde_json::Value>>,
    ) {
        self.nodes.push(GraphNode {
            id: id.to_string(),
            label,
            name: name.to_string(),
            properties,
        });
    }

    fn push_edge(&mut self, source: &str, target: &str, relationship: &str) {
        self.edges.push(GraphEdge {
            source: source.to_string(),
            target: target.to_string(),
            relationship: relationship.to_string(),
        });
    }
}

#[async_trait::async_trait]
impl KnowledgeGraph for InMemoryKnowledgeGraph {
    async fn query_concept(&self, term: &str) -> Result<GraphContext> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(GraphContext::default());
        }

        let mut selected: Vec<&GraphNode> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        // Bidirectional containment so a full question still lands on the
        // concept it names
        for node in &self.nodes {
            let name = node.name.to_lowercase();
            if name.contains(&needle) || needle.contains(&name) {
                if seen.insert(node.id.as_str()) {
                    selected.push(node);
                }
            }
        }

        if self.config.expand_neighbors {
            let matched: HashSet<&str> = seen.iter().copied().collect();
            for edge in &self.edges {
                for (near, far) in [
                    (&edge.source, &edge.target),
                    (&edge.target, &edge.source),
                ] {
                    if matched.contains(near.as_str()) && !seen.contains(far.as_str()) {
                        if let Some(neighbor) = self.node_by_id(far) {
                            seen.insert(neighbor.id.as_str());
                            selected.push(neighbor);
                        }
                    }
                }
            }
        }

        selected.truncate(self.config.max_nodes);

        let ids: HashSet<&str> = selected.iter().map(|n| n.id.as_str()).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
            .cloned()
            .collect();

        Ok(GraphContext {
            nodes: selected.into_iter().cloned().collect(),
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, label: NodeLabel, name: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label,
            name: name.to_string(),
            properties: None,
        }
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let context = graph.query_concept("MORTALITY").await.unwrap();

        assert!(context.nodes.iter().any(|n| n.name == "Force of Mortality"));
        assert!(context.is_consistent());
    }

    #[tokio::test]
    async fn test_full_question_matches_contained_name() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let context = graph
            .query_concept("What is the force of mortality?")
            .await
            .unwrap();

        assert!(context.nodes.iter().any(|n| n.name == "Force of Mortality"));
    }

    #[tokio::test]
    async fn test_neighbor_expansion() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let context = graph.query_concept("mortality").await.unwrap();

        // "Force of Mortality" is DERIVED_FROM "Survival Function"
        assert!(context.nodes.iter().any(|n| n.name == "Survival Function"));
        assert!(context
            .edges
            .iter()
            .any(|e| e.relationship == "DERIVED_FROM"));
        assert!(context.is_consistent());
    }

    #[tokio::test]
    async fn test_expansion_can_be_disabled() {
        let mut graph = InMemoryKnowledgeGraph::new(GraphConfig {
            expand_neighbors: false,
            ..GraphConfig::default()
        });
        graph.seed_default_corpus();

        let context = graph.query_concept("life table").await.unwrap();
        assert_eq!(context.nodes.len(), 1);
        assert!(context.edges.is_empty());
    }

    #[tokio::test]
    async fn test_result_is_capped_at_max_nodes() {
        let mut graph = InMemoryKnowledgeGraph::new(GraphConfig {
            max_nodes: 2,
            ..GraphConfig::default()
        });
        graph.seed_default_corpus();

        // Single letter matches nearly every node name
        let context = graph.query_concept("a").await.unwrap();
        assert!(context.nodes.len() <= 2);
        assert!(context.is_consistent());
    }

    #[tokio::test]
    async fn test_unknown_term_returns_empty_context() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let context = graph.query_concept("stochastic volatility").await.unwrap();
        assert!(context.is_empty());
    }

    #[tokio::test]
    async fn test_blank_term_returns_empty_context() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let context = graph.query_concept("   ").await.unwrap();
        assert!(context.is_empty());
    }

    #[tokio::test]
    async fn test_related_formulas() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let formulas = graph.related_formulas("annuities").await.unwrap();

        assert!(!formulas.is_empty());
        assert!(formulas.iter().all(|n| n.label == NodeLabel::Formula));
        assert!(formulas.iter().any(|n| n.name.contains("\\ddot{a}")));
    }

    #[tokio::test]
    async fn test_exam_mapping() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let exams = graph.exam_mapping("survival").await.unwrap();
        assert!(exams.contains(&"Exam FAM".to_string()));
    }

    #[test]
    fn test_insert_edge_requires_endpoints() {
        let mut graph = InMemoryKnowledgeGraph::new(GraphConfig::default());
        let edge = GraphEdge {
            source: "a".into(),
            target: "b".into(),
            relationship: "DEPENDS_ON".into(),
        };
        assert!(graph.insert_edge(edge.clone()).is_err());

        graph
            .insert_node(node("a", NodeLabel::Concept, "Interest"))
            .unwrap();
        graph
            .insert_node(node("b", NodeLabel::Concept, "Discount"))
            .unwrap();
        assert!(graph.insert_edge(edge).is_ok());
        assert_eq!(graph.edge_count(), 1);

        // Everything written through the checked API stays consistent
        let context = tokio_test::block_on(graph.query_concept("interest")).unwrap();
        assert!(context.is_consistent());
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let mut graph = InMemoryKnowledgeGraph::new(GraphConfig::default());
        graph
            .insert_node(node("a", NodeLabel::Concept, "Interest"))
            .unwrap();
        let err = graph
            .insert_node(node("a", NodeLabel::Concept, "Interest"))
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_default_corpus_is_consistent() {
        let graph = InMemoryKnowledgeGraph::with_default_corpus();
        let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), graph.node_count());
        for edge in &graph.edges {
            assert!(ids.contains(edge.source.as_str()));
            assert!(ids.contains(edge.target.as_str()));
        }
    }
}
