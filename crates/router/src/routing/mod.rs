//! Query routing data model and collaborator contracts
//!
//! Provides:
//! - The classification, derivation, and graph types shared across the
//!   workspace
//! - The `DerivationEngine` and `KnowledgeGraph` traits the router
//!   dispatches to

mod classifier;
mod router;

pub use classifier::{Classifier, TriggerLexicon};
pub use router::{QueryRouter, GRAPH_SOURCE};

use actuaria_common::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Operating mode requested by the caller.
///
/// Does not affect classification today; it is threaded through so the
/// presentation layer can vary tone and format later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    #[default]
    Study,
    Tutor,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Study => write!(f, "study"),
            QueryMode::Tutor => write!(f, "tutor"),
        }
    }
}

/// Classification outcome; exactly one per query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    /// Needs a symbolic derivation
    Computational,
    /// Needs concept-graph retrieval
    Conceptual,
    /// Needs both derivation and supporting context
    Hybrid,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Computational => "COMPUTATIONAL",
            QueryType::Conceptual => "CONCEPTUAL",
            QueryType::Hybrid => "HYBRID",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One formula-plus-explanation pair in an ordered derivation.
///
/// Order is derivation order; steps are never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationStep {
    /// Step ID
    pub id: String,

    /// Single formula in LaTeX notation (may be empty for prose-only steps)
    pub latex: String,

    /// Natural-language explanation of the step
    pub explanation: String,
}

/// A derivation engine result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    /// Ordered derivation steps
    pub steps: Vec<DerivationStep>,

    /// Final-answer expression
    pub final_answer: String,

    /// Human-readable provenance label
    pub source: String,
}

/// Node category in the concept graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeLabel {
    Concept,
    Formula,
    Theorem,
    Exam,
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Concept => write!(f, "Concept"),
            NodeLabel::Formula => write!(f, "Formula"),
            NodeLabel::Theorem => write!(f, "Theorem"),
            NodeLabel::Exam => write!(f, "Exam"),
        }
    }
}

/// Node in the concept graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node ID, unique within a graph store
    pub id: String,

    /// Node category
    pub label: NodeLabel,

    /// Display name (for Formula nodes, the formula itself)
    pub name: String,

    /// Optional extra attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Typed relationship between two nodes, referenced by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,

    /// Relationship tag, e.g. DERIVED_FROM, TESTED_IN, MENTIONS, DEFINES,
    /// DEPENDS_ON
    pub relationship: String,
}

/// Subgraph returned by a concept query; may be empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphContext {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphContext {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids are unique and every edge endpoint exists in the node set.
    pub fn is_consistent(&self) -> bool {
        let mut ids = HashSet::new();
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return false;
            }
        }
        self.edges
            .iter()
            .all(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
    }
}

/// The router's output: one normalized record regardless of dispatch path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterResponse {
    /// Classification that selected the dispatch path
    #[serde(rename = "type")]
    pub query_type: QueryType,

    /// Operating mode echoed back to the caller
    pub mode: QueryMode,

    /// Ordered derivation steps (empty if none apply)
    pub steps: Vec<DerivationStep>,

    /// Final-answer expression (may be empty)
    pub final_answer: String,

    /// Supporting subgraph; present only when a graph lookup occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_context: Option<GraphContext>,

    /// Human-readable provenance label
    pub source: String,
}

/// Symbolic derivation collaborator
#[async_trait::async_trait]
pub trait DerivationEngine: Send + Sync {
    /// Produce an ordered derivation and final answer for the query
    async fn solve(&self, query: &str) -> Result<Derivation>;
}

/// Concept-graph retrieval collaborator
#[async_trait::async_trait]
pub trait KnowledgeGraph: Send + Sync {
    /// Return the subgraph relevant to the term
    async fn query_concept(&self, term: &str) -> Result<GraphContext>;

    /// Formula nodes related to the term
    async fn related_formulas(&self, term: &str) -> Result<Vec<GraphNode>> {
        let context = self.query_concept(term).await?;
        Ok(context
            .nodes
            .into_iter()
            .filter(|n| n.label == NodeLabel::Formula)
            .collect())
    }

    /// Names of the exams the term is tested in
    async fn exam_mapping(&self, term: &str) -> Result<Vec<String>> {
        let context = self.query_concept(term).await?;
        Ok(context
            .nodes
            .into_iter()
            .filter(|n| n.label == NodeLabel::Exam)
            .map(|n| n.name)
            .collect())
    }
}
