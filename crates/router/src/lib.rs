//! Actuaria Query Routing Core
//!
//! Routes free-text actuarial questions to the strategy that can answer
//! them:
//! - Symbolic derivation for computational questions
//! - Knowledge-graph retrieval for conceptual questions
//! - Both, merged into one provenance-tagged response, for hybrid questions

pub mod engines;
pub mod routing;
pub mod syllabus;

pub use engines::{InMemoryKnowledgeGraph, SymbolicEngine};
pub use routing::{
    Classifier, Derivation, DerivationEngine, DerivationStep, GraphContext, GraphEdge, GraphNode,
    KnowledgeGraph, NodeLabel, QueryMode, QueryRouter, QueryType, RouterResponse,
};
