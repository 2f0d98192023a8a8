//! Query router - the core orchestrator
//!
//! Owns the dispatch policy and the merge of heterogeneous engine outputs
//! into one normalized response. Stateless between calls; collaborators are
//! injected so the router can be exercised against deterministic stand-ins.

use super::{
    Classifier, DerivationEngine, DerivationStep, GraphContext, KnowledgeGraph, NodeLabel,
    QueryMode, QueryType, RouterResponse,
};
use actuaria_common::errors::{AppError, Result};
use actuaria_common::metrics;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Provenance label for graph-only answers
pub const GRAPH_SOURCE: &str = "Actuarial Knowledge Graph";

/// Words shorter than this never become graph lookup terms
const MIN_KEYWORD_CHARS: usize = 6;

/// The single entry point for answering a query
pub struct QueryRouter {
    classifier: Classifier,
    derivation: Arc<dyn DerivationEngine>,
    graph: Arc<dyn KnowledgeGraph>,
}

impl QueryRouter {
    pub fn new(
        classifier: Classifier,
        derivation: Arc<dyn DerivationEngine>,
        graph: Arc<dyn KnowledgeGraph>,
    ) -> Self {
        Self {
            classifier,
            derivation,
            graph,
        }
    }

    /// Classify the query once, dispatch to the collaborators the
    /// classification calls for, and merge their outputs.
    ///
    /// Collaborator failures propagate unmodified; there is no retry and no
    /// fabricated fallback answer, so the `source` label stays truthful. The
    /// caller is responsible for imposing a timeout on the whole call.
    pub async fn process(&self, query: &str, mode: QueryMode) -> Result<RouterResponse> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        let query_type = self.classifier.classify(query);
        tracing::info!(%request_id, query_type = %query_type, %mode, "Routing query");

        let result = self.dispatch(query, mode, query_type).await;

        match result {
            Ok(response) => {
                if let Some(context) = &response.graph_context {
                    debug_assert!(context.is_consistent());
                    metrics::record_graph_lookup(context.node_count());
                }
                let latency_ms = start.elapsed().as_millis() as u64;
                metrics::record_route(
                    start.elapsed().as_secs_f64(),
                    query_type.as_str(),
                    response.steps.len(),
                );
                tracing::info!(
                    %request_id,
                    steps = response.steps.len(),
                    latency_ms,
                    "Query routed"
                );
                Ok(response)
            }
            Err(err) => {
                metrics::record_engine_failure(failing_engine(&err));
                tracing::error!(%request_id, error = %err, "Routing failed");
                Err(err)
            }
        }
    }

    async fn dispatch(
        &self,
        query: &str,
        mode: QueryMode,
        query_type: QueryType,
    ) -> Result<RouterResponse> {
        match query_type {
            QueryType::Computational => {
                let derivation = self.derivation.solve(query).await?;
                Ok(RouterResponse {
                    query_type,
                    mode,
                    steps: derivation.steps,
                    final_answer: derivation.final_answer,
                    graph_context: None,
                    source: derivation.source,
                })
            }

            QueryType::Hybrid => {
                // The lookup term comes from the original query, not the
                // derivation result, so both calls can run concurrently.
                let (derivation, graph_context) = match candidate_keyword(query) {
                    Some(term) => {
                        let (derivation, context) = tokio::try_join!(
                            self.derivation.solve(query),
                            self.graph.query_concept(term)
                        )?;
                        (derivation, Some(context))
                    }
                    None => (self.derivation.solve(query).await?, None),
                };
                Ok(RouterResponse {
                    query_type,
                    mode,
                    steps: derivation.steps,
                    final_answer: derivation.final_answer,
                    graph_context,
                    source: derivation.source,
                })
            }

            QueryType::Conceptual => {
                let context = self.graph.query_concept(query).await?;
                let steps = synthesize_steps(&context);
                let final_answer = format!(
                    "Found {} related concepts in the Knowledge Graph.",
                    context.nodes.len()
                );
                Ok(RouterResponse {
                    query_type,
                    mode,
                    steps,
                    final_answer,
                    graph_context: Some(context),
                    source: GRAPH_SOURCE.to_string(),
                })
            }
        }
    }
}

/// First word of the query long enough to serve as a concept lookup term.
///
/// A naive stand-in for keyword extraction, kept for compatibility with the
/// established lookup behavior; isolated here so a real extractor can slot
/// in without touching dispatch.
fn candidate_keyword(query: &str) -> Option<&str> {
    query
        .split_whitespace()
        .find(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
}

fn failing_engine(err: &AppError) -> &str {
    match err {
        AppError::EngineUnavailable { engine, .. } | AppError::EngineTimeout { engine, .. } => {
            engine
        }
        AppError::GraphUnavailable { .. } => "knowledge-graph",
        _ => "unknown",
    }
}

/// One synthesized step per returned node: formulas surface their LaTeX,
/// everything else is prose-only.
fn synthesize_steps(context: &GraphContext) -> Vec<DerivationStep> {
    context
        .nodes
        .iter()
        .map(|node| DerivationStep {
            id: node.id.clone(),
            latex: if node.label == NodeLabel::Formula {
                node.name.clone()
            } else {
                String::new()
            },
            explanation: format!("{}: {}", node.label, node.name),
        })
        .collect()
}
