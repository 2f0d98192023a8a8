//! Symbolic derivation engine
//!
//! Template-based solver covering the actuarial topics the tutor handles.
//! Topic detection is lexical; each template carries a provenance label that
//! states exactly which knowledge produced it.

use crate::routing::{Derivation, DerivationEngine, DerivationStep};
use actuaria_common::errors::Result;

/// Provenance label for symbolically derived answers
pub const ENGINE_SOURCE: &str = "Symbolic Derivation Engine";

/// In-process derivation engine
#[derive(Debug, Clone, Default)]
pub struct SymbolicEngine;

impl SymbolicEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DerivationEngine for SymbolicEngine {
    async fn solve(&self, query: &str) -> Result<Derivation> {
        let q = query.to_lowercase();

        if q.contains("annuity") {
            return Ok(annuity_due());
        }

        if q.contains("force of interest") || q.contains("delta") {
            return Ok(continuous_whole_life());
        }

        if q.contains("survival") || q.contains("mortality") {
            return Ok(survival_model());
        }

        Ok(collective_risk())
    }
}

fn step(id: &str, latex: &str, explanation: &str) -> DerivationStep {
    DerivationStep {
        id: id.to_string(),
        latex: latex.to_string(),
        explanation: explanation.to_string(),
    }
}

fn annuity_due() -> Derivation {
    Derivation {
        steps: vec![
            step(
                "1",
                "\\ddot{a}_{\\overline{n}|} = \\sum_{t=0}^{n-1} v^t",
                "Define the annuity-due as the sum of discounted payments.",
            ),
            step(
                "2",
                "\\ddot{a}_{\\overline{n}|} = \\frac{1 - v^n}{d}",
                "Apply the geometric series formula, where $d = 1 - v$.",
            ),
        ],
        final_answer: "\\frac{1 - v^n}{i/(1+i)}".to_string(),
        source: ENGINE_SOURCE.to_string(),
    }
}

fn continuous_whole_life() -> Derivation {
    Derivation {
        steps: vec![
            step(
                "1",
                "v(t) = e^{-\\int_0^t \\delta(s) ds}",
                "Calculate the discount function from the accumulation function.",
            ),
            step(
                "2",
                "\\bar{A}_x = \\int_0^\\infty v(t) \\cdot {}_tp_x \\cdot \\mu_{x+t} \\, dt",
                "The actuarial present value for a continuous whole life insurance.",
            ),
        ],
        final_answer: "\\frac{\\mu}{\\mu + \\delta}".to_string(),
        source: format!("{} (Constant Force Assumption)", ENGINE_SOURCE),
    }
}

fn survival_model() -> Derivation {
    Derivation {
        steps: vec![
            step(
                "1",
                "{}_tp_x = e^{-\\int_0^t \\mu_{x+s} ds}",
                "Express the survival probability through the force of mortality.",
            ),
            step(
                "2",
                "e_x = \\int_0^\\omega {}_tp_x \\, dt",
                "Integrate the survival function to obtain the complete expectation of life.",
            ),
        ],
        final_answer: "\\int_0^\\omega e^{-\\int_0^t \\mu_{x+s} ds} \\, dt".to_string(),
        source: ENGINE_SOURCE.to_string(),
    }
}

fn collective_risk() -> Derivation {
    Derivation {
        steps: vec![
            step(
                "1",
                "E[S] = E[N] \\cdot E[X]",
                "Calculate the expected aggregate loss under the collective risk model.",
            ),
            step(
                "2",
                "Var(S) = E[N] \\cdot Var(X) + Var(N) \\cdot (E[X])^2",
                "Apply the law of total variance.",
            ),
        ],
        final_answer: "E[N]Var(X) + Var(N)(E[X])^2".to_string(),
        source: "Standard Risk Theory Formulas".to_string(),
    }
}
