//! Exam syllabus reference data
//!
//! Weighted syllabus topics and exam profiles used to seed the default
//! knowledge-graph corpus.

use serde::{Deserialize, Serialize};

/// Coverage depth of a syllabus topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicLevel {
    Core,
    Advanced,
    Niche,
}

impl TopicLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicLevel::Core => "Core",
            TopicLevel::Advanced => "Advanced",
            TopicLevel::Niche => "Niche",
        }
    }
}

/// One weighted topic on the exam syllabus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusTopic {
    pub id: String,
    pub title: String,

    /// Share of the exam, 0-100
    pub weight: u8,

    pub level: TopicLevel,

    /// Key formulas in LaTeX notation
    pub formulas: Vec<String>,
}

/// Dominant question style of an exam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionStyle {
    Theoretical,
    Computational,
    Mixed,
}

impl QuestionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStyle::Theoretical => "Theoretical",
            QuestionStyle::Computational => "Computational",
            QuestionStyle::Mixed => "Mixed",
        }
    }
}

/// Profile of one professional exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamProfile {
    pub id: String,
    pub name: String,
    pub question_style: QuestionStyle,
    pub avg_marks: f32,
}

fn topic(id: &str, title: &str, weight: u8, level: TopicLevel, formulas: &[&str]) -> SyllabusTopic {
    SyllabusTopic {
        id: id.to_string(),
        title: title.to_string(),
        weight,
        level,
        formulas: formulas.iter().map(|f| f.to_string()).collect(),
    }
}

/// The built-in syllabus. Weights sum to 100.
pub fn default_syllabus() -> Vec<SyllabusTopic> {
    vec![
        topic(
            "t1",
            "Time Value of Money",
            15,
            TopicLevel::Core,
            &[
                "v = (1+i)^{-1}",
                "d = iv",
                "a_{\\overline{n}|} = (1-v^n)/i",
            ],
        ),
        topic(
            "t2",
            "Survival Models",
            25,
            TopicLevel::Core,
            &[
                "{}_tp_x = e^{-\\int_0^t \\mu_{x+s} ds}",
                "e_x = \\int_0^\\omega {}_tp_x dt",
            ],
        ),
        topic(
            "t3",
            "Life Insurance",
            20,
            TopicLevel::Advanced,
            &["A_x = \\int_0^\\infty v^t {}_tp_x \\mu_{x+t} dt"],
        ),
        topic(
            "t4",
            "Annuities",
            30,
            TopicLevel::Advanced,
            &["\\ddot{a}_x = \\sum_{k=0}^\\infty v^k {}_kp_x"],
        ),
        topic(
            "t5",
            "Premium Calculation",
            10,
            TopicLevel::Niche,
            &["P = \\frac{A_x}{\\ddot{a}_x}"],
        ),
    ]
}

/// The built-in exam profiles
pub fn default_exam_profiles() -> Vec<ExamProfile> {
    vec![
        ExamProfile {
            id: "e1".to_string(),
            name: "Exam FAM".to_string(),
            question_style: QuestionStyle::Mixed,
            avg_marks: 2.5,
        },
        ExamProfile {
            id: "e2".to_string(),
            name: "Exam FM".to_string(),
            question_style: QuestionStyle::Computational,
            avg_marks: 2.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_weights_sum_to_one_hundred() {
        let total: u32 = default_syllabus().iter().map(|t| t.weight as u32).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_ids_are_unique() {
        let syllabus = default_syllabus();
        let ids: HashSet<_> = syllabus.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), syllabus.len());
    }

    #[test]
    fn test_every_topic_has_a_formula() {
        for topic in default_syllabus() {
            assert!(!topic.formulas.is_empty(), "{} has no formulas", topic.title);
        }
    }

    #[test]
    fn test_exam_profiles() {
        let profiles = default_exam_profiles();
        assert_eq!(profiles.len(), 2);
        assert!(profiles.iter().any(|p| p.name == "Exam FAM"));
    }
}
