//! Intent: the coarse category that picks a response generator.

use serde::{Deserialize, Serialize};

use crate::mentor::keywords::NormalizedMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Jobs,
    Resume,
    Salary,
    Plan,
    Other,
}

/// Fast-path keyword sets, checked in this order. First match wins.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Jobs,
        &["vaga", "emprego", "oportunidade", "contratando", "job"],
    ),
    (
        Intent::Resume,
        &["currículo", "curriculo", "cv", "resume", "linkedin"],
    ),
    (
        Intent::Salary,
        &[
            "salário",
            "salario",
            "salarial",
            "remuneração",
            "remuneracao",
            "ganha",
        ],
    ),
    (
        Intent::Plan,
        &[
            "plano de carreira",
            "plano",
            "roadmap",
            "aprender",
            "habilidades",
            "estudar",
        ],
    ),
];

impl Intent {
    /// Label used when talking to the inference service.
    pub fn label(self) -> &'static str {
        match self {
            Intent::Jobs => "VAGAS",
            Intent::Resume => "CURRICULO",
            Intent::Salary => "SALARIO",
            Intent::Plan => "PLANO",
            Intent::Other => "OUTROS",
        }
    }

    /// Tier 1: keyword match. `None` means the message needs the model.
    pub fn from_keywords(message: &NormalizedMessage) -> Option<Intent> {
        INTENT_KEYWORDS
            .iter()
            .find(|&&(_, keywords)| message.matches_any(keywords))
            .map(|&(intent, _)| intent)
    }

    /// Parses a model answer. The first recognized word wins; anything else is `Other`.
    pub fn from_label(answer: &str) -> Intent {
        answer
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .find_map(|token| match token.to_uppercase().as_str() {
                "VAGAS" | "VAGA" | "JOBS" => Some(Intent::Jobs),
                "CURRICULO" | "CURRÍCULO" | "RESUME" => Some(Intent::Resume),
                "SALARIO" | "SALÁRIO" | "SALARY" => Some(Intent::Salary),
                "PLANO" | "PLAN" => Some(Intent::Plan),
                "OUTROS" | "OTHER" => Some(Intent::Other),
                _ => None,
            })
            .unwrap_or(Intent::Other)
    }
}
