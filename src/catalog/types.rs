//! Level record data structures.
//!
//! A level is immutable once loaded. Its acceptance mode is resolved into a
//! single [`AnswerRule`] at deserialization time, so every record that
//! reaches the game has exactly one rule, possibly [`AnswerRule::Malformed`].

use serde::Deserialize;
use std::fmt;

/// How a submitted answer is accepted for a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRule {
    /// Free text, case-insensitive exact match.
    Exact(String),
    /// Free text, every substring must appear (case-insensitive, any order).
    Contains(Vec<String>),
    /// Multiple choice, answer must equal `choices[correct_index]`.
    Choice {
        choices: Vec<String>,
        correct_index: usize,
    },
    /// Record carries no usable acceptance mode; never accepts an answer.
    Malformed(MalformedRule),
}

/// Why a level record could not be given a real acceptance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedRule {
    NoAcceptanceMode,
    BothAcceptanceModes,
    EmptyAnswerCheck,
    EmptySubstringSet,
    MissingChoiceIndex,
    ChoiceIndexOutOfRange { index: i64, len: usize },
}

impl fmt::Display for MalformedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAcceptanceMode => write!(f, "neither answerCheck nor choices present"),
            Self::BothAcceptanceModes => write!(f, "both answerCheck and choices present"),
            Self::EmptyAnswerCheck => write!(f, "answerCheck is an empty string"),
            Self::EmptySubstringSet => write!(f, "answerCheck is an empty list"),
            Self::MissingChoiceIndex => write!(f, "choices present without correctChoiceIndex"),
            Self::ChoiceIndexOutOfRange { index, len } => {
                write!(f, "correctChoiceIndex {} outside {} choices", index, len)
            }
        }
    }
}

/// One quiz level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawLevel")]
pub struct LevelRecord {
    pub prompt: String,
    pub success_msg: String,
    pub error_msg: String,
    pub hint: Option<String>,
    pub rule: AnswerRule,
}

impl LevelRecord {
    pub fn new(prompt: impl Into<String>, rule: AnswerRule) -> Self {
        Self {
            prompt: prompt.into(),
            success_msg: "Correct!".to_string(),
            error_msg: "Not quite, try again.".to_string(),
            hint: None,
            rule,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_messages(mut self, success: impl Into<String>, error: impl Into<String>) -> Self {
        self.success_msg = success.into();
        self.error_msg = error.into();
        self
    }

    /// Choice texts for multiple-choice levels, empty otherwise.
    pub fn choices(&self) -> &[String] {
        match &self.rule {
            AnswerRule::Choice { choices, .. } => choices,
            _ => &[],
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.rule, AnswerRule::Choice { .. })
    }

    /// The hint, if one exists and is not blank.
    pub fn hint_text(&self) -> Option<&str> {
        self.hint.as_deref().filter(|h| !h.trim().is_empty())
    }

    pub fn malformed(&self) -> Option<MalformedRule> {
        match self.rule {
            AnswerRule::Malformed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// `answerCheck` is either one string or a list of substrings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswerCheck {
    One(String),
    Many(Vec<String>),
}

/// On-disk shape of a level (camelCase keys in levels.json).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLevel {
    prompt: String,
    #[serde(default)]
    success_msg: String,
    #[serde(default)]
    error_msg: String,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    answer_check: Option<RawAnswerCheck>,
    #[serde(default)]
    choices: Option<Vec<String>>,
    #[serde(default)]
    correct_choice_index: Option<i64>,
}

impl From<RawLevel> for LevelRecord {
    fn from(raw: RawLevel) -> Self {
        let choices = raw.choices.unwrap_or_default();
        let has_choice = !choices.is_empty() || raw.correct_choice_index.is_some();

        let rule = match (raw.answer_check, has_choice) {
            (Some(_), true) => AnswerRule::Malformed(MalformedRule::BothAcceptanceModes),
            (None, false) => AnswerRule::Malformed(MalformedRule::NoAcceptanceMode),
            (Some(RawAnswerCheck::One(s)), false) if s.trim().is_empty() => {
                AnswerRule::Malformed(MalformedRule::EmptyAnswerCheck)
            }
            (Some(RawAnswerCheck::One(s)), false) => AnswerRule::Exact(s),
            (Some(RawAnswerCheck::Many(v)), false) if v.is_empty() => {
                AnswerRule::Malformed(MalformedRule::EmptySubstringSet)
            }
            (Some(RawAnswerCheck::Many(v)), false) => AnswerRule::Contains(v),
            (None, true) => choice_rule(choices, raw.correct_choice_index),
        };

        Self {
            prompt: raw.prompt,
            success_msg: raw.success_msg,
            error_msg: raw.error_msg,
            hint: raw.hint,
            rule,
        }
    }
}

fn choice_rule(choices: Vec<String>, index: Option<i64>) -> AnswerRule {
    let Some(index) = index else {
        return AnswerRule::Malformed(MalformedRule::MissingChoiceIndex);
    };
    match usize::try_from(index) {
        Ok(i) if i < choices.len() => AnswerRule::Choice {
            choices,
            correct_index: i,
        },
        _ => AnswerRule::Malformed(MalformedRule::ChoiceIndexOutOfRange {
            index,
            len: choices.len(),
        }),
    }
}

impl AnswerRule {
    pub fn is_malformed(&self) -> bool {
        matches!(self, AnswerRule::Malformed(_))
    }
}
