//! Answer checking.

use crate::catalog::{AnswerRule, LevelRecord};

/// Decide whether `submitted` satisfies the level's acceptance rule.
///
/// Pure apart from a diagnostic for malformed levels. Blank answers are
/// never correct.
pub fn evaluate(level: &LevelRecord, submitted: &str) -> bool {
    let answer = submitted.trim();
    if answer.is_empty() {
        return false;
    }

    match &level.rule {
        AnswerRule::Exact(expected) => answer.to_lowercase() == expected.to_lowercase(),
        AnswerRule::Contains(required) => {
            if required.is_empty() {
                return false;
            }
            let answer = answer.to_lowercase();
            required
                .iter()
                .all(|part| answer.contains(&part.to_lowercase()))
        }
        AnswerRule::Choice {
            choices,
            correct_index,
        } => choices
            .get(*correct_index)
            .is_some_and(|correct| correct == answer),
        AnswerRule::Malformed(reason) => {
            tracing::warn!(prompt = %level.prompt, %reason, "answer submitted to malformed level");
            false
        }
    }
}
