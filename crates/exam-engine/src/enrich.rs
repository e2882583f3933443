//! Derived question metadata: category and difficulty.
//!
//! Both are lexical heuristics for downstream grouping and are never
//! authoritative.

use shared_types::Difficulty;

use crate::patterns::{CATEGORY_TABLE, NEGATION_KEYWORDS};

/// Lexical topic tag for a question. Group members with no stronger signal
/// default to reading comprehension, everything unmatched to "Other".
pub fn categorize(prompt: &str, is_group_member: bool) -> String {
    for (category, keywords) in CATEGORY_TABLE {
        if keywords.iter().any(|kw| prompt.contains(kw)) {
            return (*category).to_string();
        }
    }

    // Mostly-Latin prompts in a Chinese exam are English questions.
    let chars = prompt.chars().count();
    if chars > 0 {
        let ascii_alpha = prompt.chars().filter(|c| c.is_ascii_alphabetic()).count();
        if ascii_alpha * 2 > chars {
            return "English".to_string();
        }
    }

    if is_group_member {
        return "Reading Comprehension".to_string();
    }
    "Other".to_string()
}

/// Length/negation heuristic. Negated stems ("何者錯誤") and long prompts
/// skew hard; short direct prompts skew easy.
pub fn difficulty(prompt: &str, options: &[String]) -> Difficulty {
    let negated = NEGATION_KEYWORDS.iter().any(|kw| prompt.contains(kw));
    let total_len =
        prompt.chars().count() + options.iter().map(|o| o.chars().count()).sum::<usize>();

    if negated || total_len > 160 {
        Difficulty::Hard
    } else if total_len < 40 {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}
