//! Mixed essay/choice extraction: the document splits into macro-sections at
//! explicit part headers, and each section is delegated to the matching
//! simple variant.

use shared_types::QuestionRecord;

use super::{choice, essay};
use crate::patterns::{ESSAY_KEYWORDS, OPTION_MARKER, SECTION_HEADER};

/// Split at 甲、申論題 / 乙、測驗題 style headers and delegate each section by
/// its header label. Text before the first header, and documents with no
/// header at all, are delegated by local signal density instead.
pub fn extract(text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    let headers: Vec<(usize, usize, String)> = SECTION_HEADER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((whole.start(), whole.end(), caps[1].to_string()))
        })
        .collect();

    if headers.is_empty() {
        return delegate_by_density(text, warnings);
    }

    let mut records = Vec::new();

    let leading = &text[..headers[0].0];
    if !leading.trim().is_empty() {
        records.extend(delegate_by_density(leading, warnings));
    }

    for (i, (_, body_start, label)) in headers.iter().enumerate() {
        let body_end = headers.get(i + 1).map(|h| h.0).unwrap_or(text.len());
        let section = &text[*body_start..body_end];
        if label.contains("申論") || label.contains("問答") {
            records.extend(essay::extract(section, warnings));
        } else {
            records.extend(choice::extract(section, warnings));
        }
    }

    records
}

/// Option markers outnumbering essay keywords reads as a test section.
fn delegate_by_density(section: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    let markers = OPTION_MARKER.find_iter(section).count();
    let essay_hits: usize = ESSAY_KEYWORDS
        .iter()
        .map(|kw| section.matches(kw).count())
        .sum();

    if markers >= 2 && markers >= essay_hits {
        choice::extract(section, warnings)
    } else {
        essay::extract(section, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::QuestionKind;

    fn mixed_text() -> &'static str {
        "甲、申論題部分\n\
         第1題 試述公共政策制定之階段。（25分）\n\
         第2題 請說明官僚體系之特徵。（25分）\n\
         乙、測驗題部分\n\
         第3題 下列何者正確？(A)甲 (B)乙 (C)丙 (D)丁\n\
         第4題 下列何者錯誤？(A)甲 (B)乙 (C)丙 (D)丁\n"
    }

    #[test]
    fn test_sections_delegate_by_header() {
        let mut warnings = Vec::new();
        let records = extract(mixed_text(), &mut warnings);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].kind, QuestionKind::Essay);
        assert_eq!(records[1].kind, QuestionKind::Essay);
        assert_eq!(records[2].kind, QuestionKind::Choice);
        assert_eq!(records[3].kind, QuestionKind::Choice);
        assert_eq!(records[2].options.len(), 4);
    }

    #[test]
    fn test_headerless_choice_text_delegates_to_choice() {
        let text = "第1題 何者正確？(A)甲 (B)乙\n第2題 何者錯誤？(A)丙 (B)丁\n";
        let mut warnings = Vec::new();
        let records = extract(text, &mut warnings);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kind == QuestionKind::Choice));
    }

    #[test]
    fn test_headerless_essay_text_delegates_to_essay() {
        let text = "第1題 試述地方自治之意義。\n第2題 請說明中央與地方之權限劃分。\n";
        let mut warnings = Vec::new();
        let records = extract(text, &mut warnings);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kind == QuestionKind::Essay));
    }

    #[test]
    fn test_leading_text_before_first_header_is_kept() {
        let text = "第1題 何者正確？(A)甲 (B)乙\n\
                    乙、測驗題部分\n\
                    第2題 何者錯誤？(A)丙 (B)丁\n";
        let mut warnings = Vec::new();
        let records = extract(text, &mut warnings);
        assert_eq!(
            records.iter().map(|r| r.number).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}
