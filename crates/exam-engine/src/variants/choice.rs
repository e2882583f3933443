//! Plain multiple-choice extraction: 第N題 anchors followed by letter-marked
//! option spans.

use shared_types::{QuestionKind, QuestionRecord};

use crate::extract::{anchor, option};

/// A question's text runs from its anchor to the next anchor or document end;
/// options are delimited by (A)-(D) markers within that region.
pub fn extract(text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    let anchors = anchor::scan_anchors(text);
    let mut records = Vec::new();

    for (number, region) in anchor::regions(text, &anchors) {
        let split = option::split_letter_options(region);
        if let Some(record) = super::build_record(
            number,
            split.stem,
            split.options,
            QuestionKind::Choice,
            None,
            warnings,
        ) {
            records.push(record);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn five_question_text() -> String {
        (1..=5)
            .map(|n| {
                format!(
                    "第{}題 下列有關地方自治之敘述，何者正確？\
                     (A)選項甲 (B)選項乙 (C)選項丙 (D)選項丁\n",
                    n
                )
            })
            .collect()
    }

    #[test]
    fn test_extracts_five_clean_questions() {
        let mut warnings = Vec::new();
        let records = extract(&five_question_text(), &mut warnings);
        assert_eq!(records.len(), 5);
        assert!(warnings.is_empty());
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.number, (i + 1) as u32);
            assert_eq!(record.options.len(), 4);
            assert_eq!(record.kind, QuestionKind::Choice);
        }
        assert_eq!(records[0].options[0], "選項甲");
    }

    #[test]
    fn test_question_text_stops_at_next_anchor() {
        let text = "第1題 甲問題？(A)一 (B)二 第2題 乙問題？(A)三 (B)四";
        let mut warnings = Vec::new();
        let records = extract(text, &mut warnings);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].options, vec!["一", "二"]);
        assert!(!records[0].prompt.contains("乙問題"));
    }

    #[test]
    fn test_span_without_options_is_dropped_with_warning() {
        let text = "第1題 正常題？(A)一 (B)二\n第2題 只有題幹沒有選項的殘缺內容\n第3題 又正常？(A)三 (B)四";
        let mut warnings = Vec::new();
        let records = extract(text, &mut warnings);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records.iter().map(|r| r.number).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let mut warnings = Vec::new();
        assert!(extract("", &mut warnings).is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_never_panics_on_malformed_input() {
        let mut warnings = Vec::new();
        let _ = extract("第題 (A( 殘缺 （D）", &mut warnings);
        let _ = extract("第999題", &mut warnings);
    }
}
