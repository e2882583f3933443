//! Comprehensive (question-group) extraction: 請依下文回答第X題至第Y題
//! instructions introduce a shared passage followed by the member questions.

use regex::Regex;
use shared_types::{QuestionKind, QuestionRecord};

use super::choice;
use crate::extract::{anchor, option};
use crate::patterns::{normalize_span, parse_exam_number, GROUP_INSTRUCTION};

/// One parsed group instruction.
#[derive(Debug, Clone, Copy)]
struct GroupSpan {
    /// Byte span of the instruction phrase itself.
    start: usize,
    end: usize,
    first: u32,
    last: u32,
}

pub fn extract(text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    extract_with(text, &GROUP_INSTRUCTION, warnings)
}

/// Group extraction parameterized over the instruction pattern so the
/// AIAssisted variant can reuse it with its wider phrase superset.
pub(crate) fn extract_with(
    text: &str,
    instruction: &Regex,
    warnings: &mut Vec<String>,
) -> Vec<QuestionRecord> {
    let groups = scan_groups(text, instruction, warnings);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();

    // Questions ahead of the first instruction are plain choice questions.
    let head = &text[..groups[0].start];
    if !head.trim().is_empty() {
        records.extend(choice::extract(head, warnings));
    }

    for (i, group) in groups.iter().enumerate() {
        let region_end = groups.get(i + 1).map(|g| g.start).unwrap_or(text.len());
        let region = &text[group.end..region_end];

        let anchors = anchor::scan_anchors(region);
        // The shared passage sits between the instruction and the first
        // member anchor. It is captured once, on the first member's prompt;
        // siblings recover it through group_range.
        let passage = anchors
            .first()
            .map(|a| normalize_span(&region[..a.start]))
            .unwrap_or_default();

        let mut passage_attached = false;
        for (number, body) in anchor::regions(region, &anchors) {
            let split = option::split_letter_options(body);
            let in_range = number >= group.first && number <= group.last;
            let group_range = in_range.then_some((group.first, group.last));

            let mut prompt = split.stem;
            if in_range && !passage_attached && !passage.is_empty() {
                prompt = format!("{} {}", passage, prompt);
                passage_attached = true;
            }

            if let Some(record) = super::build_record(
                number,
                prompt,
                split.options,
                QuestionKind::Choice,
                group_range,
                warnings,
            ) {
                records.push(record);
            }
        }
    }

    records
}

fn scan_groups(text: &str, instruction: &Regex, warnings: &mut Vec<String>) -> Vec<GroupSpan> {
    let mut groups = Vec::new();
    for caps in instruction.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let first = parse_exam_number(&caps[1]);
        let last = parse_exam_number(&caps[2]);
        match (first, last) {
            (Some(first), Some(last)) if first <= last => groups.push(GroupSpan {
                start: whole.start(),
                end: whole.end(),
                first,
                last,
            }),
            _ => {
                tracing::warn!("skipped unparsable group instruction");
                warnings.push(format!(
                    "skipped group instruction with invalid range: {}",
                    whole.as_str()
                ));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_text() -> String {
        let mut text = String::from("請依下文回答第46題至第50題：\n這是一段五題共用的閱讀文章，描述某項制度之沿革。\n");
        for n in 46..=50 {
            text.push_str(&format!(
                "第{}題 文中敘述何者正確？(A)甲 (B)乙 (C)丙 (D)丁\n",
                n
            ));
        }
        text
    }

    #[test]
    fn test_group_members_carry_range() {
        let mut warnings = Vec::new();
        let records = extract(&group_text(), &mut warnings);
        assert_eq!(records.len(), 5);
        for record in &records {
            assert_eq!(record.group_range, Some((46, 50)));
            assert!(record.is_group_member());
            assert_eq!(record.options.len(), 4);
        }
    }

    #[test]
    fn test_passage_attached_once() {
        let mut warnings = Vec::new();
        let records = extract(&group_text(), &mut warnings);
        let with_passage = records
            .iter()
            .filter(|r| r.prompt.contains("閱讀文章"))
            .count();
        assert_eq!(with_passage, 1);
        assert!(records[0].prompt.contains("閱讀文章"));
    }

    #[test]
    fn test_plain_questions_before_group_kept() {
        let text = format!(
            "第45題 無關的單題？(A)甲 (B)乙\n{}",
            group_text()
        );
        let mut warnings = Vec::new();
        let records = extract(&text, &mut warnings);
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].number, 45);
        assert!(records[0].group_range.is_none());
    }

    #[test]
    fn test_no_instruction_yields_empty() {
        let mut warnings = Vec::new();
        let records = extract("第1題 單題？(A)甲 (B)乙", &mut warnings);
        assert!(records.is_empty());
    }

    #[test]
    fn test_inverted_range_is_skipped_with_warning() {
        let text = "請依下文回答第9題至第5題：文章。\n第9題 何者正確？(A)甲 (B)乙";
        let mut warnings = Vec::new();
        let records = extract(text, &mut warnings);
        assert!(records.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_member_outside_range_has_no_group() {
        let mut text = group_text();
        text.push_str("第51題 範圍外的單題？(A)甲 (B)乙\n");
        let mut warnings = Vec::new();
        let records = extract(&text, &mut warnings);
        let last = records.iter().find(|r| r.number == 51).unwrap();
        assert!(last.group_range.is_none());
    }
}
