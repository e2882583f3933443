//! End-to-end pipeline scenarios.
//!
//! Run with: cargo test -p exam-engine --test pipeline

use std::collections::BTreeSet;

use exam_engine::{answers, ExtractionPipeline, FormatTag};
use pretty_assertions::assert_eq;
use shared_types::AnswerMap;

fn choice_exam(skip: Option<u32>) -> String {
    (1..=5)
        .filter(|n| Some(*n) != skip)
        .map(|n| {
            format!(
                "第{}題 下列有關我國地方制度之敘述，依現行法制，何者正確？\
                 (A)直轄市由中央直接管轄 (B)縣市合併需經公民投票 \
                 (C)鄉鎮市長一律官派產生 (D)村里長為無給之榮譽職\n",
                n
            )
        })
        .collect()
}

#[test]
fn clean_choice_exam_extracts_completely() {
    let outcome = ExtractionPipeline::new().run(&choice_exam(None), None);

    assert!(outcome.report.is_complete);
    assert_eq!(outcome.records.len(), 5);
    assert_eq!(outcome.classification.tag, FormatTag::Choice);
    for (i, record) in outcome.records.iter().enumerate() {
        assert_eq!(record.number, (i + 1) as u32);
        assert_eq!(record.options.len(), 4);
        assert!(!record.prompt.is_empty());
    }
    assert_eq!(
        outcome.report.registered,
        (1..=5).collect::<BTreeSet<u32>>()
    );
}

#[test]
fn single_question_document_reports_complete() {
    let text = "第1題 下列何者為直轄市？(A)基隆市 (B)新竹市 (C)台中市 (D)嘉義市\n";
    let outcome = ExtractionPipeline::new().run(text, None);

    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.report.missing.is_empty());
    assert!(outcome.report.duplicates.is_empty());
    assert!(outcome.report.is_complete);
}

#[test]
fn missing_anchor_reports_the_gap() {
    let outcome = ExtractionPipeline::new().run(&choice_exam(Some(3)), None);

    assert!(!outcome.report.is_complete);
    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.report.missing, BTreeSet::from([3]));
    assert!(outcome.report.duplicates.is_empty());
}

#[test]
fn question_group_shares_range_across_members() {
    let mut text = String::from(
        "請依下文回答第46題至第50題：\n\
         近年地方財政困窘，中央統籌分配稅款之分配方式迭有爭議，\
         本文回顧其制度沿革並分析修法方向。\n",
    );
    for n in 46..=50 {
        text.push_str(&format!(
            "第{}題 依本文所述，下列敘述何者正確？\
             (A)分配公式已數十年未修 (B)地方稅課收入充裕 \
             (C)中央從未補助地方 (D)統籌款與地方財政無關\n",
            n
        ));
    }

    let outcome = ExtractionPipeline::new().run(&text, None);
    assert_eq!(outcome.classification.tag, FormatTag::Comprehensive);
    assert_eq!(outcome.records.len(), 5);
    for record in &outcome.records {
        assert_eq!(record.group_range, Some((46, 50)));
        assert!(record.is_group_member());
    }
    // The shared passage is carried once, on the first member.
    assert!(outcome.records[0].prompt.contains("統籌分配稅款"));
}

#[test]
fn corrected_answers_supersede_original() {
    let original: AnswerMap = [(1, "A"), (2, "B")]
        .into_iter()
        .map(|(n, v)| (n, v.to_string()))
        .collect();
    let corrected: AnswerMap = [(2, "C")]
        .into_iter()
        .map(|(n, v)| (n, v.to_string()))
        .collect();

    let merged = answers::merge(&original, &corrected);
    let expected: AnswerMap = [(1, "A"), (2, "C")]
        .into_iter()
        .map(|(n, v)| (n, v.to_string()))
        .collect();
    assert_eq!(merged, expected);
}

#[test]
fn empty_document_degrades_without_error() {
    let outcome = ExtractionPipeline::new().run("", None);

    assert_eq!(outcome.classification.tag, FormatTag::AiAssisted);
    assert!(outcome.classification.confidence < 0.05);
    assert!(outcome.records.is_empty());
    assert!(!outcome.report.is_complete);
    assert!(outcome.report.registered.is_empty());
}

#[test]
fn mixed_exam_resolves_both_sections() {
    let text = "甲、申論題部分\n\
                第1題 試述我國地方自治監督之類型，並舉例說明其運作與界限。（25分）\n\
                第2題 請說明行政區劃調整之法制程序，並申論其利弊。（25分）\n\
                乙、測驗題部分\n\
                第3題 下列何者為地方自治團體？(A)省政府 (B)直轄市 (C)區公所 (D)派出所\n\
                第4題 地方制度法之主管機關為何？(A)內政部 (B)法務部 (C)財政部 (D)考選部\n";

    let outcome = ExtractionPipeline::new().run(text, None);
    assert!(outcome.report.is_complete);
    assert_eq!(outcome.records.len(), 4);
    assert!(outcome.records[0].options.is_empty());
    assert_eq!(outcome.records[2].options.len(), 4);
}

#[test]
fn embedded_glyph_exam_maps_to_letter_options() {
    let text: String = (1..=4)
        .map(|n| {
            format!(
                "第{}題 下列「　」內之用字，何者完全正確？\
                 {}僅甲案正確{}僅乙案正確{}兩案皆正確{}兩案皆錯誤\n",
                n, '\u{E18C}', '\u{E18D}', '\u{E18E}', '\u{E18F}'
            )
        })
        .collect();

    let outcome = ExtractionPipeline::new().run(&text, None);
    assert_eq!(outcome.classification.tag, FormatTag::Embedded);
    assert!(outcome.report.is_complete);
    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.records[0].options.len(), 4);
}

#[test]
fn answer_key_documents_flow_through_pipeline() {
    let outcome = ExtractionPipeline::new().run_with_answers(
        &choice_exam(None),
        Some("第1題 A\n第2題 B\n第3題 C\n第4題 D\n第5題 A\n"),
        Some("第3題 D\n"),
        Some(5),
    );

    assert!(outcome.report.is_complete);
    assert_eq!(outcome.answers[&3], "D");
    assert_eq!(outcome.answers[&1], "A");
    assert_eq!(outcome.answers.len(), 5);
    assert_eq!(outcome.answer_sources.corrected.len(), 1);
}

#[test]
fn expected_count_governs_missing_numbers() {
    let outcome = ExtractionPipeline::new().run(&choice_exam(None), Some(10));

    assert!(!outcome.report.is_complete);
    assert_eq!(
        outcome.report.missing,
        (6..=10).collect::<BTreeSet<u32>>()
    );
}
