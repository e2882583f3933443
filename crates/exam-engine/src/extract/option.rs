//! Option span splitting for a single question region.

use crate::patterns::{char_prefix, normalize_span, EMBEDDED_OPTION_GLYPHS, OPTION_MARKER};

/// A question region split into stem and option spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSplit {
    pub stem: String,
    pub options: Vec<String>,
}

/// Split on parenthesized letter markers, ASCII or fullwidth. The stem is
/// everything before the first marker; at most 4 options are kept.
pub fn split_letter_options(region: &str) -> OptionSplit {
    let marks: Vec<(usize, usize)> = OPTION_MARKER
        .find_iter(region)
        .map(|m| (m.start(), m.end()))
        .collect();
    split_at_marks(region, &marks)
}

/// Split on the private-use-area glyphs some exam PDFs embed instead of
/// letter markers. Glyphs are resolved through the shared table only.
pub fn split_glyph_options(region: &str) -> OptionSplit {
    let marks: Vec<(usize, usize)> = region
        .char_indices()
        .filter(|(_, c)| EMBEDDED_OPTION_GLYPHS.iter().any(|(glyph, _)| glyph == c))
        .map(|(idx, c)| (idx, idx + c.len_utf8()))
        .collect();
    split_at_marks(region, &marks)
}

/// Whether a letter marker appears within the first `window_chars` chars.
pub fn has_letter_marker_within(region: &str, window_chars: usize) -> bool {
    OPTION_MARKER.is_match(char_prefix(region, window_chars))
}

fn split_at_marks(region: &str, marks: &[(usize, usize)]) -> OptionSplit {
    let stem_end = marks.first().map(|&(s, _)| s).unwrap_or(region.len());
    let stem = normalize_span(&region[..stem_end]);

    let mut options = Vec::new();
    for (i, &(_, body_start)) in marks.iter().enumerate() {
        if options.len() == 4 {
            break;
        }
        let body_end = marks.get(i + 1).map(|&(s, _)| s).unwrap_or(region.len());
        options.push(normalize_span(&region[body_start..body_end]));
    }

    OptionSplit { stem, options }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_four_letter_options() {
        let region = "下列何者為直轄市？(A)基隆市 (B)新竹市 (C)台中市 (D)嘉義市";
        let split = split_letter_options(region);
        assert_eq!(split.stem, "下列何者為直轄市？");
        assert_eq!(split.options, vec!["基隆市", "新竹市", "台中市", "嘉義市"]);
    }

    #[test]
    fn test_split_fullwidth_markers() {
        let region = "何者正確？（Ａ）甲（Ｂ）乙";
        let split = split_letter_options(region);
        assert_eq!(split.options, vec!["甲", "乙"]);
    }

    #[test]
    fn test_no_markers_yields_whole_stem() {
        let split = split_letter_options("試述我國地方自治之演進。");
        assert!(split.options.is_empty());
        assert_eq!(split.stem, "試述我國地方自治之演進。");
    }

    #[test]
    fn test_split_glyph_options() {
        let region = format!(
            "下列何者正確？{}甲說{}乙說{}丙說{}丁說",
            '\u{E18C}', '\u{E18D}', '\u{E18E}', '\u{E18F}'
        );
        let split = split_glyph_options(&region);
        assert_eq!(split.stem, "下列何者正確？");
        assert_eq!(split.options, vec!["甲說", "乙說", "丙說", "丁說"]);
    }

    #[test]
    fn test_extra_markers_capped_at_four() {
        let region = "題目 (A)1 (B)2 (C)3 (D)4 (A)5";
        let split = split_letter_options(region);
        assert_eq!(split.options.len(), 4);
    }

    #[test]
    fn test_marker_window_lookahead() {
        let region = "短題幹 (A)甲 (B)乙";
        assert!(has_letter_marker_within(region, 20));
        assert!(!has_letter_marker_within("很長的申論題題幹沒有選項", 10));
    }
}
