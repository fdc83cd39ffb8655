//! Chinese-to-pinyin-initials transliteration.
//!
//! Turns full-width-comma separated Chinese field names into upper-case
//! pinyin initial abbreviations, e.g. `用户，密码` becomes `YH,MM`. Useful
//! for deriving column identifiers from a Chinese schema description.

use pinyin::ToPinyin;
use schemars::JsonSchema;
use serde::Deserialize;

/// Input for the get_chinese_initials tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InitialsInput {
    /// Chinese field names separated by full-width commas (，)
    pub text: String,
}

/// Convert each full-width-comma separated word to its pinyin initials and
/// join the results with ASCII commas.
pub fn chinese_initials(text: &str) -> String {
    text.split('，')
        .map(word_initials)
        .collect::<Vec<_>>()
        .join(",")
}

/// One upper-case initial per Han character; other characters pass through
/// upper-cased.
fn word_initials(word: &str) -> String {
    let mut initials = String::new();
    for (ch, py) in word.chars().zip(word.to_pinyin()) {
        match py {
            Some(p) => initials.extend(p.first_letter().chars().flat_map(char::to_uppercase)),
            None => initials.extend(ch.to_uppercase()),
        }
    }
    initials
}
