use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::scorer::Score;

/// Which end of the score range wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SelectionRule {
    /// Smallest accumulated log-score.
    #[default]
    #[serde(rename = "min")]
    #[value(name = "min")]
    Minimum,
    /// Largest accumulated log-score, i.e. the most probable label.
    #[serde(rename = "max")]
    #[value(name = "max")]
    Maximum,
}

impl SelectionRule {
    /// Picks the winning score. Only a strictly better score replaces the
    /// current best, so ties go to the earliest candidate.
    pub fn select<I>(&self, scores: I) -> Option<Score>
    where
        I: IntoIterator<Item = Score>,
    {
        scores.into_iter().fold(None, |best, s| match best {
            Some(b) if !self.beats(s.value, b.value) => Some(b),
            _ => Some(s),
        })
    }

    fn beats(&self, candidate: f64, best: f64) -> bool {
        match self {
            SelectionRule::Minimum => candidate < best,
            SelectionRule::Maximum => candidate > best,
        }
    }
}

impl Display for SelectionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionRule::Minimum => f.write_str("min"),
            SelectionRule::Maximum => f.write_str("max"),
        }
    }
}

/// Surface-form rule that replaces a statistically chosen tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    /// All-uppercase word not following sentence-final punctuation; plural
    /// only with a lowercase trailing "s".
    ProperNoun,
    /// The word itself is the tag.
    Literal(&'static str),
    /// Runs of `!`, `.` and `?`.
    SentenceFinal,
    /// Digit-initial words ending in "s", e.g. "757s".
    NumericPlural,
}

pub const SENTENCE_FINAL_TAG: &str = ".";
pub const PROPER_NOUN_TAG: &str = "NNP";
pub const PROPER_NOUN_PLURAL_TAG: &str = "NNPS";

/// Rules in application order; a later match replaces an earlier one.
pub const DEFAULT_OVERRIDES: [Override; 8] = [
    Override::ProperNoun,
    Override::Literal("''"),
    Override::Literal("#"),
    Override::Literal("$"),
    Override::Literal(","),
    Override::Literal(":"),
    Override::SentenceFinal,
    Override::NumericPlural,
];

impl Override {
    /// The replacement tag when `word` matches, given the previous tag.
    pub fn apply(&self, word: &str, previous: Option<&str>) -> Option<&'static str> {
        match *self {
            Override::ProperNoun => {
                if is_upper(word) && previous != Some(SENTENCE_FINAL_TAG) {
                    if word.ends_with('s') {
                        Some(PROPER_NOUN_PLURAL_TAG)
                    } else {
                        Some(PROPER_NOUN_TAG)
                    }
                } else {
                    None
                }
            }
            Override::Literal(tag) => (word == tag).then_some(tag),
            Override::SentenceFinal => (!word.is_empty() && word.chars().all(|c| matches!(c, '!' | '.' | '?')))
                .then_some(SENTENCE_FINAL_TAG),
            Override::NumericPlural => {
                let digit_initial = word.chars().next().is_some_and(char::is_numeric);
                (digit_initial && word.ends_with('s')).then_some(PROPER_NOUN_PLURAL_TAG)
            }
        }
    }
}

/// Runs every rule against `word`; the last matching rule decides.
pub fn apply_overrides<'a>(
    rules: &[Override],
    word: &str,
    previous: Option<&str>,
    chosen: &'a str,
) -> &'a str {
    match rules.iter().filter_map(|rule| rule.apply(word, previous)).last() {
        Some(tag) => tag,
        None => chosen,
    }
}

/// At least one cased character and no lowercase ones.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}
