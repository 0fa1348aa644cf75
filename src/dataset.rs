//! Readers for the tagged-token and instance-block corpus formats.

use std::{fs, path::Path, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{error::Error, freq::feature::Context, text, Result};

// Stands in for an escaped `\/` while a token is split on its `/` delimiter.
const SLASH_PLACEHOLDER: &str = "\u{e000}";
const ESCAPED_SLASH: &str = r"\/";

static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+</instance>\s+").expect("valid regex"));
static WSD_INSTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\s*<instance\s*id="([^"]+)">(.*)\s*<context>\s*.*<s>(.*)\s*<head>.*</head>\s*([^<]*)<"#)
        .expect("valid regex")
});
static SENTIMENT_INSTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\s*<instance\s*id="([^"]+)">(.*)\s*<context>\s*(.*)\s*</context>\s*\z"#)
        .expect("valid regex")
});
static SENSE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"senseid="([^"]+)"/>"#).expect("valid regex"));
static SENTIMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"sentiment="([^"]+)"/>"#).expect("valid regex"));
static ANSWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<answer\s+instance="([^"]+)"\s+(?:senseid|sentiment)="([^"]+)"\s*/>"#).expect("valid regex")
});

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn strip_brackets(text: &str) -> String {
    text.replace(['[', ']'], "")
}

/// Whitespace-separated tokens with `[` and `]` removed.
pub fn read_tokens(text: &str) -> Vec<String> {
    strip_brackets(text).split_whitespace().map(str::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl FromStr for TaggedToken {
    type Err = ();

    /// Splits `word/tag`, keeping escaped slashes in the word and only the
    /// first reading of an ambiguous `A|B` tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let protected = s.replace(ESCAPED_SLASH, SLASH_PLACEHOLDER);
        let mut parts = protected.split('/');
        let word = parts.next().ok_or(())?;
        let tag = parts.next().and_then(|t| t.split('|').next()).ok_or(())?;
        if tag.is_empty() {
            return Err(());
        }
        Ok(Self { word: word.replace(SLASH_PLACEHOLDER, ESCAPED_SLASH), tag: tag.to_string() })
    }
}

/// Parses every `word/tag` token of a tagged corpus, skipping the ones that
/// carry no tag.
pub fn read_tagged_tokens(text: &str) -> Vec<TaggedToken> {
    let mut out = Vec::new();
    for token in read_tokens(text) {
        match token.parse() {
            Ok(t) => out.push(t),
            Err(()) => log::warn!("invalid token: {token}"),
        }
    }
    out
}

/// Which instance-block dialect a corpus uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceFormat {
    /// Collocation context around a `<head>` word, labeled by `senseid`.
    Wsd,
    /// Raw message context, labeled by `sentiment`.
    Sentiment,
}

impl InstanceFormat {
    pub fn label_attribute(&self) -> &'static str {
        match self {
            InstanceFormat::Wsd => "senseid",
            InstanceFormat::Sentiment => "sentiment",
        }
    }

    /// Formats one answer line.
    pub fn answer(&self, id: &str, label: &str) -> String {
        format!(r#"<answer instance="{id}" {}="{label}"/>"#, self.label_attribute())
    }

    fn parse_block(&self, block: &str) -> Option<InstanceRecord> {
        match self {
            InstanceFormat::Wsd => {
                let caps = WSD_INSTANCE.captures(block)?;
                Some(InstanceRecord {
                    id: caps[1].to_string(),
                    label: SENSE_ID.captures(&caps[2]).map(|c| c[1].to_string()),
                    context: Context::Collocation {
                        left: text::context_words(&caps[3]),
                        right: text::context_words(&caps[4]),
                    },
                })
            }
            InstanceFormat::Sentiment => {
                let caps = SENTIMENT_INSTANCE.captures(block)?;
                Some(InstanceRecord {
                    id: caps[1].to_string(),
                    label: SENTIMENT.captures(&caps[2]).map(|c| c[1].to_string()),
                    context: Context::Message(caps[3].to_string()),
                })
            }
        }
    }
}

/// One `<instance>` block: training data carries a label, test data doesn't.
#[derive(Debug, Clone)]
pub struct InstanceRecord {
    pub id: String,
    pub label: Option<String>,
    pub context: Context,
}

/// Splits a corpus into instance blocks and parses each one. Blocks that
/// don't have the instance structure, such as the corpus header and footer
/// fragments, are skipped.
pub fn read_instances(text: &str, format: InstanceFormat) -> Vec<InstanceRecord> {
    let mut out = Vec::new();
    for (i, block) in BLOCK_SEPARATOR.split(text).enumerate() {
        match format.parse_block(block) {
            Some(record) => out.push(record),
            None => log::debug!("skip block #{i}: not an instance"),
        }
    }
    log::info!("read {} {:?} instances", out.len(), format);
    out
}

/// Reads `(instance id, label)` pairs from answer lines.
pub fn read_answers(text: &str) -> Vec<(String, String)> {
    ANSWER
        .captures_iter(text)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}
