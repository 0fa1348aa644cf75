//! Token normalization shared by the corpus readers and the feature extractor.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

pub const URL_TOKEN: &str = "<url>";
pub const HAPPY_TOKEN: &str = "<happy>";
pub const SAD_TOKEN: &str = "<sad>";

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S*").expect("valid regex"));
// Messages are lowercased before emoticons are rewritten, so `:D` is matched as `:d`.
static HAPPY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":-?\)|:-?d|;-?\)").expect("valid regex"));
static SAD: Lazy<Regex> = Lazy::new(|| Regex::new(r">?:-?\(").expect("valid regex"));
static MESSAGE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\s0-9().,;:!?"]+"#).expect("valid regex"));
static CONTEXT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s.,!?0-9]+").expect("valid regex"));

/// English stop words removed from sentiment bags.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ourselves", "hers", "between", "yourself", "but", "again", "there", "about", "once",
        "during", "out", "very", "having", "with", "they", "own", "an", "be", "some", "for", "do",
        "its", "yours", "such", "into", "of", "most", "itself", "other", "off", "is", "s", "am",
        "or", "who", "as", "from", "him", "each", "the", "themselves", "until", "below", "are",
        "we", "these", "your", "his", "through", "don", "nor", "me", "were", "her", "more",
        "himself", "this", "down", "should", "our", "their", "while", "above", "both", "up", "to",
        "ours", "had", "she", "all", "no", "when", "at", "any", "before", "them", "same", "and",
        "been", "have", "in", "will", "on", "does", "yourselves", "then", "that", "because",
        "what", "over", "why", "so", "can", "did", "not", "now", "under", "he", "you", "herself",
        "has", "just", "where", "too", "only", "myself", "which", "those", "i", "after", "few",
        "whom", "t", "being", "if", "theirs", "my", "against", "a", "by", "doing", "it", "how",
        "further", "was", "here", "than",
    ]
    .into_iter()
    .collect()
});

/// Rewrites a raw message into the form its tokens are drawn from.
pub fn normalize_message(message: &str) -> String {
    let message = message.to_lowercase();
    let message = URL.replace_all(&message, URL_TOKEN);
    let message = message.replace('\'', "");
    let message = HAPPY.replace_all(&message, HAPPY_TOKEN);
    SAD.replace_all(&message, SAD_TOKEN).into_owned()
}

/// Distinct non-stop-word tokens of a message, in order of first appearance.
pub fn message_bag(message: &str) -> Vec<String> {
    let normalized = normalize_message(message);
    let mut seen = HashSet::new();
    MESSAGE_SEPARATOR
        .split(&normalized)
        .filter(|t| !t.is_empty() && !STOP_WORDS.contains(t))
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}

/// Splits a context span into words, dropping punctuation and digits.
pub fn context_words(span: &str) -> Vec<String> {
    CONTEXT_SEPARATOR
        .split(span)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_emoticons_become_placeholders() {
        let s = normalize_message("Love it :-) see https://t.co/abc >:( :D");
        assert_eq!(s, "love it <happy> see <url> <sad> <happy>");
    }

    #[test]
    fn apostrophes_are_stripped() {
        assert_eq!(normalize_message("Merkel's DON'T"), "merkels dont");
    }

    #[test]
    fn bag_drops_stop_words_and_duplicates() {
        let bag = message_bag("The iPad and the iPad, 2015 event!");
        assert_eq!(bag, vec!["ipad", "event"]);
    }

    #[test]
    fn bag_keeps_placeholders_whole() {
        let bag = message_bag("wow http://x.y/z ;)");
        assert_eq!(bag, vec!["wow", "<url>", "<happy>"]);
    }

    #[test]
    fn context_words_skip_numbers_and_punctuation() {
        let words = context_words(" In contrast, the economy grew 4.5% access ");
        assert_eq!(words, vec!["In", "contrast", "the", "economy", "grew", "%", "access"]);
    }
}
