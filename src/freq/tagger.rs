use crate::{
    config::TaggerConfig,
    quark::{Quark, StringTable},
};

use super::{
    model::{Model, TableDump},
    scorer::Score,
    selector::{apply_overrides, Override, SelectionRule, DEFAULT_OVERRIDES},
    table::{ConditionalTable, FreqTable},
};

/// Word/tag, tag/previous-tag and tag counts from a tagged corpus.
#[derive(Debug, Default)]
pub struct TagModel {
    pub(crate) words: Quark,
    pub(crate) tags: Quark,
    pub(crate) tag_counts: FreqTable<usize>,
    /// word id -> tag id -> count
    pub(crate) emissions: ConditionalTable<usize>,
    /// previous tag id -> tag id -> count
    pub(crate) transitions: ConditionalTable<usize>,
}

impl TagModel {
    pub fn tag_count(&self, tag: &str) -> u64 {
        self.tags.to_id(tag).map_or(0, |t| self.tag_counts.get(&t))
    }

    pub fn emission_count(&self, word: &str, tag: &str) -> u64 {
        match (self.words.to_id(word), self.tags.to_id(tag)) {
            (Some(w), Some(t)) => self.emissions.get(w, &t),
            _ => 0,
        }
    }

    pub fn transition_count(&self, previous: &str, tag: &str) -> u64 {
        match (self.tags.to_id(previous), self.tags.to_id(tag)) {
            (Some(p), Some(t)) => self.transitions.get(p, &t),
            _ => 0,
        }
    }

    pub fn tagger(&self, config: &TaggerConfig) -> GreedyTagger<'_> {
        GreedyTagger::new(self, config)
    }

    fn tag_str(&self, id: usize) -> &str {
        self.tags.to_str(id).unwrap_or_default()
    }

    fn word_str(&self, id: usize) -> &str {
        self.words.to_str(id).unwrap_or_default()
    }
}

impl Model for TagModel {
    fn labels(&self) -> &Quark {
        &self.tags
    }

    fn tables(&self) -> Vec<TableDump> {
        let mut tags = TableDump::new("Tag frequency");
        for (&t, n) in self.tag_counts.iter() {
            tags.push(self.tag_str(t), n);
        }
        let mut emissions = TableDump::new("Word/tag frequency");
        for (w, row) in self.emissions.rows() {
            for (&t, n) in row.iter() {
                emissions.push(format!("{}/{}", self.word_str(w), self.tag_str(t)), n);
            }
        }
        let mut transitions = TableDump::new("Tag-1/tag frequency");
        for (p, row) in self.transitions.rows() {
            for (&t, n) in row.iter() {
                transitions.push(format!("{} {}", self.tag_str(p), self.tag_str(t)), n);
            }
        }
        vec![tags, emissions, transitions]
    }
}

/// How a tag was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The word was not in the training vocabulary.
    Unseen,
    /// Highest emission x transition score.
    Scored,
    /// No tag of the word was seen after the previous tag; emission only.
    EmissionOnly,
    /// A surface-form rule replaced the scored tag.
    Override,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
    pub decision: Decision,
}

impl std::fmt::Display for TaggedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.word, self.tag)
    }
}

pub trait Tagger {
    /// Assigns one tag per word, in order.
    fn tag<S: AsRef<str>>(&self, words: &[S]) -> Vec<String>;
}

/// Left-to-right decoder that feeds each assigned tag into the next
/// word's transition term.
pub struct GreedyTagger<'a> {
    model: &'a TagModel,
    fallback: String,
    overrides: Vec<Override>,
}

impl<'a> GreedyTagger<'a> {
    pub fn new(model: &'a TagModel, config: &TaggerConfig) -> Self {
        let overrides = if config.overrides { DEFAULT_OVERRIDES.to_vec() } else { Vec::new() };
        Self { model, fallback: config.fallback_tag.clone(), overrides }
    }

    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> Vec<TaggedWord> {
        let mut out: Vec<TaggedWord> = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_ref();
            let previous = out.last().map(|t| t.tag.as_str());
            let tagged = self.step(word, previous);
            log::trace!("{tagged} ({:?})", tagged.decision);
            out.push(tagged);
        }
        out
    }

    fn step(&self, word: &str, previous: Option<&str>) -> TaggedWord {
        let Some(w) = self.model.words.to_id(word) else {
            return TaggedWord { word: word.to_string(), tag: self.fallback.clone(), decision: Decision::Unseen };
        };
        let (best, decision) = match previous {
            None => (self.best_emission(w), Decision::Scored),
            Some(prev) => match self.best_transition(w, prev) {
                Some(best) => (Some(best), Decision::Scored),
                None => {
                    log::debug!("no tag of {word:?} follows {prev:?}, scoring by emission only");
                    (self.best_emission(w), Decision::EmissionOnly)
                }
            },
        };
        let scored = best.map_or(self.fallback.as_str(), |s| self.model.tag_str(s.label));
        let tag = apply_overrides(&self.overrides, word, previous, scored);
        let decision = if tag != scored { Decision::Override } else { decision };
        TaggedWord { word: word.to_string(), tag: tag.to_string(), decision }
    }

    /// count(word, tag) / count(tag)
    fn emission(&self, t: usize, count: u64) -> f64 {
        count as f64 / self.model.tag_counts.get(&t) as f64
    }

    fn best_emission(&self, w: usize) -> Option<Score> {
        let row = self.model.emissions.row(w)?;
        SelectionRule::Maximum.select(
            row.iter().map(|(&t, n)| Score { label: t, value: self.emission(t, n) }),
        )
    }

    /// Only tags observed right after `previous` are candidates.
    fn best_transition(&self, w: usize, previous: &str) -> Option<Score> {
        let p = self.model.tags.to_id(previous)?;
        let following = self.model.transitions.row(p)?;
        let prev_count = self.model.tag_counts.get(&p) as f64;
        let row = self.model.emissions.row(w)?;
        SelectionRule::Maximum.select(row.iter().filter_map(|(&t, n)| {
            let trans = following.get(&t);
            (trans > 0).then(|| Score {
                label: t,
                value: self.emission(t, n) * (trans as f64 / prev_count),
            })
        }))
    }
}

impl<'a> Tagger for GreedyTagger<'a> {
    fn tag<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        self.decode(words).into_iter().map(|t| t.tag).collect()
    }
}
