use crate::{
    error::Error,
    quark::{StringTable, TextVectorizer},
    Result,
};

use super::{
    classifier::ClassifierModel,
    feature::{Context, FeatureExtractor},
    model::Model,
    scorer::EvidenceTables,
    tagger::TagModel,
};

/// Accumulates counts from labeled examples, then freezes them into a model.
pub trait Trainer {
    type Model: Model;

    fn num_examples(&self) -> usize;

    /// Consumes the trainer. Fails if no example was added.
    fn train(self) -> Result<Self::Model>;
}

/// Counts word/tag pairs and tag bigrams over one continuous token stream.
#[derive(Debug, Default)]
pub struct TagTrainer {
    model: TagModel,
    previous: Option<usize>,
    num_tokens: usize,
}

impl TagTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, word: &str, tag: &str) {
        let m = &mut self.model;
        let w = m.words.find_or_insert(word);
        let t = m.tags.find_or_insert(tag);
        m.tag_counts.increment(t);
        m.emissions.increment(w, t);
        if let Some(p) = self.previous {
            m.transitions.increment(p, t);
        }
        self.previous = Some(t);
        self.num_tokens += 1;
    }
}

impl Trainer for TagTrainer {
    type Model = TagModel;

    fn num_examples(&self) -> usize {
        self.num_tokens
    }

    fn train(self) -> Result<TagModel> {
        if self.num_tokens == 0 {
            return Err(Error::EmptyTrainingSet("word/tag tokens"));
        }
        let m = &self.model;
        log::info!(
            "trained tagger on {} tokens: {} words, {} tags, {} transitions",
            self.num_tokens,
            m.words.len(),
            m.tags.len(),
            m.transitions.len()
        );
        Ok(self.model)
    }
}

/// Counts labels and label/feature pairs for one instance-labeling task.
#[derive(Debug)]
pub struct ClassifierTrainer {
    model: ClassifierModel,
}

impl ClassifierTrainer {
    pub fn new(extractor: FeatureExtractor) -> Self {
        Self {
            model: ClassifierModel {
                labels: Default::default(),
                tables: EvidenceTables::default(),
                extractor,
            },
        }
    }

    pub fn append(&mut self, label: &str, context: &Context) {
        let m = &mut self.model;
        let features = m.extractor.extract(context);
        let l = m.labels.find_or_insert(label);
        m.tables.observe(l, &features);
    }
}

impl Trainer for ClassifierTrainer {
    type Model = ClassifierModel;

    fn num_examples(&self) -> usize {
        self.model.tables.num_instances() as usize
    }

    fn train(self) -> Result<ClassifierModel> {
        if self.model.labels.is_empty() {
            return Err(Error::EmptyTrainingSet("instances"));
        }
        log::info!(
            "trained classifier on {} instances with {} labels",
            self.model.tables.num_instances(),
            self.model.labels.len()
        );
        Ok(self.model)
    }
}
