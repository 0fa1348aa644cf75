//! Train-once, label-once runs for the three labeling tasks.

use std::collections::HashMap;

use crate::{
    config::{ClassifierConfig, TaggerConfig},
    dataset::{self, InstanceFormat, InstanceRecord, TaggedToken},
    freq::{
        classifier::{ClassifierModel, Prediction},
        feature::FeatureExtractor,
        selector::SelectionRule,
        tagger::{TagModel, TaggedWord},
        trainer::{ClassifierTrainer, TagTrainer, Trainer},
    },
    report::{DiagnosticLog, LogRecord},
    Result,
};

pub fn train_tagger(tokens: &[TaggedToken]) -> Result<TagModel> {
    let mut trainer = TagTrainer::new();
    for t in tokens {
        trainer.append(&t.word, &t.tag);
    }
    trainer.train()
}

pub struct TaggingRun {
    pub model: TagModel,
    pub tagged: Vec<TaggedWord>,
}

impl TaggingRun {
    /// One `word/tag` per line.
    pub fn output(&self) -> String {
        self.tagged.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }

    pub fn log(&self) -> DiagnosticLog {
        let mut log = DiagnosticLog::new(&self.model);
        for t in &self.tagged {
            log.record(LogRecord::new(&t.word, &t.tag));
        }
        log
    }
}

/// Trains on a tagged corpus and tags the words of a test corpus.
pub fn tag_corpus(train: &str, test: &str, config: &TaggerConfig) -> Result<TaggingRun> {
    let tokens = dataset::read_tagged_tokens(train);
    log::info!("read {} training tokens", tokens.len());
    let model = train_tagger(&tokens)?;
    let words = dataset::read_tokens(test);
    log::info!("tagging {} words", words.len());
    let tagged = model.tagger(config).decode(&words);
    Ok(TaggingRun { model, tagged })
}

pub fn extractor_for(format: InstanceFormat, config: &ClassifierConfig) -> FeatureExtractor {
    match format {
        InstanceFormat::Wsd => FeatureExtractor::collocations(config.window),
        InstanceFormat::Sentiment => FeatureExtractor::bag_of_words(),
    }
}

/// A later block with the same instance id replaces the earlier one but
/// keeps its position.
fn latest_by_id(records: &[InstanceRecord]) -> Vec<&InstanceRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<&InstanceRecord> = Vec::with_capacity(records.len());
    for r in records {
        match index.get(r.id.as_str()) {
            Some(&i) => {
                log::debug!("instance {} redefined, keeping the later block", r.id);
                out[i] = r;
            }
            None => {
                index.insert(&r.id, out.len());
                out.push(r);
            }
        }
    }
    out
}

/// Trains on the labeled records, one per instance id; unlabeled ones are
/// skipped.
pub fn train_classifier(records: &[InstanceRecord], extractor: FeatureExtractor) -> Result<ClassifierModel> {
    let mut trainer = ClassifierTrainer::new(extractor);
    for r in latest_by_id(records) {
        match &r.label {
            Some(label) => trainer.append(label, &r.context),
            None => log::warn!("training instance {} has no label", r.id),
        }
    }
    trainer.train()
}

#[derive(Debug, Clone)]
pub struct Answer {
    pub id: String,
    pub prediction: Prediction,
}

/// Labels each record independently, preserving input order.
pub fn classify(model: &ClassifierModel, records: &[InstanceRecord], rule: SelectionRule) -> Vec<Answer> {
    records
        .iter()
        .filter_map(|r| {
            let prediction = model.predict(&r.context, rule)?;
            log::debug!("{}: {} ({})", r.id, prediction.label, prediction.score);
            Some(Answer { id: r.id.clone(), prediction })
        })
        .collect()
}

pub struct ClassificationRun {
    pub format: InstanceFormat,
    pub model: ClassifierModel,
    pub answers: Vec<Answer>,
}

impl ClassificationRun {
    /// One answer line per test instance.
    pub fn output(&self) -> String {
        self.answers
            .iter()
            .map(|a| self.format.answer(&a.id, &a.prediction.label))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Sentiment predictions also log their score and bag of words.
    pub fn log(&self) -> DiagnosticLog {
        let mut log = DiagnosticLog::new(&self.model);
        for a in &self.answers {
            let record = LogRecord::new(&a.id, &a.prediction.label);
            let record = match self.format {
                InstanceFormat::Wsd => record,
                InstanceFormat::Sentiment => {
                    let features = a.prediction.features.iter().map(|(_, f)| f.to_string()).collect();
                    record.with_score(a.prediction.score, features)
                }
            };
            log.record(record);
        }
        log
    }
}

/// Trains on an instance corpus and labels the instances of a test corpus.
pub fn classify_corpus(
    train: &str,
    test: &str,
    format: InstanceFormat,
    config: &ClassifierConfig,
) -> Result<ClassificationRun> {
    let records = dataset::read_instances(train, format);
    let model = train_classifier(&records, extractor_for(format, config))?;
    let tests = dataset::read_instances(test, format);
    let answers = classify(&model, &tests, config.selection);
    log::info!("labeled {} instances by {} score", answers.len(), config.selection);
    Ok(ClassificationRun { format, model, answers })
}
