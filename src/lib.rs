//! Count-based labeling: part-of-speech tagging, word-sense disambiguation
//! and sentiment classification from frequency tables built in one pass.

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod freq;
pub mod quark;
pub mod report;
pub mod task;
pub mod text;

pub use config::Config;
pub use dataset::{InstanceFormat, InstanceRecord, TaggedToken};
pub use error::{Error, Result};
pub use evaluation::{Estimation, Evaluation};
pub use freq::{
    classifier::{ClassifierModel, Prediction},
    feature::{Category, Context, Feature, FeatureExtractor, FeatureSet},
    model::Model,
    selector::SelectionRule,
    tagger::{GreedyTagger, TagModel, Tagger},
    trainer::{ClassifierTrainer, TagTrainer, Trainer},
};
pub use quark::{Quark, StringTable};
pub use report::{DiagnosticLog, LogFormat};
