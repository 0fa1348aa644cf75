use crate::quark::{Quark, StringTable};

use super::{
    feature::{Context, FeatureExtractor, FeatureSet},
    model::{Model, TableDump},
    scorer::{EvidenceTables, Score},
    selector::SelectionRule,
};

/// Label prediction for one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Accumulated log-score of the winning label.
    pub score: f64,
    pub features: FeatureSet,
}

/// Frequency tables for one labeling task plus the extractor that feeds them.
#[derive(Debug)]
pub struct ClassifierModel {
    pub(crate) labels: Quark,
    pub(crate) tables: EvidenceTables,
    pub(crate) extractor: FeatureExtractor,
}

impl ClassifierModel {
    pub fn evidence(&self) -> &EvidenceTables {
        &self.tables
    }

    /// Per-label log-scores for `context`, in label order.
    pub fn scores(&self, context: &Context) -> (FeatureSet, Vec<Score>) {
        let features = self.extractor.extract(context);
        let scores = self.tables.score(&features);
        (features, scores)
    }

    /// Returns `None` only if the model has no labels, which training rules out.
    pub fn predict(&self, context: &Context, rule: SelectionRule) -> Option<Prediction> {
        let (features, scores) = self.scores(context);
        let best = rule.select(scores)?;
        let label = self.labels.to_str(best.label)?.to_string();
        Some(Prediction { label, score: best.value, features })
    }
}

impl Model for ClassifierModel {
    fn labels(&self) -> &Quark {
        &self.labels
    }

    fn tables(&self) -> Vec<TableDump> {
        let label_str = |id: usize| self.labels.to_str(id).unwrap_or_default();
        let mut dumps = Vec::with_capacity(self.extractor.categories().len() + 1);
        let mut priors = TableDump::new("Label frequency");
        for (&l, n) in self.tables.label_counts().iter() {
            priors.push(label_str(l), n);
        }
        dumps.push(priors);
        for &category in self.extractor.categories() {
            let mut dump = TableDump::new(format!("{category} frequency"));
            if let Some(table) = self.tables.joint(category) {
                for (l, row) in table.rows() {
                    for (feature, n) in row.iter() {
                        dump.push(format!("{}\t{}", label_str(l), feature), n);
                    }
                }
            }
            dumps.push(dump);
        }
        dumps
    }
}
