use std::collections::BTreeMap;

use super::{
    feature::{Category, Feature, FeatureSet},
    table::{ConditionalTable, FreqTable},
};

/// Log-score of one candidate label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub label: usize,
    pub value: f64,
}

/// Label priors and per-category label/feature counts.
///
/// Label ids index the rows of every joint table, and `labels` iterates
/// them in first-observed order.
#[derive(Debug, Default)]
pub struct EvidenceTables {
    pub(crate) labels: FreqTable<usize>,
    pub(crate) joint: BTreeMap<Category, ConditionalTable<Feature>>,
    pub(crate) num_instances: u64,
}

impl EvidenceTables {
    pub(crate) fn observe(&mut self, label: usize, features: &FeatureSet) {
        self.labels.increment(label);
        self.num_instances += 1;
        for (category, feature) in features.iter() {
            self.joint.entry(category).or_default().increment(label, feature.clone());
        }
    }

    pub fn label_counts(&self) -> &FreqTable<usize> {
        &self.labels
    }

    pub fn joint(&self, category: Category) -> Option<&ConditionalTable<Feature>> {
        self.joint.get(&category)
    }

    pub fn num_instances(&self) -> u64 {
        self.num_instances
    }

    /// Count of `feature` seen with `label` in `category`, zero if never seen.
    pub fn joint_count(&self, category: Category, label: usize, feature: &Feature) -> u64 {
        self.joint.get(&category).map_or(0, |t| t.get(label, feature))
    }

    /// ln P(label) + sum of ln P(feature | label) over the features with a
    /// positive joint count. Unseen combinations add nothing.
    pub fn score(&self, features: &FeatureSet) -> Vec<Score> {
        let n = self.num_instances as f64;
        self.labels
            .iter()
            .map(|(&label, count)| {
                let count = count as f64;
                let mut value = (count / n).ln();
                for (category, feature) in features.iter() {
                    let joint = self.joint_count(category, label, feature);
                    if joint > 0 {
                        value += (joint as f64 / count).ln();
                    }
                }
                Score { label, value }
            })
            .collect()
    }
}
