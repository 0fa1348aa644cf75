use std::{collections::HashSet, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::text;

/// A feature slot. Each category is counted in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// -1W
    LeftWord,
    /// +1W
    RightWord,
    /// -2W, -1W
    LeftPair,
    /// -1W, +1W
    LeftRightPair,
    /// +1W, +2W
    RightPair,
    /// Any word within the +/-K window, unordered.
    Window,
    /// Any normalized token of a message.
    Bag,
}

impl Category {
    pub const COLLOCATIONS: [Category; 6] = [
        Category::LeftWord,
        Category::RightWord,
        Category::LeftPair,
        Category::LeftRightPair,
        Category::RightPair,
        Category::Window,
    ];

    pub const BAG_OF_WORDS: [Category; 1] = [Category::Bag];

    pub fn name(&self) -> &'static str {
        match self {
            Category::LeftWord => "-1W",
            Category::RightWord => "+1W",
            Category::LeftPair => "-2W, -1W",
            Category::LeftRightPair => "-1W, +1W",
            Category::RightPair => "+1W, +2W",
            Category::Window => "+/-K W",
            Category::Bag => "bag-of-words",
        }
    }

    /// Window and bag categories hold a set of values; the rest hold at most one.
    pub fn is_set(&self) -> bool {
        matches!(self, Category::Window | Category::Bag)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Feature {
    Word(String),
    Pair(String, String),
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::Word(w) => write!(f, "{w}"),
            Feature::Pair(a, b) => write!(f, "({a}, {b})"),
        }
    }
}

/// The raw material features are drawn from.
#[derive(Debug, Clone)]
pub enum Context {
    /// Words left and right of an ambiguous head word, in reading order.
    Collocation { left: Vec<String>, right: Vec<String> },
    /// A free-text message.
    Message(String),
}

/// Features extracted from one instance, grouped by category.
///
/// Categories that had nothing to contribute are absent rather than empty
/// placeholders, and set categories never hold a value twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    features: Vec<(Category, Feature)>,
}

impl FeatureSet {
    fn push(&mut self, category: Category, feature: Feature) {
        self.features.push((category, feature));
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Feature)> {
        self.features.iter().map(|(c, f)| (*c, f))
    }

    pub fn get(&self, category: Category) -> impl Iterator<Item = &Feature> {
        self.iter().filter(move |(c, _)| *c == category).map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Turns a [`Context`] into a [`FeatureSet`] for the categories it declares.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    categories: Vec<Category>,
    window: usize,
}

impl FeatureExtractor {
    pub fn new(categories: &[Category], window: usize) -> Self {
        Self { categories: categories.to_vec(), window }
    }

    /// Yarowsky-style collocations around an ambiguous word.
    pub fn collocations(window: usize) -> Self {
        Self::new(&Category::COLLOCATIONS, window)
    }

    pub fn bag_of_words() -> Self {
        Self::new(&Category::BAG_OF_WORDS, 0)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn extract(&self, context: &Context) -> FeatureSet {
        let mut set = FeatureSet::default();
        for &category in &self.categories {
            match (category, context) {
                (Category::Bag, Context::Message(message)) => {
                    for token in text::message_bag(message) {
                        set.push(category, Feature::Word(token));
                    }
                }
                (Category::Bag, _) | (_, Context::Message(_)) => {
                    log::debug!("category {category} does not apply to this context");
                }
                (_, Context::Collocation { left, right }) => {
                    self.collocation(category, left, right, &mut set)
                }
            }
        }
        set
    }

    fn collocation(&self, category: Category, left: &[String], right: &[String], set: &mut FeatureSet) {
        let l1 = left.last();
        let r1 = right.first();
        let pair = |a: &String, b: &String| Feature::Pair(a.clone(), b.clone());
        let feature = match category {
            Category::LeftWord => l1.map(|w| Feature::Word(w.clone())),
            Category::RightWord => r1.map(|w| Feature::Word(w.clone())),
            Category::LeftPair if left.len() >= 2 => Some(pair(&left[left.len() - 2], &left[left.len() - 1])),
            Category::LeftRightPair => l1.zip(r1).map(|(a, b)| pair(a, b)),
            Category::RightPair if right.len() >= 2 => Some(pair(&right[0], &right[1])),
            Category::Window => {
                let mut seen = HashSet::new();
                let k = self.window;
                left[left.len().saturating_sub(k)..]
                    .iter()
                    .chain(right.iter().take(k))
                    .filter(|w| seen.insert(w.as_str()))
                    .for_each(|w| set.push(category, Feature::Word(w.clone())));
                None
            }
            _ => None,
        };
        if let Some(feature) = feature {
            set.push(category, feature);
        }
    }
}
