use std::collections::HashMap;

use serde::Serialize;

/// Read access to an interned string set.
pub trait StringTable {
    fn to_str(&self, id: usize) -> Option<&str>;
    fn to_id(&self, s: &str) -> Option<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, s: &str) -> bool {
        self.to_id(s).is_some()
    }
}

pub trait TextVectorizer {
    fn find_or_insert(&mut self, key: &str) -> usize;
}

/// Interns strings to dense ids assigned in first-observed order.
///
/// Label universes and vocabularies are quarks: ids double as the
/// iteration order, which keeps tie-breaking reproducible between runs.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Quark {
    v: Vec<String>,
    #[serde(skip)]
    m: HashMap<String, usize>,
}

impl StringTable for Quark {
    fn to_str(&self, id: usize) -> Option<&str> {
        self.v.get(id).map(|x| x.as_str())
    }

    fn to_id(&self, s: &str) -> Option<usize> {
        self.m.get(s).copied()
    }

    fn len(&self) -> usize {
        self.v.len()
    }
}

impl TextVectorizer for Quark {
    fn find_or_insert(&mut self, key: &str) -> usize {
        if let Some(&id) = self.m.get(key) {
            return id;
        }
        let id = self.v.len();
        self.m.insert(key.to_string(), id);
        self.v.push(key.to_string());
        id
    }
}

impl Quark {
    /// Iterates `(id, string)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.v.iter().map(String::as_str).enumerate()
    }
}
