use std::{borrow::Borrow, collections::HashMap, hash::Hash};

/// Counts keyed by `K`, created on first increment, zero when absent.
///
/// Entries keep their first-observed order so that iteration, and every
/// tie-break built on it, is the same from one run to the next.
#[derive(Debug, Clone)]
pub struct FreqTable<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
    total: u64,
}

impl<K> Default for FreqTable<K> {
    fn default() -> Self {
        Self { index: HashMap::new(), entries: Vec::new(), total: 0 }
    }
}

impl<K: Eq + Hash + Clone> FreqTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key` and returns its updated count.
    pub fn increment(&mut self, key: K) -> u64 {
        self.add(key, 1)
    }

    fn add(&mut self, key: K, n: u64) -> u64 {
        self.total += n;
        match self.index.get(&key) {
            Some(&i) => {
                self.entries[i].1 += n;
                self.entries[i].1
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
                n
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K> FreqTable<K> {
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// One [`FreqTable`] per condition, where conditions are dense ids handed
/// out by a [`crate::Quark`] (a word, a previous tag, a label).
#[derive(Debug, Clone)]
pub struct ConditionalTable<K> {
    rows: Vec<FreqTable<K>>,
}

impl<K> Default for ConditionalTable<K> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<K: Eq + Hash + Clone> ConditionalTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, cond: usize, key: K) -> u64 {
        if cond >= self.rows.len() {
            self.rows.resize_with(cond + 1, FreqTable::default);
        }
        self.rows[cond].increment(key)
    }

    pub fn get<Q>(&self, cond: usize, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.row(cond).map_or(0, |row| row.get(key))
    }
}

impl<K> ConditionalTable<K> {
    /// The row for `cond`, or `None` if the condition was never observed.
    pub fn row(&self, cond: usize) -> Option<&FreqTable<K>> {
        self.rows.get(cond).filter(|row| !row.is_empty())
    }

    /// Iterates the non-empty rows with their condition ids.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &FreqTable<K>)> {
        self.rows.iter().enumerate().filter(|(_, row)| !row.is_empty())
    }

    /// Number of `(condition, key)` entries across all rows.
    pub fn len(&self) -> usize {
        self.rows.iter().map(FreqTable::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
