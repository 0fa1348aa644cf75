use serde::Serialize;

use crate::quark::Quark;

/// Contents of one frequency table, rendered for the diagnostic log.
#[derive(Debug, Clone, Serialize)]
pub struct TableDump {
    pub name: String,
    pub entries: Vec<(String, u64)>,
}

impl TableDump {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new() }
    }

    pub fn push(&mut self, key: impl Into<String>, count: u64) {
        self.entries.push((key.into(), count));
    }
}

/// A trained set of frequency tables.
pub trait Model {
    /// The label universe, in first-observed order.
    fn labels(&self) -> &Quark;
    /// Every table the model holds, in a fixed order.
    fn tables(&self) -> Vec<TableDump>;
}
