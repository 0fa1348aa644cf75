//! Diagnostic log: model tables followed by every prediction made.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    error::Error,
    freq::model::{Model, TableDump},
    Result,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl LogRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), score: None, features: None }
    }

    pub fn with_score(mut self, score: f64, features: Vec<String>) -> Self {
        self.score = Some(score);
        self.features = Some(features);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct DiagnosticLog {
    tables: Vec<TableDump>,
    predictions: Vec<LogRecord>,
}

impl DiagnosticLog {
    pub fn new<M: Model>(model: &M) -> Self {
        Self { tables: model.tables(), predictions: Vec::new() }
    }

    pub fn record(&mut self, record: LogRecord) {
        self.predictions.push(record);
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn write_to<W: Write>(&self, w: &mut W, format: LogFormat) -> Result<()> {
        match format {
            LogFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, self)?;
                writeln!(w)?;
            }
            LogFormat::Text => self.write_text(w)?,
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "Training data information:")?;
        for table in &self.tables {
            writeln!(w)?;
            writeln!(w, "{}:", table.name)?;
            for (key, count) in &table.entries {
                writeln!(w, "{key}\t\t{count}")?;
            }
        }
        writeln!(w)?;
        writeln!(w, "Results for test data:")?;
        writeln!(w)?;
        let scored = self.predictions.iter().any(|r| r.score.is_some());
        if scored {
            writeln!(w, "Instance ID\t\tPrediction\tLog-Likelihood\tFeatures")?;
        } else {
            writeln!(w, "Instance ID\t\tPrediction")?;
        }
        for r in &self.predictions {
            write!(w, "{}\t\t{}", r.id, r.label)?;
            if let (Some(score), Some(features)) = (r.score, &r.features) {
                write!(w, "\t{score}\t{{{}}}", features.join(", "))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    pub fn save(&self, path: &Path, format: LogFormat) -> Result<()> {
        let f = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut w = BufWriter::new(f);
        self.write_to(&mut w, format)?;
        w.flush().map_err(|e| Error::io(path, e))?;
        log::info!("wrote {} predictions to log {}", self.predictions.len(), path.display());
        Ok(())
    }
}
