use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    iter::zip,
};

use crate::{error::Error, Result};

/// Label-wise performance values.
#[derive(Debug, Default, Clone)]
struct LabelMeasure {
    /// Number of correct predictions.
    num_correct: usize,
    /// Number of occurrences of the label in the gold-standard data.
    num_observation: usize,
    /// Number of predictions.
    num_prediction: usize,
    precision: f64,
    recall: f64,
    fmeasure: f64,
}

/// Accuracy, per-label scores and a confusion matrix over predicted labels.
#[derive(Debug, Default)]
pub struct Evaluation {
    tbl: BTreeMap<String, LabelMeasure>,
    /// (actual, predicted) -> count
    confusion: BTreeMap<(String, String), usize>,

    /// Number of correctly predicted items.
    item_total_correct: usize,
    /// Total number of items.
    item_total_num: usize,
    item_accuracy: f64,

    macro_precision: f64,
    macro_recall: f64,
    macro_fmeasure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl Evaluation {
    /// Adds aligned reference and predicted labels.
    pub fn accumulate<R, P>(&mut self, reference: &[R], prediction: &[P]) -> Result<()>
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        if reference.len() != prediction.len() {
            return Err(Error::LengthMismatch { reference: reference.len(), prediction: prediction.len() });
        }
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                self.item_total_correct += 1;
            }
            *self.confusion.entry((r.to_string(), p.to_string())).or_default() += 1;
            self.item_total_num += 1;
        }
        Ok(())
    }

    /// Computes the derived scores. Labels never seen in the reference are
    /// left out of the macro averages.
    pub fn evaluate(&mut self) -> Estimation {
        let mut num_labels = 0;
        self.macro_precision = 0.0;
        self.macro_recall = 0.0;
        self.macro_fmeasure = 0.0;
        for lev in self.tbl.values_mut() {
            if lev.num_observation == 0 {
                continue;
            }
            num_labels += 1;
            lev.precision = 0.0;
            lev.recall = lev.num_correct as f64 / lev.num_observation as f64;
            lev.fmeasure = 0.0;
            if lev.num_prediction > 0 {
                lev.precision = lev.num_correct as f64 / lev.num_prediction as f64;
            }
            if lev.precision + lev.recall > 0.0 {
                lev.fmeasure = lev.precision * lev.recall * 2.0 / (lev.precision + lev.recall);
            }
            self.macro_precision += lev.precision;
            self.macro_recall += lev.recall;
            self.macro_fmeasure += lev.fmeasure;
        }
        if num_labels > 0 {
            self.macro_precision /= num_labels as f64;
            self.macro_recall /= num_labels as f64;
            self.macro_fmeasure /= num_labels as f64;
        }
        if self.item_total_num > 0 {
            self.item_accuracy = self.item_total_correct as f64 / self.item_total_num as f64;
        }
        Estimation {
            accuracy: self.item_accuracy,
            precision: self.macro_precision,
            recall: self.macro_recall,
            fmeasure: self.macro_fmeasure,
        }
    }

    pub fn confusion(&self, actual: &str, predicted: &str) -> usize {
        self.confusion
            .get(&(actual.to_string(), predicted.to_string()))
            .copied()
            .unwrap_or_default()
    }

    fn write_matrix(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let actual: BTreeSet<&str> = self.confusion.keys().map(|(a, _)| a.as_str()).collect();
        let predicted: BTreeSet<&str> = self.confusion.keys().map(|(_, p)| p.as_str()).collect();
        let width = actual
            .iter()
            .chain(predicted.iter())
            .map(|s| s.chars().count())
            .chain(["actual \\ predicted".len()])
            .max()
            .unwrap_or_default();
        write!(f, "{:<width$}", "actual \\ predicted")?;
        for p in &predicted {
            write!(f, " {p:>width$}")?;
        }
        writeln!(f)?;
        for a in &actual {
            write!(f, "{a:<width$}")?;
            for p in &predicted {
                write!(f, " {:>width$}", self.confusion(a, p))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &self.tbl {
            write!(f, "\t{}: ({}, {}, {})", label, lev.num_correct, lev.num_prediction, lev.num_observation)?;
            if lev.num_observation == 0 {
                writeln!(f, " (******, ******, ******)")?;
            } else {
                writeln!(f, " ({:.4}, {:.4}, {:.4})", lev.precision, lev.recall, lev.fmeasure)?;
            }
        }
        writeln!(
            f,
            "Macro-average precision, recall, F1: ({:.4}, {:.4}, {:.4})",
            self.macro_precision, self.macro_recall, self.macro_fmeasure
        )?;
        writeln!(
            f,
            "Item accuracy: {}/{} => {:.2}%",
            self.item_total_correct,
            self.item_total_num,
            self.item_accuracy * 100.0
        )?;
        writeln!(f)?;
        self.write_matrix(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_and_confusion() {
        let mut e = Evaluation::default();
        e.accumulate(&["NN", "VB", "NN", "DT"], &["NN", "NN", "NN", "DT"]).unwrap();
        let est = e.evaluate();
        assert!((est.accuracy - 0.75).abs() < 1e-12);
        assert_eq!(e.confusion("VB", "NN"), 1);
        assert_eq!(e.confusion("NN", "NN"), 2);
        assert_eq!(e.confusion("NN", "VB"), 0);
        // NN: p = 2/3, r = 1; VB: p = 0, r = 0; DT: p = r = 1
        assert!((est.precision - (2.0 / 3.0 + 0.0 + 1.0) / 3.0).abs() < 1e-12);
        assert!((est.recall - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut e = Evaluation::default();
        let r = e.accumulate(&["a", "b"], &["a"]);
        assert!(matches!(r, Err(Error::LengthMismatch { reference: 2, prediction: 1 })));
    }

    #[test]
    fn report_contains_matrix() {
        let mut e = Evaluation::default();
        e.accumulate(&["phone", "product"], &["phone", "phone"]).unwrap();
        e.evaluate();
        let s = e.to_string();
        assert!(s.contains("Item accuracy: 1/2 => 50.00%"), "{s}");
        assert!(s.lines().any(|l| l.starts_with("product") && l.trim_end().ends_with('1')), "{s}");
    }
}
