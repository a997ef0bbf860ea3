//! Per-frame annotation store.
//!
//! Holds one class id per frame. Class 0 means unlabeled / discarded.

use annotile_core::{AnnotileError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Current schema version of saved label files.
pub const CURRENT_VERSION: u32 = 1;

/// Class ids for every frame of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    labels: Vec<u32>,
}

impl LabelTable {
    /// Table for `count` frames, all unlabeled.
    pub fn new(count: u64) -> Self {
        Self {
            labels: vec![0; count as usize],
        }
    }

    pub fn from_labels(labels: Vec<u32>) -> Self {
        Self { labels }
    }

    pub fn len(&self) -> u64 {
        self.labels.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of frame `id`; frames past the end read as 0.
    pub fn get_label(&self, id: u64) -> u32 {
        self.labels.get(id as usize).copied().unwrap_or(0)
    }

    pub fn set_label(&mut self, id: u64, value: u32) -> Result<()> {
        let count = self.len();
        let slot = self
            .labels
            .get_mut(id as usize)
            .ok_or(AnnotileError::IndexOutOfRange { id, count })?;
        *slot = value;
        Ok(())
    }

    /// Mark a frame with the active label.
    pub fn flag(&mut self, id: u64, active_label: u32) -> Result<()> {
        self.set_label(id, active_label)?;
        info!("Frame {} flagged as {}", id, active_label);
        Ok(())
    }

    /// Discard a frame (label 0).
    pub fn junk(&mut self, id: u64) -> Result<()> {
        self.set_label(id, 0)?;
        info!("Frame {} discarded", id);
        Ok(())
    }

    /// Label every existing frame in `ids`. Returns how many were changed.
    pub fn select_all(&mut self, ids: Range<u64>, label: u32) -> usize {
        let end = ids.end.min(self.len()) as usize;
        let start = (ids.start as usize).min(end);
        let mut changed = 0;
        for slot in &mut self.labels[start..end] {
            if *slot != label {
                *slot = label;
                changed += 1;
            }
        }
        debug!("Labelled {}..{} as {} ({} changed)", start, end, label, changed);
        changed
    }

    /// Clear every existing frame in `ids` back to 0.
    pub fn select_none(&mut self, ids: Range<u64>) -> usize {
        self.select_all(ids, 0)
    }

    /// Number of frames per label id, indexed by id.
    pub fn counts(&self) -> Vec<u64> {
        let max = self.labels.iter().copied().max().unwrap_or(0) as usize;
        let mut counts = vec![0u64; max + 1];
        for &label in &self.labels {
            counts[label as usize] += 1;
        }
        counts
    }

    /// Write `id\tlabel\tname` rows with a header line.
    pub fn write_tsv<W: Write>(&self, mut out: W, names: &[String]) -> Result<()> {
        writeln!(out, "id\tlabel\tname")?;
        for (id, &label) in self.labels.iter().enumerate() {
            let name = names
                .get(label as usize)
                .map(String::as_str)
                .unwrap_or("");
            writeln!(out, "{}\t{}\t{}", id, label, name)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Export to `<dir>/<stem>.txt`.
    pub fn export_tsv(&self, dir: &Path, stem: &str, names: &[String]) -> Result<std::path::PathBuf> {
        let path = dir.join(format!("{}.txt", stem));
        let file = std::fs::File::create(&path)?;
        self.write_tsv(std::io::BufWriter::new(file), names)?;
        info!("Exported labels to {}", path.display());
        Ok(path)
    }

    pub fn save_json(&self, path: &Path, names: &[String]) -> Result<()> {
        let file = LabelFile {
            version: CURRENT_VERSION,
            names: names.to_vec(),
            table: self.clone(),
        };
        let data = serde_json::to_vec_pretty(&file)
            .map_err(|e| AnnotileError::Serialization(format!("Failed to serialize labels: {}", e)))?;
        std::fs::write(path, data)?;
        info!("Stored {} labels in {}", self.len(), path.display());
        Ok(())
    }

    /// Load a table and its label names.
    pub fn load_json(path: &Path) -> Result<(Self, Vec<String>)> {
        let data = std::fs::read(path)?;
        let file: LabelFile = serde_json::from_slice(&data)
            .map_err(|e| AnnotileError::Serialization(format!("Invalid label file: {}", e)))?;
        if file.version > CURRENT_VERSION {
            return Err(AnnotileError::Serialization(format!(
                "Label file version {} is newer than supported version {}",
                file.version, CURRENT_VERSION
            )));
        }
        Ok((file.table, file.names))
    }
}

/// On-disk form of a label table.
#[derive(Debug, Serialize, Deserialize)]
struct LabelFile {
    version: u32,
    /// Label id -> class name
    names: Vec<String>,
    table: LabelTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["junk".into(), "cell".into(), "cluster".into()]
    }

    #[test]
    fn test_get_and_set() {
        let mut table = LabelTable::new(4);
        assert_eq!(table.get_label(2), 0);
        table.set_label(2, 5).unwrap();
        assert_eq!(table.get_label(2), 5);
        assert_eq!(table.get_label(40), 0);
        assert!(matches!(
            table.set_label(4, 1),
            Err(AnnotileError::IndexOutOfRange { id: 4, count: 4 })
        ));
    }

    #[test]
    fn test_flag_and_junk() {
        let mut table = LabelTable::new(2);
        table.flag(1, 2).unwrap();
        assert_eq!(table.get_label(1), 2);
        table.junk(1).unwrap();
        assert_eq!(table.get_label(1), 0);
    }

    #[test]
    fn test_select_all_and_none_clamped() {
        let mut table = LabelTable::new(5);
        assert_eq!(table.select_all(3..9, 1), 2);
        assert_eq!(table.counts(), vec![3, 2]);
        assert_eq!(table.select_none(0..4), 1);
        assert_eq!(table.counts(), vec![4, 1]);
        assert_eq!(table.select_all(7..9, 1), 0);
    }

    #[test]
    fn test_tsv() {
        let table = LabelTable::from_labels(vec![0, 2, 9]);
        let mut out = Vec::new();
        table.write_tsv(&mut out, &names()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "id\tlabel\tname\n0\t0\tjunk\n1\t2\tcluster\n2\t9\t\n");
    }

    #[test]
    fn test_json_round_trip() {
        let tmp = tempfile::tempdir().expect("failed to create tempdir");
        let path = tmp.path().join("labels.json");

        let table = LabelTable::from_labels(vec![1, 0, 2]);
        table.save_json(&path, &names()).unwrap();

        let (loaded, loaded_names) = LabelTable::load_json(&path).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(loaded_names, names());
    }

    #[test]
    fn test_rejects_newer_version() {
        let tmp = tempfile::tempdir().expect("failed to create tempdir");
        let path = tmp.path().join("labels.json");
        std::fs::write(&path, br#"{"version": 99, "names": [], "table": {"labels": []}}"#).unwrap();
        assert!(matches!(
            LabelTable::load_json(&path),
            Err(AnnotileError::Serialization(_))
        ));
    }

    #[test]
    fn test_export_tsv_file() {
        let tmp = tempfile::tempdir().expect("failed to create tempdir");
        let table = LabelTable::new(2);
        let path = table.export_tsv(tmp.path(), "run1", &names()).unwrap();
        assert!(path.ends_with("run1.txt"));
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
