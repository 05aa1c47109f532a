//! The append-only data log a plotter reads from.
//!
//! A log holds any number of sequences that advance together: each call to
//! [`DataLog::log`] appends one sample per sequence and bumps a shared sample
//! counter. The plotter only reads the log, apart from the user-triggered
//! clear and save actions.

mod sequence;

pub use sequence::DataSequence;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::PlotError;

/// Samples retained per sequence unless configured otherwise.
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// Multi-sequence append-only log.
#[derive(Debug, Clone)]
pub struct DataLog {
    sequences: Vec<DataSequence>,
    labels: Vec<String>,
    buffer_size: usize,
    samples: usize,
}

impl DataLog {
    /// Create an empty log retaining `buffer_size` samples per sequence.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            sequences: Vec::new(),
            labels: Vec::new(),
            buffer_size: buffer_size.max(1),
            samples: 0,
        }
    }

    /// Append one sample per sequence.
    ///
    /// Extra values open new sequences whose first valid index is the current
    /// sample counter.
    pub fn log(&mut self, values: &[f64]) {
        while self.sequences.len() < values.len() {
            self.sequences
                .push(DataSequence::starting_at(self.samples, self.buffer_size));
        }
        for (sequence, value) in self.sequences.iter_mut().zip(values) {
            sequence.push(*value);
        }
        self.samples += 1;
    }

    /// Replace the sequence labels.
    pub fn set_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
    }

    /// Access the sequence labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Access a sequence by index.
    pub fn sequence(&self, index: usize) -> Option<&DataSequence> {
        self.sequences.get(index)
    }

    /// Access all sequences.
    pub fn sequences(&self) -> &[DataSequence] {
        &self.sequences
    }

    /// Number of samples logged since creation or the last clear.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Samples retained per sequence.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Drop all samples. Sequences and labels are kept.
    pub fn clear(&mut self) {
        self.samples = 0;
        for sequence in &mut self.sequences {
            sequence.clear(0);
        }
    }

    /// Write the retained samples as CSV.
    ///
    /// The first row holds the labels when any are set. Each following row is
    /// one sample index; sequences without data at that index get an empty cell.
    pub fn write_csv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        if !self.labels.is_empty() {
            writeln!(out, "{}", self.labels.join(","))?;
        }
        let begin = self
            .sequences
            .iter()
            .filter(|sequence| !sequence.is_empty())
            .map(DataSequence::index_begin)
            .min()
            .unwrap_or(self.samples);
        for index in begin..self.samples {
            let mut first = true;
            for sequence in &self.sequences {
                if !first {
                    out.write_all(b",")?;
                }
                first = false;
                if let Some(value) = sequence.get(index) {
                    write!(out, "{value}")?;
                }
            }
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// Save the retained samples to a CSV file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlotError> {
        let path = path.as_ref();
        let io_error = |source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        self.write_csv(BufWriter::new(file)).map_err(io_error)
    }
}

impl Default for DataLog {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

/// A shared handle to a [`DataLog`].
///
/// The handle clones cheaply, so a producer can keep appending from another
/// task while a plotter renders from the same log.
#[derive(Debug, Clone, Default)]
pub struct LogHandle {
    log: Arc<RwLock<DataLog>>,
}

impl LogHandle {
    /// Wrap a log in a shared handle.
    pub fn new(log: DataLog) -> Self {
        Self {
            log: Arc::new(RwLock::new(log)),
        }
    }

    /// Read the log.
    ///
    /// The log is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&DataLog) -> R) -> R {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        f(&log)
    }

    /// Mutate the log.
    ///
    /// The log is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut DataLog) -> R) -> R {
        let mut log = self.log.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut log)
    }
}

impl From<DataLog> for LogHandle {
    fn from(log: DataLog) -> Self {
        Self::new(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_grows_sequences_at_current_index() {
        let mut log = DataLog::new(16);
        log.log(&[1.0]);
        log.log(&[2.0, 20.0]);
        assert_eq!(log.sequence_count(), 2);
        assert_eq!(log.sample_count(), 2);
        let late = log.sequence(1).unwrap();
        assert_eq!(late.index_begin(), 1);
        assert_eq!(late.get(1), Some(20.0));
    }

    #[test]
    fn clear_resets_counter_and_bounds() {
        let mut log = DataLog::new(16);
        log.log(&[1.0, 2.0]);
        log.clear();
        assert_eq!(log.sample_count(), 0);
        assert!(log.sequences().iter().all(DataSequence::is_empty));
        assert_eq!(log.sequence(0).unwrap().min(), None);
    }

    #[test]
    fn csv_has_header_and_gaps() {
        let mut log = DataLog::new(16);
        log.set_labels(["a", "b"]);
        log.log(&[1.0]);
        log.log(&[2.0, 3.5]);
        let mut out = Vec::new();
        log.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n1,\n2,3.5\n");
    }

    #[test]
    fn save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut log = DataLog::new(4);
        log.log(&[0.5, 1.5]);
        log.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0.5,1.5\n");
    }

    #[test]
    fn save_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("log.csv");
        let err = DataLog::new(4).save(&path).unwrap_err();
        assert!(matches!(err, PlotError::Io { path: ref p, .. } if *p == path));
    }

    #[test]
    fn handle_shares_log() {
        let handle = LogHandle::new(DataLog::new(8));
        let other = handle.clone();
        other.write(|log| log.log(&[4.0]));
        assert_eq!(handle.read(DataLog::sample_count), 1);
    }
}
