//! Error types.

use std::path::PathBuf;

/// Errors reported by the plotter and its log.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// A raw plot-mode number does not name a mode.
    #[error("unknown plot mode {0}")]
    UnknownPlotMode(u32),
    /// Writing the log to disk failed.
    #[error("failed to write log to {}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A configuration document could not be parsed.
    #[error("invalid plotter configuration: {0}")]
    Config(#[from] toml::de::Error),
}
