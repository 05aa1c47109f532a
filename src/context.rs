//! Named plotter registry.

use crate::config::PlotterConfig;
use crate::datalog::LogHandle;
use crate::plotter::Plotter;

/// Owns the plotters of one application window, keyed by name.
///
/// Creating a plotter under a name that is already taken replaces the old
/// plotter in place, keeping its position in iteration order.
#[derive(Debug, Clone, Default)]
pub struct PlotterContext {
    config: PlotterConfig,
    plotters: Vec<(String, Plotter)>,
}

impl PlotterContext {
    /// Create an empty context with the default plotter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context whose plotters start from `config`.
    pub fn with_config(config: PlotterConfig) -> Self {
        Self {
            config,
            plotters: Vec::new(),
        }
    }

    /// Configuration applied to newly created plotters.
    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    /// Create a plotter over `log` and register it under `name`.
    pub fn create_plotter(&mut self, name: impl Into<String>, log: LogHandle) -> &mut Plotter {
        let name = name.into();
        let plotter = Plotter::with_config(log, self.config.clone());
        let slot = match self.position(&name) {
            Some(slot) => {
                tracing::debug!(name = %name, "replacing plotter");
                self.plotters[slot].1 = plotter;
                slot
            }
            None => {
                tracing::debug!(name = %name, "creating plotter");
                self.plotters.push((name, plotter));
                self.plotters.len() - 1
            }
        };
        &mut self.plotters[slot].1
    }

    /// Look up a plotter by name.
    pub fn get(&self, name: &str) -> Option<&Plotter> {
        self.plotters
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, plotter)| plotter)
    }

    /// Look up a plotter by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Plotter> {
        self.plotters
            .iter_mut()
            .find(|(entry, _)| entry == name)
            .map(|(_, plotter)| plotter)
    }

    /// Remove a plotter, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Plotter> {
        let slot = self.position(name)?;
        Some(self.plotters.remove(slot).1)
    }

    /// Iterate over `(name, plotter)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Plotter)> {
        self.plotters
            .iter()
            .map(|(name, plotter)| (name.as_str(), plotter))
    }

    /// Iterate mutably over `(name, plotter)` pairs in creation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Plotter)> {
        self.plotters
            .iter_mut()
            .map(|(name, plotter)| (name.as_str(), plotter))
    }

    /// Number of registered plotters.
    pub fn len(&self) -> usize {
        self.plotters.len()
    }

    /// Check if no plotters are registered.
    pub fn is_empty(&self) -> bool {
        self.plotters.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.plotters.iter().position(|(entry, _)| entry == name)
    }
}
