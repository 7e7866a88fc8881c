// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step sequence definitions.
//!
//! Sequences can be authored as RON files and turned into sequencers:
//!
//! ```ron
//! (
//!     name: "fade-in-out",
//!     steps: [
//!         (start_value: 0.0, end_value: 1.0, duration_ms: 250, curve: OutQuad),
//!         (start_value: 1.0, end_value: 0.0, duration_ms: 400, curve: InOutSine),
//!     ],
//! )
//! ```

use crate::error::ConfigError;
use crate::evaluator::EvaluatorParams;
use crate::step::StepSequencer;
use crate::value::Interpolate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// A named list of steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSequenceConfig<T> {
    /// Sequence name
    #[serde(default)]
    pub name: String,
    /// Steps in playback order
    pub steps: Vec<EvaluatorParams<T>>,
}

impl<T> StepSequenceConfig<T> {
    /// Create an empty definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step (builder pattern)
    pub fn with_step(mut self, step: EvaluatorParams<T>) -> Self {
        self.steps.push(step);
        self
    }

    /// Sum of all step durations
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|step| step.duration).sum()
    }
}

impl<T: Interpolate + Default> StepSequenceConfig<T> {
    /// Build a sequencer with these steps queued
    pub fn into_sequencer(self) -> StepSequencer<T> {
        tracing::debug!(name = %self.name, steps = self.steps.len(), "building step sequencer");
        self.steps
            .into_iter()
            .fold(StepSequencer::new(), StepSequencer::with_step)
    }
}

impl<T: Interpolate + Default> From<StepSequenceConfig<T>> for StepSequencer<T> {
    fn from(config: StepSequenceConfig<T>) -> Self {
        config.into_sequencer()
    }
}

impl<T: Serialize> StepSequenceConfig<T> {
    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Save the definition to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_str = self.to_ron()?;
        std::fs::write(path, ron_str)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> StepSequenceConfig<T> {
    /// Deserialize from RON format
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Load a definition from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&contents)?;
        tracing::debug!(path = %path.display(), steps = config.steps.len(), "loaded step sequence");
        Ok(config)
    }
}
