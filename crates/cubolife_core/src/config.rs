//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to a `cubolife.toml`
//! file. The same structures double as the live-tuning surface: a
//! presentation layer may edit them between calls and the engine picks up the
//! new values on the next `step`, `advance_fade` or `restart`.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `cubolife.toml` file (overrides defaults, missing keys keep defaults)
//! 3. Command-line overrides applied by the headless driver
//!
//! ## Example `cubolife.toml`
//!
//! ```toml
//! seed = 42
//!
//! [structure]
//! shells = 2
//! spacing = 1.5
//! start_seed = 15
//!
//! [rules]
//! overpopulated = 3
//! underpopulated = 2
//! birth = 3
//! fade_in = 50.0
//! fade_out = 50.0
//!
//! [clock]
//! tick_interval = 1.0
//! ```

use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::lattice::generation::ensure_shells;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Birth, survival and fade parameters of the automaton.
///
/// Thresholds are neighbor counts. Fade rates are divided by 1000 and
/// subtracted from a transitioning cell's intensity once per fade step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Rules {
    pub overpopulated: u32,
    pub underpopulated: u32,
    pub birth: u32,
    pub fade_in: f64,
    pub fade_out: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            overpopulated: 3,
            underpopulated: 2,
            birth: 3,
            fade_in: 50.0,
            fade_out: 50.0,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("fade_in", self.fade_in)?;
        ensure_non_negative("fade_out", self.fade_out)?;
        Ok(())
    }

    /// Intensity removed per fade step from an alive cell.
    #[inline]
    #[must_use]
    pub fn fade_in_step(&self) -> f64 {
        self.fade_in / 1000.0
    }

    /// Intensity removed per fade step from a dead cell.
    #[inline]
    #[must_use]
    pub fn fade_out_step(&self) -> f64 {
        self.fade_out / 1000.0
    }
}

/// Lattice geometry and seeding parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StructureConfig {
    /// Number of shells around the central vertex, at most
    /// [`MAX_SHELLS`](crate::lattice::MAX_SHELLS).
    pub shells: u32,
    /// Distance between adjacent vertices.
    pub spacing: f64,
    /// Neighbor distance threshold; `None` uses `spacing`.
    pub neighbor_threshold: Option<f64>,
    /// Number of random draws made when (re)seeding.
    pub start_seed: usize,
    /// Ambient light level forwarded untouched to renderers (0-100).
    pub scene_brightness: u32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            shells: 2,
            spacing: 1.5,
            neighbor_threshold: None,
            start_seed: 15,
            scene_brightness: 90,
        }
    }
}

impl StructureConfig {
    /// Threshold actually handed to the neighbor graph builder.
    #[must_use]
    pub fn effective_threshold(&self) -> f64 {
        self.neighbor_threshold.unwrap_or(self.spacing)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_shells(self.shells)?;
        ensure_positive("spacing", self.spacing)?;
        if let Some(threshold) = self.neighbor_threshold {
            ensure_positive("neighbor_threshold", threshold)?;
        }
        Ok(())
    }
}

/// Tick cadence of the controller, in the caller's time unit (seconds by default).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub tick_interval: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { tick_interval: 1.0 }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("tick_interval", self.tick_interval)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub structure: StructureConfig,
    pub rules: Rules,
    pub clock: ClockConfig,
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        self.structure.validate()?;
        self.rules.validate()?;
        self.clock.validate()?;
        Ok(())
    }

    /// Loads and validates a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("loading config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("parsing TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("serializing config")
    }
}
