// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Configuration utilities

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::select::REFRESH_TOLERANCE_HZ;
use crate::service::ApplyMethod;

pub trait ConfigFile: Sized + Default + for<'de> Deserialize<'de> + Serialize {
    fn config_path() -> Option<PathBuf>;

    /// Load from the default location, falling back to defaults when there
    /// is no such file.
    fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid config: {}", path.display()))?;

        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tolerance_hz: f64,
    pub method: ApplyMethod,
    pub connector: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance_hz: REFRESH_TOLERANCE_HZ,
            method: ApplyMethod::default(),
            connector: None,
        }
    }
}

impl ConfigFile for Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("refreshctl").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.tolerance_hz.is_finite() && self.tolerance_hz > 0.0,
            "tolerance_hz must be a positive number, got {}",
            self.tolerance_hz
        );
        Ok(())
    }
}
