// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Display configuration service interface

use crate::error::Result;
use crate::model::{ConfigState, LogicalMonitorConfig, Serial};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the compositor should treat an applied configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMethod {
    /// Validate only, nothing changes on screen.
    Verify,
    /// Apply immediately without the confirmation dialog.
    #[default]
    Temporary,
    /// Apply and store in monitors.xml; the shell asks the user to confirm.
    Persistent,
}

impl ApplyMethod {
    pub fn as_u32(self) -> u32 {
        match self {
            ApplyMethod::Verify => 0,
            ApplyMethod::Temporary => 1,
            ApplyMethod::Persistent => 2,
        }
    }
}

impl FromStr for ApplyMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verify" => Ok(ApplyMethod::Verify),
            "temporary" => Ok(ApplyMethod::Temporary),
            "persistent" => Ok(ApplyMethod::Persistent),
            other => Err(format!("unknown apply method: {}", other)),
        }
    }
}

impl fmt::Display for ApplyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApplyMethod::Verify => "verify",
            ApplyMethod::Temporary => "temporary",
            ApplyMethod::Persistent => "persistent",
        };
        f.write_str(name)
    }
}

/// The two calls this tool makes against the compositor.
pub trait DisplayConfigService {
    fn fetch_state(&self) -> Result<ConfigState>;

    fn apply(&self, serial: Serial, method: ApplyMethod, config: &[LogicalMonitorConfig]) -> Result<()>;
}
