// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! displaycfg - Display Configuration Library
//!
//! Reads the monitor topology from the compositor's DisplayConfig service,
//! picks output modes and submits rebuilt logical monitor configurations.

pub mod applier;
pub mod build;
pub mod config;
pub mod error;
pub mod model;
pub mod mutter;
pub mod parse;
pub mod select;
pub mod service;

pub use applier::{ApplyOptions, ModeApplier, SetOutcome};
pub use build::build_new_configuration;
pub use config::{ConfigFile, Settings};
pub use error::{DisplayConfigError, Result};
pub use model::{
    ConfigState, LogicalMonitor, LogicalMonitorConfig, ModeEntry, Monitor, MonitorAssignment,
    MonitorInfo, MonitorMode, PropertyMap, Serial,
};
pub use mutter::MutterDisplayConfig;
pub use parse::parse_modes;
pub use select::{available_rates, select_current, select_target, REFRESH_TOLERANCE_HZ};
pub use service::{ApplyMethod, DisplayConfigService};
