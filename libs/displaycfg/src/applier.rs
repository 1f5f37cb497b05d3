// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Mode selection and application
//!
//! One run is a straight line: fetch, parse, select, build, apply. Any
//! failure ends the run; nothing is retried.

use crate::build::build_new_configuration;
use crate::config::Settings;
use crate::error::{DisplayConfigError, Result};
use crate::model::{ConfigState, MonitorMode};
use crate::parse::parse_modes;
use crate::select::{available_rates, select_current, select_target, REFRESH_TOLERANCE_HZ};
use crate::service::{ApplyMethod, DisplayConfigService};

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOptions {
    pub tolerance_hz: f64,
    pub method: ApplyMethod,
    /// Output to operate on. `None` means the first connector with a
    /// current mode.
    pub connector: Option<String>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            tolerance_hz: REFRESH_TOLERANCE_HZ,
            method: ApplyMethod::default(),
            connector: None,
        }
    }
}

impl From<&Settings> for ApplyOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            tolerance_hz: settings.tolerance_hz,
            method: settings.method,
            connector: settings.connector.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetOutcome {
    /// The current mode already runs at the requested rate.
    AlreadyAtRate(MonitorMode),
    /// The new configuration was accepted with this mode.
    Applied(MonitorMode),
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Fetching,
    Parsing,
    Selecting,
    Building,
    Applying,
}

pub struct ModeApplier<S> {
    service: S,
    options: ApplyOptions,
}

impl<S: DisplayConfigService> ModeApplier<S> {
    pub fn new(service: S, options: ApplyOptions) -> Self {
        Self { service, options }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn options(&self) -> &ApplyOptions {
        &self.options
    }

    /// Every mode of every connector, in service order.
    pub fn list_modes(&self) -> Result<Vec<MonitorMode>> {
        let (_, modes) = self.snapshot()?;
        Ok(modes)
    }

    pub fn current_mode(&self) -> Result<Option<MonitorMode>> {
        let (_, modes) = self.snapshot()?;
        self.enter(Phase::Selecting);
        Ok(select_current(&modes, self.options.connector.as_deref()).cloned())
    }

    /// Switch the selected connector to `requested` Hz at its current
    /// resolution.
    pub fn set_refresh_rate(&self, requested: f64) -> Result<SetOutcome> {
        if !requested.is_finite() || requested <= 0.0 {
            return Err(DisplayConfigError::InvalidArgument(requested.to_string()));
        }

        let (state, modes) = self.snapshot()?;

        self.enter(Phase::Selecting);
        let current = select_current(&modes, self.options.connector.as_deref())
            .ok_or(DisplayConfigError::NoCurrentMode)?;

        let target = select_target(&modes, current, requested, self.options.tolerance_hz)
            .ok_or_else(|| DisplayConfigError::ModeNotFound {
                width: current.width,
                height: current.height,
                requested,
                available: available_rates(&modes, current),
            })?;

        if target.is_current {
            log::info!("{} already at {}", target.connector, target);
            return Ok(SetOutcome::AlreadyAtRate(target.clone()));
        }
        log::info!("{}: {} -> {}", target.connector, current, target);

        self.enter(Phase::Building);
        let config = build_new_configuration(&state.logical_monitors, &modes, target)?;

        self.enter(Phase::Applying);
        self.service.apply(state.serial, self.options.method, &config)?;

        Ok(SetOutcome::Applied(target.clone()))
    }

    fn snapshot(&self) -> Result<(ConfigState, Vec<MonitorMode>)> {
        self.enter(Phase::Fetching);
        let state = self.service.fetch_state()?;

        self.enter(Phase::Parsing);
        let modes = parse_modes(&state);
        Ok((state, modes))
    }

    fn enter(&self, phase: Phase) {
        log::debug!("phase: {:?}", phase);
    }
}
