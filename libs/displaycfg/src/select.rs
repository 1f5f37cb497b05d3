// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Mode selection

use crate::model::MonitorMode;

/// Default refresh-rate match window. A mode matches when the absolute
/// difference is strictly below this.
pub const REFRESH_TOLERANCE_HZ: f64 = 1.0;

/// The active mode, optionally restricted to one connector.
pub fn select_current<'a>(modes: &'a [MonitorMode], connector: Option<&str>) -> Option<&'a MonitorMode> {
    modes
        .iter()
        .filter(|m| connector.map_or(true, |c| m.connector == c))
        .find(|m| m.is_current)
}

/// Pick the mode to switch to: same connector and resolution as `current`,
/// refresh within `tolerance` of `requested`.
///
/// If `current` already matches it is returned as is. Otherwise the first
/// matching mode in service order wins.
pub fn select_target<'a>(
    modes: &'a [MonitorMode],
    current: &'a MonitorMode,
    requested: f64,
    tolerance: f64,
) -> Option<&'a MonitorMode> {
    if rate_matches(current.refresh, requested, tolerance) {
        return Some(current);
    }

    modes.iter().find(|m| {
        m.connector == current.connector
            && m.same_resolution(current)
            && rate_matches(m.refresh, requested, tolerance)
    })
}

/// Refresh rates offered at the current connector and resolution.
pub fn available_rates(modes: &[MonitorMode], current: &MonitorMode) -> Vec<f64> {
    modes
        .iter()
        .filter(|m| m.connector == current.connector && m.same_resolution(current))
        .map(|m| m.refresh)
        .collect()
}

fn rate_matches(refresh: f64, requested: f64, tolerance: f64) -> bool {
    (refresh - requested).abs() < tolerance
}
