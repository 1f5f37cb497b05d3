// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Logical monitor configuration rebuilding

use crate::error::{DisplayConfigError, Result};
use crate::model::{LogicalMonitor, LogicalMonitorConfig, MonitorAssignment, MonitorMode, PropertyMap};

/// Rebuild the full logical monitor layout with `target` substituted on its
/// connector.
///
/// Every other connector gets its freshly looked-up current mode. Layout
/// (position, scale, transform, primary) is carried over unchanged.
/// Per-monitor properties are not carried over: each assignment gets an
/// empty map.
pub fn build_new_configuration(
    logical_monitors: &[LogicalMonitor],
    modes: &[MonitorMode],
    target: &MonitorMode,
) -> Result<Vec<LogicalMonitorConfig>> {
    let mut configs = Vec::with_capacity(logical_monitors.len());

    for lm in logical_monitors {
        let mut assignments = Vec::with_capacity(lm.monitors.len());

        for monitor in &lm.monitors {
            let connector = &monitor.connector;
            let mode_id = if *connector == target.connector {
                target.mode_id.clone()
            } else {
                modes
                    .iter()
                    .find(|m| m.connector == *connector && m.is_current)
                    .map(|m| m.mode_id.clone())
                    .ok_or_else(|| DisplayConfigError::MissingConnectorMode(connector.clone()))?
            };

            assignments.push(MonitorAssignment {
                connector: connector.clone(),
                mode_id,
                properties: PropertyMap::new(),
            });
        }

        if !lm.properties.is_empty() {
            log::debug!(
                "dropping {} logical monitor properties at {},{}",
                lm.properties.len(),
                lm.x,
                lm.y
            );
        }

        configs.push(LogicalMonitorConfig {
            x: lm.x,
            y: lm.y,
            scale: lm.scale,
            transform: lm.transform,
            primary: lm.primary,
            monitors: assignments,
        });
    }

    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonitorInfo;
    use zbus::zvariant::{OwnedValue, Value};

    fn info(connector: &str) -> MonitorInfo {
        MonitorInfo {
            connector: connector.to_string(),
            vendor: "ACME".to_string(),
            product: "Panel".to_string(),
            serial: "0001".to_string(),
        }
    }

    fn mode(connector: &str, id: &str, refresh: f64, is_current: bool) -> MonitorMode {
        MonitorMode {
            connector: connector.to_string(),
            mode_id: id.to_string(),
            width: 1920,
            height: 1080,
            refresh,
            scale: 1.0,
            supported_scales: vec![1.0],
            is_current,
            is_preferred: false,
            properties: PropertyMap::new(),
        }
    }

    fn logical(x: i32, primary: bool, connectors: &[&str]) -> LogicalMonitor {
        LogicalMonitor {
            x,
            y: 0,
            scale: 1.25,
            transform: 0,
            primary,
            monitors: connectors.iter().map(|c| info(c)).collect(),
            properties: PropertyMap::new(),
        }
    }

    #[test]
    fn substitutes_target_and_keeps_others_current() {
        let modes = vec![
            mode("DP-1", "dp-60", 60.0, true),
            mode("DP-1", "dp-240", 240.0, false),
            mode("HDMI-1", "hdmi-60", 60.0, false),
            mode("HDMI-1", "hdmi-144", 144.0, true),
        ];
        let lms = vec![logical(0, true, &["DP-1"]), logical(1920, false, &["HDMI-1"])];

        let configs = build_new_configuration(&lms, &modes, &modes[1]).unwrap();

        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].monitors[0].connector, "DP-1");
        assert_eq!(configs[0].monitors[0].mode_id, "dp-240");
        assert_eq!(configs[1].monitors[0].connector, "HDMI-1");
        assert_eq!(configs[1].monitors[0].mode_id, "hdmi-144");
        assert!(configs[0].primary && !configs[1].primary);
        assert_eq!(configs[1].x, 1920);
        assert_eq!(configs[1].scale, 1.25);
    }

    #[test]
    fn mirrored_connectors_are_all_kept() {
        let modes = vec![
            mode("DP-1", "dp-60", 60.0, true),
            mode("DP-1", "dp-120", 120.0, false),
            mode("DP-2", "dp2-60", 60.0, true),
        ];
        let lms = vec![logical(0, true, &["DP-1", "DP-2"])];

        let configs = build_new_configuration(&lms, &modes, &modes[1]).unwrap();
        let got: Vec<_> = configs[0]
            .monitors
            .iter()
            .map(|a| (a.connector.as_str(), a.mode_id.as_str()))
            .collect();
        assert_eq!(got, vec![("DP-1", "dp-120"), ("DP-2", "dp2-60")]);
    }

    #[test]
    fn monitor_properties_are_reset() {
        let mut modes = vec![mode("DP-1", "dp-60", 60.0, true), mode("DP-1", "dp-240", 240.0, false)];
        modes[0]
            .properties
            .insert("color-mode".to_string(), OwnedValue::from(Value::U32(1)));
        let mut lm = logical(0, true, &["DP-1"]);
        lm.properties
            .insert("presentation".to_string(), OwnedValue::from(Value::Bool(true)));

        let configs = build_new_configuration(&[lm], &modes, &modes[1]).unwrap();
        assert!(configs[0].monitors[0].properties.is_empty());
    }

    #[test]
    fn connector_without_current_mode_fails() {
        let modes = vec![mode("DP-1", "dp-60", 60.0, true), mode("DP-1", "dp-240", 240.0, false)];
        let lms = vec![logical(0, true, &["DP-1"]), logical(1920, false, &["HDMI-1"])];

        match build_new_configuration(&lms, &modes, &modes[1]) {
            Err(DisplayConfigError::MissingConnectorMode(c)) => assert_eq!(c, "HDMI-1"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
