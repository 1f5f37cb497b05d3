// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Mode catalog flattening

use crate::model::{ConfigState, ModeEntry, MonitorMode, PropertyMap};
use zbus::zvariant::Value;

const PROP_IS_CURRENT: &str = "is-current";
const PROP_IS_PREFERRED: &str = "is-preferred";

/// Flatten every connector's mode catalog into one list, in service order.
///
/// Entries that cannot describe a usable mode are skipped.
pub fn parse_modes(state: &ConfigState) -> Vec<MonitorMode> {
    let mut modes = Vec::new();

    for monitor in &state.monitors {
        let connector = &monitor.info.connector;
        if connector.is_empty() {
            log::debug!("skipping monitor without connector name");
            continue;
        }

        for entry in &monitor.modes {
            if !is_well_formed(entry) {
                log::debug!("{}: skipping malformed mode {:?}", connector, entry.id);
                continue;
            }

            modes.push(MonitorMode {
                connector: connector.clone(),
                mode_id: entry.id.clone(),
                width: entry.width,
                height: entry.height,
                refresh: entry.refresh,
                scale: entry.preferred_scale,
                supported_scales: entry.supported_scales.clone(),
                is_current: flag(&entry.properties, PROP_IS_CURRENT),
                is_preferred: flag(&entry.properties, PROP_IS_PREFERRED),
                properties: entry.properties.clone(),
            });
        }
    }

    modes
}

fn is_well_formed(entry: &ModeEntry) -> bool {
    !entry.id.is_empty()
        && entry.width > 0
        && entry.height > 0
        && entry.refresh.is_finite()
        && entry.refresh > 0.0
}

// Absent or non-boolean values count as false.
fn flag(props: &PropertyMap, key: &str) -> bool {
    matches!(props.get(key).map(|v| &**v), Some(Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Monitor, MonitorInfo, Serial};
    use zbus::zvariant::OwnedValue;

    fn props(pairs: &[(&str, Value<'static>)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OwnedValue::from(v.clone())))
            .collect()
    }

    fn entry(id: &str, w: i32, h: i32, refresh: f64, p: PropertyMap) -> ModeEntry {
        ModeEntry {
            id: id.to_string(),
            width: w,
            height: h,
            refresh,
            preferred_scale: 1.0,
            supported_scales: vec![1.0],
            properties: p,
        }
    }

    fn monitor(connector: &str, modes: Vec<ModeEntry>) -> Monitor {
        Monitor {
            info: MonitorInfo {
                connector: connector.to_string(),
                vendor: "ACME".to_string(),
                product: "Panel".to_string(),
                serial: "0001".to_string(),
            },
            modes,
            properties: PropertyMap::new(),
        }
    }

    fn state(monitors: Vec<Monitor>) -> ConfigState {
        ConfigState {
            serial: Serial(7),
            monitors,
            logical_monitors: Vec::new(),
            properties: PropertyMap::new(),
        }
    }

    #[test]
    fn flattens_in_service_order() {
        let s = state(vec![
            monitor(
                "DP-1",
                vec![
                    entry("a", 1920, 1080, 60.0, props(&[("is-current", Value::Bool(true))])),
                    entry("b", 1920, 1080, 240.0, PropertyMap::new()),
                ],
            ),
            monitor(
                "HDMI-1",
                vec![entry("c", 2560, 1440, 144.0, props(&[("is-preferred", Value::Bool(true))]))],
            ),
        ]);

        let modes = parse_modes(&s);
        let ids: Vec<_> = modes.iter().map(|m| (m.connector.as_str(), m.mode_id.as_str())).collect();
        assert_eq!(ids, vec![("DP-1", "a"), ("DP-1", "b"), ("HDMI-1", "c")]);
        assert!(modes[0].is_current && !modes[0].is_preferred);
        assert!(!modes[1].is_current && !modes[1].is_preferred);
        assert!(modes[2].is_preferred);
    }

    #[test]
    fn non_boolean_flag_is_false() {
        let s = state(vec![monitor(
            "DP-1",
            vec![entry("a", 1920, 1080, 60.0, props(&[("is-current", Value::U32(1))]))],
        )]);
        assert!(!parse_modes(&s)[0].is_current);
    }

    #[test]
    fn malformed_entries_are_omitted() {
        let s = state(vec![
            monitor(
                "DP-1",
                vec![
                    entry("", 1920, 1080, 60.0, PropertyMap::new()),
                    entry("zero", 0, 1080, 60.0, PropertyMap::new()),
                    entry("nan", 1920, 1080, f64::NAN, PropertyMap::new()),
                    entry("ok", 1920, 1080, 60.0, PropertyMap::new()),
                ],
            ),
            monitor("", vec![entry("x", 800, 600, 60.0, PropertyMap::new())]),
        ]);

        let modes = parse_modes(&s);
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].mode_id, "ok");
    }

    #[test]
    fn keeps_mode_properties() {
        let s = state(vec![monitor(
            "eDP-1",
            vec![entry(
                "a",
                2880,
                1800,
                120.0,
                props(&[("is-current", Value::Bool(true)), ("is-interlaced", Value::Bool(false))]),
            )],
        )]);
        let modes = parse_modes(&s);
        assert!(modes[0].properties.contains_key("is-interlaced"));
    }
}
