// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Mutter DisplayConfig binding
//!
//! Blocking session-bus client for `org.gnome.Mutter.DisplayConfig`.

use crate::error::{DisplayConfigError, Result};
use crate::model::{ConfigState, LogicalMonitor, LogicalMonitorConfig, Monitor, PropertyMap, Serial};
use crate::service::{ApplyMethod, DisplayConfigService};
use zbus::blocking::Connection;
use zbus::{dbus_proxy, CacheProperties};

pub const DISPLAY_CONFIG_SERVICE: &str = "org.gnome.Mutter.DisplayConfig";
pub const DISPLAY_CONFIG_PATH: &str = "/org/gnome/Mutter/DisplayConfig";

#[dbus_proxy(
    interface = "org.gnome.Mutter.DisplayConfig",
    default_service = "org.gnome.Mutter.DisplayConfig",
    default_path = "/org/gnome/Mutter/DisplayConfig"
)]
trait DisplayConfig {
    /// Returns `(serial, monitors, logical_monitors, properties)`.
    fn get_current_state(&self) -> zbus::Result<(u32, Vec<Monitor>, Vec<LogicalMonitor>, PropertyMap)>;

    fn apply_monitors_config(
        &self,
        serial: u32,
        method: u32,
        logical_monitors: &[LogicalMonitorConfig],
        properties: PropertyMap,
    ) -> zbus::Result<()>;
}

pub struct MutterDisplayConfig {
    proxy: DisplayConfigProxyBlocking<'static>,
}

impl MutterDisplayConfig {
    /// Connect to the session bus.
    pub fn connect() -> Result<Self> {
        let conn = Connection::session()
            .map_err(|e| DisplayConfigError::ServiceUnavailable(describe(&e)))?;
        Self::with_connection(&conn)
    }

    pub fn with_connection(conn: &Connection) -> Result<Self> {
        let proxy = DisplayConfigProxyBlocking::builder(conn)
            .cache_properties(CacheProperties::No)
            .build()
            .map_err(|e| DisplayConfigError::ServiceUnavailable(describe(&e)))?;

        log::debug!("using {} at {}", DISPLAY_CONFIG_SERVICE, DISPLAY_CONFIG_PATH);
        Ok(Self { proxy })
    }
}

impl DisplayConfigService for MutterDisplayConfig {
    fn fetch_state(&self) -> Result<ConfigState> {
        let (serial, monitors, logical_monitors, properties) =
            self.proxy.get_current_state().map_err(|e| {
                if is_service_missing(&e) {
                    DisplayConfigError::ServiceUnavailable(describe(&e))
                } else {
                    DisplayConfigError::ServiceCall(describe(&e))
                }
            })?;

        log::debug!(
            "state serial {}: {} monitors, {} logical monitors",
            serial,
            monitors.len(),
            logical_monitors.len()
        );

        Ok(ConfigState {
            serial: Serial(serial),
            monitors,
            logical_monitors,
            properties,
        })
    }

    fn apply(&self, serial: Serial, method: ApplyMethod, config: &[LogicalMonitorConfig]) -> Result<()> {
        // Global properties are always a new, empty map.
        self.proxy
            .apply_monitors_config(serial.0, method.as_u32(), config, PropertyMap::new())
            .map_err(|e| DisplayConfigError::ApplyRejected(describe(&e)))
    }
}

fn is_service_missing(err: &zbus::Error) -> bool {
    match err {
        zbus::Error::MethodError(name, _, _) => matches!(
            name.as_str(),
            "org.freedesktop.DBus.Error.ServiceUnknown" | "org.freedesktop.DBus.Error.NameHasNoOwner"
        ),
        zbus::Error::FDO(e) => matches!(
            **e,
            zbus::fdo::Error::ServiceUnknown(_) | zbus::fdo::Error::NameHasNoOwner(_)
        ),
        _ => false,
    }
}

fn describe(err: &zbus::Error) -> String {
    match err {
        zbus::Error::MethodError(name, Some(detail), _) => format!("{}: {}", name.as_str(), detail),
        zbus::Error::MethodError(name, None, _) => name.as_str().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_errors_are_not_service_missing() {
        let err = zbus::Error::Failure("boom".to_string());
        assert!(!is_service_missing(&err));
        assert!(describe(&err).contains("boom"));
    }

    #[test]
    fn fdo_service_unknown_is_service_missing() {
        let err = zbus::Error::FDO(Box::new(zbus::fdo::Error::ServiceUnknown(
            DISPLAY_CONFIG_SERVICE.to_string(),
        )));
        assert!(is_service_missing(&err));
    }
}
