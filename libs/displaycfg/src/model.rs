// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Display state data model
//!
//! The wire records mirror the structures exchanged with
//! `org.gnome.Mutter.DisplayConfig`; `MonitorMode` is the flattened view
//! the selection code works on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use zbus::zvariant::{OwnedValue, Type};

/// `a{sv}` property bag attached to most records.
pub type PropertyMap = HashMap<String, OwnedValue>;

/// Version stamp issued by the service. It must be echoed back on apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serial(pub u32);

/// Monitor identity `(ssss)`: connector, vendor, product, serial.
#[derive(Debug, Clone, PartialEq, Type, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub connector: String,
    pub vendor: String,
    pub product: String,
    pub serial: String,
}

/// One entry of a monitor's mode catalog `(siiddada{sv})`.
#[derive(Debug, Clone, PartialEq, Type, Serialize, Deserialize)]
pub struct ModeEntry {
    pub id: String,
    pub width: i32,
    pub height: i32,
    pub refresh: f64,
    pub preferred_scale: f64,
    pub supported_scales: Vec<f64>,
    pub properties: PropertyMap,
}

/// A physical monitor with its mode catalog.
#[derive(Debug, Clone, PartialEq, Type, Serialize, Deserialize)]
pub struct Monitor {
    pub info: MonitorInfo,
    pub modes: Vec<ModeEntry>,
    pub properties: PropertyMap,
}

/// Compositor-arranged monitor `(iiduba(ssss)a{sv})`.
#[derive(Debug, Clone, PartialEq, Type, Serialize, Deserialize)]
pub struct LogicalMonitor {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    pub transform: u32,
    pub primary: bool,
    pub monitors: Vec<MonitorInfo>,
    pub properties: PropertyMap,
}

/// Snapshot returned by GetCurrentState.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigState {
    pub serial: Serial,
    pub monitors: Vec<Monitor>,
    pub logical_monitors: Vec<LogicalMonitor>,
    pub properties: PropertyMap,
}

/// Per-connector entry of an apply request `(ssa{sv})`.
#[derive(Debug, Clone, PartialEq, Type, Serialize, Deserialize)]
pub struct MonitorAssignment {
    pub connector: String,
    pub mode_id: String,
    pub properties: PropertyMap,
}

/// Logical monitor entry of an apply request `(iiduba(ssa{sv}))`.
#[derive(Debug, Clone, PartialEq, Type, Serialize, Deserialize)]
pub struct LogicalMonitorConfig {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    pub transform: u32,
    pub primary: bool,
    pub monitors: Vec<MonitorAssignment>,
}

/// A single mode of a single connector. Identity is `(connector, mode_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorMode {
    pub connector: String,
    pub mode_id: String,
    pub width: i32,
    pub height: i32,
    pub refresh: f64,
    pub scale: f64,
    pub supported_scales: Vec<f64>,
    pub is_current: bool,
    pub is_preferred: bool,
    pub properties: PropertyMap,
}

impl MonitorMode {
    pub fn same_resolution(&self, other: &MonitorMode) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Line used by `--list`, e.g. `DP-1: 1920x1080 @ 60.00Hz (current)`.
    pub fn listing(&self) -> String {
        let marker = if self.is_current {
            " (current)"
        } else if self.is_preferred {
            " (preferred)"
        } else {
            ""
        };
        format!("{}: {}{}", self.connector, self, marker)
    }
}

impl fmt::Display for MonitorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {:.2}Hz", self.width, self.height, self.refresh)
    }
}
