// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DisplayConfigError>;

#[derive(Debug, Error)]
pub enum DisplayConfigError {
    /// The D-Bus connection or proxy could not be set up, or nothing owns
    /// the DisplayConfig name on this bus.
    #[error("display configuration service unavailable: {0}")]
    ServiceUnavailable(String),

    /// GetCurrentState returned a fault.
    #[error("failed to read display state: {0}")]
    ServiceCall(String),

    #[error("Could not find current mode")]
    NoCurrentMode,

    #[error("Could not find mode with {width}x{height} @ {requested}Hz")]
    ModeNotFound {
        width: i32,
        height: i32,
        requested: f64,
        /// Refresh rates offered at the current resolution.
        available: Vec<f64>,
    },

    /// A logical monitor names a connector that has no current mode.
    #[error("no current mode for connector {0}")]
    MissingConnectorMode(String),

    /// ApplyMonitorsConfig was refused (stale serial or bad layout).
    #[error("failed to apply config: {0}")]
    ApplyRejected(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
