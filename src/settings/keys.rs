//! Setting identities

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a developer toggle
///
/// Each key carries the name used in the persisted key-value namespace and in
/// change events, its default value, and whether it is written through to the
/// settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    /// Whether shaking the device opens the developer menu
    #[serde(rename = "isShakeToShowDevMenuEnabled")]
    ShakeToShowDevMenu,

    /// Whether the sampling profiler starts when the app launches
    #[serde(rename = "startSamplingProfilerOnLaunch")]
    StartSamplingProfilerOnLaunch,

    /// Whether the performance monitor overlay is visible
    #[serde(rename = "isPerfMonitorShown")]
    PerfMonitorShown,

    /// Whether performance profiling is running
    #[serde(rename = "isProfilingEnabled")]
    ProfilingEnabled,

    /// Whether hot-module reloading is on
    #[serde(rename = "isHotLoadingEnabled")]
    HotLoadingEnabled,

    /// Whether the element inspector overlay is visible
    #[serde(rename = "isElementInspectorShown")]
    ElementInspectorShown,

    /// Whether the runtime is connected to a remote debugger
    #[serde(rename = "isDebuggingRemotely")]
    DebuggingRemotely,
}

impl SettingKey {
    /// All keys, in a stable order
    pub const ALL: [SettingKey; 7] = [
        SettingKey::ShakeToShowDevMenu,
        SettingKey::StartSamplingProfilerOnLaunch,
        SettingKey::PerfMonitorShown,
        SettingKey::ProfilingEnabled,
        SettingKey::HotLoadingEnabled,
        SettingKey::ElementInspectorShown,
        SettingKey::DebuggingRemotely,
    ];

    /// The name used in the persisted namespace and in change events
    pub const fn as_str(self) -> &'static str {
        match self {
            SettingKey::ShakeToShowDevMenu => "isShakeToShowDevMenuEnabled",
            SettingKey::StartSamplingProfilerOnLaunch => "startSamplingProfilerOnLaunch",
            SettingKey::PerfMonitorShown => "isPerfMonitorShown",
            SettingKey::ProfilingEnabled => "isProfilingEnabled",
            SettingKey::HotLoadingEnabled => "isHotLoadingEnabled",
            SettingKey::ElementInspectorShown => "isElementInspectorShown",
            SettingKey::DebuggingRemotely => "isDebuggingRemotely",
        }
    }

    /// Default applied when the store has no entry for the key
    ///
    /// The developer menu answers to shake by default; everything else
    /// starts off.
    pub const fn default_value(self) -> bool {
        matches!(self, SettingKey::ShakeToShowDevMenu)
    }

    /// Whether the key is written through to the settings store
    ///
    /// `DebuggingRemotely` reflects live connection state, not a durable
    /// preference, and stays in memory.
    pub const fn is_persisted(self) -> bool {
        !matches!(self, SettingKey::DebuggingRemotely)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
