//! Build configuration and derived developer capabilities

/// Build profile the host application was compiled with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildProfile {
    /// Development build with dev support compiled in
    #[default]
    Debug,
    /// Release-like build; every developer capability is gated off
    Release,
}

/// Static build/platform configuration captured when the settings state is
/// constructed
///
/// Capability flags are a pure function of this configuration; they are
/// computed once via [`BuildConfig::capabilities`] and never re-derived.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Build profile of the host application
    pub profile: BuildProfile,

    /// Whether the application bundle is served from a development server
    /// rather than packaged with the binary
    pub network_bundle: bool,

    /// Whether the platform allows attaching an out-of-process debugger to
    /// the device runtime
    pub device_debugging: bool,

    /// Whether the runtime ships the sampling profiler
    pub sampling_profiler: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::detect()
    }
}

impl BuildConfig {
    /// Development configuration with every platform capability present
    pub fn dev() -> Self {
        Self {
            profile: BuildProfile::Debug,
            network_bundle: true,
            device_debugging: true,
            sampling_profiler: true,
        }
    }

    /// Release-like configuration; gates every capability off
    pub fn release() -> Self {
        Self {
            profile: BuildProfile::Release,
            network_bundle: false,
            device_debugging: false,
            sampling_profiler: false,
        }
    }

    /// Detect the configuration from how this crate was compiled
    ///
    /// The profile follows `cfg!(debug_assertions)`; platform capabilities
    /// default to present and can be adjusted by the host before use.
    pub fn detect() -> Self {
        if cfg!(debug_assertions) {
            Self::dev()
        } else {
            Self::release()
        }
    }

    /// Compute the read-only capability flags for this configuration
    pub fn capabilities(&self) -> DevCapabilities {
        let dev = self.profile == BuildProfile::Debug;
        DevCapabilities {
            hot_loading: dev && self.network_bundle,
            live_reload: dev && self.network_bundle,
            remote_debugging: dev,
            device_debugging: dev && self.device_debugging,
            sampling_profiler: dev && self.sampling_profiler,
        }
    }
}

/// Read-only capability flags computed once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevCapabilities {
    /// Hot-module reloading can be enabled
    pub hot_loading: bool,
    /// Full live reload can be enabled
    pub live_reload: bool,
    /// The runtime can connect to a remote debugger
    pub remote_debugging: bool,
    /// An out-of-process debugger can attach to the device runtime
    pub device_debugging: bool,
    /// The sampling profiler is present in this build
    pub sampling_profiler: bool,
}
