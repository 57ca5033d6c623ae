//! Developer settings state
//!
//! Typed view over the settings store: applies defaults and availability
//! gating, keeps the in-memory cache authoritative for reads, and notifies
//! subscribers of every successful mutation.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tokio::sync::mpsc;

use crate::hmr::{HmrSession, HmrTransport};
use crate::store::SettingsStore;
use crate::types::{BuildConfig, DevCapabilities, DevSupportError, Result};

use super::events::{ChangeEvent, ChangeNotifier};
use super::keys::SettingKey;

/// Hook started and stopped by [`DevSettings::set_profiling_enabled`]
///
/// The concrete profiler belongs to the host runtime; this core only owns
/// the start/stop coordination.
pub trait Profiler: Send + Sync {
    /// Begin collecting samples
    fn start(&self);

    /// Stop collecting and flush whatever the implementation gathered
    fn stop(&self);
}

/// Cached toggle values; the source of truth for reads
#[derive(Debug, Clone, Copy)]
struct ToggleCache {
    shake_to_show_dev_menu: bool,
    start_sampling_profiler_on_launch: bool,
    perf_monitor_shown: bool,
    profiling_enabled: bool,
    hot_loading_enabled: bool,
    element_inspector_shown: bool,
    debugging_remotely: bool,
}

impl ToggleCache {
    /// Load persisted values, falling back to each key's default
    fn load(store: &dyn SettingsStore) -> Self {
        let get = |key: SettingKey| {
            store
                .value_for(key.as_str())
                .and_then(|v| v.as_bool())
                .unwrap_or(key.default_value())
        };
        Self {
            shake_to_show_dev_menu: get(SettingKey::ShakeToShowDevMenu),
            start_sampling_profiler_on_launch: get(SettingKey::StartSamplingProfilerOnLaunch),
            perf_monitor_shown: get(SettingKey::PerfMonitorShown),
            profiling_enabled: get(SettingKey::ProfilingEnabled),
            hot_loading_enabled: get(SettingKey::HotLoadingEnabled),
            element_inspector_shown: get(SettingKey::ElementInspectorShown),
            // Live connection state, never read from the store.
            debugging_remotely: SettingKey::DebuggingRemotely.default_value(),
        }
    }

    fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::ShakeToShowDevMenu => self.shake_to_show_dev_menu,
            SettingKey::StartSamplingProfilerOnLaunch => self.start_sampling_profiler_on_launch,
            SettingKey::PerfMonitorShown => self.perf_monitor_shown,
            SettingKey::ProfilingEnabled => self.profiling_enabled,
            SettingKey::HotLoadingEnabled => self.hot_loading_enabled,
            SettingKey::ElementInspectorShown => self.element_inspector_shown,
            SettingKey::DebuggingRemotely => self.debugging_remotely,
        }
    }

    fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::ShakeToShowDevMenu => self.shake_to_show_dev_menu = value,
            SettingKey::StartSamplingProfilerOnLaunch => {
                self.start_sampling_profiler_on_launch = value
            }
            SettingKey::PerfMonitorShown => self.perf_monitor_shown = value,
            SettingKey::ProfilingEnabled => self.profiling_enabled = value,
            SettingKey::HotLoadingEnabled => self.hot_loading_enabled = value,
            SettingKey::ElementInspectorShown => self.element_inspector_shown = value,
            SettingKey::DebuggingRemotely => self.debugging_remotely = value,
        }
    }
}

/// Developer-mode settings state
///
/// Owns the in-memory cache of current toggle values, read-through from and
/// write-through to the injected [`SettingsStore`]. Every successful mutation
/// emits exactly one [`ChangeEvent`] to subscribers, in mutation order.
/// Writes to a toggle whose availability flag is false are rejected with
/// [`DevSupportError::SettingUnavailable`]; no state change, no event.
pub struct DevSettings {
    store: Arc<dyn SettingsStore>,
    capabilities: DevCapabilities,
    cache: RwLock<ToggleCache>,
    notifier: ChangeNotifier,
    profiler: Option<Arc<dyn Profiler>>,
    hmr: Option<Arc<HmrSession>>,
}

impl DevSettings {
    /// Create the settings state over an injected store
    ///
    /// Availability flags are computed from `build` once and never
    /// re-derived. Persisted toggles are loaded eagerly so reads never touch
    /// the store again.
    pub fn new(store: Arc<dyn SettingsStore>, build: &BuildConfig) -> Self {
        let capabilities = build.capabilities();
        let cache = ToggleCache::load(store.as_ref());
        tracing::debug!(?capabilities, "initialized dev settings");

        Self {
            store,
            capabilities,
            cache: RwLock::new(cache),
            notifier: ChangeNotifier::new(),
            profiler: None,
            hmr: None,
        }
    }

    /// Attach the profiler started and stopped by [`set_profiling_enabled`]
    ///
    /// [`set_profiling_enabled`]: DevSettings::set_profiling_enabled
    pub fn with_profiler(mut self, profiler: Arc<dyn Profiler>) -> Self {
        self.profiler = Some(profiler);
        self
    }

    /// Attach the HMR transport driven by the live-update session
    pub fn with_hmr_transport(mut self, transport: Arc<dyn HmrTransport>) -> Self {
        self.hmr = Some(Arc::new(HmrSession::new(transport)));
        self
    }

    // === Capability flags ===

    /// All capability flags at once
    pub fn capabilities(&self) -> DevCapabilities {
        self.capabilities
    }

    /// Whether hot-module reloading can be enabled
    pub fn is_hot_loading_available(&self) -> bool {
        self.capabilities.hot_loading
    }

    /// Whether full live reload can be enabled
    pub fn is_live_reload_available(&self) -> bool {
        self.capabilities.live_reload
    }

    /// Whether the runtime can connect to a remote debugger
    pub fn is_remote_debugging_available(&self) -> bool {
        self.capabilities.remote_debugging
    }

    /// Whether an out-of-process debugger can attach to the device runtime
    pub fn is_device_debugging_available(&self) -> bool {
        self.capabilities.device_debugging
    }

    /// Whether the sampling profiler is present in this build
    pub fn is_sampling_profiler_available(&self) -> bool {
        self.capabilities.sampling_profiler
    }

    // === Change notification ===

    /// Attach an observer to the change notification channel
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    /// The change notification channel
    ///
    /// Hand this to whatever constructs UI overlays so they can subscribe
    /// themselves.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    // === Toggles ===

    /// Whether the runtime is connected to a remote debugger
    pub fn is_debugging_remotely(&self) -> bool {
        self.read(SettingKey::DebuggingRemotely)
    }

    /// Record whether the runtime is connected to a remote debugger
    ///
    /// In-memory only; connection state is not a durable preference.
    pub fn set_debugging_remotely(&self, enabled: bool) -> Result<()> {
        self.ensure_available(SettingKey::DebuggingRemotely, self.capabilities.remote_debugging)?;
        self.write(SettingKey::DebuggingRemotely, enabled);
        Ok(())
    }

    /// Whether shaking the device opens the developer menu
    pub fn is_shake_to_show_dev_menu_enabled(&self) -> bool {
        self.read(SettingKey::ShakeToShowDevMenu)
    }

    /// Control whether the shake gesture opens the developer menu
    ///
    /// On by default in dev builds; hosts that install their own shake
    /// handler turn it off.
    pub fn set_shake_to_show_dev_menu_enabled(&self, enabled: bool) {
        self.write(SettingKey::ShakeToShowDevMenu, enabled);
    }

    /// Whether the performance monitor overlay is visible
    pub fn is_perf_monitor_shown(&self) -> bool {
        self.read(SettingKey::PerfMonitorShown)
    }

    /// Show or hide the performance monitor overlay
    pub fn set_perf_monitor_shown(&self, shown: bool) {
        self.write(SettingKey::PerfMonitorShown, shown);
    }

    /// Whether the sampling profiler starts when the app launches
    pub fn start_sampling_profiler_on_launch(&self) -> bool {
        self.read(SettingKey::StartSamplingProfilerOnLaunch)
    }

    /// Control whether the sampling profiler starts on launch
    pub fn set_start_sampling_profiler_on_launch(&self, enabled: bool) -> Result<()> {
        self.ensure_available(
            SettingKey::StartSamplingProfilerOnLaunch,
            self.capabilities.sampling_profiler,
        )?;
        self.write(SettingKey::StartSamplingProfilerOnLaunch, enabled);
        Ok(())
    }

    /// Whether performance profiling is running
    pub fn is_profiling_enabled(&self) -> bool {
        self.read(SettingKey::ProfilingEnabled)
    }

    /// Enable or disable performance profiling
    ///
    /// Persists the toggle and starts or stops the attached [`Profiler`].
    /// The hook only fires when the value actually changes, so repeated
    /// enables do not restart a running profiler.
    pub fn set_profiling_enabled(&self, enabled: bool) -> Result<()> {
        self.ensure_available(SettingKey::ProfilingEnabled, self.capabilities.sampling_profiler)?;
        let prev = self.write(SettingKey::ProfilingEnabled, enabled);

        if prev != enabled {
            match (&self.profiler, enabled) {
                (Some(profiler), true) => profiler.start(),
                (Some(profiler), false) => profiler.stop(),
                (None, _) => {
                    tracing::debug!("no profiler attached; profiling toggle is storage-only")
                }
            }
        }
        Ok(())
    }

    /// Whether hot-module reloading is on
    pub fn is_hot_loading_enabled(&self) -> bool {
        self.read(SettingKey::HotLoadingEnabled)
    }

    /// Enable or disable hot-module reloading
    ///
    /// Persists the toggle and turns the live HMR session on or off. The
    /// session is only touched when the value actually changes.
    pub fn set_hot_loading_enabled(&self, enabled: bool) -> Result<()> {
        self.ensure_available(SettingKey::HotLoadingEnabled, self.capabilities.hot_loading)?;
        let prev = self.write(SettingKey::HotLoadingEnabled, enabled);

        if prev != enabled {
            if let Some(hmr) = &self.hmr {
                hmr.set_enabled(enabled);
            }
        }
        Ok(())
    }

    /// Whether the element inspector overlay is visible
    pub fn is_element_inspector_shown(&self) -> bool {
        self.read(SettingKey::ElementInspectorShown)
    }

    /// Flip element inspector visibility
    ///
    /// Always succeeds; emits one change event and returns the new
    /// visibility.
    pub fn toggle_element_inspector(&self) -> bool {
        let mut cache = self.lock_write();
        let shown = !cache.get(SettingKey::ElementInspectorShown);
        cache.set(SettingKey::ElementInspectorShown, shown);
        self.persist_and_emit(SettingKey::ElementInspectorShown, shown);
        shown
    }

    // === HMR client ===

    /// Establish or reconfigure the primary HMR session for `bundle_url`
    ///
    /// A no-op (logged, never an error) when hot loading is unavailable in
    /// this build or no transport was attached. The session picks up the
    /// current hot-loading toggle immediately after setup.
    pub fn setup_hmr_client(&self, bundle_url: &str) {
        if !self.capabilities.hot_loading {
            tracing::info!(%bundle_url, "hot loading unavailable; skipping HMR client setup");
            return;
        }
        match &self.hmr {
            Some(hmr) => {
                hmr.setup_with_bundle_url(bundle_url);
                hmr.set_enabled(self.is_hot_loading_enabled());
            }
            None => {
                tracing::info!(%bundle_url, "no HMR transport attached; skipping HMR client setup");
            }
        }
    }

    /// Register an additional bundle into the running HMR session
    ///
    /// Fails with [`DevSupportError::HmrSessionNotInitialized`] when no
    /// primary session exists yet; it never implicitly creates one.
    pub fn setup_additional_hmr_bundle(&self, bundle_url: &str) -> Result<()> {
        match &self.hmr {
            Some(hmr) => hmr.setup_with_additional_bundle_url(bundle_url),
            None => Err(DevSupportError::HmrSessionNotInitialized),
        }
    }

    /// The live-update session controller, when a transport is attached
    pub fn hmr_session(&self) -> Option<&Arc<HmrSession>> {
        self.hmr.as_ref()
    }

    // === Internals ===

    fn ensure_available(&self, key: SettingKey, available: bool) -> Result<()> {
        if available {
            Ok(())
        } else {
            tracing::warn!(key = %key, "rejected write to unavailable setting");
            Err(DevSupportError::SettingUnavailable { key })
        }
    }

    fn read(&self, key: SettingKey) -> bool {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, ToggleCache> {
        self.cache.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Update the cache, write through to the store, and emit one event.
    /// Returns the previous value. Emission happens under the write lock so
    /// subscribers observe mutations in order.
    fn write(&self, key: SettingKey, value: bool) -> bool {
        let mut cache = self.lock_write();
        let prev = cache.get(key);
        cache.set(key, value);
        self.persist_and_emit(key, value);
        prev
    }

    fn persist_and_emit(&self, key: SettingKey, value: bool) {
        if key.is_persisted() {
            self.store.set_value(key.as_str(), &Value::Bool(value));
        }
        self.notifier.emit(key, Value::Bool(value));
    }
}

impl fmt::Debug for DevSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DevSettings")
            .field("capabilities", &self.capabilities)
            .field("cache", &*self.cache.read().unwrap_or_else(|e| e.into_inner()))
            .field("subscribers", &self.notifier.subscriber_count())
            .field("has_profiler", &self.profiler.is_some())
            .field("has_hmr", &self.hmr.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingProfiler {
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    impl Profiler for RecordingProfiler {
        fn start(&self) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }
        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        calls: std::sync::Mutex<Vec<String>>,
    }

    impl RecordingTransport {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl HmrTransport for RecordingTransport {
        fn setup(&self, bundle_url: &str) {
            self.record(format!("setup:{bundle_url}"));
        }
        fn register_bundle(&self, bundle_url: &str) {
            self.record(format!("register:{bundle_url}"));
        }
        fn set_enabled(&self, enabled: bool) {
            self.record(format!("enabled:{enabled}"));
        }
    }

    fn dev_settings() -> DevSettings {
        DevSettings::new(Arc::new(MemoryStore::new()), &BuildConfig::dev())
    }

    #[test]
    fn test_fresh_state_has_defaults() {
        let settings = dev_settings();

        assert!(!settings.is_hot_loading_enabled());
        assert!(!settings.is_profiling_enabled());
        assert!(!settings.is_perf_monitor_shown());
        assert!(!settings.is_element_inspector_shown());
        assert!(!settings.is_debugging_remotely());
        assert!(!settings.start_sampling_profiler_on_launch());
        // Shake-to-show is on by default in dev builds.
        assert!(settings.is_shake_to_show_dev_menu_enabled());
    }

    #[test]
    fn test_read_your_own_write_for_every_persisted_toggle() {
        let settings = dev_settings();

        settings.set_shake_to_show_dev_menu_enabled(false);
        assert!(!settings.is_shake_to_show_dev_menu_enabled());

        settings.set_perf_monitor_shown(true);
        assert!(settings.is_perf_monitor_shown());

        settings.set_start_sampling_profiler_on_launch(true).unwrap();
        assert!(settings.start_sampling_profiler_on_launch());

        settings.set_profiling_enabled(true).unwrap();
        assert!(settings.is_profiling_enabled());

        settings.set_hot_loading_enabled(true).unwrap();
        assert!(settings.is_hot_loading_enabled());
    }

    #[test]
    fn test_persisted_toggles_survive_a_new_instance() {
        let store = Arc::new(MemoryStore::new());
        let settings = DevSettings::new(Arc::clone(&store) as Arc<dyn SettingsStore>, &BuildConfig::dev());
        settings.set_hot_loading_enabled(true).unwrap();
        settings.set_shake_to_show_dev_menu_enabled(false);
        drop(settings);

        let reloaded = DevSettings::new(store, &BuildConfig::dev());
        assert!(reloaded.is_hot_loading_enabled());
        assert!(!reloaded.is_shake_to_show_dev_menu_enabled());
    }

    #[test]
    fn test_debugging_remotely_never_touches_the_store() {
        let store = Arc::new(MemoryStore::new());
        let settings = DevSettings::new(Arc::clone(&store) as Arc<dyn SettingsStore>, &BuildConfig::dev());

        settings.set_debugging_remotely(true).unwrap();
        assert!(settings.is_debugging_remotely());
        assert!(store.value_for("isDebuggingRemotely").is_none());

        // And a fresh instance starts disconnected.
        let reloaded = DevSettings::new(store, &BuildConfig::dev());
        assert!(!reloaded.is_debugging_remotely());
    }

    #[test]
    fn test_unavailable_write_is_rejected_without_event() {
        let settings = DevSettings::new(Arc::new(MemoryStore::new()), &BuildConfig::release());
        let mut events = settings.subscribe();

        let result = settings.set_hot_loading_enabled(true);
        assert!(matches!(
            result,
            Err(DevSupportError::SettingUnavailable {
                key: SettingKey::HotLoadingEnabled
            })
        ));
        assert!(!settings.is_hot_loading_enabled());
        assert!(events.try_recv().is_err());

        assert!(settings.set_debugging_remotely(true).is_err());
        assert!(settings.set_profiling_enabled(true).is_err());
        assert!(settings.set_start_sampling_profiler_on_launch(true).is_err());
    }

    #[test]
    fn test_ungated_toggles_work_in_release_builds() {
        let settings = DevSettings::new(Arc::new(MemoryStore::new()), &BuildConfig::release());

        settings.set_perf_monitor_shown(true);
        assert!(settings.is_perf_monitor_shown());
        assert!(settings.toggle_element_inspector());
    }

    #[test]
    fn test_every_mutation_emits_one_event_in_order() {
        let settings = dev_settings();
        let mut events = settings.subscribe();

        settings.set_hot_loading_enabled(true).unwrap();
        settings.set_perf_monitor_shown(true);
        settings.set_debugging_remotely(true).unwrap();

        let first = events.try_recv().unwrap();
        assert_eq!(first.key, SettingKey::HotLoadingEnabled);
        assert_eq!(first.value, json!(true));

        assert_eq!(events.try_recv().unwrap().key, SettingKey::PerfMonitorShown);
        assert_eq!(events.try_recv().unwrap().key, SettingKey::DebuggingRemotely);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_toggle_element_inspector_is_an_involution() {
        let settings = dev_settings();
        let mut events = settings.subscribe();

        assert!(settings.toggle_element_inspector());
        assert!(settings.is_element_inspector_shown());
        assert!(!settings.toggle_element_inspector());
        assert!(!settings.is_element_inspector_shown());

        let first = events.try_recv().unwrap();
        assert_eq!(first.key, SettingKey::ElementInspectorShown);
        assert_eq!(first.value, json!(true));
        let second = events.try_recv().unwrap();
        assert_eq!(second.value, json!(false));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_profiling_side_effect_fires_on_change_only() {
        let profiler = Arc::new(RecordingProfiler::default());
        let settings = dev_settings().with_profiler(Arc::clone(&profiler) as Arc<dyn Profiler>);

        settings.set_profiling_enabled(true).unwrap();
        settings.set_profiling_enabled(true).unwrap();
        assert_eq!(profiler.starts.load(Ordering::SeqCst), 1);
        assert_eq!(profiler.stops.load(Ordering::SeqCst), 0);

        settings.set_profiling_enabled(false).unwrap();
        assert_eq!(profiler.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hot_loading_side_effect_drives_the_session() {
        let transport = Arc::new(RecordingTransport::default());
        let settings =
            dev_settings().with_hmr_transport(Arc::clone(&transport) as Arc<dyn HmrTransport>);

        settings.setup_hmr_client("http://localhost:8081/index.bundle");
        settings.set_hot_loading_enabled(true).unwrap();
        settings.set_hot_loading_enabled(false).unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                "setup:http://localhost:8081/index.bundle",
                "enabled:false",
                "enabled:true",
                "enabled:false",
            ]
        );
    }

    #[test]
    fn test_hmr_setup_then_additional_bundle() {
        let transport = Arc::new(RecordingTransport::default());
        let settings =
            dev_settings().with_hmr_transport(Arc::clone(&transport) as Arc<dyn HmrTransport>);

        settings.setup_hmr_client("http://localhost:8081/index.bundle");
        settings
            .setup_additional_hmr_bundle("http://localhost:8081/extra.bundle")
            .unwrap();

        let session = settings.hmr_session().unwrap();
        assert_eq!(
            session.bundle_urls(),
            vec![
                "http://localhost:8081/index.bundle",
                "http://localhost:8081/extra.bundle",
            ]
        );
    }

    #[test]
    fn test_additional_bundle_before_primary_is_rejected() {
        let transport = Arc::new(RecordingTransport::default());
        let settings =
            dev_settings().with_hmr_transport(Arc::clone(&transport) as Arc<dyn HmrTransport>);

        let result = settings.setup_additional_hmr_bundle("http://localhost:8081/extra.bundle");
        assert!(matches!(
            result,
            Err(DevSupportError::HmrSessionNotInitialized)
        ));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_additional_bundle_without_transport_is_rejected() {
        let settings = dev_settings();
        let result = settings.setup_additional_hmr_bundle("http://localhost:8081/extra.bundle");
        assert!(matches!(
            result,
            Err(DevSupportError::HmrSessionNotInitialized)
        ));
    }

    #[test]
    fn test_hmr_setup_is_a_noop_when_hot_loading_unavailable() {
        let transport = Arc::new(RecordingTransport::default());
        let settings = DevSettings::new(Arc::new(MemoryStore::new()), &BuildConfig::release())
            .with_hmr_transport(Arc::clone(&transport) as Arc<dyn HmrTransport>);

        settings.setup_hmr_client("http://localhost:8081/index.bundle");
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_capability_flags_reflect_build_config() {
        let settings = dev_settings();
        assert!(settings.is_hot_loading_available());
        assert!(settings.is_live_reload_available());
        assert!(settings.is_remote_debugging_available());
        assert!(settings.is_device_debugging_available());
        assert!(settings.is_sampling_profiler_available());

        let release = DevSettings::new(Arc::new(MemoryStore::new()), &BuildConfig::release());
        assert!(!release.is_hot_loading_available());
        assert!(!release.is_remote_debugging_available());
    }
}
