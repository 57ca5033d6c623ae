//! HMR transport seam

/// Connection to the development bundler's hot-module-reload endpoint
///
/// Implementations own the socket, the wire protocol, and reconnection; this
/// core only issues fire-and-forget calls and never blocks on them.
pub trait HmrTransport: Send + Sync {
    /// Establish (or re-establish) the session for the primary bundle
    fn setup(&self, bundle_url: &str);

    /// Register an additional bundle into the running session
    fn register_bundle(&self, bundle_url: &str);

    /// Turn hot reloading on or off for the live session
    fn set_enabled(&self, enabled: bool);
}
