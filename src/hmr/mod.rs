//! Live-update (HMR) session coordination
//!
//! [`HmrSession`] tracks the primary bundle and any additional bundles
//! registered against the running session, and drives an injected
//! [`HmrTransport`]. The wire protocol and connection lifecycle belong to the
//! transport implementation.

mod session;
mod transport;

pub use session::HmrSession;
pub use transport::HmrTransport;
