//! Remote developer-menu command routing
//!
//! Only compiled with the `remote-commands` feature. Without it the router,
//! its handler trait, and the no-handler error variant are absent from the
//! crate surface entirely, so callers check availability at the type level
//! rather than with runtime flags.

mod router;

pub use router::{CommandHandler, CommandRouter};
