//! Transport selection and listener binding.
//!
//! # Data Flow
//! ```text
//! PROTOCOL flag
//!     → https: tls.rs reads certs/localhost{-key,}.pem once → rustls
//!     → anything else: plain TCP
//!     → transport.rs binds 0.0.0.0:{PORT} and drives the accept loop
//! ```

pub mod tls;
pub mod transport;

pub use tls::TransportError;
pub use transport::{ListenerError, Transport};
