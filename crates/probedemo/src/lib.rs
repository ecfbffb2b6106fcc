//! Top-level facade crate for probedemo.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use probedemo_core::*;
}

pub mod server {
    pub use probedemo_server::*;
}
