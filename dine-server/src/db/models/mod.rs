//! Database Models
//!
//! Server-only row types. Wire models live in `shared::models`.

pub mod staff;

pub use staff::Staff;
