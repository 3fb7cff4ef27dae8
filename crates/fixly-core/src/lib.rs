//! Fixly domain core.
//!
//! Pure domain logic shared by the DB and API layers: shared type
//! aliases, the core error taxonomy, status constant tables, and the
//! validation functions that gate every state transition in the
//! request/offer/chat/review lifecycle. No I/O lives here.

pub mod chat;
pub mod error;
pub mod lead;
pub mod offer;
pub mod request;
pub mod review;
pub mod roles;
pub mod service;
pub mod types;
