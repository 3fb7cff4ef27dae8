//! Lead status constants.
//!
//! A lead is a lightweight contact record from a client to a service
//! owner. It carries an initial status and no further state machine.

/// Lead just created, not yet seen by the provider.
pub const LEAD_NEW: &str = "nuevo";

/// Provider opened the lead.
pub const LEAD_SEEN: &str = "visto";

/// Provider responded to the client.
pub const LEAD_RESPONDED: &str = "respondido";

/// All valid lead status values.
pub const VALID_LEAD_STATUSES: &[&str] = &[LEAD_NEW, LEAD_SEEN, LEAD_RESPONDED];
