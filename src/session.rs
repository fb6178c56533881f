//! Session context
//!
//! The branch/user/rate-type triple captured at login. Both engines take
//! this as an explicit parameter; nothing reads it from ambient state.

use serde::{Deserialize, Serialize};

/// Which price schedule a quotation resolves against.
///
/// A single rate type governs every entry of one quotation; it is read once
/// per editing session, never per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    #[default]
    B2c,
    B2b,
}

/// Per-session context supplied by the (out of scope) auth/branch screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub branch: String,
    pub username: String,
    pub rate_type: RateType,
    /// Resolved from the static admin allow-list at login.
    pub is_admin: bool,
}

impl SessionContext {
    /// True when this session may view or delete `owner`'s records.
    pub fn can_access(&self, owner: &str) -> bool {
        self.is_admin || self.username == owner
    }
}
