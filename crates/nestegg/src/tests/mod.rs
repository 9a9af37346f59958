//! Tests for the nestegg front end
//!
//! - `household` - Example household construction, policy and profiles
//! - `report` - Ledger export to disk

mod household;
