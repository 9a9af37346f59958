//! Handles for entities registered in a household
//!
//! Each entity kind has its own handle type so an expense handle can never be
//! used where an account is expected. Handles are issued by
//! [`Household`](crate::household::Household) at registration time.

use serde::{Deserialize, Serialize};

/// Handle of an account within a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub usize);

/// Handle of an income within a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IncomeId(pub usize);

/// Handle of an RSU grant within a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RsuId(pub usize);

/// Handle of an expense within a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpenseId(pub usize);

/// Handle of a scheduled transfer within a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransferId(pub usize);
