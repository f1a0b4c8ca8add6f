use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Free-form tag attached to a payment, e.g. `food` or `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentCategory(pub String);

impl PaymentCategory {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentCategory {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PaymentCategory {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    InProgress,
    Done,
    Fail,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::InProgress => "in_progress",
            PaymentStatus::Done => "done",
            PaymentStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(PaymentStatus::InProgress),
            "done" => Ok(PaymentStatus::Done),
            "fail" => Ok(PaymentStatus::Fail),
            other => Err(format!("unknown payment status `{other}`")),
        }
    }
}

/// A debit recorded against an account.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Payment {
    pub id: String,
    pub account_id: AccountId,
    pub amount: Money,
    pub category: PaymentCategory,
    pub status: PaymentStatus,
}
