use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub, SubAssign};

pub type AccountId = i64;

/// An amount of money in minor currency units.
///
/// Wraps a signed integer so that callers can express (and the service can reject)
/// negative amounts. Balances held by an [`Account`] are never negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn new(units: i64) -> Self {
        Self(units)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Phone number an account is registered under. Unique across the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(pub String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Phone {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Phone {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A balance-holding account identified by its phone number.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    /// Sequential identifier assigned on registration, starting at 1.
    pub id: AccountId,
    /// The phone the account was registered with.
    pub phone: Phone,
    /// Current balance, never negative.
    pub balance: Money,
}

impl Account {
    pub fn new(id: AccountId, phone: Phone) -> Self {
        Self {
            id,
            phone,
            balance: Money::ZERO,
        }
    }

    /// Adds funds to the balance, refusing a total that does not fit in the balance type
    pub fn deposit(&mut self, amount: Money) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow)?;
        Ok(())
    }

    /// Debits the balance if it covers the amount
    pub fn debit(&mut self, amount: Money) -> bool {
        if !amount.is_negative() && self.balance >= amount {
            self.balance -= amount;
            true
        } else {
            false
        }
    }
}
