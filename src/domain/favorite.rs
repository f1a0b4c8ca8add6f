use super::account::{AccountId, Money};
use super::payment::{Payment, PaymentCategory};
use serde::{Deserialize, Serialize};

/// A named template for repeating a payment.
///
/// Account, amount and category are copied from the source payment when the
/// favorite is created; later changes to that payment are not reflected here.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Favorite {
    pub id: String,
    pub account_id: AccountId,
    pub name: String,
    pub amount: Money,
    pub category: PaymentCategory,
}

impl Favorite {
    pub fn from_payment(id: String, name: String, payment: &Payment) -> Self {
        Self {
            id,
            account_id: payment.account_id,
            name,
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}
