#![allow(dead_code)]

use wallet_ledger::Service;
use wallet_ledger::domain::account::{AccountId, Money};
use wallet_ledger::infrastructure::ids::SequentialGenerator;

pub fn service() -> Service {
    Service::with_id_generator(Box::new(SequentialGenerator::new("id")))
}

/// Registers `phone` and deposits `amount` into it.
pub fn funded_account(service: &mut Service, phone: &str, amount: i64) -> AccountId {
    let id = service.register_account(phone).unwrap().id;
    service.deposit(id, Money::new(amount)).unwrap();
    id
}

/// Two accounts, three payments and one favorite.
pub fn populated_service() -> Service {
    let mut service = service();
    let first = funded_account(&mut service, "111", 1000);
    let second = funded_account(&mut service, "222", 500);

    let food = service.pay(first, "food", Money::new(400)).unwrap().id.clone();
    service.pay(second, "auto", Money::new(100)).unwrap();
    let favorite = service.favorite_payment(&food, "groceries").unwrap().id.clone();
    service.pay_from_favorite(&favorite).unwrap();
    service
}
