use crate::domain::account::{Account, AccountId, Money, Phone};
use crate::domain::favorite::Favorite;
use crate::domain::payment::{Payment, PaymentCategory, PaymentStatus};
use crate::domain::ports::IdGeneratorBox;
use crate::error::{Result, WalletError};
use crate::infrastructure::ids::UuidGenerator;
use tracing::debug;

/// The wallet ledger.
///
/// `Service` exclusively owns every account, payment and favorite plus the account id
/// counter. All mutation goes through `&mut self`, so a single owner drives it; there is
/// no internal locking and callers that want to share one instance across threads must
/// provide their own synchronization.
pub struct Service {
    next_account_id: AccountId,
    accounts: Vec<Account>,
    payments: Vec<Payment>,
    favorites: Vec<Favorite>,
    ids: IdGeneratorBox,
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}

impl Service {
    /// Creates an empty service that identifies payments and favorites by UUID.
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidGenerator::new()))
    }

    /// Creates an empty service drawing payment and favorite ids from `ids`.
    pub fn with_id_generator(ids: IdGeneratorBox) -> Self {
        Self {
            next_account_id: 0,
            accounts: Vec::new(),
            payments: Vec::new(),
            favorites: Vec::new(),
            ids,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Reports which of accounts, payments and favorites hold at least one record.
    pub fn collections_present(&self) -> (bool, bool, bool) {
        (
            !self.accounts.is_empty(),
            !self.payments.is_empty(),
            !self.favorites.is_empty(),
        )
    }

    /// Registers a new account with a zero balance.
    ///
    /// Fails with [`WalletError::PhoneRegistered`] if the phone is already taken.
    pub fn register_account(&mut self, phone: impl Into<Phone>) -> Result<&Account> {
        let phone = phone.into();
        if self.accounts.iter().any(|account| account.phone == phone) {
            return Err(WalletError::PhoneRegistered);
        }

        let account = Account::new(self.allocate_account_id(), phone);
        debug!(account_id = account.id, phone = %account.phone, "registered account");
        Ok(self.push_account(account))
    }

    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|account| account.id == account_id)
            .ok_or(WalletError::AccountNotFound)
    }

    /// Credits `amount` to the account. Zero and negative amounts are rejected.
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<&Account> {
        if amount <= Money::ZERO {
            return Err(WalletError::AmountMustBePositive);
        }

        let account = self.account_mut(account_id)?;
        account.deposit(amount)?;
        debug!(account_id, %amount, balance = %account.balance, "deposit");
        Ok(&*account)
    }

    /// Debits `amount` from the account and records an in-progress payment.
    ///
    /// Only negative amounts are rejected; a zero payment is recorded like any other.
    pub fn pay(
        &mut self,
        account_id: AccountId,
        category: impl Into<PaymentCategory>,
        amount: Money,
    ) -> Result<&Payment> {
        if amount.is_negative() {
            return Err(WalletError::AmountMustBePositive);
        }

        let account = self.account_mut(account_id)?;
        if !account.debit(amount) {
            return Err(WalletError::NotEnoughBalance);
        }

        let payment = Payment {
            id: self.ids.next_id(),
            account_id,
            amount,
            category: category.into(),
            status: PaymentStatus::InProgress,
        };
        debug!(payment_id = %payment.id, account_id, %amount, category = %payment.category, "payment");
        let index = self.payments.len();
        self.payments.push(payment);
        Ok(&self.payments[index])
    }

    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment> {
        self.payments
            .iter()
            .find(|payment| payment.id == payment_id)
            .ok_or(WalletError::PaymentNotFound)
    }

    /// Saves an existing payment as a named template for repeat payments.
    pub fn favorite_payment(
        &mut self,
        payment_id: &str,
        name: impl Into<String>,
    ) -> Result<&Favorite> {
        let payment = self
            .payments
            .iter()
            .find(|payment| payment.id == payment_id)
            .ok_or(WalletError::PaymentNotFound)?;

        let favorite = Favorite::from_payment(self.ids.next_id(), name.into(), payment);
        debug!(favorite_id = %favorite.id, payment_id, name = %favorite.name, "favorite");
        let index = self.favorites.len();
        self.favorites.push(favorite);
        Ok(&self.favorites[index])
    }

    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite> {
        self.favorites
            .iter()
            .find(|favorite| favorite.id == favorite_id)
            .ok_or(WalletError::FavoriteNotFound)
    }

    /// Repeats the payment a favorite describes. Subject to every check [`Service::pay`] makes.
    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<&Payment> {
        let favorite = self.find_favorite_by_id(favorite_id)?;
        let (account_id, category, amount) =
            (favorite.account_id, favorite.category.clone(), favorite.amount);
        self.pay(account_id, category, amount)
    }

    /// Upserts an account by id.
    ///
    /// A known id has its phone and balance overwritten. An unknown id is ignored and the
    /// record is inserted under a freshly allocated id, which the returned account carries.
    pub fn update_account(&mut self, account: Account) -> Result<&Account> {
        if account.balance.is_negative() {
            return Err(WalletError::NegativeBalance);
        }
        if self
            .accounts
            .iter()
            .any(|existing| existing.phone == account.phone && existing.id != account.id)
        {
            return Err(WalletError::PhoneRegistered);
        }

        let position = self.accounts.iter().position(|existing| existing.id == account.id);
        match position {
            Some(index) => {
                let existing = &mut self.accounts[index];
                existing.phone = account.phone;
                existing.balance = account.balance;
                debug!(account_id = existing.id, "updated account");
                Ok(&self.accounts[index])
            }
            None => {
                debug!(requested_id = account.id, "account id unknown, inserting");
                self.insert_account(account.phone, account.balance)
            }
        }
    }

    /// Adds an account with a given balance under a freshly allocated id.
    pub fn insert_account(&mut self, phone: Phone, balance: Money) -> Result<&Account> {
        if balance.is_negative() {
            return Err(WalletError::NegativeBalance);
        }
        if self.accounts.iter().any(|existing| existing.phone == phone) {
            return Err(WalletError::PhoneRegistered);
        }

        let inserted = Account {
            id: self.allocate_account_id(),
            phone,
            balance,
        };
        debug!(account_id = inserted.id, "inserted account");
        Ok(self.push_account(inserted))
    }

    /// Upserts a payment by id.
    ///
    /// A known id has its amount, category and status overwritten. An unknown id is
    /// appended as-is, provided the account it references exists.
    pub fn update_payment(&mut self, payment: Payment) -> Result<&Payment> {
        if payment.amount.is_negative() {
            return Err(WalletError::AmountMustBePositive);
        }

        let position = self.payments.iter().position(|existing| existing.id == payment.id);
        match position {
            Some(index) => {
                let existing = &mut self.payments[index];
                existing.amount = payment.amount;
                existing.category = payment.category;
                existing.status = payment.status;
                debug!(payment_id = %existing.id, "updated payment");
                Ok(&self.payments[index])
            }
            None => {
                self.find_account_by_id(payment.account_id)?;
                debug!(payment_id = %payment.id, account_id = payment.account_id, "inserted payment");
                let index = self.payments.len();
                self.payments.push(payment);
                Ok(&self.payments[index])
            }
        }
    }

    /// Upserts a favorite by id.
    ///
    /// A known id has its name, amount and category overwritten. An unknown id is
    /// appended as-is, provided the account it references exists.
    pub fn update_favorite(&mut self, favorite: Favorite) -> Result<&Favorite> {
        if favorite.amount.is_negative() {
            return Err(WalletError::AmountMustBePositive);
        }

        let position = self.favorites.iter().position(|existing| existing.id == favorite.id);
        match position {
            Some(index) => {
                let existing = &mut self.favorites[index];
                existing.name = favorite.name;
                existing.amount = favorite.amount;
                existing.category = favorite.category;
                debug!(favorite_id = %existing.id, "updated favorite");
                Ok(&self.favorites[index])
            }
            None => {
                self.find_account_by_id(favorite.account_id)?;
                debug!(favorite_id = %favorite.id, account_id = favorite.account_id, "inserted favorite");
                let index = self.favorites.len();
                self.favorites.push(favorite);
                Ok(&self.favorites[index])
            }
        }
    }

    fn account_mut(&mut self, account_id: AccountId) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or(WalletError::AccountNotFound)
    }

    fn allocate_account_id(&mut self) -> AccountId {
        self.next_account_id += 1;
        self.next_account_id
    }

    fn push_account(&mut self, account: Account) -> &Account {
        let index = self.accounts.len();
        self.accounts.push(account);
        &self.accounts[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ids::SequentialGenerator;

    fn service() -> Service {
        Service::with_id_generator(Box::new(SequentialGenerator::new("id")))
    }

    fn funded(service: &mut Service, phone: &str, amount: i64) -> AccountId {
        let id = service.register_account(phone).unwrap().id;
        service.deposit(id, Money::new(amount)).unwrap();
        id
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut service = service();
        assert_eq!(service.register_account("111").unwrap().id, 1);
        assert_eq!(service.register_account("222").unwrap().id, 2);
        assert_eq!(service.accounts().len(), 2);
    }

    #[test]
    fn test_register_duplicate_phone() {
        let mut service = service();
        service.register_account("111").unwrap();

        let result = service.register_account("111");
        assert!(matches!(result, Err(WalletError::PhoneRegistered)));
        assert_eq!(service.accounts().len(), 1);

        // A rejected registration does not burn an id
        assert_eq!(service.register_account("222").unwrap().id, 2);
    }

    #[test]
    fn test_find_account_missing() {
        let service = service();
        assert!(matches!(
            service.find_account_by_id(999),
            Err(WalletError::AccountNotFound)
        ));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut service = service();
        let id = funded(&mut service, "111", 100);

        for amount in [0, -1, -100] {
            assert!(matches!(
                service.deposit(id, Money::new(amount)),
                Err(WalletError::AmountMustBePositive)
            ));
        }
        assert_eq!(service.find_account_by_id(id).unwrap().balance, Money::new(100));
    }

    #[test]
    fn test_deposit_checks_amount_before_account() {
        let mut service = service();
        assert!(matches!(
            service.deposit(42, Money::ZERO),
            Err(WalletError::AmountMustBePositive)
        ));
        assert!(matches!(
            service.deposit(42, Money::new(10)),
            Err(WalletError::AccountNotFound)
        ));
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut service = service();
        let id = funded(&mut service, "111", i64::MAX);

        assert!(matches!(
            service.deposit(id, Money::new(1)),
            Err(WalletError::BalanceOverflow)
        ));
        assert_eq!(
            service.find_account_by_id(id).unwrap().balance,
            Money::new(i64::MAX)
        );
    }

    #[test]
    fn test_pay_debits_balance() {
        let mut service = service();
        let id = funded(&mut service, "111", 1000);

        let payment = service.pay(id, "food", Money::new(400)).unwrap();
        assert_eq!(payment.id, "id-1");
        assert_eq!(payment.account_id, id);
        assert_eq!(payment.status, PaymentStatus::InProgress);
        assert_eq!(service.find_account_by_id(id).unwrap().balance, Money::new(600));
    }

    #[test]
    fn test_pay_not_enough_balance() {
        let mut service = service();
        let id = funded(&mut service, "111", 1000);

        assert!(matches!(
            service.pay(id, "food", Money::new(1001)),
            Err(WalletError::NotEnoughBalance)
        ));
        assert_eq!(service.find_account_by_id(id).unwrap().balance, Money::new(1000));
        assert!(service.payments().is_empty());
    }

    #[test]
    fn test_pay_exact_balance() {
        let mut service = service();
        let id = funded(&mut service, "111", 50);

        service.pay(id, "food", Money::new(50)).unwrap();
        assert_eq!(service.find_account_by_id(id).unwrap().balance, Money::ZERO);
    }

    #[test]
    fn test_pay_zero_is_allowed_negative_is_not() {
        let mut service = service();
        let id = service.register_account("111").unwrap().id;

        let payment = service.pay(id, "misc", Money::ZERO).unwrap();
        assert_eq!(payment.amount, Money::ZERO);

        assert!(matches!(
            service.pay(id, "misc", Money::new(-1)),
            Err(WalletError::AmountMustBePositive)
        ));
    }

    #[test]
    fn test_pay_unknown_account() {
        let mut service = service();
        assert!(matches!(
            service.pay(7, "food", Money::new(1)),
            Err(WalletError::AccountNotFound)
        ));
    }

    #[test]
    fn test_favorite_and_repeat() {
        let mut service = service();
        let id = funded(&mut service, "111", 1000);
        let payment_id = service.pay(id, "auto", Money::new(300)).unwrap().id.clone();

        let favorite = service.favorite_payment(&payment_id, "fuel").unwrap();
        assert_eq!(favorite.name, "fuel");
        assert_eq!(favorite.amount, Money::new(300));
        let favorite_id = favorite.id.clone();

        let repeated = service.pay_from_favorite(&favorite_id).unwrap();
        assert_ne!(repeated.id, payment_id);
        assert_eq!(repeated.category, PaymentCategory::from("auto"));
        assert_eq!(repeated.amount, Money::new(300));
        assert_eq!(service.find_account_by_id(id).unwrap().balance, Money::new(400));
        assert_eq!(service.payments().len(), 2);
    }

    #[test]
    fn test_favorite_missing_payment() {
        let mut service = service();
        assert!(matches!(
            service.favorite_payment("nope", "x"),
            Err(WalletError::PaymentNotFound)
        ));
        assert!(matches!(
            service.find_favorite_by_id("nope"),
            Err(WalletError::FavoriteNotFound)
        ));
        assert!(matches!(
            service.pay_from_favorite("nope"),
            Err(WalletError::FavoriteNotFound)
        ));
    }

    #[test]
    fn test_pay_from_favorite_respects_balance() {
        let mut service = service();
        let id = funded(&mut service, "111", 500);
        let payment_id = service.pay(id, "rent", Money::new(300)).unwrap().id.clone();
        let favorite_id = service
            .favorite_payment(&payment_id, "rent")
            .unwrap()
            .id
            .clone();

        assert!(matches!(
            service.pay_from_favorite(&favorite_id),
            Err(WalletError::NotEnoughBalance)
        ));
        assert_eq!(service.find_account_by_id(id).unwrap().balance, Money::new(200));
    }

    #[test]
    fn test_collections_present() {
        let mut service = service();
        assert_eq!(service.collections_present(), (false, false, false));

        let id = funded(&mut service, "111", 10);
        assert_eq!(service.collections_present(), (true, false, false));

        service.pay(id, "food", Money::new(1)).unwrap();
        assert_eq!(service.collections_present(), (true, true, false));
    }

    #[test]
    fn test_update_account_in_place() {
        let mut service = service();
        let id = funded(&mut service, "111", 10);

        let updated = service
            .update_account(Account {
                id,
                phone: Phone::from("333"),
                balance: Money::new(77),
            })
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.phone, Phone::from("333"));
        assert_eq!(updated.balance, Money::new(77));
        assert_eq!(service.accounts().len(), 1);
    }

    #[test]
    fn test_update_account_inserts_with_fresh_id() {
        let mut service = service();
        service.register_account("111").unwrap();

        let inserted = service
            .update_account(Account {
                id: 40,
                phone: Phone::from("222"),
                balance: Money::new(5),
            })
            .unwrap();
        assert_eq!(inserted.id, 2);
        assert_eq!(inserted.balance, Money::new(5));

        // The counter keeps going from the allocated id, not the requested one
        assert_eq!(service.register_account("333").unwrap().id, 3);
    }

    #[test]
    fn test_insert_account_ignores_existing_ids() {
        let mut service = service();
        service.register_account("111").unwrap();

        let inserted = service.insert_account(Phone::from("222"), Money::new(9)).unwrap();
        assert_eq!(inserted.id, 2);
        assert_eq!(inserted.balance, Money::new(9));

        assert!(matches!(
            service.insert_account(Phone::from("111"), Money::ZERO),
            Err(WalletError::PhoneRegistered)
        ));
        assert!(matches!(
            service.insert_account(Phone::from("333"), Money::new(-1)),
            Err(WalletError::NegativeBalance)
        ));
        assert_eq!(service.accounts().len(), 2);
    }

    #[test]
    fn test_update_account_guards_invariants() {
        let mut service = service();
        service.register_account("111").unwrap();
        let second = service.register_account("222").unwrap().id;

        let taken = service.update_account(Account {
            id: second,
            phone: Phone::from("111"),
            balance: Money::ZERO,
        });
        assert!(matches!(taken, Err(WalletError::PhoneRegistered)));

        let negative = service.update_account(Account {
            id: second,
            phone: Phone::from("222"),
            balance: Money::new(-1),
        });
        assert!(matches!(negative, Err(WalletError::NegativeBalance)));
    }

    #[test]
    fn test_update_payment_upsert() {
        let mut service = service();
        let id = funded(&mut service, "111", 100);
        let payment_id = service.pay(id, "food", Money::new(10)).unwrap().id.clone();

        let updated = service
            .update_payment(Payment {
                id: payment_id.clone(),
                account_id: id,
                amount: Money::new(20),
                category: PaymentCategory::from("cafe"),
                status: PaymentStatus::Done,
            })
            .unwrap();
        assert_eq!(updated.status, PaymentStatus::Done);
        assert_eq!(updated.amount, Money::new(20));
        assert_eq!(service.payments().len(), 1);

        let inserted = service
            .update_payment(Payment {
                id: "imported".to_string(),
                account_id: id,
                amount: Money::new(1),
                category: PaymentCategory::from("misc"),
                status: PaymentStatus::Fail,
            })
            .unwrap();
        assert_eq!(inserted.id, "imported");
        assert_eq!(service.payments().len(), 2);
        // Upserts record history, they do not move money
        assert_eq!(service.find_account_by_id(id).unwrap().balance, Money::new(90));
    }

    #[test]
    fn test_update_payment_requires_account() {
        let mut service = service();
        let result = service.update_payment(Payment {
            id: "p".to_string(),
            account_id: 9,
            amount: Money::new(1),
            category: PaymentCategory::from("misc"),
            status: PaymentStatus::InProgress,
        });
        assert!(matches!(result, Err(WalletError::AccountNotFound)));
        assert!(service.payments().is_empty());
    }

    #[test]
    fn test_update_favorite_uses_favorite_ids() {
        let mut service = service();
        let id = funded(&mut service, "111", 100);
        let payment_id = service.pay(id, "food", Money::new(10)).unwrap().id.clone();

        // Same id as the payment, but no such favorite yet: must insert
        let inserted = service
            .update_favorite(Favorite {
                id: payment_id.clone(),
                account_id: id,
                name: "snack".to_string(),
                amount: Money::new(10),
                category: PaymentCategory::from("food"),
            })
            .unwrap();
        assert_eq!(inserted.name, "snack");
        assert_eq!(service.favorites().len(), 1);

        let updated = service
            .update_favorite(Favorite {
                id: payment_id,
                account_id: id,
                name: "lunch".to_string(),
                amount: Money::new(15),
                category: PaymentCategory::from("cafe"),
            })
            .unwrap();
        assert_eq!(updated.name, "lunch");
        assert_eq!(updated.amount, Money::new(15));
        assert_eq!(service.favorites().len(), 1);
    }
}
