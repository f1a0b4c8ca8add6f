use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("phone already registered")]
    PhoneRegistered,
    #[error("account not found")]
    AccountNotFound,
    #[error("payment not found")]
    PaymentNotFound,
    #[error("favorite not found")]
    FavoriteNotFound,
    #[error("amount must be greater than zero")]
    AmountMustBePositive,
    #[error("not enough balance in account")]
    NotEnoughBalance,
    #[error("balance would exceed the largest representable amount")]
    BalanceOverflow,
    #[error("balance can not be negative")]
    NegativeBalance,
    #[error("field {0:?} contains a space or ';' and can not be dumped")]
    InvalidField(String),
    #[error("account id {0} appears more than once in the dump")]
    DuplicateAccountId(i64),
    #[error("malformed record in {file} at line {line}: {reason}")]
    MalformedRecord {
        file: PathBuf,
        line: u64,
        reason: String,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WalletError>;
