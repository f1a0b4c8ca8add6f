//! Plain-text dump files.
//!
//! One file per collection, one record per line, fields separated by a single space and
//! each record terminated by `;`:
//!
//! ```text
//! 1 918925874 1000000;
//! 2 987026424 2000000;
//! ```
//!
//! There is no header, no versioning and no escaping, so text fields must not contain
//! whitespace or `;`.

pub mod reader;
pub mod writer;

use crate::domain::account::Account;
use crate::domain::favorite::Favorite;
use crate::domain::payment::Payment;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

/// A record type that has its own dump file.
///
/// Fields are written and read in declaration order of the serde representation.
pub trait DumpRecord: Serialize + DeserializeOwned {
    const FILE_NAME: &'static str;
    const FIELD_COUNT: usize;

    /// Free-text fields, checked for delimiter characters before writing.
    fn text_fields(&self) -> Vec<&str>;
}

impl DumpRecord for Account {
    const FILE_NAME: &'static str = ACCOUNTS_FILE;
    const FIELD_COUNT: usize = 3;

    fn text_fields(&self) -> Vec<&str> {
        vec![self.phone.as_str()]
    }
}

impl DumpRecord for Payment {
    const FILE_NAME: &'static str = PAYMENTS_FILE;
    const FIELD_COUNT: usize = 5;

    fn text_fields(&self) -> Vec<&str> {
        vec![&self.id, self.category.as_str()]
    }
}

impl DumpRecord for Favorite {
    const FILE_NAME: &'static str = FAVORITES_FILE;
    const FIELD_COUNT: usize = 5;

    fn text_fields(&self) -> Vec<&str> {
        vec![&self.id, &self.name, self.category.as_str()]
    }
}
