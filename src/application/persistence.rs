use super::service::Service;
use crate::domain::account::{Account, AccountId};
use crate::domain::favorite::Favorite;
use crate::domain::payment::Payment;
use crate::error::{Result, WalletError};
use crate::interfaces::dump::DumpRecord;
use crate::interfaces::dump::reader::DumpReader;
use crate::interfaces::dump::writer::DumpWriter;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{debug, info};

impl Service {
    /// Writes every non-empty collection to its dump file inside `dir`.
    ///
    /// Existing dump files are overwritten; files of empty collections are left alone.
    /// Files written before a failure stay on disk.
    pub fn export(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        export_collection(dir, self.accounts())?;
        export_collection(dir, self.payments())?;
        export_collection(dir, self.favorites())?;
        Ok(())
    }

    /// Restores state from the dump files inside `dir`.
    ///
    /// Accounts, then payments, then favorites are applied. A dump account whose id
    /// already existed before the import is updated in place; every other dump account is
    /// inserted under a fresh id, and the payments and favorites pointing at it are
    /// rewritten to match. A missing dump file leaves its collection untouched. Each file
    /// is parsed in full before any of its records is applied; records applied before a
    /// failure are kept.
    pub fn import(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        let known: HashSet<AccountId> =
            self.accounts().iter().map(|account| account.id).collect();

        let accounts = read_collection::<Account>(dir)?;
        let mut seen = HashSet::new();
        if let Some(duplicate) = accounts.iter().find(|account| !seen.insert(account.id)) {
            return Err(WalletError::DuplicateAccountId(duplicate.id));
        }

        let mut remapped: HashMap<AccountId, AccountId> = HashMap::new();
        for account in accounts {
            let requested = account.id;
            let stored = if known.contains(&requested) {
                self.update_account(account)?
            } else {
                self.insert_account(account.phone, account.balance)?
            };
            remapped.insert(requested, stored.id);
        }

        // Dump ids only mean something through the remap or as pre-import ids
        let resolve = |account_id: AccountId| -> Result<AccountId> {
            match remapped.get(&account_id) {
                Some(&stored) => Ok(stored),
                None if known.contains(&account_id) => Ok(account_id),
                None => Err(WalletError::AccountNotFound),
            }
        };

        for mut payment in read_collection::<Payment>(dir)? {
            payment.account_id = resolve(payment.account_id)?;
            self.update_payment(payment)?;
        }

        for mut favorite in read_collection::<Favorite>(dir)? {
            favorite.account_id = resolve(favorite.account_id)?;
            self.update_favorite(favorite)?;
        }

        Ok(())
    }
}

fn export_collection<T: DumpRecord>(dir: &Path, records: &[T]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let mut writer = DumpWriter::new(Vec::new());
    for record in records {
        writer.write_record(record)?;
    }
    let path = dir.join(T::FILE_NAME);
    fs::write(&path, writer.into_inner()?)?;
    info!(file = %path.display(), records = records.len(), "exported dump file");
    Ok(())
}

fn read_collection<T: DumpRecord>(dir: &Path) -> Result<Vec<T>> {
    let path = dir.join(T::FILE_NAME);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file = %path.display(), "no dump file, skipping");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let records = DumpReader::new(file, &path)
        .records()
        .collect::<Result<Vec<T>>>()?;
    info!(file = %path.display(), records = records.len(), "imported dump file");
    Ok(records)
}
