use super::DumpRecord;
use crate::error::{Result, WalletError};
use csv::StringRecord;
use std::io::Read;
use std::path::PathBuf;

/// Reads dump records from any `Read` source.
///
/// `origin` only labels errors, so that a malformed line can be traced back to its file.
pub struct DumpReader<R: Read> {
    reader: csv::Reader<R>,
    origin: PathBuf,
}

impl<R: Read> DumpReader<R> {
    pub fn new(source: R, origin: impl Into<PathBuf>) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(source);
        Self {
            reader,
            origin: origin.into(),
        }
    }

    /// Returns an iterator that lazily parses one record per line. Blank lines are skipped.
    pub fn records<T: DumpRecord>(self) -> impl Iterator<Item = Result<T>> {
        let origin = self.origin;
        self.reader
            .into_records()
            .map(move |result| -> Result<T> {
                let record = result?;
                let line = record.position().map_or(0, |position| position.line());
                let malformed = |reason: String| WalletError::MalformedRecord {
                    file: origin.clone(),
                    line,
                    reason,
                };

                let fields = strip_terminator(&record)
                    .ok_or_else(|| malformed("missing `;` terminator".to_string()))?;
                if fields.len() != T::FIELD_COUNT {
                    return Err(malformed(format!(
                        "expected {} fields, found {}",
                        T::FIELD_COUNT,
                        fields.len()
                    )));
                }
                fields
                    .deserialize(None)
                    .map_err(|e| malformed(e.to_string()))
            })
    }
}

/// Drops the `;` closing the last field, or `None` when the record is not terminated.
fn strip_terminator(record: &StringRecord) -> Option<StringRecord> {
    let last = record.len().checked_sub(1)?;
    let tail = record.get(last)?.strip_suffix(';')?;
    let mut fields: StringRecord = record.iter().take(last).collect();
    fields.push_field(tail);
    Some(fields)
}
