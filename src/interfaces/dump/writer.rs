use super::DumpRecord;
use crate::error::{Result, WalletError};
use std::io::{self, Write};

/// Writes records in dump format to any `Write` sink.
pub struct DumpWriter<W: Write> {
    sink: W,
}

impl<W: Write> DumpWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Appends one `field field ...;` line.
    ///
    /// Rejects records whose text fields would break the line format.
    pub fn write_record<T: DumpRecord>(&mut self, record: &T) -> Result<()> {
        if let Some(field) = record
            .text_fields()
            .into_iter()
            .find(|field| field.contains(|c: char| c.is_whitespace() || c == ';'))
        {
            return Err(WalletError::InvalidField(field.to_string()));
        }

        let line = encode(record)?;
        self.sink.write_all(&line)?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    /// Flushes and hands back the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Serializes one record as `field field ...;`, the `;` being the csv record terminator.
fn encode<T: DumpRecord>(record: &T) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b';'))
        .from_writer(Vec::new());
    writer.serialize(record)?;
    writer.into_inner().map_err(|e| {
        let cause = e.error();
        WalletError::Io(io::Error::new(cause.kind(), cause.to_string()))
    })
}
