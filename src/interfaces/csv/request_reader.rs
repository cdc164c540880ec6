use crate::application::request::RequestRecord;
use crate::error::{CieloError, Result};
use std::io::Read;

/// Reads request records from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `(line, Result<RequestRecord>)`.
/// Whitespace is trimmed and columns may be omitted; missing or empty cells become `None`.
/// The line is where the record starts in the source, counting blank lines and the
/// extra lines of quoted multi-line fields.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records, each
    /// paired with its starting line.
    pub fn records(mut self) -> impl Iterator<Item = (u64, Result<RequestRecord>)> {
        let (headers, mut header_error) = match self.reader.headers().cloned() {
            Ok(headers) => (headers, None),
            Err(e) => (csv::StringRecord::new(), Some(e)),
        };
        let mut records = self.reader.into_records();

        std::iter::from_fn(move || {
            if let Some(e) = header_error.take() {
                return Some((1, Err(CieloError::from(e))));
            }
            let item = match records.next()? {
                Ok(record) => (
                    line_of(record.position()),
                    record
                        .deserialize(Some(&headers))
                        .map_err(CieloError::from),
                ),
                Err(e) => (line_of(e.position()), Err(CieloError::from(e))),
            };
            Some(item)
        })
    }
}

fn line_of(position: Option<&csv::Position>) -> u64 {
    position.map_or(0, csv::Position::line)
}
