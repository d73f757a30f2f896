use crate::domain::edit::FieldEdit;
use crate::error::{ReconcileError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streams `FieldEdit`s out of a `receipt, row, field, value` CSV.
///
/// Cells are trimmed; a record that stops before `value` reads as an empty value.
pub struct EditReader<R: Read> {
    reader: csv::Reader<R>,
}

impl EditReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> EditReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .flexible(true)
                .from_reader(source),
        }
    }

    /// Edits in file order; a bad record yields an `Err` and reading goes on.
    pub fn edits(self) -> impl Iterator<Item = Result<FieldEdit>> {
        self.reader
            .into_deserialize()
            .map(|record| record.map_err(ReconcileError::from))
    }
}
