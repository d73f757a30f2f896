use std::io::Write;
use tempfile::NamedTempFile;

/// Writes an edits CSV (header included) to a temporary file.
pub fn edits_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "receipt, row, field, value").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}
