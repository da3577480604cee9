//! Newline-delimited text records
//!
//! Lists, stacks and queues persist as text: a decimal record count on its own
//! line, followed by exactly that many lines, one record per line. Records are
//! trimmed of surrounding whitespace when read back.

use std::io::{BufRead, Write};

use crate::error::{ContainerError, Result};

/// Write a count line followed by one line per record
pub fn write_text_records<W, I, S>(writer: &mut W, records: I) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = S>,
    I::IntoIter: ExactSizeIterator,
    S: AsRef<str>,
{
    let records = records.into_iter();
    writeln!(writer, "{}", records.len())?;
    for record in records {
        writer.write_all(record.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Read a count line and then exactly that many records
///
/// Bytes after the last declared record are left unread.
pub fn read_text_records<R: BufRead + ?Sized>(reader: &mut R) -> Result<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(ContainerError::invalid_data("Missing record count line"));
    }
    let count: usize = line.trim().parse().map_err(|e| {
        ContainerError::invalid_data(format!("Invalid record count {:?}: {}", line.trim(), e))
    })?;

    // The count is untrusted; grow as records actually arrive.
    let mut records = Vec::with_capacity(count.min(1024));
    for i in 0..count {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(ContainerError::invalid_data(format!(
                "Truncated text stream: expected {} records, got {}",
                count, i
            )));
        }
        records.push(line.trim().to_string());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_format() {
        let mut out = Vec::new();
        write_text_records(&mut out, ["first", "second"]).unwrap();
        assert_eq!(out, b"2\nfirst\nsecond\n");
    }

    #[test]
    fn test_empty_records() {
        let mut out = Vec::new();
        write_text_records(&mut out, Vec::<String>::new()).unwrap();
        assert_eq!(out, b"0\n");

        let records = read_text_records(&mut Cursor::new(out)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_trims_whitespace() {
        let mut input = Cursor::new(&b" 2 \r\n  alpha\r\nbeta  \n"[..]);
        let records = read_text_records(&mut input).unwrap();
        assert_eq!(records, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_trailing_data_is_not_consumed() {
        let mut input = Cursor::new(&b"1\nonly\nextra\n"[..]);
        let records = read_text_records(&mut input).unwrap();
        assert_eq!(records, vec!["only".to_string()]);

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "extra\n");
    }

    #[test]
    fn test_truncated_stream() {
        let mut input = Cursor::new(&b"3\na\nb\n"[..]);
        let err = read_text_records(&mut input).unwrap_err();
        assert!(matches!(err, ContainerError::InvalidData { .. }));
        assert!(err.to_string().contains("expected 3 records, got 2"));
    }

    #[test]
    fn test_invalid_count() {
        let cases: [&[u8]; 3] = [b"", b"abc\n", b"-1\n"];
        for bad in cases {
            let err = read_text_records(&mut Cursor::new(bad)).unwrap_err();
            assert_eq!(err.category(), "data");
        }
    }
}
