//! Writing a fetched body as a log record.

use std::io::{self, Write};

/// Write `body` as text to `sink`, terminated by exactly one newline.
///
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`. A newline is
/// only appended if the body doesn't already end with one.
pub fn write_record(sink: &mut impl Write, body: &[u8]) -> io::Result<()> {
    let text = String::from_utf8_lossy(body);

    sink.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        sink.write_all(b"\n")?;
    }
    sink.flush()
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(body: &[u8]) -> String {
        let mut out = Vec::new();
        write_record(&mut out, body).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn appends_newline() {
        assert_eq!(record(b"hello"), "hello\n");
    }

    #[test]
    fn keeps_existing_newline() {
        assert_eq!(record(b"hello\n"), "hello\n");
    }

    #[test]
    fn empty_body_is_empty_line() {
        assert_eq!(record(b""), "\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(record(b"a\xffb"), "a\u{FFFD}b\n");
    }
}
