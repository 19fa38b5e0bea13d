#![allow(missing_docs)]
#![cfg(feature = "std")]

use std::io::{self, Write};

use fieldscan::{
    AppenderOptions, CharSink, CharSource, Error, IoSink, LineNormalizer, SinkAppender,
    Utf8Source, WriterOptions,
};

fn writer_options(line_separator: &str) -> WriterOptions {
    WriterOptions {
        line_separator: line_separator.into(),
        ..Default::default()
    }
}

/// Writes `rows` as delimited text, trimming each field and rewriting
/// embedded newlines.
fn write_rows<W: Write>(
    out: W,
    rows: &[&[&str]],
    options: AppenderOptions,
    line_separator: &str,
) -> Result<W, Error> {
    let mut appender = SinkAppender::new(IoSink::new(out), options, &writer_options(line_separator));
    for row in rows {
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                appender.sink_mut().write_chars(&[','])?;
            }
            for ch in field.chars() {
                appender.append_ignoring_whitespace(ch)?;
            }
            appender.write_chars_and_reset()?;
        }
        let separator = appender.line_separator().to_vec();
        appender.sink_mut().write_chars(&separator)?;
    }
    Ok(appender.into_sink().into_inner())
}

#[test]
fn rows_are_trimmed_and_newlines_denormalized() {
    let rows: &[&[&str]] = &[&["a  ", "multi\nline", " b"], &["", "ünïcode\t"]];
    let out = write_rows(
        Vec::new(),
        rows,
        AppenderOptions {
            capacity: 3,
            empty_value: Some("NULL".into()),
            ..Default::default()
        },
        "\r\n",
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "a,multi\r\nline, b\r\nNULL,ünïcode\r\n"
    );
}

#[test]
fn unset_empty_value_writes_nothing() {
    let rows: &[&[&str]] = &[&["", "   ", "x"]];
    let out = write_rows(Vec::new(), rows, AppenderOptions::default(), "\n").unwrap();
    assert_eq!(out, b",,x\n");
}

#[derive(Debug)]
struct FailAfter {
    remaining: usize,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining < buf.len() {
            return Err(io::Error::other("quota exhausted"));
        }
        self.remaining -= buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn writer_failures_surface_from_flushes() {
    let rows: &[&[&str]] = &[&["a long enough field to force a flush"]];
    let err = write_rows(
        FailAfter { remaining: 4 },
        rows,
        AppenderOptions {
            capacity: 8,
            ..Default::default()
        },
        "\n",
    )
    .unwrap_err();
    assert_eq!(err, Error::Sink("quota exhausted".into()));
}

#[test]
fn read_normalize_write_round_trip() {
    let input = "first line  \r\nsecond\r\n".as_bytes();
    let mut source = LineNormalizer::crlf(Utf8Source::with_capacity(5, input));
    let mut appender = SinkAppender::new(
        IoSink::new(Vec::new()),
        AppenderOptions {
            capacity: 4,
            ..Default::default()
        },
        &writer_options("\u{2028}"),
    );
    loop {
        match source.next_char() {
            Ok(ch) => appender.append_ignoring_whitespace(ch).unwrap(),
            Err(Error::EndOfInput) => break,
            Err(e) => panic!("{e}"),
        }
    }
    appender.write_chars_and_reset().unwrap();
    let out = appender.into_sink().into_inner();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "first line  \u{2028}second\u{2028}"
    );
}
