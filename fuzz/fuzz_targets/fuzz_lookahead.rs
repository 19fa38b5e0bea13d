#![no_main]
use arbitrary::Arbitrary;
use fieldscan::{CharSource, Error, LineNormalizer, LookaheadReader, ReaderOptions, StrSource};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Lookahead(u8),
    Next,
    Matches(Vec<char>, char),
    MatchesCurrent(Vec<char>, char),
    SkipWhitespace(char, char, char),
}

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    whitespace_range_start: i8,
    ops: Vec<Op>,
}

fn run(input: &Input) {
    // Reference stream: the same normalization, read straight through.
    let mut expected = Vec::new();
    let mut plain = LineNormalizer::crlf(StrSource::new(&input.text));
    while let Ok(ch) = plain.next_char() {
        expected.push(ch);
    }

    let mut reader = LookaheadReader::new(
        LineNormalizer::crlf(StrSource::new(&input.text)),
        ReaderOptions {
            whitespace_range_start: i32::from(input.whitespace_range_start),
            ..Default::default()
        },
    );
    let mut pos = 0;

    for op in &input.ops {
        match op {
            Op::Lookahead(n) => reader.lookahead(usize::from(*n % 16)).unwrap(),
            Op::Next => match reader.next_char() {
                Ok(ch) => {
                    assert_eq!(Some(&ch), expected.get(pos));
                    pos += 1;
                }
                Err(Error::EndOfInput) => assert_eq!(pos, expected.len()),
                Err(e) => panic!("{e}"),
            },
            Op::Matches(seq, wildcard) => {
                let result = reader.matches(seq, *wildcard);
                if seq.is_empty() {
                    assert_eq!(result, Err(Error::EmptySequence));
                } else if result.unwrap() {
                    for (i, c) in seq.iter().enumerate() {
                        assert!(c == wildcard || expected.get(pos + i) == Some(c));
                    }
                }
            }
            Op::MatchesCurrent(seq, wildcard) => {
                if let Some(current) = reader.current() {
                    let _ = reader.matches_current(current, seq, *wildcard);
                }
            }
            Op::SkipWhitespace(ws, escape, newline) => {
                match reader.skip_whitespace(*ws, *escape, *newline) {
                    Ok(ch) => {
                        let skipped = expected[pos..].iter().position(|&c| c == ch).unwrap();
                        pos += skipped + 1;
                    }
                    Err(Error::EndOfInput) => pos = expected.len(),
                    Err(e) => panic!("{e}"),
                }
            }
        }
        let window = reader.lookahead_text();
        let upcoming: String = expected[pos..].iter().take(window.chars().count()).collect();
        assert_eq!(window, upcoming);
    }
}

fuzz_target!(|input: Input| run(&input));
