#![allow(missing_docs)]
use fieldscan::{
    AppenderOptions, BoundedAppender, Error, LineNormalizer, LookaheadReader, ReaderOptions,
    StrSource,
};
use rstest::rstest;

type Reader<'a> = LookaheadReader<LineNormalizer<StrSource<'a>>>;

fn reader(text: &str) -> Reader<'_> {
    reader_with_range(text, -1)
}

fn reader_with_range(text: &str, whitespace_range_start: i32) -> Reader<'_> {
    LookaheadReader::new(
        LineNormalizer::new(StrSource::new(text), '\n', Some('\r'), '\n'),
        ReaderOptions {
            whitespace_range_start,
            ..Default::default()
        },
    )
}

#[rstest]
#[case::first_two("ajax", 3, &['a', 'j'], '?', true)]
#[case::nul_current("\0jax", 2, &['\0', 'j'], '?', true)]
#[case::newline_current("\njax", 2, &['\n', 'j'], '?', true)]
#[case::single("ajax", 1, &['a'], '?', true)]
#[case::nul_wildcard("a\0ax", 2, &['a', '\0'], '\0', true)]
#[case::newline_wildcard("a\nax", 2, &['a', '\n'], '\n', true)]
#[case::exact_window("ajax", 2, &['a', 'j'], '?', true)]
#[case::all_wildcards("ajax", 3, &['?', '?'], '?', true)]
#[case::second_mismatch("ajax", 3, &['a', 'x'], '?', false)]
#[case::longer_than_input("ajax", 6, &['a', 'j', 'a', 'x', 'o', 'k'], '?', false)]
#[case::first_mismatch("bjax", 6, &['a', 'j', 'a', 'x', 'o', 'k'], '?', false)]
#[case::first_mismatch_other_wildcard("ajax", 6, &['\n', 'j', 'a', 'x', 'o', 'k'], '\0', false)]
fn matches_from_current(
    #[case] input: &str,
    #[case] lookahead: usize,
    #[case] sequence: &[char],
    #[case] wildcard: char,
    #[case] expected: bool,
) {
    let mut r = reader(input);
    let current = r.next_char().unwrap();
    r.lookahead(lookahead).unwrap();
    assert_eq!(r.matches_current(current, sequence, wildcard), Ok(expected));
}

#[rstest]
#[case::prefix(4, &['a'], true)]
#[case::prefix_with_wildcards(4, &['a', '?', '?'], true)]
#[case::prefix_partial(4, &['a', '?', 'x'], false)]
#[case::prefix_mismatch(4, &['x', 'y', 'z'], false)]
#[case::full(4, &['a', 'j', 'a', 'x'], true)]
#[case::full_with_wildcards(4, &['a', '?', '?', 'x'], true)]
#[case::full_partial(4, &['a', '?', 'x', 'x'], false)]
#[case::full_mismatch(4, &['x', 'y', 'z', 'a'], false)]
#[case::past_window(2, &['a', '?', 'a', 'x'], false)]
#[case::past_window_mismatch(2, &['x', 'y', 'z', 'a'], false)]
#[case::wildcards_past_window(2, &['a', 'j', '?', '?', '?'], true)]
fn matches_window(#[case] lookahead: usize, #[case] sequence: &[char], #[case] expected: bool) {
    let mut r = reader("ajax");
    r.lookahead(lookahead).unwrap();
    assert_eq!(r.matches(sequence, '?'), Ok(expected));
}

#[test]
fn empty_sequence_is_rejected() {
    let mut r = reader("ajax");
    let current = r.next_char().unwrap();
    r.lookahead(1).unwrap();
    assert_eq!(r.matches_current(current, &[], '?'), Err(Error::EmptySequence));
    assert_eq!(r.matches(&[], '?'), Err(Error::EmptySequence));
}

#[rstest]
#[case::start(1, 'a')]
#[case::middle(2, 'j')]
#[case::end(4, 'x')]
fn reads_through_the_window(#[case] reads: usize, #[case] expected: char) {
    let mut r = reader("ajax");
    r.lookahead(4).unwrap();
    let mut last = None;
    for _ in 0..reads {
        last = Some(r.next_char().unwrap());
    }
    assert_eq!(last, Some(expected));
    assert_eq!(r.current(), Some(expected));
}

#[test]
fn reading_past_the_window_and_input_fails() {
    let mut r = reader("ajax");
    r.lookahead(4).unwrap();
    for _ in 0..4 {
        r.next_char().unwrap();
    }
    assert_eq!(r.next_char(), Err(Error::EndOfInput));
}

#[rstest]
#[case::nothing("", 0, "")]
#[case::partial("ajax", 2, "aj")]
#[case::exact("ajax", 4, "ajax")]
#[case::past_the_end("ajax", 6, "ajax")]
fn lookahead_text(#[case] input: &str, #[case] count: usize, #[case] expected: &str) {
    let mut r = reader(input);
    r.lookahead(count).unwrap();
    assert_eq!(r.lookahead_text(), expected);
}

#[test]
fn lookahead_sees_normalized_newlines() {
    let mut r = reader("a\n\rb");
    r.lookahead(3).unwrap();
    assert_eq!(r.lookahead_text(), "a\nb");
}

#[rstest]
#[case::leading_space(" ajax", ' ', '\0', '\0', 'a')]
#[case::stops_at_newline(" \najax", ' ', '\0', '\n', '\n')]
#[case::nothing_to_skip("ajax", ' ', '\0', '\0', 'a')]
fn skip_whitespace(
    #[case] input: &str,
    #[case] whitespace: char,
    #[case] escape: char,
    #[case] newline: char,
    #[case] expected: char,
) {
    let mut r = reader(input);
    r.lookahead(input.len()).unwrap();
    assert_eq!(r.skip_whitespace(whitespace, escape, newline), Ok(expected));
}

#[test]
fn skip_whitespace_stops_at_escape() {
    let mut r = reader(" \n\tajax");
    r.lookahead(7).unwrap();
    assert_eq!(r.skip_whitespace(' ', '\t', '\n'), Ok('\n'));
    assert_eq!(r.skip_whitespace(' ', '\t', '\n'), Ok('\t'));
    assert_eq!(r.next_char(), Ok('a'));
}

#[test]
fn skip_whitespace_respects_range_start() {
    let mut r = reader_with_range(" ajax", 32);
    r.lookahead(5).unwrap();
    assert_eq!(r.skip_whitespace(' ', '\0', '\0'), Ok(' '));
    assert_eq!(r.next_char(), Ok('a'));
}

#[rstest]
#[case::stops_at_default_newline("\n\nx", '\n', '\n', Ok('\n'), '\n')]
#[case::skips_newline_when_another_is_configured("\n\nx|", '\n', '|', Ok('x'), '|')]
#[case::stops_at_custom_newline("||x", '|', '|', Ok('|'), '|')]
#[case::ordinary_whitespace("  x", ' ', '|', Ok('x'), '\0')]
fn skip_line_whitespace_uses_configured_newline(
    #[case] input: &str,
    #[case] whitespace: char,
    #[case] normalized_newline: char,
    #[case] expected: Result<char, Error>,
    #[case] following: char,
) {
    let mut r = LookaheadReader::new(
        StrSource::new(input),
        ReaderOptions {
            normalized_newline,
            ..Default::default()
        },
    );
    assert_eq!(r.skip_line_whitespace(whitespace, '\0'), expected);
    match r.next_char() {
        Ok(ch) => assert_eq!(ch, following),
        Err(e) => assert_eq!((e, following), (Error::EndOfInput, '\0')),
    }
}

#[test]
fn skip_whitespace_at_end_of_input() {
    let mut r = reader("   ");
    r.lookahead(3).unwrap();
    assert_eq!(r.skip_whitespace(' ', '\0', '\0'), Err(Error::EndOfInput));
    assert_eq!(r.next_char(), Err(Error::EndOfInput));
}

#[test]
fn window_follows_reads() {
    let mut r = reader("abcdefgh");
    assert_eq!(r.next_char(), Ok('a'));

    r.lookahead(1).unwrap();
    r.lookahead(1).unwrap();
    assert_eq!(r.matches(&['b', 'c'], '?'), Ok(true));
    assert_eq!(r.matches(&['b'], '?'), Ok(true));
    assert_eq!(r.matches(&['c'], '?'), Ok(false));
    assert_eq!(r.matches(&['a', 'b'], '?'), Ok(false));
    assert_eq!(r.matches(&['c', 'd'], '?'), Ok(false));

    assert_eq!(r.next_char(), Ok('b'));
    assert_eq!(r.matches(&['b'], '?'), Ok(false));
    assert_eq!(r.matches(&['c'], '?'), Ok(true));
    assert_eq!(r.next_char(), Ok('c'));
    assert_eq!(r.matches(&['c'], '?'), Ok(false));
    assert_eq!(r.matches(&['d'], '?'), Ok(false));
    assert_eq!(r.next_char(), Ok('d'));
    assert_eq!(r.next_char(), Ok('e'));

    r.lookahead(5).unwrap();
    assert_eq!(r.matches(&['f', 'g', 'h'], '?'), Ok(true));
    assert_eq!(r.matches(&['f', 'g'], '?'), Ok(true));
    assert_eq!(r.matches(&['f'], '?'), Ok(true));

    assert_eq!(r.next_char(), Ok('f'));
    assert_eq!(r.next_char(), Ok('g'));
    assert_eq!(r.matches(&['h'], '?'), Ok(true));
    assert_eq!(r.next_char(), Ok('h'));
    assert_eq!(r.matches(&['f'], '?'), Ok(false));
    assert_eq!(r.next_char(), Err(Error::EndOfInput));
}

/// A field parser in miniature: a two-character delimiter recognized through
/// the window, trailing whitespace dropped by the appender.
#[test]
fn splits_fields_on_a_multi_character_delimiter() {
    let mut r = reader("one  ::two::  three ");
    let mut field = BoundedAppender::new(AppenderOptions {
        capacity: 16,
        ..Default::default()
    });
    let mut fields = Vec::new();

    loop {
        let ch = match r.next_char() {
            Ok(ch) => ch,
            Err(Error::EndOfInput) => break,
            Err(e) => panic!("{e}"),
        };
        r.lookahead(1).unwrap();
        if r.matches_current(ch, &[':', ':'], '\0').unwrap() {
            r.next_char().unwrap();
            fields.push(field.get_and_reset().unwrap_or_default());
            let first = match r.skip_whitespace(' ', '\0', '\n') {
                Ok(first) => first,
                Err(Error::EndOfInput) => break,
                Err(e) => panic!("{e}"),
            };
            field.append_ignoring_whitespace(first).unwrap();
        } else {
            field.append_ignoring_whitespace(ch).unwrap();
        }
    }
    fields.push(field.get_and_reset().unwrap_or_default());

    assert_eq!(fields, ["one", "two", "three"]);
}
