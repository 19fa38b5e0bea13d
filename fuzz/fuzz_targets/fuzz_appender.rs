#![no_main]
use arbitrary::Arbitrary;
use fieldscan::{
    AppenderOptions, BoundedAppender, Error, GrowableAppender, SinkAppender, WriterOptions,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Append(char),
    AppendWhitespace(char),
    AppendPadding(char, char),
    AppendWhitespaceOrPadding(char, char),
    AppendStr(String),
    Fill(char, u8),
    ResetWhitespaceCount,
    Extract,
    // Not mirrored by the sink appender: these edit content that may
    // already have been flushed.
    Prepend(char),
    Delete(u8),
    Remove(u8, u8),
    Ignore(u8),
    UpdateWhitespace,
    IndexOf(char, u8),
    SubSequence(u8, u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    empty_value: Option<String>,
    ops: Vec<Op>,
}

fn apply<P: fieldscan::Overflow>(
    appender: &mut fieldscan::Appender<P>,
    op: &Op,
) -> Result<Option<Option<String>>, Error> {
    match *op {
        Op::Append(ch) => appender.append(ch)?,
        Op::AppendWhitespace(ch) => appender.append_ignoring_whitespace(ch)?,
        Op::AppendPadding(ch, pad) => appender.append_ignoring_padding(ch, pad)?,
        Op::AppendWhitespaceOrPadding(ch, pad) => {
            appender.append_ignoring_whitespace_and_padding(ch, pad)?;
        }
        Op::AppendStr(ref s) => appender.append_str(s)?,
        Op::Fill(ch, n) => appender.fill(ch, usize::from(n))?,
        Op::ResetWhitespaceCount => appender.reset_whitespace_count(),
        Op::Extract => return Ok(Some(appender.get_and_reset())),
        Op::Prepend(ch) => appender.prepend(ch)?,
        Op::Delete(n) => appender.delete(usize::from(n)),
        Op::Remove(start, count) => {
            let _ = appender.remove(usize::from(start), usize::from(count));
        }
        Op::Ignore(n) => appender.ignore(usize::from(n)),
        Op::UpdateWhitespace => appender.update_whitespace(),
        Op::IndexOf(ch, from) => {
            if let Some(i) = appender.index_of(ch, usize::from(from)) {
                assert_eq!(appender.char_at(i), Ok(ch));
            }
        }
        Op::SubSequence(start, end) => {
            if let Ok(chars) = appender.sub_sequence(usize::from(start), usize::from(end)) {
                assert_eq!(chars.len(), usize::from(end - start));
            }
        }
    }
    Ok(None)
}

fn mirrored_by_sink(op: &Op) -> bool {
    matches!(
        op,
        Op::Append(_)
            | Op::AppendWhitespace(_)
            | Op::AppendPadding(..)
            | Op::AppendWhitespaceOrPadding(..)
            | Op::AppendStr(_)
            | Op::Fill(..)
            | Op::ResetWhitespaceCount
            | Op::Extract
    )
}

fn run(input: &Input) {
    let options = AppenderOptions {
        capacity: usize::from(input.capacity % 32),
        empty_value: input.empty_value.clone(),
        ..Default::default()
    };
    let mut bounded = BoundedAppender::new(options.clone());
    let mut growable = GrowableAppender::new(options.clone());

    for op in &input.ops {
        match apply(&mut bounded, op) {
            Ok(_) | Err(Error::CapacityExceeded { .. }) => {}
            Err(e) => panic!("bounded appender failed with {e}"),
        }
        apply(&mut growable, op).unwrap();
        bounded.assert_invariants();
        growable.assert_invariants();
    }

    // Streaming through the sink must produce exactly what the growable
    // appender extracts, as long as nothing edits flushed content.
    let writer = WriterOptions {
        denormalize_line_endings: false,
        ..Default::default()
    };
    let mut sink = SinkAppender::new(String::new(), options.clone(), &writer);
    let mut reference = GrowableAppender::new(options);
    let mut expected = String::new();
    for op in input.ops.iter().filter(|op| mirrored_by_sink(op)) {
        if let Op::Extract = op {
            sink.write_chars_and_reset().unwrap();
            if let Some(value) = reference.get_and_reset() {
                expected.push_str(&value);
            }
        } else {
            apply(&mut sink, op).unwrap();
            apply(&mut reference, op).unwrap();
        }
        sink.assert_invariants();
    }
    assert_eq!(sink.sink(), &expected);
}

fuzz_target!(|input: Input| run(&input));
