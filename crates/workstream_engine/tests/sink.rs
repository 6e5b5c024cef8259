use std::fmt::Write as _;
use std::thread;

use pretty_assertions::assert_eq;
use workstream_engine::OutputSink;

#[test]
fn snapshot_before_any_append_is_empty() {
    let sink = OutputSink::new();
    assert_eq!(sink.snapshot(), "");
    assert!(sink.is_empty());
}

#[test]
fn appends_accumulate_in_order() {
    let sink = OutputSink::new();
    sink.append("A");
    sink.append("");
    sink.append("BC");

    assert_eq!(sink.snapshot(), "ABC");
    assert_eq!(sink.len(), 3);
}

#[test]
fn clones_share_one_buffer() {
    let sink = OutputSink::new();
    let writer = sink.clone();
    writer.append("shared");

    assert_eq!(sink.snapshot(), "shared");
}

#[test]
fn snapshot_is_a_copy() {
    let sink = OutputSink::new();
    sink.append("one");
    let before = sink.snapshot();
    sink.append(" two");

    assert_eq!(before, "one");
    assert_eq!(sink.snapshot(), "one two");
}

#[test]
fn format_macros_write_whole_lines() {
    let sink = OutputSink::new();
    writeln!(sink, "step {} of {}", 1, 2);
    write!(sink, "plain");

    let mut owned = sink.clone();
    owned.write_str(" 42").unwrap();

    assert_eq!(sink.snapshot(), "step 1 of 2\nplain 42");
}

#[test]
fn fresh_sink_carries_nothing_from_another() {
    let first = OutputSink::new();
    first.append("previous run");

    let second = OutputSink::new();
    assert_eq!(second.snapshot(), "");
}

#[test]
fn concurrent_reads_never_see_partial_appends() {
    const CHUNK: usize = 64;
    const WRITES: usize = 500;

    let sink = OutputSink::new();
    let writer = {
        let sink = sink.clone();
        thread::spawn(move || {
            for i in 0..WRITES {
                let ch = char::from(b'a' + (i % 26) as u8);
                sink.append(&ch.to_string().repeat(CHUNK));
            }
        })
    };

    let reader = {
        let sink = sink.clone();
        thread::spawn(move || {
            let mut previous = String::new();
            for _ in 0..2_000 {
                let snapshot = sink.snapshot();
                assert_eq!(snapshot.len() % CHUNK, 0, "partial append observed");
                assert!(snapshot.starts_with(&previous), "snapshot was rewritten");
                for chunk in snapshot.as_bytes().chunks(CHUNK) {
                    assert!(chunk.iter().all(|b| *b == chunk[0]));
                }
                previous = snapshot;
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(sink.len(), CHUNK * WRITES);
}
