//! Trace Parsing Tests.

use std::io::{Cursor, Write};

use plru_core::common::error::TraceError;
use plru_core::sim::trace;
use rstest::rstest;

#[rstest]
#[case("0x40", Some(0x40))]
#[case("0X40", Some(0x40))]
#[case("64", Some(64))]
#[case("  0xface_00a0_0000_0000  ", Some(0xFACE_00A0_0000_0000))]
#[case("0x10 # trailing comment", Some(0x10))]
#[case("", None)]
#[case("   ", None)]
#[case("# only a comment", None)]
fn parses_line(#[case] line: &str, #[case] expected: Option<u64>) {
    assert_eq!(trace::parse_line(line, 1).unwrap(), expected);
}

#[rstest]
#[case("0x")]
#[case("0xZZ")]
#[case("twelve")]
#[case("-4")]
#[case("0x1_0000_0000_0000_0000")]
fn rejects_line(#[case] line: &str) {
    match trace::parse_line(line, 7) {
        Err(TraceError::Parse { line: 7, text }) => assert_eq!(text, line.trim()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn parses_multi_line_trace() {
    let text = "# header\n0x0\n\n0x40\n128 # third\n";
    let addrs = trace::parse(Cursor::new(text)).unwrap();
    assert_eq!(addrs, vec![0x0, 0x40, 128]);
}

#[test]
fn reports_line_number_of_first_bad_line() {
    let text = "0x0\n# fine\nbogus\nalso bogus\n";
    let err = trace::parse(Cursor::new(text)).unwrap_err();
    assert_eq!(err.to_string(), "line 3: cannot parse address \"bogus\"");
}

#[test]
fn loads_trace_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "0x1000").unwrap();
    writeln!(file, "0x1004").unwrap();
    assert_eq!(trace::load(file.path()).unwrap(), vec![0x1000, 0x1004]);
}

#[test]
fn missing_trace_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        trace::load(dir.path().join("absent.txt")),
        Err(TraceError::Io(_))
    ));
}
