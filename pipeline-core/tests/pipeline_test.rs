use pattern_framework::{alpha, eoi, int, lit, none_of, Error, Pattern, Value};
use pipeline_core::{Pipeline, PipelineConfig, PipelineError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::{self, Read};

fn csv_row() -> Pattern {
    let field = int() | alpha().many1() | (lit('"') >> none_of("\"").many() >> '"');
    field.list(',') >> eoi()
}

#[test]
fn test_run_chunks() {
    let pipeline = Pipeline::new(csv_row(), PipelineConfig::default());
    let value = pipeline.run_chunks(["1,ab", "c,\"x", " y\",-", "4"]).unwrap();
    assert_eq!(
        value,
        Value::List(vec![
            Value::Int(1),
            Value::from("abc"),
            Value::from("x y"),
            Value::Int(-4),
        ])
    );
}

#[test]
fn test_run_reader_small_chunks() {
    let pipeline = Pipeline::new(csv_row(), PipelineConfig::with_chunk_size(1));
    let value = pipeline.run_reader("7,\"héllo\",z".as_bytes()).unwrap();
    assert_eq!(
        value,
        Value::List(vec![Value::Int(7), Value::from("héllo"), Value::from("z")])
    );
}

#[test]
fn test_no_match_surfaces_as_parse_error() {
    let pipeline = Pipeline::new(csv_row(), PipelineConfig::default());
    match pipeline.run_chunks(["1,2,"]) {
        Err(PipelineError::Parse(Error::NoMatch)) => {}
        other => panic!("expected no match, got {:?}", other),
    }
}

#[test]
fn test_invalid_utf8() {
    let pipeline = Pipeline::new(csv_row(), PipelineConfig::with_chunk_size(3));
    match pipeline.run_reader(&b"ab\xff"[..]) {
        Err(PipelineError::InvalidUtf8 { offset }) => assert_eq!(offset, 2),
        other => panic!("expected invalid UTF-8, got {:?}", other),
    }
}

/// Fails the test if read past the first `limit` bytes.
struct Guarded<'a> {
    data: &'a [u8],
    limit: usize,
    pos: usize,
}

impl Read for Guarded<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        assert!(self.pos < self.limit, "read past the decided prefix");
        let end = (self.pos + buf.len()).min(self.data.len());
        let n = end - self.pos;
        buf[..n].copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(n)
    }
}

#[test]
fn test_stops_reading_once_decided() {
    let pipeline = Pipeline::new(lit("ok") >> int(), PipelineConfig::with_chunk_size(4));
    let reader = Guarded {
        data: b"ok12;and then a lot more",
        limit: 8,
        pos: 0,
    };
    assert_eq!(pipeline.run_reader(reader).unwrap(), Value::Int(12));
}

#[test]
fn test_io_error_is_propagated() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }
    let pipeline = Pipeline::new(int(), PipelineConfig::default());
    assert!(matches!(pipeline.run_reader(Broken), Err(PipelineError::Io(_))));
}

#[test]
fn test_unbound_rule_is_reported_before_reading() {
    let rule = pattern_framework::Rule::new("row");
    let pipeline = Pipeline::new(rule.pattern(), PipelineConfig::default());
    assert!(matches!(
        pipeline.run_chunks(Vec::<String>::new()),
        Err(PipelineError::Parse(Error::UnboundRule { .. }))
    ));
}

proptest! {
    #[test]
    fn prop_chunk_size_does_not_change_result(chunk_size in 1usize..16) {
        let input = "12,\"ünïcödé\",word,-3";
        let whole = Pipeline::new(csv_row(), PipelineConfig::default())
            .run_reader(input.as_bytes())
            .unwrap();
        let pieces = Pipeline::new(csv_row(), PipelineConfig::with_chunk_size(chunk_size))
            .run_reader(input.as_bytes())
            .unwrap();
        prop_assert_eq!(whole, pieces);
    }
}

#[test]
fn test_config_is_clamped_and_kept() {
    let pipeline = Pipeline::new(int(), PipelineConfig::with_chunk_size(0));
    assert_eq!(pipeline.config().chunk_size, 1);
    assert_eq!(pipeline.run_reader("-15".as_bytes()).unwrap(), Value::Int(-15));
}
