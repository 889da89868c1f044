use pattern_framework::{
    alpha, alt, any, char_, digit, int, lit, none_of, parse, parse_into, parse_prefix, seq,
    symbol, Error, Value,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_sequence_into_tuple() {
    let pair = int() >> '-' >> int();
    assert_eq!(parse_into::<(i64, i64)>(&pair, "12-34").unwrap(), (12, 34));
    assert_eq!(parse(&pair, "12x34"), Err(Error::NoMatch));
}

#[test]
fn test_sequence_single_valued_child_is_unwrapped() {
    let quoted = lit('"') >> none_of("\"").many() >> '"';
    assert_eq!(parse(&quoted, "\"hi there\"").unwrap(), Value::from("hi there"));
    assert_eq!(parse(&(lit('a') >> 'b'), "ab").unwrap(), Value::Nil);
}

#[test]
fn test_seq_function_matches_operator() {
    let built = seq([int(), lit(','), int()]);
    assert_eq!(
        parse(&built, "3,4").unwrap(),
        parse(&(int() >> ',' >> int()), "3,4").unwrap()
    );
}

#[test]
fn test_alternative_rolls_back_failed_branch() {
    let pattern = (lit("ab") >> 'c') | (lit("ab") >> 'd');
    let (_, rest) = parse_prefix(&pattern, "abd!").unwrap();
    assert_eq!(rest, "!");
}

#[test]
fn test_alternative_takes_first_match() {
    let keyword = alt([lit("in").map(|_| Value::from("in")), alpha().many1()]);
    assert_eq!(parse(&keyword, "inside").unwrap(), Value::from("in"));
    assert_eq!(parse(&keyword, "out").unwrap(), Value::from("out"));
}

#[test]
fn test_alternative_all_fail_restores_position() {
    let pattern = (lit("ab") | lit("ac")).opt() >> any();
    assert_eq!(parse(&pattern, "ax").unwrap(), Value::Char('a'));
}

#[test]
fn test_repeat_bounds() {
    let two_or_three = digit().repeat(2, 3);
    assert_eq!(parse(&two_or_three, "1").unwrap_err(), Error::NoMatch);
    assert_eq!(parse(&two_or_three, "12").unwrap(), Value::from("12"));
    let (value, rest) = parse_prefix(&two_or_three, "12345").unwrap();
    assert_eq!(value, Value::from("123"));
    assert_eq!(rest, "45");
}

#[test]
fn test_repeat_failure_rolls_back_whole_repeat() {
    let pattern = (lit('a') >> 'b').repeat(2, 0).discard() | lit("ab");
    let (_, rest) = parse_prefix(&pattern, "abax").unwrap();
    assert_eq!(rest, "ax");
}

#[test]
fn test_repeat_of_ints_is_list() {
    let pattern = (int() >> lit(';')).many();
    assert_eq!(
        parse(&pattern, "1;2;3;").unwrap(),
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn test_repeat_stops_on_empty_match() {
    let pattern = char_('x').opt().many();
    let (value, rest) = parse_prefix(&pattern, "xxy").unwrap();
    assert_eq!(value, Value::from("xx"));
    assert_eq!(rest, "y");
}

#[test]
fn test_list_of_ints() {
    let pattern = int().list(',');
    assert_eq!(
        parse_into::<Vec<i64>>(&pattern, "1,5,12,125").unwrap(),
        vec![1, 5, 12, 125]
    );
}

#[test]
fn test_list_rolls_back_dangling_separator() {
    let pattern = int().list(',');
    let (value, rest) = parse_prefix(&pattern, "1,2,x").unwrap();
    assert_eq!(value, Value::List(vec![Value::Int(1), Value::Int(2)]));
    assert_eq!(rest, ",x");
}

#[test]
fn test_list_empty_when_first_operand_fails() {
    let (value, rest) = parse_prefix(&int().list(','), "x").unwrap();
    assert_eq!(value, Value::List(Vec::new()));
    assert_eq!(rest, "x");
}

#[test]
fn test_optional() {
    let signed = char_('-').opt() >> lit("1");
    assert_eq!(parse(&signed, "-1").unwrap(), Value::Char('-'));
    assert_eq!(parse(&signed, "1").unwrap(), Value::Nil);
    assert_eq!(parse_into::<Option<char>>(&signed, "1").unwrap(), None);
}

#[test]
fn test_except_rejects_excluded() {
    let ident = alpha().many1().except(lit("let") >> !alpha());
    assert_eq!(parse(&ident, "letter").unwrap(), Value::from("letter"));
    assert_eq!(parse(&ident, "let x"), Err(Error::NoMatch));
}

#[test]
fn test_not_never_consumes() {
    let pattern = !lit("--") >> any();
    assert_eq!(parse(&pattern, "-x").unwrap(), Value::Char('-'));
    assert_eq!(parse(&pattern, "--"), Err(Error::NoMatch));
}

#[test]
fn test_discard_drops_value() {
    let pattern = int().discard() >> ':' >> int();
    assert_eq!(parse(&pattern, "1:2").unwrap(), Value::Int(2));
}

#[test]
fn test_map_replaces_value() {
    let doubled = int().map(|v| Value::Int(v.as_int().unwrap_or(0) * 2));
    assert_eq!(parse(&doubled, "21").unwrap(), Value::Int(42));
}

#[test]
fn test_tap_observes_and_is_silent() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let pattern = int()
        .tap(move |v| sink.borrow_mut().push(v.clone()))
        .list(',');
    assert_eq!(parse(&pattern, "4,5").unwrap(), Value::Nil);
    assert_eq!(*seen.borrow(), vec![Value::Int(4), Value::Int(5)]);
}

#[test]
fn test_symbol_in_sequence() {
    let op = symbol([("+", 1), ("++", 2)]).unwrap();
    let pattern = int() >> op >> int();
    assert_eq!(
        parse_into::<(i64, i64, i64)>(&pattern, "1++2").unwrap(),
        (1, 2, 2)
    );
}

#[test]
fn test_shape_mismatch() {
    assert_eq!(
        parse_into::<char>(&int(), "7").unwrap_err(),
        Error::ShapeMismatch {
            expected: "char",
            found: "int"
        }
    );
}

proptest! {
    #[test]
    fn prop_repeat_boundary_law(k in 0usize..8, min in 0usize..6, max in 0usize..6) {
        prop_assume!(max == 0 || max >= min);
        let input = format!("{}x", "a".repeat(k));
        let result = parse(&char_('a').repeat(min, max), &input);
        if k < min {
            prop_assert_eq!(result, Err(Error::NoMatch));
        } else {
            let expected = if max != 0 { k.min(max) } else { k };
            prop_assert_eq!(result, Ok(Value::Str("a".repeat(expected))));
        }
    }
}

#[test]
fn test_value_accessors() {
    let pattern = any() >> char_('=').opt() >> int().list(',');
    let value = parse(&pattern, "k1,2").unwrap();
    let parts = value.as_slice().unwrap();
    assert_eq!(parts[0].as_char(), Some('k'));
    assert!(parts[1].is_nil());
    assert_eq!(
        parts[2].as_slice().map(|items| items.len()),
        Some(2)
    );
    assert_eq!(Value::Int(3).as_char(), None);
}
