use pattern_framework::{
    any, char_, digit, eoi, fail, int, int_with, lit, none_of, one_of, parse, parse_prefix, pass,
    range, symbol, uint, CharSet, Error, IntSpec, Value,
};
use pretty_assertions::assert_eq;

#[test]
fn test_char_class_matches_one_char() {
    assert_eq!(parse(&any(), "xy").unwrap(), Value::Char('x'));
    assert_eq!(parse(&char_('a'), "abc").unwrap(), Value::Char('a'));
    assert_eq!(parse(&char_('a'), "bc"), Err(Error::NoMatch));
    assert_eq!(parse(&any(), ""), Err(Error::NoMatch));
}

#[test]
fn test_char_class_sets() {
    assert_eq!(parse(&range('a', 'f'), "c").unwrap(), Value::Char('c'));
    assert_eq!(parse(&one_of("+-"), "-").unwrap(), Value::Char('-'));
    assert_eq!(parse(&none_of("+-"), "-"), Err(Error::NoMatch));

    let ident = CharSet::Range('a', 'z') | CharSet::Single('_');
    assert!(ident.contains('_'));
    assert!(!(!ident).contains('q'));
}

#[test]
fn test_literal_consumes_exact_text() {
    let (value, rest) = parse_prefix(&lit("let"), "let x").unwrap();
    assert_eq!(value, Value::Nil);
    assert_eq!(rest, " x");
    assert_eq!(parse(&lit("let"), "lex"), Err(Error::NoMatch));
    assert_eq!(parse(&lit("let"), "le"), Err(Error::NoMatch));
}

#[test]
fn test_literal_multibyte() {
    let (_, rest) = parse_prefix(&lit("λx"), "λx.x").unwrap();
    assert_eq!(rest, ".x");
}

#[test]
fn test_int_signed_stops_before_non_digit() {
    let (value, rest) = parse_prefix(&int(), "-123abc").unwrap();
    assert_eq!(value, Value::Int(-123));
    assert_eq!(rest, "abc");
}

#[test]
fn test_int_plus_sign_and_bare_sign() {
    assert_eq!(parse(&int(), "+7").unwrap(), Value::Int(7));
    assert_eq!(parse(&int(), "-x"), Err(Error::NoMatch));
    assert_eq!(parse(&int(), "-"), Err(Error::NoMatch));
}

#[test]
fn test_uint_rejects_sign() {
    assert_eq!(parse(&uint(), "-5"), Err(Error::NoMatch));
    assert_eq!(parse(&uint(), "42").unwrap(), Value::Int(42));
}

#[test]
fn test_int_sign_only_before_first_digit() {
    let (value, rest) = parse_prefix(&int(), "12-3").unwrap();
    assert_eq!(value, Value::Int(12));
    assert_eq!(rest, "-3");
}

#[test]
fn test_int_limits() {
    assert_eq!(
        parse(&int(), "9223372036854775807").unwrap(),
        Value::Int(i64::MAX)
    );
    assert_eq!(
        parse(&int(), "-9223372036854775808").unwrap(),
        Value::Int(i64::MIN)
    );
    assert_eq!(parse(&int(), "9223372036854775808"), Err(Error::NoMatch));
    assert_eq!(parse(&int(), "123456789012345678901234"), Err(Error::NoMatch));
}

#[test]
fn test_int_digit_bounds() {
    let two_digits = int_with(IntSpec {
        base: 10,
        min_digits: 2,
        max_digits: 2,
        signed: false,
    });
    let (value, rest) = parse_prefix(&two_digits, "1234").unwrap();
    assert_eq!(value, Value::Int(12));
    assert_eq!(rest, "34");
    assert_eq!(parse(&two_digits, "1"), Err(Error::NoMatch));
}

#[test]
fn test_int_hexadecimal() {
    let hex = int_with(IntSpec {
        base: 16,
        ..IntSpec::decimal(false)
    });
    assert_eq!(parse(&hex, "ff").unwrap(), Value::Int(255));
    assert_eq!(parse(&hex, "1A2g").unwrap(), Value::Int(0x1a2));
}

#[test]
#[should_panic(expected = "integer base")]
fn test_int_invalid_base_panics() {
    int_with(IntSpec {
        base: 1,
        ..IntSpec::decimal(false)
    });
}

#[test]
#[should_panic(expected = "digit bounds are inverted")]
fn test_int_inverted_digit_bounds_panics() {
    int_with(IntSpec {
        base: 10,
        min_digits: 3,
        max_digits: 2,
        signed: false,
    });
}

#[test]
#[should_panic(expected = "repeat bounds are inverted")]
fn test_repeat_inverted_bounds_panics() {
    char_('a').repeat(3, 2);
}

#[test]
fn test_symbol_longest_match() {
    let sym = symbol([("a", 1), ("ab", 3)]).unwrap();
    let (value, rest) = parse_prefix(&sym, "abz").unwrap();
    assert_eq!(value, Value::Int(3));
    assert_eq!(rest, "z");
}

#[test]
fn test_symbol_backtracks_to_best_match() {
    let sym = symbol([("a", 1), ("abc", 3)]).unwrap();
    let (value, rest) = parse_prefix(&sym, "abz").unwrap();
    assert_eq!(value, Value::Int(1));
    assert_eq!(rest, "bz");
}

#[test]
fn test_symbol_without_match_fails() {
    let sym = symbol([("if", 1), ("in", 2)]).unwrap();
    assert_eq!(parse(&sym, "ix"), Err(Error::NoMatch));
    assert_eq!(parse(&sym, "i"), Err(Error::NoMatch));
}

#[test]
fn test_symbol_duplicate_keys_keep_last() {
    let sym = symbol([("k", "first"), ("k", "second")]).unwrap();
    assert_eq!(parse(&sym, "k").unwrap(), Value::from("second"));
}

#[test]
fn test_symbol_empty_key_rejected() {
    assert_eq!(symbol([("", 0)]).unwrap_err(), Error::EmptySymbol);
}

#[test]
fn test_eoi_pass_fail() {
    assert!(parse(&eoi(), "").is_ok());
    assert_eq!(parse(&eoi(), "x"), Err(Error::NoMatch));
    assert_eq!(parse(&pass(), "x").unwrap(), Value::Nil);
    assert_eq!(parse(&fail(), "x"), Err(Error::NoMatch));
}

#[test]
fn test_digit_helper() {
    let (value, rest) = parse_prefix(&digit().many1(), "2024a").unwrap();
    assert_eq!(value, Value::from("2024"));
    assert_eq!(rest, "a");
}
