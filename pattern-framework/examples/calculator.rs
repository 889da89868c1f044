//! Evaluates arithmetic expressions read from stdin, one per line.
//!
//! ```text
//! $ echo "2 * (3 + 4)" | cargo run --example calculator
//! 14
//! ```

use pattern_framework::{eoi, int, lit, one_of, parse_into, FromValue, Pattern, Rule, Value};
use std::io::{self, BufRead};

fn fold(value: Value) -> Value {
    let mut parts = value.into_items().into_iter();
    let mut acc = parts.next().and_then(|first| first.as_int()).unwrap_or(0);
    for step in parts.next().map(Value::into_items).unwrap_or_default() {
        let (op, rhs) = match <(char, i64)>::from_value(step) {
            Ok(step) => step,
            Err(_) => continue,
        };
        acc = match op {
            '+' => acc.wrapping_add(rhs),
            '-' => acc.wrapping_sub(rhs),
            '*' => acc.wrapping_mul(rhs),
            _ => acc.checked_div(rhs).unwrap_or(0),
        };
    }
    Value::Int(acc)
}

fn grammar(expr: &Rule, term: &Rule, factor: &Rule) -> pattern_framework::Result<Pattern> {
    factor.define(int() | (lit('(') >> expr.pattern() >> ')'))?;
    term.define((factor.pattern() >> (one_of("*/") >> factor.pattern()).many()).map(fold))?;
    expr.define((term.pattern() >> (one_of("+-") >> term.pattern()).many()).map(fold))?;
    Ok((expr.pattern() >> eoi()).skipping(' '))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (expr, term, factor) = (Rule::new("expr"), Rule::new("term"), Rule::new("factor"));
    let line_pattern = grammar(&expr, &term, &factor)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_into::<i64>(&line_pattern, &line) {
            Ok(result) => println!("{}", result),
            Err(err) => println!("error: {}", err),
        }
    }
    Ok(())
}
