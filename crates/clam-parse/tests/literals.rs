use clam_ast::ast::{Literal, NodeKind};
use clam_parse::parse_str;

fn literal(src: &str) -> Literal {
    let (ast, root) = parse_str(src).expect("parse ok");
    match &ast[root].kind {
        NodeKind::Literal(lit) => lit.clone(),
        other => panic!("expected literal, got {other:?}"),
    }
}

#[test]
fn keyword_literals() {
    assert_eq!(literal("unit"), Literal::Unit);
    assert_eq!(literal("true"), Literal::Bool(true));
    assert_eq!(literal("false"), Literal::Bool(false));
}

#[test]
fn integers() {
    assert_eq!(literal("0"), Literal::Int(0));
    assert_eq!(literal("007"), Literal::Int(7));
    assert_eq!(literal("2147483647"), Literal::Int(i32::MAX));
}

#[test]
fn integer_overflow_wraps() {
    assert_eq!(literal("2147483648"), Literal::Int(i32::MIN));
}

#[test]
fn floats() {
    assert_eq!(literal("3.5"), Literal::Float(3.5));
    assert_eq!(literal("0.25"), Literal::Float(0.25));
    assert_eq!(literal("12.0"), Literal::Float(12.0));
}

/// A minus sign is never part of a number token.
#[test]
fn negative_numbers_are_negations() {
    let (ast, root) = parse_str("-5").unwrap();
    assert_eq!(ast.sexpr(root).to_string(), "(- 5)");
}

#[test]
fn string_escapes_are_resolved() {
    // The source spells the escape with two characters; the value holds one.
    let src = r#""a\nb""#;
    assert_eq!(literal(src), Literal::Str("a\nb".into()));
    let Literal::Str(s) = literal(src) else {
        unreachable!()
    };
    assert_eq!(s.len(), 3);
}

#[test]
fn every_supported_escape() {
    assert_eq!(
        literal(r#""\n\r\t\0\"\\""#),
        Literal::Str("\n\r\t\0\"\\".into())
    );
}

#[test]
fn strings_may_span_lines_and_hold_unicode() {
    assert_eq!(literal("\"é\nλ\""), Literal::Str("é\nλ".into()));
    assert_eq!(literal(r#""""#), Literal::Str(String::new()));
}

#[test]
fn lists() {
    let sexpr = |src: &str| {
        let (ast, root) = parse_str(src).unwrap();
        ast.sexpr(root).to_string()
    };
    assert_eq!(sexpr("{}"), "(list)");
    assert_eq!(sexpr("{1, 2, 3}"), "(list 1 2 3)");
    assert_eq!(sexpr("{1, {2}, }"), "(list 1 (list 2))");
    assert_eq!(sexpr("{f x, -1}"), "(list (app f x) (- 1))");
}
