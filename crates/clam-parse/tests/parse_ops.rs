// Integration tests live outside the crate root, so we import from the public API.
use clam_ast::ast::{Literal, NodeKind};
use clam_ast::op::BinOp;
use clam_parse::parse_str;

fn sexpr(src: &str) -> String {
    let (ast, root) = parse_str(src).expect("parse ok");
    ast.sexpr(root).to_string()
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let (ast, root) = parse_str("1 + 2 * 3").expect("parse ok");

    let NodeKind::BinaryOp {
        op: BinOp::Add,
        lhs,
        rhs,
        ..
    } = &ast[root].kind
    else {
        panic!("top should be Add");
    };
    assert!(matches!(ast[*lhs].kind, NodeKind::Literal(Literal::Int(1))));

    let NodeKind::BinaryOp {
        op: BinOp::Mul,
        lhs,
        rhs,
        ..
    } = &ast[*rhs].kind
    else {
        panic!("rhs should be Mul");
    };
    assert!(matches!(ast[*lhs].kind, NodeKind::Literal(Literal::Int(2))));
    assert!(matches!(ast[*rhs].kind, NodeKind::Literal(Literal::Int(3))));
}

#[test]
fn subtraction_is_left_associative() {
    let (ast, root) = parse_str("1 - 2 - 3").expect("parse ok");

    let NodeKind::BinaryOp {
        op: BinOp::Sub,
        lhs,
        rhs,
        ..
    } = &ast[root].kind
    else {
        panic!("top should be Sub");
    };
    assert!(matches!(
        ast[*lhs].kind,
        NodeKind::BinaryOp { op: BinOp::Sub, .. }
    ));
    assert!(matches!(ast[*rhs].kind, NodeKind::Literal(Literal::Int(3))));
}

#[test]
fn application_binds_tighter_than_infix() {
    assert_eq!(sexpr("f x + 1"), "(+ (app f x) 1)");
    assert_eq!(sexpr("1 + f x"), "(+ 1 (app f x))");
}

#[test]
fn precedence_layers_or_and_cmp_add_mul() {
    assert_eq!(
        sexpr("1 + 2 * 3 == 7 and 4 < 5 or 0 == 1"),
        "(or (and (== (+ 1 (* 2 3)) 7) (< 4 5)) (== 0 1))"
    );
}

#[test]
fn every_binary_operator_parses() {
    for op in BinOp::ALL {
        let src = format!("a {} b", op.as_str());
        assert_eq!(sexpr(&src), format!("({} a b)", op.as_str()), "{src}");
    }
}
