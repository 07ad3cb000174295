use clam_ast::ast::Literal;
use clam_ast::op::BinOp;
use clam_bytecode::{Chunk, CompileError, LocalSlots, Opcode, Value, MAX_CONSTANTS};

#[test]
fn equal_constants_share_a_slot() {
    let mut chunk = Chunk::new();
    let a = chunk.add_constant(Value::Int(1)).unwrap();
    let b = chunk.add_constant(Value::Str("hi".into())).unwrap();
    let c = chunk.add_constant(Value::Int(1)).unwrap();
    let d = chunk.add_constant(Value::from(&Literal::Str("hi".into()))).unwrap();

    assert_eq!(a, c);
    assert_eq!(b, d);
    assert_eq!(chunk.constants.len(), 2);
}

#[test]
fn float_constants_deduplicate_by_bits() {
    let mut chunk = Chunk::new();
    let nan = chunk.add_constant(Value::Float(f64::NAN)).unwrap();
    assert_eq!(chunk.add_constant(Value::Float(f64::NAN)).unwrap(), nan);

    let zero = chunk.add_constant(Value::Float(0.0)).unwrap();
    let neg_zero = chunk.add_constant(Value::Float(-0.0)).unwrap();
    assert_ne!(zero, neg_zero);
}

#[test]
fn int_and_float_are_distinct_constants() {
    let mut chunk = Chunk::new();
    let i = chunk.add_constant(Value::Int(1)).unwrap();
    let f = chunk.add_constant(Value::Float(1.0)).unwrap();
    assert_ne!(i, f);
}

#[test]
fn constant_pool_is_bounded_to_sixteen_bits() {
    let mut chunk = Chunk::new();
    for n in 0..MAX_CONSTANTS {
        chunk.add_constant(Value::Int(n as i32)).expect("within bound");
    }
    assert_eq!(chunk.constants.len(), MAX_CONSTANTS);

    // Re-adding an existing value still succeeds.
    assert_eq!(chunk.add_constant(Value::Int(65_535)).unwrap(), 65_535);
    assert_eq!(
        chunk.add_constant(Value::Int(-1)),
        Err(CompileError::TooManyConstants)
    );
}

#[test]
fn emits_operator_words_with_ast_tags() {
    let mut chunk = Chunk::new();
    let idx = chunk.add_constant(Value::Int(2)).unwrap();
    chunk.emit(Opcode::Const);
    chunk.emit_operand(idx);
    chunk.emit(Opcode::from(BinOp::Mul));

    assert_eq!(chunk.code, vec![Opcode::Const.word(), 0, BinOp::Mul.tag() as u16]);
}

#[test]
fn locals_resolve_innermost_first() {
    let mut locals = LocalSlots::new();
    assert_eq!(locals.push("x").unwrap(), 0);
    assert_eq!(locals.push("y").unwrap(), 1);
    assert_eq!(locals.push("x").unwrap(), 2);

    assert_eq!(locals.resolve("x"), Some(2));
    assert_eq!(locals.resolve("y"), Some(1));
    assert_eq!(locals.resolve("z"), None);

    locals.pop(1);
    assert_eq!(locals.resolve("x"), Some(0));
    assert_eq!(locals.len(), 2);
}
