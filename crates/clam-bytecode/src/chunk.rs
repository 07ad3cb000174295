use std::collections::HashMap;

use clam_ast::ast::Literal;
use serde::Serialize;

use crate::{CompileError, Opcode};

/// Constant pool indices are 16 bits wide.
pub const MAX_CONSTANTS: usize = 1 << 16;
/// Local slots are 16 bits wide.
pub const MAX_LOCALS: usize = 1 << 16;

/// A runtime value as stored in the constant pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

/// Hashable identity of a constant. Floats compare by bit pattern, so `NaN`
/// deduplicates and `0.0` stays distinct from `-0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ConstKey {
    Unit,
    Bool(bool),
    Int(i32),
    Float(u64),
    Str(String),
}

impl From<&Value> for ConstKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Unit => ConstKey::Unit,
            Value::Bool(b) => ConstKey::Bool(*b),
            Value::Int(n) => ConstKey::Int(*n),
            Value::Float(x) => ConstKey::Float(x.to_bits()),
            Value::Str(s) => ConstKey::Str(s.clone()),
        }
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Unit => Value::Unit,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(x) => Value::Float(*x),
            Literal::Str(s) => Value::Str(s.clone()),
        }
    }
}

/// The unit of compiled output handed to the VM.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Chunk {
    pub constants: Vec<Value>,
    pub code: Vec<u16>,
    #[serde(skip)]
    pool: HashMap<ConstKey, u16>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pool index of `value`, appending it only if no
    /// structurally equal constant is already present.
    pub fn add_constant(&mut self, value: Value) -> Result<u16, CompileError> {
        let key = ConstKey::from(&value);
        if let Some(&existing) = self.pool.get(&key) {
            return Ok(existing);
        }
        let index =
            u16::try_from(self.constants.len()).map_err(|_| CompileError::TooManyConstants)?;
        self.pool.insert(key, index);
        self.constants.push(value);
        Ok(index)
    }

    pub fn emit(&mut self, op: Opcode) {
        self.code.push(op.word());
    }

    pub fn emit_operand(&mut self, operand: u16) {
        self.code.push(operand);
    }
}

/// Local variables visible at one point of the lowering, innermost last.
#[derive(Debug, Default)]
pub struct LocalSlots<'src> {
    names: Vec<&'src str>,
}

impl<'src> LocalSlots<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings `name` into scope and returns its slot.
    pub fn push(&mut self, name: &'src str) -> Result<u16, CompileError> {
        let slot = u16::try_from(self.names.len()).map_err(|_| CompileError::TooManyLocals)?;
        self.names.push(name);
        Ok(slot)
    }

    /// Drops the `count` innermost bindings when leaving a `let` or `fun`.
    pub fn pop(&mut self, count: usize) {
        let keep = self.names.len().saturating_sub(count);
        self.names.truncate(keep);
    }

    /// Slot of the innermost binding named `name`.
    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.names
            .iter()
            .rposition(|n| *n == name)
            .and_then(|i| u16::try_from(i).ok())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
