use clam_ast::op::{BinOp, UnOp};
use serde::Serialize;

macro_rules! define_opcodes {
    (
        binary { $($bin:ident = $bin_tag:literal => $bin_text:literal,)* }
        unary { $($un:ident = $un_tag:literal => $un_text:literal,)* }
    ) => {
        /// One instruction word. Operator opcodes share their tag with the
        /// AST operator they lower from.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        #[repr(u8)]
        pub enum Opcode {
            /// Push a constant; operand is the pool index.
            Const,
            /// Bind the top of the stack to the next local slot.
            Bind,
            /// Push a local; operand is the slot.
            Get,
            /// Print the top of the stack, leaving it in place.
            Print,
            /// Pop a condition and jump if it is true.
            JumpIf,
            Jump,
            Call,
            Ret,
            $($bin = BinOp::$bin as u8,)*
            $($un = UnOp::$un as u8,)*
        }

        impl From<BinOp> for Opcode {
            fn from(op: BinOp) -> Self {
                match op {
                    $(BinOp::$bin => Opcode::$bin,)*
                }
            }
        }

        impl From<UnOp> for Opcode {
            fn from(op: UnOp) -> Self {
                match op {
                    $(UnOp::$un => Opcode::$un,)*
                }
            }
        }

        impl TryFrom<u16> for Opcode {
            type Error = u16;

            fn try_from(word: u16) -> Result<Self, u16> {
                const FIXED: [Opcode; 8] = [
                    Opcode::Const,
                    Opcode::Bind,
                    Opcode::Get,
                    Opcode::Print,
                    Opcode::JumpIf,
                    Opcode::Jump,
                    Opcode::Call,
                    Opcode::Ret,
                ];
                if let Some(op) = FIXED.iter().find(|op| **op as u16 == word) {
                    return Ok(*op);
                }
                $(if word == Opcode::$bin as u16 {
                    return Ok(Opcode::$bin);
                })*
                $(if word == Opcode::$un as u16 {
                    return Ok(Opcode::$un);
                })*
                Err(word)
            }
        }
    };
}

clam_ast::for_each_operator!(define_opcodes);

impl Opcode {
    pub fn word(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_opcodes_share_ast_tags() {
        for &op in BinOp::ALL {
            assert_eq!(Opcode::from(op) as u8, op.tag(), "{op:?}");
        }
        for &op in UnOp::ALL {
            assert_eq!(Opcode::from(op) as u8, op.tag(), "{op:?}");
        }
    }

    #[test]
    fn decodes_every_word_it_encodes() {
        let mut ops = vec![Opcode::Const, Opcode::Get, Opcode::Ret];
        ops.extend(BinOp::ALL.iter().map(|&op| Opcode::from(op)));
        ops.extend(UnOp::ALL.iter().map(|&op| Opcode::from(op)));
        for op in ops {
            assert_eq!(Opcode::try_from(op.word()), Ok(op));
        }
        assert_eq!(Opcode::try_from(999), Err(999));
    }
}
