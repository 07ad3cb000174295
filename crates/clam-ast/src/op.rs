//! Operator table shared by every stage of the pipeline.
//!
//! Each operator is declared exactly once in [`for_each_operator!`] together
//! with its numeric tag. `BinOp` and `UnOp` are generated here; the token
//! kinds in `clam-parse` and the opcodes in `clam-bytecode` take their tags
//! from these enums, so a later stage can reinterpret an operator tag from an
//! earlier one without a lookup table. Tags must stay unique across both
//! groups because opcodes share one enumeration.

use serde::Serialize;

/// Invokes `$callback!` with the full operator table.
///
/// The table has the shape
/// `binary { Name = tag => "text", ... } unary { Name = tag => "text", ... }`.
#[macro_export]
macro_rules! for_each_operator {
    ($callback:ident) => {
        $callback! {
            binary {
                Pipe = 32 => "|>",
                Append = 33 => "::",
                Add = 34 => "+",
                Sub = 35 => "-",
                Mul = 36 => "*",
                Div = 37 => "/",
                Mod = 38 => "%",
                Concat = 39 => "++",
                And = 40 => "and",
                Or = 41 => "or",
                Lt = 42 => "<",
                Le = 43 => "<=",
                Gt = 44 => ">",
                Ge = 45 => ">=",
                Eq = 46 => "==",
                Ne = 47 => "!=",
            }
            unary {
                Not = 48 => "not",
                Negate = 49 => "-",
            }
        }
    };
}

macro_rules! define_operators {
    (
        binary { $($bin:ident = $bin_tag:literal => $bin_text:literal,)* }
        unary { $($un:ident = $un_tag:literal => $un_text:literal,)* }
    ) => {
        /// Infix operator. The discriminant is the operator's pipeline tag.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        #[repr(u8)]
        pub enum BinOp {
            $($bin = $bin_tag,)*
        }

        impl BinOp {
            pub const ALL: &'static [BinOp] = &[$(BinOp::$bin,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(BinOp::$bin => $bin_text,)*
                }
            }

            pub fn tag(self) -> u8 {
                self as u8
            }
        }

        /// Prefix operator. The discriminant is the operator's pipeline tag.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        #[repr(u8)]
        pub enum UnOp {
            $($un = $un_tag,)*
        }

        impl UnOp {
            pub const ALL: &'static [UnOp] = &[$(UnOp::$un,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(UnOp::$un => $un_text,)*
                }
            }

            pub fn tag(self) -> u8 {
                self as u8
            }
        }
    };
}

for_each_operator!(define_operators);

impl BinOp {
    /// `(left, right)` binding powers. Higher binds tighter.
    pub fn binding_power(self) -> (u8, u8) {
        match self {
            BinOp::Or => (2, 3),
            BinOp::And => (4, 5),
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Pipe => {
                (7, 6)
            }
            BinOp::Append => (9, 8),
            BinOp::Add | BinOp::Sub => (10, 11),
            BinOp::Mul | BinOp::Div | BinOp::Mod => (12, 13),
            BinOp::Concat => (14, 15),
        }
    }
}

impl UnOp {
    /// Minimum power passed to the operand parse.
    ///
    /// `not` is the weakest prefix operator: `not a and b` negates the whole
    /// conjunction.
    pub fn binding_power(self) -> u8 {
        match self {
            UnOp::Not => 1,
            UnOp::Negate => 18,
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for UnOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tags_are_unique_across_groups() {
        let mut seen = HashSet::new();
        for op in BinOp::ALL {
            assert!(seen.insert(op.tag()), "duplicate tag for {op:?}");
        }
        for op in UnOp::ALL {
            assert!(seen.insert(op.tag()), "duplicate tag for {op:?}");
        }
    }

    #[test]
    fn comparison_group_binds_left_looser_than_right() {
        for op in [BinOp::Eq, BinOp::Ne, BinOp::Lt, BinOp::Le, BinOp::Gt, BinOp::Ge, BinOp::Pipe] {
            assert_eq!(op.binding_power(), (7, 6));
        }
    }

    #[test]
    fn application_sits_between_concat_and_negation() {
        let (_, concat_right) = BinOp::Concat.binding_power();
        assert!(concat_right < 16);
        assert!(UnOp::Negate.binding_power() > 17);
        assert!(UnOp::Not.binding_power() < BinOp::Or.binding_power().0);
    }
}
