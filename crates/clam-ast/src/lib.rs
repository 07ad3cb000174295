#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

pub mod span {
    use serde::Serialize;

    /// Half-open `[start, end)` byte range into the source buffer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
    }

    impl Span {
        pub fn new(start: u32, end: u32) -> Self {
            debug_assert!(start <= end, "span start {start} past end {end}");
            Self { start, end }
        }

        /// Empty span at `offset`.
        pub fn point(offset: u32) -> Self {
            Self {
                start: offset,
                end: offset,
            }
        }

        /// Smallest span covering both `self` and `other`.
        pub fn to(self, other: Span) -> Span {
            Span {
                start: self.start.min(other.start),
                end: self.end.max(other.end),
            }
        }

        pub fn len(self) -> usize {
            (self.end - self.start) as usize
        }

        pub fn is_empty(self) -> bool {
            self.start == self.end
        }

        pub fn range(self) -> std::ops::Range<usize> {
            self.start as usize..self.end as usize
        }
    }
}

pub mod ast;
pub mod op;
pub mod sexpr;
