//! Allocation accounting for the arena. Kept in its own test binary because
//! it installs a global allocator.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use clam_parse::{parse_str, Parser};

struct Counting;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn record(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record(-(layout.size() as isize));
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

fn live() -> isize {
    LIVE.with(Cell::get)
}

#[test]
fn freeing_the_tree_releases_every_buffer() {
    let src = String::from(r#"let xs = {"a\n", "b", {1, 2}}, f = fun x y => x in f xs[0] "tail""#);
    let before = live();
    {
        let (ast, root) = parse_str(&src).unwrap();
        assert!(live() > before);
        assert!(root.as_usize() < ast.len());
        ast.free();
    }
    assert_eq!(live(), before);
}

#[test]
fn abandoned_parse_releases_partial_tree() {
    let src = String::from(r#"let xs = {"a", "b", {1, 2 in xs"#);
    let before = live();
    {
        let mut p = Parser::new(&src);
        let err = p.parse().unwrap_err();
        assert!(!p.ast().is_empty());
        drop(err);
        drop(p);
    }
    assert_eq!(live(), before);
}
