//! The no-op logger must not allocate
//!
//! A counting global allocator records allocations made on this thread while
//! `TRACKING` is set.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tslog::prelude::*;
use tslog::values;
use tslog::writer::MemoryWriter;

struct CountingAllocator;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static TRACKING: Cell<bool> = const { Cell::new(false) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if TRACKING.with(Cell::get) {
            ALLOCATIONS.fetch_add(1, Ordering::SeqCst);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn allocations_during(f: impl FnOnce()) -> usize {
    let before = ALLOCATIONS.load(Ordering::SeqCst);
    TRACKING.with(|t| t.set(true));
    f();
    TRACKING.with(|t| t.set(false));
    ALLOCATIONS.load(Ordering::SeqCst) - before
}

#[test]
fn test_noop_calls_do_not_allocate() {
    let memory = MemoryWriter::new();
    let logger: Arc<dyn Logger> = new_logger([
        with_driver(Driver::noop()),
        with_destinations(&[memory.destination()]),
    ]);
    let fields = Fields::new().with_field("user", "alice");
    let name = String::from("borrowed");

    let count = allocations_during(|| {
        for i in 0..1000 {
            logger.debug(&values!["value ", i, name.as_str()]);
            logger.info(&values![true, 1.5]);
            logger.warn(&values![]);
            logger.error(&values![None::<i32>]);
            logger.debugf("%d %s", &values![i, "x"]);
            logger.infof("%v", &values![name.as_str()]);
            logger.warnf("plain", &[]);
            logger.errorf("%d%%", &values![i]);
            logger.debugt("msg", Some(&fields));
            logger.infot("msg", None);
            logger.warnt("msg", Some(&fields));
            logger.errort("msg", None);
        }
    });

    assert_eq!(count, 0, "no-op logger allocated {} times", count);
}

#[test]
fn test_noop_logger_direct() {
    let logger = NoopLogger;
    let count = allocations_during(|| {
        logger.info(&values!["x", 1]);
        logger.errort("y", None);
    });
    assert_eq!(count, 0);
}
