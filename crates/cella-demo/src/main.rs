//! Demonstration caller: builds a small pair structure on the operand
//! stack and prints it.
//!
//! Run with `RUST_LOG=debug` to see the sweep diagnostics as collections
//! fire during construction.

use cella_core::{Heap, HeapResult, Value};

fn main() -> HeapResult<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut heap = Heap::new();

    heap.alloc_string(b"HELLO")?;
    heap.alloc_number(2)?;
    heap.alloc_pair()?; // (2, HELLO)
    heap.alloc_number(8)?;
    heap.alloc_number(19)?;
    heap.alloc_pair()?; // (19, 8)
    heap.alloc_pair()?; // ((19, 8), (2, HELLO))

    let result = heap.pop()?;
    if let Some(Value::Pair { head, tail }) = heap.get(result) {
        println!("[{}, {}]", heap.display(*head), heap.display(*tail));
    }

    Ok(())
}
