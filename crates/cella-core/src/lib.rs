//! Minimal managed heap with synchronous mark-and-sweep collection
//!
//! This crate provides a small tagged-value object model (numbers, strings,
//! pairs) backed by an explicit allocator and a stop-the-world collector:
//!
//! - **Value / ValueRef**: tagged values and generation-checked handles
//!   into the arena
//! - **Arena**: slot storage that owns every live value
//! - **RootStack**: bounded operand stack doubling as the GC root set
//! - **Heap**: allocator with a collection budget plus the mark-sweep driver
//!
//! Reachability is the transitive closure of pair edges starting from the
//! root stack; everything else is reclaimed on the next collection.
//!
//! # Example
//!
//! ```
//! use cella_core::Heap;
//!
//! let mut heap = Heap::new();
//! heap.alloc_number(2)?;
//! heap.alloc_number(1)?;
//! let pair = heap.alloc_pair()?; // pops both operands, pushes the pair
//!
//! let report = heap.collect();
//! assert_eq!(report.reclaimed, 0); // the pair is rooted, its operands reachable
//! assert!(heap.get(pair).is_some());
//! # Ok::<(), cella_core::HeapError>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod arena;
pub mod heap;
mod roots;
pub mod value;

pub use heap::{DisplayValue, GcStats, Heap, SweepReport};
pub use roots::DEFAULT_ROOT_CAPACITY;
pub use value::{Value, ValueRef};

/// Managed-heap errors
///
/// All three are caller contract violations or resource exhaustion and are
/// non-recoverable at the point of occurrence; the heap does not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// Push attempted on a full root stack
    #[error("Stack overflow")]
    StackOverflow,

    /// Pop attempted on an empty root stack
    #[error("Stack underflow")]
    StackUnderflow,

    /// Heap value limit exceeded
    #[error("Allocation failure: heap value limit exceeded")]
    AllocationFailure,
}

/// Managed-heap result
pub type HeapResult<T> = Result<T, HeapError>;
