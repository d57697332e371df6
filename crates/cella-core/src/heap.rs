//! Managed heap: allocator, collection driver, and statistics
//!
//! The [`Heap`] owns the arena and the root stack and drives collection.
//! Every allocation request decrements a budget; when the budget goes
//! negative a full mark-sweep cycle runs before the new value is created,
//! so the collector only ever observes fully constructed values. After
//! each sweep the budget resets to twice the surviving count.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::arena::Arena;
use crate::roots::{RootStack, DEFAULT_ROOT_CAPACITY};
use crate::value::{Value, ValueRef};
use crate::HeapResult;

/// Collector statistics accumulated across cycles
#[derive(Debug, Clone, Default)]
pub struct GcStats {
    /// Total number of collections
    pub collections: usize,

    /// Total values reclaimed
    pub objects_freed: usize,

    /// Total pause time
    pub total_pause_time: Duration,

    /// Last collection duration
    pub last_pause_time: Duration,
}

/// Outcome of one sweep pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Values that were reachable and survived
    pub surviving: usize,

    /// Values reclaimed during the pass
    pub reclaimed: usize,
}

/// Managed heap with a bounded root stack and mark-sweep collection
///
/// The heap is an explicit context value; callers pass it everywhere
/// rather than relying on ambient state. Dropping it releases every value
/// unconditionally, no collection needed at teardown.
pub struct Heap {
    /// Value storage
    arena: Arena,

    /// GC roots / operand stack
    roots: RootStack,

    /// Allocations remaining before the next implicit collection
    gc_budget: i64,

    /// Statistics
    stats: GcStats,
}

impl Heap {
    /// Create an empty heap with the default root stack capacity
    pub fn new() -> Self {
        Self::with_root_capacity(DEFAULT_ROOT_CAPACITY)
    }

    /// Create an empty heap with a custom root stack capacity
    pub fn with_root_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::new(),
            roots: RootStack::with_capacity(capacity),
            // Starts at zero, so the very first allocation runs a
            // no-op collection.
            gc_budget: 0,
            stats: GcStats::default(),
        }
    }

    /// Cap the number of values the heap may hold at once (0 = unlimited)
    ///
    /// Exceeding the cap surfaces as [`HeapError::AllocationFailure`].
    ///
    /// [`HeapError::AllocationFailure`]: crate::HeapError::AllocationFailure
    pub fn set_max_values(&mut self, max: usize) {
        self.arena.set_max_values(max);
    }

    /// Push a handle onto the root stack
    pub fn push(&mut self, handle: ValueRef) -> HeapResult<()> {
        self.roots.push(handle)
    }

    /// Pop the top handle off the root stack
    pub fn pop(&mut self) -> HeapResult<ValueRef> {
        self.roots.pop()
    }

    /// Budget check shared by every allocation request.
    ///
    /// Runs strictly before the new value exists; a collection triggered
    /// here sees the request's operands still rooted on the stack.
    fn reserve(&mut self) {
        self.gc_budget -= 1;
        if self.gc_budget < 0 {
            self.collect();
        }
    }

    /// Allocate a number and root it
    pub fn alloc_number(&mut self, n: i64) -> HeapResult<ValueRef> {
        self.reserve();
        let handle = self.arena.insert(Value::Number(n))?;
        self.roots.push(handle)?;
        Ok(handle)
    }

    /// Allocate a string, copying the bytes, and root it
    pub fn alloc_string(&mut self, bytes: &[u8]) -> HeapResult<ValueRef> {
        self.reserve();
        let handle = self.arena.insert(Value::String(bytes.into()))?;
        self.roots.push(handle)?;
        Ok(handle)
    }

    /// Allocate a pair from the top two root stack entries and root it
    ///
    /// The first pop becomes `head`, the second `tail`. The budget check
    /// happens before either pop, so both operands are still rooted if a
    /// collection fires.
    pub fn alloc_pair(&mut self) -> HeapResult<ValueRef> {
        self.reserve();
        let head = self.roots.pop()?;
        let tail = self.roots.pop()?;
        let handle = self.arena.insert(Value::Pair { head, tail })?;
        self.roots.push(handle)?;
        Ok(handle)
    }

    /// Run one full collection cycle: mark from the roots, then sweep
    ///
    /// Stop-the-world and synchronous; `&mut self` guarantees no mutation
    /// interleaves. Callable explicitly to force reclamation.
    pub fn collect(&mut self) -> SweepReport {
        let start = Instant::now();

        self.mark_roots();
        let report = self.sweep();

        let pause = start.elapsed();
        self.stats.collections += 1;
        self.stats.objects_freed += report.reclaimed;
        self.stats.last_pause_time = pause;
        self.stats.total_pause_time += pause;

        report
    }

    /// Mark phase: everything transitively reachable from the root stack
    ///
    /// Uses an explicit work list instead of recursion, so traversal depth
    /// is bounded by memory rather than the call stack.
    fn mark_roots(&mut self) {
        let mut pending: Vec<ValueRef> = self.roots.iter().collect();

        while let Some(handle) = pending.pop() {
            // Already-marked and stale handles fall out here, which also
            // terminates shared and cyclic structure.
            let Some(value) = self.arena.try_mark(handle) else {
                continue;
            };
            if let Value::Pair { head, tail } = value {
                pending.push(*head);
                pending.push(*tail);
            }
        }
    }

    /// Sweep phase: reclaim unmarked values, reset marks, re-derive budget
    fn sweep(&mut self) -> SweepReport {
        let (surviving, reclaimed) = self.arena.sweep();

        // Next implicit collection after 2x the live count in allocations.
        self.gc_budget = 2 * surviving as i64;

        debug!(surviving, reclaimed, "sweep complete");

        SweepReport {
            surviving,
            reclaimed,
        }
    }

    /// Resolve a handle to its value
    ///
    /// Returns `None` once the value has been reclaimed, even if its slot
    /// has since been reused.
    pub fn get(&self, handle: ValueRef) -> Option<&Value> {
        self.arena.get(handle)
    }

    /// Number of values currently allocated
    pub fn live_count(&self) -> usize {
        self.arena.live()
    }

    /// Number of handles on the root stack
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Collector statistics
    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    /// Render a value, reading through pair handles
    pub fn display(&self, handle: ValueRef) -> DisplayValue<'_> {
        DisplayValue { heap: self, handle }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter rendering a value against the heap it lives in
///
/// Numbers print as integers, strings as lossy UTF-8, pairs as
/// `(head, tail)`. A reclaimed handle prints as `<freed>`.
pub struct DisplayValue<'a> {
    heap: &'a Heap,
    handle: ValueRef,
}

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.heap.get(self.handle) {
            Some(Value::Number(n)) => write!(f, "{}", n),
            Some(Value::String(bytes)) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Some(Value::Pair { head, tail }) => write!(
                f,
                "({}, {})",
                self.heap.display(*head),
                self.heap.display(*tail)
            ),
            None => write!(f, "<freed>"),
        }
    }
}
