//! Root stack: GC roots and operand stack in one
//!
//! The root stack holds non-owning handles. It is both the collector's
//! root set and the operand stack used to construct pairs, so anything a
//! caller is still assembling stays reachable across a collection.

use crate::value::ValueRef;
use crate::{HeapError, HeapResult};

/// Default root stack capacity
pub const DEFAULT_ROOT_CAPACITY: usize = 256;

/// Bounded stack of handles acting as the GC root set
#[derive(Debug)]
pub(crate) struct RootStack {
    entries: Vec<ValueRef>,
    capacity: usize,
}

impl RootStack {
    /// Create a root stack with the given capacity
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a handle; overflow is a caller contract violation
    pub(crate) fn push(&mut self, handle: ValueRef) -> HeapResult<()> {
        if self.entries.len() >= self.capacity {
            return Err(HeapError::StackOverflow);
        }
        self.entries.push(handle);
        Ok(())
    }

    /// Pop the top handle; underflow is a caller contract violation
    pub(crate) fn pop(&mut self) -> HeapResult<ValueRef> {
        self.entries.pop().ok_or(HeapError::StackUnderflow)
    }

    /// Iterate over all rooted handles
    pub(crate) fn iter(&self) -> impl Iterator<Item = ValueRef> + '_ {
        self.entries.iter().copied()
    }

    /// Number of rooted handles
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
