//! Tagged value representation
//!
//! Values live in the heap's arena and reference each other through
//! [`ValueRef`] handles rather than pointers. A handle carries the slot
//! index plus the slot's generation at creation time; once the slot is
//! reclaimed the generation no longer matches and the handle resolves to
//! nothing, even if the slot has been reused.

/// Generation-checked handle to a value stored in a heap arena.
///
/// Handles are plain data: copying one never affects liveness. A value is
/// kept alive only by being reachable from the root stack at collection
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRef {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// A heap-managed value
///
/// Numbers and strings are leaves; a pair holds handles to two previously
/// constructed values and is the only source of edges in the object graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed integer payload
    Number(i64),

    /// Owned byte buffer
    String(Box<[u8]>),

    /// Two handles to previously constructed values
    Pair {
        /// First operand popped during construction
        head: ValueRef,
        /// Second operand popped during construction
        tail: ValueRef,
    },
}

impl Value {
    /// Extract the integer payload
    #[inline]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract the string payload
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Extract the pair handles as `(head, tail)`
    #[inline]
    pub fn as_pair(&self) -> Option<(ValueRef, ValueRef)> {
        match self {
            Value::Pair { head, tail } => Some((*head, *tail)),
            _ => None,
        }
    }

    /// Check if this value is a pair
    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        let num = Value::Number(42);
        assert_eq!(num.as_number(), Some(42));
        assert_eq!(num.as_bytes(), None);
        assert!(!num.is_pair());

        let s = Value::String(Box::from(&b"HELLO"[..]));
        assert_eq!(s.as_bytes(), Some(&b"HELLO"[..]));
        assert_eq!(s.as_number(), None);
    }

    #[test]
    fn test_pair_accessor() {
        let a = ValueRef { index: 0, generation: 0 };
        let b = ValueRef { index: 1, generation: 0 };
        let pair = Value::Pair { head: a, tail: b };

        assert!(pair.is_pair());
        assert_eq!(pair.as_pair(), Some((a, b)));
    }
}
