//! Common trait for limb storages supporting push/pop operations.
//!
//! This module provides [`LimbStack`], a trait that abstracts over limb storages growing and
//! shrinking at the most significant end, so that magnitude code can run on either a [`LimbVec`]
//! or a plain `Vec<Limb>`.
//!
//! [`LimbVec`]: crate::LimbVec

use crate::error::{LimbVecError, Result};
use crate::{Limb, LimbVec};

/// A limb storage with stack-like operations at its most significant end.
///
/// # Examples
///
/// ```rust
/// use saturn_limb_vec::{LimbStack, LimbVec};
///
/// fn work_with_stack<S: LimbStack>(stack: &mut S) {
///     stack.push(42).unwrap();
///     stack.push(0).unwrap();
///     assert_eq!(stack.len(), 2);
///     stack.trim_high_zeros();
///     assert_eq!(stack.as_slice(), &[42]);
/// }
///
/// let mut limbs = LimbVec::new();
/// work_with_stack(&mut limbs);
///
/// let mut vec: Vec<u32> = Vec::new();
/// work_with_stack(&mut vec);
/// ```
pub trait LimbStack {
    /// Appends a limb.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot grow.
    fn push(&mut self, limb: Limb) -> Result<()>;

    /// Removes and returns the last limb, or `None` if the storage is empty.
    ///
    /// # Panics
    ///
    /// Implementations may panic if removing the limb needs memory they cannot allocate. A
    /// [`LimbVec`] sharing its buffer with a clone has to copy it before shrinking.
    fn pop(&mut self) -> Option<Limb>;

    /// Returns the limbs, least significant first.
    fn as_slice(&self) -> &[Limb];

    /// Returns the number of limbs.
    fn len(&self) -> usize;

    /// Returns `true` if the storage holds no limbs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pops zero limbs off the most significant end, leaving the canonical form of the magnitude.
    /// Zero itself becomes empty.
    fn trim_high_zeros(&mut self) {
        while self.as_slice().last() == Some(&0) {
            self.pop();
        }
    }
}

/// Implementation for the limb vector. Growth failures are reported instead of panicking; `pop`
/// panics like [`LimbVec::pop`] if a shared buffer cannot be copied.
impl LimbStack for LimbVec {
    fn push(&mut self, limb: Limb) -> Result<()> {
        self.try_push(limb)
    }

    fn pop(&mut self) -> Option<Limb> {
        LimbVec::pop(self)
    }

    fn as_slice(&self) -> &[Limb] {
        LimbVec::as_slice(self)
    }

    fn len(&self) -> usize {
        LimbVec::len(self)
    }
}

/// Implementation for standard library [`Vec`].
///
/// [`Vec`]: std::vec::Vec
impl LimbStack for Vec<Limb> {
    fn push(&mut self, limb: Limb) -> Result<()> {
        if self.try_reserve(1).is_err() {
            return Err(LimbVecError::AllocationFailed {
                capacity: self.len() + 1,
            });
        }
        Vec::push(self, limb);
        Ok(())
    }

    fn pop(&mut self) -> Option<Limb> {
        Vec::pop(self)
    }

    fn as_slice(&self) -> &[Limb] {
        Vec::as_slice(self)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}
