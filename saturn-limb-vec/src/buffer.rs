//! Reference-counted heap storage behind the shared representation of [`LimbVec`].
//!
//! A buffer always holds exactly `capacity` limbs. Slots past the logical length of the vectors
//! viewing it are kept at zero, so a buffer can be copied, shrunk or spilled back inline without
//! ever exposing stale limbs.
//!
//! [`LimbVec`]: crate::LimbVec

use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{LimbVecError, Result};
use crate::Limb;

/// Largest number of limbs a single allocation may hold.
const MAX_CAPACITY: usize = isize::MAX as usize / core::mem::size_of::<Limb>();

/// Builds a zero-filled buffer of `capacity` limbs that starts with a copy of `prefix`.
///
/// This is the only place shared storage is allocated, and it fails without side effects.
pub(crate) fn zeroed_buffer(capacity: usize, prefix: &[Limb]) -> Result<Vec<Limb>> {
    debug_assert!(prefix.len() <= capacity);

    if capacity > MAX_CAPACITY {
        debug!(capacity, "shared limb buffer capacity overflow");
        return Err(LimbVecError::CapacityOverflow);
    }

    let mut limbs = Vec::new();
    if limbs.try_reserve_exact(capacity).is_err() {
        debug!(capacity, "shared limb buffer allocation failed");
        return Err(LimbVecError::AllocationFailed { capacity });
    }

    trace!(capacity, copied = prefix.len(), "allocated shared limb buffer");
    limbs.extend_from_slice(prefix);
    limbs.resize(capacity, 0);
    Ok(limbs)
}

/// Capacity to grow to when a full buffer of `capacity` limbs receives one more limb.
pub(crate) fn grown_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Ok(1);
    }
    capacity
        .checked_mul(2)
        .ok_or(LimbVecError::CapacityOverflow)
}

/// Handle to a shared limb buffer: the capacity next to the reference-counted allocation.
///
/// `capacity` always equals the length of the buffer. It is stored in the handle so that the
/// handle has the same footprint as the inline array it alternates with.
#[derive(Clone)]
pub(crate) struct SharedHandle {
    capacity: usize,
    buffer: Rc<Vec<Limb>>,
}

impl SharedHandle {
    /// Takes ownership of a freshly built buffer. The new handle is its only owner.
    pub(crate) fn new(limbs: Vec<Limb>) -> Self {
        Self {
            capacity: limbs.len(),
            buffer: Rc::new(limbs),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// All `capacity` limbs, including the zeroed spare slots.
    pub(crate) fn limbs(&self) -> &[Limb] {
        &self.buffer
    }

    /// Number of handles currently viewing the buffer.
    pub(crate) fn ref_count(&self) -> usize {
        Rc::strong_count(&self.buffer)
    }

    pub(crate) fn is_aliased(&self) -> bool {
        self.ref_count() > 1
    }

    pub(crate) fn ptr_eq(&self, other: &SharedHandle) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Ensures this handle owns its buffer exclusively, cloning the first `len` limbs into a new
    /// buffer of the same capacity if it is aliased.
    pub(crate) fn make_unique(&mut self, len: usize) -> Result<&mut [Limb]> {
        self.reserve_unique(len, self.capacity)
    }

    /// Ensures the buffer is exclusively owned and holds at least `capacity` limbs.
    ///
    /// A buffer that is both aliased and too small is replaced by a single reallocation of
    /// `max(capacity, self.capacity)` limbs. Only the first `len` limbs are carried over.
    pub(crate) fn reserve_unique(&mut self, len: usize, capacity: usize) -> Result<&mut [Limb]> {
        let aliased = self.is_aliased();
        if aliased || capacity > self.capacity {
            let capacity = capacity.max(self.capacity);
            trace!(len, from = self.capacity, to = capacity, aliased, "detaching shared limb buffer");
            *self = Self::new(zeroed_buffer(capacity, &self.buffer[..len])?);
        }

        match Rc::get_mut(&mut self.buffer) {
            Some(limbs) => Ok(limbs),
            None => unreachable!("shared limb buffer still aliased after detaching"),
        }
    }
}
