//! Copy-on-write limb vector with inline storage for small magnitudes.
//!
//! This module provides [`LimbVec`], the storage substrate of an arbitrary-precision integer.
//! Short values live inline in the vector itself; longer ones live in a reference-counted heap
//! buffer that is shared between clones until one of them is written to.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::size_of;
use core::ops::{Deref, DerefMut, Index, IndexMut, Range};
use core::slice::{self, SliceIndex};

use crate::buffer::{grown_capacity, zeroed_buffer, SharedHandle};
use crate::error::{infallible, Result};

/// One fixed-width digit of a multi-precision magnitude.
pub type Limb = u32;

/// Number of limbs stored without allocating.
///
/// The inline array takes exactly the room of the shared handle (a capacity plus a pointer), so
/// the small-buffer optimization costs no space over a vector that always allocates.
pub const INLINE_CAPACITY: usize = size_of::<SharedHandle>() / size_of::<Limb>();

const _: () = {
    assert!(INLINE_CAPACITY > 0, "inline limb storage must hold at least one limb");
    assert!(
        INLINE_CAPACITY * size_of::<Limb>() == size_of::<SharedHandle>(),
        "inline limb storage must match the shared handle footprint"
    );
};

/// Active storage. `Inline` iff `len <= INLINE_CAPACITY`.
#[derive(Clone)]
enum Repr {
    Inline([Limb; INLINE_CAPACITY]),
    Shared(SharedHandle),
}

/// A growable array of [`Limb`]s with value semantics.
///
/// Up to [`INLINE_CAPACITY`] limbs are stored inline. Past that, the limbs move to a heap buffer
/// that clones share: cloning a large `LimbVec` is O(1) and never allocates. The buffer is copied
/// only when a vector that shares it is about to be modified, so every clone behaves as an
/// independent value.
///
/// # Examples
///
/// ```rust
/// use saturn_limb_vec::{LimbVec, INLINE_CAPACITY};
///
/// let mut a = LimbVec::new();
/// for limb in 0..=INLINE_CAPACITY as u32 {
///     a.push(limb);
/// }
/// assert!(a.is_shared());
///
/// let mut b = a.clone();
/// assert!(a.shares_storage_with(&b));
///
/// b[0] = 99;
/// assert!(!a.shares_storage_with(&b));
/// assert_eq!(a[0], 0);
/// assert_eq!(b[0], 99);
/// ```
///
/// # Memory Layout
///
/// Slots between the length and the capacity are always zero, in both representations. Equality
/// and hashing only look at the first `len` limbs.
pub struct LimbVec {
    len: usize,
    repr: Repr,
}

/// Copies up to [`INLINE_CAPACITY`] limbs, given as two consecutive runs, into a zero-padded
/// inline array.
fn spill_inline(head: &[Limb], tail: &[Limb]) -> [Limb; INLINE_CAPACITY] {
    let mut inline = [0; INLINE_CAPACITY];
    inline[..head.len()].copy_from_slice(head);
    inline[head.len()..head.len() + tail.len()].copy_from_slice(tail);
    inline
}

impl Default for LimbVec {
    fn default() -> Self {
        Self::new()
    }
}

impl LimbVec {
    /// Creates an empty vector. Never allocates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_limb_vec::LimbVec;
    ///
    /// let limbs = LimbVec::new();
    /// assert!(limbs.is_empty());
    /// assert!(limbs.is_inline());
    /// ```
    pub const fn new() -> Self {
        Self {
            len: 0,
            repr: Repr::Inline([0; INLINE_CAPACITY]),
        }
    }

    /// Creates a vector of `len` zero limbs.
    ///
    /// # Panics
    ///
    /// Panics if the shared buffer cannot be allocated. See [`LimbVec::try_with_len`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_limb_vec::LimbVec;
    ///
    /// let limbs = LimbVec::with_len(10);
    /// assert_eq!(limbs.len(), 10);
    /// assert!(limbs.iter().all(|&limb| limb == 0));
    /// ```
    #[track_caller]
    pub fn with_len(len: usize) -> Self {
        infallible(Self::try_with_len(len))
    }

    /// Creates a vector of `len` zero limbs. A shared buffer, if needed, holds exactly `len`
    /// limbs.
    ///
    /// # Errors
    ///
    /// Returns an error if `len` limbs cannot be allocated.
    pub fn try_with_len(len: usize) -> Result<Self> {
        let repr = if len <= INLINE_CAPACITY {
            Repr::Inline([0; INLINE_CAPACITY])
        } else {
            Repr::Shared(SharedHandle::new(zeroed_buffer(len, &[])?))
        };
        Ok(Self { len, repr })
    }

    /// Creates a vector holding a copy of `limbs`.
    ///
    /// # Panics
    ///
    /// Panics if the shared buffer cannot be allocated.
    #[track_caller]
    pub fn from_slice(limbs: &[Limb]) -> Self {
        infallible(Self::try_from_slice(limbs))
    }

    /// Creates a vector holding a copy of `limbs`.
    ///
    /// # Errors
    ///
    /// Returns an error if `limbs.len()` limbs cannot be allocated.
    pub fn try_from_slice(limbs: &[Limb]) -> Result<Self> {
        let len = limbs.len();
        let repr = if len <= INLINE_CAPACITY {
            Repr::Inline(spill_inline(limbs, &[]))
        } else {
            Repr::Shared(SharedHandle::new(zeroed_buffer(len, limbs)?))
        };
        Ok(Self { len, repr })
    }

    /// Returns the number of limbs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no limbs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of limbs the vector can hold before it has to reallocate.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Inline(_) => INLINE_CAPACITY,
            Repr::Shared(handle) => handle.capacity(),
        }
    }

    /// Returns `true` if the limbs are stored inline.
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline(_))
    }

    /// Returns `true` if the limbs live in a heap buffer, whether or not it is currently shared.
    pub fn is_shared(&self) -> bool {
        matches!(self.repr, Repr::Shared(_))
    }

    /// Number of vectors viewing this vector's heap buffer, or `None` for inline storage.
    pub fn ref_count(&self) -> Option<usize> {
        match &self.repr {
            Repr::Inline(_) => None,
            Repr::Shared(handle) => Some(handle.ref_count()),
        }
    }

    /// Returns `true` if both vectors view the same heap buffer.
    pub fn shares_storage_with(&self, other: &LimbVec) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Shared(a), Repr::Shared(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Returns the limbs as a slice. Never copies the buffer.
    pub fn as_slice(&self) -> &[Limb] {
        match &self.repr {
            Repr::Inline(limbs) => &limbs[..self.len],
            Repr::Shared(handle) => &handle.limbs()[..self.len],
        }
    }

    /// Returns the limbs as native-endian bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_limb_vec::limbs;
    ///
    /// let limbs = limbs![1, 2];
    /// assert_eq!(limbs.as_bytes().len(), 8);
    /// ```
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Returns the limbs as a mutable slice, detaching from a shared buffer first.
    ///
    /// # Panics
    ///
    /// Panics if a private copy of the buffer cannot be allocated.
    #[track_caller]
    pub fn as_mut_slice(&mut self) -> &mut [Limb] {
        infallible(self.try_as_mut_slice())
    }

    /// Returns the limbs as a mutable slice, detaching from a shared buffer first.
    ///
    /// # Errors
    ///
    /// Returns an error if a private copy of the buffer cannot be allocated.
    pub fn try_as_mut_slice(&mut self) -> Result<&mut [Limb]> {
        let len = self.len;
        Ok(&mut self.make_unique()?[..len])
    }

    /// The single point every mutable access goes through: returns all slots (logical and spare)
    /// of storage this vector owns exclusively.
    fn make_unique(&mut self) -> Result<&mut [Limb]> {
        match &mut self.repr {
            Repr::Inline(limbs) => Ok(&mut limbs[..]),
            Repr::Shared(handle) => handle.make_unique(self.len),
        }
    }

    /// Returns a mutable reference to the limb at `index`, or `None` if out of bounds.
    ///
    /// A shared buffer is only copied when `index` is in bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Limb> {
        if index < self.len {
            Some(&mut self.as_mut_slice()[index])
        } else {
            None
        }
    }

    /// Returns a mutable iterator over the limbs.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Limb> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the last limb.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[track_caller]
    pub fn back(&self) -> &Limb {
        match self.as_slice().last() {
            Some(limb) => limb,
            None => panic!("back() called on an empty LimbVec"),
        }
    }

    /// Returns a mutable reference to the last limb.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[track_caller]
    pub fn back_mut(&mut self) -> &mut Limb {
        match self.as_mut_slice().last_mut() {
            Some(limb) => limb,
            None => panic!("back_mut() called on an empty LimbVec"),
        }
    }

    /// Appends a limb.
    ///
    /// # Panics
    ///
    /// Panics if the vector needs to allocate and cannot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_limb_vec::LimbVec;
    ///
    /// let mut limbs = LimbVec::new();
    /// limbs.push(7);
    /// assert_eq!(limbs.as_slice(), &[7]);
    /// ```
    #[track_caller]
    pub fn push(&mut self, limb: Limb) {
        infallible(self.try_push(limb))
    }

    /// Alias of [`LimbVec::push`].
    #[track_caller]
    pub fn push_back(&mut self, limb: Limb) {
        self.push(limb)
    }

    /// Appends a limb.
    ///
    /// Crossing [`INLINE_CAPACITY`] moves the limbs to a buffer of `INLINE_CAPACITY + 1` limbs.
    /// A full or shared buffer is replaced in a single reallocation, doubling its capacity when
    /// it is full.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be allocated; the vector is left unchanged.
    pub fn try_push(&mut self, limb: Limb) -> Result<()> {
        let len = self.len;
        match &mut self.repr {
            Repr::Inline(limbs) if len < INLINE_CAPACITY => limbs[len] = limb,
            Repr::Inline(limbs) => {
                let mut buffer = zeroed_buffer(INLINE_CAPACITY + 1, &limbs[..])?;
                buffer[len] = limb;
                self.repr = Repr::Shared(SharedHandle::new(buffer));
            }
            Repr::Shared(handle) => {
                let capacity = if len == handle.capacity() {
                    grown_capacity(len)?
                } else {
                    handle.capacity()
                };
                handle.reserve_unique(len, capacity)?[len] = limb;
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the last limb and returns it, or `None` if the vector is empty.
    ///
    /// # Panics
    ///
    /// Panics if the vector stays in a shared buffer that cannot be copied.
    #[track_caller]
    pub fn pop(&mut self) -> Option<Limb> {
        infallible(self.try_pop())
    }

    /// Removes the last limb and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[track_caller]
    pub fn pop_back(&mut self) -> Limb {
        match self.pop() {
            Some(limb) => limb,
            None => panic!("pop_back() called on an empty LimbVec"),
        }
    }

    /// Removes the last limb and returns it, or `None` if the vector is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector stays in a buffer that is shared and cannot be copied.
    pub fn try_pop(&mut self) -> Result<Option<Limb>> {
        let Some(&limb) = self.as_slice().last() else {
            return Ok(None);
        };
        self.try_truncate(self.len - 1)?;
        Ok(Some(limb))
    }

    /// Shortens the vector to `len` limbs, zeroing the vacated slots. Does nothing if `len` is
    /// not smaller than the current length.
    ///
    /// # Panics
    ///
    /// Panics if the vector stays in a shared buffer that cannot be copied.
    #[track_caller]
    pub fn truncate(&mut self, len: usize) {
        infallible(self.try_truncate(len))
    }

    /// Shortens the vector to `len` limbs.
    ///
    /// Dropping to [`INLINE_CAPACITY`] limbs or fewer copies the survivors inline and releases
    /// the buffer. Otherwise the buffer is detached if shared and the vacated slots are zeroed.
    ///
    /// # Errors
    ///
    /// Returns an error if a private copy of a shared buffer cannot be allocated.
    pub fn try_truncate(&mut self, len: usize) -> Result<()> {
        let old_len = self.len;
        if len >= old_len {
            return Ok(());
        }

        match &mut self.repr {
            Repr::Inline(limbs) => limbs[len..old_len].fill(0),
            Repr::Shared(handle) if len <= INLINE_CAPACITY => {
                let inline = spill_inline(&handle.limbs()[..len], &[]);
                self.repr = Repr::Inline(inline);
            }
            Repr::Shared(handle) => handle.make_unique(len)?[len..old_len].fill(0),
        }
        self.len = len;
        Ok(())
    }

    /// Removes every limb and releases the heap buffer, if any.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Resizes the vector to `len` limbs, filling new slots with `fill`.
    ///
    /// # Panics
    ///
    /// Panics if the vector needs to allocate and cannot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_limb_vec::limbs;
    ///
    /// let mut limbs = limbs![1, 2];
    /// limbs.resize(4, 9);
    /// assert_eq!(limbs.as_slice(), &[1, 2, 9, 9]);
    /// limbs.resize(1, 0);
    /// assert_eq!(limbs.as_slice(), &[1]);
    /// ```
    #[track_caller]
    pub fn resize(&mut self, len: usize, fill: Limb) {
        infallible(self.try_resize(len, fill))
    }

    /// Resizes the vector to `len` limbs, filling new slots with `fill`.
    ///
    /// Growing out of inline storage allocates exactly `len` limbs; growing a shared buffer
    /// reallocates to `max(len, capacity)` limbs when it is shared or too small.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be allocated; the vector is left unchanged.
    pub fn try_resize(&mut self, len: usize, fill: Limb) -> Result<()> {
        let old_len = self.len;
        if len <= old_len {
            return self.try_truncate(len);
        }

        match &mut self.repr {
            Repr::Inline(limbs) if len <= INLINE_CAPACITY => limbs[old_len..len].fill(fill),
            Repr::Inline(limbs) => {
                let mut buffer = zeroed_buffer(len, &limbs[..old_len])?;
                buffer[old_len..].fill(fill);
                self.repr = Repr::Shared(SharedHandle::new(buffer));
            }
            Repr::Shared(handle) => {
                let capacity = len.max(handle.capacity());
                handle.reserve_unique(old_len, capacity)?[old_len..len].fill(fill);
            }
        }
        self.len = len;
        Ok(())
    }

    /// Removes the limbs in `range`, keeping the order of the rest, and returns the index of
    /// the first limb that followed the range.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past the end, or if a shared buffer must be
    /// copied and cannot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_limb_vec::limbs;
    ///
    /// let mut limbs = limbs![1, 2, 3, 4, 5];
    /// assert_eq!(limbs.erase(1..3), 1);
    /// assert_eq!(limbs.as_slice(), &[1, 4, 5]);
    /// ```
    #[track_caller]
    pub fn erase(&mut self, range: Range<usize>) -> usize {
        infallible(self.try_erase(range))
    }

    /// Removes the limbs in `range`; see [`LimbVec::erase`].
    ///
    /// A result short enough to fit inline is copied out of the buffer without detaching it.
    ///
    /// # Errors
    ///
    /// Returns an error if a private copy of a shared buffer cannot be allocated.
    #[track_caller]
    pub fn try_erase(&mut self, range: Range<usize>) -> Result<usize> {
        let Range { start, end } = range;
        let old_len = self.len;
        assert!(
            start <= end && end <= old_len,
            "erase range {start}..{end} out of bounds for LimbVec of length {old_len}"
        );
        if start == end {
            return Ok(start);
        }

        let len = old_len - (end - start);
        if let Repr::Shared(handle) = &self.repr {
            if len <= INLINE_CAPACITY {
                let limbs = handle.limbs();
                let inline = spill_inline(&limbs[..start], &limbs[end..old_len]);
                self.repr = Repr::Inline(inline);
                self.len = len;
                return Ok(start);
            }
        }

        let limbs = &mut self.make_unique()?[..old_len];
        limbs[start..].rotate_left(end - start);
        limbs[len..].fill(0);
        self.len = len;
        Ok(start)
    }

    /// Removes and returns the limb at `index`, shifting the following limbs down.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> Limb {
        let limb = self[index];
        self.erase(index..index + 1);
        limb
    }

    /// Exchanges the contents of two vectors without touching their buffers.
    pub fn swap(&mut self, other: &mut LimbVec) {
        core::mem::swap(self, other)
    }

    #[cfg(test)]
    pub(crate) fn spare_limbs(&self) -> &[Limb] {
        match &self.repr {
            Repr::Inline(limbs) => &limbs[self.len..],
            Repr::Shared(handle) => &handle.limbs()[self.len..],
        }
    }
}

impl Clone for LimbVec {
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            repr: self.repr.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl fmt::Debug for LimbVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl PartialEq for LimbVec {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for LimbVec {}

impl Hash for LimbVec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl Deref for LimbVec {
    type Target = [Limb];

    fn deref(&self) -> &[Limb] {
        self.as_slice()
    }
}

impl DerefMut for LimbVec {
    fn deref_mut(&mut self) -> &mut [Limb] {
        self.as_mut_slice()
    }
}

impl<I: SliceIndex<[Limb]>> Index<I> for LimbVec {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        self.as_slice().index(index)
    }
}

impl<I: SliceIndex<[Limb]>> IndexMut<I> for LimbVec {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        self.as_mut_slice().index_mut(index)
    }
}

impl<'a> IntoIterator for &'a LimbVec {
    type Item = &'a Limb;
    type IntoIter = slice::Iter<'a, Limb>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a mut LimbVec {
    type Item = &'a mut Limb;
    type IntoIter = slice::IterMut<'a, Limb>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl Extend<Limb> for LimbVec {
    fn extend<T: IntoIterator<Item = Limb>>(&mut self, iter: T) {
        for limb in iter {
            self.push(limb);
        }
    }
}

impl FromIterator<Limb> for LimbVec {
    fn from_iter<T: IntoIterator<Item = Limb>>(iter: T) -> Self {
        let mut limbs = Self::new();
        limbs.extend(iter);
        limbs
    }
}

impl From<&[Limb]> for LimbVec {
    fn from(limbs: &[Limb]) -> Self {
        Self::from_slice(limbs)
    }
}

impl From<&LimbVec> for Vec<Limb> {
    fn from(limbs: &LimbVec) -> Self {
        limbs.to_vec()
    }
}
