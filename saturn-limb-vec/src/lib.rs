//! # Saturn Limb Vec
//!
//! Copy-on-write limb storage for arbitrary-precision integers.
//!
//! A big integer's magnitude is a sequence of fixed-width **limbs**. Most magnitudes met in
//! practice are short, and most copies of long ones are never modified. [`LimbVec`] is tuned for
//! both cases:
//!
//! - **Inline storage** – up to [`INLINE_CAPACITY`] limbs live inside the vector itself, with no
//!   heap allocation.
//! - **Shared storage** – longer magnitudes live in a reference-counted heap buffer. Cloning is
//!   O(1); the buffer is copied only when a vector sharing it is about to be written to.
//!
//! Every clone behaves as an independent value: sharing is never observable through the API.
//!
//! ## Features
//!
//! - **[`LimbVec`]** – the limb vector: indexing, `push`/`pop`, `resize`, `erase`, equality
//! - **[`LimbStack`]** – trait abstraction over `push`, `pop`, `len` & slice access, implemented
//!   for both [`LimbVec`] and `Vec<Limb>`
//! - **[`limbs!`]** – `vec!`-style constructor
//! - **`serde`** *(default feature)* – `Serialize`/`Deserialize` as a flat sequence of limbs
//!
//! ## Quick Examples
//!
//! ### Crossing the inline threshold
//!
//! ```rust
//! use saturn_limb_vec::{LimbVec, INLINE_CAPACITY};
//!
//! let mut limbs = LimbVec::new();
//! for limb in 0..INLINE_CAPACITY as u32 {
//!     limbs.push(limb);
//! }
//! assert!(limbs.is_inline());
//!
//! limbs.push(u32::MAX);
//! assert!(limbs.is_shared());
//!
//! limbs.pop();
//! assert!(limbs.is_inline());
//! ```
//!
//! ### Copy-on-write
//!
//! ```rust
//! use saturn_limb_vec::limbs;
//!
//! let a = limbs![1, 2, 3, 4, 5];
//! let mut b = a.clone();
//! assert!(a.shares_storage_with(&b));
//!
//! b[0] = 99;
//! assert_eq!(a[0], 1);
//! assert_eq!(b[0], 99);
//! assert_ne!(a, b);
//! ```
//!
//! ### Fallible growth
//!
//! ```rust
//! use saturn_limb_vec::{limbs, LimbVecError};
//!
//! let mut limbs = limbs![1, 2, 3];
//! assert_eq!(limbs.try_resize(usize::MAX, 0), Err(LimbVecError::CapacityOverflow));
//! assert_eq!(limbs.as_slice(), &[1, 2, 3]);
//! ```
//!
//! ## Safety & Compatibility
//!
//! - ✅ **100% safe Rust**: sharing goes through [`std::rc::Rc`]
//! - ✅ **Strong guarantee**: a failed `try_*` call leaves the vector untouched
//! - ⚠️ **Single-threaded**: `LimbVec` is neither `Send` nor `Sync`
//!
//! ## Logging
//!
//! Shared buffer allocations are reported through [`tracing`] at `trace` level, and allocation
//! failures at `debug` level. The crate never installs a subscriber.
//!
//! [`LimbStack`]: stack::LimbStack
//! [`limbs!`]: macro@limbs

mod buffer;
pub mod error;
pub mod limb_vec;
mod macros;
#[cfg(feature = "serde")]
mod serde_impls;
pub mod stack;

#[cfg(test)]
mod tests;

pub use error::{LimbVecError, Result};
pub use limb_vec::{Limb, LimbVec, INLINE_CAPACITY};
pub use stack::LimbStack;
