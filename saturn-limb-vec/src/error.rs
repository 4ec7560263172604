use thiserror::Error;

/// Errors returned by the fallible (`try_*`) operations of [`LimbVec`].
///
/// Every operation that reports one of these leaves the vector exactly as it was before the call.
///
/// [`LimbVec`]: crate::LimbVec
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LimbVecError {
    /// The requested capacity does not fit in `usize`.
    #[error("limb capacity overflow")]
    CapacityOverflow,

    /// The allocator could not provide a shared buffer of the requested size.
    #[error("failed to allocate a shared buffer of {capacity} limbs")]
    AllocationFailed { capacity: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, LimbVecError>;

/// Unwraps the result of a fallible operation for the infallible API, panicking like `Vec` does
/// when it cannot grow.
#[track_caller]
pub(crate) fn infallible<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
