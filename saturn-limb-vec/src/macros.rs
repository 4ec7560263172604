/// Builds a [`LimbVec`](crate::LimbVec), mirroring `vec!`.
///
/// # Examples
///
/// ```rust
/// use saturn_limb_vec::limbs;
///
/// let empty = limbs![];
/// assert!(empty.is_empty());
///
/// let digits = limbs![1, 2, 3];
/// assert_eq!(digits.as_slice(), &[1, 2, 3]);
///
/// let zeros = limbs![0; 8];
/// assert_eq!(zeros.len(), 8);
/// ```
#[macro_export]
macro_rules! limbs {
    () => {
        $crate::LimbVec::new()
    };
    ($limb:expr; $len:expr) => {{
        let mut limbs = $crate::LimbVec::new();
        limbs.resize($len, $limb);
        limbs
    }};
    ($($limb:expr),+ $(,)?) => {
        $crate::LimbVec::from_slice(&[$($limb),+])
    };
}
