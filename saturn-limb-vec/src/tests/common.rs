//! Helpers shared by the property tests.

// NOTE: The entire module is only compiled when running tests.
#![cfg(test)]

use proptest::prelude::*;

use crate::{Limb, LimbVec, INLINE_CAPACITY};

/// Lengths up to a few times the inline capacity, so runs cross the boundary often.
pub fn len_strategy() -> core::ops::Range<usize> {
    0..INLINE_CAPACITY * 4
}

pub fn limbs_strategy() -> impl Strategy<Value = Vec<Limb>> {
    prop::collection::vec(any::<Limb>(), len_strategy())
}

/// A single operation applied to both the vector under test and the model.
#[derive(Clone, Debug)]
pub enum Op {
    Push(Limb),
    Pop,
    Resize(usize, Limb),
    Truncate(usize),
    /// Endpoints are reduced modulo the current length when applied.
    Erase(usize, usize),
    Set(usize, Limb),
    Clear,
    /// Keep a clone around to check that later writes never reach it.
    Snapshot,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<Limb>().prop_map(Op::Push),
        2 => Just(Op::Pop),
        1 => (len_strategy(), any::<Limb>()).prop_map(|(len, fill)| Op::Resize(len, fill)),
        1 => len_strategy().prop_map(Op::Truncate),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Erase(a, b)),
        2 => (any::<usize>(), any::<Limb>()).prop_map(|(index, limb)| Op::Set(index, limb)),
        1 => Just(Op::Clear),
        2 => Just(Op::Snapshot),
    ]
}

/// Applies `op` to both sides. Returns a clone of `limbs` for `Op::Snapshot`.
pub fn apply(op: &Op, limbs: &mut LimbVec, model: &mut Vec<Limb>) -> Option<LimbVec> {
    match *op {
        Op::Push(limb) => {
            limbs.push(limb);
            model.push(limb);
        }
        Op::Pop => assert_eq!(limbs.pop(), model.pop()),
        Op::Resize(len, fill) => {
            limbs.resize(len, fill);
            model.resize(len, fill);
        }
        Op::Truncate(len) => {
            limbs.truncate(len);
            model.truncate(len);
        }
        Op::Erase(a, b) => {
            let first = a % (model.len() + 1);
            let last = first + b % (model.len() - first + 1);
            assert_eq!(limbs.erase(first..last), first);
            model.drain(first..last);
        }
        Op::Set(index, limb) if !model.is_empty() => {
            let index = index % model.len();
            limbs[index] = limb;
            model[index] = limb;
        }
        Op::Set(..) => {}
        Op::Clear => {
            limbs.clear();
            model.clear();
        }
        Op::Snapshot => return Some(limbs.clone()),
    }
    None
}

/// Every slot past the length is zero, whatever the representation.
pub fn spare_is_zeroed(limbs: &LimbVec) -> bool {
    limbs.spare_limbs().iter().all(|&limb| limb == 0)
}

/// The representation agrees with the length.
pub fn representation_matches_len(limbs: &LimbVec) -> bool {
    limbs.is_inline() == (limbs.len() <= INLINE_CAPACITY)
}
