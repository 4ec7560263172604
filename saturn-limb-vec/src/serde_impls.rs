//! `serde` support: a [`LimbVec`] serializes as a flat sequence of limbs, least significant
//! first, and deserializes into whichever representation fits.

use core::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Limb, LimbVec};

impl Serialize for LimbVec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.as_slice())
    }
}

impl<'de> Deserialize<'de> for LimbVec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(LimbVecVisitor)
    }
}

struct LimbVecVisitor;

impl<'de> Visitor<'de> for LimbVecVisitor {
    type Value = LimbVec;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of 32-bit limbs")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<LimbVec, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut limbs = LimbVec::new();
        while let Some(limb) = seq.next_element::<Limb>()? {
            limbs.try_push(limb).map_err(de::Error::custom)?;
        }
        Ok(limbs)
    }
}
