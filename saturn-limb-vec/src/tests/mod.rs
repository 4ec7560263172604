//! Property tests exercising `LimbVec` against a plain `Vec<Limb>` model.

mod common;
