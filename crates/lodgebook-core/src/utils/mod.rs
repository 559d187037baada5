//! Shared utility functions.

pub mod normalize;

pub use normalize::{fold_diacritics, normalize_label, normalize_name};
