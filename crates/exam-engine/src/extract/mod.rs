//! Low-level span extraction shared by the extractor variants.

pub mod anchor;
pub mod option;
