//! Individual ID3v2 frame value types that need more than a plain string or byte vec
pub(crate) mod encapsulated_object;
pub(crate) mod sync_text;
