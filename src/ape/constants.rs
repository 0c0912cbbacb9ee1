/// The 8-byte preamble found at the start of both the `APE` tag header and footer
pub(crate) const APE_PREAMBLE: &[u8] = b"APETAGEX";

/// Keys an `APE` item is forbidden from using, since they collide with other formats/metadata
pub(crate) const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];
