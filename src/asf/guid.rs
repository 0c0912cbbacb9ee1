//! Well-known ASF object GUIDs
//!
//! Stored little-endian in the stream, as all other ASF integers are; these
//! constants are already in the byte order they appear on disk.

pub(crate) const HEADER_OBJECT: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

pub(crate) const FILE_PROPERTIES_OBJECT: [u8; 16] = [
	0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];

pub(crate) const STREAM_PROPERTIES_OBJECT: [u8; 16] = [
	0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];

pub(crate) const HEADER_EXTENSION_OBJECT: [u8; 16] = [
	0xB5, 0x03, 0xBF, 0x5F, 0x2E, 0xA9, 0xCF, 0x11, 0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];

pub(crate) const CONTENT_DESCRIPTION_OBJECT: [u8; 16] = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

pub(crate) const EXTENDED_CONTENT_DESCRIPTION_OBJECT: [u8; 16] = [
	0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
];

/// `audio` stream type, used to tell a [`STREAM_PROPERTIES_OBJECT`] apart from a video one
pub(crate) const AUDIO_MEDIA: [u8; 16] = [
	0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
];
