//! Still image containers
//!
//! Unlike the audio formats elsewhere in this crate, images have no
//! unified [`Tag`](crate::types::tag::Tag) surface: JPEG, PNG and TIFF each
//! expose their own metadata shape (EXIF directory, optional XMP, optional
//! text/comment fields). [`ImageFile`] gives them a common read surface,
//! mirroring [`AudioFile`](crate::types::file::AudioFile) for the audio
//! formats elsewhere in this crate — but these are read directly through
//! the per-format modules below rather than through [`Probe`](crate::probe::Probe).
#[cfg(feature = "format-jpeg")]
pub mod jpeg;
pub mod properties;
#[cfg(feature = "format-png")]
pub mod png;
#[cfg(feature = "format-tiff")]
pub mod tiff;

#[cfg(feature = "format-jpeg")]
pub use jpeg::{JpegFile, JpegTag};
pub use properties::ImageProperties;
#[cfg(feature = "format-png")]
pub use png::{PngFile, PngTag};
#[cfg(feature = "format-tiff")]
pub use tiff::TiffFile;

use crate::error::Result;

use std::io::{Read, Seek};

/// Common read surface for still image containers
pub trait ImageFile: Sized {
	/// The format's own metadata representation
	type Tag;

	/// Reads a file's metadata and pixel dimensions from `reader`
	fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self>;

	/// The pixel dimensions read from the container's own header
	fn properties(&self) -> &ImageProperties;

	/// The parsed metadata, if any was found
	fn tag(&self) -> Option<&Self::Tag>;
}
