/// Errors that could occur within Lofty.
#[derive(thiserror::Error, Debug)]
pub enum LoftyError {
	// File extension/format related errors
	/// Unknown file extension.
	#[error("Failed to guess the metadata format based on the file extension.")]
	UnknownFileExtension,
	/// Unsupported file extension
	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
	/// Unable to guess the format
	#[error("No format could be determined from the provided file.")]
	UnknownFormat,
	/// A path's extension did not map to a known [`FileType`](crate::FileType)
	#[error("Failed to guess the file type from extension {0:?}")]
	BadExtension(String),

	// File data related errors
	/// Provided an empty file
	#[error("File contains no data")]
	EmptyFile,
	/// Attempting to write an abnormally large amount of data
	#[error("An abnormally large amount of data was provided, and an overflow occurred")]
	TooMuchData,
	/// Attempted to write a tag to a format that doesn't support it
	#[error("Attempted to write a tag to a format that does not support it")]
	UnsupportedTag,

	// Picture related errors
	/// Picture has an unsupported mime type
	#[error("Unsupported mime type: {0}")]
	UnsupportedMimeType(String),
	/// Provided an invalid picture
	#[error("Picture contains invalid data")]
	NotAPicture,

	// Text codec errors
	/// A string could not be decoded with its declared encoding
	#[error("Text: {0}")]
	TextDecode(&'static str),

	// ID3v2 related errors
	#[cfg(feature = "id3v2")]
	/// A tag claimed to be ID3v2, but its header was invalid
	#[error("ID3v2 tag has an invalid header")]
	FakeTag,
	#[cfg(feature = "id3v2")]
	/// Encountered an ID3v2 major version outside of 2-4
	#[error("Found an invalid ID3v2 version: v2.{0}.{1}")]
	BadId3v2Version(u8, u8),
	#[cfg(feature = "id3v2")]
	/// An ID3v2 frame ID was not valid ASCII
	#[error("ID3v2 frame has an invalid, non UTF-8 ID")]
	BadFrameID,
	#[cfg(feature = "id3v2")]
	/// An ID3v2 frame declared a length that made it impossible to parse
	#[error("ID3v2 frame has an invalid length")]
	BadFrameLength,
	#[cfg(feature = "id3v2")]
	/// A synchronized lyrics/text frame (SYLT) was malformed
	#[error("Failed to parse a synchronized text frame")]
	BadSyncText,
	#[cfg(feature = "id3v2")]
	/// Errors that arise while reading/writing ID3v2 tags
	#[error("ID3v2: {0}")]
	Id3v2(&'static str),

	// Tag related errors
	/// Errors that arrist while parsing OGG pages
	#[cfg(any(
		feature = "format-opus",
		feature = "format-vorbis",
		feature = "format-flac"
	))]
	#[error(transparent)]
	OggPage(#[from] ogg_pager::PageError),
	#[cfg(feature = "format-riff")]
	/// Errors that arise while reading/writing to RIFF files
	#[error("Riff: {0}")]
	Riff(&'static str),
	#[cfg(feature = "format-aiff")]
	/// Errors that arise while reading/writing to AIFF files
	#[error("Aiff: {0}")]
	Aiff(&'static str),
	#[cfg(feature = "format-flac")]
	/// Errors that arise while reading/writing to FLAC files
	#[error("Flac: {0}")]
	Flac(&'static str),
	#[cfg(feature = "format-opus")]
	/// Errors that arise while reading/writing to OPUS files
	#[error("Opus: {0}")]
	Opus(&'static str),
	#[cfg(feature = "format-vorbis")]
	/// Errors that arise while reading/writing to OGG Vorbis files
	#[error("Vorbis: {0}")]
	Vorbis(&'static str),
	#[cfg(any(
		feature = "format-opus",
		feature = "format-vorbis",
		feature = "format-flac"
	))]
	/// Errors that arise while reading/writing to OGG files
	#[error("OGG: {0}")]
	Ogg(&'static str),
	/// Errors that arise while reading/writing to MPEG files
	#[error("MPEG: {0}")]
	Mp3(&'static str),
	#[cfg(feature = "format-ape")]
	/// Errors that arise while reading/writing to APE files
	#[error("APE: {0}")]
	Ape(&'static str),
	#[cfg(feature = "format-mp4")]
	/// Errors that arise while reading/writing to MP4 files
	#[error("MP4: {0}")]
	Mp4(&'static str),
	#[cfg(feature = "format-mp4")]
	/// An MP4 atom was malformed or missing a required child atom
	#[error("MP4: {0}")]
	BadAtom(&'static str),
	#[cfg(feature = "format-riff")]
	/// Errors that arise while reading/writing to WAV files
	#[error("WAV: {0}")]
	Wav(&'static str),

	// ASF related errors
	#[cfg(feature = "asf")]
	/// Errors that arise while reading/writing ASF files
	#[error("ASF: {0}")]
	Asf(&'static str),

	// DSF related errors
	#[cfg(feature = "dsf")]
	/// Errors that arise while reading/writing DSF files
	#[error("DSF: {0}")]
	Dsf(&'static str),

	// IFD/EXIF related errors
	#[cfg(feature = "ifd")]
	/// Errors that arise while decoding/encoding an IFD/EXIF directory
	#[error("IFD: {0}")]
	Ifd(&'static str),

	// Image container related errors
	#[cfg(any(feature = "format-jpeg", feature = "format-tiff", feature = "format-png"))]
	/// Errors that arise while reading/writing image containers (JPEG/TIFF/PNG)
	#[error("Image: {0}")]
	Image(&'static str),

	// Conversions for std Errors
	/// Unable to convert bytes to a String
	#[error(transparent)]
	FromUtf8(#[from] std::string::FromUtf8Error),
	/// Represents all cases of `std::io::Error`.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Result of tag operations.
pub type Result<T> = std::result::Result<T, LoftyError>;
