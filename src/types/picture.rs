use crate::{LoftyError, Result};

use std::borrow::Cow;
use std::convert::{TryFrom, TryInto};
#[cfg(any(
	feature = "format-id3",
	feature = "format-opus",
	feature = "format-vorbis",
	feature = "format-flac",
	feature = "format-ape",
))]
use std::io::Cursor;
use std::io::Read;

#[cfg(any(
	feature = "format-id3",
	feature = "format-opus",
	feature = "format-vorbis",
	feature = "format-flac",
))]
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Seek, SeekFrom};

#[cfg(feature = "format-ape")]
pub const APE_PICTYPES: [&str; 21] = [
	"Other",
	"Png Icon",
	"Icon",
	"Front",
	"Back",
	"Leaflet",
	"Media",
	"Lead Artist",
	"Artist",
	"Conductor",
	"Band",
	"Composer",
	"Lyricist",
	"Recording Location",
	"During Recording",
	"During Performance",
	"Video Capture",
	"Fish",
	"Illustration",
	"Band Logotype",
	"Publisher Logotype",
];

/// Mime types for covers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
}

impl MimeType {
	#[cfg(feature = "format-ape")]
	/// Converts the `MimeType` to an ape str
	pub fn as_ape(self) -> &'static [u8; 4] {
		match self {
			MimeType::Png => b"PNG\0",
			MimeType::Jpeg => b"JPEG",
			MimeType::Tiff => b"TIFF",
			MimeType::Bmp => b"BMP\0",
			MimeType::Gif => b"GIF\0",
		}
	}
}

impl TryFrom<&str> for MimeType {
	type Error = LoftyError;

	fn try_from(inp: &str) -> Result<Self> {
		Ok(match inp {
			"image/jpeg" => MimeType::Jpeg,
			"image/png" => MimeType::Png,
			"image/tiff" => MimeType::Tiff,
			"image/bmp" => MimeType::Bmp,
			"image/gif" => MimeType::Gif,
			_ => return Err(LoftyError::UnsupportedMimeType(inp.to_string())),
		})
	}
}

impl From<MimeType> for &'static str {
	fn from(mt: MimeType) -> Self {
		match mt {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
		}
	}
}

impl From<MimeType> for String {
	fn from(mt: MimeType) -> Self {
		<MimeType as Into<&'static str>>::into(mt).to_owned()
	}
}

pub trait PicType {
	#[cfg(any(
		feature = "format-id3",
		feature = "format-vorbis",
		feature = "format-opus",
		feature = "format-flac"
	))]
	fn as_u32(&self) -> u32;
	#[cfg(any(
		feature = "format-id3",
		feature = "format-vorbis",
		feature = "format-opus",
		feature = "format-flac"
	))]
	fn from_u32(bytes: u32) -> PictureType;
	#[cfg(feature = "format-ape")]
	fn as_ape_key(&self) -> &str;
	#[cfg(feature = "format-ape")]
	fn from_ape_key(key: &str) -> PictureType;
}

/// The picture type
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PicType for PictureType {
	// ID3/OGG specific methods

	#[cfg(any(
		feature = "format-id3",
		feature = "format-vorbis",
		feature = "format-opus",
		feature = "format-flac"
	))]
	fn as_u32(&self) -> u32 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => u32::from(i.to_owned()),
		}
	}

	#[cfg(any(
		feature = "format-id3",
		feature = "format-vorbis",
		feature = "format-opus",
		feature = "format-flac"
	))]
	fn from_u32(bytes: u32) -> Self {
		match bytes {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i as u8),
		}
	}

	// APE specific methods

	#[cfg(feature = "format-ape")]
	fn as_ape_key(&self) -> &str {
		match self {
			Self::Other => "Cover Art (Other)",
			Self::Icon => "Cover Art (Png Icon)",
			Self::OtherIcon => "Cover Art (Icon)",
			Self::CoverFront => "Cover Art (Front)",
			Self::CoverBack => "Cover Art (Back)",
			Self::Leaflet => "Cover Art (Leaflet)",
			Self::Media => "Cover Art (Media)",
			Self::LeadArtist => "Cover Art (Lead Artist)",
			Self::Artist => "Cover Art (Artist)",
			Self::Conductor => "Cover Art (Conductor)",
			Self::Band => "Cover Art (Band)",
			Self::Composer => "Cover Art (Composer)",
			Self::Lyricist => "Cover Art (Lyricist)",
			Self::RecordingLocation => "Cover Art (Recording Location)",
			Self::DuringRecording => "Cover Art (During Recording)",
			Self::DuringPerformance => "Cover Art (During Performance)",
			Self::ScreenCapture => "Cover Art (Video Capture)",
			Self::BrightFish => "Cover Art (Fish)",
			Self::Illustration => "Cover Art (Illustration)",
			Self::BandLogo => "Cover Art (Band Logotype)",
			Self::PublisherLogo => "Cover Art (Publisher Logotype)",
			Self::Undefined(_) => "",
		}
	}

	#[cfg(feature = "format-ape")]
	fn from_ape_key(key: &str) -> Self {
		match key {
			"Cover Art (Other)" => Self::Other,
			"Cover Art (Png Icon)" => Self::Icon,
			"Cover Art (Icon)" => Self::OtherIcon,
			"Cover Art (Front)" => Self::CoverFront,
			"Cover Art (Back)" => Self::CoverBack,
			"Cover Art (Leaflet)" => Self::Leaflet,
			"Cover Art (Media)" => Self::Media,
			"Cover Art (Lead Artist)" => Self::LeadArtist,
			"Cover Art (Artist)" => Self::Artist,
			"Cover Art (Conductor)" => Self::Conductor,
			"Cover Art (Band)" => Self::Band,
			"Cover Art (Composer)" => Self::Composer,
			"Cover Art (Lyricist)" => Self::Lyricist,
			"Cover Art (Recording Location)" => Self::RecordingLocation,
			"Cover Art (During Recording)" => Self::DuringRecording,
			"Cover Art (During Performance)" => Self::DuringPerformance,
			"Cover Art (Video Capture)" => Self::ScreenCapture,
			"Cover Art (Fish)" => Self::BrightFish,
			"Cover Art (Illustration)" => Self::Illustration,
			"Cover Art (Band Logotype)" => Self::BandLogo,
			"Cover Art (Publisher Logotype)" => Self::PublisherLogo,
			_ => Self::Undefined(0),
		}
	}
}

/// Width, height, color depth and palette size for a [`Picture`]
///
/// [`Picture`]'s own `width`/`height`/`color_depth`/`num_colors` fields are only
/// populated by formats that carry them natively (FLAC, ID3v2 APIC); other sources
/// (APE cover art, a `Tag`'s generic `pictures` list) always leave them at zero.
/// [`PictureInformation::from_picture`] fills them in by inspecting the picture's
/// own data, as required when writing a FLAC `METADATA_BLOCK_PICTURE`.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq)]
pub struct PictureInformation {
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
	/// The picture's color depth in bits per pixel
	pub color_depth: u32,
	/// The number of colors used, for indexed-color formats (0 otherwise)
	pub num_colors: u32,
}

impl PictureInformation {
	/// Reads the dimensions and color depth out of a [`Picture`]'s image data
	///
	/// Falls back to the picture's own `width`/`height`/`color_depth`/`num_colors`
	/// fields if the format isn't recognized or the data is malformed.
	///
	/// # Errors
	///
	/// This function does not currently fail, but returns a `Result` to allow
	/// stricter validation in the future without a breaking API change.
	pub fn from_picture(picture: &Picture) -> Result<Self> {
		let fallback = Self {
			width: picture.width,
			height: picture.height,
			color_depth: picture.color_depth,
			num_colors: picture.num_colors,
		};

		Ok(match picture.mime_type {
			MimeType::Png => png_information(&picture.data).unwrap_or(fallback),
			MimeType::Jpeg => jpeg_information(&picture.data).unwrap_or(fallback),
			MimeType::Gif => gif_information(&picture.data).unwrap_or(fallback),
			MimeType::Bmp | MimeType::Tiff => fallback,
		})
	}

	/// Reads the dimensions and color depth out of raw PNG data
	///
	/// # Errors
	///
	/// Returns [`NotAPicture`](LoftyError::NotAPicture) if the data isn't a valid PNG.
	pub fn from_png(data: &[u8]) -> Result<Self> {
		png_information(data).ok_or(LoftyError::NotAPicture)
	}

	/// Reads the dimensions and color depth out of raw JPEG data
	///
	/// # Errors
	///
	/// Returns [`NotAPicture`](LoftyError::NotAPicture) if the data isn't a valid JPEG.
	pub fn from_jpeg(data: &[u8]) -> Result<Self> {
		jpeg_information(data).ok_or(LoftyError::NotAPicture)
	}
}

fn png_information(data: &[u8]) -> Option<PictureInformation> {
	// Signature (8) + IHDR length (4) + "IHDR" (4), then width/height/bit depth/color type
	if data.len() < 29 || &data[12..16] != b"IHDR" {
		return None;
	}

	let width = u32::from_be_bytes(data[16..20].try_into().ok()?);
	let height = u32::from_be_bytes(data[20..24].try_into().ok()?);
	let bit_depth = u32::from(data[24]);
	let color_type = data[25];

	let channels = match color_type {
		0 => 1, // Grayscale
		2 => 3, // RGB
		3 => 1, // Palette index
		4 => 2, // Grayscale + alpha
		6 => 4, // RGBA
		_ => return None,
	};

	Some(PictureInformation {
		width,
		height,
		color_depth: bit_depth * channels,
		num_colors: if color_type == 3 { 256 } else { 0 },
	})
}

fn jpeg_information(data: &[u8]) -> Option<PictureInformation> {
	let mut pos = 2; // Skip the SOI marker

	while pos + 4 <= data.len() {
		if data[pos] != 0xFF {
			return None;
		}

		let marker = data[pos + 1];

		// SOF0-SOF3, SOF5-SOF7, SOF9-SOF11, SOF13-SOF15 carry the frame dimensions
		let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);

		let segment_len = u16::from_be_bytes(data[pos + 2..pos + 4].try_into().ok()?) as usize;

		if is_sof {
			if pos + 4 + 5 > data.len() {
				return None;
			}

			let precision = u32::from(data[pos + 4]);
			let height = u32::from(u16::from_be_bytes(data[pos + 5..pos + 7].try_into().ok()?));
			let width = u32::from(u16::from_be_bytes(data[pos + 7..pos + 9].try_into().ok()?));
			let components = u32::from(data[pos + 9]);

			return Some(PictureInformation {
				width,
				height,
				color_depth: precision * components,
				num_colors: 0,
			});
		}

		if marker == 0xD8 || marker == 0xD9 {
			pos += 2;
			continue;
		}

		pos += 2 + segment_len;
	}

	None
}

fn gif_information(data: &[u8]) -> Option<PictureInformation> {
	if data.len() < 11 || !(&data[..6] == b"GIF87a" || &data[..6] == b"GIF89a") {
		return None;
	}

	let width = u32::from(u16::from_le_bytes(data[6..8].try_into().ok()?));
	let height = u32::from(u16::from_le_bytes(data[8..10].try_into().ok()?));

	let packed = data[10];
	let has_color_table = packed & 0x80 != 0;
	let color_table_size = 1_u32 << ((packed & 0x07) + 1);

	Some(PictureInformation {
		width,
		height,
		color_depth: if has_color_table { 8 } else { 0 },
		num_colors: if has_color_table { color_table_size } else { 0 },
	})
}

/// Sniffs a mime type from an image's magic bytes, for [`Picture::from_reader`]
fn sniff_mime_type(data: &[u8]) -> Option<MimeType> {
	if data.starts_with(b"\x89PNG\r\n\x1a\n") {
		Some(MimeType::Png)
	} else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
		Some(MimeType::Jpeg)
	} else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
		Some(MimeType::Gif)
	} else if data.starts_with(b"BM") {
		Some(MimeType::Bmp)
	} else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
		Some(MimeType::Tiff)
	} else {
		None
	}
}

#[cfg(feature = "format-id3")]
/// Maps a [`MimeType`] to the 3-byte image format code used by the ID3v2.2 `PIC` frame
fn mime_type_to_pic_format(mime_type: MimeType) -> Result<&'static [u8; 3]> {
	Ok(match mime_type {
		MimeType::Png => b"PNG",
		MimeType::Jpeg => b"JPG",
		MimeType::Bmp => b"BMP",
		MimeType::Gif => b"GIF",
		MimeType::Tiff => {
			return Err(LoftyError::UnsupportedMimeType(String::from(
				"image/tiff has no ID3v2.2 PIC image format equivalent",
			)))
		},
	})
}

#[cfg(feature = "format-id3")]
/// Maps a `PIC` frame's 3-byte image format code to a [`MimeType`]
fn pic_format_to_mime_type(format: &[u8; 3]) -> Result<MimeType> {
	Ok(match format {
		b"PNG" => MimeType::Png,
		b"JPG" => MimeType::Jpeg,
		b"BMP" => MimeType::Bmp,
		b"GIF" => MimeType::Gif,
		b"TIF" => MimeType::Tiff,
		_ => {
			return Err(LoftyError::UnsupportedMimeType(
				String::from_utf8_lossy(format).into_owned(),
			))
		},
	})
}

/// Represents a picture, with its data and mime type.
///
/// NOTE: The width, height, color_depth, and num_color fields can only be read from formats supporting FLAC pictures
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	/// The picture type
	pub pic_type: PictureType,
	/// The picture's mimetype
	pub mime_type: MimeType,
	/// The picture's description
	pub description: Option<Cow<'static, str>>,
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
	/// The picture's color depth in bits per pixel
	pub color_depth: u32,
	/// The number of colors used
	pub num_colors: u32,
	/// The binary data of the picture
	pub data: Cow<'static, [u8]>,
}

impl Picture {
	/// Create a new `Picture`
	pub fn new(
		pic_type: PictureType,
		mime_type: MimeType,
		description: Option<String>,
		dimensions: (u32, u32),
		color_depth: u32,
		num_colors: u32,
		data: Vec<u8>,
	) -> Self {
		Self {
			pic_type,
			mime_type,
			description: description.map(Cow::from),
			width: dimensions.0,
			height: dimensions.1,
			color_depth,
			num_colors,
			data: Cow::from(data),
		}
	}

	#[cfg(feature = "format-id3")]
	/// Convert the [`Picture`] to an ID3v2 `APIC`/`PIC` frame content byte vec
	///
	/// `version` selects the frame layout: [`Id3v2Version::V2`](crate::id3::v2::Id3v2Version::V2)
	/// writes the old `PIC` frame (3-byte image format instead of a MIME string), `V3`/`V4`
	/// write `APIC`. `encoding` controls the description string's encoding; the MIME/format
	/// field is always Latin-1, per spec.
	///
	/// # Errors
	///
	/// Returns [`UnsupportedMimeType`](LoftyError::UnsupportedMimeType) if `version` is
	/// [`Id3v2Version::V2`](crate::id3::v2::Id3v2Version::V2) and the picture's mime type has
	/// no 3-letter `PIC` image format equivalent.
	pub fn as_apic_bytes(
		&self,
		version: crate::id3::v2::Id3v2Version,
		encoding: crate::id3::v2::TextEncoding,
	) -> Result<Vec<u8>> {
		use crate::id3::v2::util::text_utils::encode_text;
		use crate::id3::v2::Id3v2Version;

		let mut data = vec![encoding as u8];

		match version {
			Id3v2Version::V2 => data.extend_from_slice(mime_type_to_pic_format(self.mime_type)?),
			Id3v2Version::V3 | Id3v2Version::V4 => {
				data.extend(encode_text(
					String::from(self.mime_type).as_str(),
					crate::id3::v2::TextEncoding::Latin1,
					true,
				));
			},
		}

		data.push(self.pic_type.as_u32() as u8);

		if let Some(desc) = &self.description {
			data.extend(encode_text(desc, encoding, true));
		} else {
			data.extend(encode_text("", encoding, true));
		}

		data.extend(self.data.iter());

		Ok(data)
	}

	#[cfg(feature = "format-id3")]
	/// Get a [`Picture`] and its description's [`TextEncoding`](crate::id3::v2::TextEncoding)
	/// from an ID3v2 `APIC`/`PIC` frame's content
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`][LoftyError::NotAPicture] if at any point it's unable to parse the data
	pub fn from_apic_bytes(
		bytes: &[u8],
		version: crate::id3::v2::Id3v2Version,
	) -> Result<(Self, crate::id3::v2::TextEncoding)> {
		use crate::id3::v2::util::text_utils::{decode_text, TextEncoding};
		use crate::id3::v2::Id3v2Version;

		let mut content = bytes;

		if content.is_empty() {
			return Err(LoftyError::NotAPicture);
		}

		let encoding =
			TextEncoding::from_u8(content.read_u8()?).ok_or(LoftyError::NotAPicture)?;

		let mime_type = match version {
			Id3v2Version::V2 => {
				if content.len() < 3 {
					return Err(LoftyError::NotAPicture);
				}

				let mut format = [0; 3];
				content.read_exact(&mut format)?;

				pic_format_to_mime_type(&format)?
			},
			Id3v2Version::V3 | Id3v2Version::V4 => {
				let mime_str =
					decode_text(&mut content, TextEncoding::Latin1, true)?.unwrap_or_default();

				MimeType::try_from(mime_str.as_str())?
			},
		};

		let pic_type = PictureType::from_u32(u32::from(content.read_u8()?));

		let description = decode_text(&mut content, encoding, true)?.map(Cow::from);

		let mut data = Vec::new();
		content.read_to_end(&mut data)?;

		Ok((
			Self {
				pic_type,
				mime_type,
				description,
				width: 0,
				height: 0,
				color_depth: 0,
				num_colors: 0,
				data: Cow::from(data),
			},
			encoding,
		))
	}

	/// Reads a [`Picture`] out of raw image bytes, sniffing its format from the file signature
	///
	/// The result's `pic_type` is [`PictureType::Other`] and its `description` is `None`;
	/// set them with [`Picture::set_pic_type`]/[`Picture::set_description`] if needed.
	///
	/// # Errors
	///
	/// Returns [`UnsupportedMimeType`](LoftyError::UnsupportedMimeType) if the signature
	/// doesn't match a known image format.
	pub fn from_reader<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let mime_type = sniff_mime_type(&data)
			.ok_or_else(|| LoftyError::UnsupportedMimeType(String::from("unrecognized image")))?;

		Ok(Self {
			pic_type: PictureType::Other,
			mime_type,
			description: None,
			width: 0,
			height: 0,
			color_depth: 0,
			num_colors: 0,
			data: Cow::from(data),
		})
	}

	/// The picture's mime type
	pub fn mime_type(&self) -> &MimeType {
		&self.mime_type
	}

	/// The picture's raw image data
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Sets the picture's description
	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description.map(Cow::from);
	}

	/// Sets the picture's type
	pub fn set_pic_type(&mut self, pic_type: PictureType) {
		self.pic_type = pic_type;
	}

	#[cfg(any(
		feature = "format-opus",
		feature = "format-vorbis",
		feature = "format-flac"
	))]
	/// Convert the [`Picture`] to a FLAC `METADATA_BLOCK_PICTURE`
	///
	/// `info` supplies the width/height/color depth/palette size fields, since
	/// [`Picture`]'s own copies of them are often zero (see [`PictureInformation`]).
	/// When `base64` is set, the block is base64-encoded, as required when it's
	/// embedded in a Vorbis comment under the `METADATA_BLOCK_PICTURE` key; native
	/// FLAC picture metadata blocks store it raw.
	pub fn as_flac_bytes(&self, info: PictureInformation, base64: bool) -> Vec<u8> {
		let mut data: Vec<u8> = Vec::new();

		let picture_type = self.pic_type.as_u32().to_be_bytes();

		let mime_str = String::from(self.mime_type);
		let mime_len = mime_str.len() as u32;

		data.extend(picture_type.iter());
		data.extend(mime_len.to_be_bytes().iter());
		data.extend(mime_str.as_bytes().iter());

		if let Some(desc) = self.description.clone() {
			let desc_str = desc.to_string();
			let desc_len = desc_str.len() as u32;

			data.extend(desc_len.to_be_bytes().iter());
			data.extend(desc_str.as_bytes().iter());
		} else {
			data.extend(0_u32.to_be_bytes().iter());
		}

		data.extend(info.width.to_be_bytes().iter());
		data.extend(info.height.to_be_bytes().iter());
		data.extend(info.color_depth.to_be_bytes().iter());
		data.extend(info.num_colors.to_be_bytes().iter());

		let pic_data = &self.data;
		let pic_data_len = pic_data.len() as u32;

		data.extend(pic_data_len.to_be_bytes().iter());
		data.extend(pic_data.iter());

		if base64 {
			return base64::encode(data).into_bytes();
		}

		data
	}

	#[cfg(any(
		feature = "format-opus",
		feature = "format-vorbis",
		feature = "format-flac"
	))]
	/// Get a [`Picture`] and its [`PictureInformation`] from a FLAC `METADATA_BLOCK_PICTURE`
	///
	/// Accepts both the raw block (as found in a native FLAC picture metadata block)
	/// and the base64-encoded form used inside a Vorbis comment.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`][LoftyError::NotAPicture] if at any point it's unable to parse the data
	pub fn from_flac_bytes(bytes: &[u8]) -> Result<(Self, PictureInformation)> {
		let data = match base64::decode(bytes) {
			Ok(o) => o,
			Err(_) => bytes.to_vec(),
		};

		let mut cursor = Cursor::new(data);

		if let Ok(bytes) = cursor.read_u32::<BigEndian>() {
			let picture_type = PictureType::from_u32(bytes);

			if let Ok(mime_len) = cursor.read_u32::<BigEndian>() {
				let mut buf = vec![0; mime_len as usize];
				cursor.read_exact(&mut buf)?;

				if let Ok(mime_type_str) = String::from_utf8(buf) {
					if let Ok(mime_type) = MimeType::try_from(&*mime_type_str) {
						let mut description = None;

						if let Ok(desc_len) = cursor.read_u32::<BigEndian>() {
							if cursor.get_ref().len()
								>= (cursor.position() as u32 + desc_len) as usize
							{
								let mut buf = vec![0; desc_len as usize];
								cursor.read_exact(&mut buf)?;

								if let Ok(desc) = String::from_utf8(buf) {
									description = Some(Cow::from(desc));
								}
							} else {
								cursor.set_position(cursor.position() - 4)
							}
						}

						if let (Ok(width), Ok(height), Ok(color_depth), Ok(num_colors)) = (
							cursor.read_u32::<BigEndian>(),
							cursor.read_u32::<BigEndian>(),
							cursor.read_u32::<BigEndian>(),
							cursor.read_u32::<BigEndian>(),
						) {
							if let Ok(data_len) = cursor.read_u32::<BigEndian>() {
								let mut binary = vec![0; data_len as usize];

								if let Ok(()) = cursor.read_exact(&mut binary) {
									let info = PictureInformation {
										width,
										height,
										color_depth,
										num_colors,
									};

									return Ok((
										Self {
											pic_type: picture_type,
											mime_type,
											description,
											width,
											height,
											color_depth,
											num_colors,
											data: Cow::from(binary),
										},
										info,
									));
								}
							}
						}
					}
				}
			}
		}

		Err(LoftyError::NotAPicture)
	}

	#[cfg(feature = "format-ape")]
	/// Convert the [`Picture`] back to an APEv2 byte vec:
	///
	/// * APEv2 Cover Art
	pub fn as_ape_bytes(&self) -> Vec<u8> {
		let mut data: Vec<u8> = Vec::new();

		if let Some(desc) = &self.description {
			data.extend(desc.as_bytes().iter());
		}

		data.extend([0].iter());
		data.extend(self.data.iter());

		data
	}

	#[cfg(feature = "format-ape")]
	/// Get a [`Picture`] from an APEv2 binary item:
	///
	/// * APEv2 Cover Art
	///
	/// NOTES:
	///
	/// * This function expects the key and its trailing null byte to have been removed
	/// * Since APE tags only store the binary data, the width, height, color_depth, and num_colors fields will be zero.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`][LoftyError::NotAPicture] if at any point it's unable to parse the data
	pub fn from_ape_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
		if !bytes.is_empty() {
			let pic_type = PictureType::from_ape_key(key);

			let mut cursor = Cursor::new(bytes);

			let description = {
				let mut text = String::new();

				while let Ok(ch) = cursor.read_u8() {
					if ch != b'\0' {
						text.push(char::from(ch));
						continue;
					}

					break;
				}

				(!text.is_empty()).then(|| Cow::from(text))
			};

			let mime_type = {
				let mut identifier = [0; 4];
				cursor.read_exact(&mut identifier)?;

				cursor.seek(SeekFrom::Current(-4))?;

				match identifier {
					[0x89, b'P', b'N', b'G'] => MimeType::Png,
					_ if [0xFF, 0xD8] == identifier[..2] => MimeType::Jpeg,
					_ if b"GIF" == &identifier[..3] => MimeType::Gif,
					_ if b"BM" == &identifier[..2] => MimeType::Bmp,
					_ if b"II" == &identifier[..2] => MimeType::Tiff,
					_ => return Err(LoftyError::NotAPicture),
				}
			};

			let pos = cursor.position() as usize;
			let data = Cow::from(cursor.into_inner()[pos..].to_vec());

			return Ok(Picture {
				pic_type,
				mime_type,
				description,
				width: 0,
				height: 0,
				color_depth: 0,
				num_colors: 0,
				data,
			});
		}

		Err(LoftyError::NotAPicture)
	}
}
