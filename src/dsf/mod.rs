//! DSF specific items
//!
//! ## File notes
//!
//! DSF carries no tag format of its own; the only supported tag is
//! [`Id3v2Tag`](crate::id3::v2::Id3v2Tag), appended after the audio data and
//! located through the `DSD ` chunk's metadata pointer.
mod properties;
mod read;
pub(crate) mod write;

pub use properties::DsfProperties;

#[cfg(feature = "id3v2")]
use crate::id3::v2::tag::Id3v2Tag;
use crate::tag_utils::tag_methods;
use crate::types::file::{AudioFile, FileType, TaggedFile};
use crate::{FileProperties, Result, TagType};

use std::io::{Read, Seek};

/// A DSF file
pub struct DsfFile {
	#[cfg(feature = "id3v2")]
	/// The parsed ID3v2 tag, if it exists
	pub(crate) id3v2: Option<Id3v2Tag>,
	/// The file's audio properties
	pub(crate) properties: DsfProperties,
}

impl From<DsfFile> for TaggedFile {
	fn from(input: DsfFile) -> Self {
		Self {
			ty: FileType::Dsf,
			properties: FileProperties::from(input.properties),
			tags: {
				#[cfg(feature = "id3v2")]
				if let Some(id3v2) = input.id3v2 {
					vec![id3v2.into()]
				} else {
					Vec::new()
				}

				#[cfg(not(feature = "id3v2"))]
				Vec::new()
			},
		}
	}
}

impl AudioFile for DsfFile {
	type Properties = DsfProperties;

	fn read_from<R>(reader: &mut R, read_properties: bool) -> Result<Self>
	where
		R: Read + Seek,
	{
		read::read_from(reader, read_properties)
	}

	fn properties(&self) -> &Self::Properties {
		&self.properties
	}

	#[allow(unreachable_code)]
	fn contains_tag(&self) -> bool {
		#[cfg(feature = "id3v2")]
		return self.id3v2.is_some();

		false
	}

	#[allow(unreachable_code, unused_variables)]
	fn contains_tag_type(&self, tag_type: &TagType) -> bool {
		#[cfg(feature = "id3v2")]
		return tag_type == &TagType::Id3v2 && self.id3v2.is_some();

		false
	}
}

impl DsfFile {
	tag_methods! {
		#[cfg(feature = "id3v2")];
		ID3v2, id3v2, Id3v2Tag
	}
}
