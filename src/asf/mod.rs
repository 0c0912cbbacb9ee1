//! ASF/WMA specific items
//!
//! ## File notes
//!
//! The only supported tag format is [`AsfTag`], itself a merge of the
//! Content Description Object (title/author/copyright/description/rating)
//! and the Extended Content Description Object (arbitrary `WM/` key/value
//! pairs).
mod guid;
mod object;
mod properties;
mod read;
pub(crate) mod tag;
pub(crate) mod write;

pub use properties::AsfProperties;
pub use tag::AsfTag;

use crate::tag_utils::tag_methods;
use crate::types::file::{AudioFile, FileType, TaggedFile};
use crate::{FileProperties, Result, TagType};

use std::io::{Read, Seek};

/// An ASF/WMA file
pub struct AsfFile {
	/// The parsed tag, if it exists
	pub(crate) tag: Option<AsfTag>,
	/// The file's audio properties
	pub(crate) properties: AsfProperties,
}

impl From<AsfFile> for TaggedFile {
	fn from(input: AsfFile) -> Self {
		Self {
			ty: FileType::Asf,
			properties: FileProperties::from(input.properties),
			tags: if let Some(tag) = input.tag {
				vec![tag.into()]
			} else {
				Vec::new()
			},
		}
	}
}

impl AudioFile for AsfFile {
	type Properties = AsfProperties;

	fn read_from<R>(reader: &mut R, read_properties: bool) -> Result<Self>
	where
		R: Read + Seek,
	{
		read::read_from(reader, read_properties)
	}

	fn properties(&self) -> &Self::Properties {
		&self.properties
	}

	fn contains_tag(&self) -> bool {
		self.tag.is_some()
	}

	fn contains_tag_type(&self, tag_type: &TagType) -> bool {
		tag_type == &TagType::Asf && self.tag.is_some()
	}
}

impl AsfFile {
	tag_methods! {
		;
		ASF, tag, AsfTag
	}
}
