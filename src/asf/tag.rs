use crate::error::{LoftyError, Result};
use crate::probe::Probe;
use crate::types::file::FileType;
use crate::types::item::{ItemKey, ItemValue, TagItem};
use crate::types::tag::{Accessor, Tag, TagType};

use std::fs::File;

#[derive(Default, PartialEq, Debug, Clone)]
/// An ASF tag
///
/// Mirrors the split between the Content Description Object, which only
/// ever carries these five fixed fields, and the Extended Content
/// Description Object, which carries arbitrary `WM/`-prefixed key/value
/// pairs.
pub struct AsfTag {
	/// The title, from the Content Description Object
	pub(crate) title: Option<String>,
	/// The author, from the Content Description Object
	pub(crate) author: Option<String>,
	/// The copyright, from the Content Description Object
	pub(crate) copyright: Option<String>,
	/// The description, from the Content Description Object
	pub(crate) description: Option<String>,
	/// The rating, from the Content Description Object
	pub(crate) rating: Option<String>,
	/// The `WM/`-prefixed key/value pairs from the Extended Content Description Object
	pub(crate) items: Vec<(String, String)>,
}

impl Accessor for AsfTag {
	fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	fn set_title(&mut self, value: String) {
		self.title = Some(value)
	}

	fn remove_title(&mut self) {
		self.title = None
	}

	fn artist(&self) -> Option<&str> {
		self.author.as_deref()
	}

	fn set_artist(&mut self, value: String) {
		self.author = Some(value)
	}

	fn remove_artist(&mut self) {
		self.author = None
	}

	fn album(&self) -> Option<&str> {
		self.get_item("WM/AlbumTitle")
	}

	fn set_album(&mut self, value: String) {
		self.insert_item(String::from("WM/AlbumTitle"), value, true)
	}

	fn remove_album(&mut self) {
		self.remove_key("WM/AlbumTitle")
	}

	fn genre(&self) -> Option<&str> {
		self.get_item("WM/Genre")
	}

	fn set_genre(&mut self, value: String) {
		self.insert_item(String::from("WM/Genre"), value, true)
	}

	fn remove_genre(&mut self) {
		self.remove_key("WM/Genre")
	}
}

impl AsfTag {
	/// Returns the copyright
	pub fn copyright(&self) -> Option<&str> {
		self.copyright.as_deref()
	}

	/// Sets the copyright
	pub fn set_copyright(&mut self, value: String) {
		self.copyright = Some(value)
	}

	/// Removes the copyright
	pub fn remove_copyright(&mut self) {
		self.copyright = None
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Sets the description
	pub fn set_description(&mut self, value: String) {
		self.description = Some(value)
	}

	/// Removes the description
	pub fn remove_description(&mut self) {
		self.description = None
	}

	/// Returns the rating
	pub fn rating(&self) -> Option<&str> {
		self.rating.as_deref()
	}

	/// Sets the rating
	pub fn set_rating(&mut self, value: String) {
		self.rating = Some(value)
	}

	/// Removes the rating
	pub fn remove_rating(&mut self) {
		self.rating = None
	}

	/// Returns the extended content description's key/value pairs
	pub fn items(&self) -> &[(String, String)] {
		&self.items
	}

	/// Gets an extended content description item by key
	///
	/// NOTE: This is case-sensitive
	pub fn get_item(&self, key: &str) -> Option<&str> {
		self.items
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Inserts an extended content description item
	///
	/// If `replace_all` is true, it will remove all items with the key before insertion
	pub fn insert_item(&mut self, key: String, value: String, replace_all: bool) {
		if replace_all {
			self.items
				.iter()
				.position(|(k, _)| k == &key)
				.map(|p| self.items.remove(p));
		}

		self.items.push((key, value))
	}

	/// Removes an extended content description item by key
	///
	/// NOTE: This is case-sensitive
	pub fn remove_key(&mut self, key: &str) {
		self.items.retain(|(k, _)| k != key);
	}
}

impl AsfTag {
	/// Writes the tag to a file
	///
	/// # Errors
	///
	/// * Attempting to write the tag to a format that does not support it
	pub fn write_to(&self, file: &mut File) -> Result<()> {
		Into::<AsfTagRef>::into(self).write_to(file)
	}
}

impl From<AsfTag> for Tag {
	fn from(input: AsfTag) -> Self {
		let mut tag = Tag::new(TagType::Asf);

		if let Some(title) = input.title {
			tag.insert_item_unchecked(TagItem::new(ItemKey::TrackTitle, ItemValue::Text(title)));
		}

		if let Some(author) = input.author {
			tag.insert_item_unchecked(TagItem::new(ItemKey::TrackArtist, ItemValue::Text(author)));
		}

		if let Some(copyright) = input.copyright {
			tag.insert_item_unchecked(TagItem::new(
				ItemKey::CopyrightMessage,
				ItemValue::Text(copyright),
			));
		}

		if let Some(description) = input.description {
			tag.insert_item_unchecked(TagItem::new(
				ItemKey::Comment,
				ItemValue::Text(description),
			));
		}

		for (k, v) in input.items {
			tag.insert_item_unchecked(TagItem::new(
				ItemKey::from_key(TagType::Asf, &k),
				ItemValue::Text(v),
			));
		}

		tag
	}
}

impl From<Tag> for AsfTag {
	fn from(input: Tag) -> Self {
		let mut asf_tag = Self::default();

		if let Some(title) = input.get_string(&ItemKey::TrackTitle) {
			asf_tag.title = Some(title.to_string());
		}

		if let Some(author) = input.get_string(&ItemKey::TrackArtist) {
			asf_tag.author = Some(author.to_string());
		}

		if let Some(copyright) = input.get_string(&ItemKey::CopyrightMessage) {
			asf_tag.copyright = Some(copyright.to_string());
		}

		if let Some(description) = input.get_string(&ItemKey::Comment) {
			asf_tag.description = Some(description.to_string());
		}

		for item in input.items {
			if item.key() == &ItemKey::TrackTitle
				|| item.key() == &ItemKey::TrackArtist
				|| item.key() == &ItemKey::CopyrightMessage
				|| item.key() == &ItemKey::Comment
			{
				continue;
			}

			let val = match item.value() {
				ItemValue::Text(text) | ItemValue::Locator(text) => text,
				_ => continue,
			};

			// Safe to unwrap, every ItemKey maps into the WM/ namespace
			let key = item.key().map_key(TagType::Asf, true).unwrap();

			asf_tag.items.push((key.to_string(), val.to_string()));
		}

		asf_tag
	}
}

pub(crate) struct AsfTagRef<'a> {
	pub title: Option<&'a str>,
	pub author: Option<&'a str>,
	pub copyright: Option<&'a str>,
	pub description: Option<&'a str>,
	pub rating: Option<&'a str>,
	pub items: Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>,
}

impl<'a> AsfTagRef<'a> {
	fn is_empty(&mut self) -> bool {
		self.title.is_none()
			&& self.author.is_none()
			&& self.copyright.is_none()
			&& self.description.is_none()
			&& self.rating.is_none()
			&& self.items.next().is_none()
	}
}

impl<'a> AsfTagRef<'a> {
	fn write_to(&mut self, file: &mut File) -> Result<()> {
		let probe = Probe::new(file).guess_file_type()?;

		match probe.file_type() {
			Some(FileType::Asf) => {},
			_ => return Err(LoftyError::UnsupportedTag),
		}

		super::write::write_to(probe.into_inner(), self)
	}
}

impl<'a> Into<AsfTagRef<'a>> for &'a AsfTag {
	fn into(self) -> AsfTagRef<'a> {
		AsfTagRef {
			title: self.title.as_deref(),
			author: self.author.as_deref(),
			copyright: self.copyright.as_deref(),
			description: self.description.as_deref(),
			rating: self.rating.as_deref(),
			items: Box::new(self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
		}
	}
}

impl<'a> Into<AsfTagRef<'a>> for &'a Tag {
	fn into(self) -> AsfTagRef<'a> {
		let items = self.items.iter().filter_map(|i| match i.value() {
			ItemValue::Text(val) | ItemValue::Locator(val)
				if ![
					ItemKey::TrackTitle,
					ItemKey::TrackArtist,
					ItemKey::CopyrightMessage,
					ItemKey::Comment,
				]
				.contains(i.key()) =>
			{
				Some((i.key().map_key(TagType::Asf, true).unwrap(), val.as_str()))
			},
			_ => None,
		});

		AsfTagRef {
			title: self.get_string(&ItemKey::TrackTitle),
			author: self.get_string(&ItemKey::TrackArtist),
			copyright: self.get_string(&ItemKey::CopyrightMessage),
			description: self.get_string(&ItemKey::Comment),
			rating: None,
			items: Box::new(items),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::AsfTag;
	use crate::{Tag, TagType};

	#[test]
	fn asf_tag_to_tag() {
		let mut asf_tag = AsfTag::default();

		asf_tag.title = Some(String::from("Foo title"));
		asf_tag.author = Some(String::from("Bar artist"));
		asf_tag.insert_item(
			String::from("WM/AlbumTitle"),
			String::from("Baz album"),
			false,
		);
		asf_tag.description = Some(String::from("Qux comment"));
		asf_tag.insert_item(String::from("WM/TrackNumber"), String::from("1"), false);
		asf_tag.insert_item(String::from("WM/Genre"), String::from("Classical"), false);

		let tag: Tag = asf_tag.into();

		crate::tag_utils::test_utils::verify_tag(&tag, true, true);
	}

	#[test]
	fn tag_to_asf_tag() {
		let tag = crate::tag_utils::test_utils::create_tag(TagType::Asf);

		let asf_tag: AsfTag = tag.into();

		assert_eq!(asf_tag.title.as_deref(), Some("Foo title"));
		assert_eq!(asf_tag.author.as_deref(), Some("Bar artist"));
		assert_eq!(asf_tag.get_item("WM/AlbumTitle"), Some("Baz album"));
		assert_eq!(asf_tag.description.as_deref(), Some("Qux comment"));
		assert_eq!(asf_tag.get_item("WM/TrackNumber"), Some("1"));
		assert_eq!(asf_tag.get_item("WM/Genre"), Some("Classical"));
	}
}
