//! A unified read/write view over several coexisting concrete tags.
//!
//! Many containers can carry more than one tag format at once (an MP3 with
//! both an ID3v2 and an ID3v1 tag, for example). [`TaggedFile`](super::file::TaggedFile)
//! already stores every tag it finds in `self.tags: Vec<Tag>`; `CombinedTag`
//! is a thin, non-owning view over that same vector that composes them into
//! one surface: reads return the first non-empty answer, writes go to every
//! child capable of representing the field.

use super::item::{ItemKey, ItemValue, TagItem};
use super::picture::Picture;
use super::tag::Tag;

/// A merged read/write view over an ordered list of concrete [`Tag`]s.
///
/// Construct one with [`TaggedFile::combined`](super::file::TaggedFile::combined)
/// or [`CombinedTag::new`] over any `&mut Vec<Tag>` (most commonly the one a
/// `TaggedFile` already owns).
pub struct CombinedTag<'a> {
	tags: &'a mut Vec<Tag>,
}

impl<'a> CombinedTag<'a> {
	/// Wraps an existing list of tags
	pub fn new(tags: &'a mut Vec<Tag>) -> Self {
		Self { tags }
	}

	/// Returns the first non-empty string value for `key`, checking each
	/// child tag in order.
	pub fn get_string(&self, key: &ItemKey) -> Option<&str> {
		self.tags.iter().find_map(|tag| tag.get_string(key))
	}

	/// Returns the first non-empty binary value for `key`, checking each
	/// child tag in order. See [`Tag::get_binary`] for `convert`'s meaning.
	pub fn get_binary(&self, key: &ItemKey, convert: bool) -> Option<&[u8]> {
		self.tags
			.iter()
			.find_map(|tag| tag.get_binary(key, convert))
	}

	/// Returns every picture from every child tag, in child order
	pub fn pictures(&self) -> Vec<&Picture> {
		self.tags.iter().flat_map(Tag::pictures).collect()
	}

	/// Returns the first non-empty picture, if any child tag has one
	pub fn first_picture(&self) -> Option<&Picture> {
		self.tags.iter().find_map(|tag| tag.pictures().first())
	}

	/// Writes a text value into every child tag capable of representing `key`.
	///
	/// Returns `true` if at least one child accepted the write — per the
	/// `CombinedTag` idempotence invariant, a subsequent [`CombinedTag::get_string`]
	/// for the same key will then return `value` back.
	pub fn set_string(&mut self, key: ItemKey, value: String) -> bool {
		let mut wrote_any = false;

		for tag in self.tags.iter_mut() {
			let item = TagItem::new(key.clone(), ItemValue::Text(value.clone()));

			if tag.insert_item(item) {
				wrote_any = true;
			}
		}

		wrote_any
	}

	/// Writes an arbitrary [`ItemValue`] into every capable child tag
	pub fn set_item(&mut self, key: ItemKey, value: ItemValue) -> bool {
		let mut wrote_any = false;

		for tag in self.tags.iter_mut() {
			let item = TagItem::new(key.clone(), value.clone());

			if tag.insert_item(item) {
				wrote_any = true;
			}
		}

		wrote_any
	}

	/// Removes `key` from every child tag
	pub fn remove_item(&mut self, key: &ItemKey) {
		for tag in self.tags.iter_mut() {
			tag.remove_item(key);
		}
	}

	/// Pushes a picture onto every child tag that supports pictures.
	///
	/// A child with no picture support simply ends up with an empty
	/// `pictures()` after the push; there is no capability query for
	/// pictures beyond "this tag format stores a `pictures` list at all",
	/// which is true for every [`TagType`](super::tag::TagType) in this
	/// crate that isn't purely textual.
	pub fn push_picture(&mut self, picture: Picture) {
		for tag in self.tags.iter_mut() {
			tag.push_picture(picture.clone());
		}
	}

	/// Copies every non-empty field `self` has into `dest`, for every field
	/// `dest`'s [`TagType`](super::tag::TagType) can represent.
	///
	/// If `overwrite` is `false`, a field `dest` already has a non-empty
	/// value for is left untouched.
	pub fn copy_to(&self, dest: &mut Tag, overwrite: bool) {
		let mut seen = std::collections::HashSet::new();

		for tag in self.tags.iter() {
			for item in tag.items() {
				let key = item.key().clone();

				if !seen.insert(key.clone()) {
					continue;
				}

				if !overwrite && dest.get_item_ref(&key).is_some() {
					continue;
				}

				dest.insert_item(item.clone());
			}
		}

		for picture in self.pictures() {
			if overwrite || dest.pictures().is_empty() {
				dest.push_picture(picture.clone());
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::tag::TagType;

	#[cfg(all(feature = "id3v2", feature = "id3v1"))]
	#[test]
	fn first_non_empty_wins() {
		let mut v2 = Tag::new(TagType::Id3v2);
		v2.insert_text(ItemKey::TrackTitle, "Hello".to_string());

		let v1 = Tag::new(TagType::Id3v1);

		let mut tags = vec![v2, v1];
		let combined = CombinedTag::new(&mut tags);

		assert_eq!(combined.get_string(&ItemKey::TrackTitle), Some("Hello"));
	}

	#[cfg(all(feature = "id3v2", feature = "id3v1"))]
	#[test]
	fn write_then_read_is_idempotent() {
		let mut tags = vec![Tag::new(TagType::Id3v2), Tag::new(TagType::Id3v1)];
		let mut combined = CombinedTag::new(&mut tags);

		assert!(combined.set_string(ItemKey::TrackTitle, "World".to_string()));
		assert_eq!(combined.get_string(&ItemKey::TrackTitle), Some("World"));

		// Both children actually received the write
		assert_eq!(tags[0].get_string(&ItemKey::TrackTitle), Some("World"));
		assert_eq!(tags[1].get_string(&ItemKey::TrackTitle), Some("World"));
	}

	#[cfg(all(feature = "id3v2", feature = "ape"))]
	#[test]
	fn copy_to_respects_overwrite() {
		let mut src_tags = vec![Tag::new(TagType::Id3v2)];
		src_tags[0].insert_text(ItemKey::TrackTitle, "Source".to_string());
		let src = CombinedTag::new(&mut src_tags);

		let mut dest = Tag::new(TagType::Ape);
		dest.insert_text(ItemKey::TrackTitle, "Existing".to_string());

		src.copy_to(&mut dest, false);
		assert_eq!(dest.get_string(&ItemKey::TrackTitle), Some("Existing"));

		src.copy_to(&mut dest, true);
		assert_eq!(dest.get_string(&ItemKey::TrackTitle), Some("Source"));
	}
}
