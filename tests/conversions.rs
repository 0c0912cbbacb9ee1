#![cfg(feature = "default")]

use metatag::{read_from_path, Accessor, ItemKey, Tag, TagType};

macro_rules! assert_converted {
	($tag:ident) => {
		assert_eq!($tag.title(), Some("Title Updated"));
		assert_eq!($tag.artist(), Some("Artist Updated"));
		assert_eq!($tag.get_string(&ItemKey::TrackNumber), Some("5"));
	};
}

#[test]
fn test_conversions() {
	let tagged_file = read_from_path("tests/files/assets/a.mp3", false).unwrap();
	let mut tag = tagged_file.primary_tag().unwrap().clone();

	tag.set_title("Title Updated".to_string());
	tag.set_artist("Artist Updated".to_string());
	tag.insert_text(ItemKey::TrackNumber, "5".to_string());
	assert_converted!(tag);

	tag.re_map(TagType::Ape);
	assert_converted!(tag);

	tag.re_map(TagType::Mp4Ilst);
	assert_converted!(tag);

	tag.re_map(TagType::RiffInfo);
	assert_converted!(tag);

	tag.re_map(TagType::VorbisComments);
	assert_converted!(tag);

	tag.re_map(TagType::Id3v2);
	assert_converted!(tag);
}

#[test]
fn re_map_drops_items_with_no_mapping_in_target_format() {
	let mut tag = Tag::new(TagType::Id3v2);
	tag.set_title("Title".to_string());

	tag.re_map(TagType::Id3v1);
	assert_eq!(tag.title(), Some("Title"));
	assert_eq!(tag.tag_type(), &TagType::Id3v1);
}
