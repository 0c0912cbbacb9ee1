#![cfg(feature = "default")]

use metatag::{read_from_path, Accessor, ItemKey, TagType};

#[test]
fn test_inner() {
	// Read the FLAC file's Vorbis comments
	let tagged_file = read_from_path("tests/files/assets/a.flac", false).unwrap();
	let mut tag = tagged_file.primary_tag().unwrap().clone();

	tag.set_title("Foo title".to_string());

	// Remap the Vorbis comment tag to an ID3v2 tag and write it to an MP3
	tag.re_map(TagType::Id3v2);
	tag.save_to_path("tests/files/assets/a.mp3").unwrap();

	let id3_file = read_from_path("tests/files/assets/a.mp3", false).unwrap();
	let id3_tag = id3_file.primary_tag().unwrap();

	assert_eq!(id3_tag.title(), Some("Foo title"));

	// Update the recording date directly on the reloaded ID3v2 tag and write it back
	let mut id3_tag = id3_tag.clone();
	id3_tag.insert_text(ItemKey::RecordingDate, "2013-02-05".to_string());
	id3_tag.save_to_path("tests/files/assets/a.mp3").unwrap();

	let id3_file = read_from_path("tests/files/assets/a.mp3", false).unwrap();
	let id3_tag = id3_file.primary_tag().unwrap();

	assert_eq!(
		id3_tag.get_string(&ItemKey::RecordingDate),
		Some("2013-02-05")
	);
}
