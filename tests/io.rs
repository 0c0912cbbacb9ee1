#![cfg(feature = "default")]

use metatag::{read_from_path, Accessor, ItemKey, MimeType, Picture, PictureType, Tag};

use std::borrow::Cow;

fn cover(pic_type: PictureType) -> Picture {
	let mut data = vec![0x89, b'P', b'N', b'G'];
	data.extend(std::iter::repeat(0).take(50000));

	Picture {
		pic_type,
		mime_type: MimeType::Png,
		description: Some(Cow::from("test")),
		width: 0,
		height: 0,
		color_depth: 0,
		num_colors: 0,
		data: Cow::from(data),
	}
}

macro_rules! full_test {
	($function:ident, $file:expr) => {
		#[test]
		fn $function() {
			println!("-- Adding tags --");
			let tagged_file = read_from_path($file, false).unwrap();
			let mut tag = tagged_file.primary_tag().unwrap().clone();

			tag.set_title("foo title".to_string());
			tag.set_artist("foo artist".to_string());
			tag.insert_text(ItemKey::Year, "2020".to_string());
			tag.insert_text(ItemKey::CopyrightMessage, "1988".to_string());
			tag.set_genre("Country".to_string());
			tag.insert_text(ItemKey::BPM, "50".to_string());
			tag.insert_text(ItemKey::Lyricist, "Serial-ATA".to_string());
			tag.insert_text(ItemKey::Composer, "Serial-ATA1".to_string());
			tag.insert_text(ItemKey::EncoderSoftware, "Lofty".to_string());
			tag.set_album("foo album title".to_string());
			tag.set_album_artist("foo album artist".to_string());

			tag.push_picture(cover(PictureType::CoverFront));
			tag.push_picture(cover(PictureType::CoverBack));

			println!("Writing");
			tag.save_to_path($file).unwrap();

			println!("-- Verifying tags --");
			let tagged_file = read_from_path($file, false).unwrap();
			let tag = tagged_file.primary_tag().unwrap();

			assert_eq!(tag.title(), Some("foo title"));
			assert_eq!(tag.artist(), Some("foo artist"));
			assert_eq!(tag.get_string(&ItemKey::CopyrightMessage), Some("1988"));
			assert_eq!(tag.genre(), Some("Country"));
			assert_eq!(tag.get_string(&ItemKey::EncoderSoftware), Some("Lofty"));
			assert_eq!(tag.album(), Some("foo album title"));
			assert_eq!(tag.album_artist(), Some("foo album artist"));
			assert_eq!(tag.picture_count(), 2);

			println!("-- Emptying tag --");
			let mut tag = tag.clone();

			tag.remove_title();
			assert!(tag.title().is_none());
			tag.remove_title(); // should not panic

			tag.remove_artist();
			assert!(tag.artist().is_none());

			tag.remove_item(&ItemKey::Year);
			assert!(tag.get_string(&ItemKey::Year).is_none());

			tag.remove_picture_type(PictureType::CoverFront);
			assert_eq!(tag.picture_count(), 1);
			tag.remove_picture_type(PictureType::CoverBack);
			assert_eq!(tag.picture_count(), 0);

			println!("Writing");
			tag.save_to_path($file).unwrap();

			println!("-- Removing tag --");
			assert!(Tag::new(*tag.tag_type()).remove_from_path($file));
		}
	};
}

// APEv2
full_test!(test_ape, "tests/files/assets/a.ape");

// ID3v2
full_test!(test_mp3, "tests/files/assets/a.mp3");
full_test!(test_aiff, "tests/files/assets/a.aiff");

// Vorbis comments
full_test!(test_flac, "tests/files/assets/a.flac");
full_test!(test_m4a, "tests/files/assets/a.m4a");
full_test!(test_ogg, "tests/files/assets/a.ogg");
full_test!(test_opus, "tests/files/assets/a.opus");
