//! MPEG frame header lookup tables (ISO/IEC 11172-3 / 13818-3)
//!
//! Indices throughout match the raw header bit patterns: `version_index` is
//! `0` for MPEG1 and `1` for MPEG2/2.5 (they share every table but bitrate),
//! `layer_index` is `0`/`1`/`2` for Layer I/II/III.

/// `[version_index][layer_index][bitrate_index]`, in kbps; `0` marks "free" or "bad"
pub(crate) const BITRATES: [[[u32; 16]; 3]; 2] = [
	[
		// MPEG1, Layer I
		[
			0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0,
		],
		// MPEG1, Layer II
		[
			0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0,
		],
		// MPEG1, Layer III
		[
			0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
		],
	],
	[
		// MPEG2/2.5, Layer I
		[
			0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0,
		],
		// MPEG2/2.5, Layer II
		[
			0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0,
		],
		// MPEG2/2.5, Layer III (same table as Layer II)
		[
			0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0,
		],
	],
];

/// `[version as usize][sample_rate_index]`, in Hz (`MpegVersion::V1` = 0, `V2` = 1, `V2_5` = 2)
pub(crate) const SAMPLE_RATES: [[u32; 3]; 3] = [
	[44100, 48000, 32000],
	[22050, 24000, 16000],
	[11025, 12000, 8000],
];

/// `[layer_index]`, in bytes, added to a frame's length when the padding bit is set
pub(crate) const PADDING_SIZES: [u8; 3] = [4, 1, 1];

/// `[version_index][channel_mode as usize]`, in bytes, following the 4-byte frame header
pub(crate) const SIDE_INFORMATION_SIZES: [[u32; 4]; 2] = [
	// MPEG1: Stereo, Joint Stereo, Dual Channel, Single Channel
	[32, 32, 32, 17],
	// MPEG2/2.5
	[17, 17, 17, 9],
];

/// `[layer_index][version_index]`, samples per frame
pub(crate) const SAMPLES: [[u16; 2]; 3] = [
	[384, 384],   // Layer I
	[1152, 1152], // Layer II
	[1152, 576],  // Layer III
];
