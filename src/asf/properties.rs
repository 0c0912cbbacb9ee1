use crate::types::properties::FileProperties;

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Default)]
/// An ASF file's audio properties
pub struct AsfProperties {
	duration: Duration,
	bitrate: Option<u32>,
	sample_rate: Option<u32>,
	channels: Option<u8>,
	bit_depth: Option<u8>,
}

impl From<AsfProperties> for FileProperties {
	fn from(input: AsfProperties) -> Self {
		Self {
			duration: input.duration,
			overall_bitrate: input.bitrate,
			audio_bitrate: input.bitrate,
			sample_rate: input.sample_rate,
			channels: input.channels,
		}
	}
}

impl AsfProperties {
	/// Creates a new [`AsfProperties`]
	pub const fn new(
		duration: Duration,
		bitrate: Option<u32>,
		sample_rate: Option<u32>,
		channels: Option<u8>,
		bit_depth: Option<u8>,
	) -> Self {
		Self {
			duration,
			bitrate,
			sample_rate,
			channels,
			bit_depth,
		}
	}

	/// Duration, from the File Properties Object's play duration field
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Average bitrate (kbps), from the relevant Stream Properties Object
	pub fn bitrate(&self) -> Option<u32> {
		self.bitrate
	}

	/// Sampling frequency (Hz)
	pub fn sample_rate(&self) -> Option<u32> {
		self.sample_rate
	}

	/// Channel count
	pub fn channels(&self) -> Option<u8> {
		self.channels
	}

	/// Bits per sample
	pub fn bit_depth(&self) -> Option<u8> {
		self.bit_depth
	}
}
