//! Offline recording configuration.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output WAV file
    pub output_path: PathBuf,

    /// Interleaved output channels (mono source duplicated)
    pub channels: u16,

    /// Frames rendered per synthesizer call, mimicking a host callback
    pub block_frames: usize,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_path: PathBuf::from("recording/impacts.wav"),
            channels: 2,
            block_frames: 512,
        }
    }

    /// Total number of frames to render at `sample_rate_hz`
    pub fn total_frames(&self, sample_rate_hz: u32) -> usize {
        (self.duration_secs * sample_rate_hz as f32).ceil() as usize
    }

    /// Validate configuration (positive duration, at least one channel)
    pub fn validate(&self) -> Result<()> {
        if !(self.duration_secs > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "recording duration must be > 0, got {}",
                self.duration_secs
            )));
        }
        if self.channels == 0 {
            return Err(Error::InvalidConfig("channel count must be > 0".into()));
        }
        if self.block_frames == 0 {
            return Err(Error::InvalidConfig("block size must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_frames_rounds_up() {
        let config = RecordingConfig::new(0.5);
        assert_eq!(config.total_frames(48_000), 24_000);

        let config = RecordingConfig::new(0.25);
        assert_eq!(config.total_frames(10), 3);
    }

    #[test]
    fn test_rejects_zero_duration() {
        assert!(RecordingConfig::new(0.0).validate().is_err());
    }
}
