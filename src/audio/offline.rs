//! Offline rendering of the voice into a WAV file.

use std::fs::File;
use std::io::BufWriter;

use super::synth::OscillatorSynthesizer;
use crate::error::Result;
use crate::params::RecordingConfig;

/// 32-bit float WAV writer for interleaved blocks
pub struct WavRecorder {
    writer: hound::WavWriter<BufWriter<File>>,
    channels: usize,
    frames_written: usize,
}

impl WavRecorder {
    /// Create the output file (and its parent directory)
    pub fn create(config: &RecordingConfig, sample_rate_hz: u32) -> Result<Self> {
        config.validate()?;
        if let Some(parent) = config.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let spec = hound::WavSpec {
            channels: config.channels,
            sample_rate: sample_rate_hz,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let writer = hound::WavWriter::create(&config.output_path, spec)?;

        Ok(Self {
            writer,
            channels: config.channels as usize,
            frames_written: 0,
        })
    }

    /// Append an interleaved block; trailing partial frames are ignored
    pub fn write_block(&mut self, block: &[f32]) -> Result<()> {
        let frames = block.len() / self.channels;
        for &sample in &block[..frames * self.channels] {
            self.writer.write_sample(sample)?;
        }
        self.frames_written += frames;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Flush the header and close the file
    pub fn finalize(self) -> Result<usize> {
        self.writer.finalize()?;
        Ok(self.frames_written)
    }
}

/// Render `config.duration_secs` of the voice into `config.output_path`.
///
/// `before_block` receives the block's start time in seconds and may trigger
/// or retune the voice through its handle. `after_block` sees every rendered
/// block. Returns the number of frames written.
pub fn render_to_wav(
    synth: &mut OscillatorSynthesizer,
    config: &RecordingConfig,
    mut before_block: impl FnMut(f64),
    mut after_block: impl FnMut(&[f32]),
) -> Result<usize> {
    let sample_rate_hz = synth.sample_rate_hz();
    let channels = config.channels as usize;
    let total_frames = config.total_frames(sample_rate_hz);

    let mut recorder = WavRecorder::create(config, sample_rate_hz)?;
    let mut block = vec![0.0_f32; config.block_frames * channels];

    while recorder.frames_written() < total_frames {
        let frames = config.block_frames.min(total_frames - recorder.frames_written());
        let block = &mut block[..frames * channels];

        before_block(recorder.frames_written() as f64 / sample_rate_hz as f64);
        synth.render(block, channels);
        after_block(block);
        recorder.write_block(block)?;
    }

    let frames = recorder.finalize()?;
    log::info!(
        "recorded {} frames ({:.2} s) to {}",
        frames,
        frames as f64 / sample_rate_hz as f64,
        config.output_path.display()
    );
    Ok(frames)
}
