//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{GeometrySettings, RecordingConfig, SphereVolume, SynthConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "impactsound")]
#[command(about = "Collision-driven damped-oscillator sound synthesis", long_about = None)]
pub struct Args {
    /// Render offline to a WAV file instead of playing live (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Output WAV path for --record
    #[arg(long, value_name = "PATH", default_value = "recording/impacts.wav")]
    pub output: PathBuf,

    /// Number of scripted impacts
    #[arg(long, value_name = "N", default_value = "8")]
    pub impacts: usize,

    /// Time between impacts (milliseconds)
    #[arg(long, value_name = "MS", default_value = "600")]
    pub interval_ms: u64,

    /// Oscillator phase rate (Hz)
    #[arg(long, value_name = "HZ", default_value = "440")]
    pub frequency: f32,

    /// Use the truncated π·r³ sphere volume
    #[arg(long)]
    pub legacy_sphere_volume: bool,
}

impl Args {
    /// Synthesis configuration with the requested frequency
    pub fn synth_config(&self) -> SynthConfig {
        let mut config = SynthConfig::default();
        config.voice.frequency_hz = self.frequency;
        config
    }

    pub fn geometry_settings(&self) -> GeometrySettings {
        GeometrySettings {
            sphere_volume: if self.legacy_sphere_volume {
                SphereVolume::LegacyTruncated
            } else {
                SphereVolume::Exact
            },
            ..Default::default()
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| RecordingConfig {
            output_path: self.output.clone(),
            ..RecordingConfig::new(duration)
        })
    }
}
