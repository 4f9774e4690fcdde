//! impactsound - plays (or records) a scripted sequence of impacts
//!
//! Each impact runs through the collision → geometry → mapping path and
//! restarts the body's oscillator voice. The 8-band analyzer follows the
//! output and is reported as the voice decays.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use impactsound::audio::{
    render_to_wav, AudioSystem, OscillatorHandle, OscillatorSynthesizer, SpectrumAnalyzer,
    SpectrumFrame,
};
use impactsound::cli::Args;
use impactsound::collision::{CollisionSound, ImpulseLog};
use impactsound::params::{
    audio_constants::BAND_COUNT, MappingCalibration, RecordingConfig, SpectrumConfig,
};
use impactsound::scene::{demo_body, ImpactScript};
use impactsound::Result;

/// Live playback gives up this long after the last impact
const MAX_TAIL_SECS: f64 = 10.0;

fn main() {
    env_logger::init();

    let args = Args::parse();

    println!("impactsound - collision-driven oscillator synthesis");
    println!(
        "{} impacts, {} ms apart, {} Hz\n",
        args.impacts, args.interval_ms, args.frequency
    );

    let result = match args.recording_config() {
        Some(recording) => record(&args, &recording),
        None => play_live(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Build the demo body's collision sound around `voice`
fn body_sound(
    args: &Args,
    voice: OscillatorHandle,
    impulses: &Arc<ImpulseLog>,
) -> Result<CollisionSound> {
    let settings = args.geometry_settings();
    settings.validate()?;
    let calibration = MappingCalibration::default();
    calibration.validate()?;

    let sound = CollisionSound::new(
        &demo_body(),
        settings,
        calibration,
        voice,
        impulses.register(),
    );

    let profile = sound.profile();
    println!(
        "Body: {} shapes, volume {:.3}, surface {:.3}, mass {:.3}",
        profile.shape_count(),
        profile.volume(),
        profile.surface_area(),
        profile.estimated_mass()
    );
    Ok(sound)
}

fn play_live(args: &Args) -> Result<()> {
    let spectrum_config = SpectrumConfig::default();
    let mut audio = AudioSystem::new(&args.synth_config(), &spectrum_config)?;
    println!(
        "Audio: {} @ {}Hz",
        audio.device_name(),
        audio.sample_rate_hz()
    );

    let impulses = ImpulseLog::new();
    let mut sound = body_sound(args, audio.voice().clone(), &impulses)?;
    let mut script = ImpactScript::new(args.impacts, args.interval_ms);
    let mut analyzer = SpectrumAnalyzer::new();

    let frame_interval = Duration::from_millis(spectrum_config.frame_interval_ms);
    let deadline = script.duration_secs() + MAX_TAIL_SECS;
    let start = Instant::now();

    loop {
        let t = start.elapsed().as_secs_f64();
        while let Some(event) = script.due(t) {
            let mapped = sound.on_collision(&event);
            println!(
                "[{:6.2}s] impact: impulse {:.2}x ref -> damping {:.5}",
                t,
                mapped.impulse_normalized,
                mapped.damping
            );
        }

        analyzer.sample(audio.analyze())?;
        log::debug!("bands {}", format_bands(&analyzer.smoothed_bands()));

        if script.is_finished() && !audio.voice().is_playing() {
            break;
        }
        if t > deadline {
            log::warn!("voice still audible after {:.1} s, stopping", MAX_TAIL_SECS);
            break;
        }

        thread::sleep(frame_interval);
    }

    report(&analyzer, &impulses);
    Ok(())
}

fn record(args: &Args, recording: &RecordingConfig) -> Result<()> {
    let synth_config = args.synth_config();
    synth_config.validate()?;
    let spectrum_config = SpectrumConfig::default();
    spectrum_config.validate()?;

    let mut synth = OscillatorSynthesizer::new(&synth_config);
    let impulses = ImpulseLog::new();
    let mut sound = body_sound(args, synth.handle(), &impulses)?;
    let mut script = ImpactScript::new(args.impacts, args.interval_ms);

    let mut frame = SpectrumFrame::new(&spectrum_config);
    let mut analyzer = SpectrumAnalyzer::new();
    let samples_per_frame =
        (synth_config.sample_rate_hz as u64 * spectrum_config.frame_interval_ms / 1000) as usize;
    let channels = recording.channels as usize;
    let mut since_frame = 0;

    println!(
        "Recording {:.1}s to {}",
        recording.duration_secs,
        recording.output_path.display()
    );

    let frames = render_to_wav(
        &mut synth,
        recording,
        |t| {
            while let Some(event) = script.due(t) {
                let mapped = sound.on_collision(&event);
                println!("[{:6.2}s] impact: damping {:.5}", t, mapped.damping);
            }
        },
        |block| {
            let mono: Vec<f32> = block.iter().step_by(channels).copied().collect();
            frame.feed(&mono);
            since_frame += mono.len();

            if since_frame >= samples_per_frame {
                since_frame = 0;
                match analyzer.sample(frame.compute()) {
                    Ok(()) => log::debug!("bands {}", format_bands(&analyzer.smoothed_bands())),
                    Err(e) => log::warn!("spectrum frame skipped: {}", e),
                }
            }
        },
    )?;

    println!("Wrote {} frames", frames);
    report(&analyzer, &impulses);
    Ok(())
}

fn report(analyzer: &SpectrumAnalyzer, impulses: &ImpulseLog) {
    println!("\nAverage impulse: {:.2}", impulses.average());
    println!("Band peaks:");
    for band in 0..BAND_COUNT as i32 {
        if let Ok((_, max)) = analyzer.limits(band) {
            println!("  band {}: {:10.4}", band, max);
        }
    }
}

fn format_bands(bands: &[f32; BAND_COUNT]) -> String {
    bands
        .iter()
        .map(|b| format!("{:8.3}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
