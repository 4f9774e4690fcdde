//! Windowed FFT producing the analyzer's 512 magnitudes, plus the audio tap feeding it.

use std::f32::consts::PI;
use std::sync::Arc;

use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::params::{SpectrumConfig, WindowFunction};

/// Create a connected tap (audio side) and frame builder (analysis side)
pub fn spectrum_channel(config: &SpectrumConfig) -> (SpectrumTap, SpectrumFrame) {
    let (producer, consumer) = HeapRb::<f32>::new(config.tap_capacity).split();
    (
        SpectrumTap {
            producer,
            dropped: 0,
        },
        SpectrumFrame::with_consumer(config, Some(consumer)),
    )
}

/// Audio-thread end of the analysis ring
///
/// Pushing never blocks: samples that do not fit are counted and dropped.
pub struct SpectrumTap {
    producer: HeapProd<f32>,
    dropped: usize,
}

impl SpectrumTap {
    /// Push the first channel of an interleaved buffer
    pub fn push_interleaved(&mut self, data: &[f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for &sample in data.iter().step_by(channels) {
            if self.producer.try_push(sample).is_err() {
                self.dropped += 1;
            }
        }
    }

    /// Samples lost to a full ring since creation
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Analysis-side FFT over the most recent `fft_size` samples
pub struct SpectrumFrame {
    consumer: Option<HeapCons<f32>>,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    history: Vec<f32>,
    incoming: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
}

impl SpectrumFrame {
    /// Frame builder fed directly through [`feed`](Self::feed), without a tap
    pub fn new(config: &SpectrumConfig) -> Self {
        Self::with_consumer(config, None)
    }

    fn with_consumer(config: &SpectrumConfig, consumer: Option<HeapCons<f32>>) -> Self {
        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        Self {
            consumer,
            fft: planner.plan_fft_forward(size),
            window: (0..size).map(|i| window_value(config.window, i, size)).collect(),
            history: vec![0.0; size],
            incoming: vec![0.0; size],
            buffer: vec![Complex::new(0.0, 0.0); size],
            magnitudes: vec![0.0; config.magnitude_count()],
        }
    }

    /// Append samples to the analysis history (oldest fall off the front)
    pub fn feed(&mut self, samples: &[f32]) {
        append_history(&mut self.history, samples);
    }

    /// Move everything waiting in the tap into the history
    pub fn drain(&mut self) -> usize {
        let Some(consumer) = self.consumer.as_mut() else {
            return 0;
        };
        let mut total = 0;
        loop {
            let n = consumer.pop_slice(&mut self.incoming);
            if n == 0 {
                break;
            }
            append_history(&mut self.history, &self.incoming[..n]);
            total += n;
        }
        if total >= consumer.capacity().get() {
            log::warn!("spectrum tap was full, audio samples were dropped");
        }
        total
    }

    /// Window + FFT the history; returns `fft_size / 2` magnitudes scaled by 2/N
    pub fn compute(&mut self) -> &[f32] {
        for ((slot, &sample), &w) in self
            .buffer
            .iter_mut()
            .zip(&self.history)
            .zip(&self.window)
        {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.buffer);

        let scale = 2.0 / self.buffer.len() as f32;
        for (magnitude, bin) in self.magnitudes.iter_mut().zip(&self.buffer) {
            *magnitude = bin.norm() * scale;
        }
        &self.magnitudes
    }

    /// Drain the tap, then compute
    pub fn update(&mut self) -> &[f32] {
        self.drain();
        self.compute()
    }
}

fn append_history(history: &mut [f32], fresh: &[f32]) {
    let n = fresh.len().min(history.len());
    let fresh = &fresh[fresh.len() - n..];
    history.copy_within(n.., 0);
    let len = history.len();
    history[len - n..].copy_from_slice(fresh);
}

/// Window coefficient at `index` for a block of `size` samples
pub fn window_value(window: WindowFunction, index: usize, size: usize) -> f32 {
    match window {
        WindowFunction::Hann => hann_window(index, size),
        WindowFunction::BlackmanHarris => blackman_harris_window(index, size),
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// 4-term Blackman-Harris window
pub fn blackman_harris_window(index: usize, size: usize) -> f32 {
    const A0: f32 = 0.35875;
    const A1: f32 = 0.48829;
    const A2: f32 = 0.14128;
    const A3: f32 = 0.01168;

    let x = 2.0 * PI * index as f32 / (size as f32 - 1.0);
    A0 - A1 * x.cos() + A2 * (2.0 * x).cos() - A3 * (3.0 * x).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_blackman_harris_window() {
        let size = 1024;

        // Near 0 at the edges, 1 at the center
        assert!(blackman_harris_window(0, size) < 1e-4);
        assert!(blackman_harris_window(size - 1, size) < 1e-4);
        assert!((blackman_harris_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_append_history_shifts_oldest_out() {
        let mut history = vec![1.0, 2.0, 3.0, 4.0];

        append_history(&mut history, &[5.0, 6.0]);
        assert_eq!(history, vec![3.0, 4.0, 5.0, 6.0]);

        append_history(&mut history, &[7.0, 8.0, 9.0, 10.0, 11.0]);
        assert_eq!(history, vec![8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_pure_tone_peaks_at_its_bin() {
        let config = SpectrumConfig::default();
        let mut frame = SpectrumFrame::new(&config);

        // Bin 20 of a 1024-point FFT at 48 kHz = 937.5 Hz
        let hz = 20.0 * 48_000.0 / config.fft_size as f32;
        let tone: Vec<f32> = (0..config.fft_size)
            .map(|n| (2.0 * PI * hz * n as f32 / 48_000.0).sin())
            .collect();
        frame.feed(&tone);

        let magnitudes = frame.compute();
        assert_eq!(magnitudes.len(), 512);

        let peak = magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(20));
    }

    #[test]
    fn test_silence_is_zero() {
        let mut frame = SpectrumFrame::new(&SpectrumConfig::default());
        assert!(frame.compute().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_tap_delivers_first_channel() {
        let config = SpectrumConfig::default();
        let (mut tap, mut frame) = spectrum_channel(&config);

        let stereo: Vec<f32> = (0..8).flat_map(|i| [i as f32, -1.0]).collect();
        tap.push_interleaved(&stereo, 2);

        assert_eq!(frame.drain(), 8);
        let tail = &frame.history[config.fft_size - 8..];
        assert_eq!(tail, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_full_tap_drops_instead_of_blocking() {
        let config = SpectrumConfig {
            tap_capacity: 4,
            ..Default::default()
        };
        let (mut tap, _frame) = spectrum_channel(&config);

        tap.push_interleaved(&[0.5; 10], 1);
        assert_eq!(tap.dropped(), 6);
    }
}
