//! Eight logarithmic frequency bands with attack/release smoothing.
//!
//! A 512-magnitude spectrum (≈43 Hz per bin at 44.1 kHz) is folded into:
//!
//! | band | bins | approx. range      |
//! |------|------|--------------------|
//! | 0    | 2    | 0 – 86 Hz          |
//! | 1    | 4    | 86 – 258 Hz        |
//! | 2    | 8    | 258 – 602 Hz       |
//! | 3    | 16   | 602 – 1290 Hz      |
//! | 4    | 32   | 1290 – 2666 Hz     |
//! | 5    | 64   | 2666 – 5418 Hz     |
//! | 6    | 128  | 5418 – 10922 Hz    |
//! | 7    | 258  | 10922 – 22050 Hz   |
//!
//! The last band takes two extra bins so all 512 are consumed.

use crate::error::{Error, Result};
use crate::params::audio_constants::{BAND_COUNT, SPECTRUM_SAMPLES};

/// Release step applied on the first frame after a peak
const RELEASE_SEED: f32 = 0.005;

/// Per-frame growth of the release step
const RELEASE_GROWTH: f32 = 1.2;

/// Number of bins folded into `band`
pub fn band_width(band: usize) -> usize {
    let width = 2 << band;
    if band == BAND_COUNT - 1 {
        width + 2
    } else {
        width
    }
}

/// Stateful 8-band analyzer, updated once per frame from a single thread
#[derive(Debug, Clone, Default)]
pub struct SpectrumAnalyzer {
    raw: [f32; BAND_COUNT],
    smooth: [f32; BAND_COUNT],
    release: [f32; BAND_COUNT],
    min: [f32; BAND_COUNT],
    max: [f32; BAND_COUNT],
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame of exactly 512 magnitudes into the bands
    pub fn sample(&mut self, magnitudes: &[f32]) -> Result<()> {
        if magnitudes.len() != SPECTRUM_SAMPLES {
            return Err(Error::InvalidSampleCount {
                got: magnitudes.len(),
            });
        }

        let mut start = 0;
        for band in 0..BAND_COUNT {
            let end = start + band_width(band);

            // Each bin weighted by its 1-based position in the whole spectrum
            let value: f32 = magnitudes[start..end]
                .iter()
                .enumerate()
                .map(|(offset, m)| m * (start + offset + 1) as f32)
                .sum();

            self.raw[band] = value;

            if self.smooth[band] < value {
                self.smooth[band] = value;
                self.release[band] = RELEASE_SEED;
            } else {
                self.smooth[band] -= self.release[band];
                self.release[band] *= RELEASE_GROWTH;
            }

            self.min[band] = self.min[band].min(value);
            self.max[band] = self.max[band].max(value);

            start = end;
        }

        Ok(())
    }

    /// Band value: raw or smoothed, absolute or normalized
    pub fn band(&self, index: i32, smooth: bool, normalized: bool) -> Result<f32> {
        let i = Self::checked_index(index)?;
        let value = if smooth { self.smooth[i] } else { self.raw[i] };
        if normalized {
            Ok(self.normalize_at(i, value))
        } else {
            Ok(value)
        }
    }

    /// `value / (max − min) + min` using the band's running limits.
    ///
    /// Before the limits have spread apart (`max == min`) there is nothing to
    /// scale by, and `min` is returned.
    pub fn normalize(&self, index: i32, value: f32) -> Result<f32> {
        let i = Self::checked_index(index)?;
        Ok(self.normalize_at(i, value))
    }

    fn normalize_at(&self, i: usize, value: f32) -> f32 {
        let range = self.max[i] - self.min[i];
        if range == 0.0 {
            return self.min[i];
        }
        value / range + self.min[i]
    }

    fn checked_index(index: i32) -> Result<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < BAND_COUNT)
            .ok_or(Error::InvalidBandIndex(index))
    }

    /// All raw band values
    pub fn raw_bands(&self) -> [f32; BAND_COUNT] {
        self.raw
    }

    /// All smoothed band values
    pub fn smoothed_bands(&self) -> [f32; BAND_COUNT] {
        self.smooth
    }

    /// Running (min, max) of a band's raw value
    pub fn limits(&self, index: i32) -> Result<(f32, f32)> {
        let i = Self::checked_index(index)?;
        Ok((self.min[i], self.max[i]))
    }

    /// Forget all history
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_at(bin: usize, magnitude: f32) -> Vec<f32> {
        let mut frame = vec![0.0; SPECTRUM_SAMPLES];
        frame[bin] = magnitude;
        frame
    }

    #[test]
    fn test_band_widths_cover_spectrum() {
        let widths: Vec<usize> = (0..BAND_COUNT).map(band_width).collect();

        assert_eq!(widths, vec![2, 4, 8, 16, 32, 64, 128, 258]);
        assert_eq!(widths.iter().sum::<usize>(), SPECTRUM_SAMPLES);
    }

    #[test]
    fn test_zeros_report_zero_everywhere() {
        let mut analyzer = SpectrumAnalyzer::new();
        analyzer.sample(&[0.0; SPECTRUM_SAMPLES]).unwrap();

        for band in 0..BAND_COUNT as i32 {
            for smooth in [false, true] {
                for normalized in [false, true] {
                    assert_eq!(analyzer.band(band, smooth, normalized).unwrap(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_invalid_index() {
        let analyzer = SpectrumAnalyzer::new();

        assert!(matches!(
            analyzer.band(-1, false, false),
            Err(Error::InvalidBandIndex(-1))
        ));
        assert!(matches!(
            analyzer.band(8, true, true),
            Err(Error::InvalidBandIndex(8))
        ));
        assert!(analyzer.normalize(8, 1.0).is_err());
    }

    #[test]
    fn test_invalid_sample_count() {
        let mut analyzer = SpectrumAnalyzer::new();

        let result = analyzer.sample(&[0.0; 511]);
        assert!(matches!(result, Err(Error::InvalidSampleCount { got: 511 })));
    }

    #[test]
    fn test_raw_weights_by_global_index() {
        let mut analyzer = SpectrumAnalyzer::new();

        // Bin 6 is the first bin of band 2, weight 7
        analyzer.sample(&impulse_at(6, 0.5)).unwrap();
        assert_eq!(analyzer.band(2, false, false).unwrap(), 3.5);
        assert_eq!(analyzer.band(1, false, false).unwrap(), 0.0);

        // Last bin belongs to band 7, weight 512
        analyzer.sample(&impulse_at(511, 1.0)).unwrap();
        assert_eq!(analyzer.band(7, false, false).unwrap(), 512.0);
    }

    #[test]
    fn test_smoothing_attack_and_accelerating_release() {
        let mut analyzer = SpectrumAnalyzer::new();

        analyzer.sample(&impulse_at(0, 1.0)).unwrap();
        assert_eq!(analyzer.band(0, true, false).unwrap(), 1.0);

        let silence = [0.0; SPECTRUM_SAMPLES];
        analyzer.sample(&silence).unwrap();
        let first = analyzer.band(0, true, false).unwrap();
        assert!((first - (1.0 - 0.005)).abs() < 1e-6);

        analyzer.sample(&silence).unwrap();
        let second = analyzer.band(0, true, false).unwrap();
        assert!((second - (first - 0.006)).abs() < 1e-6);

        // A new peak snaps back up and re-seeds the release
        analyzer.sample(&impulse_at(0, 2.0)).unwrap();
        assert_eq!(analyzer.band(0, true, false).unwrap(), 2.0);
        analyzer.sample(&silence).unwrap();
        assert!((analyzer.band(0, true, false).unwrap() - 1.995).abs() < 1e-6);
    }

    #[test]
    fn test_limits_are_monotonic() {
        let mut analyzer = SpectrumAnalyzer::new();

        analyzer.sample(&impulse_at(0, 3.0)).unwrap();
        analyzer.sample(&impulse_at(0, 1.0)).unwrap();
        analyzer.sample(&impulse_at(0, -2.0)).unwrap();
        analyzer.sample(&impulse_at(0, 0.5)).unwrap();

        assert_eq!(analyzer.limits(0).unwrap(), (-2.0, 3.0));
    }

    #[test]
    fn test_normalize_formula() {
        let mut analyzer = SpectrumAnalyzer::new();
        analyzer.sample(&impulse_at(0, 4.0)).unwrap();

        // min 0, max 4
        assert_eq!(analyzer.band(0, false, true).unwrap(), 1.0);
        assert_eq!(analyzer.normalize(0, 2.0).unwrap(), 0.5);
    }

    #[test]
    fn test_clear_resets_state() {
        let mut analyzer = SpectrumAnalyzer::new();
        analyzer.sample(&impulse_at(10, 1.0)).unwrap();

        analyzer.clear();
        assert_eq!(analyzer.raw_bands(), [0.0; BAND_COUNT]);
        assert_eq!(analyzer.smoothed_bands(), [0.0; BAND_COUNT]);
        assert_eq!(analyzer.limits(3).unwrap(), (0.0, 0.0));
    }
}
