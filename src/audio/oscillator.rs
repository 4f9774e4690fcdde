//! Damped harmonic oscillator model.
//!
//! y(t) = y0 · e^(−r·t / 2m) · cos(t · √(k/m − (r/2m)²))
//!
//! where `r` is damping, `k` stiffness and `m` mass. `t` is the oscillator's
//! internal phase, advanced by 2π·frequency per second of output.

/// Parameter set of one oscillator voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorParams {
    /// Rest amplitude y0 (meters)
    pub rest_amplitude: f32,

    /// Mass m (grams)
    pub mass: f32,

    /// Damping r (N·s/m). Derived per collision from impulse strength.
    pub damping: f32,

    /// Stiffness k (N/m)
    pub stiffness: f32,

    /// Phase advance rate (Hz)
    pub frequency_hz: f32,

    /// Output gain (0..=1)
    pub volume: f32,

    /// Extra gain applied on top of `volume`
    pub volume_multiplier: f32,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            rest_amplitude: 1.0,
            mass: 1.0,
            damping: 0.002,
            stiffness: 1000.0,
            frequency_hz: 440.0,
            volume: 0.4,
            volume_multiplier: 1.0,
        }
    }
}

impl OscillatorParams {
    /// Displacement at `phase`, before output gain.
    ///
    /// Over-damped parameters (r² ≥ 4·k·m) would need the square root of a
    /// negative number. They are treated as critically damped instead: the
    /// angular term collapses to 0 and only the exponential envelope remains.
    /// Non-positive or non-finite mass yields 0.
    pub fn evaluate(&self, phase: f64) -> f32 {
        if !(self.mass > 0.0) || !self.mass.is_finite() {
            return 0.0;
        }
        // Phase reaches the thousands within seconds; an f32 cosine argument
        // would lose its fractional part long before the tone decays.
        let angular = self.angular_frequency() as f64;
        let value =
            self.rest_amplitude as f64 * self.envelope_f64(phase) * (phase * angular).cos();

        if value.is_finite() {
            value as f32
        } else {
            0.0
        }
    }

    /// √(k/m − (r/2m)²), clamped to 0 in the over-damped regime
    pub fn angular_frequency(&self) -> f32 {
        let ratio = self.damping / (2.0 * self.mass);
        let radicand = self.stiffness / self.mass - ratio * ratio;
        radicand.max(0.0).sqrt()
    }

    /// e^(−r·t / 2m), the decay envelope
    pub fn envelope(&self, phase: f64) -> f32 {
        self.envelope_f64(phase) as f32
    }

    fn envelope_f64(&self, phase: f64) -> f64 {
        (-(self.damping as f64) * phase / (2.0 * self.mass as f64)).exp()
    }

    /// True when r² < 4·k·m
    pub fn is_underdamped(&self) -> bool {
        self.damping * self.damping < 4.0 * self.mass * self.stiffness
    }

    /// Output sample at `phase`: displacement times both gain stages
    pub fn sample(&self, phase: f64) -> f32 {
        let value = self.evaluate(phase) * self.volume * self.volume_multiplier;
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}
