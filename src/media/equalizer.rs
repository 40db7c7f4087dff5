//! Single-band peaking equalizer as a `rodio::Source` adapter.
//!
//! Coefficients follow the RBJ audio EQ cookbook. Each channel keeps its own
//! direct-form-I state; coefficients are recomputed when the inner source
//! changes sample rate between spans.

use std::f32::consts::PI;
use std::time::Duration;

use rodio::Source;
use rodio::source::SeekError;

use crate::config::EqualizerSettings;

/// Peaking band parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqBand {
    pub frequency_hz: f32,
    pub gain_db: f32,
    pub q: f32,
}

impl From<&EqualizerSettings> for EqBand {
    fn from(s: &EqualizerSettings) -> Self {
        Self {
            frequency_hz: s.frequency_hz,
            gain_db: s.gain_db,
            q: s.q,
        }
    }
}

/// Normalised biquad coefficients (`a0 == 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl Coefficients {
    pub fn peaking(band: EqBand, sample_rate: u32) -> Self {
        let fs = sample_rate.max(1) as f32;
        // Keep the centre frequency below Nyquist.
        let f0 = band.frequency_hz.clamp(1.0, fs * 0.45);
        let q = band.q.max(f32::EPSILON);

        let a = 10f32.powf(band.gain_db / 40.0);
        let w0 = 2.0 * PI * f0 / fs;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q);

        let a0 = 1.0 + alpha / a;
        Self {
            b0: (1.0 + alpha * a) / a0,
            b1: (-2.0 * cos_w0) / a0,
            b2: (1.0 - alpha * a) / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha / a) / a0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl ChannelState {
    fn process(&mut self, c: &Coefficients, x: f32) -> f32 {
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

pub struct PeakingEq<S> {
    inner: S,
    band: EqBand,
    rate: u32,
    coefficients: Coefficients,
    states: Vec<ChannelState>,
    channel: usize,
}

impl<S: Source> PeakingEq<S> {
    pub fn new(inner: S, band: EqBand) -> Self {
        let rate = inner.sample_rate();
        let channels = usize::from(inner.channels().max(1));
        Self {
            inner,
            band,
            rate,
            coefficients: Coefficients::peaking(band, rate),
            states: vec![ChannelState::default(); channels],
            channel: 0,
        }
    }

    fn sync_format(&mut self) {
        let rate = self.inner.sample_rate();
        if rate != self.rate {
            self.rate = rate;
            self.coefficients = Coefficients::peaking(self.band, rate);
        }
        let channels = usize::from(self.inner.channels().max(1));
        if channels != self.states.len() {
            self.states = vec![ChannelState::default(); channels];
        }
    }
}

impl<S: Source> Iterator for PeakingEq<S> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.channel == 0 {
            self.sync_format();
        }
        let x = self.inner.next()?;
        let y = self.states[self.channel].process(&self.coefficients, x);
        self.channel = (self.channel + 1) % self.states.len();
        Some(y)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: Source> Source for PeakingEq<S> {
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.inner.try_seek(pos)?;
        self.states.iter_mut().for_each(|s| *s = ChannelState::default());
        self.channel = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::buffer::SamplesBuffer;

    fn band(gain_db: f32) -> EqBand {
        EqBand {
            frequency_hz: 1000.0,
            gain_db,
            q: 1.0,
        }
    }

    #[test]
    fn zero_gain_is_transparent() {
        let c = Coefficients::peaking(band(0.0), 44_100);
        assert!((c.b0 - 1.0).abs() < 1e-6);
        assert!((c.b1 - c.a1).abs() < 1e-6);
        assert!((c.b2 - c.a2).abs() < 1e-6);

        let input: Vec<f32> = (0..64).map(|i| ((i as f32) * 0.3).sin()).collect();
        let out: Vec<f32> = PeakingEq::new(SamplesBuffer::new(1, 44_100, input.clone()), band(0.0)).collect();
        assert_eq!(out.len(), input.len());
        for (a, b) in input.iter().zip(&out) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn boost_leaves_dc_untouched() {
        // A peaking band has unity gain far from its centre, including DC.
        let input = vec![0.5f32; 4000];
        let out: Vec<f32> = PeakingEq::new(SamplesBuffer::new(1, 44_100, input), band(6.0)).collect();
        let settled = *out.last().unwrap();
        assert!((settled - 0.5).abs() < 1e-3, "settled at {settled}");
    }

    #[test]
    fn channels_are_filtered_independently() {
        // Left carries a constant, right is silent; no bleed between them.
        let input: Vec<f32> = (0..2000).flat_map(|_| [0.25f32, 0.0]).collect();
        let out: Vec<f32> = PeakingEq::new(SamplesBuffer::new(2, 48_000, input), band(5.0)).collect();
        assert!(out.iter().skip(1).step_by(2).all(|s| s.abs() < 1e-9));
        assert!((out[out.len() - 2] - 0.25).abs() < 1e-3);
    }

    #[test]
    fn centre_frequency_is_clamped_below_nyquist() {
        let c = Coefficients::peaking(
            EqBand {
                frequency_hz: 30_000.0,
                gain_db: 5.0,
                q: 1.0,
            },
            8_000,
        );
        assert!(c.b0.is_finite() && c.a1.is_finite() && c.a2.is_finite());
    }
}
