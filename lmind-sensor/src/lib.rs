//! Synthetic environmental telemetry for led-minder builds.
//!
//! The led-minder device has no real DHT attached; readings are
//! synthesized as a bounded, smoothly-varying signal so the sync
//! protocol can be exercised deterministically in simulation. The
//! waveform is a sin/cos sweep around a fixed baseline with a small
//! uniform jitter term, clamped to a physically plausible envelope.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Published temperature is always within this envelope (deg C)
pub const TEMP_MIN: f32 = 20.0;
pub const TEMP_MAX: f32 = 35.0;

/// Published humidity is always within this envelope (% RH)
pub const HUMIDITY_MIN: f32 = 30.0;
pub const HUMIDITY_MAX: f32 = 80.0;

/// One synthesized reading. Produced on each scheduled telemetry
/// tick, consumed once by the publish step, then discarded; no
/// history is retained device-side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub temperature: f32,
    pub humidity: f32,
    /// Strictly increasing across the process lifetime, never reset
    /// on link transitions
    pub sample_index: u64,
}

/// Stand-in for the DHT driver. Owns the process-wide sample counter
/// and the jitter RNG; each call advances the counter and synthesizes
/// the next reading. Cannot fail, no I/O.
pub struct SyntheticSensor {
    counter: u64,
    rng: SmallRng,
}

impl SyntheticSensor {
    pub fn new() -> Self {
        Self {
            counter: 0,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Fixed-seed constructor so tests get a reproducible jitter
    /// sequence
    pub fn with_seed(seed: u64) -> Self {
        Self {
            counter: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_sample(&mut self) -> TelemetrySample {
        // Counter advances before use, so the first sample carries
        // index 1
        self.counter += 1;
        let n = self.counter as f32;

        let jitter_t: f32 = self.rng.gen_range(0.0..3.0);
        let temperature = (22.0 + (n * 0.1).sin() * 8.0 + jitter_t).clamp(TEMP_MIN, TEMP_MAX);

        let jitter_h: f32 = self.rng.gen_range(0.0..2.0);
        let humidity = (50.0 + (n * 0.08).cos() * 20.0 + jitter_h).clamp(HUMIDITY_MIN, HUMIDITY_MAX);

        TelemetrySample {
            temperature,
            humidity,
            sample_index: self.counter,
        }
    }
}

impl Default for SyntheticSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_envelope() {
        let mut sensor = SyntheticSensor::with_seed(0xfacebeef);
        for _ in 0..10_000 {
            let sample = sensor.next_sample();
            assert!(
                (TEMP_MIN..=TEMP_MAX).contains(&sample.temperature),
                "temperature out of envelope: {:?}",
                sample
            );
            assert!(
                (HUMIDITY_MIN..=HUMIDITY_MAX).contains(&sample.humidity),
                "humidity out of envelope: {:?}",
                sample
            );
        }
    }

    #[test]
    fn sample_index_strictly_increases() {
        let mut sensor = SyntheticSensor::with_seed(1);
        let mut last = 0;
        for _ in 0..100 {
            let sample = sensor.next_sample();
            assert!(sample.sample_index > last);
            last = sample.sample_index;
        }
    }

    #[test]
    fn first_sample_has_index_one() {
        let mut sensor = SyntheticSensor::with_seed(7);
        assert_eq!(sensor.next_sample().sample_index, 1);
    }

    #[test]
    fn seeded_sensors_agree() {
        let mut a = SyntheticSensor::with_seed(42);
        let mut b = SyntheticSensor::with_seed(42);
        for _ in 0..16 {
            let sa = a.next_sample();
            let sb = b.next_sample();
            assert_eq!(sa.temperature, sb.temperature);
            assert_eq!(sa.humidity, sb.humidity);
        }
    }
}
