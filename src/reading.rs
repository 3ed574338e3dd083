use rand::Rng;
use serde::Serialize;

pub const CO2_PPM_RANGE: std::ops::RangeInclusive<u16> = 400..=1000;
pub const CO_PPM_RANGE: std::ops::RangeInclusive<u16> = 1..=10;
pub const AIR_QUALITY_PPM_RANGE: std::ops::RangeInclusive<u16> = 20..=70;
pub const SMOKE_PPM_RANGE: std::ops::RangeInclusive<u16> = 10..=110;

pub const FLAME_PROBABILITY: f64 = 0.1;
pub const MOTION_PROBABILITY: f64 = 0.5;

/// One row of `environment_data`. `id` and `created_at` are filled in by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub co2_ppm: u16,
    pub co_ppm: u16,
    pub air_quality_ppm: u16,
    pub smoke_ppm: u16,
    pub flame_detected: bool,
    pub motion_detected: bool,
    pub relay_on: bool,
}

impl Reading {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Reading {
        Reading {
            co2_ppm: rng.gen_range(CO2_PPM_RANGE),
            co_ppm: rng.gen_range(CO_PPM_RANGE),
            air_quality_ppm: rng.gen_range(AIR_QUALITY_PPM_RANGE),
            smoke_ppm: rng.gen_range(SMOKE_PPM_RANGE),
            flame_detected: rng.gen_bool(FLAME_PROBABILITY),
            motion_detected: rng.gen_bool(MOTION_PROBABILITY),
            relay_on: false,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "CO2: {} ppm, CO: {} ppm, AQ: {} ppm",
            self.co2_ppm, self.co_ppm, self.air_quality_ppm
        )
    }
}
