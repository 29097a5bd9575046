use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::clock::MINUTES_PER_DAY;

/// Long-term weather pattern of the loaded map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Climate {
    SunAndRain,
    SunAndSnow,
    Sun,
    Rain,
    Snow,
    Thunderstorm,
}

impl Climate {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::SunAndRain),
            1 => Some(Self::SunAndSnow),
            2 => Some(Self::Sun),
            3 => Some(Self::Rain),
            4 => Some(Self::Snow),
            5 => Some(Self::Thunderstorm),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            Self::SunAndRain => 0,
            Self::SunAndSnow => 1,
            Self::Sun => 2,
            Self::Rain => 3,
            Self::Snow => 4,
            Self::Thunderstorm => 5,
        }
    }
}

/// Current weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sun,
    Rain,
    Snow,
    Thunderstorm,
}

impl Weather {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::Sun),
            1 => Some(Self::Rain),
            2 => Some(Self::Snow),
            3 => Some(Self::Thunderstorm),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            Self::Sun => 0,
            Self::Rain => 1,
            Self::Snow => 2,
            Self::Thunderstorm => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EnvData {
    climate: Climate,
    weather: Weather,
    rain_ratio: f64,
    snow_ratio: f64,
}

impl Default for EnvData {
    fn default() -> Self {
        Self {
            climate: Climate::SunAndRain,
            weather: Weather::Sun,
            rain_ratio: 0.3,
            snow_ratio: 0.1,
        }
    }
}

/// Shared climate/weather state for one session. Ratios are nominally in
/// `[0, 1]` but deliberately unvalidated.
#[derive(Debug, Default)]
pub struct EnvironmentState {
    inner: Arc<RwLock<EnvData>>,
}

impl Clone for EnvironmentState {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl EnvironmentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn climate(&self) -> Climate {
        self.inner.read().climate
    }

    pub fn set_climate(&self, climate: Climate) {
        self.inner.write().climate = climate;
    }

    pub fn weather(&self) -> Weather {
        self.inner.read().weather
    }

    pub fn set_weather(&self, weather: Weather) {
        self.inner.write().weather = weather;
    }

    pub fn rain_ratio(&self) -> f64 {
        self.inner.read().rain_ratio
    }

    pub fn set_rain_ratio(&self, ratio: f64) {
        self.inner.write().rain_ratio = ratio;
    }

    pub fn snow_ratio(&self) -> f64 {
        self.inner.read().snow_ratio
    }

    pub fn set_snow_ratio(&self, ratio: f64) {
        self.inner.write().snow_ratio = ratio;
    }
}

/// Hourly sun colors for the day/night cycle, midnight first, normalized
/// to `[0, 1]` per channel. The renderer interpolates between entries.
const SUN_COLORS: [[f32; 3]; 24] = [
    [23.0, 23.0, 55.0],
    [23.0, 23.0, 55.0],
    [23.0, 23.0, 55.0],
    [23.0, 23.0, 55.0],
    [23.0, 23.0, 55.0],
    [40.0, 40.0, 70.0],
    [70.0, 70.0, 120.0],
    [255.0, 100.0, 50.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 255.0, 255.0],
    [255.0, 100.0, 50.0],
    [100.0, 100.0, 150.0],
    [40.0, 40.0, 70.0],
    [23.0, 23.0, 55.0],
];

fn hour_color(hour: usize) -> Vec3 {
    let [r, g, b] = SUN_COLORS[hour % 24];
    Vec3::new(r, g, b) / 255.0
}

/// Sun color at the given clock time (minutes since midnight), linearly
/// interpolated between the surrounding hour entries.
pub fn sun_color_at(time: i64) -> Vec3 {
    let time = time.rem_euclid(MINUTES_PER_DAY);
    let hour = (time / 60) as usize;
    let minute_factor = (time % 60) as f32 / 60.0;
    hour_color(hour).lerp(hour_color(hour + 1), minute_factor)
}

/// Ambient light derived from the sun color.
pub fn ambient_color_at(time: i64) -> Vec3 {
    (sun_color_at(time) - Vec3::splat(0.25)).max(Vec3::ZERO)
}

/// Skybox opacity for the given clock time. The sky stays nearly
/// invisible through the night and fades in with dawn.
pub fn sky_alpha_at(time: i64) -> f32 {
    let time = time.rem_euclid(MINUTES_PER_DAY);
    if time <= 4 * 60 {
        0.1
    } else if time <= 5 * 60 {
        0.2
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_mild() {
        let env = EnvironmentState::new();
        assert_eq!(env.climate(), Climate::SunAndRain);
        assert_eq!(env.weather(), Weather::Sun);
        assert_eq!(env.rain_ratio(), 0.3);
        assert_eq!(env.snow_ratio(), 0.1);
    }

    #[test]
    fn raw_round_trips() {
        for raw in 0..=5 {
            assert_eq!(Climate::from_raw(raw).unwrap().raw(), raw);
        }
        for raw in 0..=3 {
            assert_eq!(Weather::from_raw(raw).unwrap().raw(), raw);
        }
        assert!(Climate::from_raw(6).is_none());
        assert!(Weather::from_raw(4).is_none());
    }

    #[test]
    fn sun_color_interpolates_within_the_hour() {
        // 06:00 -> 07:00 ramps from dim blue to sunrise orange.
        let at_six = sun_color_at(6 * 60);
        let at_half_past = sun_color_at(6 * 60 + 30);
        let at_seven = sun_color_at(7 * 60);
        assert!(at_six.x < at_half_past.x);
        assert!(at_half_past.x < at_seven.x);
    }

    #[test]
    fn sun_color_wraps_past_midnight() {
        // 23:30 interpolates toward the midnight entry, not out of range.
        let late = sun_color_at(23 * 60 + 30);
        assert!(late.x <= hour_color(23).x + f32::EPSILON);
    }

    #[test]
    fn ambient_never_goes_negative() {
        for hour in 0..24 {
            let ambient = ambient_color_at(hour * 60);
            assert!(ambient.min_element() >= 0.0);
        }
    }

    #[test]
    fn sky_alpha_thresholds() {
        assert_eq!(sky_alpha_at(2 * 60), 0.1);
        assert_eq!(sky_alpha_at(4 * 60 + 30), 0.2);
        assert_eq!(sky_alpha_at(12 * 60), 1.0);
    }
}
