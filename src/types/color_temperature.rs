//! Color temperature control.

use serde::{Deserialize, Serialize};

/// Color temperature in mired (reciprocal megakelvin), from 153 to 500.
///
/// The bridge's `ct` attribute uses mired: 153 is roughly 6500K daylight,
/// 500 is roughly 2000K candle light.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct ColorTemperature {
    pub(crate) mired: u16,
}

impl Default for ColorTemperature {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTemperature {
    const MIN: u16 = 153;
    const MAX: u16 = 500;

    /// Create a new color temperature with the warmest value.
    pub fn new() -> Self {
        ColorTemperature { mired: Self::MAX }
    }

    pub fn mired(&self) -> u16 {
        self.mired
    }

    /// Approximate value in Kelvin.
    pub fn kelvin(&self) -> u32 {
        1_000_000 / u32::from(self.mired)
    }

    /// Returns `None` if value is outside the valid range (153-500).
    pub fn create(mired: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&mired) {
            Some(ColorTemperature { mired })
        } else {
            None
        }
    }

    /// Convert from Kelvin, clamping to what the bridge accepts.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_scene_rs::ColorTemperature;
    ///
    /// assert_eq!(ColorTemperature::from_kelvin(2700).mired(), 370);
    /// assert_eq!(ColorTemperature::from_kelvin(10_000).mired(), 153);
    /// assert_eq!(ColorTemperature::from_kelvin(0).mired(), 500);
    /// ```
    pub fn from_kelvin(kelvin: u32) -> Self {
        let mired = 1_000_000u32
            .checked_div(kelvin)
            .unwrap_or(u32::from(Self::MAX))
            .clamp(u32::from(Self::MIN), u32::from(Self::MAX));
        ColorTemperature {
            mired: mired as u16,
        }
    }
}
