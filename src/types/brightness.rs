//! Brightness control for Hue lights.

use serde::{Deserialize, Serialize};

/// Brightness level as understood by the bridge, from 1 to 254.
///
/// 1 is the lowest level the lamp can show, not off; use `on: false` to
/// switch a light off.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new()
    }
}

impl Brightness {
    const MIN: u8 = 1;
    const MAX: u8 = 254;

    pub fn new() -> Self {
        Brightness { value: Self::MAX }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside valid range (1-254).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_scene_rs::Brightness;
    ///
    /// assert!(Brightness::create(0).is_none());
    /// assert_eq!(Brightness::create(254).unwrap().value(), 254);
    /// assert!(Brightness::create(255).is_none());
    /// ```
    pub fn create(value: u8) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Brightness { value })
        } else {
            None
        }
    }

    /// Convert a percentage (0-100) to the closest bridge level.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_scene_rs::Brightness;
    ///
    /// assert_eq!(Brightness::from_percent(0).value(), 1);
    /// assert_eq!(Brightness::from_percent(50).value(), 127);
    /// assert_eq!(Brightness::from_percent(150).value(), 254);
    /// ```
    pub fn from_percent(percent: u8) -> Self {
        let percent = u32::from(percent.min(100));
        let scaled = (percent * u32::from(Self::MAX) + 50) / 100;
        Brightness {
            value: (scaled as u8).max(Self::MIN),
        }
    }

    fn is_valid(value: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full_brightness() {
        assert_eq!(Brightness::default().value(), 254);
        assert_eq!(Brightness::default(), Brightness::new());
    }
}
