//! Hue and Saturation color representation.

/// Hue and Saturation in the bridge's native units.
///
/// - Hue: position on the color wheel, 0-65535 (both ends are red)
/// - Saturation: 0 (white) to 254 (fully colored)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueSaturation {
    hue: u16,
    saturation: u8,
}

impl HueSaturation {
    const MAX_SATURATION: u8 = 254;

    /// Create from bridge units.
    ///
    /// Returns `None` if saturation is above 254.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_scene_rs::HueSaturation;
    ///
    /// assert!(HueSaturation::create(0, 254).is_some());
    /// assert!(HueSaturation::create(65535, 0).is_some());
    /// assert!(HueSaturation::create(180, 255).is_none());
    /// ```
    pub fn create(hue: u16, saturation: u8) -> Option<Self> {
        if saturation <= Self::MAX_SATURATION {
            Some(HueSaturation { hue, saturation })
        } else {
            None
        }
    }

    /// Create from degrees (0-360) and percent (0-100).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_scene_rs::HueSaturation;
    ///
    /// let green = HueSaturation::from_degrees(120, 100).unwrap();
    /// assert_eq!(green.hue(), 21845);
    /// assert_eq!(green.saturation(), 254);
    /// assert!(HueSaturation::from_degrees(361, 50).is_none());
    /// assert!(HueSaturation::from_degrees(180, 101).is_none());
    /// ```
    pub fn from_degrees(degrees: u16, percent: u8) -> Option<Self> {
        if degrees > 360 || percent > 100 {
            return None;
        }
        let hue = u32::from(degrees) * u32::from(u16::MAX) / 360;
        let saturation = u32::from(percent) * u32::from(Self::MAX_SATURATION) / 100;
        Some(HueSaturation {
            hue: hue as u16,
            saturation: saturation as u8,
        })
    }

    /// Get the hue value.
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Get the saturation value.
    pub fn saturation(&self) -> u8 {
        self.saturation
    }
}
