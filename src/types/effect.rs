//! Alert and dynamic effect modes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Temporary alert effect for a light.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Alert {
    /// Stop any running alert
    None,
    /// A single breathe cycle
    Select,
    /// Breathe cycles for 15 seconds
    LSelect,
}

/// Continuous dynamic effect for a light.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use hue_scene_rs::Effect;
///
/// assert_eq!(Effect::from_str("colorloop").unwrap(), Effect::ColorLoop);
/// assert_eq!(Effect::None.to_string(), "none");
/// ```
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Effect {
    None,
    /// Cycle through all hues at the current brightness and saturation
    ColorLoop,
}
