//! Light state bodies sent to the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Error;
use crate::types::{Alert, Brightness, ColorTemperature, Effect, HueSaturation};

/// A light state to write to a light or to a scene's `lightstates` entry.
///
/// Only the attributes that were set are serialized.
///
/// # Examples
///
/// ```
/// use hue_scene_rs::{Brightness, ColorTemperature, LightState};
///
/// let mut state = LightState::new();
/// assert!(!state.is_valid());
///
/// state.on(true);
/// state.brightness(&Brightness::create(200).unwrap());
/// state.color_temperature(&ColorTemperature::from_kelvin(4000));
///
/// let json = serde_json::to_string(&state).unwrap();
/// assert_eq!(json, r#"{"on":true,"bri":200,"ct":250}"#);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LightState {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<u8>,
    pub(crate) hue: Option<u16>,
    pub(crate) sat: Option<u8>,
    pub(crate) xy: Option<[f32; 2]>,
    pub(crate) ct: Option<u16>,
    pub(crate) alert: Option<Alert>,
    pub(crate) effect: Option<Effect>,
    #[serde(rename = "transitiontime")]
    pub(crate) transition_time: Option<u16>,
}

impl LightState {
    /// Create a new empty light state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if at least one attribute is set.
    pub fn is_valid(&self) -> bool {
        self.on.is_some()
            || self.bri.is_some()
            || self.hue.is_some()
            || self.sat.is_some()
            || self.xy.is_some()
            || self.ct.is_some()
            || self.alert.is_some()
            || self.effect.is_some()
    }

    pub fn on(&mut self, on: bool) -> &mut Self {
        self.on = Some(on);
        self
    }

    pub fn brightness(&mut self, brightness: &Brightness) -> &mut Self {
        self.bri = Some(brightness.value);
        self
    }

    pub fn hue_saturation(&mut self, hs: &HueSaturation) -> &mut Self {
        self.hue = Some(hs.hue());
        self.sat = Some(hs.saturation());
        self
    }

    /// Set the CIE color space coordinates; each is clamped to 0.0-1.0.
    pub fn xy(&mut self, x: f32, y: f32) -> &mut Self {
        self.xy = Some([x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)]);
        self
    }

    pub fn color_temperature(&mut self, ct: &ColorTemperature) -> &mut Self {
        self.ct = Some(ct.mired);
        self
    }

    pub fn alert(&mut self, alert: Alert) -> &mut Self {
        self.alert = Some(alert);
        self
    }

    pub fn effect(&mut self, effect: Effect) -> &mut Self {
        self.effect = Some(effect);
        self
    }

    /// Transition duration in multiples of 100ms.
    ///
    /// A transition time alone does not make a state valid; it must accompany another
    /// attribute.
    pub fn transition_time(&mut self, deciseconds: u16) -> &mut Self {
        self.transition_time = Some(deciseconds);
        self
    }
}

/// The body of a state write.
///
/// Text is sent as-is; anything else is serialized as compact JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum StateBody {
    Raw(String),
    Json(Value),
}

impl StateBody {
    pub(crate) fn into_text(self) -> Result<String, Error> {
        match self {
            StateBody::Raw(text) => Ok(text),
            StateBody::Json(value) => serde_json::to_string(&value).map_err(Error::JsonDump),
        }
    }
}

impl From<String> for StateBody {
    fn from(text: String) -> Self {
        StateBody::Raw(text)
    }
}

impl From<&str> for StateBody {
    fn from(text: &str) -> Self {
        StateBody::Raw(text.to_string())
    }
}

impl From<Value> for StateBody {
    fn from(value: Value) -> Self {
        StateBody::Json(value)
    }
}

impl TryFrom<&LightState> for StateBody {
    type Error = Error;

    fn try_from(state: &LightState) -> Result<Self, Self::Error> {
        serde_json::to_value(state)
            .map(StateBody::Json)
            .map_err(Error::JsonDump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_set_fields_serialize() {
        let mut state = LightState::new();
        state
            .hue_saturation(&HueSaturation::create(1000, 200).unwrap())
            .alert(Alert::Select)
            .effect(Effect::ColorLoop)
            .transition_time(4);

        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"hue": 1000, "sat": 200, "alert": "select", "effect": "colorloop", "transitiontime": 4})
        );
    }

    #[test]
    fn test_transition_alone_is_not_valid() {
        let mut state = LightState::new();
        state.transition_time(10);
        assert!(!state.is_valid());
        state.xy(1.5, -0.2);
        assert!(state.is_valid());
        assert_eq!(state.xy, Some([1.0, 0.0]));
    }

    #[test]
    fn test_scene_light_state_parses() {
        let state: LightState =
            serde_json::from_value(json!({"on": true, "bri": 144, "xy": [0.4, 0.4]})).unwrap();
        assert_eq!(state.on, Some(true));
        assert_eq!(state.bri, Some(144));
    }

    #[test]
    fn test_state_body_text() {
        let raw = StateBody::from("{\"on\": false}");
        assert_eq!(raw.into_text().unwrap(), "{\"on\": false}");

        let json = StateBody::from(json!({"on": true, "bri": 10}));
        assert_eq!(json.into_text().unwrap(), "{\"on\":true,\"bri\":10}");
    }

    #[test]
    fn test_light_state_into_body() {
        let mut state = LightState::new();
        state.on(false);
        let body = StateBody::try_from(&state).unwrap();
        assert_eq!(body, StateBody::Json(json!({"on": false})));
    }
}
