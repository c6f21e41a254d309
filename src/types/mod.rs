//! Value types for light control parameters.

mod brightness;
mod color_temperature;
mod effect;
mod hue_saturation;
mod resource;

pub use brightness::Brightness;
pub use color_temperature::ColorTemperature;
pub use effect::{Alert, Effect};
pub use hue_saturation::HueSaturation;
pub use resource::Resource;
