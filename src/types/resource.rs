//! Bridge resource collections.

use strum_macros::{AsRefStr, Display, EnumString};

/// A top-level bridge collection, rendered as its URL path segment.
///
/// # Examples
///
/// ```
/// use hue_scene_rs::Resource;
///
/// assert_eq!(Resource::Scenes.to_string(), "scenes");
/// assert_eq!("groups".parse::<Resource>().unwrap(), Resource::Groups);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Lights,
    Groups,
    Scenes,
}
