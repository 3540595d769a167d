#![forbid(unsafe_code)]

//! Copy feedback options.
//!
//! Every field is optional so a partial set can be layered over another;
//! the accessors fall back to the defaults for whatever is still unset.

/// Default for [`CopyOptions::animation`].
pub const DEFAULT_ANIMATION: bool = true;
/// Default for [`CopyOptions::icon_size`].
pub const DEFAULT_ICON_SIZE: u16 = 16;
/// Default for [`CopyOptions::icon_color`].
pub const DEFAULT_ICON_COLOR: &str = "#fff";

/// Partial copy feedback options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Show the copy feedback icon and hold the target busy meanwhile.
    pub animation: Option<bool>,
    /// Icon edge length in pixels (or cells, for terminal hosts).
    pub icon_size: Option<u16>,
    /// Icon fill color.
    pub icon_color: Option<String>,
}

impl CopyOptions {
    /// Options with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every default filled in.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            animation: Some(DEFAULT_ANIMATION),
            icon_size: Some(DEFAULT_ICON_SIZE),
            icon_color: Some(DEFAULT_ICON_COLOR.to_owned()),
        }
    }

    /// Set the animation flag.
    #[must_use]
    pub fn with_animation(mut self, on: bool) -> Self {
        self.animation = Some(on);
        self
    }

    /// Set the icon size.
    #[must_use]
    pub fn with_icon_size(mut self, size: u16) -> Self {
        self.icon_size = Some(size);
        self
    }

    /// Set the icon color.
    #[must_use]
    pub fn with_icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = Some(color.into());
        self
    }

    /// Layer `over` on top of `self`; fields set in `over` win.
    #[must_use]
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            animation: over.animation.or(self.animation),
            icon_size: over.icon_size.or(self.icon_size),
            icon_color: over.icon_color.clone().or_else(|| self.icon_color.clone()),
        }
    }

    /// Effective animation flag.
    #[must_use]
    pub fn animation(&self) -> bool {
        self.animation.unwrap_or(DEFAULT_ANIMATION)
    }

    /// Effective icon size.
    #[must_use]
    pub fn icon_size(&self) -> u16 {
        self.icon_size.unwrap_or(DEFAULT_ICON_SIZE)
    }

    /// Effective icon color. A blank color counts as unset.
    #[must_use]
    pub fn icon_color(&self) -> &str {
        self.icon_color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_ICON_COLOR)
    }
}
