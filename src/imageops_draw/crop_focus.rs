use crate::error::OptionError;
use crate::imageops_draw::options::{FromOptions, OptionEnum, OptionValue};

/// How a crop-to-size operation chooses the region that survives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropFocus {
    None,
    #[default]
    Center,
    Entropy,
    Attention,
    Low,
    High,
}

impl OptionEnum for CropFocus {
    const VARIANTS: &'static [Self] = &[
        Self::None,
        Self::Center,
        Self::Entropy,
        Self::Attention,
        Self::Low,
        Self::High,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Center => "center",
            Self::Entropy => "entropy",
            Self::Attention => "attention",
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Region-selection strategy understood by the smart-crop engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interesting {
    /// Keep the top-left corner
    None,
    /// Keep the middle
    Centre,
    /// Shave off the least busy edges
    Entropy,
    /// Keep the window with the most edges and saturation
    Attention,
    /// Keep the lowest coordinates
    Low,
    /// Keep the highest coordinates
    High,
}

impl From<CropFocus> for Interesting {
    fn from(focus: CropFocus) -> Self {
        match focus {
            CropFocus::None => Self::None,
            CropFocus::Center => Self::Centre,
            CropFocus::Entropy => Self::Entropy,
            CropFocus::Attention => Self::Attention,
            CropFocus::Low => Self::Low,
            CropFocus::High => Self::High,
        }
    }
}

/// Validated options for [`SmartCrop`](crate::SmartCrop)
///
/// Recognized keys:
///
/// * `focus` - one of `none`, `center`, `entropy`, `attention`, `low`, `high` (default `center`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropOptions {
    pub focus: Interesting,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            focus: CropFocus::default().into(),
        }
    }
}

impl FromOptions for CropOptions {
    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        if key == "focus" {
            self.focus = CropFocus::parse(key, value)?.into();
        }
        Ok(())
    }
}
