//! Caller-supplied option lists and their validation.
//!
//! Every drawing and cropping call takes an [`Options`] list: ordered
//! key/value entries whose keys come from a fixed per-operation set. Each
//! operation owns a typed options struct implementing [`FromOptions`], which
//! walks the list left to right, stops at the first invalid entry, and
//! otherwise yields the struct with defaults filled in for absent keys.
//!
//! Keys an operation does not recognize are passed over untouched, so a
//! single list can be shared between several calls.

use std::fmt;

use crate::error::OptionError;
use crate::imageops_draw::color::Color;

/// A single option value as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A symbolic value such as `center` or `multiply`
    Name(String),
    Color(Color),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Name(name) => f.write_str(name),
            Self::Color(color) => write!(f, "{color}"),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Color> for OptionValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// Ordered list of option entries
///
/// # Examples
///
/// ```
/// use imageops_draw::{Color, Options};
///
/// let options = Options::new()
///     .with("color", Color::Rgb([255.0, 0.0, 0.0]))
///     .with("fill", false)
///     .with("stroke_width", 3);
/// assert_eq!(options.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, OptionValue)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, consuming and returning the list
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an entry
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Typed options built from an [`Options`] list
///
/// Implementors provide the defaults through [`Default`] and the handling
/// of a single entry through [`FromOptions::apply`].
pub trait FromOptions: Default {
    /// Applies one entry to the accumulator
    ///
    /// Unrecognized keys must return `Ok(())` without touching `self`.
    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError>;

    /// Validates an option list
    ///
    /// Entries are applied left to right, so the last write for a key
    /// wins. The first invalid entry aborts the walk.
    ///
    /// # Errors
    ///
    /// * `OptionError::InvalidChoice` - When an enumerated option names an unknown value
    /// * `OptionError::InvalidValue` - When a value has the wrong shape for its key
    fn from_options(options: &Options) -> Result<Self, OptionError> {
        options
            .iter()
            .try_fold(Self::default(), |mut accumulator, (key, value)| {
                accumulator.apply(key, value)?;
                Ok(accumulator)
            })
    }
}

/// A closed set of named option values
pub trait OptionEnum: Copy + 'static {
    /// Every variant in declaration order
    const VARIANTS: &'static [Self];

    /// The name callers use for this variant
    fn name(self) -> &'static str;

    /// Names of all variants in declaration order
    fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|variant| variant.name()).collect()
    }

    /// Looks up the variant named by `value`
    ///
    /// # Errors
    ///
    /// * `OptionError::InvalidChoice` - When `value` is not the name of a variant
    fn parse(key: &str, value: &OptionValue) -> Result<Self, OptionError> {
        let found = match value {
            OptionValue::Name(name) => Self::VARIANTS
                .iter()
                .copied()
                .find(|variant| variant.name() == name),
            _ => None,
        };

        found.ok_or_else(|| OptionError::InvalidChoice {
            key: key.to_owned(),
            value: value.clone(),
            valid: Self::names(),
        })
    }
}

fn invalid(key: &str, value: &OptionValue, expected: &'static str) -> OptionError {
    OptionError::InvalidValue {
        key: key.to_owned(),
        value: value.clone(),
        expected,
    }
}

pub(crate) fn expect_bool(key: &str, value: &OptionValue) -> Result<bool, OptionError> {
    match value {
        OptionValue::Bool(flag) => Ok(*flag),
        _ => Err(invalid(key, value, "a boolean")),
    }
}

pub(crate) fn expect_positive_int(key: &str, value: &OptionValue) -> Result<u32, OptionError> {
    match value {
        OptionValue::Int(number) if *number > 0 => {
            u32::try_from(*number).map_err(|_| invalid(key, value, "a positive integer"))
        }
        _ => Err(invalid(key, value, "a positive integer")),
    }
}

pub(crate) fn expect_color(key: &str, value: &OptionValue) -> Result<Color, OptionError> {
    match value {
        OptionValue::Color(color) => Ok(*color),
        _ => Err(invalid(key, value, "a colour with 3 or 4 bands")),
    }
}
