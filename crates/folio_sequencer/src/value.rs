// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animatable properties and their values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A visual property the driver can animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    /// Opacity (0 = transparent)
    Opacity,
    /// Uniform scale factor
    Scale,
    /// Rotation
    Rotate,
    /// Horizontal translation
    X,
    /// Vertical translation
    Y,
    /// Bottom edge offset
    Bottom,
}

impl Property {
    /// Get the property name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::X => "x",
            Self::Y => "y",
            Self::Bottom => "bottom",
        }
    }

    /// Unit used when a value is given as a bare number
    pub fn default_unit(&self) -> Unit {
        match self {
            Self::Opacity | Self::Scale => Unit::None,
            Self::Rotate => Unit::Deg,
            Self::X | Self::Y | Self::Bottom => Unit::Px,
        }
    }

    /// Value read for an element that never had this property set
    pub fn neutral(&self) -> Value {
        match self {
            Self::Opacity | Self::Scale => Value::number(1.0),
            other => Value::new(0.0, other.default_unit()),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit attached to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Unit {
    /// Unitless
    #[default]
    None,
    /// Pixels
    Px,
    /// Percent of the element's own size
    Percent,
    /// Degrees
    Deg,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Px => "px",
            Self::Percent => "%",
            Self::Deg => "deg",
        }
    }
}

/// A numeric amount with a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Value {
    /// Numeric amount
    pub amount: f32,
    /// Unit of the amount
    pub unit: Unit,
}

impl Value {
    /// Create a value
    pub fn new(amount: f32, unit: Unit) -> Self {
        Self { amount, unit }
    }

    /// Unitless value
    pub fn number(amount: f32) -> Self {
        Self::new(amount, Unit::None)
    }

    /// Pixel value
    pub fn px(amount: f32) -> Self {
        Self::new(amount, Unit::Px)
    }

    /// Percent value
    pub fn percent(amount: f32) -> Self {
        Self::new(amount, Unit::Percent)
    }

    /// Degree value
    pub fn deg(amount: f32) -> Self {
        Self::new(amount, Unit::Deg)
    }

    /// Interpolate towards `to` by `t`.
    ///
    /// The amount is interpolated numerically; the result always carries
    /// the target unit, even when the start value used another one.
    pub fn lerp(&self, to: &Value, t: f32) -> Value {
        if t == 1.0 {
            return *to;
        }
        Value::new(self.amount + (to.amount - self.amount) * t, to.unit)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Ordered set of property targets for one tween
pub type PropertyMap = IndexMap<Property, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_values() {
        assert_eq!(Property::Opacity.neutral(), Value::number(1.0));
        assert_eq!(Property::Scale.neutral(), Value::number(1.0));
        assert_eq!(Property::Rotate.neutral(), Value::deg(0.0));
        assert_eq!(Property::X.neutral(), Value::px(0.0));
    }

    #[test]
    fn test_lerp_adopts_target_unit() {
        let from = Value::px(0.0);
        let to = Value::percent(-50.0);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid, Value::percent(-25.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::percent(-8.0).to_string(), "-8%");
        assert_eq!(Value::px(12.5).to_string(), "12.5px");
        assert_eq!(Value::number(1.1).to_string(), "1.1");
    }
}
