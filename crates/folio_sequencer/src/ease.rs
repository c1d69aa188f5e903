// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves and their GSAP-style names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default overshoot for `back` eases
pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;

/// Which end of the curve the ease shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EaseDirection {
    /// Accelerate from zero velocity
    In,
    /// Decelerate to zero velocity
    Out,
    /// Accelerate, then decelerate
    InOut,
}

impl EaseDirection {
    fn suffix(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inOut",
        }
    }

    /// Build an out/in-out curve from an "in" curve
    fn shape(self, t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
        match self {
            Self::In => ease_in(t),
            Self::Out => 1.0 - ease_in(1.0 - t),
            Self::InOut => {
                if t < 0.5 {
                    ease_in(t * 2.0) / 2.0
                } else {
                    1.0 - ease_in((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

/// Easing curve applied to a tween's linear progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// No easing
    Linear,
    /// Polynomial ease; `power1` is quadratic, `power4` is quintic
    Power(u8, EaseDirection),
    /// Exponential ease
    Expo(EaseDirection),
    /// Overshooting ease with the given overshoot amount
    Back(f32, EaseDirection),
    /// Sinusoidal ease
    Sine(EaseDirection),
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power(1, EaseDirection::Out)
    }
}

impl Ease {
    /// Map linear progress `t` (clamped to 0..=1) to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match *self {
            Ease::Linear | Ease::Power(0, _) => t,
            Ease::Power(n, dir) => dir.shape(t, |p| p.powi(i32::from(n) + 1)),
            Ease::Expo(dir) => dir.shape(t, |p| {
                if p == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (p - 1.0))
                }
            }),
            Ease::Back(s, dir) => dir.shape(t, |p| p * p * ((s + 1.0) * p - s)),
            Ease::Sine(dir) => dir.shape(t, |p| 1.0 - (p * std::f32::consts::FRAC_PI_2).cos()),
        }
    }
}

/// Error parsing an ease name
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EaseParseError {
    /// Curve family not recognised
    #[error("Unknown ease: {0}")]
    UnknownEase(String),

    /// Direction suffix not recognised
    #[error("Unknown ease direction '{direction}' in {name}")]
    UnknownDirection {
        /// Full ease name
        name: String,
        /// Offending suffix
        direction: String,
    },

    /// Parameter in parentheses is not a number
    #[error("Invalid ease parameter in {0}")]
    InvalidParameter(String),
}

fn parse_direction(name: &str, raw: &str) -> Result<EaseDirection, EaseParseError> {
    // Accept both `out` and the legacy `easeOut` spelling
    let lowered = raw.to_ascii_lowercase();
    let trimmed = lowered.strip_prefix("ease").unwrap_or(&lowered);
    match trimmed {
        "in" => Ok(EaseDirection::In),
        "out" => Ok(EaseDirection::Out),
        "inout" => Ok(EaseDirection::InOut),
        _ => Err(EaseParseError::UnknownDirection {
            name: name.to_string(),
            direction: raw.to_string(),
        }),
    }
}

impl FromStr for Ease {
    type Err = EaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        // Split off `(param)`
        let (head, param) = match name.split_once('(') {
            Some((head, rest)) => {
                let inner = rest
                    .strip_suffix(')')
                    .ok_or_else(|| EaseParseError::InvalidParameter(name.to_string()))?;
                let value = inner
                    .trim()
                    .parse::<f32>()
                    .map_err(|_| EaseParseError::InvalidParameter(name.to_string()))?;
                (head, Some(value))
            }
            None => (name, None),
        };

        let (family, direction) = match head.split_once('.') {
            Some((family, dir)) => (family, Some(parse_direction(name, dir)?)),
            None => (head, None),
        };
        // Bare family names default to `out`, as GSAP does
        let dir = direction.unwrap_or(EaseDirection::Out);

        let family = family.to_ascii_lowercase();
        let ease = match family.as_str() {
            "none" | "linear" => Ease::Linear,
            "power0" => Ease::Power(0, dir),
            "power1" | "quad" => Ease::Power(1, dir),
            "power2" | "cubic" => Ease::Power(2, dir),
            "power3" | "quart" => Ease::Power(3, dir),
            "power4" | "quint" | "strong" => Ease::Power(4, dir),
            "expo" => Ease::Expo(dir),
            "back" => Ease::Back(param.unwrap_or(DEFAULT_BACK_OVERSHOOT), dir),
            "sine" => Ease::Sine(dir),
            _ => return Err(EaseParseError::UnknownEase(name.to_string())),
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = EaseParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::Power(n, dir) => write!(f, "power{n}.{}", dir.suffix()),
            Ease::Expo(dir) => write!(f, "expo.{}", dir.suffix()),
            Ease::Back(s, dir) => write!(f, "back.{}({s})", dir.suffix()),
            Ease::Sine(dir) => write!(f, "sine.{}", dir.suffix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_endpoints_are_fixed() {
        let eases = [
            Ease::Linear,
            Ease::Power(4, EaseDirection::InOut),
            Ease::Expo(EaseDirection::InOut),
            Ease::Back(1.9, EaseDirection::Out),
            Ease::Sine(EaseDirection::In),
        ];
        for ease in eases {
            assert_eq!(ease.apply(0.0), 0.0, "{ease}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease}");
            assert_eq!(ease.apply(-3.0), 0.0, "{ease}");
            assert_eq!(ease.apply(7.0), 1.0, "{ease}");
        }
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let ease = Ease::Expo(EaseDirection::InOut);
        assert!(approx(ease.apply(0.5), 0.5));
        assert!(approx(ease.apply(0.25) + ease.apply(0.75), 1.0));
    }

    #[test]
    fn test_power_out_curve() {
        // power3.out == 1 - (1 - t)^4
        let ease = Ease::Power(3, EaseDirection::Out);
        assert!(approx(ease.apply(0.5), 1.0 - 0.5f32.powi(4)));
    }

    #[test]
    fn test_back_out_overshoots() {
        let ease: Ease = "back.out(1.9)".parse().unwrap();
        let peak = (1..100)
            .map(|i| ease.apply(i as f32 / 100.0))
            .fold(0.0, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "Power4.easeInOut".parse::<Ease>().unwrap(),
            Ease::Power(4, EaseDirection::InOut)
        );
        assert_eq!(
            "Expo.easeInOut".parse::<Ease>().unwrap(),
            Ease::Expo(EaseDirection::InOut)
        );
        assert_eq!(
            "power3.out".parse::<Ease>().unwrap(),
            Ease::Power(3, EaseDirection::Out)
        );
        assert_eq!(
            "back.out(1.9)".parse::<Ease>().unwrap(),
            Ease::Back(1.9, EaseDirection::Out)
        );
        assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
        assert_eq!("expo".parse::<Ease>().unwrap(), Ease::Expo(EaseDirection::Out));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "bounce.out".parse::<Ease>(),
            Err(EaseParseError::UnknownEase(_))
        ));
        assert!(matches!(
            "expo.sideways".parse::<Ease>(),
            Err(EaseParseError::UnknownDirection { .. })
        ));
        assert!(matches!(
            "back.out(lots)".parse::<Ease>(),
            Err(EaseParseError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        let ease = Ease::Back(1.9, EaseDirection::Out);
        assert_eq!(ease.to_string(), "back.out(1.9)");
        assert_eq!(ease.to_string().parse::<Ease>().unwrap(), ease);
    }
}
