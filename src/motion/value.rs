//! Animated Properties and Values

use std::fmt;
use std::str::FromStr;

/// Properties the engine knows how to drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Horizontal translation in px
    X,
    /// Vertical translation in px
    Y,
    Scale,
    Opacity,
    BackgroundColor,
    /// Horizontal scroll offset of an element
    ScrollLeft,
    /// Vertical scroll offset of the window
    ScrollY,
}

/// Something tweens can read from and write to
pub trait Animatable {
    fn read(&self, prop: Prop) -> Value;
    fn write(&self, prop: Prop, value: Value);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Num(f64),
    Color(Rgba),
}

impl Value {
    /// Interpolate towards `to`. Mismatched kinds snap at the end.
    pub fn lerp(self, to: Value, p: f64) -> Value {
        match (self, to) {
            (Value::Num(a), Value::Num(b)) => Value::Num(a + (b - a) * p),
            (Value::Color(a), Value::Color(b)) => Value::Color(a.lerp(b, p)),
            _ if p >= 1.0 => to,
            _ => self,
        }
    }

    pub fn as_num(self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(n),
            Value::Color(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<Rgba> for Value {
    fn from(c: Rgba) -> Self {
        Value::Color(c)
    }
}

// ========================
// Colors
// ========================

/// RGB channels 0..=255, alpha 0..=1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(self, to: Rgba, p: f64) -> Rgba {
        let mix = |a: f64, b: f64| a + (b - a) * p;
        Rgba {
            r: mix(self.r, to.r),
            g: mix(self.g, to.g),
            b: mix(self.b, to.b),
            a: mix(self.a, to.a),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r.round().clamp(0.0, 255.0),
            self.g.round().clamp(0.0, 255.0),
            self.b.round().clamp(0.0, 255.0),
            (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color `{0}`")]
pub struct ColorParseError(pub String);

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Accepts `rgb(r, g, b)`, `rgba(r, g, b, a)`, `#rgb`, `#rrggbb` and `transparent`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let src = s.trim();
        let err = || ColorParseError(s.to_string());

        if src.eq_ignore_ascii_case("transparent") {
            return Ok(Rgba::TRANSPARENT);
        }

        if let Some(hex) = src.strip_prefix('#') {
            let digits: Vec<u8> = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or_else(err)?;
            let [r, g, b] = match digits.as_slice() {
                [r, g, b] => [r * 17, g * 17, b * 17],
                [r1, r2, g1, g2, b1, b2] => [r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2],
                _ => return Err(err()),
            };
            return Ok(Rgba::new(f64::from(r), f64::from(g), f64::from(b), 1.0));
        }

        let inner = src
            .strip_prefix("rgba(")
            .or_else(|| src.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let parts: Vec<f64> = inner
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| err())?;
        match parts.as_slice() {
            [r, g, b] => Ok(Rgba::new(*r, *g, *b, 1.0)),
            [r, g, b, a] => Ok(Rgba::new(*r, *g, *b, *a)),
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba() {
        let c: Rgba = "rgba(220, 220, 220, 0.08)".parse().unwrap();
        assert_eq!(c, Rgba::new(220.0, 220.0, 220.0, 0.08));
    }

    #[test]
    fn test_parse_rgb_and_hex() {
        assert_eq!("rgb(1,2,3)".parse::<Rgba>().unwrap(), Rgba::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!("#fff".parse::<Rgba>().unwrap(), Rgba::new(255.0, 255.0, 255.0, 1.0));
        assert_eq!("#0a0B0c".parse::<Rgba>().unwrap(), Rgba::new(10.0, 11.0, 12.0, 1.0));
        assert_eq!("transparent".parse::<Rgba>().unwrap(), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("red".parse::<Rgba>().is_err());
        assert!("rgba(1, 2)".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_matches_css() {
        let c = Rgba::new(150.0, 150.0, 150.0, 0.12);
        assert_eq!(c.to_string(), "rgba(150, 150, 150, 0.12)");
    }

    #[test]
    fn test_lerp_halfway() {
        let a = Value::from(Rgba::new(0.0, 0.0, 0.0, 0.0));
        let b = Value::from(Rgba::new(200.0, 100.0, 50.0, 1.0));
        assert_eq!(a.lerp(b, 0.5), Value::Color(Rgba::new(100.0, 50.0, 25.0, 0.5)));
        assert_eq!(Value::Num(2.0).lerp(Value::Num(4.0), 0.25), Value::Num(2.5));
    }
}
