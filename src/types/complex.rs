use std::cmp::Ordering;
use std::fmt;

use super::{compare_f64, parse_f64};
use crate::descriptor::Descriptor;
use crate::error::ParseError;

/// A complex number.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Creates `re + im i`.
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// The squared magnitude, `re² + im²`.
    pub fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

impl fmt::Display for Complex {
    /// `3+4i`, `0-2i`, `1.5+0i`. A negative zero imaginary part prints as `-0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im.is_sign_negative() { "" } else { "+" };
        write!(f, "{}{}{}i", self.re, sign, self.im)
    }
}

/// Complex numbers ordered by magnitude, then real part, then imaginary part.
///
/// This is not the field order: `3+4i` and `0+5i` have the same magnitude and the real part
/// breaks the tie, so `0+5i < 3+4i`.
///
/// Literals are `re`, `im i` or `re±im i`, with any whitespace ignored:
///
/// ```
/// use std::cmp::Ordering;
/// use bstree::types::{Complex, ComplexType};
/// use bstree::Descriptor;
///
/// let a = ComplexType.parse("3+4i").unwrap();
/// let b = ComplexType.parse("5i").unwrap();
///
/// assert_eq!(a, Complex::new(3.0, 4.0));
/// assert_eq!(b, Complex::new(0.0, 5.0));
/// assert_eq!(ComplexType.compare(&a, &b), Ordering::Greater);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComplexType;

impl Descriptor for ComplexType {
    type Value = Complex;

    fn name(&self) -> &'static str {
        "COMPLEX"
    }

    fn clone_value(&self, value: &Complex) -> Complex {
        *value
    }

    fn parse(&self, text: &str) -> Result<Complex, ParseError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(ParseError::MalformedComplex(text.to_owned()));
        }
        let malformed = |_| ParseError::MalformedComplex(text.to_owned());

        let Some(body) = compact.strip_suffix('i') else {
            return parse_f64("complex", &compact)
                .map(|re| Complex::new(re, 0.0))
                .map_err(malformed);
        };

        match split_point(body) {
            Some(at) => {
                // `3+-0i` carries both signs; the `+` belongs to neither part.
                let re_text = match body[..at].strip_suffix('+') {
                    Some(re) if body.as_bytes()[at] == b'-' => re,
                    _ => &body[..at],
                };
                let re = parse_f64("complex", re_text).map_err(malformed)?;
                let im = parse_f64("complex", &body[at..]).map_err(malformed)?;
                Ok(Complex::new(re, im))
            }
            None => parse_f64("complex", body)
                .map(|im| Complex::new(0.0, im))
                .map_err(malformed),
        }
    }

    fn compare(&self, a: &Complex, b: &Complex) -> Ordering {
        compare_f64(a.norm_sqr(), b.norm_sqr())
            .then_with(|| compare_f64(a.re, b.re))
            .then_with(|| compare_f64(a.im, b.im))
    }

    fn print(&self, value: &Complex) -> String {
        value.to_string()
    }
}

/// Where the imaginary part starts: the last `+` or `-` that isn't at the front and isn't
/// an exponent sign.
fn split_point(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'))
}
