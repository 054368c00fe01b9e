//! Typed coercion of manifest attribute strings.

use std::cmp::Ordering;
use std::fmt;

/// A scalar attribute value after coercion.
///
/// A string becomes an [`Integer`](TypedValue::Integer) only when printing the
/// parsed integer reproduces the original text exactly, so `"0123"` and
/// `"+5"` stay text. `"true"` and `"false"` become booleans.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl TypedValue {
    /// Coerce a raw attribute string.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearcast_manifest::TypedValue;
    ///
    /// assert_eq!(TypedValue::parse("123"), TypedValue::Integer(123));
    /// assert_eq!(TypedValue::parse("0123"), TypedValue::Text("0123".into()));
    /// assert_eq!(TypedValue::parse("true"), TypedValue::Boolean(true));
    /// ```
    pub fn parse(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            if n.to_string() == raw {
                return TypedValue::Integer(n);
            }
        }
        match raw {
            "true" => TypedValue::Boolean(true),
            "false" => TypedValue::Boolean(false),
            _ => TypedValue::Text(raw.to_string()),
        }
    }

    /// The integer value, if this is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric reading used for ranking.
    ///
    /// Integers map directly; text of the form `num/den` (frame rates such as
    /// `30000/1001`) or a decimal is evaluated; everything else is zero.
    pub fn numeric(&self) -> f64 {
        match self {
            TypedValue::Integer(n) => *n as f64,
            TypedValue::Boolean(_) => 0.0,
            TypedValue::Text(s) => match s.split_once('/') {
                Some((num, den)) => match (num.parse::<f64>(), den.parse::<f64>()) {
                    (Ok(num), Ok(den)) if den != 0.0 => num / den,
                    _ => 0.0,
                },
                None => s.parse::<f64>().unwrap_or(0.0),
            },
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Integer(n) => write!(f, "{n}"),
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::Text(s) => f.write_str(s),
        }
    }
}

/// Ascending order for representation ids: integers numerically and before
/// text, text lexicographically.
pub(crate) fn compare_ids(a: &TypedValue, b: &TypedValue) -> Ordering {
    match (a, b) {
        (TypedValue::Integer(x), TypedValue::Integer(y)) => x.cmp(y),
        (TypedValue::Integer(_), _) => Ordering::Less,
        (_, TypedValue::Integer(_)) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}
