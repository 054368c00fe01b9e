//! SegmentTemplate identifier substitution.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(RepresentationID|Bandwidth|Number|Time)?(?:%0(\d+)d)?\$")
        .expect("static template pattern")
});

/// Substitute `$RepresentationID$`, `$Bandwidth$` and `$Number$` in a
/// SegmentTemplate URL. `$$` becomes a literal `$`. Identifiers without a
/// value (for example `$Number$` when resolving an initialization URL, or
/// `$Time$`) are left untouched.
///
/// A `%0Nd` width tag zero-pads numeric identifiers.
///
/// # Examples
///
/// ```
/// use clearcast_manifest::resolve_template;
///
/// assert_eq!(
///     resolve_template("v/$RepresentationID$/seg-$Number%05d$.m4s", "video=1", None, Some(42)),
///     "v/video=1/seg-00042.m4s"
/// );
/// ```
pub fn resolve_template(
    template: &str,
    representation_id: &str,
    bandwidth: Option<i64>,
    number: Option<i64>,
) -> String {
    IDENTIFIER
        .replace_all(template, |caps: &Captures<'_>| {
            let whole = caps[0].to_string();
            let Some(name) = caps.get(1) else {
                return if whole == "$$" { "$".to_string() } else { whole };
            };
            let width = caps.get(2).and_then(|w| w.as_str().parse::<usize>().ok());
            match name.as_str() {
                "RepresentationID" => representation_id.to_string(),
                "Bandwidth" => bandwidth.map_or(whole, |b| pad(b, width)),
                "Number" => number.map_or(whole, |n| pad(n, width)),
                _ => whole,
            }
        })
        .into_owned()
}

fn pad(value: i64, width: Option<usize>) -> String {
    match width {
        Some(width) => format!("{value:0width$}"),
        None => value.to_string(),
    }
}
