//! DASH manifest parsing for clearcast.
//!
//! The MPD document is read through an explicit serde schema, scalar
//! attributes are coerced with [`TypedValue::parse`], and the first period is
//! converted into a typed [`Manifest`]. Structurally incomplete documents fail
//! with [`clearcast_common::Error::ManifestParse`].
//!
//! ```
//! use clearcast_manifest::parse_manifest;
//!
//! let mpd = r#"<MPD type="static"><Period>
//!   <AdaptationSet mimeType="video/mp4">
//!     <SegmentTemplate timescale="90000" startNumber="1" media="v-$Number$.m4s" initialization="v-init.mp4">
//!       <SegmentTimeline><S t="0" d="360000" r="10"/></SegmentTimeline>
//!     </SegmentTemplate>
//!     <Representation id="1" bandwidth="500000" width="1280" height="720"/>
//!   </AdaptationSet>
//! </Period></MPD>"#;
//!
//! let manifest = parse_manifest(mpd).unwrap();
//! let rep = manifest.primary_adaptation_set().unwrap().best_representation().unwrap();
//! assert_eq!(rep.segment_duration, 4.0);
//! assert_eq!(rep.media_url(3), "v-3.m4s");
//! ```

mod model;
mod schema;
mod select;
mod template;
mod value;

use clearcast_common::{Error, Result};

pub use model::{
    AdaptationSet, Manifest, Period, Representation, AUDIO_CHANNEL_SCHEME, WIDEVINE_SCHEME,
};
pub use select::select_best_representation;
pub use template::resolve_template;
pub use value::TypedValue;

/// Parse MPD text into a [`Manifest`].
pub fn parse_manifest(text: &str) -> Result<Manifest> {
    let raw = schema::from_str(text).map_err(|e| Error::manifest(format!("invalid MPD: {e}")))?;
    model::build_manifest(raw)
}
