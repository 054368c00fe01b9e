//! Typed manifest tree built from the raw schema.

use clearcast_common::{Error, Result};

use crate::schema::{
    AdaptationSetNode, ContentProtectionNode, DescriptorNode, MpdNode, PeriodNode,
    RepresentationNode, SegmentTemplateNode,
};
use crate::select::select_best_representation;
use crate::template::resolve_template;
use crate::value::TypedValue;

/// Widevine DRM system identifier.
pub const WIDEVINE_SCHEME: &str = "urn:uuid:edef8ba9-79d6-4ace-a3c8-27dcd51d21ed";

/// MPEG-DASH audio channel configuration descriptor scheme.
pub const AUDIO_CHANNEL_SCHEME: &str = "urn:mpeg:dash:23003:3:audio_channel_configuration:2011";

/// A parsed DASH manifest. Only the first period is modeled.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub id: Option<TypedValue>,
    /// `static` or `dynamic`.
    pub kind: Option<String>,
    pub duration: Option<String>,
    pub min_buffer_time: Option<String>,
    pub profiles: Option<String>,
    pub base_urls: Vec<String>,
    pub period: Period,
    pub adaptation_sets: Vec<AdaptationSet>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Period {
    pub id: Option<TypedValue>,
    pub start: Option<String>,
    pub duration: Option<String>,
}

impl Manifest {
    /// Whether the presentation is live (`type="dynamic"`).
    pub fn is_live(&self) -> bool {
        self.kind.as_deref() == Some("dynamic")
    }

    /// The adaptation set that drives playlist timing: the first video set,
    /// else the first audio set.
    pub fn primary_adaptation_set(&self) -> Option<&AdaptationSet> {
        self.adaptation_sets
            .iter()
            .find(|a| a.is_video)
            .or_else(|| self.adaptation_sets.iter().find(|a| a.is_audio))
    }
}

/// A group of interchangeable representations of one media type.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptationSet {
    pub id: Option<TypedValue>,
    pub mime_type: String,
    pub lang: Option<String>,
    pub is_video: bool,
    pub is_audio: bool,
    pub representations: Vec<Representation>,
}

impl AdaptationSet {
    pub fn best_representation(&self) -> Option<&Representation> {
        select_best_representation(&self.representations)
    }
}

/// One encoded variant inside an adaptation set.
#[derive(Debug, Clone, PartialEq)]
pub struct Representation {
    pub id: TypedValue,
    pub bandwidth: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub frame_rate: Option<TypedValue>,
    pub audio_sampling_rate: Option<TypedValue>,
    pub codecs: Option<String>,
    pub timescale: i64,
    pub start_number: i64,
    /// Media URL template, e.g. `seg-$Number$.m4s`.
    pub media: String,
    /// Initialization URL template.
    pub initialization: String,
    /// Seconds per segment, from the first timeline entry.
    pub segment_duration: f64,
    pub protected: bool,
    pub default_kid: Option<String>,
    pub widevine_pssh: Option<String>,
    pub audio_channels: Option<TypedValue>,
}

impl Representation {
    /// `width * height`, zero when either is unknown.
    pub fn pixel_count(&self) -> i64 {
        match (self.width, self.height) {
            (Some(w), Some(h)) => w.saturating_mul(h),
            _ => 0,
        }
    }

    /// Initialization URL with identifiers substituted.
    pub fn initialization_url(&self) -> String {
        resolve_template(&self.initialization, &self.id.to_string(), self.bandwidth, None)
    }

    /// Media URL for segment `number` with identifiers substituted.
    pub fn media_url(&self, number: i64) -> String {
        resolve_template(&self.media, &self.id.to_string(), self.bandwidth, Some(number))
    }
}

pub(crate) fn build_manifest(mpd: MpdNode) -> Result<Manifest> {
    let period_node = mpd
        .periods
        .into_iter()
        .next()
        .ok_or_else(|| Error::manifest("manifest has no Period"))?;
    let PeriodNode {
        id: period_id,
        start,
        duration: period_duration,
        adaptation_sets,
    } = period_node;

    let mut sets = Vec::with_capacity(adaptation_sets.len());
    for node in adaptation_sets {
        if let Some(set) = build_adaptation_set(node)? {
            sets.push(set);
        }
    }

    Ok(Manifest {
        id: mpd.id.as_deref().map(TypedValue::parse),
        kind: mpd.kind,
        duration: mpd.media_presentation_duration,
        min_buffer_time: mpd.min_buffer_time,
        profiles: mpd.profiles,
        base_urls: mpd
            .base_urls
            .into_iter()
            .map(|b| b.value.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect(),
        period: Period {
            id: period_id.as_deref().map(TypedValue::parse),
            start,
            duration: period_duration,
        },
        adaptation_sets: sets,
    })
}

/// Returns `None` for sets that are neither video nor audio.
fn build_adaptation_set(node: AdaptationSetNode) -> Result<Option<AdaptationSet>> {
    let mime_type = node
        .mime_type
        .clone()
        .or_else(|| node.representations.iter().find_map(|r| r.mime_type.clone()))
        .unwrap_or_default();
    let is_video = mime_type.starts_with("video/");
    let is_audio = mime_type.starts_with("audio/");
    if !is_video && !is_audio {
        return Ok(None);
    }

    let inherited = Inherited {
        template: node.segment_template.as_ref(),
        protection: &node.content_protection,
        channels: &node.audio_channel_configuration,
    };
    let representations = node
        .representations
        .iter()
        .map(|r| build_representation(r, &inherited))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(AdaptationSet {
        id: node.id.as_deref().map(TypedValue::parse),
        mime_type,
        lang: node.lang,
        is_video,
        is_audio,
        representations,
    }))
}

/// Adaptation-set level elements a representation falls back to.
struct Inherited<'a> {
    template: Option<&'a SegmentTemplateNode>,
    protection: &'a [ContentProtectionNode],
    channels: &'a [DescriptorNode],
}

fn build_representation(node: &RepresentationNode, inherited: &Inherited<'_>) -> Result<Representation> {
    let id = node
        .id
        .as_deref()
        .map(TypedValue::parse)
        .ok_or_else(|| Error::manifest("Representation is missing id"))?;

    let template = node
        .segment_template
        .as_ref()
        .or(inherited.template)
        .ok_or_else(|| Error::manifest(format!("Representation {id} has no SegmentTemplate")))?;

    let timescale = int_attr("timescale", template.timescale.as_deref())?.unwrap_or(1);
    if timescale <= 0 {
        return Err(Error::manifest(format!("Representation {id} has timescale {timescale}")));
    }
    let start_number = int_attr("startNumber", template.start_number.as_deref())?.unwrap_or(1);

    let first_entry = template
        .segment_timeline
        .as_ref()
        .and_then(|t| t.entries.first())
        .ok_or_else(|| Error::manifest(format!("Representation {id} has no SegmentTimeline entry")))?;
    let entry_duration = int_attr("d", first_entry.d.as_deref())?
        .ok_or_else(|| Error::manifest(format!("Representation {id} timeline entry has no duration")))?;

    let media = template
        .media
        .clone()
        .ok_or_else(|| Error::manifest(format!("Representation {id} has no media template")))?;
    let initialization = template
        .initialization
        .clone()
        .ok_or_else(|| Error::manifest(format!("Representation {id} has no initialization template")))?;

    let protection = if node.content_protection.is_empty() {
        inherited.protection
    } else {
        &node.content_protection
    };
    let channels = if node.audio_channel_configuration.is_empty() {
        inherited.channels
    } else {
        &node.audio_channel_configuration
    };

    Ok(Representation {
        bandwidth: int_attr("bandwidth", node.bandwidth.as_deref())?,
        width: int_attr("width", node.width.as_deref())?,
        height: int_attr("height", node.height.as_deref())?,
        frame_rate: node.frame_rate.as_deref().map(TypedValue::parse),
        audio_sampling_rate: node.audio_sampling_rate.as_deref().map(TypedValue::parse),
        codecs: node.codecs.clone(),
        timescale,
        start_number,
        media,
        initialization,
        segment_duration: entry_duration as f64 / timescale as f64,
        protected: !protection.is_empty(),
        default_kid: protection.iter().find_map(|p| p.default_kid.clone()),
        widevine_pssh: protection
            .iter()
            .find(|p| scheme_matches(p.scheme_id_uri.as_deref(), WIDEVINE_SCHEME))
            .and_then(|p| p.pssh.as_ref())
            .map(|p| p.value.trim().to_string()),
        audio_channels: channels
            .iter()
            .find(|c| scheme_matches(c.scheme_id_uri.as_deref(), AUDIO_CHANNEL_SCHEME))
            .and_then(|c| c.value.as_deref())
            .map(TypedValue::parse),
        id,
    })
}

fn scheme_matches(actual: Option<&str>, expected: &str) -> bool {
    actual.is_some_and(|s| s.eq_ignore_ascii_case(expected))
}

/// Read an attribute declared as an integer by the schema.
fn int_attr(name: &str, raw: Option<&str>) -> Result<Option<i64>> {
    match raw.map(TypedValue::parse) {
        None => Ok(None),
        Some(TypedValue::Integer(n)) => Ok(Some(n)),
        Some(other) => Err(Error::manifest(format!(
            "attribute {name} is not an integer: {other}"
        ))),
    }
}
