//! Raw MPD document shape as read by quick-xml.
//!
//! Every attribute is kept as an optional string here; typing and required
//! field checks happen when the tree is converted into [`crate::model`].

use serde::Deserialize;

pub(crate) fn from_str(xml: &str) -> Result<MpdNode, quick_xml::de::DeError> {
    quick_xml::de::from_str(xml)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MpdNode {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@type")]
    pub kind: Option<String>,
    #[serde(rename = "@mediaPresentationDuration")]
    pub media_presentation_duration: Option<String>,
    #[serde(rename = "@minBufferTime")]
    pub min_buffer_time: Option<String>,
    #[serde(rename = "@profiles")]
    pub profiles: Option<String>,
    #[serde(rename = "BaseURL", default)]
    pub base_urls: Vec<TextNode>,
    #[serde(rename = "Period", default)]
    pub periods: Vec<PeriodNode>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct TextNode {
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PeriodNode {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@start")]
    pub start: Option<String>,
    #[serde(rename = "@duration")]
    pub duration: Option<String>,
    #[serde(rename = "AdaptationSet", default)]
    pub adaptation_sets: Vec<AdaptationSetNode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AdaptationSetNode {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@mimeType")]
    pub mime_type: Option<String>,
    #[serde(rename = "@lang")]
    pub lang: Option<String>,
    #[serde(rename = "SegmentTemplate")]
    pub segment_template: Option<SegmentTemplateNode>,
    #[serde(rename = "ContentProtection", default)]
    pub content_protection: Vec<ContentProtectionNode>,
    #[serde(rename = "AudioChannelConfiguration", default)]
    pub audio_channel_configuration: Vec<DescriptorNode>,
    #[serde(rename = "Representation", default)]
    pub representations: Vec<RepresentationNode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RepresentationNode {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@mimeType")]
    pub mime_type: Option<String>,
    #[serde(rename = "@bandwidth")]
    pub bandwidth: Option<String>,
    #[serde(rename = "@width")]
    pub width: Option<String>,
    #[serde(rename = "@height")]
    pub height: Option<String>,
    #[serde(rename = "@frameRate")]
    pub frame_rate: Option<String>,
    #[serde(rename = "@audioSamplingRate")]
    pub audio_sampling_rate: Option<String>,
    #[serde(rename = "@codecs")]
    pub codecs: Option<String>,
    #[serde(rename = "SegmentTemplate")]
    pub segment_template: Option<SegmentTemplateNode>,
    #[serde(rename = "ContentProtection", default)]
    pub content_protection: Vec<ContentProtectionNode>,
    #[serde(rename = "AudioChannelConfiguration", default)]
    pub audio_channel_configuration: Vec<DescriptorNode>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct SegmentTemplateNode {
    #[serde(rename = "@media")]
    pub media: Option<String>,
    #[serde(rename = "@initialization")]
    pub initialization: Option<String>,
    #[serde(rename = "@timescale")]
    pub timescale: Option<String>,
    #[serde(rename = "@startNumber")]
    pub start_number: Option<String>,
    #[serde(rename = "SegmentTimeline")]
    pub segment_timeline: Option<SegmentTimelineNode>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct SegmentTimelineNode {
    #[serde(rename = "S", default)]
    pub entries: Vec<TimelineEntryNode>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct TimelineEntryNode {
    #[serde(rename = "@t")]
    pub t: Option<String>,
    #[serde(rename = "@d")]
    pub d: Option<String>,
    #[serde(rename = "@r")]
    pub r: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct ContentProtectionNode {
    #[serde(rename = "@schemeIdUri")]
    pub scheme_id_uri: Option<String>,
    #[serde(rename = "@value")]
    pub value: Option<String>,
    #[serde(rename = "@default_KID", alias = "@cenc:default_KID")]
    pub default_kid: Option<String>,
    #[serde(rename = "pssh", alias = "cenc:pssh")]
    pub pssh: Option<TextNode>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct DescriptorNode {
    #[serde(rename = "@schemeIdUri")]
    pub scheme_id_uri: Option<String>,
    #[serde(rename = "@value")]
    pub value: Option<String>,
}
