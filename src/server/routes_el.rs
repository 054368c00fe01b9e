//! `/el`: DASH-origin playlists and combined segments.
//!
//! `?url=<mpd>` synthesizes an HLS playlist; `?burl=<dir>&inits=&bodies=`
//! decrypts and combines one segment number across every track. Every host
//! and key check runs before the first upstream fetch.

use crate::pipeline::SegmentRequest;
use crate::server::{responses, AppContext, GatewayError};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use clearcast_common::paths::{extension_of, is_container_segment};
use clearcast_common::{require_same_host, Error, KeyList, Result};
use clearcast_manifest::parse_manifest;
use clearcast_media::{base_directory, synthesize_playlist};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Default, Deserialize)]
pub struct ElQuery {
    pub url: Option<String>,
    pub burl: Option<String>,
    pub inits: Option<String>,
    pub bodies: Option<String>,
    pub keys: Option<String>,
    pub key: Option<String>,
    #[serde(rename = "startNumber")]
    pub start_number: Option<String>,
    #[serde(rename = "endNumber")]
    pub end_number: Option<String>,
    pub vod: Option<String>,
}

impl ElQuery {
    /// `keys`, falling back to `key`.
    fn keys(&self) -> Result<KeyList> {
        let raw = self
            .keys
            .as_deref()
            .or(self.key.as_deref())
            .ok_or_else(|| Error::validation("missing keys"))?;
        KeyList::parse(raw)
    }

    fn is_vod(&self) -> bool {
        self.vod
            .as_deref()
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
    }
}

pub async fn el(
    State(ctx): State<AppContext>,
    query: std::result::Result<Query<ElQuery>, QueryRejection>,
) -> std::result::Result<Response, GatewayError> {
    let Query(query) = query?;
    let keys = query.keys()?;

    if let Some(ref url) = query.url {
        return Ok(manifest_playlist(&ctx, url, &query, &keys).await?);
    }
    if let Some(ref burl) = query.burl {
        return Ok(combined_segment(&ctx, burl, &query, &keys).await?);
    }
    Err(Error::validation("expected url or burl").into())
}

async fn manifest_playlist(
    ctx: &AppContext,
    raw_url: &str,
    query: &ElQuery,
    keys: &KeyList,
) -> Result<Response> {
    let manifest_url = parse_http_url(raw_url)?;
    ctx.allowed_hosts.check(&manifest_url)?;
    if extension_of(manifest_url.path()) != ".mpd" {
        return Err(Error::validation(format!(
            "not a DASH manifest: {}",
            manifest_url.path()
        )));
    }
    let start = parse_number(query.start_number.as_deref(), "startNumber")?;
    let end = parse_number(query.end_number.as_deref(), "endNumber")?;

    let text = ctx.fetcher.fetch(manifest_url.as_str()).await?.into_text()?;
    let manifest = parse_manifest(&text)?;
    let base_dir = base_directory(&manifest_url, &manifest)?;
    ctx.allowed_hosts.check(&base_dir)?;

    tracing::debug!(
        "Synthesizing playlist for {} ({} adaptation sets)",
        manifest_url,
        manifest.adaptation_sets.len()
    );
    let playlist = synthesize_playlist(
        &manifest,
        base_dir.as_str(),
        keys,
        start,
        end,
        query.is_vod(),
    )?;
    Ok(responses::playlist(playlist))
}

async fn combined_segment(
    ctx: &AppContext,
    raw_base: &str,
    query: &ElQuery,
    keys: &KeyList,
) -> Result<Response> {
    let base = parse_http_url(raw_base)?;
    ctx.allowed_hosts.check(&base)?;

    let inits = parse_url_list(query.inits.as_deref(), "inits")?;
    let bodies = parse_url_list(query.bodies.as_deref(), "bodies")?;
    if inits.len() != bodies.len() {
        return Err(Error::validation(format!(
            "{} inits for {} bodies",
            inits.len(),
            bodies.len()
        )));
    }
    if keys.len() < bodies.len() {
        tracing::debug!(
            "{} keys for {} tracks, reusing the first key",
            keys.len(),
            bodies.len()
        );
    }

    let requests = inits
        .iter()
        .zip(&bodies)
        .enumerate()
        .map(|(i, (init, body))| {
            Ok(SegmentRequest {
                init_url: Some(resolve_asset(&base, init)?.to_string()),
                body_url: resolve_asset(&base, body)?.to_string(),
                key: keys.for_track(i).clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let data = ctx.pipeline.get_combined_segment(&requests).await?;
    Ok(responses::segment(data))
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::validation(format!("invalid URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::validation(format!("unsupported scheme: {other}"))),
    }
}

/// Resolve `relative` against `base`, keeping it on the same host and
/// restricted to MP4 container segments.
fn resolve_asset(base: &Url, relative: &str) -> Result<Url> {
    let url = base
        .join(relative)
        .map_err(|e| Error::validation(format!("invalid asset URL '{relative}': {e}")))?;
    require_same_host(base, &url)?;
    if !is_container_segment(url.path()) {
        return Err(Error::validation(format!(
            "extension {} is not a segment",
            extension_of(url.path())
        )));
    }
    Ok(url)
}

fn parse_url_list(raw: Option<&str>, name: &str) -> Result<Vec<String>> {
    let raw = raw.ok_or_else(|| Error::validation(format!("missing {name}")))?;
    let list: Vec<String> = serde_json::from_str(raw)
        .map_err(|e| Error::validation(format!("{name} is not a JSON string array: {e}")))?;
    if list.is_empty() {
        return Err(Error::validation(format!("{name} is empty")));
    }
    Ok(list)
}

fn parse_number(raw: Option<&str>, name: &str) -> Result<Option<i64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| Error::validation(format!("{name} is not an integer: {s:?}"))),
    }
}
