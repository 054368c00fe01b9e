//! Native HLS passthrough for every path other than `/el`.

use crate::server::{responses, AppContext, GatewayError};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::Uri,
    response::Response,
};
use clearcast_common::paths::{extension_of, strip_extension};
use clearcast_common::{DecryptionKey, Error};
use clearcast_media::rewrite_hls_playlist;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PassthroughQuery {
    pub key: Option<String>,
}

/// `.m3u8` paths are fetched from the upstream origin and rewritten; `.ts`
/// paths name an upstream segment (the same path without `.ts`) that is
/// decrypted on the fly.
pub async fn passthrough(
    State(ctx): State<AppContext>,
    uri: Uri,
    query: Result<Query<PassthroughQuery>, QueryRejection>,
) -> Result<Response, GatewayError> {
    let Query(query) = query?;
    let key: DecryptionKey = query
        .key
        .as_deref()
        .ok_or_else(|| Error::validation("missing key"))?
        .parse()?;

    let path = uri.path();
    match extension_of(path).as_str() {
        ".m3u8" => {
            let url = format!("{}{}", ctx.upstream_base(), path);
            let text = ctx.fetcher.fetch(&url).await?.into_text()?;
            Ok(responses::playlist(rewrite_hls_playlist(&text, &key)))
        }
        ".ts" => {
            let body_url = format!("{}{}", ctx.upstream_base(), strip_extension(path));
            let data = ctx.pipeline.get_segment(&body_url, &key, None).await?;
            Ok(responses::segment(data))
        }
        other => Err(Error::validation(format!("unsupported extension '{other}'")).into()),
    }
}
