//! Media service operations.
//!
//! Calls go to the media XAddr learned by [`OnvifClient::initialize`], or to
//! the device endpoint if the client was never initialised.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::OnvifClient;
use crate::protocol_constants::{MEDIA_NS, SCHEMA_NS};
use crate::soap::SoapResult;

// ─────────────────────────────────────────────────────────────────────────────
// Public types
// ─────────────────────────────────────────────────────────────────────────────

/// A media profile as returned by `GetProfiles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub token: String,
    pub name: String,
    pub fixed: bool,
    pub video_source_token: Option<String>,
    pub video_encoder: Option<VideoEncoder>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEncoder {
    pub token: String,
    /// `JPEG`, `MPEG4` or `H264`.
    pub encoding: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<f32>,
    pub frame_rate_limit: Option<u32>,
    pub bitrate_limit: Option<u32>,
}

/// Result of `GetStreamUri`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUri {
    #[serde(rename(deserialize = "Uri"))]
    pub uri: String,
    #[serde(rename(deserialize = "InvalidAfterConnect"), default)]
    pub invalid_after_connect: bool,
    #[serde(rename(deserialize = "InvalidAfterReboot"), default)]
    pub invalid_after_reboot: bool,
    /// ISO 8601 duration, e.g. `PT0S`.
    #[serde(rename(deserialize = "Timeout"), default)]
    pub timeout: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename = "trt:GetProfiles")]
struct GetProfiles {
    #[serde(rename = "@xmlns:trt")]
    xmlns: &'static str,
}

#[derive(Serialize)]
struct Transport {
    #[serde(rename = "tt:Protocol")]
    protocol: &'static str,
}

#[derive(Serialize)]
struct StreamSetup {
    #[serde(rename = "tt:Stream")]
    stream: &'static str,
    #[serde(rename = "tt:Transport")]
    transport: Transport,
}

#[derive(Serialize)]
#[serde(rename = "trt:GetStreamUri")]
struct GetStreamUri<'a> {
    #[serde(rename = "@xmlns:trt")]
    xmlns_trt: &'static str,
    #[serde(rename = "@xmlns:tt")]
    xmlns_tt: &'static str,
    #[serde(rename = "trt:StreamSetup")]
    stream_setup: StreamSetup,
    #[serde(rename = "trt:ProfileToken")]
    profile_token: &'a str,
}

#[derive(Deserialize)]
struct GetProfilesResponse {
    #[serde(rename = "Profiles", default)]
    profiles: Vec<RawProfile>,
}

#[derive(Deserialize)]
struct RawProfile {
    #[serde(rename = "@token")]
    token: String,
    #[serde(rename = "@fixed", default)]
    fixed: bool,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "VideoSourceConfiguration")]
    video_source: Option<RawVideoSource>,
    #[serde(rename = "VideoEncoderConfiguration")]
    video_encoder: Option<RawVideoEncoder>,
}

#[derive(Deserialize)]
struct RawVideoSource {
    #[serde(rename = "SourceToken")]
    source_token: Option<String>,
}

#[derive(Deserialize)]
struct RawVideoEncoder {
    #[serde(rename = "@token", default)]
    token: String,
    #[serde(rename = "Encoding", default)]
    encoding: String,
    #[serde(rename = "Resolution")]
    resolution: Option<RawResolution>,
    #[serde(rename = "Quality")]
    quality: Option<f32>,
    #[serde(rename = "RateControl")]
    rate_control: Option<RawRateControl>,
}

#[derive(Deserialize)]
struct RawResolution {
    #[serde(rename = "Width")]
    width: u32,
    #[serde(rename = "Height")]
    height: u32,
}

#[derive(Deserialize)]
struct RawRateControl {
    #[serde(rename = "FrameRateLimit")]
    frame_rate_limit: Option<u32>,
    #[serde(rename = "BitrateLimit")]
    bitrate_limit: Option<u32>,
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self {
            token: raw.token,
            name: raw.name,
            fixed: raw.fixed,
            video_source_token: raw.video_source.and_then(|s| s.source_token),
            video_encoder: raw.video_encoder.map(|enc| {
                let rate = enc.rate_control;
                VideoEncoder {
                    token: enc.token,
                    encoding: enc.encoding,
                    width: enc.resolution.as_ref().map(|r| r.width),
                    height: enc.resolution.as_ref().map(|r| r.height),
                    quality: enc.quality,
                    frame_rate_limit: rate.as_ref().and_then(|r| r.frame_rate_limit),
                    bitrate_limit: rate.as_ref().and_then(|r| r.bitrate_limit),
                }
            }),
        }
    }
}

#[derive(Deserialize)]
struct GetStreamUriResponse {
    #[serde(rename = "MediaUri")]
    media_uri: MediaUri,
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

impl OnvifClient {
    /// Lists the media profiles configured on the device.
    pub async fn get_profiles(&self, cancel: &CancellationToken) -> SoapResult<Vec<Profile>> {
        let resp: GetProfilesResponse = self
            .call(cancel, &self.media_endpoint(), &GetProfiles { xmlns: MEDIA_NS })
            .await?;
        Ok(resp.profiles.into_iter().map(Profile::from).collect())
    }

    /// RTSP unicast URI for `profile_token`.
    pub async fn get_stream_uri(
        &self,
        cancel: &CancellationToken,
        profile_token: &str,
    ) -> SoapResult<MediaUri> {
        let request = GetStreamUri {
            xmlns_trt: MEDIA_NS,
            xmlns_tt: SCHEMA_NS,
            stream_setup: StreamSetup {
                stream: "RTP-Unicast",
                transport: Transport { protocol: "RTSP" },
            },
            profile_token,
        };
        let resp: GetStreamUriResponse = self.call(cancel, &self.media_endpoint(), &request).await?;
        Ok(resp.media_uri)
    }
}
