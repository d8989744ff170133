//! Device management service operations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::client::OnvifClient;
use crate::protocol_constants::DEVICE_NS;
use crate::soap::SoapResult;

// ─────────────────────────────────────────────────────────────────────────────
// Public types
// ─────────────────────────────────────────────────────────────────────────────

/// Result of `GetDeviceInformation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInformation {
    #[serde(rename(deserialize = "Manufacturer"), default)]
    pub manufacturer: String,
    #[serde(rename(deserialize = "Model"), default)]
    pub model: String,
    #[serde(rename(deserialize = "FirmwareVersion"), default)]
    pub firmware_version: String,
    #[serde(rename(deserialize = "SerialNumber"), default)]
    pub serial_number: String,
    #[serde(rename(deserialize = "HardwareId"), default)]
    pub hardware_id: String,
}

/// Result of `GetSystemDateAndTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDateAndTime {
    /// `NTP` or `Manual`.
    pub date_time_type: String,
    pub daylight_savings: bool,
    /// POSIX TZ string, if the device reports one.
    pub time_zone: Option<String>,
    /// `None` when the device omits the field or reports an impossible date.
    pub utc: Option<DateTime<Utc>>,
    pub local: Option<NaiveDateTime>,
}

/// Service addresses from `GetCapabilities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub device: Option<String>,
    pub media: Option<String>,
    pub ptz: Option<String>,
    pub imaging: Option<String>,
    pub events: Option<String>,
    pub analytics: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename = "tds:GetDeviceInformation")]
struct GetDeviceInformation {
    #[serde(rename = "@xmlns:tds")]
    xmlns: &'static str,
}

#[derive(Serialize)]
#[serde(rename = "tds:GetSystemDateAndTime")]
struct GetSystemDateAndTime {
    #[serde(rename = "@xmlns:tds")]
    xmlns: &'static str,
}

#[derive(Serialize)]
#[serde(rename = "tds:GetCapabilities")]
struct GetCapabilities {
    #[serde(rename = "@xmlns:tds")]
    xmlns: &'static str,
    #[serde(rename = "tds:Category")]
    category: &'static str,
}

#[derive(Deserialize)]
struct GetSystemDateAndTimeResponse {
    #[serde(rename = "SystemDateAndTime")]
    system_date_and_time: RawSystemDateAndTime,
}

#[derive(Deserialize)]
struct RawSystemDateAndTime {
    #[serde(rename = "DateTimeType", default)]
    date_time_type: String,
    #[serde(rename = "DaylightSavings", default)]
    daylight_savings: bool,
    #[serde(rename = "TimeZone")]
    time_zone: Option<RawTimeZone>,
    #[serde(rename = "UTCDateTime")]
    utc: Option<RawDateTime>,
    #[serde(rename = "LocalDateTime")]
    local: Option<RawDateTime>,
}

#[derive(Deserialize)]
struct RawTimeZone {
    #[serde(rename = "TZ")]
    tz: String,
}

#[derive(Deserialize)]
struct RawDateTime {
    #[serde(rename = "Time")]
    time: RawTime,
    #[serde(rename = "Date")]
    date: RawDate,
}

#[derive(Deserialize)]
struct RawTime {
    #[serde(rename = "Hour")]
    hour: u32,
    #[serde(rename = "Minute")]
    minute: u32,
    #[serde(rename = "Second")]
    second: u32,
}

#[derive(Deserialize)]
struct RawDate {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Day")]
    day: u32,
}

impl RawDateTime {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.date.year, self.date.month, self.date.day)?.and_hms_opt(
            self.time.hour,
            self.time.minute,
            self.time.second,
        )
    }
}

impl From<RawSystemDateAndTime> for SystemDateAndTime {
    fn from(raw: RawSystemDateAndTime) -> Self {
        Self {
            date_time_type: raw.date_time_type,
            daylight_savings: raw.daylight_savings,
            time_zone: raw.time_zone.map(|tz| tz.tz).filter(|tz| !tz.is_empty()),
            utc: raw.utc.as_ref().and_then(RawDateTime::to_naive).map(|dt| dt.and_utc()),
            local: raw.local.as_ref().and_then(RawDateTime::to_naive),
        }
    }
}

#[derive(Deserialize)]
struct GetCapabilitiesResponse {
    #[serde(rename = "Capabilities")]
    capabilities: RawCapabilities,
}

#[derive(Deserialize)]
struct ServiceAddress {
    #[serde(rename = "XAddr")]
    xaddr: String,
}

#[derive(Deserialize)]
struct RawCapabilities {
    #[serde(rename = "Analytics")]
    analytics: Option<ServiceAddress>,
    #[serde(rename = "Device")]
    device: Option<ServiceAddress>,
    #[serde(rename = "Events")]
    events: Option<ServiceAddress>,
    #[serde(rename = "Imaging")]
    imaging: Option<ServiceAddress>,
    #[serde(rename = "Media")]
    media: Option<ServiceAddress>,
    #[serde(rename = "PTZ")]
    ptz: Option<ServiceAddress>,
}

impl From<RawCapabilities> for Capabilities {
    fn from(raw: RawCapabilities) -> Self {
        let addr = |s: Option<ServiceAddress>| s.map(|s| s.xaddr.trim().to_string()).filter(|a| !a.is_empty());
        Self {
            device: addr(raw.device),
            media: addr(raw.media),
            ptz: addr(raw.ptz),
            imaging: addr(raw.imaging),
            events: addr(raw.events),
            analytics: addr(raw.analytics),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

impl OnvifClient {
    /// Manufacturer, model, firmware and serial number of the device.
    pub async fn get_device_information(&self, cancel: &CancellationToken) -> SoapResult<DeviceInformation> {
        self.call(cancel, self.endpoint(), &GetDeviceInformation { xmlns: DEVICE_NS })
            .await
    }

    /// Device clock. Most devices answer this one without authentication.
    pub async fn get_system_date_and_time(&self, cancel: &CancellationToken) -> SoapResult<SystemDateAndTime> {
        let resp: GetSystemDateAndTimeResponse = self
            .call(cancel, self.endpoint(), &GetSystemDateAndTime { xmlns: DEVICE_NS })
            .await?;
        Ok(resp.system_date_and_time.into())
    }

    /// All service capabilities. See also [`OnvifClient::initialize`].
    pub async fn get_capabilities(&self, cancel: &CancellationToken) -> SoapResult<Capabilities> {
        let request = GetCapabilities {
            xmlns: DEVICE_NS,
            category: "All",
        };
        let resp: GetCapabilitiesResponse = self.call(cancel, self.endpoint(), &request).await?;
        Ok(resp.capabilities.into())
    }
}
