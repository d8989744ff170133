//! In-process ONVIF device used by the SOAP and client tests.
//!
//! The simulator answers by inspecting the request body for an operation
//! name, so every test runs against a real HTTP listener on `127.0.0.1:0`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use parking_lot::Mutex;

/// A request as the simulator saw it.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Default)]
struct SimState {
    requests: Mutex<Vec<RecordedRequest>>,
    require_auth: bool,
}

/// Shared handle to a running simulated device.
#[derive(Debug, Clone, Default)]
pub(crate) struct DeviceSimulator {
    state: Arc<SimState>,
}

impl DeviceSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects unsigned requests with a `ter:NotAuthorized` fault.
    pub fn requiring_auth() -> Self {
        Self {
            state: Arc::new(SimState {
                require_auth: true,
                ..SimState::default()
            }),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }
}

/// Starts `device` on an ephemeral port and returns its base URL.
pub(crate) async fn spawn_device(device: DeviceSimulator) -> String {
    let router = Router::new()
        .route("/onvif/device_service", post(dispatch))
        .route("/onvif/media_service", post(dispatch))
        .route("/delayed", post(delayed))
        .route("/slow", post(slow))
        .route("/fault200", post(fault_ok))
        .route("/fault500", post(fault_error))
        .route("/html", post(html))
        .fallback(not_found)
        .with_state(device);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// HTTP client that never routes loopback traffic through a proxy.
pub(crate) fn test_http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Canned responses
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn soap_response(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://www.w3.org/2003/05/soap-envelope" "#,
            r#"xmlns:tds="http://www.onvif.org/ver10/device/wsdl" "#,
            r#"xmlns:trt="http://www.onvif.org/ver10/media/wsdl" "#,
            r#"xmlns:tt="http://www.onvif.org/ver10/schema" "#,
            r#"xmlns:ter="http://www.onvif.org/ver10/error">"#,
            "<SOAP-ENV:Header/><SOAP-ENV:Body>{}</SOAP-ENV:Body></SOAP-ENV:Envelope>"
        ),
        body
    )
}

pub(crate) const NOT_AUTHORIZED_FAULT: &str = concat!(
    "<SOAP-ENV:Fault><SOAP-ENV:Code><SOAP-ENV:Value>SOAP-ENV:Sender</SOAP-ENV:Value>",
    "<SOAP-ENV:Subcode><SOAP-ENV:Value>ter:NotAuthorized</SOAP-ENV:Value></SOAP-ENV:Subcode>",
    "</SOAP-ENV:Code><SOAP-ENV:Reason><SOAP-ENV:Text xml:lang=\"en\">Sender not Authorized</SOAP-ENV:Text>",
    "</SOAP-ENV:Reason></SOAP-ENV:Fault>"
);

pub(crate) const ACTION_NOT_SUPPORTED_FAULT: &str = concat!(
    "<SOAP-ENV:Fault><SOAP-ENV:Code><SOAP-ENV:Value>SOAP-ENV:Receiver</SOAP-ENV:Value>",
    "<SOAP-ENV:Subcode><SOAP-ENV:Value>ter:ActionNotSupported</SOAP-ENV:Value></SOAP-ENV:Subcode>",
    "</SOAP-ENV:Code><SOAP-ENV:Reason><SOAP-ENV:Text xml:lang=\"en\">Optional Action Not Implemented</SOAP-ENV:Text>",
    "</SOAP-ENV:Reason></SOAP-ENV:Fault>"
);

const DEVICE_INFORMATION: &str = concat!(
    "<tds:GetDeviceInformationResponse>",
    "<tds:Manufacturer>Acme</tds:Manufacturer>",
    "<tds:Model>IPC-100</tds:Model>",
    "<tds:FirmwareVersion>1.2.3</tds:FirmwareVersion>",
    "<tds:SerialNumber>SN001</tds:SerialNumber>",
    "<tds:HardwareId>HW-7</tds:HardwareId>",
    "</tds:GetDeviceInformationResponse>"
);

const SYSTEM_DATE_AND_TIME: &str = concat!(
    "<tds:GetSystemDateAndTimeResponse><tds:SystemDateAndTime>",
    "<tt:DateTimeType>NTP</tt:DateTimeType>",
    "<tt:DaylightSavings>false</tt:DaylightSavings>",
    "<tt:TimeZone><tt:TZ>CST-8</tt:TZ></tt:TimeZone>",
    "<tt:UTCDateTime><tt:Time><tt:Hour>10</tt:Hour><tt:Minute>30</tt:Minute><tt:Second>5</tt:Second></tt:Time>",
    "<tt:Date><tt:Year>2024</tt:Year><tt:Month>3</tt:Month><tt:Day>15</tt:Day></tt:Date></tt:UTCDateTime>",
    "</tds:SystemDateAndTime></tds:GetSystemDateAndTimeResponse>"
);

const PROFILES: &str = concat!(
    "<trt:GetProfilesResponse>",
    "<trt:Profiles token=\"Profile_1\" fixed=\"true\">",
    "<tt:Name>mainStream</tt:Name>",
    "<tt:VideoSourceConfiguration token=\"VideoSourceConfig_1\">",
    "<tt:Name>VideoSource_1</tt:Name><tt:UseCount>2</tt:UseCount>",
    "<tt:SourceToken>VideoSource_1</tt:SourceToken>",
    "<tt:Bounds x=\"0\" y=\"0\" width=\"1920\" height=\"1080\"/>",
    "</tt:VideoSourceConfiguration>",
    "<tt:VideoEncoderConfiguration token=\"VideoEncoder_1\">",
    "<tt:Name>VideoEncoder_1</tt:Name><tt:UseCount>1</tt:UseCount>",
    "<tt:Encoding>H264</tt:Encoding>",
    "<tt:Resolution><tt:Width>1920</tt:Width><tt:Height>1080</tt:Height></tt:Resolution>",
    "<tt:Quality>5</tt:Quality>",
    "<tt:RateControl><tt:FrameRateLimit>25</tt:FrameRateLimit><tt:EncodingInterval>1</tt:EncodingInterval>",
    "<tt:BitrateLimit>4096</tt:BitrateLimit></tt:RateControl>",
    "</tt:VideoEncoderConfiguration>",
    "</trt:Profiles>",
    "<trt:Profiles token=\"Profile_2\" fixed=\"true\">",
    "<tt:Name>subStream</tt:Name>",
    "</trt:Profiles>",
    "</trt:GetProfilesResponse>"
);

const STREAM_URI: &str = concat!(
    "<trt:GetStreamUriResponse><trt:MediaUri>",
    "<tt:Uri>rtsp://192.0.2.10:554/Streaming/Channels/101?transportmode=unicast&amp;profile=Profile_1</tt:Uri>",
    "<tt:InvalidAfterConnect>false</tt:InvalidAfterConnect>",
    "<tt:InvalidAfterReboot>false</tt:InvalidAfterReboot>",
    "<tt:Timeout>PT0S</tt:Timeout>",
    "</trt:MediaUri></trt:GetStreamUriResponse>"
);

fn capabilities(host: &str) -> String {
    format!(
        concat!(
            "<tds:GetCapabilitiesResponse><tds:Capabilities>",
            "<tt:Device><tt:XAddr>http://{host}/onvif/device_service</tt:XAddr></tt:Device>",
            "<tt:Events><tt:XAddr>http://{host}/onvif/event_service</tt:XAddr>",
            "<tt:WSSubscriptionPolicySupport>true</tt:WSSubscriptionPolicySupport></tt:Events>",
            "<tt:Imaging><tt:XAddr>http://{host}/onvif/imaging_service</tt:XAddr></tt:Imaging>",
            "<tt:Media><tt:XAddr>http://{host}/onvif/media_service</tt:XAddr>",
            "<tt:StreamingCapabilities><tt:RTPMulticast>true</tt:RTPMulticast></tt:StreamingCapabilities></tt:Media>",
            "</tds:Capabilities></tds:GetCapabilitiesResponse>"
        ),
        host = host
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

fn soap(status: StatusCode, body: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/soap+xml; charset=utf-8")],
        soap_response(body),
    )
        .into_response()
}

fn record(device: &DeviceSimulator, uri: &Uri, headers: &HeaderMap, body: &str) {
    device.state.requests.lock().push(RecordedRequest {
        path: uri.path().to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_string(),
    });
}

fn answer(device: &DeviceSimulator, headers: &HeaderMap, body: &str) -> Response {
    if device.state.require_auth && !body.contains("<wsse:UsernameToken>") {
        return soap(StatusCode::BAD_REQUEST, NOT_AUTHORIZED_FAULT);
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("127.0.0.1");

    if body.contains("GetDeviceInformation") {
        soap(StatusCode::OK, DEVICE_INFORMATION)
    } else if body.contains("GetSystemDateAndTime") {
        soap(StatusCode::OK, SYSTEM_DATE_AND_TIME)
    } else if body.contains("GetCapabilities") {
        soap(StatusCode::OK, &capabilities(host))
    } else if body.contains("GetProfiles") {
        soap(StatusCode::OK, PROFILES)
    } else if body.contains("GetStreamUri") {
        soap(StatusCode::OK, STREAM_URI)
    } else if body.contains("SetSystemDateAndTime") {
        soap(StatusCode::OK, "<tds:SetSystemDateAndTimeResponse/>")
    } else if body.contains("SystemReboot") {
        soap(
            StatusCode::OK,
            "<tds:SystemRebootResponse><tds:Message>Rebooting in 30 seconds</tds:Message></tds:SystemRebootResponse>",
        )
    } else {
        soap(StatusCode::INTERNAL_SERVER_ERROR, ACTION_NOT_SUPPORTED_FAULT)
    }
}

async fn dispatch(
    State(device): State<DeviceSimulator>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    record(&device, &uri, &headers, &body);
    answer(&device, &headers, &body)
}

async fn delayed(
    State(device): State<DeviceSimulator>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    record(&device, &uri, &headers, &body);
    tokio::time::sleep(Duration::from_millis(300)).await;
    answer(&device, &headers, &body)
}

async fn slow(
    State(device): State<DeviceSimulator>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    record(&device, &uri, &headers, &body);
    tokio::time::sleep(Duration::from_secs(30)).await;
    answer(&device, &headers, &body)
}

async fn fault_ok() -> Response {
    soap(StatusCode::OK, ACTION_NOT_SUPPORTED_FAULT)
}

async fn fault_error() -> Response {
    soap(StatusCode::INTERNAL_SERVER_ERROR, NOT_AUTHORIZED_FAULT)
}

async fn html() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>Camera login</body></html>",
    )
        .into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
