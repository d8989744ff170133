//! WS-Security UsernameToken signing.
//!
//! `PasswordDigest = Base64(SHA-1(nonce ++ created ++ password))`, with the
//! raw nonce bytes, the `Created` string exactly as sent, and the password
//! concatenated in that order.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use rand::RngCore;
use sha1::{Digest, Sha1};

use super::envelope::Envelope;
use crate::credentials::Credentials;
use crate::protocol_constants::{
    WSSE_BASE64_ENCODING, WSSE_CREATED_FORMAT, WSSE_NONCE_LEN, WSSE_NS,
    WSSE_PASSWORD_DIGEST_TYPE, WSU_NS,
};
use crate::xml::escape_xml;

/// Computes the UsernameToken password digest.
#[must_use]
pub fn password_digest(nonce: &[u8], created: &str, password: &str) -> String {
    let mut sha = Sha1::new();
    sha.update(nonce);
    sha.update(created.as_bytes());
    sha.update(password.as_bytes());
    BASE64.encode(sha.finalize())
}

/// A single-use UsernameToken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernameToken {
    pub username: String,
    pub password_digest: String,
    /// Base64 of the raw nonce bytes.
    pub nonce: String,
    pub created: String,
}

impl UsernameToken {
    /// Builds a token with a fresh random nonce and the current UTC time.
    #[must_use]
    pub fn generate(credentials: &Credentials) -> Self {
        let mut nonce = [0u8; WSSE_NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        Self::from_parts(credentials, &nonce, Utc::now())
    }

    /// Builds a token from an explicit nonce and timestamp.
    #[must_use]
    pub fn from_parts(credentials: &Credentials, nonce: &[u8], created: DateTime<Utc>) -> Self {
        let created = created.format(WSSE_CREATED_FORMAT).to_string();
        Self {
            username: credentials.username.clone(),
            password_digest: password_digest(nonce, &created, &credentials.password),
            nonce: BASE64.encode(nonce),
            created,
        }
    }

    /// Renders the `wsse:Security` header block.
    ///
    /// The `s` prefix is bound by the enclosing envelope.
    #[must_use]
    pub fn to_header_xml(&self) -> String {
        format!(
            concat!(
                r#"<wsse:Security s:mustUnderstand="1" xmlns:wsse="{wsse}" xmlns:wsu="{wsu}">"#,
                "<wsse:UsernameToken>",
                "<wsse:Username>{user}</wsse:Username>",
                r#"<wsse:Password Type="{pwd_type}">{digest}</wsse:Password>"#,
                r#"<wsse:Nonce EncodingType="{nonce_enc}">{nonce}</wsse:Nonce>"#,
                "<wsu:Created>{created}</wsu:Created>",
                "</wsse:UsernameToken>",
                "</wsse:Security>"
            ),
            wsse = WSSE_NS,
            wsu = WSU_NS,
            user = escape_xml(&self.username),
            pwd_type = WSSE_PASSWORD_DIGEST_TYPE,
            digest = self.password_digest,
            nonce_enc = WSSE_BASE64_ENCODING,
            nonce = self.nonce,
            created = self.created,
        )
    }
}

/// Attaches a freshly generated UsernameToken to `envelope`.
///
/// Anonymous credentials leave the envelope untouched: some devices and
/// operations (e.g. `GetSystemDateAndTime`) accept unauthenticated requests.
#[must_use]
pub fn sign(mut envelope: Envelope, credentials: &Credentials) -> Envelope {
    if credentials.is_anonymous() {
        return envelope;
    }
    envelope.push_header(UsernameToken::generate(credentials).to_header_xml());
    envelope
}
