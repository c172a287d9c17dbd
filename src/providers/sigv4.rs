//! AWS Signature Version 4 for single-shot JSON POSTs.
//!
//! Covers exactly what `InvokeModel` needs: no query string, a fixed set of
//! signed headers, and the payload hash computed over the full body.

use super::credentials::AwsCredentials;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::fmt::Write;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

type HmacSha256 = Hmac<Sha256>;

/// Header values to attach to the outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub authorization: String,
    pub amz_date: String,
    pub security_token: Option<String>,
}

pub struct SigningParams<'a> {
    pub credentials: &'a AwsCredentials,
    pub region: &'a str,
    pub service: &'a str,
    pub timestamp: DateTime<Utc>,
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn uri_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Non-S3 services sign the request path with every segment encoded a
/// second time.
pub fn canonical_uri(request_path: &str) -> String {
    if request_path.is_empty() {
        return "/".to_string();
    }
    request_path
        .split('/')
        .map(uri_encode)
        .collect::<Vec<_>>()
        .join("/")
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

fn headers_to_sign<'a>(
    host: &'a str,
    content_type: &'a str,
    amz_date: &'a str,
    security_token: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
    // Already in lexical order.
    let mut headers = vec![
        ("content-type", content_type),
        ("host", host),
        ("x-amz-date", amz_date),
    ];
    if let Some(token) = security_token {
        headers.push(("x-amz-security-token", token));
    }
    headers
}

pub fn canonical_request(
    method: &str,
    canonical_uri: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> String {
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{}\n", value.trim()))
        .collect();
    let signed_headers = signed_header_names(headers);
    format!(
        "{method}\n{canonical_uri}\n\n{canonical_headers}\n{signed_headers}\n{}",
        sha256_hex(body)
    )
}

fn signed_header_names(headers: &[(&str, &str)]) -> String {
    headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";")
}

fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date);
    let k_region = hmac_sha256(&k_date, region);
    let k_service = hmac_sha256(&k_region, service);
    hmac_sha256(&k_service, "aws4_request")
}

/// Sign a POST of `body` to `request_path` on `host`.
pub fn sign_post(
    host: &str,
    request_path: &str,
    content_type: &str,
    body: &[u8],
    params: &SigningParams<'_>,
) -> SignedHeaders {
    let amz_date = params.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date = params.timestamp.format("%Y%m%d").to_string();
    let security_token = params.credentials.session_token.as_deref();

    let headers = headers_to_sign(host, content_type, &amz_date, security_token);
    let canonical = canonical_request("POST", &canonical_uri(request_path), &headers, body);

    let scope = format!(
        "{date}/{}/{}/aws4_request",
        params.region, params.service
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical.as_bytes())
    );

    let key = signing_key(
        &params.credentials.secret_access_key,
        &date,
        params.region,
        params.service,
    );
    let signature = hex::encode(hmac_sha256(&key, &string_to_sign));

    let authorization = format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
        params.credentials.access_key_id,
        signed_header_names(&headers),
    );

    SignedHeaders {
        authorization,
        amz_date,
        security_token: security_token.map(ToString::to_string),
    }
}
