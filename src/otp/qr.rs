//! QR Code Hand-off
//!
//! Rendering the provisioning URI as an image is left to an external encoder.
//! This module defines that seam and the options passed through it.

use std::error::Error;

use serde::{Deserialize, Serialize};

use super::params::OtpParameters;
use super::uri::build_uri;
use super::{OtpError, OtpResult};

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

/// Size and style options for the rendered code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    pub error_correction: ErrorCorrection,
    /// Quiet zone in modules
    pub margin: u32,
    /// Image width in pixels
    pub width: u32,
    /// Module colour, `#RRGGBB`
    pub dark: String,
    /// Background colour, `#RRGGBB`
    pub light: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::M,
            margin: 4,
            width: 200,
            dark: "#000000".to_string(),
            light: "#FFFFFF".to_string(),
        }
    }
}

/// Turns a string into image bytes
pub trait QrEncoder {
    fn encode(&self, data: &str, options: &QrOptions) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>;
}

/// Build the provisioning URI and render it with `encoder`
pub fn render_provisioning_qr<E: QrEncoder + ?Sized>(
    encoder: &E,
    issuer: &str,
    account: &str,
    secret: &str,
    params: &OtpParameters,
    options: &QrOptions,
) -> OtpResult<Vec<u8>> {
    params.validate()?;
    let uri = build_uri(issuer, account, secret, params);
    encoder
        .encode(&uri, options)
        .map_err(|e| OtpError::QrEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingEncoder {
        seen: RefCell<Option<(String, QrOptions)>>,
    }

    impl QrEncoder for RecordingEncoder {
        fn encode(&self, data: &str, options: &QrOptions) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
            *self.seen.borrow_mut() = Some((data.to_string(), options.clone()));
            Ok(data.as_bytes().to_vec())
        }
    }

    struct FailingEncoder;

    impl QrEncoder for FailingEncoder {
        fn encode(&self, _: &str, _: &QrOptions) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
            Err("data too long for version 40".into())
        }
    }

    #[test]
    fn test_default_options() {
        let options = QrOptions::default();
        assert_eq!(options.error_correction, ErrorCorrection::M);
        assert_eq!(options.margin, 4);
        assert_eq!(options.width, 200);
        assert_eq!(options.dark, "#000000");
        assert_eq!(options.light, "#FFFFFF");
    }

    #[test]
    fn test_encoder_receives_uri_and_options() {
        let encoder = RecordingEncoder::default();
        let options = QrOptions {
            width: 300,
            margin: 2,
            dark: "#0033A0".to_string(),
            light: "#F8F9FA".to_string(),
            ..QrOptions::default()
        };
        let params = OtpParameters::new().with_digits(8).with_period(60);

        let image =
            render_provisioning_qr(&encoder, "MyService", "user123", "ABCDEFGH", &params, &options).unwrap();

        let (data, seen_options) = encoder.seen.borrow().clone().unwrap();
        assert_eq!(data, build_uri("MyService", "user123", "ABCDEFGH", &params));
        assert_eq!(seen_options, options);
        assert_eq!(image, data.into_bytes());
    }

    #[test]
    fn test_encoder_failure_wrapped() {
        let result = render_provisioning_qr(
            &FailingEncoder,
            "MyService",
            "user123",
            "ABCDEFGH",
            &OtpParameters::default(),
            &QrOptions::default(),
        );
        assert!(matches!(result, Err(OtpError::QrEncoding(msg)) if msg.contains("version 40")));
    }

    #[test]
    fn test_invalid_parameters_never_reach_encoder() {
        let encoder = RecordingEncoder::default();
        let params = OtpParameters::default().with_digits(0);
        let result =
            render_provisioning_qr(&encoder, "I", "a", "ABC", &params, &QrOptions::default());
        assert!(matches!(result, Err(OtpError::InvalidDigits(0))));
        assert!(encoder.seen.borrow().is_none());
    }
}
