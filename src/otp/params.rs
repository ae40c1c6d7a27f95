//! OTP Parameters
//!
//! Per-call configuration for code generation and verification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{OtpError, OtpResult};

pub const DEFAULT_DIGITS: u32 = 6;
pub const DEFAULT_PERIOD: u64 = 30;
pub const DEFAULT_WINDOW: u64 = 1;
pub const DEFAULT_SECRET_BYTES: usize = 20;

/// Largest supported code length. The truncated HMAC value is 31 bits, so a
/// tenth digit could never cover its full range.
pub const MAX_DIGITS: u32 = 9;

/// Largest verification window; offsets are reported as `i64`.
pub const MAX_WINDOW: u64 = i64::MAX as u64;

/// HMAC hash algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(OtpError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// How a Base32 secret is decoded before use as an HMAC key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecretDecoding {
    /// Skip characters outside the alphabet
    #[default]
    Lenient,
    /// Reject characters outside the alphabet
    Strict,
}

/// Code generation and verification parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpParameters {
    /// Number of digits (default: 6)
    pub digits: u32,
    /// Time step in seconds (default: 30)
    pub period: u64,
    /// Steps accepted on each side of the current one (default: 1).
    ///
    /// Any value above zero lets an already displayed code keep verifying
    /// until it rolls out of the window. Replay protection is the caller's job.
    pub window: u64,
    /// Algorithm (default: SHA1)
    pub algorithm: Algorithm,
    /// Secret decoding mode (default: lenient)
    pub decoding: SecretDecoding,
}

impl Default for OtpParameters {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            window: DEFAULT_WINDOW,
            algorithm: Algorithm::Sha1,
            decoding: SecretDecoding::Lenient,
        }
    }
}

impl OtpParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    pub fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Reject malformed secrets instead of skipping stray characters
    pub fn strict(mut self) -> Self {
        self.decoding = SecretDecoding::Strict;
        self
    }

    pub fn validate(&self) -> OtpResult<()> {
        if self.digits == 0 || self.digits > MAX_DIGITS {
            return Err(OtpError::InvalidDigits(self.digits));
        }
        if self.period == 0 {
            return Err(OtpError::InvalidPeriod);
        }
        if self.window > MAX_WINDOW {
            return Err(OtpError::InvalidWindow(self.window));
        }
        Ok(())
    }

    /// `10^digits`; only meaningful after [`validate`](Self::validate)
    pub(crate) fn modulus(&self) -> u32 {
        10u32.pow(self.digits)
    }
}
