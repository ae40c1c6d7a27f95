//! otp-engine - One-Time Password Engine
//!
//! Issues and verifies HOTP/TOTP codes from Base32 shared secrets and builds
//! `otpauth://` provisioning URIs for authenticator apps.
//!
//! Every operation takes its configuration as an explicit [`OtpParameters`]
//! value; nothing is held in process-wide state.

pub mod otp;

pub use otp::{
    build_uri, decode, decode_strict, encode, generate_default_secret, generate_hotp,
    generate_secret, generate_totp, render_provisioning_qr, verify_hotp, verify_totp, Algorithm,
    Clock, FixedClock, OtpError, OtpParameters, OtpResult, ProvisioningUri, QrEncoder, QrOptions,
    SecretDecoding, SecretKey, SystemClock, TotpEngine,
};
