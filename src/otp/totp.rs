//! Time-based One-Time Password (TOTP)
//!
//! Implements RFC 6238 on top of HOTP, with window-tolerant verification.

use tracing::debug;

use super::hotp::{codes_match, hotp_with_key};
use super::params::OtpParameters;
use super::secret::SecretKey;
use super::{OtpError, OtpResult};

/// Wall-clock source in Unix seconds
pub trait Clock {
    fn unix_seconds(&self) -> i64;
}

/// System clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock pinned to a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}

/// TOTP generator and verifier
#[derive(Debug, Clone, Default)]
pub struct TotpEngine<C = SystemClock> {
    clock: C,
}

impl TotpEngine<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> TotpEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Current Unix time according to the engine's clock
    pub fn now(&self) -> OtpResult<u64> {
        let now = self.clock.unix_seconds();
        u64::try_from(now).map_err(|_| OtpError::TimeBeforeEpoch(now))
    }

    /// `floor(now / period)`
    pub fn current_counter(&self, params: &OtpParameters) -> OtpResult<u64> {
        params.validate()?;
        Ok(self.now()? / params.period)
    }

    /// Code for the current time step
    pub fn generate(&self, secret: &str, params: &OtpParameters) -> OtpResult<String> {
        self.generate_at(secret, self.now()?, params)
    }

    /// Code for the time step containing `unix_time`
    pub fn generate_at(&self, secret: &str, unix_time: u64, params: &OtpParameters) -> OtpResult<String> {
        params.validate()?;
        let key = SecretKey::from_base32(secret, params.decoding)?;
        hotp_with_key(&key, unix_time / params.period, params)
    }

    /// Check a candidate against the current step and `params.window` steps on
    /// either side.
    pub fn verify(&self, candidate: &str, secret: &str, params: &OtpParameters) -> OtpResult<bool> {
        self.verify_at(candidate, secret, self.now()?, params)
    }

    pub fn verify_at(
        &self,
        candidate: &str,
        secret: &str,
        unix_time: u64,
        params: &OtpParameters,
    ) -> OtpResult<bool> {
        Ok(self
            .verify_with_offset(candidate, secret, unix_time, params)?
            .is_some())
    }

    /// Like [`verify_at`](Self::verify_at), returning the step offset that
    /// matched. Offsets run from `-window` to `+window`; steps that would fall
    /// outside the counter range are skipped.
    pub fn verify_with_offset(
        &self,
        candidate: &str,
        secret: &str,
        unix_time: u64,
        params: &OtpParameters,
    ) -> OtpResult<Option<i64>> {
        params.validate()?;
        let key = SecretKey::from_base32(secret, params.decoding)?;
        let current = unix_time / params.period;
        let window =
            i64::try_from(params.window).map_err(|_| OtpError::InvalidWindow(params.window))?;

        for offset in -window..=window {
            let Ok(counter) = u64::try_from(i128::from(current) + i128::from(offset)) else {
                continue;
            };

            let expected = hotp_with_key(&key, counter, params)?;
            if codes_match(candidate, &expected) {
                debug!(offset, "TOTP verified");
                return Ok(Some(offset));
            }
        }

        debug!(window = params.window, "TOTP rejected");
        Ok(None)
    }

    /// Seconds until the current code expires
    pub fn time_remaining(&self, params: &OtpParameters) -> OtpResult<u64> {
        params.validate()?;
        Ok(params.period - (self.now()? % params.period))
    }
}

/// Current TOTP code from the system clock
pub fn generate_totp(secret: &str, params: &OtpParameters) -> OtpResult<String> {
    TotpEngine::new().generate(secret, params)
}

/// Verify a TOTP code against the system clock
pub fn verify_totp(candidate: &str, secret: &str, params: &OtpParameters) -> OtpResult<bool> {
    TotpEngine::new().verify(candidate, secret, params)
}
