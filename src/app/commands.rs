use secrecy::ExposeSecret;
use serde_json::{json, Value};

use otp_engine::otp::{base32, hotp, secret, uri};
use otp_engine::{Clock, SecretDecoding, SecretKey, TotpEngine};

use super::{CliConfig, CliResult, Command, USAGE};

/// Result of a command, rendered as text or JSON
#[derive(Debug)]
pub struct CommandOutput {
    pub text: String,
    pub json: Value,
    /// False when a verification was rejected
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String, json: Value) -> Self {
        Self { text, json, success: true }
    }

    pub fn render(&self, config: &CliConfig) -> CliResult<String> {
        if config.json {
            Ok(serde_json::to_string_pretty(&self.json)?)
        } else {
            Ok(self.text.clone())
        }
    }
}

/// Execute a command against the given clock
pub fn run<C: Clock>(command: &Command, config: &CliConfig, engine: &TotpEngine<C>) -> CliResult<CommandOutput> {
    let params = &config.params;

    let output = match command {
        Command::Secret { bytes } => {
            let secret = secret::generate_secret(*bytes)?;
            CommandOutput::ok(secret.clone(), json!({ "secret": secret, "bytes": bytes }))
        }
        Command::Encode { text } => {
            let encoded = base32::encode(text.as_bytes());
            CommandOutput::ok(encoded.clone(), json!({ "encoded": encoded }))
        }
        Command::Decode { input } => {
            let key = SecretKey::from_base32(input, params.decoding)?;
            let hex = hex::encode(key.as_bytes());
            let text = String::from_utf8(key.as_bytes().to_vec()).ok();
            let display = match &text {
                Some(t) => format!("{hex}\n{t}"),
                None => hex.clone(),
            };
            CommandOutput::ok(display, json!({ "hex": hex, "text": text }))
        }
        Command::Hotp { secret, counter } => {
            let code = hotp::generate_hotp(secret.expose_secret(), *counter, params)?;
            CommandOutput::ok(code.clone(), json!({ "code": code, "counter": counter }))
        }
        Command::Totp { secret } => {
            let code = engine.generate(secret.expose_secret(), params)?;
            let remaining = engine.time_remaining(params)?;
            CommandOutput::ok(
                format!("{code} ({remaining}s remaining)"),
                json!({ "code": code, "remaining": remaining, "period": params.period }),
            )
        }
        Command::Verify { code, secret } => {
            let now = engine.now()?;
            let offset = engine.verify_with_offset(code, secret.expose_secret(), now, params)?;
            let text = match offset {
                Some(0) => "valid".to_string(),
                Some(o) => format!("valid (step offset {o:+})"),
                None => "invalid".to_string(),
            };
            CommandOutput {
                text,
                json: json!({ "valid": offset.is_some(), "offset": offset }),
                success: offset.is_some(),
            }
        }
        Command::Uri { issuer, account, secret } => {
            if params.decoding == SecretDecoding::Strict {
                base32::decode_strict(secret.expose_secret())?;
            }
            let uri = uri::build_uri(issuer, account, secret.expose_secret(), params);
            CommandOutput::ok(uri.clone(), json!({ "uri": uri }))
        }
        Command::Help => CommandOutput::ok(USAGE.to_string(), json!({ "usage": USAGE })),
    };

    Ok(output)
}
