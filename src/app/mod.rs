//! Command Line Front End
//!
//! Argument parsing and dispatch for the `otp` binary.

mod commands;
mod config;

use secrecy::SecretString;
use thiserror::Error;

use otp_engine::otp::params::DEFAULT_SECRET_BYTES;
use otp_engine::OtpError;

pub use commands::run;
pub use config::CliConfig;

pub const USAGE: &str = "\
Usage: otp <command> [args] [options]

Commands:
  secret [BYTES]             Generate a Base32 secret (default 20 bytes)
  encode TEXT                Base32-encode UTF-8 text
  decode BASE32              Decode Base32 and print the bytes as hex
  hotp SECRET COUNTER        Counter-based code
  totp SECRET                Code for the current time step
  verify CODE SECRET         Check a TOTP code against the current window
  uri ISSUER ACCOUNT SECRET  otpauth:// provisioning URI
  help                       Show this message

Options:
  --digits N       Code length, 1-9 (default 6)
  --period SECS    Time step (default 30)
  --window N       Steps accepted either side of now (default 1)
  --algorithm ALG  SHA1, SHA256 or SHA512 (default SHA1)
  --strict         Reject secrets with characters outside the Base32 alphabet
  --json           Print JSON

Log level is read from RUST_LOG.";

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Usage(String),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum Command {
    Secret { bytes: usize },
    Encode { text: String },
    Decode { input: String },
    Hotp { secret: SecretString, counter: u64 },
    Totp { secret: SecretString },
    Verify { code: String, secret: SecretString },
    Uri { issuer: String, account: String, secret: SecretString },
    Help,
}

/// Parse arguments (without the program name) into a command and config
pub fn parse_args(args: &[String]) -> CliResult<(Command, CliConfig)> {
    let mut config = CliConfig::default();
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if arg == "-h" || arg == "--help" {
            return Ok((Command::Help, config));
        }
        if arg.starts_with("--") {
            let value = iter.peek().map(|s| s.as_str());
            let consumed = config.apply_flag(arg, value).map_err(CliError::Usage)?;
            if consumed {
                iter.next();
            }
        } else {
            positional.push(arg);
        }
    }

    let command = parse_command(&positional)?;
    Ok((command, config))
}

fn parse_command(parts: &[&str]) -> CliResult<Command> {
    let Some((&name, rest)) = parts.split_first() else {
        return Ok(Command::Help);
    };

    let command = match (name, rest) {
        ("secret", []) => Command::Secret { bytes: DEFAULT_SECRET_BYTES },
        ("secret", [bytes]) => Command::Secret {
            bytes: bytes
                .parse()
                .map_err(|_| CliError::Usage(format!("invalid byte count: {bytes}")))?,
        },
        ("encode", [text]) => Command::Encode { text: text.to_string() },
        ("decode", [input]) => Command::Decode { input: input.to_string() },
        ("hotp", [secret, counter]) => Command::Hotp {
            secret: secret_arg(secret),
            counter: counter
                .parse()
                .map_err(|_| CliError::Usage(format!("invalid counter: {counter}")))?,
        },
        ("totp", [secret]) => Command::Totp { secret: secret_arg(secret) },
        ("verify", [code, secret]) => Command::Verify {
            code: code.to_string(),
            secret: secret_arg(secret),
        },
        ("uri", [issuer, account, secret]) => Command::Uri {
            issuer: issuer.to_string(),
            account: account.to_string(),
            secret: secret_arg(secret),
        },
        ("help", _) => Command::Help,
        (
            "secret" | "encode" | "decode" | "hotp" | "totp" | "verify" | "uri",
            _,
        ) => return Err(CliError::Usage(format!("wrong number of arguments for {name}"))),
        _ => return Err(CliError::Usage(format!("unknown command: {name}"))),
    };

    Ok(command)
}

fn secret_arg(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}
