use otp_engine::OtpParameters;

#[derive(Default)]
pub struct CliConfig {
    pub params: OtpParameters,
    /// Print results as JSON objects
    pub json: bool,
}

impl CliConfig {
    /// Apply a `--flag [value]` pair. Returns whether `value` was consumed.
    pub fn apply_flag(&mut self, flag: &str, value: Option<&str>) -> Result<bool, String> {
        match flag {
            "--json" => {
                self.json = true;
                Ok(false)
            }
            "--strict" => {
                self.params = self.params.strict();
                Ok(false)
            }
            "--digits" => {
                self.params.digits = parse_value(flag, value)?;
                Ok(true)
            }
            "--period" => {
                self.params.period = parse_value(flag, value)?;
                Ok(true)
            }
            "--window" => {
                self.params.window = parse_value(flag, value)?;
                Ok(true)
            }
            "--algorithm" => {
                self.params.algorithm = parse_value(flag, value)?;
                Ok(true)
            }
            _ => Err(format!("unknown option: {flag}")),
        }
    }
}

fn parse_value<T>(flag: &str, value: Option<&str>) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|e| format!("invalid value for {flag}: {value} ({e})"))
}
