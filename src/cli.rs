use crate::config::ShellConfigOverrides;
use anyhow::{anyhow, bail, Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOverrides {
    hud_distance: Option<f32>,
    hud_offset: Option<f32>,
    show_perf: Option<bool>,
}

impl CliOverrides {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = CliOverrides::default();
        let mut iter = args.into_iter();
        let _ = iter.next(); // skip program name if present
        while let Some(raw_flag) = iter.next() {
            let flag = raw_flag.as_ref();
            if !flag.starts_with("--") {
                bail!("Unexpected argument '{flag}'. Use --hud-distance/--hud-offset/--perf with values.");
            }
            let key = &flag[2..];
            let value =
                iter.next().ok_or_else(|| anyhow!("Expected a value after '{flag}'"))?.as_ref().to_string();
            match key {
                "hud-distance" => {
                    overrides.hud_distance = Some(
                        value.parse::<f32>().with_context(|| format!("Invalid hud-distance '{value}'"))?,
                    );
                }
                "hud-offset" => {
                    overrides.hud_offset = Some(
                        value.parse::<f32>().with_context(|| format!("Invalid hud-offset '{value}'"))?,
                    );
                }
                "perf" => {
                    overrides.show_perf = Some(parse_bool_flag("perf", &value)?);
                }
                _ => bail!("Unknown flag '{flag}'. Supported flags: --hud-distance, --hud-offset, --perf."),
            }
        }
        Ok(overrides)
    }

    pub fn into_config_overrides(self) -> ShellConfigOverrides {
        ShellConfigOverrides {
            hud_distance: self.hud_distance,
            hud_offset: self.hud_offset,
            show_performance_info: self.show_perf,
        }
    }
}

fn parse_bool_flag(flag: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("Invalid {flag} value '{other}'. Use on/off or true/false."),
    }
}
