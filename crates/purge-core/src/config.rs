use std::{env, fs, io, path::Path, str::FromStr, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v9";

/// Typed configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub discord_token: String,
    pub api_base: String,

    // Target selection
    pub exclude_targets: Vec<String>,
    pub prioritized_targets: Vec<String>,

    // Pacing
    pub delete_delay: Duration,
    pub target_delay: Duration,
    pub retry_after_factor: f64,
    pub max_batch: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"))?;
        Self::from_lookup(env_str)
    }

    /// Build a config from any key lookup (process env, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN").unwrap_or_default();
        if discord_token.trim().is_empty() {
            return Err(Error::Config(
                "DISCORD_TOKEN environment variable is required".to_string(),
            ));
        }

        let api_base = lookup("DISCORD_API_BASE")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let exclude_targets = parse_csv(lookup("EXCLUDE_TARGETS"));
        let prioritized_targets = parse_csv(lookup("PRIORITIZED_TARGETS"));

        let delete_delay =
            Duration::from_millis(parse_var(&lookup, "PURGE_DELETE_DELAY_MS")?.unwrap_or(2000));
        let target_delay =
            Duration::from_millis(parse_var(&lookup, "PURGE_TARGET_DELAY_MS")?.unwrap_or(2000));

        let retry_after_factor: f64 =
            parse_var(&lookup, "PURGE_RETRY_AFTER_FACTOR")?.unwrap_or(2.0);
        if !retry_after_factor.is_finite() || retry_after_factor < 0.0 {
            return Err(Error::Config(format!(
                "PURGE_RETRY_AFTER_FACTOR must be a non-negative number, got {retry_after_factor}"
            )));
        }

        let max_batch = parse_var(&lookup, "PURGE_MAX_BATCH")?.unwrap_or(100);

        Ok(Self {
            discord_token,
            api_base,
            exclude_targets,
            prioritized_targets,
            delete_delay,
            target_delay,
            retry_after_factor,
            max_batch,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// A missing file is fine; any other read failure (permissions, a directory
/// named `.env`, invalid UTF-8) is reported.
fn load_dotenv_if_present(path: &Path) -> Result<()> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::Io(e)),
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
    Ok(())
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key}={raw:?} is invalid: {e}")))
}

fn parse_csv(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("DISCORD_TOKEN")));

        let err = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "   ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn defaults_match_platform_pacing() {
        let cfg = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "tok")])).unwrap();
        assert_eq!(cfg.discord_token, "tok");
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert!(cfg.exclude_targets.is_empty());
        assert!(cfg.prioritized_targets.is_empty());
        assert_eq!(cfg.delete_delay, Duration::from_millis(2000));
        assert_eq!(cfg.target_delay, Duration::from_millis(2000));
        assert_eq!(cfg.retry_after_factor, 2.0);
        assert_eq!(cfg.max_batch, 100);
    }

    #[test]
    fn csv_lists_are_trimmed_and_skip_empties() {
        let cfg = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "tok"),
            ("EXCLUDE_TARGETS", " 1, 2,,3 "),
            ("PRIORITIZED_TARGETS", "9"),
            ("DISCORD_API_BASE", "http://localhost:8080/api/v9/"),
        ]))
        .unwrap();
        assert_eq!(cfg.exclude_targets, vec!["1", "2", "3"]);
        assert_eq!(cfg.prioritized_targets, vec!["9"]);
        assert_eq!(cfg.api_base, "http://localhost:8080/api/v9");
    }

    #[test]
    fn unparseable_numbers_are_config_errors() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "tok"),
            ("PURGE_DELETE_DELAY_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("PURGE_DELETE_DELAY_MS")));

        let err = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "tok"),
            ("PURGE_RETRY_AFTER_FACTOR", "-1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_dotenv_is_skipped() {
        let path = std::env::temp_dir().join(format!("purge-no-env-{}", std::process::id()));
        assert!(load_dotenv_if_present(&path).is_ok());
    }

    #[test]
    fn unreadable_dotenv_is_an_io_error() {
        // A directory cannot be read as a file.
        let err = load_dotenv_if_present(&std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn dotenv_lines_strip_quotes_and_comments() {
        let parsed = parse_dotenv(
            "# comment\nDISCORD_TOKEN=\"abc\"\nexport EXCLUDE_TARGETS='1,2'\nnot a pair\n=x\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("DISCORD_TOKEN".to_string(), "abc".to_string()),
                ("EXCLUDE_TARGETS".to_string(), "1,2".to_string()),
            ]
        );
    }
}
