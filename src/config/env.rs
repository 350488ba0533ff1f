use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Reads settings from prefixed environment variables.
///
/// `WPDM__TARGET_FILE=local.php` with prefix `WPDM` and separator `__`
/// becomes `target_file = "local.php"`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            vars: None,
        }
    }

    /// Uses a fixed set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(
        prefix: impl Into<String>,
        separator: impl Into<String>,
        vars: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            vars: Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    fn collect_vars(&self) -> Vec<(String, String)> {
        match &self.vars {
            Some(vars) => vars.clone(),
            None => std::env::vars().collect(),
        }
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }

        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (key, value) in self.collect_vars() {
            let Some(path_str) = key.strip_prefix(&prefix_with_sep) else {
                continue;
            };
            if path_str.is_empty() {
                continue;
            }

            let path: Vec<String> = path_str
                .split(&self.separator)
                .map(|s| s.to_lowercase())
                .collect();

            tracing::debug!(var = %key, "tool setting overridden from environment");
            entries.push(ConfigEntry::at_path(path, coerce_value(&value)));
        }

        Ok(entries)
    }
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if s.contains('.') && !s.contains('/') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_vars_become_entries() {
        let source = EnvSource::from_vars(
            "WPDM",
            "__",
            [
                ("WPDM__TARGET_FILE", "local-config.php"),
                ("WPDM__NOTICE_MS", "750"),
                ("OTHER__TARGET_FILE", "ignored.php"),
            ],
        );
        let mut entries = source.entries().unwrap();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, vec!["notice_ms"]);
        assert_eq!(entries[0].value, Value::Integer(750));
        assert_eq!(entries[1].path, vec!["target_file"]);
        assert_eq!(entries[1].value, Value::String("local-config.php".into()));
    }

    #[test]
    fn test_bare_prefix_is_skipped() {
        let source = EnvSource::from_vars("WPDM", "__", [("WPDM__", "x")]);
        assert!(source.entries().unwrap().is_empty());
    }

    #[test]
    fn test_empty_separator_is_an_error() {
        let source = EnvSource::from_vars("WPDM", "", [("WPDMX", "x")]);
        assert!(matches!(source.entries(), Err(ConfigError::EmptySeparator)));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce_value("TRUE"), Value::Boolean(true));
        assert_eq!(coerce_value("-3"), Value::Integer(-3));
        assert_eq!(coerce_value("1.5"), Value::Float(1.5));
        assert_eq!(coerce_value("/app/wordpress"), Value::String("/app/wordpress".into()));
        assert_eq!(coerce_value("./site.1"), Value::String("./site.1".into()));
    }
}
