//! The settings this tool knows how to read and rewrite.

use std::fmt;

use super::statement::{statements, Literal, Statement};
use crate::Error;

/// Values accepted by `WP_ENVIRONMENT_TYPE`.
pub const ENVIRONMENT_TYPES: &[&str] = &["local", "development", "staging", "production"];

/// How a setting's value is written in `wp-config.php`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Bare `true` or `false`.
    Boolean,
    /// Quoted string restricted to a fixed set of literals.
    Enum(&'static [&'static str]),
    /// Quoted string with free-form content.
    RawString,
}

impl ValueKind {
    fn is_quoted(self) -> bool {
        !matches!(self, ValueKind::Boolean)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Boolean => f.write_str("boolean"),
            ValueKind::Enum(allowed) => write!(f, "one of {}", allowed.join(", ")),
            ValueKind::RawString => f.write_str("string"),
        }
    }
}

/// A registered setting: the constant it maps to and how its value looks.
#[derive(Debug, PartialEq, Eq)]
pub struct SettingDefinition {
    pub id: &'static str,
    pub constant: &'static str,
    pub kind: ValueKind,
    pub label: &'static str,
}

static REGISTRY: &[SettingDefinition] = &[
    SettingDefinition {
        id: "debug",
        constant: "WP_DEBUG",
        kind: ValueKind::Boolean,
        label: "Debug mode",
    },
    SettingDefinition {
        id: "environment",
        constant: "WP_ENVIRONMENT_TYPE",
        kind: ValueKind::Enum(ENVIRONMENT_TYPES),
        label: "Environment type",
    },
    SettingDefinition {
        id: "mail-sandbox",
        constant: "SENDGRID_DEV",
        kind: ValueKind::Boolean,
        label: "Mail sandbox",
    },
    SettingDefinition {
        id: "script-debug",
        constant: "SCRIPT_DEBUG",
        kind: ValueKind::Boolean,
        label: "Script debug",
    },
    SettingDefinition {
        id: "debug-display",
        constant: "WP_DEBUG_DISPLAY",
        kind: ValueKind::Boolean,
        label: "Display errors",
    },
    SettingDefinition {
        id: "debug-log",
        constant: "WP_DEBUG_LOG",
        kind: ValueKind::Boolean,
        label: "Debug log",
    },
    SettingDefinition {
        id: "home-url",
        constant: "WP_HOME",
        kind: ValueKind::RawString,
        label: "Home URL",
    },
];

/// All registered settings, in display order.
pub fn definitions() -> &'static [SettingDefinition] {
    REGISTRY
}

/// Finds the definition registered under `id`. Matching is exact.
pub fn lookup(id: &str) -> Result<&'static SettingDefinition, Error> {
    REGISTRY
        .iter()
        .find(|def| def.id == id)
        .ok_or_else(|| Error::UnregisteredSetting(id.to_string()))
}

impl SettingDefinition {
    /// Finds the first statement defining this constant with a value of the
    /// right shape.
    pub fn find<'a>(&self, content: &'a [u8]) -> Option<Statement<'a>> {
        statements(content).find(|stmt| stmt.name == self.constant && self.fits(&stmt.value))
    }

    /// Extracts the current literal value, quotes stripped.
    pub fn extract(&self, content: &[u8]) -> Option<String> {
        self.find(content).map(|stmt| stmt.value.text().to_string())
    }

    /// Like [`extract`](Self::extract), but says why nothing was found.
    ///
    /// A constant that is defined with a value of another shape, such as a
    /// log path for `WP_DEBUG_LOG`, is reported as [`Error::UnexpectedShape`].
    pub fn require<'a>(&self, content: &'a [u8]) -> Result<Statement<'a>, Error> {
        let mut defined = None;
        for stmt in statements(content).filter(|stmt| stmt.name == self.constant) {
            if self.fits(&stmt.value) {
                return Ok(stmt);
            }
            if defined.is_none() {
                defined = Some(stmt);
            }
        }

        Err(match defined {
            Some(stmt) => Error::UnexpectedShape {
                constant: self.constant,
                expected: self.kind,
                found: stmt.value.text().to_string(),
            },
            None => Error::SettingNotFound {
                constant: self.constant,
            },
        })
    }

    /// Renders `stmt` with its value replaced by `value`.
    ///
    /// Spacing and quote style of the original statement are kept.
    pub fn format(&self, content: &[u8], stmt: &Statement<'_>, value: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(stmt.span.len() + value.len());
        out.extend_from_slice(&content[stmt.span.start..stmt.value_span.start]);
        match stmt.value {
            Literal::Bare(_) => out.extend_from_slice(value.as_bytes()),
            Literal::Quoted { quote, .. } => {
                let mut buf = [0; 4];
                let quote = quote.encode_utf8(&mut buf).as_bytes();
                out.extend_from_slice(quote);
                out.extend_from_slice(value.as_bytes());
                out.extend_from_slice(quote);
            }
        }
        out.extend_from_slice(&content[stmt.value_span.end..stmt.span.end]);
        out
    }

    fn fits(&self, value: &Literal<'_>) -> bool {
        matches!(value, Literal::Quoted { .. }) == self.kind.is_quoted()
    }

    /// Checks that `value` can be written for this setting.
    pub fn validate(&self, value: &str) -> Result<(), Error> {
        let reason = match self.kind {
            ValueKind::Boolean if value != "true" && value != "false" => {
                Some("expected true or false".to_string())
            }
            ValueKind::Enum(allowed) if !allowed.contains(&value) => {
                Some(format!("expected {}", self.kind))
            }
            ValueKind::RawString
                if value
                    .chars()
                    .any(|c| matches!(c, '\'' | '"' | '\\' | '$' | '\n' | '\r')) =>
            {
                Some("quotes, backslashes, '$' and line breaks are not allowed".to_string())
            }
            _ => None,
        };

        match reason {
            Some(reason) => Err(Error::InvalidValue {
                setting: self.id,
                value: value.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// Negates a boolean literal, case-insensitively.
pub fn toggled(current: &str) -> &'static str {
    if current.eq_ignore_ascii_case("true") {
        "false"
    } else {
        "true"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = definitions().iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), definitions().len());
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(lookup("debug").unwrap().constant, "WP_DEBUG");
        assert!(matches!(lookup("Debug"), Err(Error::UnregisteredSetting(_))));
        assert!(matches!(lookup("WP_DEBUG"), Err(Error::UnregisteredSetting(_))));
    }

    #[test]
    fn test_find_respects_shape() {
        let env = lookup("environment").unwrap();
        let content = b"define( 'WP_ENVIRONMENT_TYPE', LOCAL_ENV );\ndefine( 'WP_ENVIRONMENT_TYPE', 'local' );";
        assert_eq!(env.extract(content).as_deref(), Some("local"));

        let debug = lookup("debug").unwrap();
        assert_eq!(debug.extract(b"define( 'WP_DEBUG', 'yes' );"), None);
    }

    #[test]
    fn test_require_reports_wrong_shape() {
        let log = lookup("debug-log").unwrap();
        let err = log
            .require(b"define( 'WP_DEBUG_LOG', '/tmp/wp.log' );")
            .unwrap_err();

        match &err {
            Error::UnexpectedShape {
                constant, found, ..
            } => {
                assert_eq!(*constant, "WP_DEBUG_LOG");
                assert_eq!(found, "/tmp/wp.log");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "WP_DEBUG_LOG is defined as '/tmp/wp.log', expected boolean"
        );
        assert!(matches!(
            log.require(b"<?php\n"),
            Err(Error::SettingNotFound { constant: "WP_DEBUG_LOG" })
        ));
    }

    #[test]
    fn test_require_prefers_matching_shape() {
        let log = lookup("debug-log").unwrap();
        let content = b"define( 'WP_DEBUG_LOG', '/tmp/wp.log' );\ndefine( 'WP_DEBUG_LOG', true );";
        assert_eq!(log.require(content).unwrap().value, Literal::Bare("true"));
    }

    #[test]
    fn test_format_keeps_statement_style() {
        let env = lookup("environment").unwrap();
        let content = b"define(\"WP_ENVIRONMENT_TYPE\",\"production\");";
        let stmt = env.find(content).unwrap();

        assert_eq!(
            env.format(content, &stmt, "staging"),
            b"define(\"WP_ENVIRONMENT_TYPE\",\"staging\");"
        );
    }

    #[test]
    fn test_validate() {
        let debug = lookup("debug").unwrap();
        assert!(debug.validate("true").is_ok());
        assert!(matches!(debug.validate("yes"), Err(Error::InvalidValue { .. })));
        assert!(debug.validate("TRUE").is_err());

        let env = lookup("environment").unwrap();
        assert!(env.validate("staging").is_ok());
        assert!(env.validate("qa").is_err());

        let home = lookup("home-url").unwrap();
        assert!(home.validate("https://example.test").is_ok());
        assert!(home.validate("https://x.test' . evil() . '").is_err());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(toggled("true"), "false");
        assert_eq!(toggled("FALSE"), "true");
        assert_eq!(toggled("false"), "true");
    }
}
