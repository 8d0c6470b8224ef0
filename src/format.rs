//! The `format` keyword names a string shape (`date-time`, `email`, ...). By
//! default `format` is annotation-only; a caller opts individual names into
//! enforcement via [`ValidationOptions::enabled_formats`](crate::options::ValidationOptions).

use once_cell::sync::Lazy;
use std::net::{Ipv4Addr, Ipv6Addr};
use strum::IntoEnumIterator;

/// One of the string formats this engine knows how to check.
///
/// This is the subset of the draft-6/draft-07 format vocabulary this crate
/// enforces; names outside this set are accepted in schemas and ignored at
/// validation time, per the `format` keyword's annotation-only fallback.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    DateTime,
    Date,
    Time,
    Email,
    Hostname,
    Ipv4,
    Ipv6,
    Uri,
    UriReference,
    UriTemplate,
    JsonPointer,
    Regex,
}

impl Format {
    /// Every format this engine knows how to check.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Parses a `format` keyword value, returning `None` for names this
    /// engine does not enforce.
    pub fn named(name: &str) -> Option<Self> {
        use Format::*;
        Some(match name {
            "date-time" => DateTime,
            "date" => Date,
            "time" => Time,
            "email" => Email,
            "hostname" => Hostname,
            "ipv4" => Ipv4,
            "ipv6" => Ipv6,
            "uri" => Uri,
            "uri-reference" => UriReference,
            "uri-template" => UriTemplate,
            "json-pointer" => JsonPointer,
            "regex" => Regex,
            _ => return None,
        })
    }

    /// Checks whether `value` satisfies this format.
    pub fn check(self, value: &str) -> bool {
        use Format::*;
        match self {
            DateTime => is_date_time(value),
            Date => is_date(value),
            Time => is_time(value),
            Email => is_email(value),
            Hostname => is_hostname(value),
            Ipv4 => value.parse::<Ipv4Addr>().is_ok() && !value.contains(':'),
            Ipv6 => value.parse::<Ipv6Addr>().is_ok(),
            Uri => url::Url::parse(value).is_ok(),
            UriReference => is_uri_reference(value),
            UriTemplate => is_uri_reference(value),
            JsonPointer => is_json_pointer(value),
            Regex => fancy_regex::Regex::new(value).is_ok(),
        }
    }
}

static DATE_RE: Lazy<fancy_regex::Regex> = Lazy::new(|| {
    fancy_regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static pattern compiles")
});

static TIME_RE: Lazy<fancy_regex::Regex> = Lazy::new(|| {
    fancy_regex::Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?(([+-]\d{2}:\d{2})|Z|z)$")
        .expect("static pattern compiles")
});

static EMAIL_RE: Lazy<fancy_regex::Regex> = Lazy::new(|| {
    fancy_regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static pattern compiles")
});

static HOSTNAME_RE: Lazy<fancy_regex::Regex> = Lazy::new(|| {
    fancy_regex::Regex::new(r"^(?!-)[A-Za-z0-9-]{1,63}(?<!-)(\.(?!-)[A-Za-z0-9-]{1,63}(?<!-))*$")
        .expect("static pattern compiles")
});

fn is_date(value: &str) -> bool {
    DATE_RE.is_match(value).unwrap_or(false)
}

fn is_time(value: &str) -> bool {
    TIME_RE.is_match(value).unwrap_or(false)
}

fn is_date_time(value: &str) -> bool {
    let Some((date, time)) = value.split_once(['T', 't']) else {
        return false;
    };
    is_date(date) && is_time(time)
}

fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value).unwrap_or(false)
}

fn is_hostname(value: &str) -> bool {
    value.len() <= 255 && HOSTNAME_RE.is_match(value).unwrap_or(false)
}

fn is_uri_reference(value: &str) -> bool {
    url::Url::parse(value).is_ok() || url::Url::parse(&format!("scheme:{value}")).is_ok()
}

fn is_json_pointer(value: &str) -> bool {
    value.is_empty() || jsonptr::Pointer::parse(value).is_ok()
}
