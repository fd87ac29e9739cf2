//! Store location strings.
//!
//! A location selects which record store backs the service:
//!
//! | location | store |
//! |---|---|
//! | `memory:` | in-process map, lost on exit |
//! | `file:<dir>` | JSON blob under `<dir>` |
//! | `http://…` / `https://…` | remote REST endpoint |
//! | `sqlite:…`, `postgres://…`, `mysql://…` | SQL table |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Parsed store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Volatile in-memory store.
    Memory,
    /// File-backed local store rooted at the given directory.
    File(PathBuf),
    /// Remote REST endpoint (base URL, without the `/api/clients` suffix).
    Http(String),
    /// SQL database URL.
    Sql(String),
}

/// Error returned when a location string matches no known scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationError(pub String);

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported store location: {}", self.0)
    }
}

impl std::error::Error for LocationError {}

const SQL_PREFIXES: &[&str] = &[
    "sqlite:",
    "postgres://",
    "postgresql://",
    "mysql://",
    "mariadb://",
];

impl StoreLocation {
    /// Backend kind, safe to log (SQL URLs may carry credentials).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
            Self::Http(_) => "http",
            Self::Sql(_) => "sql",
        }
    }
}

impl FromStr for StoreLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "memory" || s == "memory:" {
            return Ok(Self::Memory);
        }
        if let Some(dir) = s.strip_prefix("file:") {
            if dir.is_empty() {
                return Err(LocationError(s.to_string()));
            }
            return Ok(Self::File(PathBuf::from(dir)));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Self::Http(s.to_string()));
        }
        if SQL_PREFIXES.iter().any(|p| s.starts_with(p)) {
            return Ok(Self::Sql(s.to_string()));
        }
        Err(LocationError(s.to_string()))
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory:"),
            Self::File(dir) => write!(f, "file:{}", dir.display()),
            Self::Http(url) | Self::Sql(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_schemes() {
        assert_eq!("memory:".parse(), Ok(StoreLocation::Memory));
        assert_eq!(
            "file:./data".parse(),
            Ok(StoreLocation::File(PathBuf::from("./data")))
        );
        assert_eq!(
            "http://localhost:4000".parse(),
            Ok(StoreLocation::Http("http://localhost:4000".into()))
        );
        assert_eq!(
            "sqlite::memory:".parse(),
            Ok(StoreLocation::Sql("sqlite::memory:".into()))
        );
        assert_eq!(
            "postgres://u:p@db/couture".parse(),
            Ok(StoreLocation::Sql("postgres://u:p@db/couture".into()))
        );
    }

    #[test]
    fn kind_hides_url() {
        let loc: StoreLocation = "postgres://u:secret@db/couture".parse().unwrap();
        assert_eq!(loc.kind(), "sql");
    }

    #[test]
    fn rejects_unknown_schemes() {
        assert!("ftp://example.com".parse::<StoreLocation>().is_err());
        assert!("file:".parse::<StoreLocation>().is_err());
        assert!("".parse::<StoreLocation>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for s in ["memory:", "file:/var/lib/couture", "https://api.example.com"] {
            let loc: StoreLocation = s.parse().unwrap();
            assert_eq!(loc.to_string(), s);
        }
    }
}
