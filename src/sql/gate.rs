use std::fmt;

/// Keywords that can modify data or the database itself.
///
/// Matched as plain substrings of the upper-cased statement, so identifiers such
/// as `dropout_rate` or `last_updated` are rejected too.
pub const FORBIDDEN_KEYWORDS: [&str; 11] = [
    "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "TRUNCATE", "REPLACE", "PRAGMA",
    "ATTACH", "DETACH",
];

/// Why a candidate statement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotSelect,
    ForbiddenKeyword(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotSelect => write!(f, "Only SELECT queries are allowed"),
            Rejection::ForbiddenKeyword(keyword) => {
                write!(f, "Query contains forbidden keyword: {}", keyword)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(reason) => Some(*reason),
        }
    }
}

/// Decides whether a generated statement may be run against the store.
///
/// Pure and total: never executes anything and never fails on odd input.
/// The statement must start with `SELECT` and must not contain any of
/// [`FORBIDDEN_KEYWORDS`], both compared case-insensitively after trimming.
/// The first violated rule is reported.
pub fn validate(sql: &str) -> Verdict {
    let normalized = sql.trim().to_uppercase();

    if !normalized.starts_with("SELECT") {
        return Verdict::Rejected(Rejection::NotSelect);
    }

    // Catches stacked statements like `SELECT 1; DROP TABLE movies`
    match FORBIDDEN_KEYWORDS
        .iter()
        .find(|keyword| normalized.contains(*keyword))
    {
        Some(keyword) => Verdict::Rejected(Rejection::ForbiddenKeyword(*keyword)),
        None => Verdict::Accepted,
    }
}
