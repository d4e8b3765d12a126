use std::env;

/// Default source for the historical hurricane table.
pub const DEFAULT_SHEET_URL: &str =
    "https://people.sc.fsu.edu/~jburkardt/data/csv/hurricanes.csv";

/// Environment variable that overrides the source URL.
pub const SHEET_URL_ENV: &str = "SHEET_URL";

/// Resolve the source URL: `SHEET_URL` when set and non-empty, else the
/// built-in default. Resolved once per fetch; there is no other process
/// configuration.
pub fn sheet_url() -> String {
    resolve(env::var(SHEET_URL_ENV).ok())
}

fn resolve(overridden: Option<String>) -> String {
    overridden
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHEET_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_override_falls_back_to_default() {
        assert_eq!(resolve(None), DEFAULT_SHEET_URL);
    }

    #[test]
    fn empty_override_falls_back_to_default() {
        assert_eq!(resolve(Some(String::new())), DEFAULT_SHEET_URL);
        assert_eq!(resolve(Some("   ".to_string())), DEFAULT_SHEET_URL);
    }

    #[test]
    fn set_override_wins() {
        assert_eq!(
            resolve(Some("http://localhost:8080/hurricanes.csv".to_string())),
            "http://localhost:8080/hurricanes.csv"
        );
    }
}
