use anyhow::{Result, bail};
use platform_db::DatabaseSettings;

const DEFAULT_APP_TITLE: &str = "Employee Directory";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Heading and `<title>` of every rendered page.
    pub app_title: String,
    pub database: DatabaseSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_title: DEFAULT_APP_TITLE.into(),
            database: DatabaseSettings::default(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment (after `.env`, if present, has been
    /// loaded by the caller).
    pub fn load() -> Result<Self> {
        let app_title = match std::env::var("APP_TITLE") {
            Ok(raw) => normalize_title(&raw)?,
            Err(_) => DEFAULT_APP_TITLE.into(),
        };
        Ok(Self {
            app_title,
            database: DatabaseSettings::from_env()?,
        })
    }
}

fn normalize_title(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("APP_TITLE must not be blank");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(normalize_title("  Staff  ").unwrap(), "Staff");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(normalize_title("   ").is_err());
    }

    #[test]
    fn default_title() {
        assert_eq!(AppConfig::default().app_title, "Employee Directory");
    }
}
