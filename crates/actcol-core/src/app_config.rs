use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Path conventions for per-brand artwork.
///
/// Paths are synthesized from the slug and never checked against disk;
/// presentation falls back to a placeholder when the file is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub icon_base: String,
    pub image_base: String,
    pub extension: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            icon_base: "brand-assets/icons".to_string(),
            image_base: "brand-assets/images".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl AssetConfig {
    #[must_use]
    pub fn icon_path(&self, slug: &str) -> String {
        format!(
            "{}/{slug}.{}",
            self.icon_base.trim_end_matches('/'),
            self.extension
        )
    }

    #[must_use]
    pub fn image_path(&self, slug: &str) -> String {
        format!(
            "{}/{slug}.{}",
            self.image_base.trim_end_matches('/'),
            self.extension
        )
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Published spreadsheet link. Optional at load time so the server can
    /// start and report the problem; ingestion treats absence as fatal.
    pub sheet_url: Option<String>,
    pub sheet_name: String,
    pub revalidate_secs: u64,
    pub sheet_request_timeout_secs: u64,
    pub sheet_user_agent: String,
    pub assets: AssetConfig,
}

impl AppConfig {
    /// Short, scheme-less rendering of the sheet URL for diagnostics.
    #[must_use]
    pub fn sheet_source_label(&self) -> String {
        source_label(self.sheet_url.as_deref())
    }
}

/// Renders a sheet URL without its scheme, truncated to 60 characters, or
/// `"not set"` when there is none.
#[must_use]
pub fn source_label(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => {
            let stripped = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .unwrap_or(url);
            stripped.chars().take(60).collect()
        }
        _ => "not set".to_string(),
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("sheet_url", &self.sheet_url.as_ref().map(|_| "[redacted]"))
            .field("sheet_name", &self.sheet_name)
            .field("revalidate_secs", &self.revalidate_secs)
            .field(
                "sheet_request_timeout_secs",
                &self.sheet_request_timeout_secs,
            )
            .field("sheet_user_agent", &self.sheet_user_agent)
            .field("assets", &self.assets)
            .finish()
    }
}
