use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Absolute backend origin, e.g. `https://api.example.com`.
    /// Empty means "same host as the page, on `port`".
    #[serde(default)]
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub currency: String,
    /// Worksheet name for XLSX exports; the report title when empty
    #[serde(default)]
    pub sheet_name: String,
    /// Labels printed under the signature lines of PDF exports
    #[serde(default)]
    pub signature_labels: Vec<String>,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 8000

[export]
currency = "₹"
sheet_name = ""
signature_labels = ["Prepared By", "Checked By", "Authorised Signatory"]
"#;

/// Build-time override of `api.base_url`
const BASE_URL_OVERRIDE: Option<&str> = option_env!("CHEMIST_API_BASE_URL");

fn parse(contents: &str, base_url_override: Option<&str>) -> Result<AppConfig, toml::de::Error> {
    let mut config: AppConfig = toml::from_str(contents)?;
    if let Some(url) = base_url_override.map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    Ok(config)
}

/// Load the embedded configuration.
///
/// The embedded text is part of the build, so a parse failure here is a
/// packaging bug; it is logged and the built-in values are used instead.
pub fn load_config() -> AppConfig {
    match parse(DEFAULT_CONFIG, BASE_URL_OVERRIDE) {
        Ok(config) => config,
        Err(e) => {
            log::error!("embedded config.toml is invalid: {}", e);
            AppConfig {
                api: ApiConfig {
                    base_url: BASE_URL_OVERRIDE.unwrap_or_default().to_string(),
                    port: 8000,
                },
                export: ExportConfig {
                    currency: reports::format::DEFAULT_CURRENCY.to_string(),
                    sheet_name: String::new(),
                    signature_labels: Vec::new(),
                },
            }
        }
    }
}

thread_local! {
    static CONFIG: AppConfig = load_config();
}

/// Process-wide configuration, parsed once
pub fn config() -> AppConfig {
    CONFIG.with(|c| c.clone())
}

impl ExportConfig {
    pub fn sheet_name(&self) -> Option<String> {
        let name = self.sheet_name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse(DEFAULT_CONFIG, None).unwrap();
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.export.currency, "₹");
        assert_eq!(config.export.signature_labels.len(), 3);
        assert_eq!(config.export.sheet_name(), None);
    }

    #[test]
    fn test_base_url_override() {
        let config = parse(DEFAULT_CONFIG, Some(" https://chemist.example.com/ ")).unwrap();
        assert_eq!(config.api.base_url, "https://chemist.example.com");

        let config = parse(DEFAULT_CONFIG, Some("")).unwrap();
        assert_eq!(config.api.base_url, "");
    }

    #[test]
    fn test_optional_export_fields() {
        let config = parse(
            r#"
[api]
port = 3000

[export]
currency = "Rs."
"#,
            None,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "");
        assert!(config.export.signature_labels.is_empty());
        assert_eq!(config.export.currency, "Rs.");
    }
}
