use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default per-file ceiling for upstream extraction (25 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 25 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid term list: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub heuristics: HeuristicConfig,
    pub extraction: ExtractionConfig,
    pub logging: Option<LoggingConfig>,
}

/// Word lists consumed by the rule set. Everything is lowercase; the
/// analyzer lowercases the document before matching.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct HeuristicConfig {
    pub urgency_terms_es: Vec<String>,
    pub urgency_terms_en: Vec<String>,
    pub sensitive_terms: Vec<String>,
    pub suspicious_tlds: Vec<String>,
    pub shorteners: Vec<String>,
    pub brands: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    pub max_file_bytes: u64,
    pub ocr_primary_languages: String,
    pub ocr_fallback_languages: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

const URGENCY_TERMS_ES: &[&str] = &[
    "urgente",
    "inmediato",
    "último aviso",
    "suspender",
    "bloqueado",
    "verifique",
    "confirmar",
    "restablecer",
    "contraseña",
    "token",
    "código",
    "premio",
    "ganador",
    "factura pendiente",
    "pago rechazado",
    "impuesto",
    "hacienda",
    "aeat",
    "correos",
    "paquete",
    "aduana",
    "seguro",
    "transferencia",
    "banco",
    "santander",
    "bbva",
    "caixa",
    "iban",
    "otp",
    "sms",
    "confirmación",
    "actualice sus datos",
    "evitar sanción",
];

const URGENCY_TERMS_EN: &[&str] = &[
    "urgent",
    "immediately",
    "last notice",
    "suspend",
    "blocked",
    "verify",
    "confirm",
    "reset",
    "password",
    "token",
    "code",
    "prize",
    "winner",
    "pending invoice",
    "payment failed",
    "tax",
    "customs",
    "delivery",
    "bank",
    "transfer",
    "otp",
    "account",
    "update your details",
];

const SENSITIVE_TERMS: &[&str] = &[
    "dni",
    "nif",
    "tarjeta",
    "cvv",
    "iban",
    "clave",
    "contraseña",
    "token",
    "otp",
    "verifica",
    "confirma",
    "confirme",
    "transferencia",
    "pago",
];

const SUSPICIOUS_TLDS: &[&str] = &[
    "xyz", "top", "gq", "tk", "cf", "ru", "work", "zip", "mov", "rest", "country", "mom", "fit",
    "cam", "buzz", "click", "loan", "men", "live", "shop", "info",
];

const SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "is.gd",
    "ow.ly",
    "buff.ly",
    "rebrand.ly",
    "cutt.ly",
    "tiny.one",
];

const BRANDS: &[&str] = &[
    "amazon",
    "apple",
    "microsoft",
    "google",
    "facebook",
    "instagram",
    "paypal",
    "santander",
    "bbva",
    "caixabank",
    "correos",
    "aeat",
    "dgt",
    "endesa",
    "iberdrola",
    "movistar",
    "orange",
    "vodafone",
];

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            urgency_terms_es: owned(URGENCY_TERMS_ES),
            urgency_terms_en: owned(URGENCY_TERMS_EN),
            sensitive_terms: owned(SENSITIVE_TERMS),
            suspicious_tlds: owned(SUSPICIOUS_TLDS),
            shorteners: owned(SHORTENERS),
            brands: owned(BRANDS),
        }
    }
}

impl HeuristicConfig {
    /// Spanish terms first, then English. Overlapping entries are kept.
    pub fn urgency_terms(&self) -> impl Iterator<Item = &String> {
        self.urgency_terms_es.iter().chain(self.urgency_terms_en.iter())
    }

    /// Lowercase every entry and drop leading dots from TLDs so that
    /// hand-written files may use either `.xyz` or `xyz`.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.urgency_terms_es,
            &mut self.urgency_terms_en,
            &mut self.sensitive_terms,
            &mut self.shorteners,
            &mut self.brands,
        ] {
            for term in list.iter_mut() {
                *term = term.trim().to_lowercase();
            }
            list.retain(|t| !t.is_empty());
        }

        self.suspicious_tlds = self
            .suspicious_tlds
            .iter()
            .map(|t| t.trim().trim_start_matches('.').to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        self
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            ocr_primary_languages: "spa+eng".to_string(),
            ocr_fallback_languages: "eng".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(content)?;
        config.heuristics = config.heuristics.normalized();
        log::debug!(
            "Loaded heuristics: {} urgency terms, {} TLDs, {} shorteners, {} brands",
            config.heuristics.urgency_terms().count(),
            config.heuristics.suspicious_tlds.len(),
            config.heuristics.shorteners.len(),
            config.heuristics.brands.len()
        );
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let config = HeuristicConfig::default();
        assert_eq!(config.urgency_terms().count(), 56);
        assert_eq!(config.suspicious_tlds.len(), 21);
        assert_eq!(config.shorteners.len(), 10);
        assert_eq!(config.brands.len(), 18);
        assert!(config.sensitive_terms.contains(&"contraseña".to_string()));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
heuristics:
  brands: ["ACME", " Globex "]
  suspicious_tlds: [".biz", "xyz"]
extraction:
  max_file_bytes: 1024
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.heuristics.brands, vec!["acme", "globex"]);
        assert_eq!(config.heuristics.suspicious_tlds, vec!["biz", "xyz"]);
        assert_eq!(config.heuristics.shorteners.len(), 10);
        assert_eq!(config.extraction.max_file_bytes, 1024);
        assert_eq!(config.extraction.ocr_primary_languages, "spa+eng");
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_generated_yaml_round_trips() {
        let yaml = Config::default().to_yaml().unwrap();
        assert_eq!(Config::from_yaml(&yaml).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let result = Config::from_yaml("heuristics: [not, a, map]");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load_from_file("/nonexistent/phish-lens.yaml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
