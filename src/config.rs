use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://engine.prod.bria-api.com";
pub const DEFAULT_GENERATION_PATH: &str = "/v1/text-to-image/hd/2.3";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// How the API key is attached to the generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `api_token: <key>`, the header Bria's own clients send.
    ApiToken,
}

impl AuthScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bearer" => Some(AuthScheme::Bearer),
            "api_token" | "api-token" | "apitoken" => Some(AuthScheme::ApiToken),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BriaConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub generation_path: String,
    pub auth_scheme: AuthScheme,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub concurrent: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bria: BriaConfig,
    pub fetch: FetchConfig,
    pub output_dir: PathBuf,
}

impl Default for BriaConfig {
    fn default() -> Self {
        BriaConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            generation_path: DEFAULT_GENERATION_PATH.to_string(),
            auth_scheme: AuthScheme::default(),
        }
    }
}

impl BriaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_vars(env_var)
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_key = var("BRIA_API_KEY").filter(|key| !key.trim().is_empty());
        let base_url = var("BRIA_BASE_URL").unwrap_or(defaults.base_url);
        let generation_path = var("BRIA_GENERATION_PATH").unwrap_or(defaults.generation_path);
        let auth_scheme = match var("BRIA_AUTH_SCHEME") {
            Some(raw) => AuthScheme::parse(&raw).unwrap_or_else(|| {
                log::warn!("Unknown BRIA_AUTH_SCHEME '{}', falling back to bearer", raw);
                AuthScheme::Bearer
            }),
            None => defaults.auth_scheme,
        };

        BriaConfig {
            api_key,
            base_url,
            generation_path,
            auth_scheme,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_generation_path(mut self, path: impl Into<String>) -> Self {
        self.generation_path = path.into();
        self
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.generation_path.trim_start_matches('/')
        )
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            concurrent: false,
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_vars(env_var)
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let default_timeout = Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS);
        let timeout = match var("CONCEPTIFY_FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "Invalid CONCEPTIFY_FETCH_TIMEOUT_SECS '{}', using {}s",
                        raw,
                        DEFAULT_FETCH_TIMEOUT_SECS
                    );
                    default_timeout
                }
            },
            None => default_timeout,
        };
        let concurrent = var("CONCEPTIFY_CONCURRENT_FETCH").map_or(false, |val| val == "true");

        FetchConfig {
            timeout,
            concurrent,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bria: BriaConfig::default(),
            fetch: FetchConfig::default(),
            output_dir: PathBuf::from("generated"),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_vars(env_var)
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let output_dir = var("CONCEPTIFY_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("generated"));

        Config {
            bria: BriaConfig::from_vars(&var),
            fetch: FetchConfig::from_vars(&var),
            output_dir,
        }
    }

    pub fn with_bria(mut self, config: BriaConfig) -> Self {
        self.bria = config;
        self
    }

    pub fn with_fetch(mut self, config: FetchConfig) -> Self {
        self.fetch = config;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_fetch_timeout_from_vars() {
        let config = FetchConfig::from_vars(vars(&[("CONCEPTIFY_FETCH_TIMEOUT_SECS", "45")]));
        assert_eq!(config.timeout, Duration::from_secs(45));

        for bad in ["0", "-3", "soon", ""] {
            let config = FetchConfig::from_vars(vars(&[("CONCEPTIFY_FETCH_TIMEOUT_SECS", bad)]));
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS), "value {:?}", bad);
        }

        let config = FetchConfig::from_vars(vars(&[]));
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_concurrent_fetch_flag_from_vars() {
        assert!(FetchConfig::from_vars(vars(&[("CONCEPTIFY_CONCURRENT_FETCH", "true")])).concurrent);
        assert!(!FetchConfig::from_vars(vars(&[("CONCEPTIFY_CONCURRENT_FETCH", "yes")])).concurrent);
        assert!(!FetchConfig::from_vars(vars(&[])).concurrent);
    }

    #[test]
    fn test_bria_from_vars() {
        let bria = BriaConfig::from_vars(vars(&[
            ("BRIA_API_KEY", "  "),
            ("BRIA_AUTH_SCHEME", "basic"),
            ("BRIA_BASE_URL", "http://localhost:9000"),
        ]));
        assert!(bria.api_key.is_none());
        assert_eq!(bria.auth_scheme, AuthScheme::Bearer);
        assert_eq!(bria.endpoint(), "http://localhost:9000/v1/text-to-image/hd/2.3");

        let bria = BriaConfig::from_vars(vars(&[
            ("BRIA_API_KEY", "secret"),
            ("BRIA_AUTH_SCHEME", "api_token"),
            ("BRIA_GENERATION_PATH", "/v2/image/generate"),
        ]));
        assert_eq!(bria.api_key.as_deref(), Some("secret"));
        assert_eq!(bria.auth_scheme, AuthScheme::ApiToken);
        assert_eq!(bria.endpoint(), "https://engine.prod.bria-api.com/v2/image/generate");
    }

    #[test]
    fn test_config_from_vars() {
        let config = Config::from_vars(vars(&[
            ("CONCEPTIFY_OUTPUT_DIR", "/tmp/concepts"),
            ("CONCEPTIFY_FETCH_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/concepts"));
        assert_eq!(config.fetch.timeout, Duration::from_secs(20));
        assert_eq!(Config::from_vars(vars(&[])).output_dir, PathBuf::from("generated"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.fetch.timeout, Duration::from_secs(20));
        assert!(!config.fetch.concurrent);
        assert!(config.bria.api_key.is_none());
        assert_eq!(config.bria.auth_scheme, AuthScheme::Bearer);
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let bria = BriaConfig::new()
            .with_base_url("http://localhost:9000/")
            .with_generation_path("/v1/text-to-image/hd/2.3");
        assert_eq!(bria.endpoint(), "http://localhost:9000/v1/text-to-image/hd/2.3");
        assert_eq!(
            BriaConfig::new().endpoint(),
            "https://engine.prod.bria-api.com/v1/text-to-image/hd/2.3"
        );
    }

    #[test]
    fn test_auth_scheme_parse() {
        assert_eq!(AuthScheme::parse("Bearer"), Some(AuthScheme::Bearer));
        assert_eq!(AuthScheme::parse(" api_token "), Some(AuthScheme::ApiToken));
        assert_eq!(AuthScheme::parse("basic"), None);
    }
}
