use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub generation: GenerationConfig,
    pub questionnaire: QuestionnaireConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            generation: GenerationConfig::from_env()?,
            questionnaire: QuestionnaireConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub const DEFAULT_MODEL_PATH: &str = "models/zephyr-7b-beta.Q5_0.gguf";
pub const DEFAULT_LLAMA_BINARY: &str = "llama-cli";

/// Local llama.cpp inference settings plus the request gate around it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub model_path: PathBuf,
    pub binary: PathBuf,
    pub context_size: u32,
    pub gpu_layers: u32,
    pub batch_size: u32,
    pub use_mmap: bool,
    pub use_mlock: bool,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub max_concurrent: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            binary: PathBuf::from(DEFAULT_LLAMA_BINARY),
            context_size: 4096,
            gpu_layers: 0,
            batch_size: 128,
            use_mmap: true,
            use_mlock: false,
            max_tokens: 512,
            timeout: Duration::from_secs(180),
            max_attempts: 2,
            max_concurrent: 1,
        }
    }
}

impl GenerationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_attempts = parse_var("GENERATION_MAX_ATTEMPTS", defaults.max_attempts)?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                variable: "GENERATION_MAX_ATTEMPTS",
                value: "0".to_string(),
            });
        }

        let max_concurrent = parse_var("GENERATION_MAX_CONCURRENT", defaults.max_concurrent)?;
        if max_concurrent == 0 {
            return Err(ConfigError::InvalidValue {
                variable: "GENERATION_MAX_CONCURRENT",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            binary: env::var("LLAMA_BINARY")
                .map(PathBuf::from)
                .unwrap_or(defaults.binary),
            context_size: parse_var("LLAMA_N_CTX", defaults.context_size)?,
            gpu_layers: parse_var("LLAMA_N_GPU_LAYERS", defaults.gpu_layers)?,
            batch_size: parse_var("LLAMA_N_BATCH", defaults.batch_size)?,
            use_mmap: parse_flag("LLAMA_USE_MMAP", defaults.use_mmap)?,
            use_mlock: parse_flag("LLAMA_USE_MLOCK", defaults.use_mlock)?,
            max_tokens: parse_var("LLAMA_MAX_TOKENS", defaults.max_tokens)?,
            timeout: Duration::from_secs(parse_var(
                "GENERATION_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            max_attempts,
            max_concurrent,
        })
    }
}

/// Accepted inclusive range for the six Likert answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionnaireConfig {
    pub likert_min: u32,
    pub likert_max: u32,
}

impl Default for QuestionnaireConfig {
    fn default() -> Self {
        Self {
            likert_min: 1,
            likert_max: 5,
        }
    }
}

impl QuestionnaireConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let likert_min = parse_var("ADVISOR_LIKERT_MIN", defaults.likert_min)?;
        let likert_max = parse_var("ADVISOR_LIKERT_MAX", defaults.likert_max)?;

        if likert_min > likert_max {
            return Err(ConfigError::InvalidLikertScale {
                min: likert_min,
                max: likert_max,
            });
        }

        Ok(Self {
            likert_min,
            likert_max,
        })
    }
}

fn parse_var<T: std::str::FromStr>(variable: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue {
                variable,
                value: raw,
            }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(variable: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(variable) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                variable,
                value: raw,
            }),
        },
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { variable: &'static str, value: String },
    InvalidLikertScale { min: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { variable, value } => {
                write!(f, "{variable} has an invalid value '{value}'")
            }
            ConfigError::InvalidLikertScale { min, max } => write!(
                f,
                "ADVISOR_LIKERT_MIN ({min}) must not exceed ADVISOR_LIKERT_MAX ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidValue { .. }
            | ConfigError::InvalidLikertScale { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    const VARIABLES: &[&str] = &[
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "MODEL_PATH",
        "LLAMA_BINARY",
        "LLAMA_N_CTX",
        "LLAMA_N_GPU_LAYERS",
        "LLAMA_N_BATCH",
        "LLAMA_USE_MMAP",
        "LLAMA_USE_MLOCK",
        "LLAMA_MAX_TOKENS",
        "GENERATION_TIMEOUT_SECS",
        "GENERATION_MAX_ATTEMPTS",
        "GENERATION_MAX_CONCURRENT",
        "ADVISOR_LIKERT_MIN",
        "ADVISOR_LIKERT_MAX",
    ];

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in VARIABLES {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.generation, GenerationConfig::default());
        assert_eq!(
            config.generation.model_path,
            PathBuf::from("models/zephyr-7b-beta.Q5_0.gguf")
        );
        assert_eq!(config.generation.context_size, 4096);
        assert_eq!(config.questionnaire, QuestionnaireConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_inference_tuning_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MODEL_PATH", "/srv/models/custom.gguf");
        env::set_var("LLAMA_N_GPU_LAYERS", "35");
        env::set_var("LLAMA_N_BATCH", "64");
        env::set_var("LLAMA_USE_MMAP", "off");
        env::set_var("LLAMA_USE_MLOCK", "true");
        env::set_var("GENERATION_TIMEOUT_SECS", "30");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.generation.model_path,
            PathBuf::from("/srv/models/custom.gguf")
        );
        assert_eq!(config.generation.gpu_layers, 35);
        assert_eq!(config.generation.batch_size, 64);
        assert!(!config.generation.use_mmap);
        assert!(config.generation.use_mlock);
        assert_eq!(config.generation.timeout, Duration::from_secs(30));
        reset_env();
    }

    #[test]
    fn rejects_malformed_numbers_and_flags() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LLAMA_N_CTX", "lots");
        let err = AppConfig::load().expect_err("invalid context size");
        assert!(err.to_string().contains("LLAMA_N_CTX"));

        reset_env();
        env::set_var("LLAMA_USE_MLOCK", "maybe");
        let err = AppConfig::load().expect_err("invalid flag");
        assert!(err.to_string().contains("LLAMA_USE_MLOCK"));

        reset_env();
        env::set_var("GENERATION_MAX_ATTEMPTS", "0");
        assert!(AppConfig::load().is_err());
        reset_env();
    }

    #[test]
    fn rejects_inverted_likert_scale() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ADVISOR_LIKERT_MIN", "7");
        env::set_var("ADVISOR_LIKERT_MAX", "5");
        let err = AppConfig::load().expect_err("inverted scale");
        assert!(matches!(
            err,
            ConfigError::InvalidLikertScale { min: 7, max: 5 }
        ));
        reset_env();
    }
}
