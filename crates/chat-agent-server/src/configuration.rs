use crate::error::{to_env_var, ConfigError};
use anyhow::Result;
use chat_agent::{
    prompt_template,
    providers::{
        configs::{OllamaProviderConfig, OpenAiProviderConfig, ProviderConfig},
        ollama, openai,
    },
    swaps::http::SwapConfig,
};
use config::{Config, Environment, File};
use serde::{de::DeserializeOwned, Deserialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProviderSettings {
    OpenAi {
        #[serde(default = "default_openai_host")]
        host: String,
        api_key: String,
        #[serde(default = "default_model")]
        model: String,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_tokens: Option<i32>,
        #[serde(default = "default_json_mode")]
        json_mode: bool,
        #[serde(default)]
        system_prompt_file: Option<PathBuf>,
    },
    Ollama {
        #[serde(default = "default_ollama_host")]
        host: String,
        #[serde(default = "default_ollama_model")]
        model: String,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_tokens: Option<i32>,
        #[serde(default)]
        system_prompt_file: Option<PathBuf>,
    },
}

impl ProviderSettings {
    // Convert to the chat_agent ProviderConfig, rendering the system prompt
    pub fn into_config(self, timeout: Duration) -> Result<ProviderConfig> {
        match self {
            ProviderSettings::OpenAi {
                host,
                api_key,
                model,
                temperature,
                max_tokens,
                json_mode,
                system_prompt_file,
            } => Ok(ProviderConfig::OpenAi(OpenAiProviderConfig {
                host,
                api_key,
                model,
                temperature,
                max_tokens,
                json_mode,
                system_prompt: prompt_template::system_prompt(system_prompt_file.as_deref())?,
                timeout,
            })),
            ProviderSettings::Ollama {
                host,
                model,
                temperature,
                max_tokens,
                system_prompt_file,
            } => Ok(ProviderConfig::Ollama(OllamaProviderConfig {
                host,
                model,
                temperature,
                max_tokens,
                system_prompt: prompt_template::system_prompt(system_prompt_file.as_deref())?,
                timeout,
            })),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SwapSettings {
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl SwapSettings {
    pub fn into_config(self, timeout: Duration) -> SwapConfig {
        SwapConfig {
            host: self.host,
            api_key: self.api_key,
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub swap: SwapSettings,
    pub http: HttpSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("http.timeout_secs", default_timeout_secs())?
            // Optional chat-agent.toml in the current working directory
            .add_source(File::with_name("chat-agent").required(false))
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("CHAT_AGENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // One section at a time so a missing field can be named with its section
        Ok(Self {
            server: section(&config, "server", "host")?,
            provider: section(&config, "provider", "type")?,
            swap: section(&config, "swap", "host")?,
            http: section(&config, "http", "timeout_secs")?,
        })
    }
}

/// Deserialize one top-level section. A section that is absent altogether is
/// reported through its first required field.
fn section<T: DeserializeOwned>(
    config: &Config,
    key: &str,
    required: &str,
) -> Result<T, ConfigError> {
    config.get::<T>(key).map_err(|err| {
        tracing::debug!("Configuration error in {}: {:?}", key, &err);

        if let config::ConfigError::NotFound(_) = &err {
            return ConfigError::MissingEnvVar {
                env_var: to_env_var(&format!("{}.{}", key, required)),
            };
        }
        match missing_field(&err.to_string()) {
            Some(field) => ConfigError::MissingEnvVar {
                env_var: to_env_var(&format!("{}.{}", key, field)),
            },
            None => ConfigError::Other(err),
        }
    })
}

// "missing field `api_key`", possibly followed by the key it was read from
fn missing_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_json_mode() -> bool {
    true
}

fn default_model() -> String {
    openai::OPENAI_MODEL.to_string()
}

fn default_openai_host() -> String {
    openai::OPENAI_HOST.to_string()
}

fn default_ollama_host() -> String {
    ollama::OLLAMA_HOST.to_string()
}

fn default_ollama_model() -> String {
    ollama::OLLAMA_MODEL.to_string()
}
