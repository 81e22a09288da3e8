// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Bench Configuration Types
//
// Defines the configuration schema for a promptbench run, including:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Remote API endpoint and credential reference
// - Local text-generation pipeline endpoint
// - Ordered model list (label -> backend kind + backend model id)
// - Token budget override and output location

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::error::BenchError;
use super::model::{BackendKind, ModelDescriptor, ModelRegistry, MAX_TOKEN_BUDGET};

pub const API_VERSION: &str = "promptbench/v1";
pub const KIND: &str = "BenchConfig";

/// Top-level Kubernetes-style bench configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfigManifest {
    /// API version (must be "promptbench/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "BenchConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: BenchConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfigSpec {
    /// Remote inference API settings
    #[serde(default)]
    pub openai: RemoteApiConfig,

    /// Locally hosted text-generation pipeline settings
    #[serde(default)]
    pub local_pipeline: LocalPipelineConfig,

    /// Models to benchmark, in output order
    #[serde(default = "default_models")]
    pub models: Vec<ModelEntry>,

    #[serde(default)]
    pub generation: GenerationConfig,

    /// Default prompt corpus location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts_file: Option<PathBuf>,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteApiConfig {
    /// API base URL
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,

    /// API key (supports "env:VAR_NAME" for environment variables)
    #[serde(default = "default_openai_api_key")]
    pub api_key: Option<String>,

    /// Per-request timeout; unset means wait indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalPipelineConfig {
    /// Base URL of the local pipeline server
    #[serde(default = "default_local_endpoint")]
    pub endpoint: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Label used in the output document (e.g. "GPT-3.5")
    pub label: String,

    /// Invocation protocol
    pub backend: BackendKind,

    /// Backend model identifier
    pub model: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Overrides every backend's default token budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_api_key() -> Option<String> {
    Some("env:OPENAI_API_KEY".to_string())
}

fn default_local_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("responses.json")
}

fn default_models() -> Vec<ModelEntry> {
    vec![
        ModelEntry {
            label: "GPT-1".to_string(),
            backend: BackendKind::LocalPipeline,
            model: "openai-community/openai-gpt".to_string(),
            enabled: false,
        },
        ModelEntry {
            label: "GPT-3".to_string(),
            backend: BackendKind::LegacyCompletion,
            model: "davinci-002".to_string(),
            enabled: true,
        },
        ModelEntry {
            label: "GPT-3.5".to_string(),
            backend: BackendKind::ChatCompletion,
            model: "gpt-3.5-turbo-0125".to_string(),
            enabled: true,
        },
        ModelEntry {
            label: "o3-mini".to_string(),
            backend: BackendKind::ReasoningChat,
            model: "o3-mini-2025-01-31".to_string(),
            enabled: true,
        },
    ]
}

impl Default for RemoteApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_openai_endpoint(),
            api_key: default_openai_api_key(),
            request_timeout_secs: None,
        }
    }
}

impl Default for LocalPipelineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_local_endpoint(),
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for BenchConfigSpec {
    fn default() -> Self {
        Self {
            openai: RemoteApiConfig::default(),
            local_pipeline: LocalPipelineConfig::default(),
            models: default_models(),
            generation: GenerationConfig::default(),
            prompts_file: None,
            output: OutputConfig::default(),
        }
    }
}

impl Default for BenchConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "promptbench".to_string(),
                version: Some("1.0.0".to_string()),
            },
            spec: BenchConfigSpec::default(),
        }
    }
}

impl BenchConfigSpec {
    /// Build the registry from enabled model entries, preserving order
    pub fn model_registry(&self) -> Result<ModelRegistry, BenchError> {
        let entries = self
            .models
            .iter()
            .filter(|m| m.enabled)
            .map(|m| ModelDescriptor::new(m.label.clone(), m.backend, m.model.clone()))
            .collect();
        ModelRegistry::new(entries)
    }
}

impl BenchConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. PROMPTBENCH_CONFIG_PATH environment variable
    /// 2. ./promptbench.yaml (working directory)
    /// 3. ~/.promptbench/config.yaml (user home)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("PROMPTBENCH_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./promptbench.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".promptbench").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::debug!("No configuration file found. Using built-in defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PROMPTBENCH_OPENAI_ENDPOINT") {
            tracing::info!("Environment override: PROMPTBENCH_OPENAI_ENDPOINT={}", val);
            self.spec.openai.endpoint = val;
        }

        if let Ok(val) = std::env::var("PROMPTBENCH_OUTPUT_PATH") {
            tracing::info!("Environment override: PROMPTBENCH_OUTPUT_PATH={}", val);
            self.spec.output.path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PROMPTBENCH_MAX_TOKENS") {
            match val.parse::<u32>() {
                Ok(n) => {
                    tracing::info!("Environment override: PROMPTBENCH_MAX_TOKENS={}", n);
                    self.spec.generation.max_tokens = Some(n);
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for PROMPTBENCH_MAX_TOKENS: '{}'. Expected a positive integer. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let mut labels = HashSet::new();
        for model in &self.spec.models {
            if model.label.is_empty() {
                anyhow::bail!("Model label cannot be empty");
            }
            if model.model.is_empty() {
                anyhow::bail!("Model identifier cannot be empty for label: {}", model.label);
            }
            if !labels.insert(model.label.as_str()) {
                anyhow::bail!("Duplicate model label: {}", model.label);
            }
        }

        let uses = |remote: bool| {
            self.spec
                .models
                .iter()
                .any(|m| m.enabled && m.backend.is_remote() == remote)
        };

        if uses(true) && self.spec.openai.endpoint.is_empty() {
            anyhow::bail!("spec.openai.endpoint cannot be empty");
        }

        if uses(false) && self.spec.local_pipeline.endpoint.is_empty() {
            anyhow::bail!("spec.local_pipeline.endpoint cannot be empty");
        }

        if self.spec.generation.max_tokens == Some(0) {
            anyhow::bail!("spec.generation.max_tokens must be greater than zero");
        }

        if let Some(n) = self.spec.generation.max_tokens.filter(|n| *n > MAX_TOKEN_BUDGET) {
            anyhow::bail!(
                "spec.generation.max_tokens must be at most {} (got {})",
                MAX_TOKEN_BUDGET,
                n
            );
        }

        Ok(())
    }
}
