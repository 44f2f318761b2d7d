//! レジストリ認証処理
//!
//! Docker の config.json（`auths` / `credHelpers` / `credsStore`）から
//! プッシュ先レジストリの認証情報を探し、Bollard の DockerCredentials に変換します。

use crate::error::{BuildError, BuildResult};
use base64::Engine;
use bollard::auth::DockerCredentials;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

const DOCKER_HUB: &str = "docker.io";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DockerConfig {
    #[serde(default)]
    auths: HashMap<String, AuthEntry>,
    /// レジストリごとの credential helper
    #[serde(default)]
    cred_helpers: HashMap<String, String>,
    /// 既定の credential helper (例: "osxkeychain", "desktop")
    #[serde(default)]
    creds_store: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthEntry {
    /// Base64エンコードされた "username:password"
    auth: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CredentialResponse {
    username: String,
    secret: String,
}

/// レジストリ認証を管理
#[derive(Debug)]
pub struct RegistryAuth {
    config_path: PathBuf,
}

impl Default for RegistryAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryAuth {
    /// `$DOCKER_CONFIG/config.json`、なければ `~/.docker/config.json`
    pub fn new() -> Self {
        let config_dir = std::env::var("DOCKER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|h| h.join(".docker"))
                    .unwrap_or_else(|| PathBuf::from(".docker"))
            });

        Self {
            config_path: config_dir.join("config.json"),
        }
    }

    pub fn with_config_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// イメージ参照からレジストリの認証情報を取得
    ///
    /// config.json が無い、または該当エントリが無い場合は `Ok(None)`（匿名プッシュ）
    pub fn get_credentials(&self, image: &str) -> BuildResult<Option<DockerCredentials>> {
        let registry = registry_host(image);

        if !self.config_path.exists() {
            tracing::debug!("Docker config.json not found at {:?}", self.config_path);
            return Ok(None);
        }

        let config = self.load_docker_config(&registry)?;

        // 1. auths
        if let Some(entry) = lookup(&config.auths, &registry)
            && let Some(auth_b64) = &entry.auth
            && let Some(creds) = decode_auth(auth_b64, &registry)?
        {
            tracing::debug!("Found credentials in auths for {}", registry);
            return Ok(Some(creds));
        }

        // 2. credHelpers → credsStore の順に helper を試す
        let helper = lookup(&config.cred_helpers, &registry).or(config.creds_store.as_ref());
        if let Some(helper) = helper {
            tracing::debug!("Trying credential helper: {}", helper);
            match get_from_helper(helper, &registry) {
                Ok(Some(creds)) => return Ok(Some(creds)),
                Ok(None) => {}
                Err(e) => tracing::debug!("{}", e),
            }
        }

        tracing::debug!("No credentials found for {}", registry);
        Ok(None)
    }

    fn load_docker_config(&self, registry: &str) -> BuildResult<DockerConfig> {
        let auth_error = |message: String| BuildError::AuthFailed {
            registry: registry.to_string(),
            message,
        };

        let content = std::fs::read_to_string(&self.config_path)
            .map_err(|e| auth_error(format!("Failed to read config.json: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| auth_error(format!("Failed to parse config.json: {}", e)))
    }
}

/// イメージ参照からレジストリのホスト名を抽出
///
/// # Examples
/// - `ghcr.io/org/app` -> `ghcr.io`
/// - `localhost:5000/app` -> `localhost:5000`
/// - `myuser/app`, `nginx` -> `docker.io`
pub fn registry_host(image: &str) -> String {
    match image.split_once('/') {
        Some((first, _)) if first.contains('.') || first.contains(':') || first == "localhost" => {
            first.to_string()
        }
        _ => DOCKER_HUB.to_string(),
    }
}

/// config.json のキーは `https://ghcr.io` や `https://index.docker.io/v1/` の形でも書かれる
fn lookup<'a, V>(map: &'a HashMap<String, V>, registry: &str) -> Option<&'a V> {
    if let Some(v) = map.get(registry) {
        return Some(v);
    }

    map.iter()
        .find(|(key, _)| {
            let host = key
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .split('/')
                .next()
                .unwrap_or_default();
            host == registry || (registry == DOCKER_HUB && host == "index.docker.io")
        })
        .map(|(_, v)| v)
}

fn decode_auth(auth_b64: &str, registry: &str) -> BuildResult<Option<DockerCredentials>> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(auth_b64.trim())
        .map_err(|e| BuildError::AuthFailed {
            registry: registry.to_string(),
            message: format!("Failed to decode auth: {}", e),
        })?;

    let auth_str = String::from_utf8(decoded).map_err(|e| BuildError::AuthFailed {
        registry: registry.to_string(),
        message: format!("Invalid UTF-8 in auth: {}", e),
    })?;

    Ok(auth_str
        .split_once(':')
        .map(|(username, password)| DockerCredentials {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            serveraddress: Some(registry.to_string()),
            ..Default::default()
        }))
}

/// `docker-credential-<helper> get` を実行して認証情報を取得
fn get_from_helper(helper: &str, registry: &str) -> BuildResult<Option<DockerCredentials>> {
    let helper_cmd = format!("docker-credential-{}", helper);
    let auth_error = |message: String| BuildError::AuthFailed {
        registry: registry.to_string(),
        message,
    };

    let mut child = Command::new(&helper_cmd)
        .arg("get")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| auth_error(format!("Failed to run {}: {}", helper_cmd, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(registry.as_bytes()).ok();
    }

    let output = child
        .wait_with_output()
        .map_err(|e| auth_error(format!("Credential helper failed: {}", e)))?;

    // helper が認証情報を持っていない
    if !output.status.success() {
        tracing::debug!(
            "Credential helper returned error for {}: {}",
            registry,
            String::from_utf8_lossy(&output.stderr)
        );
        return Ok(None);
    }

    let response: CredentialResponse = serde_json::from_slice(&output.stdout).map_err(|e| {
        auth_error(format!(
            "Failed to parse credential helper response: {}",
            e
        ))
    })?;

    Ok(Some(DockerCredentials {
        username: Some(response.username),
        password: Some(response.secret),
        serveraddress: Some(registry.to_string()),
        ..Default::default()
    }))
}
