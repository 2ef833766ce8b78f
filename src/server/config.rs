use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use toml;
use url::Url;

use crate::error::MonarkError;

// Environment aliases kept for compatibility with the earlier deployments of
// the site; first non-empty value wins.
const SMTP_USER_ALIASES: &[&str] = &[
    "NEXT_PUBLIC_SMTP_USER",
    "SMTP_USER",
    "BREVO_SMTP_USER",
    "NEXT_PUBLIC_FROM_EMAIL",
    "FROM_EMAIL",
    "EMAIL_USER",
];
const SMTP_PASSWORD_ALIASES: &[&str] = &[
    "NEXT_PUBLIC_SMTP_PASSWORD",
    "SMTP_PASSWORD",
    "BREVO_SMTP_KEY",
    "BREVO_API_KEY",
    "SMTP_APP_PASSWORD",
    "EMAIL_PASSWORD",
    "GMAIL_APP_PASSWORD",
];
const SMTP_HOST_ALIASES: &[&str] = &["NEXT_PUBLIC_SMTP_HOST", "SMTP_HOST", "BREVO_SMTP_HOST"];
const SMTP_PORT_ALIASES: &[&str] = &["NEXT_PUBLIC_SMTP_PORT", "SMTP_PORT", "BREVO_SMTP_PORT"];
const ADMIN_EMAIL_ALIASES: &[&str] = &[
    "TO_EMAIL",
    "NEXT_PUBLIC_TO_EMAIL",
    "FROM_EMAIL",
    "NEXT_PUBLIC_FROM_EMAIL",
];
const FROM_EMAIL_ALIASES: &[&str] = &["NEXT_PUBLIC_FROM_EMAIL", "FROM_EMAIL", "SMTP_USER"];
const FROM_NAME_ALIASES: &[&str] = &["FROM_NAME"];
const SITE_URL_ALIASES: &[&str] = &["NEXT_PUBLIC_SITE_URL", "SITE_URL"];
const DEVELOPMENT_ALIASES: &[&str] = &["DEVELOPMENT", "NODE_ENV"];

const DEFAULT_SMTP_HOST: &str = "smtp-relay.brevo.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_ADMIN_EMAIL: &str = "service@monarkfx.com";
const DEFAULT_FROM_EMAIL: &str = "noreply@monarkfx.com";
const DEFAULT_FROM_NAME: &str = "Monark FX";
const DEFAULT_SITE_URL: &str = "https://monarkfx.com";

#[derive(Clone, Serialize, Deserialize)]
pub struct MonarkConfigCors {
    pub origin: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonarkConfigEmailSmtp {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonarkConfigEmailFile {
    pub path: String,
}

/// The `[email]` section of the config file. Every field is optional here;
/// gaps are filled from the environment alias chains (or defaults) by
/// `resolve_email_settings`.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonarkConfigEmail {
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub admin_email: Option<String>,
    pub site_url: Option<Url>,
    pub smtp: Option<MonarkConfigEmailSmtp>,
    pub file: Option<MonarkConfigEmailFile>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct MonarkConfig {
    pub host: String,
    pub port: u16,
    pub development: Option<bool>,
    pub cors: MonarkConfigCors,
    pub email: MonarkConfigEmail,
}

impl MonarkConfig {
    pub fn development_on(&self) -> bool {
        self.development.unwrap_or_else(|| {
            env_chain(DEVELOPMENT_ALIASES)
                .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "development"))
                .unwrap_or(false)
        })
    }
}

/// Fully-resolved email settings, computed once at startup and injected into
/// the dispatcher. After resolution, at least one of `smtp`/`file` is set.
#[derive(Clone, Debug)]
pub struct ResolvedEmailSettings {
    pub from_email: String,
    pub from_name: String,
    pub admin_email: String,
    pub site_url: String,
    pub smtp: Option<MonarkConfigEmailSmtp>,
    pub file: Option<MonarkConfigEmailFile>,
}

pub fn resolve_email_settings(
    config: &MonarkConfigEmail,
) -> Result<ResolvedEmailSettings, MonarkError> {
    let smtp = config.smtp.clone().or_else(smtp_from_env);
    let file = config.file.clone();

    if smtp.is_none() && file.is_none() {
        return Err(MonarkError::ConfigurationError {
            message: format!(
                "SMTP credentials missing. Add an [email.smtp] section to the config file, \
                 or set one of {} and one of {} in the environment \
                 (host defaults to {DEFAULT_SMTP_HOST}, port to {DEFAULT_SMTP_PORT}). \
                 An [email.file] section can be used instead for local development.",
                SMTP_USER_ALIASES.join("/"),
                SMTP_PASSWORD_ALIASES.join("/"),
            ),
        });
    }

    let site_url = config
        .site_url
        .as_ref()
        .map(|url| url.to_string())
        .or_else(|| env_chain(SITE_URL_ALIASES))
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

    Ok(ResolvedEmailSettings {
        from_email: config
            .from_email
            .clone()
            .or_else(|| env_chain(FROM_EMAIL_ALIASES))
            .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
        from_name: config
            .from_name
            .clone()
            .or_else(|| env_chain(FROM_NAME_ALIASES))
            .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
        admin_email: config
            .admin_email
            .clone()
            .or_else(|| env_chain(ADMIN_EMAIL_ALIASES))
            .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
        site_url: site_url.trim_end_matches('/').to_string(),
        smtp,
        file,
    })
}

fn smtp_from_env() -> Option<MonarkConfigEmailSmtp> {
    let smtp_username = env_chain(SMTP_USER_ALIASES)?;
    let smtp_password = env_chain(SMTP_PASSWORD_ALIASES)?;
    Some(MonarkConfigEmailSmtp {
        smtp_host: env_chain(SMTP_HOST_ALIASES).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
        smtp_port: env_chain(SMTP_PORT_ALIASES)
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT),
        smtp_username,
        smtp_password,
    })
}

/// Walk an alias chain; the first set, non-empty variable wins.
fn env_chain(aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|name| {
        env::var(name)
            .ok()
            .map(|value| clean_env_value(&value))
            .filter(|value| !value.is_empty())
    })
}

/// Values pasted into deployment dashboards routinely arrive with stray
/// whitespace or surrounding quotes; strip both before use.
fn clean_env_value(value: &str) -> String {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(trimmed);
    let trimmed = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(trimmed);
    trimmed.to_string()
}

pub fn config_to_toml(monark_config: MonarkConfig) -> Result<String, MonarkError> {
    Ok(toml::to_string(&monark_config)?)
}

pub fn default_server_config() -> MonarkConfig {
    MonarkConfig {
        host: "0.0.0.0".to_string(),
        port: 8080,
        development: None,
        cors: MonarkConfigCors {
            origin: "*".to_string(),
        },
        email: MonarkConfigEmail {
            from_email: Some(DEFAULT_FROM_EMAIL.to_string()),
            from_name: Some(DEFAULT_FROM_NAME.to_string()),
            admin_email: Some(DEFAULT_ADMIN_EMAIL.to_string()),
            site_url: None,
            smtp: Some(MonarkConfigEmailSmtp {
                smtp_host: DEFAULT_SMTP_HOST.to_string(),
                smtp_port: DEFAULT_SMTP_PORT,
                smtp_username: "your-brevo-smtp-user".to_string(),
                smtp_password: "your-brevo-api-key".to_string(),
            }),
            file: None,
        },
    }
}

pub fn read_config(config_path: &Path) -> Result<MonarkConfig, MonarkError> {
    let contents = fs::read_to_string(config_path).map_err(|err| MonarkError::ConfigurationError {
        message: err.to_string(),
    })?;
    match toml::from_str(&contents) {
        Ok(config) => Ok(config),
        Err(err) => Err(MonarkError::ConfigurationError {
            message: err.to_string(),
        }),
    }
}
