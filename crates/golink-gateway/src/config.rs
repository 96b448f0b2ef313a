use clap::{Parser, ValueEnum};
use golink_core::SubstitutionPolicy;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "GOLINK_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "GOLINK_STORAGE_BACKEND";
pub const DATABASE_URL_ENV: &str = "GOLINK_DATABASE_URL";
pub const PUBLIC_BASE_URL_ENV: &str = "GOLINK_PUBLIC_BASE_URL";
pub const SUBSTITUTION_POLICY_ENV: &str = "GOLINK_SUBSTITUTION_POLICY";
pub const LOG_FORMAT_ENV: &str = "GOLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_SQLITE_URL: &str = "sqlite://golink.db";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://go";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SubstitutionPolicyArg {
    #[value(name = "ignore-excess")]
    IgnoreExcess,
    #[value(name = "strict")]
    Strict,
}

impl From<SubstitutionPolicyArg> for SubstitutionPolicy {
    fn from(value: SubstitutionPolicyArg) -> Self {
        match value {
            SubstitutionPolicyArg::IgnoreExcess => SubstitutionPolicy::IgnoreExcess,
            SubstitutionPolicyArg::Strict => SubstitutionPolicy::Strict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "golink-gateway", about = "Shared go-link redirect service")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    /// Database connection string; defaults to a local SQLite file.
    #[arg(long, env = DATABASE_URL_ENV, required_if_eq("storage", "mysql"))]
    pub database_url: Option<String>,

    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    /// How to treat trailing path segments beyond the link's placeholders.
    #[arg(
        long,
        env = SUBSTITUTION_POLICY_ENV,
        value_enum,
        default_value_t = SubstitutionPolicyArg::IgnoreExcess
    )]
    pub substitution_policy: SubstitutionPolicyArg,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn sqlite_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_SQLITE_URL)
    }
}
