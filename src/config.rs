//! Server configuration via CLI args and environment variables.

use clap::Parser;
use peoplegraph_service::ServiceConfig;

/// HTTP facade over a people/cities graph.
#[derive(Parser, Debug, Clone)]
#[command(name = "peoplegraph-server", version, about)]
pub struct Config {
    /// Bind address.
    #[arg(long, default_value = "0.0.0.0", env = "PEOPLEGRAPH_HOST")]
    pub host: String,

    /// Bind port.
    #[arg(long, default_value_t = 3000, env = "EXPRESS_PORT")]
    pub port: u16,

    /// Neo4j Bolt URI (e.g. bolt://neo4j:7687). Omit for an in-memory store.
    #[arg(long, env = "NEO4J_URI")]
    pub neo4j_uri: Option<String>,

    /// Neo4j user.
    #[arg(long, default_value = "neo4j", env = "NEO4J_USER")]
    pub neo4j_user: String,

    /// Neo4j password.
    #[arg(long, default_value = "", env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: String,

    /// Seed for reproducible random people. Omit for non-deterministic values.
    #[arg(long, env = "PEOPLEGRAPH_FIXTURE_SEED")]
    pub fixture_seed: Option<u64>,

    /// CORS allowed origins (comma-separated). Empty for no CORS.
    #[arg(long, env = "PEOPLEGRAPH_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Log level.
    #[arg(long, default_value = "info", env = "PEOPLEGRAPH_LOG_LEVEL")]
    pub log_level: String,

    /// Log format: "pretty" or "json".
    #[arg(long, default_value = "pretty", env = "PEOPLEGRAPH_LOG_FORMAT")]
    pub log_format: String,
}

impl Config {
    /// Parses configuration from CLI args and env vars.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Extracts the service-layer subset.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            neo4j_uri: self.neo4j_uri.clone().filter(|uri| !uri.is_empty()),
            neo4j_user: self.neo4j_user.clone(),
            neo4j_password: self.neo4j_password.clone(),
            fixture_seed: self.fixture_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_defaults() {
        let config = Config::try_parse_from([
            "peoplegraph-server",
            "--port",
            "8080",
            "--neo4j-uri",
            "bolt://localhost:7687",
            "--cors-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);

        let service = config.service_config();
        assert_eq!(service.neo4j_uri.as_deref(), Some("bolt://localhost:7687"));
    }

    #[test]
    fn empty_uri_selects_memory_store() {
        let config =
            Config::try_parse_from(["peoplegraph-server", "--neo4j-uri", ""]).unwrap();
        assert!(config.service_config().neo4j_uri.is_none());
    }
}
