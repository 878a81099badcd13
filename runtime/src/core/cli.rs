use clap::Parser;

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_DATABASE_URL, ENV_HOST, ENV_PAGE_SIZE_DEFAULT, ENV_PAGE_SIZE_MAX, ENV_PORT,
};

#[derive(Parser)]
#[command(name = "jsonapi-demo")]
#[command(version, about = "JSON:API collection endpoint demo", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// SQLite database URL
    #[arg(long, env = ENV_DATABASE_URL)]
    pub database_url: Option<String>,

    /// Page size used when only page[number] is given
    #[arg(long, env = ENV_PAGE_SIZE_DEFAULT)]
    pub page_size_default: Option<u64>,

    /// Largest accepted page[size]
    #[arg(long, env = ENV_PAGE_SIZE_MAX)]
    pub page_size_max: Option<u64>,
}

/// CLI configuration values
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub database_url: Option<String>,
    pub page_size_default: Option<u64>,
    pub page_size_max: Option<u64>,
}

pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        database_url: cli.database_url,
        page_size_default: cli.page_size_default,
        page_size_max: cli.page_size_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "jsonapi-demo",
            "--port",
            "9000",
            "--page-size-max",
            "50",
            "--database-url",
            "sqlite://demo.db",
        ]);
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.page_size_max, Some(50));
        assert_eq!(cli.database_url.as_deref(), Some("sqlite://demo.db"));
    }
}
