//! usercrud - REST backend for the users resource
//!
//! Loads `.env`, connects to MySQL, ensures the `users` table and serves
//! `/api/users` until Ctrl+C or SIGTERM. Startup failures are logged and
//! exit with status 1.

use std::process::ExitCode;

use clap::Parser;

mod serve;
mod tracing_setup;

use serve::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(name = "usercrud", version, about = "Users CRUD REST server")]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Variables already set in the environment win over .env
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("failed to initialize logging: {:#}", e);
    }
    if let Err(e) = dotenv {
        tracing::warn!("Error loading .env file, using environment and defaults: {}", e);
    }

    match serve::run_serve(cli.serve).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use clap::CommandFactory;

    // Parsing reads the process environment; tests that touch it run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        Cli::try_parse_from(args.iter().copied())
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_local_setup() {
        let cli = parse(&["usercrud"]).unwrap();
        let server = cli.serve.server_config();
        assert_eq!(server.bind_addr.port(), 8080);
        assert_eq!(server.cors.allowed_origins.len(), 3);
        assert!(!server.cors.permissive);

        let db = cli.serve.database_config();
        assert_eq!(db.port, 3306);
        assert_eq!(db.name, "crud_app");
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "usercrud",
            "--port",
            "9000",
            "--db-host",
            "db.internal",
            "--cors-origin",
            "https://a.example,https://*.b.example",
        ])
        .unwrap();

        assert_eq!(cli.serve.server_config().bind_addr.port(), 9000);
        assert_eq!(cli.serve.database_config().host, "db.internal");
        assert_eq!(
            cli.serve.cors_origins,
            vec!["https://a.example", "https://*.b.example"]
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(parse(&["usercrud", "--port", "70000"]).is_err());
    }

    #[test]
    fn empty_env_values_fall_back_to_defaults() {
        let parsed = {
            let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            std::env::set_var("PORT", "");
            std::env::set_var("DB_HOST", "");
            let parsed = Cli::try_parse_from(["usercrud"]);
            std::env::remove_var("PORT");
            std::env::remove_var("DB_HOST");
            parsed
        };

        let cli = parsed.unwrap();
        assert_eq!(cli.serve.server_config().bind_addr.port(), 8080);
        assert_eq!(cli.serve.database_config().host, "localhost");
    }

    #[test]
    fn empty_flag_values_fall_back_to_defaults() {
        let cli = parse(&["usercrud", "--db-port", "", "--host", " "]).unwrap();
        assert_eq!(cli.serve.database_config().port, 3306);
        assert!(cli.serve.server_config().bind_addr.ip().is_unspecified());
    }

    #[test]
    fn listen_address_comes_from_bind_host() {
        let parsed = {
            let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            std::env::set_var("HOST", "my-laptop.local");
            std::env::set_var("BIND_HOST", "127.0.0.1");
            let parsed = Cli::try_parse_from(["usercrud"]);
            std::env::remove_var("HOST");
            std::env::remove_var("BIND_HOST");
            parsed
        };

        let addr = parsed.unwrap().serve.server_config().bind_addr;
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
    }
}
