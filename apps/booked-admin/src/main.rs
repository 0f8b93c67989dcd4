//! Operator CLI: schema setup and user export.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use booked_core::ports::{Repositories, SystemClock};
use booked_core::services::{AccountService, UserExportRow};
use booked_infra::PostgresStore;
use booked_infra::database::{DatabaseConfig, connect, create_tables};

#[derive(Parser)]
#[command(name = "booked-admin")]
#[command(about = "Administrative tasks against the Booked database")]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Database URL. Defaults to DATABASE_URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create any missing tables
    InitDb,
    /// Print username, id and email of the given users
    ExportUsers {
        /// User ids, exported in this order
        #[arg(required = true)]
        ids: Vec<Uuid>,

        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

/// RFC 4180 field: quoted when it holds a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render(rows: &[UserExportRow], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
        ExportFormat::Csv => {
            let mut out = String::from("Username,ID,Email\n");
            for row in rows {
                out.push_str(&format!(
                    "{},{},{}\n",
                    csv_field(&row.username),
                    row.id,
                    csv_field(&row.email)
                ));
            }
            Ok(out)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Pool sizing still comes from the environment; the URL may be overridden.
    let mut config = DatabaseConfig::from_env().unwrap_or(DatabaseConfig {
        url: String::new(),
        max_connections: 5,
        min_connections: 1,
        connect_timeout: std::time::Duration::from_secs(10),
    });
    config.url = cli.database_url;

    let db = connect(&config).await.context("connecting to database")?;

    match cli.command {
        Commands::InitDb => {
            create_tables(&db).await.context("creating tables")?;
            tracing::info!("Schema is up to date");
        }
        Commands::ExportUsers { ids, format } => {
            let repos = Repositories::from_store(Arc::new(PostgresStore::new(db)));
            let accounts = AccountService::new(repos, Arc::new(SystemClock));

            let rows = accounts.export_users(&ids).await?;
            tracing::info!(count = rows.len(), "Exporting users");
            print!("{}", render(&rows, format)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_has_header_and_one_line_per_row() {
        let id = Uuid::new_v4();
        let rows = vec![UserExportRow {
            username: "alice".to_string(),
            id,
            email: "alice@example.com".to_string(),
        }];

        let csv = render(&rows, ExportFormat::Csv).unwrap();
        assert_eq!(csv, format!("Username,ID,Email\nalice,{id},alice@example.com\n"));
    }

    #[test]
    fn test_csv_quotes_separators_and_quotes() {
        let id = Uuid::new_v4();
        let rows = vec![UserExportRow {
            username: "smith, \"jj\" john".to_string(),
            id,
            email: "j@example.com".to_string(),
        }];

        let csv = render(&rows, ExportFormat::Csv).unwrap();
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(
            line,
            format!("\"smith, \"\"jj\"\" john\",{id},j@example.com")
        );
    }

    #[test]
    fn test_cli_parses_export_ids() {
        let id = Uuid::new_v4();
        let id_arg = id.to_string();
        let cli = Cli::try_parse_from([
            "booked-admin",
            "--database-url",
            "postgres://localhost/booked",
            "export-users",
            id_arg.as_str(),
            "--format",
            "csv",
        ])
        .unwrap();

        match cli.command {
            Commands::ExportUsers { ids, format } => {
                assert_eq!(ids, vec![id]);
                assert!(matches!(format, ExportFormat::Csv));
            }
            Commands::InitDb => panic!("wrong subcommand"),
        }
    }
}
