// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Top-level commands work on repositories and links. The `datasette`
// group talks to the store; its six write commands are each declared once
// with their own options and then lowered into a single StoreInvocation,
// so one handler serves all of them.
//
// Environment variables are wired in here (clap's `env` attribute) and
// nowhere else.
// =============================================================================

use crate::links::DEFAULT_IMPORTER;
use crate::store::{StoreAction, StoreConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "rb",
    version,
    about = "Repository benchmarking tool to analyze and compare code repositories",
    long_about = "rb surveys repositories, harvests GitHub repository links from READMEs, \
                  imports them with an external importer, and publishes rows to a Datasette store."
)]
pub struct Cli {
    /// Diagnostics filter written to stderr (e.g. "info", "repo_bench=debug")
    #[arg(long, global = true, env = "RB_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new repository to the benchmark database
    ///
    /// Example: rb survey https://github.com/skydoves/landscapist
    Survey {
        /// GitHub URL or local path
        location: String,
    },

    /// List all repositories in the benchmark database
    ListRepos {
        /// Filter repositories by keyword
        #[arg(long = "filter")]
        filter_term: Option<String>,
    },

    /// View detailed information about a specific repository
    Inspect {
        repo_name: String,

        /// Show detailed statistics
        #[arg(long)]
        stats: bool,

        /// Show repository embeddings
        #[arg(long)]
        embeddings: bool,
    },

    /// Print the GitHub repository links in a repository's README as JSON
    ///
    /// Example: rb extract-links ./my-awesome-list > links.json
    ExtractLinks {
        /// GitHub URL or local path
        location: String,
    },

    /// Import every repository listed in a JSON file of GitHub URLs
    ///
    /// Example: rb process-links links.json --db github.db
    ProcessLinks {
        /// File containing a JSON array of URLs
        json_path: PathBuf,

        /// Path to the SQLite database the importer writes to
        #[arg(long, default_value = "github.db")]
        db: PathBuf,

        /// Importer command line; "repos <db> -r <owner/repo>" is appended
        #[arg(long, default_value = DEFAULT_IMPORTER)]
        importer: String,

        /// Print per-repository outcomes as JSON when done
        #[arg(long)]
        json: bool,
    },

    /// Work with a Datasette instance
    #[command(subcommand)]
    Datasette(DatasetteCommand),
}

/// Where the store lives and how to authenticate
#[derive(Args, Debug, Clone)]
pub struct Connection {
    /// Datasette root URL
    #[arg(long, env = "DATASETTE_ENDPOINT", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API token (normally taken from the environment)
    #[arg(long, env = "DATASETTE_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Connection {
    pub fn into_config(self) -> StoreConfig {
        StoreConfig::new(self.base_url, self.token).with_timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(Args, Debug, Clone)]
pub struct TableTarget {
    /// Database name
    #[arg(long)]
    pub database: String,

    /// Table name
    #[arg(long)]
    pub table: String,
}

#[derive(Args, Debug, Clone)]
pub struct RowTarget {
    #[command(flatten)]
    pub table: TableTarget,

    /// Primary key value(s); comma-separated for compound keys
    #[arg(long, required = true, value_delimiter = ',')]
    pub pks: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PayloadFile {
    /// JSON file with the request body
    #[arg(long)]
    pub payload_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReturnRows {
    /// Ask the store to return the affected rows
    #[arg(long = "return")]
    pub return_rows: bool,
}

#[derive(Subcommand, Debug)]
pub enum DatasetteCommand {
    /// Create an API token with `datasette create-token`
    GetAuthToken {
        /// Actor id the token is issued for
        #[arg(long, env = "DATASETTE_USERNAME", default_value = "root")]
        username: String,

        /// Secret the Datasette instance signs tokens with
        #[arg(long, env = "DATASETTE_SECRET", hide_env_values = true)]
        secret: Option<String>,
    },

    /// Create a table from a JSON definition
    CreateTable {
        /// Database name
        #[arg(long)]
        database: String,
        #[command(flatten)]
        payload: PayloadFile,
        #[command(flatten)]
        connection: Connection,
    },

    /// Insert rows into a table
    InsertRows {
        #[command(flatten)]
        target: TableTarget,
        #[command(flatten)]
        payload: PayloadFile,
        #[command(flatten)]
        returning: ReturnRows,
        #[command(flatten)]
        connection: Connection,
    },

    /// Insert rows, replacing ones whose primary key already exists
    UpsertRows {
        #[command(flatten)]
        target: TableTarget,
        #[command(flatten)]
        payload: PayloadFile,
        #[command(flatten)]
        returning: ReturnRows,
        #[command(flatten)]
        connection: Connection,
    },

    /// Update a single row
    UpdateRow {
        #[command(flatten)]
        target: RowTarget,
        #[command(flatten)]
        payload: PayloadFile,
        #[command(flatten)]
        returning: ReturnRows,
        #[command(flatten)]
        connection: Connection,
    },

    /// Delete a single row
    DeleteRow {
        #[command(flatten)]
        target: RowTarget,
        #[command(flatten)]
        connection: Connection,
    },

    /// Drop a table (the store ignores the request without --confirm)
    DropTable {
        #[command(flatten)]
        target: TableTarget,
        /// Confirm the drop
        #[arg(long)]
        confirm: bool,
        #[command(flatten)]
        connection: Connection,
    },
}

/// One store write, whatever subcommand it came from
#[derive(Debug, Clone)]
pub struct StoreInvocation {
    pub action: StoreAction,
    pub database: String,
    pub table: Option<String>,
    pub pks: Vec<String>,
    pub payload_file: Option<PathBuf>,
    pub return_rows: bool,
    pub confirm: bool,
    pub connection: Connection,
}

impl StoreInvocation {
    fn new(action: StoreAction, database: String, connection: Connection) -> Self {
        Self {
            action,
            database,
            table: None,
            pks: Vec::new(),
            payload_file: None,
            return_rows: false,
            confirm: false,
            connection,
        }
    }

    fn table(mut self, target: TableTarget) -> Self {
        self.database = target.database;
        self.table = Some(target.table);
        self
    }

    fn row(mut self, target: RowTarget) -> Self {
        self.pks = target.pks;
        self.table(target.table)
    }

    fn payload(mut self, payload: PayloadFile) -> Self {
        self.payload_file = Some(payload.payload_file);
        self
    }

    fn returning(mut self, returning: ReturnRows) -> Self {
        self.return_rows = returning.return_rows;
        self
    }
}

impl DatasetteCommand {
    // Lowers a write subcommand into the shared invocation shape
    //
    // Returns: None for commands that don't talk to the store API
    pub fn into_invocation(self) -> Option<StoreInvocation> {
        let invocation = match self {
            DatasetteCommand::GetAuthToken { .. } => return None,
            DatasetteCommand::CreateTable {
                database,
                payload,
                connection,
            } => StoreInvocation::new(StoreAction::CreateTable, database, connection).payload(payload),
            DatasetteCommand::InsertRows {
                target,
                payload,
                returning,
                connection,
            } => StoreInvocation::new(StoreAction::InsertRows, String::new(), connection)
                .table(target)
                .payload(payload)
                .returning(returning),
            DatasetteCommand::UpsertRows {
                target,
                payload,
                returning,
                connection,
            } => StoreInvocation::new(StoreAction::UpsertRows, String::new(), connection)
                .table(target)
                .payload(payload)
                .returning(returning),
            DatasetteCommand::UpdateRow {
                target,
                payload,
                returning,
                connection,
            } => StoreInvocation::new(StoreAction::UpdateRow, String::new(), connection)
                .row(target)
                .payload(payload)
                .returning(returning),
            DatasetteCommand::DeleteRow { target, connection } => {
                StoreInvocation::new(StoreAction::DeleteRow, String::new(), connection).row(target)
            }
            DatasetteCommand::DropTable {
                target,
                confirm,
                connection,
            } => {
                let mut invocation =
                    StoreInvocation::new(StoreAction::DropTable, String::new(), connection).table(target);
                invocation.confirm = confirm;
                invocation
            }
        };
        Some(invocation)
    }
}
