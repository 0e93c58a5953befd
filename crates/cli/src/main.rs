use clap::{Parser, Subcommand};
use client::{Client, SessionStore};

mod commands;
mod config;

use commands::{
    EmployeesCmd, ExpensesCmd, KindArg, ProductsCmd, RankArg, SuppliersCmd, SuppliesCmd,
};

#[derive(Debug, Parser)]
#[command(name = "postavka", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:7654).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the session file path.
    #[arg(long)]
    session_file: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in; the password is read from stdin.
    Login { email: String },
    /// Drop the stored session.
    Logout,
    /// Show the cached identity and its capabilities.
    Whoami,
    /// Register a user account; the password is read from stdin.
    Register {
        name: String,
        email: String,
        phone: String,
        /// Register as a future employee instead of an organizer.
        #[arg(long)]
        employee: bool,
    },
    /// Register an organization for the current user (one-time).
    RegisterOrganization {
        name: String,
        #[arg(value_enum)]
        kind: KindArg,
        address: String,
        inn: String,
        bank_details: String,
    },
    /// Print the organization's invite code.
    Linkcode,
    /// Join an organization using an invite code.
    Join {
        code: i64,
        #[arg(value_enum)]
        rank: RankArg,
    },
    #[command(subcommand)]
    Employees(EmployeesCmd),
    #[command(subcommand)]
    Products(ProductsCmd),
    #[command(subcommand)]
    Supplies(SuppliesCmd),
    #[command(subcommand)]
    Suppliers(SuppliersCmd),
    #[command(subcommand)]
    Expenses(ExpensesCmd),
    /// Role-appropriate dashboard counters.
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("POSTAVKA_LOG").unwrap_or_else(|_| "postavka=warn,client=warn".into()),
        )
        .init();

    let settings = config::load(args.config.as_deref(), args.base_url, args.session_file)?;
    let client = Client::new(settings.base_url, SessionStore::new(settings.session_file));
    client.restore();

    commands::run(&client, args.command).await?;
    Ok(())
}
