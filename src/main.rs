//! Payview main entry point
//!
//! Minimal terminal front end over the core data layer: loads config, picks
//! a transport, runs the initial load, applies an optional employee filter,
//! and prints the merged transaction view.

use anyhow::Context;
use clap::Parser;
use payview_config::Config;
use payview_core::Dashboard;
use payview_remote::{HttpTransport, MemoryTransport, TransportRef};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "payview")]
#[command(version = "0.1.0")]
#[command(about = "Browse and approve payment transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Serve a built-in sample dataset instead of calling the remote endpoint
    #[arg(long)]
    demo: bool,

    /// Show transactions for a single employee id
    #[arg(short, long)]
    employee: Option<String>,

    /// Approve a transaction by id before printing
    #[arg(long, value_name = "TRANSACTION_ID")]
    approve: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = if args.config.exists() {
        Config::load(args.config.clone()).context("failed to load configuration")?
    } else {
        Config::default()
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    )
    .init();

    let rt = Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let transport: TransportRef = if args.demo {
        log::info!("demo mode: serving the built-in sample dataset");
        Arc::new(MemoryTransport::sample())
    } else {
        log::info!("remote endpoint: {}", config.remote.base_url);
        let remote = HttpTransport::new(config.remote.base_url.clone());
        let remote = match &config.remote.token {
            Some(token) => remote.with_token(token.clone()),
            None => remote,
        };
        Arc::new(remote)
    };

    let mut dashboard = Dashboard::new(transport);
    dashboard.load_initial().await.context("initial load failed")?;

    if let Some(transaction_id) = &args.approve {
        dashboard
            .set_approval(transaction_id, true)
            .await
            .with_context(|| format!("failed to approve {}", transaction_id))?;
    }

    match &args.employee {
        Some(employee_id) => {
            dashboard
                .filter_by_employee(employee_id)
                .await
                .with_context(|| format!("failed to load transactions for {}", employee_id))?;
        }
        None => {
            while dashboard.has_more_transactions() {
                dashboard.load_more_transactions().await?;
            }
        }
    }

    if let Some(employees) = dashboard.employees() {
        println!("{} employees", employees.len());
    }

    match dashboard.transactions() {
        Some(rows) => {
            println!(
                "{:<10} {:<12} {:<24} {:<20} {:>10}  approved",
                "id", "date", "merchant", "employee", "amount"
            );
            for row in rows {
                let t = &row.transaction;
                println!(
                    "{:<10} {:<12} {:<24} {:<20} {:>10}  {}",
                    t.id,
                    t.date.to_string(),
                    t.merchant,
                    t.employee.full_name(),
                    t.amount.to_string(),
                    if row.approved { "yes" } else { "no" }
                );
            }
        }
        None => println!("No transactions"),
    }

    Ok(())
}
