//! Till command line
//!
//! Prices each SKU string argument and prints its total, or `-1` if the cart contains an
//! unknown SKU.
//!
//! Use `-c` to load a pricing file instead of the reference table
//! Use `-s` to override the tier strategy
//! Use `-r` to print an itemised receipt for each cart

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use till::{
    checkout::{Checkout, INVALID_CART},
    config::PricingConfig,
    solvers::TierStrategy,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Price carts of SKU codes
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Pricing file (YAML); the reference table is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tier resolution strategy, overriding the pricing file
    #[arg(short, long, value_enum)]
    strategy: Option<TierStrategy>,

    /// Print an itemised receipt for each cart
    #[arg(short, long)]
    receipt: bool,

    /// Carts to price, one string of single-character SKU codes each
    carts: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing()?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PricingConfig::from_path(path)?,
        None => PricingConfig::reference()?,
    };

    let currency = config.currency()?;
    let mut table = config.build()?;

    if let Some(strategy) = args.strategy {
        table = table.with_strategy(strategy);
    }

    let checkout = Checkout::new(&table);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for cart in &args.carts {
        if args.receipt {
            match checkout.receipt(cart) {
                Ok(receipt) => receipt.write_to(&mut out, currency)?,
                Err(err) => {
                    warn!(cart = %cart, error = %err, "rejected cart");
                    writeln!(out, "{INVALID_CART}")?;
                }
            }
        } else {
            writeln!(out, "{}", till::checkout::checkout(&table, cart))?;
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}
