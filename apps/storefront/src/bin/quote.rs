//! # Cart Quote Tool
//!
//! Prices a cart request against a catalog, going through the same
//! commands the front end uses.
//!
//! ## Usage
//! ```bash
//! cargo run -p vitrine-catalog --bin seed -- --out catalog.json
//! cargo run -p vitrine-storefront --bin quote -- --catalog catalog.json --request cart.json
//! ```
//!
//! ## Request Shape
//! ```text
//! {
//!   "lines": [
//!     { "product_id": "pizza", "quantity": 2,
//!       "selection": { "tamanho": ["media"], "adicionais": ["queijo"] } },
//!     { "product_id": "refrigerante" }
//!   ]
//! }
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::warn;
use vitrine_core::{Money, Selection};
use vitrine_storefront::commands::{cart, checkout};
use vitrine_storefront::{init_tracing, persistence, Session, StoreConfig};

#[derive(Debug, Parser)]
#[command(name = "quote", about = "Price a cart request against a catalog")]
struct Args {
    /// store.toml (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog JSON document; overrides the config
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Cart request JSON document
    #[arg(long)]
    request: PathBuf,

    /// Minimum order as displayed money ("R$ 20,00"); overrides the config
    #[arg(long)]
    minimum: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CartRequest {
    lines: Vec<RequestLine>,
}

#[derive(Debug, Deserialize)]
struct RequestLine {
    product_id: String,
    #[serde(default)]
    selection: Selection,
    #[serde(default = "one")]
    quantity: u32,
}

fn one() -> u32 {
    1
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = StoreConfig::load(args.config.clone()).context("loading store config")?;
    if let Some(path) = args.catalog {
        config.catalog.path = Some(path);
    }
    if let Some(minimum) = &args.minimum {
        config.store.minimum_order_cents = Money::parse(minimum).cents();
    }
    config.validate().context("validating store config")?;

    let raw = tokio::fs::read_to_string(&args.request)
        .await
        .with_context(|| format!("reading {}", args.request.display()))?;
    let request: CartRequest = serde_json::from_str(&raw).context("parsing cart request")?;

    let carts = persistence::for_config(&config);
    let session = Session::start(config, carts, None)
        .await
        .context("starting session")?;
    let (catalog, state, store) = (&session.catalog, &session.cart, &session.config);

    for line in request.lines {
        for _ in 0..line.quantity {
            if let Err(e) = cart::add_to_cart(
                catalog,
                state,
                store,
                line.product_id.clone(),
                Some(line.selection.clone()),
            )
            .await
            {
                warn!(product_id = %line.product_id, error = %e, "Line rejected");
                println!("✗ {}: {}", line.product_id, e.message);
                break;
            }
        }
    }

    let response = cart::get_cart(catalog, state, store).await?;
    println!();
    println!("{} ({})", store.config().store.name, store.store_id());
    println!("{}", "─".repeat(60));
    for line in &response.lines {
        println!(
            "{:<32} x{:<4} {:>10} {:>12}",
            line.name.as_deref().unwrap_or(&line.product_id),
            line.quantity,
            line.unit_price.formatted,
            line.line_total.formatted,
        );
    }
    println!("{}", "─".repeat(60));
    println!("{:<50} {:>12}", "TOTAL", response.totals.total.formatted);

    let status = checkout::checkout_status(catalog, state, store).await?;
    if status.can_checkout {
        println!("✓ Ready for checkout");
    } else {
        println!("✗ Not ready for checkout ({}% of minimum)", status.percent);
        for issue in &status.issues {
            println!("  - {}", serde_json::to_string(issue)?);
        }
    }

    Ok(())
}
