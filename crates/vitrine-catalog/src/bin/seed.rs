//! # Demo Catalog Generator
//!
//! Writes a small but realistic catalog document for development.
//!
//! ## Usage
//! ```bash
//! # Write ./catalog.json for store "demo"
//! cargo run -p vitrine-catalog --bin seed
//!
//! # Custom path and store
//! cargo run -p vitrine-catalog --bin seed -- --out ./data/catalog.json --store loja-centro
//! ```
//!
//! ## Generated Products
//! Covers every pricing shape the engine supports:
//! - Plain product with a "was" price (discount badge)
//! - Option-priced product (base zero, price comes from the size)
//! - Required single group with a surcharge option
//! - Required multiple group with min/max bounds
//! - Optional multiple group capped at a maximum
//! - Inactive product

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_catalog::{CatalogDocument, JsonFileCatalog};
use vitrine_core::{OptionGroup, Product, ProductOption};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Write a demo catalog document")]
struct Args {
    /// Output path
    #[arg(long, default_value = "catalog.json")]
    out: PathBuf,

    /// Store id written into the document
    #[arg(long, default_value = "demo")]
    store: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("╔════════════════════════════════════════╗");
    println!("║     Vitrine Demo Catalog Generator     ║");
    println!("╚════════════════════════════════════════╝");
    println!();

    let document = CatalogDocument {
        store_id: args.store.clone(),
        products: demo_products(),
    };

    document
        .write(&args.out)
        .await
        .with_context(|| format!("writing {}", args.out.display()))?;

    // Load it back so a broken demo never ships
    let catalog = JsonFileCatalog::open(&args.out)
        .await
        .context("validating the generated catalog")?;

    info!(path = %args.out.display(), store_id = %catalog.store_id(), "Catalog written");
    println!("✓ Wrote {} products to {}", document.products.len(), args.out.display());

    Ok(())
}

/// One product per pricing shape.
fn demo_products() -> Vec<Product> {
    let mut retired = Product::simple("moletom-2023", "Moletom 2023", 12990);
    retired.is_active = false;

    vec![
        Product::simple("camiseta-basica", "Camiseta Básica", 7990).with_previous_price(24990),
        Product::simple("pizza", "Pizza", 0)
            .with_group(
                OptionGroup::single("tamanho", "Tamanho", true)
                    .with_option(ProductOption::new("media", "Média", 3990))
                    .with_option(ProductOption::new("grande", "Grande", 4990)),
            )
            .with_group(
                OptionGroup::multiple("adicionais", "Adicionais", false, 0, Some(3))
                    .with_option(ProductOption::new("queijo", "Queijo extra", 500))
                    .with_option(ProductOption::new("bacon", "Bacon", 700))
                    .with_option(ProductOption::new("azeitona", "Azeitona", 300)),
            ),
        Product::simple("hamburguer", "Hambúrguer", 2500).with_group(
            OptionGroup::single("ponto", "Tamanho", true)
                .with_option(ProductOption::new("simples", "Simples", 0))
                .with_option(ProductOption::new("duplo", "Duplo", 500)),
        ),
        Product::simple("acai", "Açaí 500ml", 1800).with_group(
            OptionGroup::multiple("complementos", "Complementos", true, 2, Some(4))
                .with_option(ProductOption::new("granola", "Granola", 0))
                .with_option(ProductOption::new("banana", "Banana", 0))
                .with_option(ProductOption::new("leite-ninho", "Leite Ninho", 250))
                .with_option(ProductOption::new("nutella", "Nutella", 450)),
        ),
        Product::simple("refrigerante", "Refrigerante Lata", 600),
        retired,
    ]
}
