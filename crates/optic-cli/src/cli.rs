//! Command-line surface
//!
//! Each invocation opens one store (hydrating it from the data directory),
//! runs a single operation and renders the result as text.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use optic_cart::{
    CartConfig, CartStore, DiagnosticSink, ItemId, KeyValueStore, LineItem, ProductInfo,
};
use std::path::{Path, PathBuf};

/// Persistent storefront cart
#[derive(Debug, Parser)]
#[command(name = "optic-cart", version, about = "Persistent storefront cart")]
pub(crate) struct Cli {
    /// Directory holding the durable cart slot
    #[arg(long, global = true, default_value = ".optic-cart")]
    pub(crate) data_dir: PathBuf,

    /// TOML config file
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Override the configured namespace
    #[arg(long, global = true)]
    pub(crate) namespace: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Add one unit of a product
    Add(ProductArgs),
    /// Remove a line item
    Remove {
        /// Item id
        id: String,
    },
    /// Set a line item's quantity (0 or less removes it)
    Set {
        /// Item id
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// List line items
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the total unit count
    Total,
    /// Print the id a product would be stored under
    Identify {
        /// Product name as displayed
        #[arg(long)]
        name: String,
        /// Price as displayed
        #[arg(long)]
        price: String,
    },
    /// Print the counter badge text
    Badge,
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product name as displayed
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Price as displayed
    #[arg(long)]
    pub(crate) price: Option<String>,
    /// Image URL
    #[arg(long)]
    pub(crate) image: Option<String>,
    /// Crossed-out price
    #[arg(long)]
    pub(crate) original_price: Option<String>,
}

impl From<ProductArgs> for ProductInfo {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            price: args.price,
            image: args.image,
            original_price: args.original_price,
        }
    }
}

/// Load config from `path` (defaults when absent), apply overrides, validate
pub(crate) fn load_config(path: Option<&Path>, namespace: Option<&str>) -> Result<CartConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CartConfig::default(),
    };
    if let Some(namespace) = namespace {
        config.namespace = namespace.to_string();
    }
    config.validate()?;
    Ok(config)
}

/// Run one command against `store`, returning the text to print
pub(crate) fn execute<S, D>(store: &mut CartStore<S, D>, command: Command) -> Result<String>
where
    S: KeyValueStore,
    D: DiagnosticSink,
{
    let output = match command {
        Command::Add(args) => {
            let id = store.add_product(args.into());
            let quantity = store.get(&id).map_or(0, |item| item.quantity);
            format!("{id} x{quantity}\n{}", store.badge())
        }
        Command::Remove { id } => {
            store.remove_item(&ItemId::new(id));
            store.badge()
        }
        Command::Set { id, quantity } => {
            store.update_quantity(&ItemId::new(id), quantity);
            store.badge()
        }
        Command::Clear => {
            store.clear();
            store.badge()
        }
        Command::List { json: true } => serde_json::to_string_pretty(&store.items())?,
        Command::List { json: false } => render_items(&store.items()),
        Command::Total => store.total_quantity().to_string(),
        Command::Identify { name, price } => store.identify(&name, &price).to_string(),
        Command::Badge => store.badge(),
    };
    Ok(output)
}

fn render_items(items: &[LineItem]) -> String {
    if items.is_empty() {
        return "cart is empty".to_string();
    }
    items.iter().map(render_item).collect::<Vec<_>>().join("\n")
}

fn render_item(item: &LineItem) -> String {
    let line = format!("{}  {} x{}  {}", item.id, item.name, item.quantity, item.price);
    match &item.original_price {
        Some(original) => format!("{line} (was {original})"),
        None => line,
    }
}
