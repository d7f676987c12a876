//! Haus CLI - exercise the pricing and delivery core from a terminal.
//!
//! Commands:
//! - `haus quote <zip>` - Estimate delivery fee and lead time for a ZIP
//! - `haus price` - Compute a full order pricing breakdown

mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use haus_commerce::cart::{OptionSelection, PricingBreakdown, PricingInputs, TaxInput};
use haus_commerce::delivery::RateCard;
use haus_commerce::{Currency, Money, OptionCode, TaxRate};
use haus_geo::{DistanceSource, HttpDistanceSource, StaticDistanceTable};
use haus_quote::QuoteService;

/// Haus CLI - delivery quotes and order pricing
#[derive(Parser)]
#[command(name = "haus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate delivery fee and lead time for a ZIP code
    Quote(QuoteArgs),

    /// Compute a full order pricing breakdown
    Price(PriceArgs),
}

#[derive(Args)]
struct QuoteArgs {
    /// Destination ZIP code
    zip: String,

    /// Routing service base URL (uses the built-in demo table if unset)
    #[arg(long)]
    endpoint: Option<String>,

    /// Rate card TOML file (uses default rates if unset)
    #[arg(long)]
    rates: Option<PathBuf>,
}

#[derive(Args)]
struct PriceArgs {
    /// Base model price in cents
    #[arg(long)]
    base: i64,

    /// Option selection as code:unit_cents:quantity (repeatable)
    #[arg(long = "option")]
    options: Vec<String>,

    /// Destination ZIP code to quote delivery for
    #[arg(long, conflicts_with = "delivery")]
    zip: Option<String>,

    /// Delivery fee in cents (instead of quoting a ZIP)
    #[arg(long)]
    delivery: Option<i64>,

    /// Setup fee in cents
    #[arg(long, default_value_t = 0)]
    setup: i64,

    /// Tax rate in basis points, applied to base + options
    #[arg(long, conflicts_with = "tax")]
    tax_bps: Option<u32>,

    /// Precomputed tax amount in cents
    #[arg(long)]
    tax: Option<i64>,

    /// Discount in cents (amount off, entered as a positive number)
    #[arg(long, default_value_t = 0)]
    discount: i64,

    /// Currency code
    #[arg(long, default_value = "USD")]
    currency: String,

    /// Routing service base URL (uses the built-in demo table if unset)
    #[arg(long)]
    endpoint: Option<String>,

    /// Rate card TOML file (uses default rates if unset)
    #[arg(long)]
    rates: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let output = output::Output::new(cli.verbose, cli.json);

    let result = match cli.command {
        Commands::Quote(args) => run_quote(args, &output).await,
        Commands::Price(args) => run_price(args, &output).await,
    };

    if let Err(e) = result {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run_quote(args: QuoteArgs, output: &output::Output) -> Result<()> {
    let service = build_service(args.endpoint.as_deref(), args.rates.as_deref(), output)?;

    let spinner = output.spinner(&format!("Quoting delivery to {}...", args.zip));
    let quote = service.estimate(&args.zip).await;
    spinner.finish_and_clear();

    let quote = quote.with_context(|| format!("could not quote delivery to {}", args.zip))?;

    if output.is_json() {
        output.json(&quote);
        return Ok(());
    }

    output.header(&format!("Delivery to {}", args.zip));
    output.kv("Distance", &format!("{:.0} miles", quote.distance_miles));
    output.kv("Fee", &quote.fee.display());
    output.kv("Lead time", &quote.eta_display());
    Ok(())
}

async fn run_price(args: PriceArgs, output: &output::Output) -> Result<()> {
    let currency = Currency::from_code(&args.currency)
        .with_context(|| format!("unknown currency: {}", args.currency))?;

    let selections = args
        .options
        .iter()
        .map(|spec| parse_option(spec, currency))
        .collect::<Result<Vec<_>>>()?;

    let delivery = match (&args.zip, args.delivery) {
        (Some(zip), None) => {
            let service = build_service(args.endpoint.as_deref(), args.rates.as_deref(), output)?;
            let spinner = output.spinner(&format!("Quoting delivery to {}...", zip));
            let quote = service.estimate(zip).await;
            spinner.finish_and_clear();
            let quote = quote.with_context(|| format!("could not quote delivery to {}", zip))?;
            output.debug(&format!(
                "delivery to {}: {} ({})",
                zip,
                quote.fee.display(),
                quote.eta_display()
            ));
            quote.fee
        }
        (None, Some(cents)) => Money::new(cents, currency),
        (None, None) => Money::zero(currency),
        (Some(_), Some(_)) => unreachable!("clap rejects --zip with --delivery"),
    };

    let tax = match (args.tax_bps, args.tax) {
        (Some(bps), None) => TaxInput::Rate(TaxRate::from_bps(bps)),
        (None, Some(cents)) => TaxInput::Amount(Money::new(cents, currency)),
        (None, None) => TaxInput::Amount(Money::zero(currency)),
        (Some(_), Some(_)) => unreachable!("clap rejects --tax-bps with --tax"),
    };

    let breakdown = PricingBreakdown::compute(&PricingInputs {
        base: Money::new(args.base, currency),
        selections: &selections,
        delivery,
        setup: Money::new(args.setup, currency),
        tax,
        discount: Money::new(-args.discount.abs(), currency),
    })
    .context("could not price the order")?;

    if output.is_json() {
        output.json(&breakdown);
        return Ok(());
    }

    print_breakdown(&breakdown, output);
    Ok(())
}

fn print_breakdown(breakdown: &PricingBreakdown, output: &output::Output) {
    output.header("Pricing breakdown");
    output.kv("Base", &breakdown.base.display());
    for line in &breakdown.lines {
        output.kv(
            &format!("  {} x{}", line.code, line.quantity),
            &line.line_total.display(),
        );
    }
    output.kv("Options", &breakdown.options.display());
    output.kv("Delivery", &breakdown.delivery.display());
    output.kv("Setup", &breakdown.setup.display());
    output.kv("Tax", &breakdown.tax.display());
    if breakdown.has_discount() {
        output.kv("Discounts", &breakdown.discounts.display());
    }
    output.success(&format!("Total: {}", breakdown.total.display()));
}

/// Parse an option spec of the form `code:unit_cents:quantity`.
fn parse_option(spec: &str, currency: Currency) -> Result<OptionSelection> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        bail!("invalid option spec {:?}, expected code:unit_cents:quantity", spec);
    }
    let unit_cents: i64 = parts[1]
        .parse()
        .with_context(|| format!("invalid unit price in {:?}", spec))?;
    let quantity: i64 = parts[2]
        .parse()
        .with_context(|| format!("invalid quantity in {:?}", spec))?;

    Ok(OptionSelection {
        code: OptionCode::new(parts[0]),
        name: parts[0].to_string(),
        unit_price: Money::new(unit_cents, currency),
        quantity,
    })
}

/// Build a quote service from CLI flags.
fn build_service(
    endpoint: Option<&str>,
    rates_path: Option<&Path>,
    output: &output::Output,
) -> Result<QuoteService> {
    let rates = load_rates(rates_path)?;
    rates.validate().context("invalid rate card")?;

    let source: Arc<dyn DistanceSource> = match endpoint {
        Some(url) => {
            output.debug(&format!("using routing service at {}", url));
            Arc::new(HttpDistanceSource::new(url).context("could not build routing client")?)
        }
        None => {
            output.debug("using built-in demo distance table");
            Arc::new(demo_routes())
        }
    };

    Ok(QuoteService::new(source, rates))
}

/// Load a rate card from a TOML file, or use the defaults.
fn load_rates(path: Option<&Path>) -> Result<RateCard> {
    let Some(path) = path else {
        return Ok(RateCard::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rate card: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse rate card: {}", path.display()))
}

/// Demo distances from the Oregon City depot, by ZIP sectional prefix.
fn demo_routes() -> StaticDistanceTable {
    StaticDistanceTable::new().with_routes([
        ("970", 18.0),
        ("971", 24.0),
        ("972", 12.0),
        ("973", 48.0),
        ("974", 112.0),
        ("977", 152.0),
        ("980", 188.0),
        ("981", 174.0),
        ("945", 612.0),
        ("946", 604.0),
        ("950", 688.0),
        ("891", 966.0),
        ("850", 1_304.0),
        ("802", 1_238.0),
    ])
}
