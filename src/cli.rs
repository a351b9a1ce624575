use crate::demo::run_demo;
use crate::render::Output;
use clap::{Args, Parser, Subcommand};
use manhattan_realty::catalog::Catalog;
use manhattan_realty::config::AppConfig;
use manhattan_realty::deal::{execute_deal, DealParties};
use manhattan_realty::error::AppError;
use manhattan_realty::participants::{Broker, Buyer, Seller};
use manhattan_realty::property::Address;
use manhattan_realty::search::{PriceComparison, SearchContext, SearchStrategy};
use manhattan_realty::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "realty",
    about = "Browse, search, and close deals on a Manhattan property catalog",
    version
)]
struct Cli {
    /// Listing file to load instead of the configured catalog path
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Emit data as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every property in the catalog
    List,
    /// Show the property at one address
    View(ViewArgs),
    /// Run a search strategy over the properties around a center address
    Search {
        #[command(subcommand)]
        command: SearchCommand,
    },
    /// Close a deal on a property and print the transcript
    Deal(DealArgs),
    /// Walk through listing, deletion, editing, searching, and two deals (default command)
    Demo,
}

#[derive(Subcommand, Debug)]
enum SearchCommand {
    /// Properties with the given sold status
    Status {
        #[command(flatten)]
        range: RangeArgs,
        /// Match sold (true) or unsold (false) properties
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        sold: bool,
    },
    /// Properties whose total price compares to a target
    Price {
        #[command(flatten)]
        range: RangeArgs,
        /// Target total price
        #[arg(long)]
        target: f64,
        /// higher, lower, or equal
        #[arg(long)]
        comparison: PriceComparison,
    },
    /// Average total price of the properties in range
    Average {
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// Center address, e.g. 4,5
    #[arg(long, value_parser = parse_address)]
    center: Address,
    /// Search radius in blocks (defaults to REALTY_SEARCH_RADIUS)
    #[arg(long)]
    radius: Option<i32>,
}

#[derive(Args, Debug)]
pub(crate) struct ViewArgs {
    /// Address of the property, e.g. 4,5,1,1
    #[arg(long, value_parser = parse_address)]
    address: Address,
}

#[derive(Args, Debug)]
pub(crate) struct DealArgs {
    /// Address of the property being sold
    #[arg(long, value_parser = parse_address)]
    address: Address,
    #[arg(long)]
    seller: u32,
    #[arg(long)]
    buyer: u32,
    #[arg(long)]
    broker: u32,
    /// Extra service to add (evening, cleaning, moving, design); repeatable
    #[arg(long = "service")]
    services: Vec<String>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config)?;

    let source = cli.catalog.unwrap_or_else(|| config.catalog.source.clone());
    let mut catalog = Catalog::new();
    catalog.load_path(&source)?;
    info!(environment = ?config.environment, properties = catalog.len(), "catalog ready");

    let output = Output::new(cli.json);
    match cli.command.unwrap_or(Command::Demo) {
        Command::List => output.properties(&catalog.list_all()),
        Command::View(args) => match catalog.find(&args.address)? {
            Some(property) => output.property(&property),
            None => output.message(&format!("No property at {}", args.address)),
        },
        Command::Search { command } => {
            let (range, strategy) = match command {
                SearchCommand::Status { range, sold } => {
                    (range, SearchStrategy::by_status(sold))
                }
                SearchCommand::Price {
                    range,
                    target,
                    comparison,
                } => (range, SearchStrategy::by_price(target, comparison)?),
                SearchCommand::Average { range } => (range, SearchStrategy::average_price()),
            };
            let radius = range.radius.unwrap_or(config.search.default_radius);
            let outcome = SearchContext::new(strategy).search(&catalog, &range.center, radius)?;
            output.outcome(&outcome)
        }
        Command::Deal(args) => {
            let seller = Seller::new(args.seller);
            let buyer = Buyer::new(args.buyer);
            let broker = Broker::new(args.broker);
            let closed = execute_deal(
                &mut catalog,
                &args.address,
                &args.services,
                DealParties {
                    seller: &seller,
                    buyer: &buyer,
                    broker: &broker,
                },
            );
            match closed {
                Ok(receipt) => output.receipt(&receipt),
                Err(err) => {
                    if let Some(transcript) = err.transcript() {
                        output.transcript(transcript)?;
                    }
                    Err(err.into())
                }
            }
        }
        Command::Demo => run_demo(&mut catalog, config.search.default_radius),
    }
}

pub(crate) fn parse_address(raw: &str) -> Result<Address, String> {
    let coordinates = raw
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("failed to parse '{raw}' as comma separated integers ({err})"))?;
    Address::new(coordinates).map_err(|err| err.to_string())
}
