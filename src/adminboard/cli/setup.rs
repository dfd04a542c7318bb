use adminboard::forms::VariantForm;
use adminboard::model::{Availability, Day, DonationType, PricingType};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2025-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "adminboard", bin_name = "adminboard", version = get_version())]
#[command(
    about = "Back office for products, events, blog posts, users and donations",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the stores and config.json
    #[arg(long, global = true, env = "ADMINBOARD_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage products and their variants
    #[command(subcommand)]
    Products(ProductCommands),

    /// Manage events
    #[command(subcommand)]
    Events(EventCommands),

    /// Manage blog posts
    #[command(subcommand)]
    Blogs(BlogCommands),

    /// Manage users
    #[command(subcommand)]
    Users(UserCommands),

    /// Donation history
    #[command(subcommand)]
    Donations(DonationCommands),

    /// Import the sample users and donations into empty stores
    Seed,

    /// Get or set configuration values
    Config {
        /// Configuration key (e.g. users-page-size)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    #[command(alias = "ls")]
    List {
        /// Only products whose title contains TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Search product titles
    Search { term: String },
    /// Show one product with its variants
    Show { id: Uuid },
    /// Add a product
    Add(ProductArgs),
    /// Edit a product
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: ProductEditArgs,
    },
    /// Delete a product
    #[command(alias = "rm")]
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Rating from 0 to 5
    #[arg(long, default_value_t = 0.0)]
    pub rating: f64,

    /// Image file or reference
    #[arg(long)]
    pub image: String,

    /// Variant as size:color:price:mrp[:yes|no] (repeatable)
    #[arg(long = "variant", value_name = "SPEC", value_parser = parse_variant)]
    pub variants: Vec<VariantForm>,
}

#[derive(Args, Debug)]
pub struct ProductEditArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub rating: Option<f64>,

    #[arg(long)]
    pub image: Option<String>,

    /// Append a variant, size:color:price:mrp[:yes|no] (repeatable)
    #[arg(long = "variant", value_name = "SPEC", value_parser = parse_variant)]
    pub variants: Vec<VariantForm>,

    /// Replace the variant at position N, N=size:color:price:mrp[:yes|no]
    #[arg(long = "replace-variant", value_name = "N=SPEC", value_parser = parse_indexed_variant)]
    pub replace: Vec<(usize, VariantForm)>,

    /// Remove the variant at position N (1-based, repeatable)
    #[arg(long = "remove-variant", value_name = "N", value_parser = parse_position)]
    pub remove: Vec<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PricingChoice {
    All,
    Free,
    Paid,
}

impl PricingChoice {
    pub fn as_filter(self) -> Option<PricingType> {
        match self {
            PricingChoice::All => None,
            PricingChoice::Free => Some(PricingType::Free),
            PricingChoice::Paid => Some(PricingType::Paid),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List events
    #[command(alias = "ls")]
    List {
        /// Only events whose title or location contains TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        #[arg(long, value_enum, default_value_t = PricingChoice::All)]
        pricing: PricingChoice,
    },
    /// Show one event
    Show { id: Uuid },
    /// Add an event
    Add(EventArgs),
    /// Edit an event
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: EventEditArgs,
    },
    /// Delete an event
    #[command(alias = "rm")]
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
pub struct EventArgs {
    #[arg(long)]
    pub title: String,

    /// Weekday codes, e.g. mon,wed,fri
    #[arg(long = "days", value_delimiter = ',', value_name = "DAY")]
    pub days: Vec<Day>,

    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// HH:MM
    #[arg(long, value_parser = parse_time)]
    pub start_time: Option<NaiveTime>,

    /// HH:MM
    #[arg(long, value_parser = parse_time)]
    pub end_time: Option<NaiveTime>,

    #[arg(long)]
    pub location: String,

    #[arg(long, default_value = "free")]
    pub pricing: PricingType,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long, default_value = "")]
    pub details: String,

    #[arg(long)]
    pub image: String,
}

#[derive(Args, Debug)]
pub struct EventEditArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long = "days", value_delimiter = ',', value_name = "DAY")]
    pub days: Vec<Day>,

    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    #[arg(long, value_parser = parse_time)]
    pub start_time: Option<NaiveTime>,

    #[arg(long, value_parser = parse_time)]
    pub end_time: Option<NaiveTime>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub pricing: Option<PricingType>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub details: Option<String>,

    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum BlogCommands {
    /// List blog posts
    #[command(alias = "ls")]
    List {
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        /// Earliest post date (inclusive)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// Latest post date (inclusive)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Show one blog post with its content
    Show { id: Uuid },
    /// Add a blog post
    Add(BlogArgs),
    /// Edit a blog post
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: BlogEditArgs,
    },
    /// Delete a blog post
    #[command(alias = "rm")]
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
pub struct BlogArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Cover image file or reference
    #[arg(long)]
    pub image: String,

    /// Content block as TEXT or TEXT|IMAGE (repeatable)
    #[arg(long = "block", value_name = "TEXT")]
    pub blocks: Vec<String>,
}

#[derive(Args, Debug)]
pub struct BlogEditArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_parser = parse_date, conflicts_with = "clear_date")]
    pub date: Option<NaiveDate>,

    /// Remove the post date
    #[arg(long)]
    pub clear_date: bool,

    #[arg(long)]
    pub image: Option<String>,

    /// Append a content block, TEXT or TEXT|IMAGE (repeatable)
    #[arg(long = "block", value_name = "TEXT")]
    pub blocks: Vec<String>,

    /// Remove the content block at position N (1-based, repeatable)
    #[arg(long = "remove-block", value_name = "N", value_parser = parse_position)]
    pub remove: Vec<usize>,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users, one page at a time
    #[command(alias = "ls")]
    List {
        /// Only users whose name or email contains TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one user
    Show { id: Uuid },
    /// Add a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_parser = parse_date)]
        joined: Option<NaiveDate>,
    },
    /// Edit a user
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_parser = parse_date)]
        joined: Option<NaiveDate>,
    },
    /// Delete a user
    #[command(alias = "rm")]
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum DonationCommands {
    /// List donations, one page at a time
    #[command(alias = "ls")]
    List {
        /// Only donations whose donor name or email contains TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        /// Donation type, or "all"
        #[arg(
            long = "type",
            value_name = "TYPE",
            default_value = "all",
            value_parser = parse_type_filter
        )]
        donation_type: TypeFilter,

        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one donation
    Show { id: Uuid },
    /// Record a donation
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long = "type", value_name = "TYPE", default_value = "one-off donation")]
        donation_type: DonationType,
    },
    /// Delete a donation
    #[command(alias = "rm")]
    Delete { id: Uuid },
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| format!("invalid time '{}', expected HH:MM", s))
}

/// `--type` of the donations list: one type, or `None` for "all".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeFilter(pub Option<DonationType>);

fn parse_type_filter(s: &str) -> Result<TypeFilter, String> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(TypeFilter(None));
    }
    s.parse()
        .map(|t| TypeFilter(Some(t)))
        .map_err(|e| format!("{}", e))
}

/// `size:color:price:mrp[:yes|no]`. Only the shape is checked here; the
/// variant rules run when the form takes it.
pub fn parse_variant(s: &str) -> Result<VariantForm, String> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    if !(4..=5).contains(&parts.len()) {
        return Err(format!(
            "invalid variant '{}', expected size:color:price:mrp[:yes|no]",
            s
        ));
    }

    let number = |field: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| format!("invalid {} '{}' in variant '{}'", field, value, s))
    };

    Ok(VariantForm {
        size: Some(parts[0].parse().map_err(|e| format!("{}", e))?),
        color: Some(parts[1].parse().map_err(|e| format!("{}", e))?),
        price: number("price", parts[2])?,
        mrp: number("mrp", parts[3])?,
        available: match parts.get(4) {
            Some(v) => v.parse().map_err(|e| format!("{}", e))?,
            None => Availability::Yes,
        },
    })
}

/// Positions shown to the user start at 1.
fn parse_position(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(format!("invalid position '{}', positions start at 1", s)),
    }
}

fn parse_indexed_variant(s: &str) -> Result<(usize, VariantForm), String> {
    let (index, spec) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid replacement '{}', expected N=SPEC", s))?;
    Ok((parse_position(index)?, parse_variant(spec)?))
}
