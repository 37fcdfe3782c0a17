//! `bazar`: operator console for a Nepali Bazar store file.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the same `market::Marketplace` the browser uses, but over a JSON
//! file instead of `localStorage`. The session (`currentUser`) is persisted
//! in that file too, so `bazar login` followed by `bazar pin` behaves like
//! logging in and clicking Pin in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Validation and permission failures print their user-facing notice and
//! exit non-zero. Command output goes to stdout; logs go to stderr.

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use market::file_store::JsonFileStore;
use market::image::{ImageUpload, sniff_mime};
use market::intake::{IntakeError, SellForm};
use market::permissions::DeleteError;
use market::pins::{PinError, PinOutcome};
use market::query::ListingQuery;
use market::users::AuthError;
use market::view::{CardAction, CardView, Page};
use market::{KvStore, MarketConfig, Marketplace, Notice, PinLimit, StoreError, ViewContext};
use mockable::{Clock, DefaultClock};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.notice())]
    Auth(#[from] AuthError),
    #[error("{}", .0.notice())]
    Delete(#[from] DeleteError),
    #[error("{}", .0.notice())]
    Intake(#[from] IntakeError),
    #[error("{}", .0.notice())]
    Pin(#[from] PinError),
    #[error("storage failed: {0}")]
    Store(#[from] StoreError),
    #[error("no listing with id `{0}`")]
    NotFound(String),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("cannot read image `{path}`: {source}")]
    ReadImage { path: PathBuf, source: io::Error },
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bazar", about = "Nepali Bazar classifieds console")]
struct Cli {
    /// JSON file holding the marketplace state.
    #[arg(long, env = "BAZAR_STORE", default_value = "bazar.json")]
    store: PathBuf,

    /// Maximum simultaneously pinned listings, or `unlimited`.
    #[arg(long, env = "BAZAR_PIN_LIMIT", default_value_t = PinLimit::default())]
    pin_limit: PinLimit,

    /// Listings per page for `list`.
    #[arg(long, env = "BAZAR_PAGE_SIZE", default_value_t = market::config::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the default accounts if no users exist yet.
    Seed,
    Login {
        username: String,
        password: String,
    },
    Logout,
    /// Print the logged-in user and role.
    Whoami,
    /// Active listings in featured order.
    List(ListArgs),
    /// Pinned listings shown in the featured strip.
    Hero,
    /// Full details of one listing.
    Show {
        id: String,
    },
    /// Post a new listing as the logged-in user (or guest).
    Post(PostArgs),
    Delete {
        id: String,
        /// Act from the "my listings" view, where sellers may delete their own ads.
        #[arg(long, default_value_t = false)]
        from_profile: bool,
    },
    Pin {
        id: String,
        /// When the pin limit is reached, unpin this listing first.
        #[arg(long)]
        replace: Option<String>,
    },
    Unpin {
        id: String,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Print every match instead of one page.
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Only the logged-in user's listings.
    #[arg(long, default_value_t = false)]
    mine: bool,

    #[arg(long)]
    query: Option<String>,

    #[arg(long)]
    category: Option<String>,

    /// Inclusive price range `MIN-MAX`; either side may be blank.
    #[arg(long)]
    price: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Args, Debug, Default)]
struct PostArgs {
    #[arg(long)]
    title: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "")]
    category: String,

    #[arg(long, default_value = "")]
    contact: String,

    #[arg(long, default_value = "")]
    location: String,

    #[arg(long, default_value = "")]
    price: String,

    /// Last day the listing is shown, `YYYY-MM-DD`.
    #[arg(long, default_value = "")]
    expiry: String,

    /// Local image file to embed; repeatable.
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Remote image URL; repeatable.
    #[arg(long = "image-url")]
    image_urls: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MarketConfig { pin_limit: cli.pin_limit, page_size: cli.page_size, ..MarketConfig::default() };
    let market = Marketplace::with_config(JsonFileStore::new(&cli.store), DefaultClock, config);
    tracing::debug!(store = %cli.store.display(), "opened store");

    let mut stdout = io::stdout().lock();
    match run(&market, cli.command, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run<S: KvStore, C: Clock>(market: &Marketplace<S, C>, command: Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Seed => {
            let seeded = market.ensure_default_users()?;
            writeln!(out, "{}", if seeded { "seeded default users" } else { "users already present" })?;
        }
        Command::Login { username, password } => {
            market.ensure_default_users()?;
            let actor = market.login(&username, &password)?;
            writeln!(out, "logged in as {} ({})", actor.username, role_label(actor.is_admin()))?;
        }
        Command::Logout => {
            market.logout()?;
            writeln!(out, "logged out")?;
        }
        Command::Whoami => {
            let actor = market.current_actor().ok_or(CliError::NotLoggedIn)?;
            writeln!(out, "{} ({})", actor.username, role_label(actor.is_admin()))?;
        }
        Command::List(args) => run_list(market, &args, out)?,
        Command::Hero => {
            for card in market.hero_cards() {
                writeln!(out, "{}", card_line(&card))?;
            }
        }
        Command::Show { id } => {
            let listing = market.listings().get(&id).ok_or_else(|| CliError::NotFound(id.clone()))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
        }
        Command::Post(args) => run_post(market, args, out)?,
        Command::Delete { id, from_profile } => {
            let view = if from_profile { ViewContext::MyListings } else { ViewContext::Browse };
            let actor = market.current_actor();
            if !market.delete(&id, actor.as_ref(), view)? {
                return Err(CliError::NotFound(id));
            }
            writeln!(out, "deleted {id}")?;
        }
        Command::Pin { id, replace } => {
            let actor = market.current_actor();
            let outcome = match (market.pin(&id, actor.as_ref()), replace) {
                (Err(PinError::LimitReached { .. }), Some(replaced)) => {
                    market.pin_replacing(&id, &replaced, actor.as_ref())?
                }
                (Err(PinError::LimitReached { limit, pinned }), None) => {
                    let ids: Vec<&str> = pinned.iter().map(|l| l.id.as_str()).collect();
                    tracing::warn!(limit, pinned = ?ids, "pin limit reached; pass --replace <id>");
                    return Err(PinError::LimitReached { limit, pinned }.into());
                }
                (result, _) => result?,
            };
            write_pin_outcome(out, &id, &outcome)?;
        }
        Command::Unpin { id } => {
            let actor = market.current_actor();
            let outcome = market.unpin(&id, actor.as_ref())?;
            write_pin_outcome(out, &id, &outcome)?;
        }
    }
    Ok(())
}

fn run_list<S: KvStore, C: Clock>(market: &Marketplace<S, C>, args: &ListArgs, out: &mut impl Write) -> Result<(), CliError> {
    let actor = market.current_actor();
    let view = if args.mine {
        if actor.is_none() {
            return Err(CliError::NotLoggedIn);
        }
        ViewContext::MyListings
    } else {
        ViewContext::Browse
    };
    let query = list_query(args);

    if args.all {
        let today = market.today();
        let placeholder = market.config().placeholder_image.as_str();
        for listing in market.search(view, &query, actor.as_ref()) {
            let card = market::view::card(&listing, actor.as_ref(), view, today, placeholder);
            writeln!(out, "{}", card_line(&card))?;
        }
        return Ok(());
    }

    let page = market.grid(view, &query, actor.as_ref(), args.page);
    for card in &page.items {
        writeln!(out, "{}", card_line(card))?;
    }
    writeln!(out, "{}", page_footer(&page))?;
    Ok(())
}

fn run_post<S: KvStore, C: Clock>(market: &Marketplace<S, C>, args: PostArgs, out: &mut impl Write) -> Result<(), CliError> {
    let uploads = args.images.iter().map(|path| load_upload(path)).collect::<Result<Vec<_>, _>>()?;
    let form = SellForm {
        title: args.title,
        description: args.description,
        category: args.category,
        contact: args.contact,
        location: args.location,
        price: args.price,
        expiry: args.expiry,
        image_urls: args.image_urls.join(","),
    };
    let actor = market.current_actor();
    let submission = market.submit(&form, &uploads, actor.as_ref())?;
    for warning in &submission.warnings {
        eprintln!("{warning}");
    }
    writeln!(out, "{} {}", market::intake::POSTED_NOTICE, submission.listing.id)?;
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn list_query(args: &ListArgs) -> ListingQuery {
    let mut query = ListingQuery::text(args.query.as_deref().unwrap_or_default());
    query.category = args.category.clone().filter(|c| !c.trim().is_empty());
    match &args.price {
        Some(range) => query.with_price_range(range),
        None => query,
    }
}

fn load_upload(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::ReadImage { path: path.to_owned(), source })?;
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let mime = sniff_mime(&file_name, &bytes);
    Ok(ImageUpload::new(&file_name, mime, bytes))
}

fn card_line(card: &CardView) -> String {
    let actions: Vec<&str> = card.actions.iter().copied().filter(|a| *a != CardAction::View).map(CardAction::label).collect();
    let mut line = format!("{}\t{}\t{}", card.id, card.display_title(), card.price);
    if !actions.is_empty() {
        line.push_str(&format!("\t[{}]", actions.join(", ")));
    }
    line
}

fn page_footer<T>(page: &Page<T>) -> String {
    format!("page {}/{} ({} listings)", page.page, page.page_count, page.total)
}

fn role_label(is_admin: bool) -> &'static str {
    if is_admin { "admin" } else { "user" }
}

fn write_pin_outcome(out: &mut impl Write, id: &str, outcome: &PinOutcome) -> Result<(), CliError> {
    match outcome {
        PinOutcome::Pinned => writeln!(out, "pinned {id}")?,
        PinOutcome::Unpinned => writeln!(out, "unpinned {id}")?,
        PinOutcome::Missing => return Err(CliError::NotFound(id.to_owned())),
    }
    Ok(())
}
