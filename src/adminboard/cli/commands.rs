//! # CLI Layer
//!
//! One possible UI client for adminboard, not the application itself. Each
//! subcommand plays the part of a dashboard page: `list` is the list page,
//! `add`/`edit` fill in a form and submit it once, `show` is the detail view.
//!
//! This is the only layer that:
//! - Parses arguments
//! - Resolves the data directory
//! - Initialises logging
//! - Writes to stdout/stderr
//!
//! Handlers translate arguments into form inputs or filters, call
//! [`AdminApi`], and hand the returned `CmdResult` to `render`.

use super::render::{print_messages, render_config, render_list, render_record, Tabular};
use super::setup::{
    BlogArgs, BlogCommands, BlogEditArgs, Cli, Commands, DonationCommands, EventArgs,
    EventCommands, EventEditArgs, ProductArgs, ProductCommands, ProductEditArgs, UserCommands,
};
use adminboard::api::{AdminApi, CmdResult, ConfigAction};
use adminboard::error::{AdminError, Result};
use adminboard::forms::image::{BLOG_IMAGE_TYPES, PHOTO_TYPES};
use adminboard::forms::{
    check_image_upload, mime_from_path, BlogForm, DonationForm, EventForm, Form, ProductForm,
    UserForm, ValidationErrors,
};
use adminboard::model::{Blog, ContentBlock, Donation, Entity, Event, Product, User};
use adminboard::store::fs_backend::FsBackend;
use adminboard::store::Collection;
use adminboard::view::{
    BlogFilter, DateRange, DonationFilter, EventFilter, ListFilter, Paging, ProductFilter,
    UserFilter,
};
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

struct AppContext {
    api: AdminApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let mut ctx = AppContext {
        api: AdminApi::open(data_dir)?,
    };

    match cli.command {
        Commands::Products(cmd) => match cmd {
            ProductCommands::List { search } => handle_list::<Product, _>(
                &ctx,
                &ProductFilter {
                    search: search.unwrap_or_default(),
                },
                Paging::All,
            ),
            ProductCommands::Search { term } => handle_search(&ctx, &term),
            ProductCommands::Show { id } => handle_show::<Product>(&ctx, &id),
            ProductCommands::Add(args) => handle_product_add(&mut ctx, args),
            ProductCommands::Edit { id, fields } => handle_product_edit(&mut ctx, &id, fields),
            ProductCommands::Delete { id } => handle_delete::<Product>(&mut ctx, &id),
        },
        Commands::Events(cmd) => match cmd {
            EventCommands::List { search, pricing } => handle_list::<Event, _>(
                &ctx,
                &EventFilter {
                    search: search.unwrap_or_default(),
                    pricing: pricing.as_filter(),
                },
                Paging::All,
            ),
            EventCommands::Show { id } => handle_show::<Event>(&ctx, &id),
            EventCommands::Add(args) => handle_event_add(&mut ctx, args),
            EventCommands::Edit { id, fields } => handle_event_edit(&mut ctx, &id, fields),
            EventCommands::Delete { id } => handle_delete::<Event>(&mut ctx, &id),
        },
        Commands::Blogs(cmd) => match cmd {
            BlogCommands::List { search, from, to } => handle_list::<Blog, _>(
                &ctx,
                &BlogFilter {
                    search: search.unwrap_or_default(),
                    dates: DateRange::new(from, to),
                },
                Paging::All,
            ),
            BlogCommands::Show { id } => handle_show::<Blog>(&ctx, &id),
            BlogCommands::Add(args) => handle_blog_add(&mut ctx, args),
            BlogCommands::Edit { id, fields } => handle_blog_edit(&mut ctx, &id, fields),
            BlogCommands::Delete { id } => handle_delete::<Blog>(&mut ctx, &id),
        },
        Commands::Users(cmd) => match cmd {
            UserCommands::List { search, page } => {
                let filter = UserFilter {
                    search: search.unwrap_or_default(),
                };
                print_listing(ctx.api.list_users(&filter, page)?);
                Ok(())
            }
            UserCommands::Show { id } => handle_show::<User>(&ctx, &id),
            UserCommands::Add {
                name,
                email,
                joined,
            } => {
                let result = ctx.api.create(UserForm {
                    name,
                    email,
                    joined,
                })?;
                print_saved(result);
                Ok(())
            }
            UserCommands::Edit {
                id,
                name,
                email,
                joined,
            } => {
                let mut input: UserForm = edit_input(&ctx, &id)?;
                if let Some(name) = name {
                    input.name = name;
                }
                if let Some(email) = email {
                    input.email = email;
                }
                if joined.is_some() {
                    input.joined = joined;
                }
                submit_edit(&mut ctx, &id, input)
            }
            UserCommands::Delete { id } => handle_delete::<User>(&mut ctx, &id),
        },
        Commands::Donations(cmd) => match cmd {
            DonationCommands::List {
                search,
                donation_type,
                from,
                to,
                page,
            } => {
                let filter = DonationFilter {
                    search: search.unwrap_or_default(),
                    donation_type: donation_type.0,
                    dates: DateRange::new(from, to),
                };
                print_listing(ctx.api.list_donations(&filter, page)?);
                Ok(())
            }
            DonationCommands::Show { id } => handle_show::<Donation>(&ctx, &id),
            DonationCommands::Add {
                name,
                email,
                amount,
                date,
                message,
                donation_type,
            } => {
                let result = ctx.api.create(DonationForm {
                    name,
                    email,
                    amount,
                    date,
                    message,
                    donation_type,
                })?;
                print_saved(result);
                Ok(())
            }
            DonationCommands::Delete { id } => handle_delete::<Donation>(&mut ctx, &id),
        },
        Commands::Seed => {
            let result = ctx.api.seed()?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Config { key, value } => handle_config(&mut ctx, key, value),
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `--data-dir` (or `ADMINBOARD_HOME`, via clap), else the platform data dir.
fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "adminboard", "adminboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AdminError::Api("Could not determine a data directory".to_string()))
}

fn handle_list<T, F>(ctx: &AppContext, filter: &F, paging: Paging) -> Result<()>
where
    T: Collection + Tabular,
    F: ListFilter<T>,
{
    print_listing(ctx.api.list(filter, paging)?);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: &str) -> Result<()> {
    let hits = ctx.api.search_products(term);
    let view = adminboard::view::paginate(&hits, Paging::All);
    print!("{}", render_list(&view));
    Ok(())
}

fn handle_show<T: Collection + Tabular>(ctx: &AppContext, id: &Uuid) -> Result<()> {
    let result = ctx.api.view::<T>(id)?;
    for record in &result.affected {
        print!("{}", render_record(record));
    }
    Ok(())
}

fn handle_delete<T: Collection + Tabular>(ctx: &mut AppContext, id: &Uuid) -> Result<()> {
    let result = ctx.api.delete::<T>(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    print_messages(&result.messages);
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    Ok(())
}

fn handle_product_add(ctx: &mut AppContext, args: ProductArgs) -> Result<()> {
    check_image(ctx, "image", &args.image, PHOTO_TYPES)?;

    let mut input = ProductForm::default();
    input.title = args.title;
    input.description = args.description.unwrap_or_default();
    input.rating = args.rating;
    input.image = args.image;
    for (i, variant) in args.variants.iter().enumerate() {
        input
            .add_variant(variant)
            .map_err(|e| nested(&format!("variants[{}]", i), e))?;
    }

    print_saved(ctx.api.create(input)?);
    Ok(())
}

fn handle_product_edit(ctx: &mut AppContext, id: &Uuid, fields: ProductEditArgs) -> Result<()> {
    let mut input: ProductForm = edit_input(ctx, id)?;

    if let Some(title) = fields.title {
        input.title = title;
    }
    if let Some(description) = fields.description {
        input.description = description;
    }
    if let Some(rating) = fields.rating {
        input.rating = rating;
    }
    if let Some(image) = fields.image {
        check_image(ctx, "image", &image, PHOTO_TYPES)?;
        input.image = image;
    }
    for (position, variant) in &fields.replace {
        let index = position - 1;
        input
            .replace_variant(index, variant)
            .map_err(|e| nested(&format!("variants[{}]", index), e))?;
    }
    let mut removals = fields.remove.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    for position in removals {
        if input.remove_variant(position - 1).is_none() {
            return Err(ValidationErrors::single(
                "variants",
                format!("No variant at position {}", position),
            )
            .into());
        }
    }
    for variant in &fields.variants {
        let index = input.variants().len();
        input
            .add_variant(variant)
            .map_err(|e| nested(&format!("variants[{}]", index), e))?;
    }

    submit_edit(ctx, id, input)
}

fn handle_event_add(ctx: &mut AppContext, args: EventArgs) -> Result<()> {
    check_image(ctx, "image", &args.image, PHOTO_TYPES)?;

    let input = EventForm {
        title: args.title,
        days: args.days.into_iter().collect(),
        start_date: args.start_date,
        end_date: args.end_date,
        start_time: args.start_time,
        end_time: args.end_time,
        location: args.location,
        pricing_type: args.pricing,
        price: args.price,
        details: args.details,
        image: args.image,
    };
    print_saved(ctx.api.create(input)?);
    Ok(())
}

fn handle_event_edit(ctx: &mut AppContext, id: &Uuid, fields: EventEditArgs) -> Result<()> {
    let mut input: EventForm = edit_input(ctx, id)?;

    if let Some(title) = fields.title {
        input.title = title;
    }
    if !fields.days.is_empty() {
        input.days = fields.days.into_iter().collect();
    }
    input.start_date = fields.start_date.or(input.start_date);
    input.end_date = fields.end_date.or(input.end_date);
    input.start_time = fields.start_time.or(input.start_time);
    input.end_time = fields.end_time.or(input.end_time);
    if let Some(location) = fields.location {
        input.location = location;
    }
    if let Some(pricing) = fields.pricing {
        input.pricing_type = pricing;
    }
    if fields.price.is_some() {
        input.price = fields.price;
    }
    if let Some(details) = fields.details {
        input.details = details;
    }
    if let Some(image) = fields.image {
        check_image(ctx, "image", &image, PHOTO_TYPES)?;
        input.image = image;
    }

    submit_edit(ctx, id, input)
}

fn handle_blog_add(ctx: &mut AppContext, args: BlogArgs) -> Result<()> {
    check_image(ctx, "image", &args.image, BLOG_IMAGE_TYPES)?;

    let mut input = BlogForm {
        title: args.title,
        date: args.date,
        image: args.image,
        content: Vec::new(),
    };
    for (i, spec) in args.blocks.iter().enumerate() {
        let block = parse_block(spec);
        if let Some(image) = &block.image {
            check_image(ctx, &format!("content[{}].image", i), image, BLOG_IMAGE_TYPES)?;
        }
        input.add_block(block.text, block.image);
    }

    print_saved(ctx.api.create(input)?);
    Ok(())
}

fn handle_blog_edit(ctx: &mut AppContext, id: &Uuid, fields: BlogEditArgs) -> Result<()> {
    let mut input: BlogForm = edit_input(ctx, id)?;

    if let Some(title) = fields.title {
        input.title = title;
    }
    if fields.clear_date {
        input.date = None;
    } else if fields.date.is_some() {
        input.date = fields.date;
    }
    if let Some(image) = fields.image {
        check_image(ctx, "image", &image, BLOG_IMAGE_TYPES)?;
        input.image = image;
    }
    let mut removals = fields.remove.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    for position in removals {
        if input.remove_block(position - 1).is_none() {
            return Err(ValidationErrors::single(
                "content",
                format!("No content block at position {}", position),
            )
            .into());
        }
    }
    for spec in &fields.blocks {
        let block = parse_block(spec);
        if let Some(image) = &block.image {
            let field = format!("content[{}].image", input.content.len());
            check_image(ctx, &field, image, BLOG_IMAGE_TYPES)?;
        }
        input.add_block(block.text, block.image);
    }

    submit_edit(ctx, id, input)
}

/// The edit form for `id`, pre-populated from the stored record.
fn edit_input<F>(ctx: &AppContext, id: &Uuid) -> Result<F>
where
    F: Form,
    F::Output: Collection,
{
    let record = ctx
        .api
        .get::<F::Output>(id)
        .ok_or_else(|| AdminError::not_found(F::Output::KIND, *id))?;
    Ok(F::from_entity(&record.data))
}

fn submit_edit<F>(ctx: &mut AppContext, id: &Uuid, input: F) -> Result<()>
where
    F: Form,
    F::Output: Collection + Tabular,
{
    let result = ctx.api.update::<F>(id, move |form| *form = input)?;
    print_saved(result);
    Ok(())
}

/// `TEXT` or `TEXT|IMAGE`.
fn parse_block(spec: &str) -> ContentBlock {
    match spec.rsplit_once('|') {
        Some((text, image)) if !image.trim().is_empty() => ContentBlock {
            text: text.to_string(),
            image: Some(image.trim().to_string()),
        },
        Some((text, _)) => ContentBlock::text(text),
        None => ContentBlock::text(spec),
    }
}

/// Upload checks apply when the image names a local file. Other references
/// (URLs, data URIs) are stored as given.
fn check_image(ctx: &AppContext, field: &str, image: &str, allowed: &[&str]) -> Result<()> {
    let path = Path::new(image);
    if !path.is_file() {
        return Ok(());
    }
    let mime = mime_from_path(path).unwrap_or("application/octet-stream");
    let size = std::fs::metadata(path).map_err(AdminError::Io)?.len();
    check_image_upload(field, mime, size, allowed, ctx.api.settings().max_image_bytes)?;
    Ok(())
}

fn nested(prefix: &str, errors: ValidationErrors) -> AdminError {
    let mut all = ValidationErrors::new();
    all.nest(prefix, errors);
    AdminError::Validation(all)
}

fn print_saved<T: Tabular>(result: CmdResult<T>) {
    print_messages(&result.messages);
    for record in &result.affected {
        print!("{}", render_record(record));
    }
}

fn print_listing<T: Tabular>(result: CmdResult<T>) {
    print_messages(&result.messages);
    if let Some(view) = &result.listed {
        print!("{}", render_list(view));
    }
}
