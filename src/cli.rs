// 🧾 Command line front end
// clap command tree + handlers. Every write goes through the forms or the
// stores, so the CLI sees the same validation and persistence as the TUI.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use virtual_wardrobe::config::default_config_path;
use virtual_wardrobe::{
    clothing_view, overview, wishlist_view, Config, ClothingCategory, ClothingForm, ClothingItem,
    ClothingQuery, ClothingSortKey, ClothingStatus, ClothingStore, Filter, FormMode,
    KeyValueStore, LoadFallback, SortDirection, ValidationError, WishlistForm, WishlistItem,
    WishlistPriority, WishlistQuery, WishlistSortKey, WishlistStatus, WishlistStore,
};

#[derive(Parser, Debug)]
#[command(name = "wardrobe", version, about = "Track the clothes you own and the ones you want")]
pub struct Cli {
    /// Config file (defaults to <config dir>/virtual-wardrobe/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the config
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Start empty collections from the demo items
    #[arg(long, global = true)]
    pub seed: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage wardrobe items
    #[command(subcommand)]
    Clothing(ClothingCommand),

    /// Manage wishlist items
    #[command(subcommand)]
    Wishlist(WishlistCommand),

    /// Show or write the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Counts and totals for both collections
    Overview {
        #[arg(long)]
        json: bool,
    },

    /// Interactive terminal UI
    #[cfg(feature = "tui")]
    Browse,
}

#[derive(Subcommand, Debug)]
pub enum ClothingCommand {
    Add(ClothingFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: ClothingFields,
    },
    List(ClothingListArgs),
    Show { id: String },
    /// Flip clean <-> dirty
    Toggle { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum WishlistCommand {
    Add(WishlistFields),
    Edit {
        id: String,
        #[command(flatten)]
        fields: WishlistFields,
    },
    List(WishlistListArgs),
    Show { id: String },
    /// Flip pending <-> bought
    Toggle { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file + flags)
    Show,
    /// Write the effective configuration to the config file
    Init,
}

/// Raw form values. Left as text so the form reports bad input per field.
#[derive(Args, Debug, Default)]
pub struct ClothingFields {
    #[arg(long)]
    pub name: Option<String>,
    /// tshirt, shirt, pants, shorts, jacket, shoes, accessory, other
    #[arg(long)]
    pub category: Option<String>,
    /// clean or dirty
    #[arg(long)]
    pub status: Option<String>,
    /// less-than-a-year, one-to-three-years, more-than-three-years
    #[arg(long = "years")]
    pub years_of_use: Option<String>,
    /// Comma-separated
    #[arg(long)]
    pub tags: Option<String>,
    /// Hex color like #1d4ed8
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl ClothingFields {
    fn apply(self, form: &mut ClothingForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        if let Some(years) = self.years_of_use {
            form.years_of_use = years;
        }
        if let Some(tags) = self.tags {
            form.tags_text = tags;
        }
        if let Some(color) = self.color {
            form.color = color;
        }
        if let Some(notes) = self.notes {
            form.notes = notes;
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct WishlistFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Empty string clears the link
    #[arg(long)]
    pub link: Option<String>,
    /// Empty string clears the price
    #[arg(long = "price")]
    pub estimated_price: Option<String>,
    #[arg(long)]
    pub tags: Option<String>,
    /// low, medium or high
    #[arg(long)]
    pub priority: Option<String>,
    /// pending or bought
    #[arg(long)]
    pub status: Option<String>,
}

impl WishlistFields {
    fn apply(self, form: &mut WishlistForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(link) = self.link {
            form.link = link;
        }
        if let Some(price) = self.estimated_price {
            form.estimated_price = price;
        }
        if let Some(tags) = self.tags {
            form.tags_text = tags;
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
    }
}

#[derive(Args, Debug)]
pub struct ClothingListArgs {
    /// Name contains (case-insensitive)
    #[arg(long, default_value = "")]
    pub search: String,
    /// Some tag contains (case-insensitive)
    #[arg(long = "tag", default_value = "")]
    pub tag_search: String,
    #[arg(long, default_value = "all")]
    pub status: Filter<ClothingStatus>,
    #[arg(long, default_value = "all")]
    pub category: Filter<ClothingCategory>,
    /// name, category, status, yearsOfUse
    #[arg(long, default_value = "name")]
    pub sort: ClothingSortKey,
    #[arg(long)]
    pub desc: bool,
    #[arg(long)]
    pub json: bool,
}

impl ClothingListArgs {
    fn query(&self) -> ClothingQuery {
        ClothingQuery {
            search: self.search.clone(),
            tag_search: self.tag_search.clone(),
            status: self.status,
            category: self.category,
            sort_key: self.sort,
            direction: direction(self.desc),
        }
    }
}

#[derive(Args, Debug)]
pub struct WishlistListArgs {
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long = "tag", default_value = "")]
    pub tag_search: String,
    #[arg(long, default_value = "all")]
    pub status: Filter<WishlistStatus>,
    #[arg(long, default_value = "all")]
    pub priority: Filter<WishlistPriority>,
    /// name, priority, status, estimatedPrice
    #[arg(long, default_value = "name")]
    pub sort: WishlistSortKey,
    #[arg(long)]
    pub desc: bool,
    #[arg(long)]
    pub json: bool,
}

impl WishlistListArgs {
    fn query(&self) -> WishlistQuery {
        WishlistQuery {
            search: self.search.clone(),
            tag_search: self.tag_search.clone(),
            status: self.status,
            priority: self.priority,
            sort_key: self.sort,
            direction: direction(self.desc),
        }
    }
}

fn direction(desc: bool) -> SortDirection {
    if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Both stores over one backend
pub struct Session {
    pub clothing: ClothingStore,
    pub wishlist: WishlistStore,
}

impl Session {
    pub fn open(backend: Rc<dyn KeyValueStore>, fallback: LoadFallback) -> Self {
        Session {
            clothing: ClothingStore::open(Rc::clone(&backend), fallback),
            wishlist: WishlistStore::open(backend, fallback),
        }
    }
}

pub fn run(command: Option<Command>, session: &mut Session) -> Result<()> {
    match command {
        Some(Command::Clothing(cmd)) => run_clothing(cmd, &mut session.clothing),
        Some(Command::Wishlist(cmd)) => run_wishlist(cmd, &mut session.wishlist),
        Some(Command::Overview { json }) => print_overview(session, json),
        // handled by `run_config` before storage is opened
        Some(Command::Config(_)) => Ok(()),
        #[cfg(feature = "tui")]
        Some(Command::Browse) | None => {
            let mut app = crate::ui::App::new(session);
            crate::ui::run_ui(&mut app)
        }
        #[cfg(not(feature = "tui"))]
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

pub fn run_config(cmd: &ConfigCommand, config: &Config, path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show => println!("{}", serde_json::to_string_pretty(config)?),
        ConfigCommand::Init => {
            let path = path
                .map(Path::to_path_buf)
                .or_else(default_config_path)
                .ok_or_else(|| anyhow!("No config directory on this platform, pass --config"))?;
            config
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {}", path.display());
        }
    }
    Ok(())
}

fn run_clothing(cmd: ClothingCommand, store: &mut ClothingStore) -> Result<()> {
    match cmd {
        ClothingCommand::Add(fields) => {
            let mut form = ClothingForm::default();
            fields.apply(&mut form);
            let id = form
                .submit(store, FormMode::Create)
                .map_err(|errors| invalid(&errors))?;
            println!("✓ Added clothing item {}", id);
        }
        ClothingCommand::Edit { id, fields } => {
            let Some(item) = store.get(&id) else {
                bail!("No clothing item with id {}", id);
            };
            let mut form = ClothingForm::from_item(item);
            fields.apply(&mut form);
            form.submit(store, FormMode::Edit(&id))
                .map_err(|errors| invalid(&errors))?;
            println!("✓ Updated clothing item {}", id);
        }
        ClothingCommand::List(args) => {
            let view = clothing_view(store.items(), &args.query());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_clothing_table(&view);
                println!("\n{} of {} items", view.len(), store.len());
            }
        }
        ClothingCommand::Show { id } => {
            let item = store
                .get(&id)
                .ok_or_else(|| anyhow!("No clothing item with id {}", id))?;
            print_clothing_detail(item);
        }
        ClothingCommand::Toggle { id } => {
            if store.get(&id).is_none() {
                bail!("No clothing item with id {}", id);
            }
            store.toggle_status(&id);
            if let Some(item) = store.get(&id) {
                println!("✓ {} is now {}", item.name, item.status.label());
            }
        }
        ClothingCommand::Delete { id } => {
            let Some(name) = store.get(&id).map(|item| item.name.clone()) else {
                bail!("No clothing item with id {}", id);
            };
            store.delete(&id);
            println!("✓ Deleted {}", name);
        }
    }
    Ok(())
}

fn run_wishlist(cmd: WishlistCommand, store: &mut WishlistStore) -> Result<()> {
    match cmd {
        WishlistCommand::Add(fields) => {
            let mut form = WishlistForm::default();
            fields.apply(&mut form);
            let id = form
                .submit(store, FormMode::Create)
                .map_err(|errors| invalid(&errors))?;
            println!("✓ Added wishlist item {}", id);
        }
        WishlistCommand::Edit { id, fields } => {
            let Some(item) = store.get(&id) else {
                bail!("No wishlist item with id {}", id);
            };
            let mut form = WishlistForm::from_item(item);
            fields.apply(&mut form);
            form.submit(store, FormMode::Edit(&id))
                .map_err(|errors| invalid(&errors))?;
            println!("✓ Updated wishlist item {}", id);
        }
        WishlistCommand::List(args) => {
            let view = wishlist_view(store.items(), &args.query());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_wishlist_table(&view);
                println!("\n{} of {} items", view.len(), store.len());
            }
        }
        WishlistCommand::Show { id } => {
            let item = store
                .get(&id)
                .ok_or_else(|| anyhow!("No wishlist item with id {}", id))?;
            print_wishlist_detail(item);
        }
        WishlistCommand::Toggle { id } => {
            if store.get(&id).is_none() {
                bail!("No wishlist item with id {}", id);
            }
            store.toggle_status(&id);
            if let Some(item) = store.get(&id) {
                println!("✓ {} is now {}", item.name, item.status.label());
            }
        }
        WishlistCommand::Delete { id } => {
            let Some(name) = store.get(&id).map(|item| item.name.clone()) else {
                bail!("No wishlist item with id {}", id);
            };
            store.delete(&id);
            println!("✓ Deleted {}", name);
        }
    }
    Ok(())
}

/// Print field errors, then fail the command
fn invalid(errors: &[ValidationError]) -> anyhow::Error {
    eprintln!("❌ Form has errors:");
    for error in errors {
        eprintln!("   {}: {}", error.field, error.message);
    }
    anyhow!("{} invalid field(s)", errors.len())
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_clothing_table(items: &[Rc<ClothingItem>]) {
    println!(
        "{:<36}  {:<24}  {:<10}  {:<6}  {:<18}  TAGS",
        "ID", "NAME", "CATEGORY", "STATUS", "YEARS"
    );
    println!("{}", "─".repeat(110));
    for item in items {
        println!(
            "{:<36}  {:<24}  {:<10}  {:<6}  {:<18}  {}",
            item.id,
            truncate(&item.name, 24),
            item.category.label(),
            item.status.label(),
            item.years_of_use.label(),
            item.tags.join(", ")
        );
    }
}

fn print_wishlist_table(items: &[Rc<WishlistItem>]) {
    println!(
        "{:<36}  {:<24}  {:<8}  {:<8}  {:>10}  TAGS",
        "ID", "NAME", "PRIORITY", "STATUS", "PRICE"
    );
    println!("{}", "─".repeat(104));
    for item in items {
        println!(
            "{:<36}  {:<24}  {:<8}  {:<8}  {:>10}  {}",
            item.id,
            truncate(&item.name, 24),
            item.priority.label(),
            item.status.label(),
            format_price(item.estimated_price),
            item.tags.join(", ")
        );
    }
}

fn print_clothing_detail(item: &ClothingItem) {
    println!("👕 {}", item.name);
    println!("   id:           {}", item.id);
    println!("   category:     {}", item.category.label());
    println!("   status:       {}", item.status.label());
    println!("   years of use: {}", item.years_of_use.label());
    println!("   tags:         {}", item.tags.join(", "));
    println!("   colors:       {}", item.colors.join(", "));
    if let Some(notes) = &item.notes {
        println!("   notes:        {}", notes);
    }
}

fn print_wishlist_detail(item: &WishlistItem) {
    println!("🛍️  {}", item.name);
    println!("   id:       {}", item.id);
    println!("   priority: {}", item.priority.label());
    println!("   status:   {}", item.status.label());
    println!("   price:    {}", format_price(item.estimated_price));
    println!("   tags:     {}", item.tags.join(", "));
    if let Some(link) = &item.link {
        println!("   link:     {}", link);
    }
}

fn print_overview(session: &Session, json: bool) -> Result<()> {
    let stats = overview(session.clothing.items(), session.wishlist.items());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("👕 Wardrobe: {} items", stats.clothing_total);
    println!("   clean {} | dirty {}", stats.clean, stats.dirty);
    for (category, count) in &stats.by_category {
        println!("   {:<10} {}", category.label(), count);
    }
    println!();
    println!("🛍️  Wishlist: {} items", stats.wishlist_total);
    println!("   pending {} | bought {}", stats.pending, stats.bought);
    println!("   high priority pending: {}", stats.high_priority_pending);
    println!("   pending estimated total: {:.2}", stats.pending_estimated_total);
    Ok(())
}

pub fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string())
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
