use anyhow::{Context, Result};
use catalog_core::url::{position_from_query, query_with_position};
use catalog_core::{
    AnnotationStore, CatalogOptions, FileStorage, Storage, image_path, position_label,
    priority_images,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "catalog", about = "Page-flip catalog inspection tool", version)]
struct Cli {
    /// Catalog options JSON file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every book position with its kind, image and label
    Inspect {
        /// Also list the image file for each content page
        #[arg(long)]
        images: bool,
    },

    /// Compute the display mode and book size for a viewport
    Layout {
        /// Viewport width in pixels
        #[arg(long)]
        width: f32,

        /// Viewport height in pixels
        #[arg(long)]
        height: f32,

        /// Force mobile layout (otherwise derived from the width)
        #[arg(long)]
        mobile: bool,
    },

    /// Resolve a URL query string to a book position
    Resolve {
        /// Query string, e.g. "?pNo=5"
        query: String,

        /// Rewrite the query to point at this position
        #[arg(long)]
        set: Option<u32>,
    },

    /// Manage sticky notes in a viewer state file
    Notes {
        /// Viewer state file
        #[arg(short, long)]
        state: PathBuf,

        #[command(subcommand)]
        action: NotesAction,
    },
}

#[derive(Subcommand)]
enum NotesAction {
    /// List all notes by page
    List,

    /// Add a note to a content page
    Add {
        #[arg(long)]
        page: u32,

        #[arg(long, default_value = "20")]
        x: f32,

        #[arg(long, default_value = "20")]
        y: f32,

        #[arg(long, default_value = "")]
        text: String,

        #[arg(long, default_value = "yellow", value_enum)]
        color: ColorArg,
    },

    /// Delete a note
    Delete {
        #[arg(long)]
        page: u32,

        #[arg(long)]
        id: String,
    },

    /// Print the raw notes JSON
    Export,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Yellow,
    Pink,
    Blue,
    Green,
}

impl From<ColorArg> for &'static str {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Yellow => "yellow",
            ColorArg::Pink => "pink",
            ColorArg::Blue => "blue",
            ColorArg::Green => "green",
        }
    }
}

async fn load_options(path: Option<&Path>) -> Result<CatalogOptions> {
    let options = match path {
        Some(path) => CatalogOptions::load(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => CatalogOptions::default(),
    };
    options.validate()?;
    Ok(options)
}

fn inspect(options: &CatalogOptions, images: bool) {
    let book = &options.book;
    println!("Book:");
    println!("  Front cover pages: {}", book.front_cover_pages);
    println!("  Content pages: {}", book.content_pages);
    println!("  Back cover pages: {}", book.back_cover_pages);
    println!("  Total positions: {}", book.total_positions());
    println!();

    for pos in 1..=book.total_positions() {
        let kind = book.classify_position(pos);
        let label = position_label(book, pos);
        match book.position_to_image_index(pos) {
            Some(idx) if images => println!(
                "  {:>3}  {:<12} {:<10} {}",
                pos,
                format!("{:?}", kind),
                label.to_string(),
                image_path(&options.image_base_path, idx, &options.image_format)
            ),
            _ => println!("  {:>3}  {:<12} {}", pos, format!("{:?}", kind), label),
        }
    }
}

fn print_notes(store: &AnnotationStore) {
    if store.is_empty() {
        println!("No sticky notes");
        return;
    }
    for (page, note) in store.list_all() {
        let preview = note.text.lines().next().unwrap_or_default();
        println!(
            "  page {:>3}  {:<12} {:<7} ({:.0}, {:.0})  {}",
            page, note.id, note.color, note.x, note.y, preview
        );
    }
    println!("{} note(s)", store.len());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = load_options(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Inspect { images } => inspect(&options, images),

        Commands::Layout {
            width,
            height,
            mobile,
        } => {
            let mobile = mobile || options.layout.is_mobile_width(width);
            let layout = options.layout.compute(width, height, mobile);
            println!("Layout for {}x{}:", width, height);
            println!("  Display mode: {:?}", layout.display_mode);
            println!("  Book size: {}x{}", layout.width, layout.height);
        }

        Commands::Resolve { query, set } => {
            let book = &options.book;
            let pos = position_from_query(&query, book.total_positions());
            println!("Position: {}", pos);
            println!("Label: {}", position_label(book, pos));
            println!(
                "Preload order: {:?}",
                priority_images(book, pos, None, options.preload_range)
            );
            if let Some(target) = set {
                println!("Rewritten: {}", query_with_position(&query, target));
            }
        }

        Commands::Notes { state, action } => {
            let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&state));
            let mut store = AnnotationStore::load(storage);

            match action {
                NotesAction::List => print_notes(&store),
                NotesAction::Add {
                    page,
                    x,
                    y,
                    text,
                    color,
                } => {
                    if !options.book.is_content_position(page) {
                        anyhow::bail!("Position {} is not a content page", page);
                    }
                    let color: &'static str = color.into();
                    let id = store.add_with(page, x, y, text, color);
                    println!("Added {} on page {} → {}", id, page, state.display());
                }
                NotesAction::Delete { page, id } => {
                    if store.find(page, &id).is_none() {
                        anyhow::bail!("No note {} on page {}", id, page);
                    }
                    store.delete(page, &id);
                    println!("Deleted {} from page {}", id, page);
                }
                NotesAction::Export => println!("{}", store.to_json()?),
            }
        }
    }

    Ok(())
}
