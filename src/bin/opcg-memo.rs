//! opcg-memo - command-line lookups and memo drafting.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opcg_memo::compose::{check_length, LengthPolicy, PostDraft};
use opcg_memo::{archive, config, Color, OpcgMemo};

#[derive(Parser)]
#[command(name = "opcg-memo", version, about = "ONE PIECE CARD GAME card list lookups")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a card number, print the post and image URLs, and archive it
    Number {
        /// Card number, e.g. OP06-118
        card_no: String,
        /// Deck title (accepted, not shown in the post)
        #[arg(long, default_value = "")]
        deck_title: String,
        /// Closing comment line
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, default_value = config::DEFAULT_HASHTAG)]
        hashtag: String,
        /// Archive directory (defaults to the user data directory)
        #[arg(long)]
        archive_dir: Option<PathBuf>,
        /// Skip writing the archive file
        #[arg(long)]
        no_archive: bool,
    },
    /// List candidate cards by (partial) name and colors
    Search {
        name: String,
        /// Color filter, repeatable: red, green, blue, purple, black, yellow, mix
        #[arg(long = "color")]
        colors: Vec<Color>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let memo = OpcgMemo::builder().build()?;

    match cli.command {
        Commands::Number {
            card_no,
            deck_title,
            comment,
            hashtag,
            archive_dir,
            no_archive,
        } => {
            let lookup = memo
                .variants()
                .lookup(&card_no)
                .with_context(|| format!("lookup failed for {card_no}"))?;

            let text = PostDraft::from_lookup(&lookup)
                .deck_title(&deck_title)
                .comment(&comment)
                .hashtag(&hashtag)
                .render();
            let check = check_length(&text, LengthPolicy::NewlineStripped);

            if cli.json {
                let out = serde_json::json!({
                    "lookup": lookup,
                    "post": text,
                    "length": check,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("====== Post ======");
                println!("{text}");
                println!("------ Length (newlines excluded) ------");
                println!("{check}");

                println!("\n====== Image URLs ======");
                for (i, url) in lookup.image_urls().into_iter().enumerate() {
                    println!("[{}] {url}", i + 1);
                }
            }

            if !no_archive {
                let dir = archive_dir.unwrap_or_else(config::default_archive_dir);
                let path = archive::write_archive(&dir, &lookup.card_no, &lookup.card_name, &text)
                    .with_context(|| format!("could not archive to {}", dir.display()))?;
                eprintln!("Archived: {}", path.display());
            }
        }
        Commands::Search { name, colors } => {
            let candidates = memo.candidates().search(&name, &colors)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else if candidates.is_empty() {
                println!("No candidates for '{name}'");
            } else {
                for c in &candidates {
                    println!(
                        "{}  {}  {}",
                        c.card_no,
                        c.card_name,
                        c.thumb_url.as_deref().unwrap_or("-")
                    );
                }
            }
        }
    }

    Ok(())
}
