//! CLI tool for indexing slide libraries and assembling proposal decks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rfp_builder::ProposalDeckBuilder;
use rfp_core::taxonomy::{BackendSection, PrimaryLabel};
use rfp_core::types::{parse_formatted_text, SlideContent};
use rfp_library::SlideLibraryManager;
use rfp_pptx::Pptx;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Index slide libraries, search them, and build proposal decks.
#[derive(Parser, Debug)]
#[command(name = "rfp-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a library directory and report what was indexed
    Index {
        /// Library root (theme folders containing .pptx slide files)
        library: PathBuf,
    },

    /// Search an indexed library by keyword
    Search {
        /// Library root
        library: PathBuf,

        /// Query text
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Restrict to one theme (case-insensitive)
        #[arg(short, long)]
        theme: Option<String>,

        /// Restrict to one primary label (snake_case, e.g. case_study)
        #[arg(long)]
        label: Option<String>,

        /// Restrict to one backend section (snake_case, e.g. delivery_model)
        #[arg(long)]
        section: Option<String>,
    },

    /// Print full library statistics
    Stats {
        /// Library root
        library: PathBuf,
    },

    /// Pick the best library slides for each proposal section
    Select {
        /// Library root
        library: PathBuf,

        /// Maximum slides per section
        #[arg(short, long, default_value = "5")]
        max_per_section: usize,

        /// Only these sections (snake_case, repeatable)
        #[arg(long)]
        section: Vec<String>,
    },

    /// Report a template's layouts and placeholders
    Analyze {
        /// Template .pptx file
        template: PathBuf,
    },

    /// Build a proposal deck from a JSON content file
    Build {
        /// JSON file mapping backend sections to slide content lists
        content: PathBuf,

        /// Output .pptx path
        #[arg(short, long, default_value = "proposal.pptx")]
        output: PathBuf,

        /// Deck title
        #[arg(long, default_value = "Proposal")]
        title: String,

        /// Deck subtitle
        #[arg(long)]
        subtitle: Option<String>,

        /// Start from an existing template instead of a blank deck
        #[arg(long)]
        template: Option<PathBuf>,

        /// Skip numbered section divider slides
        #[arg(long)]
        no_dividers: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Index { library } => {
            let summary = indexed_manager(&library)?.1;
            print_json(&summary)
        }
        Command::Search {
            library,
            query,
            limit,
            theme,
            label,
            section,
        } => {
            let label = label.as_deref().map(parse_label).transpose()?;
            let section = section.as_deref().map(parse_section).transpose()?;
            let (manager, _) = indexed_manager(&library)?;
            let results = manager.search(&query, limit, theme.as_deref(), label, section)?;
            print_json(&results)
        }
        Command::Stats { library } => {
            let (manager, _) = indexed_manager(&library)?;
            print_json(&manager.get_library_stats()?)
        }
        Command::Select {
            library,
            max_per_section,
            section,
        } => {
            let sections = section
                .iter()
                .map(|s| parse_section(s))
                .collect::<Result<Vec<_>>>()?;
            let (manager, _) = indexed_manager(&library)?;
            let filter = if sections.is_empty() {
                None
            } else {
                Some(sections.as_slice())
            };
            print_json(&manager.select_slides_for_proposal(filter, max_per_section)?)
        }
        Command::Analyze { template } => {
            let pptx = Pptx::open(&template)
                .with_context(|| format!("Failed to open {}", template.display()))?;
            print_json(&pptx.analyze(&template)?)
        }
        Command::Build {
            content,
            output,
            title,
            subtitle,
            template,
            no_dividers,
        } => build_deck(
            &content,
            &output,
            &title,
            subtitle.as_deref(),
            template.as_deref(),
            !no_dividers,
        ),
    }
}

fn indexed_manager(library: &std::path::Path) -> Result<(SlideLibraryManager, rfp_library::IndexSummary)> {
    log::debug!("Indexing library at {}", library.display());
    let mut manager = SlideLibraryManager::new(library);
    let summary = manager
        .index()
        .with_context(|| format!("Failed to index library at {}", library.display()))?;
    Ok((manager, summary))
}

/// One slide in the build content file. The body is simplified HTML-like
/// markup (`<b>`, `<i>`, `<u>`, `<br>`); the section comes from the map key.
#[derive(Debug, Deserialize)]
struct SlideInput {
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    speaker_notes: Option<String>,
    #[serde(default)]
    table_data: Option<Vec<Vec<String>>>,
}

impl SlideInput {
    fn into_content(self, section: BackendSection) -> SlideContent {
        let mut content = SlideContent::new(section, self.title);
        content.body_segments = self
            .body
            .as_deref()
            .map(parse_formatted_text)
            .unwrap_or_default();
        content.subtitle = self.subtitle;
        content.speaker_notes = self.speaker_notes;
        content.table_data = self.table_data;
        content
    }
}

fn build_deck(
    content_path: &std::path::Path,
    output: &std::path::Path,
    title: &str,
    subtitle: Option<&str>,
    template: Option<&std::path::Path>,
    include_dividers: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(content_path)
        .with_context(|| format!("Failed to read {}", content_path.display()))?;
    let inputs: BTreeMap<BackendSection, Vec<SlideInput>> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid content file {}", content_path.display()))?;
    let sections: BTreeMap<BackendSection, Vec<SlideContent>> = inputs
        .into_iter()
        .map(|(section, slides)| {
            let contents: Vec<SlideContent> =
                slides.into_iter().map(|s| s.into_content(section)).collect();
            (section, contents)
        })
        .collect();

    let mut builder = ProposalDeckBuilder::new();
    match template {
        Some(template) => {
            builder
                .create_from_template(template)
                .with_context(|| format!("Failed to open template {}", template.display()))?;
        }
        None => builder.create_blank()?,
    }

    let count = builder.build_full_proposal(Some(title), subtitle, &sections, include_dividers)?;
    let written = builder.save(output)?;
    eprintln!("Wrote {} slides to {}", count, written.display());
    print_json(&builder.get_build_summary())
}

fn parse_label(s: &str) -> Result<PrimaryLabel> {
    PrimaryLabel::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown label '{}'", s))
}

fn parse_section(s: &str) -> Result<BackendSection> {
    BackendSection::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown section '{}'", s))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
