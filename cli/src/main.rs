//! pdfstructure CLI - heading hierarchy inference for PDF layout dumps

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use pdf_structure::hierarchy::traverse_level_order;
use pdf_structure::render::{self, HeadingsOnlyVisitor, StructureStats};
use pdf_structure::title::DEFAULT_SLUG_LENGTH;
use pdf_structure::{
    title_slug, JsonFormat, JsonSource, MapperKind, ParserOptions, RenderOptions,
    StructuredDocument,
};

#[derive(Parser)]
#[command(name = "pdfstructure")]
#[command(version)]
#[command(about = "Infer the heading hierarchy of PDF layout dumps", long_about = None)]
struct Cli {
    /// Input layout dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Font size mapping strategy
    #[arg(long, value_enum, global = true, env = "PDFSTRUCTURE_MAPPER")]
    mapper: Option<Mapper>,

    /// Keep the default line margin instead of tuning it to the document
    #[arg(long, global = true)]
    no_retune: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write text and JSON renderings into a directory
    Convert {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Print the indented section tree
    Text {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only render sections above this depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Omit the title banner
        #[arg(long)]
        no_title: bool,
    },

    /// Print the section tree as JSON
    Json {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print headings only
    Outline {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only print headings above this depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// List headings level by level instead of in reading order
        #[arg(long)]
        by_level: bool,
    },

    /// Show document information and structure statistics
    Info {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mapper {
    /// Logarithmic steps around the body size (default)
    Log,
    /// Logarithmic steps with the older tuning
    LogLegacy,
    /// Equal steps on each side of the body size
    PivotLinear,
    /// Equal steps over the whole size range
    Linear,
}

impl From<Mapper> for MapperKind {
    fn from(mapper: Mapper) -> Self {
        match mapper {
            Mapper::Log => MapperKind::Log,
            Mapper::LogLegacy => MapperKind::LogLegacy,
            Mapper::PivotLinear => MapperKind::PivotLinear,
            Mapper::Linear => MapperKind::Linear,
        }
    }
}

/// Parser settings shared by all subcommands.
struct ParseSettings {
    mapper: Option<Mapper>,
    no_retune: bool,
}

impl ParseSettings {
    fn options(&self) -> ParserOptions {
        let mut options = ParserOptions::new();
        if let Some(mapper) = self.mapper {
            options = options.with_mapper(mapper.into());
        }
        if self.no_retune {
            options = options.fixed_layout();
        }
        options
    }

    fn parse(&self, input: &Path) -> Result<StructuredDocument, Box<dyn std::error::Error>> {
        log::info!("Parsing {}", input.display());
        let source = JsonSource::open(input)?;
        let doc = pdf_structure::parse_source_with_options(&source, self.options())?;
        Ok(doc)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let settings = ParseSettings {
        mapper: cli.mapper,
        no_retune: cli.no_retune,
    };

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => {
            cmd_convert(&settings, &input, output.as_deref()).map(|_| ())
        }
        Some(Commands::Text {
            input,
            output,
            max_depth,
            no_title,
        }) => cmd_text(&settings, &input, output.as_deref(), max_depth, no_title),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&settings, &input, output.as_deref(), compact),
        Some(Commands::Outline {
            input,
            max_depth,
            by_level,
        }) => cmd_outline(&settings, &input, max_depth, by_level),
        Some(Commands::Info { input, json }) => cmd_info(&settings, &input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&settings, &input, cli.output.as_deref()).map(|_| ())
            } else {
                println!("{}", "Usage: pdfstructure <FILE> [OUTPUT]".yellow());
                println!("       pdfstructure --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Base name for output files: the title slug, or the input stem.
fn output_name(doc: &StructuredDocument, input: &Path) -> String {
    doc.title()
        .map(|title| title_slug(title, DEFAULT_SLUG_LENGTH))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| {
            input
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned()
        })
}

fn write_or_print(output: Option<&Path>, content: &str) -> std::io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    settings: &ParseSettings,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let doc = settings.parse(input)?;
    let name = output_name(&doc, input);

    let text = render::to_text(&doc, &RenderOptions::default())?;
    fs::write(output_dir.join(format!("{}.txt", name)), &text)?;

    let json = render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join(format!("{}.json", name)), &json)?;

    println!("{}", "Output files:".green().bold());
    println!("  {} {}.txt", "├─".dimmed(), name);
    println!("  {} {}.json", "└─".dimmed(), name);

    Ok(output_dir)
}

fn cmd_text(
    settings: &ParseSettings,
    input: &Path,
    output: Option<&Path>,
    max_depth: Option<usize>,
    no_title: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.parse(input)?;

    let mut options = RenderOptions::new().with_title(!no_title);
    if let Some(depth) = max_depth {
        options = options.with_max_depth(depth);
    }

    let text = render::to_text(&doc, &options)?;
    write_or_print(output, &text)?;
    Ok(())
}

fn cmd_json(
    settings: &ParseSettings,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.parse(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_or_print(output, &json)?;
    Ok(())
}

fn cmd_outline(
    settings: &ParseSettings,
    input: &Path,
    max_depth: Option<usize>,
    by_level: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.parse(input)?;

    if by_level {
        for section in traverse_level_order(&doc, max_depth).filter(|s| s.is_heading()) {
            println!("{} {}", format!("{}", section.level).dimmed(), section.heading_text());
        }
        return Ok(());
    }

    let mut options = RenderOptions::new();
    if let Some(depth) = max_depth {
        options = options.with_max_depth(depth);
    }
    let text = render::to_text_with_visitor(&doc, &options, &mut HeadingsOnlyVisitor)?;
    print!("{}", text);
    Ok(())
}

fn cmd_info(
    settings: &ParseSettings,
    input: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.parse(input)?;
    let stats = StructureStats::from_document(&doc);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref filename) = doc.metadata.filename {
        println!("{}: {}", "Source".bold(), filename);
    }
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Pages".bold(), stats.page_count);

    if let Some(distribution) = doc.style_distribution() {
        println!();
        println!("{}", "Font Sizes".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Body".bold(), distribution.body_size());
        println!(
            "{}: {} - {}",
            "Range".bold(),
            distribution.min_found_size(),
            distribution.max_found_size()
        );
        println!("{}: {:.3}", "Line margin".bold(), distribution.line_margin());

        let kind = settings.options().mapper;
        if let Some(borders) = kind.build(distribution).borders() {
            let borders: Vec<String> = borders.iter().map(|b| format!("{:.2}", b)).collect();
            println!("{} ({}): {}", "Borders".bold(), kind, borders.join(", "));
        }
    }

    println!();
    println!("{}", "Structure Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Dangling".bold(), stats.dangling_count);
    println!("{}: {}", "Depth".bold(), stats.depth);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfstructure".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heading hierarchy inference for PDF layout dumps");
    println!();
    println!("License: MIT");
}
