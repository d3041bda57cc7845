//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{HarvestError, Result};
use crate::importer::{import_by_doi, import_by_pmcid};
use crate::json::{load_json, save_json};
use crate::render::render_article;
use crate::types::Article;

/// PMC Harvester - Import scientific articles from PubMed Central.
#[derive(Parser)]
#[command(name = "pmc-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an article by PMCID or DOI and save it as JSON.
    Import {
        /// Article identifier (e.g., PMC3592458, or a DOI with --doi)
        id: String,

        /// Treat the identifier as a DOI and resolve it via E-utilities
        #[arg(long)]
        doi: bool,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a saved article record to sentence-annotated HTML.
    Render {
        /// Path to a JSON article record produced by `import`
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import { id, doi, output } => import_command(&id, doi, output.as_deref()),
        Commands::Render { input, output } => render_command(&input, output.as_deref()),
    }
}

/// Execute the import command.
fn import_command(id: &str, is_doi: bool, output: Option<&Path>) -> Result<()> {
    // Validate output directory exists (if specified) before downloading
    if let Some(output_dir) = output {
        if !output_dir.exists() {
            return Err(HarvestError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", output_dir.display()),
            )));
        }
        if !output_dir.is_dir() {
            return Err(HarvestError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
    }

    println!(
        "{} {}",
        style("Importing").bold(),
        style(id).cyan()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );

    pb.set_message("Fetching article XML...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = if is_doi {
        import_by_doi(id)
    } else {
        import_by_pmcid(id)
    };
    let article = match result {
        Ok(article) => article,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving JSON...");

    print_article_summary(&article);

    let output_path = match save_json(&article, output) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

fn print_article_summary(article: &Article) {
    if let Some(title) = article.titles.first() {
        println!("  Title: {}", style(title).green());
    }
    if !article.pmc.is_empty() {
        println!("  PMCID: PMC{}", article.pmc);
    }
    if !article.doi.is_empty() {
        println!("  DOI: {}", article.doi);
    }
    println!("  Contributors: {}", article.contributors.len());
    println!("  References: {}", article.refs.list.len());
}

/// Execute the render command.
fn render_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let article = load_json(input)?;
    let html = render_article(&article);

    match output {
        Some(path) => {
            std::fs::write(path, html)?;
            println!(
                "{} {}",
                style("Rendered to:").green().bold(),
                path.display()
            );
        }
        None => println!("{html}"),
    }

    Ok(())
}
