//! pagetext CLI - page-by-page PDF text extraction

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagetext::convert::{convert_file, ConvertOptions, OutputFormat};
use pagetext::progress::ProgressSink;
use pagetext::{JsonFormat, PageSection, RenderOptions, Transcript};

const DEFAULT_OUTPUT: &str = "docs/pdf_content.txt";

#[derive(Parser)]
#[command(name = "pagetext")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF text page by page into a transcript file", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Page marker template; `{page}` is replaced by the page number
    #[arg(long, value_name = "TEMPLATE")]
    marker: Option<String>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Show a progress bar instead of echoing page text
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    /// Page-delimited plain text
    Text,
    /// JSON with one entry per page
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        match &self.marker {
            Some(template) => RenderOptions::new().with_marker_template(template.as_str()),
            None => RenderOptions::default(),
        }
    }

    fn convert_options(&self) -> ConvertOptions {
        let json_format = if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };

        ConvertOptions::new()
            .with_render_options(self.render_options())
            .with_format(self.format.into())
            .with_json_format(json_format)
    }
}

/// Console progress: echoes every page, or drives a progress bar.
enum ConsoleProgress {
    Echo(RenderOptions),
    Bar {
        style: ProgressStyle,
        bar: Option<ProgressBar>,
    },
}

impl ConsoleProgress {
    fn echo(options: RenderOptions) -> Self {
        ConsoleProgress::Echo(options)
    }

    fn bar() -> Result<Self, Box<dyn std::error::Error>> {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-");
        Ok(ConsoleProgress::Bar { style, bar: None })
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_start(&mut self, page_count: u32) {
        match self {
            ConsoleProgress::Echo(_) => {
                println!("{}", "PDF Text Extraction".cyan().bold());
                println!("{}: {}", "Pages".bold(), page_count);
                println!();
            }
            ConsoleProgress::Bar { style, bar } => {
                let pb = ProgressBar::new(u64::from(page_count));
                pb.set_style(style.clone());
                *bar = Some(pb);
            }
        }
    }

    fn on_page(&mut self, section: &PageSection) {
        match self {
            ConsoleProgress::Echo(options) => {
                println!("{}", options.marker(section.number).green());
                println!("{}", section.text);
            }
            ConsoleProgress::Bar { bar: Some(pb), .. } => {
                pb.set_message(format!("page {}", section.number));
                pb.inc(1);
            }
            ConsoleProgress::Bar { bar: None, .. } => {}
        }
    }

    fn on_finish(&mut self, transcript: &Transcript) {
        if let ConsoleProgress::Bar { bar: Some(pb), .. } = self {
            pb.finish_with_message(format!("{} pages", transcript.page_count()));
        }
    }
}

impl Drop for ConsoleProgress {
    fn drop(&mut self) {
        if let ConsoleProgress::Bar { bar: Some(pb), .. } = self {
            if !pb.is_finished() {
                pb.abandon();
            }
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.convert_options();
    let progress = if cli.quiet {
        ConsoleProgress::bar()?
    } else {
        ConsoleProgress::echo(options.render.clone())
    };

    let result = convert_file(&cli.input, &cli.output, &options, progress)?;
    log::info!(
        "Wrote {} pages ({}) to {}",
        result.transcript.page_count(),
        result.mime_type,
        cli.output.display()
    );

    println!();
    println!("{} {}", "Saved to".green(), cli.output.display());

    Ok(())
}
