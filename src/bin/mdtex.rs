//! mdtex CLI - Markdown → LaTeX/PDF/HTML/DOCX converter for academic authoring

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use mdtex::{
    arxiv, convert, html_backends, select_backend, ConversionError, ConversionResult,
    ConversionWarning, ConvertOptions, DocumentClass, Metadata, PandocDocxBackend,
    PdfLatexBackend, QuoteStyle, RenderBackend,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mdtex")]
#[command(version)]
#[command(about = "Markdown → LaTeX converter for academic authoring", long_about = None)]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Tex)]
    format: Format,

    /// Output path (derived from the input name if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// LaTeX template overriding the embedded one (ArXiv mode)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Run the full academic-paper pipeline even for .tex output
    #[arg(long)]
    arxiv: bool,

    /// Render double quotes as \og ...\fg{} guillemets
    #[arg(long)]
    french_quotes: bool,

    /// Use starred (unnumbered) sectioning commands
    #[arg(long)]
    unnumbered: bool,

    /// LaTeX document class
    #[arg(long, value_enum, default_value_t = ClassArg::Article)]
    document_class: ClassArg,

    /// BibTeX file shipped alongside the output
    #[arg(short, long)]
    bibliography: Option<PathBuf>,

    /// Directory of figures shipped alongside the output
    #[arg(long)]
    figures: Option<PathBuf>,

    /// JSON metadata sidecar (e.g. {"date": "January 2026"})
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Watch the input file and reconvert on change
    #[arg(short, long)]
    watch: bool,

    /// Print the selected render backend
    #[arg(short, long)]
    verbose: bool,

    /// Suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// LaTeX source
    Tex,
    /// Compiled PDF (requires pdflatex)
    Pdf,
    /// Standalone HTML (pandoc, with a built-in fallback)
    Html,
    /// Word document (requires pandoc)
    Docx,
    /// ArXiv submission package (.tar.gz)
    Arxiv,
}

#[cfg(feature = "cli")]
impl Format {
    fn extension(&self) -> &'static str {
        match self {
            Format::Tex => "tex",
            Format::Pdf => "pdf",
            Format::Html => "html",
            Format::Docx => "docx",
            Format::Arxiv => "tar.gz",
        }
    }

    /// PDF and ArXiv outputs need a complete document, not a body
    /// fragment, so they always run the full pipeline.
    fn forces_arxiv_pipeline(&self) -> bool {
        matches!(self, Format::Pdf | Format::Arxiv)
    }
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    Article,
    Book,
    Report,
}

#[cfg(feature = "cli")]
impl From<ClassArg> for DocumentClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Article => DocumentClass::Article,
            ClassArg::Book => DocumentClass::Book,
            ClassArg::Report => DocumentClass::Report,
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }

    if cli.watch {
        eprintln!("Watching {} (Ctrl-C to stop)", cli.input.display());
        let result = mdtex::watch::watch_file(
            &cli.input,
            || run(&cli),
            |e| eprintln!("✗ {}", e),
        );
        if let Err(e) = result {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> ConversionResult<()> {
    let markdown = fs::read_to_string(&cli.input)
        .map_err(|_| ConversionError::missing_resource(cli.input.display().to_string()))?;
    let options = build_options(cli)?;

    // HTML and DOCX hand the Markdown to pandoc directly; the LaTeX
    // pipeline only runs for tex-family outputs.
    match cli.format {
        Format::Html => {
            let output = output_path(cli);
            let backend = select_backend(html_backends())
                .ok_or_else(|| ConversionError::render("html", "no HTML backend available"))?;
            if cli.verbose {
                eprintln!("Using backend: {}", backend.name());
            }
            backend.render(&markdown, &output)?;
            eprintln!("✓ Output written to: {}", output.display());
        }
        Format::Docx => {
            let output = output_path(cli);
            let backend = PandocDocxBackend;
            if cli.verbose {
                eprintln!("Using backend: {}", backend.name());
            }
            backend.render(&markdown, &output)?;
            eprintln!("✓ Output written to: {}", output.display());
        }
        Format::Tex => {
            let output = output_path(cli);
            let converted = convert(&markdown, &options)?;
            if !cli.quiet {
                report_warnings(&converted.warnings);
            }
            fs::write(&output, &converted.content)?;
            eprintln!("✓ Output written to: {}", output.display());
        }
        Format::Pdf => {
            let output = output_path(cli);
            let converted = convert(&markdown, &options)?;
            if !cli.quiet {
                report_warnings(&converted.warnings);
            }
            let mut backend = PdfLatexBackend::new();
            if let Some(figures) = &options.figures_path {
                backend = backend.with_resource_dir(figures.clone());
            }
            if let Some(bib) = &options.bibliography_path {
                backend = backend.with_bibliography(bib.clone());
            }
            if cli.verbose {
                eprintln!("Using backend: {}", backend.name());
            }
            backend.render(&converted.content, &output)?;
            eprintln!("✓ Output written to: {}", output.display());
        }
        Format::Arxiv => {
            let converted = convert(&markdown, &options)?;
            if !cli.quiet {
                report_warnings(&converted.warnings);
            }
            let out_dir = arxiv_dir(cli);
            let tar = arxiv::package(&converted.content, &options, &out_dir)?;
            eprintln!("✓ Submission package written to: {}", tar.display());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn build_options(cli: &Cli) -> ConversionResult<ConvertOptions> {
    let metadata = match &cli.metadata {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|_| ConversionError::missing_resource(path.display().to_string()))?;
            Metadata::from_json_str(&json)?
        }
        None => Metadata::default(),
    };

    Ok(ConvertOptions {
        quote_style: if cli.french_quotes {
            QuoteStyle::French
        } else {
            QuoteStyle::Straight
        },
        document_class: cli.document_class.into(),
        unnumbered: cli.unnumbered,
        arxiv_mode: cli.arxiv || cli.format.forces_arxiv_pipeline(),
        template_path: cli.template.clone(),
        bibliography_path: cli.bibliography.clone(),
        figures_path: cli.figures.clone(),
        metadata,
    })
}

#[cfg(feature = "cli")]
fn output_path(cli: &Cli) -> PathBuf {
    match &cli.output {
        Some(path) => path.clone(),
        None => cli.input.with_extension(cli.format.extension()),
    }
}

/// ArXiv packaging uses a directory next to the input; the archive
/// lands at `<dir>.tar.gz`
#[cfg(feature = "cli")]
fn arxiv_dir(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.output {
        return path.clone();
    }
    let stem = cli
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("submission");
    cli.input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}_arxiv", stem))
}

#[cfg(feature = "cli")]
fn report_warnings(warnings: &[ConversionWarning]) {
    for warning in warnings {
        match warning.line {
            Some(line) => eprintln!("⚠ line {}: {}", line, warning.message),
            None => eprintln!("⚠ {}", warning.message),
        }
        if let Some(suggestion) = &warning.suggestion {
            eprintln!("  hint: {}", suggestion);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mdtex --features cli");
    eprintln!("  mdtex [OPTIONS] <INPUT>");
}
