//! Gridmark CLI - span-aware Markdown table post-processor

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
use gridmark::{
    diagnostics::{check_document, format_diagnostics},
    inject_table_attributes, parse_markdown, process_document, render_document, GridmarkResult,
    InferOptions, TerminalOptions, Theme,
};
use std::fs;
use std::io::{self, Read, Write};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "gridmark")]
#[command(version)]
#[command(about = "Gridmark - Span-aware Markdown table post-processor", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Use 256-color escape sequences for default styles
    #[arg(long)]
    color256: bool,

    /// Disable per-cell alignment markers (leading/trailing ':')
    #[arg(long)]
    no_cell_alignment: bool,

    /// Border style token (e.g. "white", "38;5;250")
    #[arg(long)]
    border: Option<String>,

    /// Check mode - report marker issues without rendering
    #[arg(long)]
    check: bool,

    /// Use colored output (for check mode)
    #[arg(long, default_value_t = true)]
    color: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a document for table marker issues
    Check {
        /// Input file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Render a document to ANSI terminal output (default action)
    Render {
        /// Input file path
        input: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,

        /// Use 256-color escape sequences
        #[arg(long)]
        color256: bool,
    },

    /// Patch default-rendered HTML with span and removal attributes
    Inject {
        /// Markdown input file
        input: Option<String>,

        /// HTML file produced by the default (span-unaware) backend
        #[arg(long)]
        html: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run() -> GridmarkResult<()> {
    let cli = Cli::parse();

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;

    // If check mode, analyze and report issues
    if cli.check {
        let doc = parse_markdown(&input);
        let result = check_document(&doc);
        println!("{}", format_diagnostics(&result, cli.color));

        if result.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let options = InferOptions {
        per_cell_alignment: !cli.no_cell_alignment,
    };
    let mut doc = parse_markdown(&input);
    process_document(&mut doc, &options);

    let theme = Theme {
        border: cli.border.clone(),
        ..Theme::default()
    };
    let term_opts = TerminalOptions {
        use_256_color: cli.color256,
        indent: 0,
    };
    let rendered = render_document(&doc, &theme, &term_opts);

    write_output(cli.output.as_deref(), &rendered)
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> GridmarkResult<()> {
    match cmd {
        Commands::Check { input, no_color } => {
            let input = read_input(input.as_deref())?;
            let doc = parse_markdown(&input);
            let result = check_document(&doc);
            println!("{}", format_diagnostics(&result, !no_color));
            if result.has_errors() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Render {
            input,
            output,
            color256,
        } => {
            let input = read_input(input.as_deref())?;
            let mut doc = parse_markdown(&input);
            process_document(&mut doc, &InferOptions::default());
            let rendered = render_document(
                &doc,
                &Theme::default(),
                &TerminalOptions {
                    use_256_color: color256,
                    indent: 0,
                },
            );
            write_output(output.as_deref(), &rendered)
        }
        Commands::Inject {
            input,
            html,
            output,
        } => {
            let input = read_input(input.as_deref())?;
            let html = fs::read_to_string(&html)?;
            let mut doc = parse_markdown(&input);
            process_document(&mut doc, &InferOptions::default());
            let patched = inject_table_attributes(&doc, &html);
            write_output(output.as_deref(), &patched)
        }
        Commands::Info => {
            println!("gridmark {}", env!("CARGO_PKG_VERSION"));
            println!("Features:");
            println!("  - column spans:   '<<' marker cells");
            println!("  - row spans:      '^^' marker cells");
            println!("  - footer rows:    '===' rule rows");
            println!("  - separators:     em-dash rows");
            println!("  - captions:       [Caption] / ': Caption' with {{#id .class}} attributes");
            println!("  - alignment:      ':text:' per-cell markers");
            println!("Backends: ANSI terminal, HTML attribute injection");
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> GridmarkResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, content: &str) -> GridmarkResult<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(content.as_bytes())?;
            eprintln!("✓ Output written to: {}", path);
            Ok(())
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("gridmark was built without the 'cli' feature");
}
