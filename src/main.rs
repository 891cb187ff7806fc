//! pagegist - Page context extractor

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;

use pagegist::{ExtractOptions, FormatOptions, chunk_text, extract_context_bytes, format_context};

#[derive(Parser)]
#[command(name = "pagegist")]
#[command(version, about = "Extract structured page context from HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    pagegist page.html                        Print the formatted context
    pagegist page.html --url https://a.com/   Resolve links against a base URL
    pagegist page.html --json                 Print the raw context as JSON
    curl -s https://a.com/ | pagegist         Read HTML from stdin")]
struct Cli {
    /// Input HTML file, or `-` for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Base URL for resolving relative links
    #[arg(short, long, value_name = "BASE", default_value = "")]
    url: String,

    /// Print the structured context as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Split the formatted output into chunks of at most N characters
    #[arg(long, value_name = "N")]
    chunks: Option<usize>,

    /// Omit the page URL and all link targets from the output
    #[arg(long)]
    no_links: bool,

    /// Treat elements whose id contains MARKER as noise (repeatable)
    #[arg(long, value_name = "MARKER")]
    exclude_marker: Vec<String>,

    /// Suppress the summary line on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let bytes = read_input(&cli.input).map_err(|e| format!("{}: {e}", cli.input))?;

    let options = ExtractOptions {
        reserved_markers: cli.exclude_marker.clone(),
    };
    let context = extract_context_bytes(&bytes, &cli.url, &options);

    if cli.json {
        let json = serde_json::to_string_pretty(&context).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    let format_options = FormatOptions {
        include_links: !cli.no_links,
        reserved_markers: cli.exclude_marker.clone(),
    };
    let text = format_context(&context, &format_options);

    match cli.chunks {
        Some(max_chars) => {
            let chunks = chunk_text(&text, max_chars);
            let count = chunks.len();
            for (i, chunk) in chunks.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("=== CHUNK {}/{count} ===", i + 1);
                println!("{chunk}");
            }
            if !cli.quiet {
                eprintln!("{} chars | {count} chunk(s)", text.chars().count());
            }
        }
        None => {
            println!("{text}");
            if !cli.quiet {
                eprintln!("{} chars", text.chars().count());
            }
        }
    }

    Ok(())
}

fn read_input(path: &str) -> std::io::Result<Vec<u8>> {
    if path == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        Ok(bytes)
    } else {
        std::fs::read(path)
    }
}
