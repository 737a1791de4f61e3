//! Tunnel build stats publisher - Main binary entry point

use std::process;

use tunnel_stats::cli::args::{CliArgs, OutputMode, parse_args};
use tunnel_stats::services::postprocess::{self, CommandHook, PostRenderHook};
use tunnel_stats::services::source::{FixedSource, I2pControlSource};
use tunnel_stats::{Error, SnapshotSource, StatsSite};

/// Markdown post-processor the site defers to when installed.
const POSTPROCESSOR: &str = "edgar";

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug tunnel-stats --dir site
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }
    if args.iter().any(|a| a == "--version" || a == "-v") {
        print_version();
        return;
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    process::exit(run(&cli_args));
}

fn run(args: &CliArgs) -> i32 {
    let source: Box<dyn SnapshotSource> =
        if let Some((rejected, succeeded, expired)) = args.offline {
            Box::new(FixedSource::new(rejected, succeeded, expired))
        } else {
            match I2pControlSource::new(&args.endpoint, &args.password) {
                Ok(source) => Box::new(source),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return 3;
                }
            }
        };

    let site = match StatsSite::open(&args.dir, source.as_ref()) {
        Ok(site) => site,
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_code(&e);
        }
    };

    let hook = CommandHook::detect(POSTPROCESSOR).map(|h| h.env("EDGAR_RECURSIVE", "true"));
    let markdown = match args.mode {
        Some(OutputMode::Markdown) => true,
        Some(OutputMode::Html) => false,
        None => hook.is_some(),
    };

    let result = if markdown {
        output_markdown(&site, hook.as_ref())
    } else {
        output_html(&site)
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        return exit_code(&e);
    }

    if args.stage {
        // staging is best-effort, matching the rest of the publish cycle
        // only up to a warning
        if let Err(e) = postprocess::stage_output(site.root()) {
            log::warn!("failed to stage output: {e}");
        }
    }

    0
}

fn output_html(site: &StatsSite) -> tunnel_stats::Result<()> {
    site.output_pages()?;
    site.generate_index_pages()?;
    site.output_home_page()
}

fn output_markdown(site: &StatsSite, hook: Option<&CommandHook>) -> tunnel_stats::Result<()> {
    site.output_markdown_pages()?;
    site.generate_markdown_index_pages()?;
    site.output_markdown_home_page()?;
    if let Some(hook) = hook {
        hook.run(site.root())?;
    }
    Ok(())
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Source(_) => 3,
        _ => 4,
    }
}

fn print_help() {
    println!("tunnel-stats - Publish exploratory tunnel build statistics as a static site");
    println!();
    println!("USAGE:");
    println!("    tunnel-stats [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --dir <PATH>          Site root directory (default: .)");
    println!("    --endpoint <URL>      Router control endpoint (default: http://127.0.0.1:7657/jsonrpc)");
    println!("    --password <PASS>     Router control password (default: itoopie)");
    println!("    --offline <R,S,E>     Use fixed counters instead of querying the router");
    println!("    --markdown            Force markdown output (README.md pages)");
    println!("    --html                Force HTML output even if a post-processor is installed");
    println!("    --no-stage            Do not stage the output tree with git");
    println!("    -h, --help            Show this help message");
    println!("    -v, --version         Show version information");
    println!();
    println!("Each run appends exactly one sample to <dir>/series.json and regenerates");
    println!("the per-sample pages, directory indices, and home page beneath <dir>.");
    println!();
    println!("EXAMPLES:");
    println!("    tunnel-stats --dir ~/eepsite/docroot");
    println!("    tunnel-stats --dir site --offline 12,40,3 --html --no-stage");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    println!("tunnel-stats {VERSION} ({GIT_HASH})");
}
