// ABOUTME: CLI for running a news portal configuration over a saved article page.
// ABOUTME: Reads HTML from a file or stdin, runs the extraction pipeline and prints JSON.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::json;
use tei_engine::{process_html, PortalConfig, PortalRegistry, TracingLog};
use tei_portals::builtin_registry;
use tracing_subscriber::EnvFilter;

/// Extract TEI metadata and the cleaned article body from a saved page.
#[derive(Parser, Debug)]
#[command(name = "tei-cli")]
#[command(about = "Run a portal configuration over an HTML page and print JSON", long_about = None)]
struct Args {
    /// HTML file to process. Use "-" to read from stdin.
    #[arg(long, required_unless_present = "list_portals")]
    html: Option<String>,

    /// Canonical URL of the page.
    #[arg(long, required_unless_present = "list_portals")]
    url: Option<String>,

    /// Portal name; resolved from the URL when omitted.
    #[arg(long)]
    portal: Option<String>,

    /// Character set label of the page; sniffed when omitted.
    #[arg(long)]
    charset: Option<String>,

    /// Print the builtin portal names and exit.
    #[arg(long, default_value_t = false)]
    list_portals: bool,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Log extractor diagnostics at debug level.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let registry = builtin_registry()?;
    if args.list_portals {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let (Some(html_path), Some(url)) = (args.html.as_deref(), args.url.as_deref()) else {
        return Err(anyhow!("--html and --url are required"));
    };
    let portal = resolve_portal(&registry, args.portal.as_deref(), url)?;
    let bytes = load_bytes(html_path)?;
    let html = decode_html(&bytes, args.charset.as_deref());
    tracing::debug!(portal = portal.name(), bytes = bytes.len(), "loaded page");

    let outcome = process_html(portal, &TracingLog, url, &html)
        .with_context(|| format!("failed to process {}", url))?;
    let article = outcome.article();
    let output = json!({
        "url": url,
        "portal": portal.name(),
        "status": outcome.status(),
        "record": article.map(|a| &a.record),
        "body": article.map(|a| &a.body),
        "links": article.map(|a| &a.links),
        "next_page": article.and_then(|a| a.next_page.as_deref()),
    });

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_portal<'a>(
    registry: &'a PortalRegistry,
    name: Option<&str>,
    url: &str,
) -> Result<&'a PortalConfig> {
    match name {
        Some(name) => registry.get(name).ok_or_else(|| {
            anyhow!(
                "unknown portal: {} (available: {})",
                name,
                registry.names().join(", ")
            )
        }),
        None => registry
            .for_url(url)
            .ok_or_else(|| anyhow!("no portal configured for {}", url)),
    }
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    let path = Path::new(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    fs::read(path).with_context(|| format!("failed to read {}", target))
}

/// Decodes page bytes with the given charset label, or a sniffed one.
fn decode_html(bytes: &[u8], charset: Option<&str>) -> String {
    if let Some(encoding) = charset.and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes())) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}
