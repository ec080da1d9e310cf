use clap::Parser;
use huginn_net_ja4h::{CookieDigest, HeaderNameCase, HuginnNetJa4h, Ja4hConfig};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Prints the JA4H fingerprint of raw HTTP/1.x requests stored in files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Files holding one raw HTTP/1.x request each
    #[arg(required = true)]
    requests: Vec<PathBuf>,

    /// Hash cookie name=value pairs in segment D instead of cookie names
    #[arg(long)]
    cookie_values: bool,

    /// Hash header names in canonical MIME case
    #[arg(long)]
    canonical_headers: bool,

    /// Also print the raw (un-hashed) fingerprint
    #[arg(long)]
    raw: bool,

    /// Log file path
    #[arg(short = 'l', long = "log-file")]
    log_file: Option<String>,
}

fn initialize_logging(log_file: Option<String>) {
    let console_writer = std::io::stdout.with_max_level(tracing::Level::INFO);

    let file_appender = RollingFileAppender::new(
        Rotation::NEVER,
        ".",
        log_file.unwrap_or_else(|| "ja4h.log".to_string()),
    )
    .with_max_level(tracing::Level::INFO);

    let subscriber = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(console_writer.and(file_appender))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {e}");
        std::process::exit(1);
    }
}

fn main() {
    let args = Args::parse();
    initialize_logging(args.log_file);

    let cookie_digest =
        if args.cookie_values { CookieDigest::NameValuePairs } else { CookieDigest::Names };
    let header_name_case =
        if args.canonical_headers { HeaderNameCase::Canonical } else { HeaderNameCase::AsStored };
    let generator = HuginnNetJa4h::with_config(
        Ja4hConfig::default()
            .with_cookie_digest(cookie_digest)
            .with_header_name_case(header_name_case),
    );

    for path in &args.requests {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to read {}: {e}", path.display());
                continue;
            }
        };

        match generator.generate_http1(&data) {
            Ok(Some(payload)) => {
                info!("{}: {}={}", path.display(), payload.ja4h.variant_name(), payload.ja4h);
                if args.raw {
                    info!(
                        "{}: {}={}",
                        path.display(),
                        payload.ja4h_raw.variant_name(),
                        payload.ja4h_raw
                    );
                }
            }
            Ok(None) => warn!("{}: incomplete HTTP request", path.display()),
            Err(e) => error!("{}: {e}", path.display()),
        }
    }
}
