//! Streaming CLI: read one Go source, mock every interface found in
//! it, and write the rendered result to the output stream.

use anyhow::Context as _;
use clap::Parser;
use rsmock::{version, Generator};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "rsmock-pipe",
    version = version::long_version(),
    about = "Mock every interface read from a stream"
)]
struct Cli {
    /// Destination package name of the generated source.
    #[arg(long, default_value = "mock")]
    pkg: String,

    /// Input file; stdin when omitted.
    #[arg(long = "in", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file; stdout when omitted.
    #[arg(long = "out", value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    let mut generator = match &cli.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Generator::from_reader(file)?
        }
        None => Generator::from_reader(io::stdin())?,
    };
    generator.set_package_name(&cli.pkg);
    generator.generate_all()?;
    let out = generator.render()?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
        }
        None => io::stdout().write_all(out.as_bytes())?,
    }
    Ok(())
}
