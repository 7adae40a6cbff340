//! Package-mode CLI: mock requested interfaces from a Go package
//! directory or an explicit file list, writing one generated file.

use anyhow::{bail, Context as _};
use clap::Parser;
use rsmock::{snake_case, version, Generator};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = version::NAME,
    version = version::long_version(),
    about = "Generate mock implementations for Go interfaces"
)]
struct Cli {
    /// Comma-separated list of interface names to mock; the first name
    /// drives the output file name.
    #[arg(short = 't', long = "type", value_name = "T1,T2")]
    types: String,

    /// Output directory; defaults to the package directory. Its base
    /// name becomes the destination package name.
    #[arg(short = 'o', long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Package directory (default "."), or the .go files of one package.
    #[arg(value_name = "DIR|FILES")]
    args: Vec<PathBuf>,
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

    let types: Vec<&str> = cli
        .types
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if types.is_empty() {
        bail!("--type needs at least one interface name");
    }

    let args = if cli.args.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.args.clone()
    };

    let (dir, mut generator) = if args.len() == 1 && args[0].is_dir() {
        (args[0].clone(), Generator::from_dir(&args[0])?)
    } else {
        let dir = match args[0].parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        (dir, Generator::from_files(&args)?)
    };

    let base_name = format!("{}_mock.go", snake_case(types[0]));
    let out_file = match &cli.output {
        Some(out_dir) => {
            if let Some(pkg) = out_dir.file_name().and_then(|n| n.to_str()) {
                generator.set_package_name(pkg);
            }
            out_dir.join(&base_name)
        }
        None => dir.join(&base_name),
    };

    for type_name in &types {
        generator.generate(type_name)?;
    }

    let src = generator.render()?;
    fs::write(&out_file, src).with_context(|| format!("writing {}", out_file.display()))?;
    Ok(())
}
