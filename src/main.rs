use artfolio::store::FsStore;
use artfolio::{config, generate, output, route, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "artfolio")]
#[command(about = "Static site generator for an artist's portfolio")]
#[command(long_about = "\
Static site generator for an artist's portfolio

A flat directory of Markdown documents with YAML frontmatter becomes a works
listing, one page per work, year-tabbed series pages, and a CV.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Copied verbatim to dist/assets/
  ├── cv.mdx                       # CV → /cv/
  ├── parabiosis.mdx               # Work → /parabiosis/
  ├── parabiosis-credits.mdx       # Companion: own page, not listed
  ├── paintings-2019.mdx           # Series member → /paintings/#year-2019
  ├── paintings-2021.mdx
  └── yehi-2020.mdx                # Series member → /yehi/ and /yehi-2020/

Frontmatter keys (all optional):
  title:   display title (defaults to the filename)
  year:    display year
  artist:  attribution (defaults to [site] primary_artist)

Year resolution (first available wins):
  frontmatter year → 20xx in filename → 20xx in body → file modified time

Run 'artfolio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".artfolio-temp", global = true)]
    temp_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Show which page serves a request path
    Route {
        /// Request path, e.g. /paintings-2021 or /yehi/?year=2020
        path: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest = generate::load_manifest(&cli.temp_dir.join("manifest.json"))?;
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest, &report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            let dropped = manifest.dropped().count();
            if dropped > 0 {
                println!("==> Content is valid ({dropped} series entries dropped)");
            } else {
                println!("==> Content is valid");
            }
        }
        Command::Route { path } => {
            let site_config = config::load_config(&cli.source)?;
            let store = FsStore::new(&cli.source, site_config.content.extension.clone());
            let resolved = route::resolve_route(&path, &site_config, &store)?;
            println!("{}", output::format_route(&path, &resolved));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Write the scan manifest where `generate` expects it.
fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}
