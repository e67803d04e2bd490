mod error_formatter;
mod formatter;
mod toolchain;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use formatter::Formatter;
use gomin::{
    CheckMode, DepsMode, GoModDownload, History, Manifest, Package, ScanOptions, Scanner,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Suffix of the package files a loader writes
const PACKAGE_SUFFIX: &str = ".gomin.json";

#[derive(Parser)]
#[command(name = "gomin")]
#[command(about = "Find the lowest Go release that can build a module.")]
#[command(
    long_about = "gomin reads the annotated syntax trees a Go loader writes (*.gomin.json) and reports the\nlowest Go 1.x release supporting every construct and standard-library symbol they use.\nRequirements in go.mod raise the result to the versions they declare."
)]
#[command(version)]
struct Cli {
    /// Log more (debug level); RUST_LOG overrides
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DepsArg {
    None,
    Direct,
    All,
}

impl From<DepsArg> for DepsMode {
    fn from(arg: DepsArg) -> Self {
        match arg {
            DepsArg::None => DepsMode::None,
            DepsArg::Direct => DepsMode::Direct,
            DepsArg::All => DepsMode::All,
        }
    }
}

#[derive(clap::Args)]
struct HistoryArgs {
    /// Directory of go1.N.txt files (default: $GOROOT/api)
    #[arg(long, value_name = "DIR")]
    api: Option<PathBuf>,
    /// Current Go 1.x release (default: from `go env GOVERSION`)
    #[arg(long, value_name = "N")]
    release: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the minimum Go release of a module
    ///
    /// Loads every *.gomin.json package file below the module directory, scans
    /// them, folds in the go directives of the module's requirements and
    /// prints the result.
    Scan {
        /// Module root containing go.mod and the package files
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[command(flatten)]
        history: HistoryArgs,
        /// Which requirements to fold in
        #[arg(long, value_enum, default_value = "all")]
        deps: DepsArg,
        /// Fail if go.mod declares an older release than needed
        #[arg(long)]
        check: bool,
        /// Fail unless go.mod declares exactly the needed release (implies --check)
        #[arg(long)]
        strict: bool,
        /// Keep walking after the newest release is found
        #[arg(long)]
        no_short_circuit: bool,
        /// Scan packages one at a time
        #[arg(long)]
        sequential: bool,
        /// Concurrent dependency downloads
        #[arg(long, default_value = "4")]
        workers: usize,
        /// Show a per-package table
        #[arg(long)]
        explain: bool,
        /// Print the result as JSON
        #[arg(long, conflicts_with = "explain")]
        json: bool,
    },
    /// Show the release that introduced a standard-library symbol
    ///
    /// Examples:
    ///   gomin lookup io/fs ValidPath
    ///   gomin lookup net/http ReadHeaderTimeout --owner Server
    Lookup {
        /// Package path
        package: String,
        /// Exported identifier, or member name with --owner
        name: String,
        /// Type declaring the method or field
        #[arg(long)]
        owner: Option<String>,
        #[command(flatten)]
        history: HistoryArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Scan {
            dir,
            history,
            deps,
            check,
            strict,
            no_short_circuit,
            sequential,
            workers,
            explain,
            json,
        } => {
            let check = match (*check, *strict) {
                (_, true) => Some(CheckMode::Strict),
                (true, false) => Some(CheckMode::Lenient),
                (false, false) => None,
            };
            let options = ScanOptions {
                deps: (*deps).into(),
                check,
                short_circuit: !no_short_circuit,
                parallel: !sequential,
                fetch_workers: *workers,
            };
            scan_command(dir, history, options, *explain, *json)
        }
        Commands::Lookup {
            package,
            name,
            owner,
            history,
        } => lookup_command(package, name, owner.as_deref(), history),
    };

    if let Err(e) = result {
        if let Some(gomin_err) = e.downcast_ref::<gomin::GominError>() {
            eprintln!("{}", error_formatter::format_error(gomin_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn scan_command(
    dir: &Path,
    history_args: &HistoryArgs,
    options: ScanOptions,
    explain: bool,
    json: bool,
) -> Result<()> {
    let history = load_history(history_args)?;
    let packages = load_packages(dir)?;
    info!(count = packages.len(), dir = %dir.display(), "loaded packages");

    let go_mod = dir.join("go.mod");
    let manifest = if go_mod.is_file() {
        Some(Manifest::read(&go_mod)?)
    } else {
        None
    };

    let scanner = Scanner::new(&history, options);
    let finding = match &manifest {
        Some(manifest) => {
            let fetcher = GoModDownload::new().in_dir(dir);
            scanner.scan_module(&packages, manifest, &fetcher)?
        }
        None => {
            if scanner.options().check.is_some() {
                bail!("--check needs a go.mod in {}", dir.display());
            }
            if scanner.options().deps != DepsMode::None {
                warn!(dir = %dir.display(), "no go.mod, dependencies not folded in");
            }
            scanner.scan_packages(&packages)?
        }
    };

    let formatter = Formatter::default();
    if json {
        println!("{}", formatter.format_json(&finding)?);
    } else if explain {
        let rows = packages
            .iter()
            .map(|package| Ok((package.path.as_str(), scanner.scan_package(package)?)))
            .collect::<Result<Vec<_>>>()?;
        print!("{}", formatter.format_explain(&rows, &finding));
    } else {
        print!("{}", formatter.format_finding(&finding));
    }

    Ok(())
}

fn lookup_command(
    package: &str,
    name: &str,
    owner: Option<&str>,
    history_args: &HistoryArgs,
) -> Result<()> {
    let history = load_history(history_args)?;
    let formatter = Formatter::default();
    match history.lookup(package, name, owner) {
        Some(release) => {
            print!("{}", formatter.format_lookup(package, owner, name, release));
            Ok(())
        }
        None => {
            let symbol = match owner {
                Some(owner) => format!("{}.{}", owner, name),
                None => name.to_string(),
            };
            bail!("\"{}\".{} is not in the history", package, symbol)
        }
    }
}

fn load_history(args: &HistoryArgs) -> Result<History> {
    let api = match &args.api {
        Some(dir) => dir.clone(),
        None => toolchain::goroot()?.join("api"),
    };
    let release = match args.release {
        Some(release) => release,
        None => toolchain::current_release()?,
    };
    Ok(History::from_dir(&api, release)?)
}

/// Loads every package file below `dir`, in path order.
fn load_packages(dir: &Path) -> Result<Vec<Package>> {
    let mut packages = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let is_package = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(PACKAGE_SUFFIX));
        if !entry.file_type().is_file() || !is_package {
            continue;
        }
        let path = entry.path();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let package: Package = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        packages.push(package);
    }
    Ok(packages)
}
