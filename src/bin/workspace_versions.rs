use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use workspace_run::core::version::{collect_versions, render_markdown_table};
use workspace_run::utils::{logger, validation::Validate};
use workspace_run::WorkspaceConfig;

#[derive(Parser)]
#[command(name = "workspace-versions")]
#[command(about = "Print the current and next patch version of every package")]
struct Args {
    /// Workspace root that package directories are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// TOML file with the package list (defaults to <root>/workspace-run.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a markdown table
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout 只輸出結果，日誌寫到 stderr
    logger::init_stderr_logger(args.verbose);

    let config = WorkspaceConfig::load(&args.root, args.config.as_deref())
        .context("failed to load package list")?;
    config.validate().context("invalid package list")?;

    let rows = collect_versions(&args.root, config.packages())
        .context("failed to read package versions")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_markdown_table(&rows));
    }

    Ok(())
}
