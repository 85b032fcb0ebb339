use clap::Parser;
use workspace_run::utils::{logger, validation::Validate};
use workspace_run::{CliConfig, ShellRunner, WorkspaceConfig, WorkspaceError, WorkspaceRunner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Err(e) = args.validate() {
        fail(&e);
    }

    // 載入套件清單
    let config = match WorkspaceConfig::load(&args.root, args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    if let Err(e) = config.validate() {
        fail(&e);
    }

    if args.dry_run {
        display_config_summary(&config, &args);
    }

    let command = args.command_line();
    let runner = WorkspaceRunner::new(ShellRunner::new(), config, args.root.clone())
        .with_dry_run(args.dry_run);

    match runner.run(&command).await {
        Ok(report) => {
            if args.dry_run {
                println!("🔍 Dry run: would execute '{}' in:", command);
                for directory in report.planned() {
                    println!("  {}", directory);
                }
            } else {
                tracing::info!(
                    "✅ '{}' succeeded in {} packages ({} skipped) in {:?}",
                    command,
                    report.executed().count(),
                    report.skipped().count(),
                    report.total_duration()
                );
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &WorkspaceError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);

    // 退出碼沿用第一個失敗指令的退出碼
    std::process::exit(e.exit_code());
}

fn display_config_summary(config: &WorkspaceConfig, args: &CliConfig) {
    println!("📋 Configuration Summary:");
    println!("  Root: {}", args.root.display());
    println!("  Packages: {}", config.packages().len());
    println!("  Windows only: {}", config.windows_only().join(", "));
    println!(
        "  Manifest: {} (required by: {})",
        config.manifest(),
        config.manifest_commands().join(", ")
    );
    println!();
}
