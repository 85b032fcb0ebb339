use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// JSON lines for CI log collectors
    Json,
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default_directive = if verbose {
        "workspace_run=debug,info"
    } else {
        "workspace_run=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// 日誌與子程序輸出共用 stdout，與原本的逐行輸出一致
pub fn init_cli_logger(verbose: bool) {
    init_logger(verbose, LogFormat::Compact, std::io::stdout);
}

pub fn init_json_logger() {
    init_logger(false, LogFormat::Json, std::io::stdout);
}

/// stdout 保留給結果 (表格或 JSON) 時使用
pub fn init_stderr_logger(verbose: bool) {
    init_logger(verbose, LogFormat::Compact, std::io::stderr);
}

pub fn init_logger<W>(verbose: bool, format: LogFormat, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(writer);
    let registry = tracing_subscriber::registry().with(env_filter(verbose));

    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
