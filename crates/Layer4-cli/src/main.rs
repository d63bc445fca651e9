//! hominem CLI - Main entry point

use hominem_core::RunOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 로그 필터 환경 변수
const ENV_LOG: &str = "HOMINEM_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    // Initialize logging (stderr, envelope 스트림과 분리된 진단용)
    let verbose = argv.iter().any(|arg| arg == "--verbose");
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(ENV_LOG)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    // 패닉은 런타임이 internal envelope로 보고하므로 기본 훅 출력은 막음
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!("panic: {}", info);
    }));

    let code = hominem_cli::run(argv, RunOptions::process()).await;
    std::process::exit(code);
}
