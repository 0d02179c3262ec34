use clap::Parser;
use number_aggregator::core::ConfigProvider;
use number_aggregator::utils::{logger, validation::Validate};
use number_aggregator::{AppState, CliConfig, FanOutAggregator, HttpNumberSource, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting number-aggregator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析並驗證配置
    let config = match ServiceConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 建立抓取來源、聚合器與路由
    let aggregator = FanOutAggregator::new(HttpNumberSource::new());
    let state = AppState::new(aggregator, &config);
    let app = number_aggregator::router(state);

    let addr = format!("{}:{}", config.bind_host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "🚀 Listening on {} (source timeout: {}ms, source cap: {})",
        addr,
        config.source_timeout_ms,
        config.max_sources
    );

    axum::serve(listener, app).await?;

    Ok(())
}
