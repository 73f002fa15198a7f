use clap::Parser;
use item_contents::utils::error::ErrorSeverity;
use item_contents::utils::{logger, validation::Validate};
use item_contents::{CliConfig, ContentsEngine, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 載入 TOML 配置 (可選)
    let toml = match &config.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(toml) => toml,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    if toml.json_logs() {
        logger::init_json_logger();
    } else if config.verbose {
        logger::init_cli_logger(true);
    } else {
        logger::init_cli_logger_with_level(toml.log_level());
    }

    tracing::info!("Starting item-contents CLI");

    // 驗證配置
    if let Err(e) = toml.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    config.merge_toml(&toml);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let input = config.input.clone().unwrap_or_default();
    let operation = config.operation();
    let engine = ContentsEngine::new(LocalStorage::new("."));

    match engine
        .run(&input, &operation, config.output.as_deref(), config.pretty)
        .await
    {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            if report.succeeded == Some(false) {
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
