use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use services::{create_module_reloader, create_pointer_source, Watchdog};

#[derive(Parser, Debug)]
#[command(name = "tpwatch-rust")]
#[command(about = "Демон перезагрузки драйвера тачпада при зависании после простоя")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "tpwatch.toml")]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Инициализация системы логирования
    init_tracing(&args.log_level)?;

    info!("Запуск TPWatch Rust v{}", env!("CARGO_PKG_VERSION"));

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    // Проверка прав доступа
    utils::permissions::check_permissions(args.dry_run)?;

    // Инициализация компонентов
    let pointer_source = create_pointer_source(args.dry_run)?;
    let reloader = create_module_reloader(args.dry_run)?;
    let watchdog = Watchdog::new(config.clone(), pointer_source, reloader);

    // Без расширения XInput работать нельзя - проверяем до запуска цикла
    watchdog.check_capability().await?;

    info!("Все компоненты инициализированы");

    // Запуск цикла опроса
    let watchdog_handle = tokio::spawn(async move {
        if let Err(e) = watchdog.run().await {
            error!("Ошибка в Watchdog: {}", e);
        }
    });

    info!("Сервис запущен");

    // Ожидание сигнала завершения
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Получен сигнал завершения (Ctrl+C)");
        }
        Err(err) => {
            error!("Ошибка при ожидании сигнала завершения: {}", err);
        }
    }

    info!("Завершение работы...");

    // Прерываем задачу опроса
    watchdog_handle.abort();

    // Ожидаем завершения задачи (с таймаутом)
    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = watchdog_handle.await;
    })
    .await;

    match shutdown_result {
        Ok(_) => info!("Сервис завершил работу корректно"),
        Err(_) => warn!("Таймаут при завершении сервиса"),
    }

    info!("TPWatch Rust завершил работу");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}
