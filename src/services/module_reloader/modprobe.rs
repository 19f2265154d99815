use crate::error::{Result, TpwatchError};
use std::process::Command;
use std::time::Duration;
use tracing::{debug, info};

/// Пауза между выгрузкой и повторной загрузкой модуля
const REINSERT_DELAY: Duration = Duration::from_millis(1);

pub struct ModprobeReloader;

impl ModprobeReloader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl super::r#trait::ModuleReloaderTrait for ModprobeReloader {
    async fn reload(&self, module: &str) -> Result<()> {
        debug!("Выгружаем модуль {}", module);
        run_modprobe(&["-r", module])?;

        // Даем ядру немного времени перед повторной загрузкой
        tokio::time::sleep(REINSERT_DELAY).await;

        debug!("Загружаем модуль {}", module);
        run_modprobe(&[module])?;

        info!("Модуль {} перезагружен", module);
        Ok(())
    }
}

fn run_modprobe(args: &[&str]) -> Result<()> {
    let output = Command::new("modprobe")
        .args(args)
        .output()
        .map_err(|e| TpwatchError::ModuleReload(format!("modprobe не найден: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TpwatchError::ModuleReload(format!(
            "modprobe {} завершился с ошибкой: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(())
}
