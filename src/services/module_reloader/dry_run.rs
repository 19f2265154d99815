use crate::error::Result;
use tracing::info;

/// Эмуляция перезагрузчика: пишет в лог вместо обращения к ядру
pub struct DryRunReloader;

impl DryRunReloader {
    pub fn new() -> Self {
        info!("Dry-run режим - ModuleReloader работает в режиме эмуляции");
        Self
    }
}

#[async_trait::async_trait]
impl super::r#trait::ModuleReloaderTrait for DryRunReloader {
    async fn reload(&self, module: &str) -> Result<()> {
        info!("Dry-run: эмулируем перезагрузку модуля {}", module);
        Ok(())
    }
}
