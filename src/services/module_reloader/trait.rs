use crate::error::Result;

/// Trait for module reloaders that can run in different modes
#[async_trait::async_trait]
pub trait ModuleReloaderTrait {
    /// Unload and reinsert the named kernel module
    async fn reload(&self, module: &str) -> Result<()>;
}

/// Factory function to create an appropriate module reloader based on the dry_run flag
pub fn create_module_reloader(dry_run: bool) -> Result<Box<dyn ModuleReloaderTrait + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunReloader::new()))
    } else {
        Ok(Box::new(super::modprobe::ModprobeReloader::new()))
    }
}
