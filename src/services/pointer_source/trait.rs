use crate::error::Result;
use crate::events::PointerSample;

/// Trait for pointer sources that can run in different modes
#[async_trait::async_trait]
pub trait PointerSourceTrait {
    /// Verify the display server supports the required input extension
    async fn check_capability(&self) -> Result<()>;

    /// Produce a fresh pointer sample for the current poll cycle
    async fn sample(&mut self) -> Result<PointerSample>;
}

/// Factory function to create an appropriate pointer source based on the dry_run flag
pub fn create_pointer_source(dry_run: bool) -> Result<Box<dyn PointerSourceTrait + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunPointerSource::new()))
    } else {
        Ok(Box::new(super::x11::X11PointerSource::new()?))
    }
}
