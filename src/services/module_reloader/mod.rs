//! ModuleReloader service: responsibility and boundaries
//!
//! This module is responsible ONLY for the opaque unload/insert action on a
//! named kernel module. It holds no timing state and makes no decisions
//! about WHEN to reload - that is IdleState::observe() territory.

mod dry_run;
mod modprobe;
mod r#trait;

pub use self::r#trait::{create_module_reloader, ModuleReloaderTrait};

/// Имя модуля ядра, который перезагружаем
pub const MODULE_NAME: &str = "psmouse";
