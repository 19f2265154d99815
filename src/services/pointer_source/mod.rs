//! PointerSource service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for answering two
//! questions each poll cycle: "is a qualifying external USB pointer
//! attached?" and "where is the pointer right now?". It MUST NOT contain
//! any idle accounting or reload policy. All reload decisions are made
//! exclusively by IdleState::observe().

mod dry_run;
mod evdev_probe;
mod session;
mod r#trait;
mod x11;
mod xdotool;
mod xinput;

pub use self::r#trait::{create_pointer_source, PointerSourceTrait};

/// Перезагрузка модуля отключается, пока подключена USB-мышь этого
/// производителя
pub const USB_VENDOR_TOKEN: &str = "Logitech";
