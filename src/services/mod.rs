pub mod idle_engine;
pub mod module_reloader;
pub mod pointer_source;
pub mod watchdog;

pub use module_reloader::create_module_reloader;
pub use pointer_source::create_pointer_source;
pub use watchdog::Watchdog;
