use thiserror::Error;

#[derive(Error, Debug)]
pub enum TpwatchError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Расширение XInput недоступно: {0}")]
    ExtensionMissing(String),

    #[error("Дисплей недоступен: {0}")]
    DisplayUnavailable(String),

    #[error("Не удалось перезагрузить модуль: {0}")]
    ModuleReload(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl TpwatchError {
    pub fn display_unavailable<T>(msg: impl Into<String>) -> Result<T> {
        Err(TpwatchError::DisplayUnavailable(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, TpwatchError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! tpwatch_error {
    (display_unavailable, $($arg:tt)*) => {
        $crate::error::TpwatchError::DisplayUnavailable(format!($($arg)*))
    };
    (module_reload, $($arg:tt)*) => {
        $crate::error::TpwatchError::ModuleReload(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::TpwatchError::Permission(format!($($arg)*))
    };
    (service_unavailable, $($arg:tt)*) => {
        $crate::error::TpwatchError::ServiceUnavailable(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::TpwatchError::Internal(format!($($arg)*))
    };
}
