use crate::error::{Result, TpwatchError};
use std::process::Command;
use tracing::debug;

/// Сессия дисплея на один цикл опроса.
///
/// Открывается в начале цикла и гарантированно закрывается при выходе из
/// области видимости - на любом пути выхода из цикла, включая ранние
/// ("внешняя мышь подключена", "указатель не найден").
pub struct DisplaySession {
    display: String,
}

impl DisplaySession {
    pub fn open() -> Result<Self> {
        let disp = std::env::var("DISPLAY").map_err(|_| {
            TpwatchError::DisplayUnavailable("переменная DISPLAY не установлена".to_string())
        })?;

        // Дешевый запрос, который падает, если дисплей не отвечает
        let output = Command::new("xdotool")
            .args(&["getdisplaygeometry"])
            .output()
            .map_err(|e| TpwatchError::DisplayUnavailable(format!("xdotool не найден: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return TpwatchError::display_unavailable(format!(
                "не удалось открыть дисплей {}: {}",
                disp,
                stderr.trim()
            ));
        }

        debug!("Сессия дисплея {disp} открыта");
        Ok(Self { display: disp })
    }

    #[allow(dead_code)]
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl Drop for DisplaySession {
    fn drop(&mut self) {
        debug!("Сессия дисплея {} закрыта", self.display);
    }
}
