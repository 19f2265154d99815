use std::fmt;
use std::time::Instant;

/// Снимок состояния указателя за один цикл опроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSample {
    pub pointer_found: bool,
    pub x: i32,
    pub y: i32,
    pub external_device_present: bool,
    pub timestamp: Instant,
}

impl PointerSample {
    /// Указатель найден на одном из экранов
    pub fn located(x: i32, y: i32) -> Self {
        Self {
            pointer_found: true,
            x,
            y,
            external_device_present: false,
            timestamp: Instant::now(),
        }
    }

    /// Указатель не найден ни на одном экране
    pub fn not_found() -> Self {
        Self {
            pointer_found: false,
            x: 0,
            y: 0,
            external_device_present: false,
            timestamp: Instant::now(),
        }
    }

    /// Подключена внешняя USB-мышь - опрос позиции не выполнялся
    pub fn masked() -> Self {
        Self {
            pointer_found: false,
            x: 0,
            y: 0,
            external_device_present: true,
            timestamp: Instant::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl fmt::Display for PointerSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.external_device_present {
            write!(f, "внешняя мышь подключена")
        } else if self.pointer_found {
            write!(f, "x={} y={}", self.x, self.y)
        } else {
            write!(f, "указатель не найден")
        }
    }
}
