use crate::config::Config;
use crate::debug_if_enabled;
use crate::error::{Result, TpwatchError};
use crate::services::idle_engine::{Action, IdleState};
use crate::services::module_reloader::{ModuleReloaderTrait, MODULE_NAME};
use crate::services::pointer_source::PointerSourceTrait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep};
use tracing::{error, info, warn};

/// Итог одного цикла опроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleOutcome {
    /// Цикл отработал (включая мягкие ошибки)
    Polled,
    /// Дисплей недоступен - нужна длинная пауза перед повтором
    Degraded,
}

/// Цикл опроса: сессия дисплея -> инвентаризация устройств -> снимок
/// указателя -> движок простоя -> перезагрузка модуля по сигналу
pub struct Watchdog {
    config: Arc<Config>,
    pointer_source: Box<dyn PointerSourceTrait + Send>,
    reloader: Box<dyn ModuleReloaderTrait + Send>,
    state: IdleState,
}

impl Watchdog {
    pub fn new(
        config: Arc<Config>,
        pointer_source: Box<dyn PointerSourceTrait + Send>,
        reloader: Box<dyn ModuleReloaderTrait + Send>,
    ) -> Self {
        info!("Инициализация Watchdog (модуль: {})", MODULE_NAME);

        Self {
            config,
            pointer_source,
            reloader,
            state: IdleState::new(),
        }
    }

    /// Однократная проверка при старте: без XInput >= 2.0 демон работать
    /// не может
    pub async fn check_capability(&self) -> Result<()> {
        self.pointer_source.check_capability().await
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Watchdog запущен");

        let mut interval = interval(Duration::from_millis(
            self.config.watchdog.poll_interval_ms,
        ));

        loop {
            interval.tick().await;

            if self.run_cycle().await == CycleOutcome::Degraded {
                sleep(Duration::from_secs(self.config.watchdog.retry_backoff_secs)).await;
            }
        }
    }

    async fn run_cycle(&mut self) -> CycleOutcome {
        let sample = match self.pointer_source.sample().await {
            Ok(sample) => sample,
            Err(TpwatchError::DisplayUnavailable(msg)) => {
                warn!(
                    "Не удалось открыть дисплей: {}. Повтор через {} с",
                    msg, self.config.watchdog.retry_backoff_secs
                );
                return CycleOutcome::Degraded;
            }
            Err(e) => {
                // Мягкая ошибка: цикл пропускается, состояние не трогаем
                warn!("Цикл опроса пропущен: {}", e);
                return CycleOutcome::Polled;
            }
        };

        if sample.external_device_present {
            // Внешняя мышь маскирует политику, но не сбрасывает историю
            debug_if_enabled!("внешняя мышь подключена - движок простоя пропущен");
            return CycleOutcome::Polled;
        }

        if !sample.pointer_found {
            warn!("Мышь не найдена");
        }

        if self.state.observe(&sample) == Action::Reload {
            match self.reloader.reload(MODULE_NAME).await {
                Ok(()) => info!("Модуль {} успешно перезагружен", MODULE_NAME),
                // Неудача не фатальна: принудительная политика попробует
                // снова на следующем кратном пороге
                Err(e) => error!("Перезагрузка модуля {} не удалась: {}", MODULE_NAME, e),
            }
        }

        CycleOutcome::Polled
    }
}
