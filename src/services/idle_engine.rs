use crate::debug_if_enabled;
use crate::events::PointerSample;
use std::time::Instant;
use tracing::info;

/// Перезагружаем драйвер, если указатель неподвижен минимум 10 секунд
pub const IDLE_THRESHOLD_SECS: u64 = 10;

/// Принудительная перезагрузка каждые 100 секунд неподвижности
pub const FORCED_THRESHOLD_SECS: u64 = 100;

/// Решение движка за один цикл опроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Reload,
}

/// Состояние учета неподвижности указателя.
///
/// Единственная сущность, живущая дольше одного цикла опроса. Владеет ею
/// только поток опроса, конкурентного доступа нет.
#[derive(Debug)]
pub struct IdleState {
    last_position: Option<(i32, i32)>,
    last_movement_time: Instant,
    reload_triggered: bool,
}

impl IdleState {
    pub fn new() -> Self {
        Self {
            last_position: None,
            last_movement_time: Instant::now(),
            reload_triggered: false,
        }
    }

    /// Обработать свежий снимок указателя и решить, нужна ли перезагрузка.
    ///
    /// Снимок с подключенной внешней мышью сюда не попадает - цикл опроса
    /// пропускает движок целиком, не трогая состояние. Отключение мыши
    /// посреди простоя не сбрасывает историю: неподвижные секунды под
    /// маской продолжают накапливаться от прежнего last_movement_time.
    pub fn observe(&mut self, sample: &PointerSample) -> Action {
        if !sample.pointer_found {
            // Нет данных - цикл ничего не меняет
            return Action::None;
        }

        let position = sample.position();

        match self.last_position {
            Some(last) if last == position => self.observe_motionless(sample.timestamp),
            _ => {
                // Первый снимок или движение: перезапускаем отсчет
                self.last_position = Some(position);
                self.last_movement_time = sample.timestamp;
                self.reload_triggered = false;
                debug_if_enabled!("позиция указателя: x={} y={}", position.0, position.1);
                Action::None
            }
        }
    }

    fn observe_motionless(&mut self, now: Instant) -> Action {
        let elapsed = now
            .saturating_duration_since(self.last_movement_time)
            .as_secs();

        debug_if_enabled!("указатель неподвижен {} с", elapsed);

        // Принудительная политика не дебаунсится: срабатывает на каждом
        // кратном пороге, пока опрос продвигает elapsed по целым секундам
        if elapsed > 0 && elapsed % FORCED_THRESHOLD_SECS == 0 {
            info!("{} с без движения - принудительная перезагрузка модуля", elapsed);
            return Action::Reload;
        }

        if elapsed >= IDLE_THRESHOLD_SECS && !self.reload_triggered {
            info!(
                "порог {} с пройден ({} с) - перезагрузка модуля",
                IDLE_THRESHOLD_SECS, elapsed
            );
            // Флаг остается взведенным до следующего движения, даже если
            // сама перезагрузка у вызывающей стороны не удалась
            self.reload_triggered = true;
            return Action::Reload;
        }

        Action::None
    }

    #[allow(dead_code)]
    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.last_position
    }

    #[allow(dead_code)]
    pub fn reload_triggered(&self) -> bool {
        self.reload_triggered
    }
}

impl Default for IdleState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_at(base: Instant, secs: u64, x: i32, y: i32) -> PointerSample {
        PointerSample::located(x, y).with_timestamp(base + Duration::from_secs(secs))
    }

    fn not_found_at(base: Instant, secs: u64) -> PointerSample {
        PointerSample::not_found().with_timestamp(base + Duration::from_secs(secs))
    }

    #[test]
    fn test_first_sample_records_position() {
        let base = Instant::now();
        let mut state = IdleState::new();

        let action = state.observe(&sample_at(base, 0, 5, 5));

        assert_eq!(action, Action::None);
        assert_eq!(state.last_position(), Some((5, 5)));
        assert!(!state.reload_triggered());
    }

    #[test]
    fn test_movement_resets_countdown_and_flag() {
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        for t in 1..=10 {
            state.observe(&sample_at(base, t, 5, 5));
        }
        assert!(state.reload_triggered());

        // Движение в тот же цикл дает None и снимает флаг
        let action = state.observe(&sample_at(base, 11, 6, 5));
        assert_eq!(action, Action::None);
        assert!(!state.reload_triggered());
        assert_eq!(state.last_position(), Some((6, 5)));
    }

    #[test]
    fn test_idle_reload_fires_exactly_at_threshold() {
        // Сценарий: (5,5) на t=0..=10 - перезагрузка ровно на t=10
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        for t in 1..=9 {
            assert_eq!(state.observe(&sample_at(base, t, 5, 5)), Action::None, "t={}", t);
        }
        assert_eq!(state.observe(&sample_at(base, 10, 5, 5)), Action::Reload);
    }

    #[test]
    fn test_idle_reload_debounced_within_one_period() {
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        let mut reloads = 0;
        for t in 1..=50 {
            if state.observe(&sample_at(base, t, 5, 5)) == Action::Reload {
                reloads += 1;
            }
        }
        // Один период простоя - одна перезагрузка
        assert_eq!(reloads, 1);
    }

    #[test]
    fn test_forced_reload_at_hundred_seconds() {
        // Неподвижность t=0..=100 - ровно две перезагрузки:
        // порог простоя на t=10 и принудительная на t=100
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        let mut reload_times = Vec::new();
        for t in 1..=100 {
            if state.observe(&sample_at(base, t, 5, 5)) == Action::Reload {
                reload_times.push(t);
            }
        }
        assert_eq!(reload_times, vec![10, 100]);
    }

    #[test]
    fn test_forced_reload_repeats_at_every_multiple() {
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        let mut reload_times = Vec::new();
        for t in 1..=300 {
            if state.observe(&sample_at(base, t, 5, 5)) == Action::Reload {
                reload_times.push(t);
            }
        }
        assert_eq!(reload_times, vec![10, 100, 200, 300]);
    }

    #[test]
    fn test_countdown_restarts_after_movement() {
        // Движение на t=10 сразу после перезагрузки - следующий отсчет
        // 10 секунд идет от t=10
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        for t in 1..=10 {
            state.observe(&sample_at(base, t, 5, 5));
        }

        state.observe(&sample_at(base, 10, 6, 5));
        for t in 11..=19 {
            assert_eq!(state.observe(&sample_at(base, t, 6, 5)), Action::None, "t={}", t);
        }
        assert_eq!(state.observe(&sample_at(base, 20, 6, 5)), Action::Reload);
    }

    #[test]
    fn test_masked_interval_counts_toward_idleness() {
        // Внешняя мышь подключена t=3..7: движок эти циклы не видит,
        // но elapsed считается от исходного last_movement_time,
        // и перезагрузка все равно приходится на t=10
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        for t in [1, 2, 8, 9] {
            assert_eq!(state.observe(&sample_at(base, t, 5, 5)), Action::None, "t={}", t);
        }
        assert_eq!(state.observe(&sample_at(base, 10, 5, 5)), Action::Reload);
    }

    #[test]
    fn test_pointer_not_found_is_noop() {
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        for t in 1..=9 {
            state.observe(&sample_at(base, t, 5, 5));
        }

        // Циклы без указателя не трогают ни позицию, ни флаг
        assert_eq!(state.observe(&not_found_at(base, 10)), Action::None);
        assert_eq!(state.last_position(), Some((5, 5)));
        assert!(!state.reload_triggered());

        // Следующий валидный снимок продолжает старый отсчет
        assert_eq!(state.observe(&sample_at(base, 11, 5, 5)), Action::Reload);
    }

    #[test]
    fn test_pointer_not_found_before_first_sample() {
        let base = Instant::now();
        let mut state = IdleState::new();

        assert_eq!(state.observe(&not_found_at(base, 0)), Action::None);
        assert_eq!(state.last_position(), None);
    }

    #[test]
    fn test_flag_retained_until_next_movement() {
        // Движок не узнает, удалась ли перезагрузка: флаг взведен до
        // следующего движения в любом случае
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        for t in 1..=10 {
            state.observe(&sample_at(base, t, 5, 5));
        }
        assert!(state.reload_triggered());

        for t in 11..=99 {
            assert_eq!(state.observe(&sample_at(base, t, 5, 5)), Action::None, "t={}", t);
        }
        assert!(state.reload_triggered());
    }

    #[test]
    fn test_forced_reload_ignores_trigger_flag() {
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        for t in 1..=10 {
            state.observe(&sample_at(base, t, 5, 5));
        }
        assert!(state.reload_triggered());

        // Принудительный порог срабатывает несмотря на взведенный флаг
        assert_eq!(state.observe(&sample_at(base, 100, 5, 5)), Action::Reload);
    }

    #[test]
    fn test_zero_elapsed_does_not_force_reload() {
        // elapsed=0 кратен чему угодно, но перезагрузку не вызывает
        let base = Instant::now();
        let mut state = IdleState::new();

        state.observe(&sample_at(base, 0, 5, 5));
        assert_eq!(state.observe(&sample_at(base, 0, 5, 5)), Action::None);
    }
}
