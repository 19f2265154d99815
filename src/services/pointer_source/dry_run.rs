use crate::error::Result;
use crate::events::PointerSample;
use tracing::info;

use super::r#trait::PointerSourceTrait;

/// Эмуляция источника указателя: короткое движение, долгий простой,
/// затем "подключение" внешней мыши
pub struct DryRunPointerSource {
    tick: u64,
}

impl DryRunPointerSource {
    pub fn new() -> Self {
        info!("Dry-run режим - PointerSource работает в режиме эмуляции");
        Self { tick: 0 }
    }
}

#[async_trait::async_trait]
impl PointerSourceTrait for DryRunPointerSource {
    async fn check_capability(&self) -> Result<()> {
        info!("Dry-run: проверка расширения XInput пропущена");
        Ok(())
    }

    async fn sample(&mut self) -> Result<PointerSample> {
        let phase = self.tick % 40;
        self.tick += 1;

        // 5 циклов движения, 30 циклов простоя, 5 циклов с "внешней мышью"
        let sample = if phase < 5 {
            PointerSample::located(100 + phase as i32 * 10, 200)
        } else if phase < 35 {
            PointerSample::located(140, 200)
        } else {
            PointerSample::masked()
        };

        info!("Dry-run: эмулируем снимок указателя: {}", sample);
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emulation_phases() {
        let mut source = DryRunPointerSource::new();

        let first = source.sample().await.unwrap();
        assert!(first.pointer_found);

        // Фазы 5..35 - одна и та же позиция
        for _ in 1..5 {
            source.sample().await.unwrap();
        }
        let hold_a = source.sample().await.unwrap();
        let hold_b = source.sample().await.unwrap();
        assert_eq!(hold_a.position(), hold_b.position());

        // Фазы 35..40 - внешняя мышь
        for _ in 7..35 {
            source.sample().await.unwrap();
        }
        let masked = source.sample().await.unwrap();
        assert!(masked.external_device_present);
    }
}
