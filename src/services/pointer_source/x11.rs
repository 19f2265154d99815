use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::PointerSample;
use crate::tpwatch_error;
use tracing::{info, warn};

use super::evdev_probe::EvdevProbe;
use super::r#trait::PointerSourceTrait;
use super::session::DisplaySession;
use super::xdotool::XdotoolSampler;
use super::xinput::XinputProbe;
use super::USB_VENDOR_TOKEN;

#[derive(Debug, Clone)]
enum ProbeMethod {
    Xinput,
    Evdev,
}

/// Реальный источник снимков указателя: сессия дисплея на цикл,
/// инвентаризация устройств и запрос позиции через внешние утилиты
pub struct X11PointerSource {
    xinput: XinputProbe,
    evdev: EvdevProbe,
    sampler: XdotoolSampler,
    probe_method: Option<ProbeMethod>,
}

impl X11PointerSource {
    pub fn new() -> Result<Self> {
        info!("Инициализация X11PointerSource");

        Ok(Self {
            xinput: XinputProbe::new(),
            evdev: EvdevProbe::new(),
            sampler: XdotoolSampler::new(),
            probe_method: None,
        })
    }

    async fn detect_probe_method(&self) -> Result<ProbeMethod> {
        info!("Определяем рабочий метод инвентаризации устройств...");

        if let Ok(_) = self.xinput.test().await {
            info!("Используем xinput");
            return Ok(ProbeMethod::Xinput);
        }

        if let Ok(_) = self.evdev.test().await {
            info!("Используем evdev");
            return Ok(ProbeMethod::Evdev);
        }

        Err(tpwatch_error!(
            internal,
            "Ни один метод инвентаризации устройств не работает"
        ))
    }

    async fn external_pointer_present(&mut self, session: &DisplaySession) -> Result<bool> {
        let method = match &self.probe_method {
            Some(method) => method.clone(),
            None => {
                let method = self.detect_probe_method().await?;
                self.probe_method = Some(method.clone());
                method
            }
        };

        match self.probe_by_method(&method, session).await {
            Ok(present) => Ok(present),
            Err(e) => {
                warn!(
                    "Метод инвентаризации {:?} перестал работать: {}. Переопределяем...",
                    method, e
                );
                let new_method = self.detect_probe_method().await?;
                self.probe_method = Some(new_method.clone());
                self.probe_by_method(&new_method, session).await
            }
        }
    }

    async fn probe_by_method(
        &self,
        method: &ProbeMethod,
        session: &DisplaySession,
    ) -> Result<bool> {
        let found = match method {
            ProbeMethod::Xinput => {
                self.xinput
                    .find_external_pointer(session, USB_VENDOR_TOKEN)
                    .await?
            }
            ProbeMethod::Evdev => self.evdev.find_external_pointer(USB_VENDOR_TOKEN).await?,
        };

        if let Some(device) = &found {
            debug_if_enabled!("{} подключена", device);
        }

        Ok(found.is_some())
    }
}

#[async_trait::async_trait]
impl PointerSourceTrait for X11PointerSource {
    async fn check_capability(&self) -> Result<()> {
        self.xinput.check_version().await
    }

    async fn sample(&mut self) -> Result<PointerSample> {
        // Сессия закрывается при любом выходе из метода
        let session = DisplaySession::open()?;

        if self.external_pointer_present(&session).await? {
            return Ok(PointerSample::masked());
        }

        let (found, x, y) = self.sampler.query_pointer(&session).await?;
        if found {
            Ok(PointerSample::located(x, y))
        } else {
            Ok(PointerSample::not_found())
        }
    }
}
