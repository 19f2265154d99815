use crate::error::{Result, TpwatchError};
use crate::events::PointerDevice;
use std::path::Path;
use tracing::debug;

/// Fallback-инвентаризация: когда утилита xinput недоступна, ищем внешнюю
/// USB-мышь напрямую среди event-устройств в /dev/input
pub struct EvdevProbe;

impl EvdevProbe {
    pub fn new() -> Self {
        Self
    }

    pub async fn test(&self) -> Result<()> {
        std::fs::read_dir("/dev/input")
            .map_err(|e| TpwatchError::Permission(format!("Нет доступа к /dev/input: {}", e)))?;
        Ok(())
    }

    pub async fn find_external_pointer(
        &self,
        vendor_token: &str,
    ) -> Result<Option<PointerDevice>> {
        let entries = std::fs::read_dir("/dev/input")
            .map_err(|e| TpwatchError::Permission(format!("Нет доступа к /dev/input: {}", e)))?;

        let mut event_devices = Vec::new();
        for entry in entries {
            let entry = entry.map_err(TpwatchError::Io)?;
            let path = entry.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with("event") {
                event_devices.push(path);
            }
        }

        // Сортируем устройства по номеру
        event_devices.sort();

        for device_path in event_devices {
            if let Some(device) = Self::match_usb_pointer(&device_path, vendor_token) {
                debug!("{} подключена ({})", device, device_path.display());
                return Ok(Some(device));
            }
        }

        Ok(None)
    }

    fn match_usb_pointer(device_path: &Path, vendor_token: &str) -> Option<PointerDevice> {
        let device = evdev::Device::open(device_path).ok()?;
        let name = device.name().unwrap_or("Unknown").to_string();

        // Указательное устройство: есть относительные оси
        let is_pointer = device
            .supported_relative_axes()
            .map_or(false, |axes| axes.contains(evdev::RelativeAxisCode::REL_X));
        if !is_pointer {
            return None;
        }

        // USB-подключение видно по физическому пути устройства
        let on_usb = device
            .physical_path()
            .map_or(false, |phys| phys.to_lowercase().contains("usb"))
            || name.to_lowercase().contains("usb");
        if !on_usb {
            return None;
        }

        // Открываемое event-устройство с точки зрения ядра включено;
        // в терминах дисплейного сервера это slave pointer
        let candidate = PointerDevice::new(name).slave_pointer().enabled();
        if candidate.name_contains(vendor_token) {
            Some(candidate)
        } else {
            None
        }
    }
}
