use serde::{Deserialize, Serialize};
use std::fmt;

/// Описание указательного устройства, видимого дисплейным сервером
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerDevice {
    pub name: String,
    pub id: Option<u32>,
    pub is_slave_pointer: bool,
    pub enabled: bool,
}

impl PointerDevice {
    pub fn new(name: String) -> Self {
        Self {
            name,
            id: None,
            is_slave_pointer: false,
            enabled: false,
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn slave_pointer(mut self) -> Self {
        self.is_slave_pointer = true;
        self
    }

    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Проверить, содержит ли имя устройства подстроку (регистронезависимо)
    pub fn name_contains(&self, token: &str) -> bool {
        self.name.to_lowercase().contains(&token.to_lowercase())
    }

    /// Внешняя USB-мышь: включенный slave pointer с "USB" и маркой
    /// производителя в имени
    pub fn is_external_pointer(&self, vendor_token: &str) -> bool {
        self.enabled
            && self.is_slave_pointer
            && self.name_contains("usb")
            && self.name_contains(vendor_token)
    }
}

impl fmt::Display for PointerDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "\"{}\" (id:{})", self.name, id),
            None => write!(f, "\"{}\"", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_creation() {
        let device = PointerDevice::new("Logitech USB Optical Mouse".to_string())
            .with_id(10)
            .slave_pointer()
            .enabled();

        assert_eq!(device.id, Some(10));
        assert!(device.is_slave_pointer);
        assert!(device.enabled);
    }

    #[test]
    fn test_external_pointer_matching() {
        let device = PointerDevice::new("Logitech USB Receiver".to_string())
            .slave_pointer()
            .enabled();

        assert!(device.is_external_pointer("Logitech"));
        // Совпадение регистронезависимое
        assert!(device.is_external_pointer("logitech"));
        assert!(!device.is_external_pointer("Razer"));
    }

    #[test]
    fn test_internal_touchpad_not_external() {
        let device = PointerDevice::new("SynPS/2 Synaptics TouchPad".to_string())
            .slave_pointer()
            .enabled();

        assert!(!device.is_external_pointer("Logitech"));
    }

    #[test]
    fn test_disabled_device_not_external() {
        let device = PointerDevice::new("Logitech USB Receiver".to_string()).slave_pointer();
        assert!(!device.is_external_pointer("Logitech"));
    }

    #[test]
    fn test_master_pointer_not_external() {
        // Виртуальный master не считается внешним устройством
        let device = PointerDevice::new("Virtual core pointer USB Logitech".to_string()).enabled();
        assert!(!device.is_external_pointer("Logitech"));
    }
}
