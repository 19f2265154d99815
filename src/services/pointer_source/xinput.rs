use super::session::DisplaySession;
use crate::error::{Result, TpwatchError};
use crate::events::PointerDevice;
use std::process::Command;
use tracing::debug;

/// Минимальная версия расширения XInput на сервере
const REQUIRED_XI_MAJOR: u32 = 2;
const REQUIRED_XI_MINOR: u32 = 0;

pub struct XinputProbe;

impl XinputProbe {
    pub fn new() -> Self {
        Self
    }

    pub async fn test(&self) -> Result<()> {
        let output = Command::new("xinput").args(&["list"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(TpwatchError::Internal("xinput failed".to_string()))
        }
    }

    /// Убедиться, что сервер поддерживает XInput >= 2.0
    pub async fn check_version(&self) -> Result<()> {
        let output = Command::new("xinput")
            .args(&["version"])
            .output()
            .map_err(|e| TpwatchError::ExtensionMissing(format!("xinput не найден: {}", e)))?;

        if !output.status.success() {
            return Err(TpwatchError::ExtensionMissing(
                "xinput version вернул ошибку".to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_server_version(&stdout) {
            Some((major, minor)) if (major, minor) >= (REQUIRED_XI_MAJOR, REQUIRED_XI_MINOR) => {
                debug!("XInput на сервере: {}.{}", major, minor);
                Ok(())
            }
            Some((major, minor)) => Err(TpwatchError::ExtensionMissing(format!(
                "на сервере XInput {}.{}, требуется {}.{}",
                major, minor, REQUIRED_XI_MAJOR, REQUIRED_XI_MINOR
            ))),
            None => Err(TpwatchError::ExtensionMissing(
                "версия XInput на сервере не распознана".to_string(),
            )),
        }
    }

    /// Найти включенную внешнюю USB-мышь среди slave pointer устройств
    pub async fn find_external_pointer(
        &self,
        _session: &DisplaySession,
        vendor_token: &str,
    ) -> Result<Option<PointerDevice>> {
        let output = Command::new("xinput")
            .args(&["list"])
            .output()
            .map_err(|e| TpwatchError::ServiceUnavailable(format!("xinput не найден: {}", e)))?;

        if !output.status.success() {
            return Err(TpwatchError::ServiceUnavailable(
                "xinput list вернул ошибку".to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        for device in parse_device_list(&stdout) {
            // Дешевый пре-фильтр по имени, чтобы не дергать list-props
            // для каждого устройства в списке
            if !device.is_slave_pointer
                || !device.name_contains("usb")
                || !device.name_contains(vendor_token)
            {
                continue;
            }

            let Some(id) = device.id else {
                continue;
            };

            // Флаг включенности виден только через list-props
            let device = if self.query_enabled(id)? {
                device.enabled()
            } else {
                device
            };

            if device.is_external_pointer(vendor_token) {
                return Ok(Some(device));
            }
        }

        Ok(None)
    }

    fn query_enabled(&self, id: u32) -> Result<bool> {
        let output = Command::new("xinput")
            .args(&["list-props", &id.to_string()])
            .output()
            .map_err(|e| TpwatchError::ServiceUnavailable(format!("xinput не найден: {}", e)))?;

        if !output.status.success() {
            return Ok(false);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_enabled_prop(&stdout).unwrap_or(false))
    }
}

/// Выделить версию расширения из вывода `xinput version`
fn parse_server_version(stdout: &str) -> Option<(u32, u32)> {
    let line = stdout
        .lines()
        .find(|line| line.contains("XI version on server:"))?;
    let version = line.rsplit(':').next()?.trim();
    let mut parts = version.split('.');
    let major = parts.next()?.trim().parse().ok()?;
    let minor = parts
        .next()
        .and_then(|minor| minor.trim().parse().ok())
        .unwrap_or(0);
    Some((major, minor))
}

/// Разобрать дерево устройств из вывода `xinput list`
fn parse_device_list(stdout: &str) -> Vec<PointerDevice> {
    let mut devices = Vec::new();

    for line in stdout.lines() {
        if !line.contains("pointer") {
            continue;
        }
        let Some(id) = parse_device_id(line) else {
            continue;
        };
        let Some(name) = parse_device_name(line) else {
            continue;
        };

        let mut device = PointerDevice::new(name).with_id(id);
        if line.contains("slave") {
            device = device.slave_pointer();
        }
        devices.push(device);
    }

    devices
}

fn parse_device_id(line: &str) -> Option<u32> {
    let start = line.find("id=")?;
    let rest = &line[start + 3..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

fn parse_device_name(line: &str) -> Option<String> {
    let end = line.find("id=")?;
    let name = line[..end]
        .trim_matches(|c: char| c.is_whitespace() || "⎡⎜⎣↳∼".contains(c))
        .to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Значение свойства "Device Enabled" из вывода `xinput list-props`
fn parse_enabled_prop(stdout: &str) -> Option<bool> {
    let line = stdout.lines().find(|line| line.contains("Device Enabled"))?;
    let value = line.rsplit(':').next()?.trim();
    Some(value == "1")
}
