use super::session::DisplaySession;
use crate::error::{Result, TpwatchError};
use std::process::Command;
use tracing::warn;

pub struct XdotoolSampler;

impl XdotoolSampler {
    pub fn new() -> Self {
        Self
    }

    #[allow(dead_code)]
    pub async fn test(&self) -> Result<()> {
        let output = Command::new("xdotool").args(&["getmouselocation"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(TpwatchError::Internal("xdotool failed".to_string()))
        }
    }

    /// Запросить текущую позицию указателя на активном дисплее
    pub async fn query_pointer(&self, _session: &DisplaySession) -> Result<(bool, i32, i32)> {
        let output = Command::new("xdotool")
            .args(&["getmouselocation", "--shell"])
            .output()
            .map_err(|e| TpwatchError::ServiceUnavailable(format!("xdotool не найден: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("xdotool не нашел указатель: {}", stderr.trim());
            return Ok((false, 0, 0));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_mouse_location(&stdout) {
            Some((x, y)) => Ok((true, x, y)),
            None => Ok((false, 0, 0)),
        }
    }
}

/// Разобрать вывод `xdotool getmouselocation --shell` (строки X=.. Y=..)
fn parse_mouse_location(stdout: &str) -> Option<(i32, i32)> {
    let mut x = None;
    let mut y = None;

    for line in stdout.lines() {
        if let Some(value) = line.strip_prefix("X=") {
            x = value.trim().parse().ok();
        } else if let Some(value) = line.strip_prefix("Y=") {
            y = value.trim().parse().ok();
        }
    }

    Some((x?, y?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mouse_location() {
        let stdout = "X=683\nY=23\nSCREEN=0\nWINDOW=16777250\n";
        assert_eq!(parse_mouse_location(stdout), Some((683, 23)));
    }

    #[test]
    fn test_parse_mouse_location_negative_coords() {
        // Отрицательные координаты возможны при нескольких мониторах
        let stdout = "X=-120\nY=400\nSCREEN=1\nWINDOW=123\n";
        assert_eq!(parse_mouse_location(stdout), Some((-120, 400)));
    }

    #[test]
    fn test_parse_mouse_location_incomplete() {
        assert_eq!(parse_mouse_location("X=683\nSCREEN=0\n"), None);
        assert_eq!(parse_mouse_location(""), None);
    }
}
