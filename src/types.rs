use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timing settings edited by the operator and sent on apply.
///
/// Values are kept as entered and transmitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub surface_delay: String,
    pub dive_delay: String,
}

impl Settings {
    pub fn new(surface_delay: impl Into<String>, dive_delay: impl Into<String>) -> Self {
        Settings {
            surface_delay: surface_delay.into(),
            dive_delay: dive_delay.into(),
        }
    }

    /// Commands in the order they are sent to the vehicle
    pub fn commands(&self) -> [Command; 2] {
        [
            Command::SurfaceDelay(self.surface_delay.clone()),
            Command::DiveDelay(self.dive_delay.clone()),
        ]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(DEFAULT_SURFACE_DELAY, DEFAULT_DIVE_DELAY)
    }
}

/// Text command understood by the vehicle firmware
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SurfaceDelay(String),
    DiveDelay(String),
}

impl Command {
    pub fn prefix(&self) -> &'static str {
        match self {
            Command::SurfaceDelay(_) => SURFACE_DELAY_CMD,
            Command::DiveDelay(_) => DIVE_DELAY_CMD,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Command::SurfaceDelay(v) | Command::DiveDelay(v) => v,
        }
    }

    /// Wire bytes, newline terminated
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.to_string().into_bytes();
        bytes.push(LINE_TERMINATOR);
        bytes
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix(), CMD_SEPARATOR, self.value())
    }
}

/// Connection state shown on the status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Disconnected,
    Connected { port: String },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
            ConnectionStatus::Connected { port } => write!(f, "Connected ({})", port),
        }
    }
}

/// One command and the reply lines drained after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub sent: String,
    pub responses: Vec<String>,
}

/// Outcome of a successful apply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub exchanges: Vec<Exchange>,
}

impl ApplyReport {
    pub fn responses(&self) -> impl Iterator<Item = &str> {
        self.exchanges
            .iter()
            .flat_map(|e| e.responses.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_ordered_surface_then_dive() {
        let settings = Settings::new("30", "45");
        let [first, second] = settings.commands();
        assert_eq!(first.encode(), b"SUP_START:30\n");
        assert_eq!(second.encode(), b"EXH_START:45\n");
    }

    #[test]
    fn default_settings_match_console_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.surface_delay, "30");
        assert_eq!(settings.dive_delay, "30");
    }

    #[test]
    fn status_line_text() {
        assert_eq!(ConnectionStatus::Disconnected.to_string(), "Disconnected");
        let status = ConnectionStatus::Connected { port: "COM3".into() };
        assert!(status.is_connected());
        assert_eq!(status.to_string(), "Connected (COM3)");
    }

    #[test]
    fn settings_serialize_as_plain_fields() {
        let json = serde_json::to_string(&Settings::new("10", "20")).unwrap();
        assert_eq!(json, r#"{"surface_delay":"10","dive_delay":"20"}"#);
    }
}
