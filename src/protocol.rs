use crate::constants::*;
use crate::error::{Result, TritonError};
use crate::link::{drain_lines, Link};
use crate::session::SessionLog;
use crate::types::*;
use log::{debug, warn};
use std::thread;
use std::time::Duration;

/// Main Triton-Lite controller: port manager plus command exchange
pub struct Triton {
    link: Option<Box<dyn Link>>,
    status: ConnectionStatus,
    selected_port: Option<String>,
    settings: Settings,
    baud_rate: u32,
    timeout: Duration,
    settle_delay: Duration,
    log: SessionLog,
}

impl Triton {
    /// Create a disconnected controller with default settings
    pub fn new() -> Self {
        Triton {
            link: None,
            status: ConnectionStatus::Disconnected,
            selected_port: None,
            settings: Settings::default(),
            baud_rate: BAUD_RATE,
            timeout: Duration::from_millis(TIMEOUT_MS),
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            log: SessionLog::new(),
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wait between writing a command and draining its replies
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// List available serial ports
    pub fn list_ports() -> Result<Vec<serialport::SerialPortInfo>> {
        Ok(serialport::available_ports()?)
    }

    /// Re-enumerate ports, log them and preselect the first one
    pub fn refresh_ports(&mut self) -> Result<Vec<String>> {
        match Self::list_ports() {
            Ok(ports) => Ok(self.record_ports(ports.into_iter().map(|p| p.port_name).collect())),
            Err(e) => {
                warn!("Port enumeration failed: {}", e);
                self.log.push(format!("Error: {}", e));
                Err(e)
            }
        }
    }

    /// Log an enumeration result and make its first port the default target
    pub fn record_ports(&mut self, ports: Vec<String>) -> Vec<String> {
        self.log.push(format!("Available ports: {}", ports.join(", ")));
        if let Some(first) = ports.first() {
            self.selected_port = Some(first.clone());
        }
        ports
    }

    pub fn select_port(&mut self, port_name: impl Into<String>) {
        self.selected_port = Some(port_name.into());
    }

    pub fn selected_port(&self) -> Option<&str> {
        self.selected_port.as_deref()
    }

    /// Open `port_name`, closing any connection that is already open
    pub fn connect(&mut self, port_name: &str) -> Result<()> {
        self.disconnect();

        let opened = serialport::new(port_name, self.baud_rate)
            .timeout(self.timeout)
            .open();
        match opened {
            Ok(port) => {
                self.attach(port_name, Box::new(port));
                Ok(())
            }
            Err(source) => {
                let err = TritonError::Connection {
                    port: port_name.to_string(),
                    source,
                };
                warn!("{}", err);
                self.log.push(format!("Error: {}", err));
                Err(err)
            }
        }
    }

    /// Take ownership of an already-open link as the active connection
    pub fn attach(&mut self, port_name: &str, link: Box<dyn Link>) {
        self.disconnect();
        self.link = Some(link);
        self.selected_port = Some(port_name.to_string());
        self.status = ConnectionStatus::Connected {
            port: port_name.to_string(),
        };
        self.log.push(format!("Connected to port {}", port_name));
    }

    /// Close the active connection; does nothing when already closed
    pub fn disconnect(&mut self) {
        if self.link.take().is_some() {
            self.status = ConnectionStatus::Disconnected;
            self.log.push("Disconnected");
        }
    }

    /// Connect to the selected port when disconnected, disconnect otherwise
    pub fn toggle_connection(&mut self) -> Result<&ConnectionStatus> {
        if self.is_connected() {
            self.disconnect();
        } else {
            let port = match self.selected_port.clone() {
                Some(port) => port,
                None => {
                    let err = TritonError::Connection {
                        port: String::new(),
                        source: serialport::Error::new(
                            serialport::ErrorKind::NoDevice,
                            "no port selected",
                        ),
                    };
                    self.log.push(format!("Error: {}", err));
                    return Err(err);
                }
            };
            self.connect(&port)?;
        }
        Ok(&self.status)
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_surface_delay(&mut self, value: impl Into<String>) {
        self.settings.surface_delay = value.into();
    }

    pub fn set_dive_delay(&mut self, value: impl Into<String>) {
        self.settings.dive_delay = value.into();
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Send the currently stored settings
    pub fn apply(&mut self) -> Result<ApplyReport> {
        let settings = self.settings.clone();
        self.apply_settings(&settings.surface_delay, &settings.dive_delay)
    }

    /// Send the surface delay, then the dive delay, draining replies after each.
    ///
    /// A transport failure on the second command leaves the first applied.
    pub fn apply_settings(&mut self, surface_delay: &str, dive_delay: &str) -> Result<ApplyReport> {
        self.settings = Settings::new(surface_delay, dive_delay);
        let settings = self.settings.clone();

        match self.send_settings(&settings) {
            Ok(report) => {
                self.log.push("Settings applied");
                Ok(report)
            }
            Err(e) => {
                warn!("Apply failed: {}", e);
                self.log.push(format!("Error: {}", e));
                Err(e)
            }
        }
    }

    fn send_settings(&mut self, settings: &Settings) -> Result<ApplyReport> {
        let settle_delay = self.settle_delay;
        let link = self.link.as_mut().ok_or(TritonError::NotConnected)?;

        let mut report = ApplyReport::default();
        for command in settings.commands() {
            let exchange = exchange(&mut **link, &command, settle_delay, &mut self.log)?;
            report.exchanges.push(exchange);
        }
        Ok(report)
    }
}

impl Default for Triton {
    fn default() -> Self {
        Self::new()
    }
}

/// Write one command, give the device time to answer, then drain its replies
fn exchange(
    link: &mut dyn Link,
    command: &Command,
    settle_delay: Duration,
    log: &mut SessionLog,
) -> Result<Exchange> {
    let sent = command.to_string();
    debug!("Sending:  {}", sent);
    link.write_all(&command.encode())?;
    link.flush()?;
    log.push(format!("Sent: {}", sent));

    thread::sleep(settle_delay);

    let responses = drain_lines(link)?;
    for response in &responses {
        debug!("Received: {}", response);
        log.push(format!("Device response: {}", response));
    }

    Ok(Exchange { sent, responses })
}
