//! Triton-Lite operator console
//!
//! Interactive menu for picking a serial port, connecting to the vehicle
//! and sending the surface/dive delay settings.
//!
//! Usage:
//!   triton-lite                  # Pick the port from the menu
//!   triton-lite /dev/ttyACM0     # Preselect a port
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=debug triton-lite   # Also trace every line sent and received

use inquire::validator::Validation;
use inquire::{InquireError, Select, Text};
use log::info;
use std::fmt;
use triton_lite::{Triton, TritonError};

/// Number of session log lines shown by "Show log"
const LOG_VIEW_LINES: usize = 15;

#[derive(Debug, Clone, Copy)]
enum Action {
    RefreshPorts,
    SelectPort,
    Connect,
    Disconnect,
    SurfaceDelay,
    DiveDelay,
    Apply,
    ShowLog,
    ClearLog,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::RefreshPorts => "Refresh ports",
            Action::SelectPort => "Select port",
            Action::Connect => "Connect",
            Action::Disconnect => "Disconnect",
            Action::SurfaceDelay => "Set surface delay",
            Action::DiveDelay => "Set dive delay",
            Action::Apply => "Apply settings",
            Action::ShowLog => "Show log",
            Action::ClearLog => "Clear log",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn actions(connected: bool) -> Vec<Action> {
    vec![
        if connected { Action::Disconnect } else { Action::Connect },
        Action::RefreshPorts,
        Action::SelectPort,
        Action::SurfaceDelay,
        Action::DiveDelay,
        Action::Apply,
        Action::ShowLog,
        Action::ClearLog,
        Action::Quit,
    ]
}

/// Operator-facing error message; the controller has already logged it
fn report_error(err: &TritonError) {
    eprintln!("✗ {}: {}", err.title(), err);
}

fn validate_delay(input: &str) -> Result<Validation, inquire::CustomUserError> {
    match input.trim().parse::<u32>() {
        Ok(_) => Ok(Validation::Valid),
        Err(_) => Ok(Validation::Invalid("Enter a whole number of seconds".into())),
    }
}

fn prompt_delay(label: &str, current: &str) -> Result<String, InquireError> {
    Text::new(label)
        .with_default(current)
        .with_validator(validate_delay)
        .prompt()
        .map(|value| value.trim().to_string())
}

fn select_port(triton: &mut Triton) -> Result<(), InquireError> {
    let ports = match triton.refresh_ports() {
        Ok(ports) => ports,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };

    if ports.is_empty() {
        eprintln!("No serial ports found!");
        return Ok(());
    }

    let port = Select::new("Select a serial port:", ports).prompt()?;
    triton.select_port(port);
    Ok(())
}

fn print_log(triton: &Triton) {
    println!("--- Communication log ---");
    for entry in triton.log().tail(LOG_VIEW_LINES) {
        println!("{}", entry);
    }
}

/// Run one menu action; returns false when the operator quits
fn run_action(triton: &mut Triton, action: Action) -> Result<bool, InquireError> {
    match action {
        Action::RefreshPorts => {
            if let Err(e) = triton.refresh_ports() {
                report_error(&e);
            }
            print_log_tail(triton);
        }
        Action::SelectPort => select_port(triton)?,
        Action::Connect | Action::Disconnect => match triton.toggle_connection() {
            Ok(status) => println!("Status: {}", status),
            Err(e) => report_error(&e),
        },
        Action::SurfaceDelay => {
            let value = prompt_delay("Surface delay (s):", &triton.settings().surface_delay)?;
            triton.set_surface_delay(value);
        }
        Action::DiveDelay => {
            let value = prompt_delay("Dive delay (s):", &triton.settings().dive_delay)?;
            triton.set_dive_delay(value);
        }
        Action::Apply => match triton.apply() {
            Ok(report) => {
                for line in report.responses() {
                    println!("  device: {}", line);
                }
                println!("✓ Settings updated");
            }
            Err(e) => report_error(&e),
        },
        Action::ShowLog => print_log(triton),
        Action::ClearLog => triton.clear_log(),
        Action::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_log_tail(triton: &Triton) {
    if let Some(entry) = triton.log().last() {
        println!("{}", entry);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger with default info level if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut triton = Triton::new();
    if let Err(e) = triton.refresh_ports() {
        report_error(&e);
    }
    if let Some(port) = std::env::args().nth(1) {
        triton.select_port(port);
    }

    println!("Surface delay: wait before the vehicle starts surfacing");
    println!("Dive delay:    wait before the vehicle starts diving");
    println!("Press \"Apply settings\" after editing to send them.");

    loop {
        let settings = triton.settings();
        let prompt = format!(
            "[{}] port: {} | surface: {}s | dive: {}s",
            triton.status(),
            triton.selected_port().unwrap_or("-"),
            settings.surface_delay,
            settings.dive_delay,
        );

        let action = match Select::new(&prompt, actions(triton.is_connected())).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match run_action(&mut triton, action) {
            Ok(true) => {}
            Ok(false) => break,
            Err(InquireError::OperationCanceled) => continue,
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        }
    }

    triton.disconnect();
    info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_input_must_be_whole_seconds() {
        assert!(matches!(validate_delay("30"), Ok(Validation::Valid)));
        assert!(matches!(validate_delay(" 45 "), Ok(Validation::Valid)));
        assert!(matches!(validate_delay("4.5"), Ok(Validation::Invalid(_))));
        assert!(matches!(validate_delay("-1"), Ok(Validation::Invalid(_))));
        assert!(matches!(validate_delay(""), Ok(Validation::Invalid(_))));
    }

    #[test]
    fn menu_offers_the_matching_connection_action() {
        assert!(matches!(actions(false)[0], Action::Connect));
        assert!(matches!(actions(true)[0], Action::Disconnect));
    }
}
