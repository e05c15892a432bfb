//! Serial port discovery
//!
//! Enumerates ports, ranks the ones that look like card readers first and
//! picks the first that can actually be opened.

use std::time::Duration;

use tokio_serial::{SerialPortInfo, SerialPortType};
use tracing::{debug, info, warn};

use rfidscan_core::constants::{
    DEFAULT_BAUD_RATE, FTDI_KEYWORD, PROBE_TIMEOUT_MS, READER_KEYWORDS,
};
use rfidscan_types::PortInfo;

use crate::error::{Error, Result};

/// List serial ports known to the OS
pub fn list_ports() -> Result<Vec<PortInfo>> {
    let ports = tokio_serial::available_ports().map_err(Error::Enumerate)?;

    debug!("Found {} serial port(s)", ports.len());

    Ok(ports.into_iter().map(to_port_info).collect())
}

fn to_port_info(port: SerialPortInfo) -> PortInfo {
    match port.port_type {
        SerialPortType::UsbPort(usb) => {
            let description = usb
                .product
                .clone()
                .unwrap_or_else(|| "USB Serial Device".to_string());

            let hardware_id = match &usb.serial_number {
                Some(serial) => format!("USB VID:PID={:04X}:{:04X} SER={}", usb.vid, usb.pid, serial),
                None => format!("USB VID:PID={:04X}:{:04X}", usb.vid, usb.pid),
            };

            let info = PortInfo::new(port.port_name, description).with_hardware_id(hardware_id);

            match usb.manufacturer {
                Some(manufacturer) => info.with_manufacturer(manufacturer),
                None => info,
            }
        }
        SerialPortType::PciPort => {
            PortInfo::new(port.port_name, "PCI Serial Port").with_hardware_id("PCI")
        }
        SerialPortType::BluetoothPort => {
            PortInfo::new(port.port_name, "Bluetooth Serial Port").with_hardware_id("BTHENUM")
        }
        SerialPortType::Unknown => PortInfo::new(port.port_name, "n/a"),
    }
}

/// Check if a port looks like a card reader or a USB-serial bridge
pub fn is_likely_reader(port: &PortInfo) -> bool {
    let description = port.description.to_lowercase();
    let manufacturer = port
        .manufacturer
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    READER_KEYWORDS.iter().any(|k| description.contains(k))
        || manufacturer.contains(FTDI_KEYWORD)
        || description.contains(FTDI_KEYWORD)
}

/// Order port names by preference
///
/// Likely readers first; OS order is kept within each group.
pub fn rank_ports(ports: &[PortInfo]) -> Vec<String> {
    let (preferred, others): (Vec<&PortInfo>, Vec<&PortInfo>) =
        ports.iter().partition(|p| is_likely_reader(p));

    preferred
        .into_iter()
        .chain(others)
        .map(|p| p.device.clone())
        .collect()
}

/// Check if a port can be opened at the default baud rate
pub fn probe(port: &str) -> bool {
    let result = tokio_serial::new(port, DEFAULT_BAUD_RATE)
        .timeout(Duration::from_millis(PROBE_TIMEOUT_MS))
        .open();

    match result {
        Ok(_) => true,
        Err(e) => {
            debug!(port = %port, error = %e, "Probe failed");
            false
        }
    }
}

/// First candidate accepted by `probe`
pub fn select_port<F>(candidates: &[String], mut probe: F) -> Option<String>
where
    F: FnMut(&str) -> bool,
{
    candidates.iter().find(|port| probe(port)).cloned()
}

/// Detect the best port for an RFID reader
///
/// # Errors
///
/// Returns [`Error::NoPortFound`] if no port exists or none can be opened.
pub fn detect_best_port() -> Result<String> {
    let ports = list_ports()?;

    if ports.is_empty() {
        warn!("No serial ports found");
        return Err(Error::NoPortFound);
    }

    let ranked = rank_ports(&ports);

    let selected = select_port(&ranked, |port| {
        debug!(port = %port, "Testing port");
        probe(port)
    })
    .ok_or(Error::NoPortFound)?;

    info!(port = %selected, "Selected serial port");

    Ok(selected)
}
