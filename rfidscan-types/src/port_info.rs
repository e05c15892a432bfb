//! Serial port information structures

use std::fmt;

/// Serial port as enumerated by the operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Device name (`COM4`, `/dev/ttyUSB0`)
    pub device: String,

    /// Description (USB product string or port kind)
    pub description: String,

    /// Manufacturer, when the OS reports one
    pub manufacturer: Option<String>,

    /// Hardware identifier (`USB VID:PID=0403:6001 SER=...`)
    pub hardware_id: String,
}

impl PortInfo {
    pub fn new(device: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            description: description.into(),
            manufacturer: None,
            hardware_id: "n/a".to_string(),
        }
    }

    /// Set manufacturer
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Set hardware identifier
    pub fn with_hardware_id(mut self, hardware_id: impl Into<String>) -> Self {
        self.hardware_id = hardware_id.into();
        self
    }
}

impl fmt::Display for PortInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.device, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_port_info_builder() {
        let port = PortInfo::new("/dev/ttyUSB0", "FT232R USB UART")
            .with_manufacturer("FTDI")
            .with_hardware_id("USB VID:PID=0403:6001");

        assert_eq!(
            port,
            PortInfo {
                device: "/dev/ttyUSB0".into(),
                description: "FT232R USB UART".into(),
                manufacturer: Some("FTDI".into()),
                hardware_id: "USB VID:PID=0403:6001".into(),
            }
        );
        assert_eq!(port.to_string(), "/dev/ttyUSB0 (FT232R USB UART)");
    }
}
