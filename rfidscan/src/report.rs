//! Console reports
//!
//! Everything the operator sees goes through here, written to any
//! [`io::Write`] so output can be captured in tests.

use std::io::{self, Write};
use std::time::Duration;

use rfidscan_core::{
    classify,
    frame::{hex_to_decimal, spaced_hex},
    tckimlik, CardFormat, RawFrame, ValidationResult,
};
use rfidscan_transport::SerialConfig;
use rfidscan_types::PortInfo;

use crate::monitor::{MonitorMode, MonitorSummary, StopReason};

const RULE_WIDE: usize = 60;
const RULE_NARROW: usize = 50;

fn rule(out: &mut impl Write, ch: char, width: usize) -> io::Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(width))
}

fn yes_no(ok: bool) -> &'static str {
    if ok { "✓ Yes" } else { "✗ No" }
}

/// Port and line settings
pub fn settings(out: &mut impl Write, port: &str, config: &SerialConfig) -> io::Result<()> {
    rule(out, '=', RULE_WIDE)?;
    writeln!(out, "Port: {}", port)?;
    writeln!(out, "Baudrate: {}", config.baud_rate)?;
    writeln!(out, "Data bits: {:?}", config.data_bits)?;
    writeln!(out, "Parity: {:?}", config.parity)?;
    writeln!(out, "Stop bits: {:?}", config.stop_bits)?;
    writeln!(out, "Flow control: {:?}", config.flow_control)?;
    rule(out, '=', RULE_WIDE)
}

/// Banner printed when a monitoring session starts
pub fn session_banner(
    out: &mut impl Write,
    mode: MonitorMode,
    duration: Option<Duration>,
) -> io::Result<()> {
    writeln!(out)?;
    rule(out, '=', RULE_WIDE)?;
    writeln!(out, "RFID Monitoring Started ({} mode)", mode)?;
    rule(out, '=', RULE_WIDE)?;
    writeln!(out, "Supported Card Types:")?;
    for format in &CardFormat::ALL[..4] {
        writeln!(out, "  • {}", format)?;
    }
    rule(out, '=', RULE_WIDE)?;
    if let Some(duration) = duration {
        writeln!(out, "Monitoring for {} seconds", duration.as_secs())?;
    }
    writeln!(out, "Please scan an RFID card/tag")?;
    writeln!(out, "Press Ctrl+C to stop")?;
    writeln!(out)
}

/// Report for one frame
pub fn frame(out: &mut impl Write, frame: &RawFrame, mode: MonitorMode) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "[{}] Read #{}",
        frame.captured_at().format("%Y-%m-%d %H:%M:%S"),
        frame.read_number()
    )?;
    rule(out, '-', RULE_NARROW)?;

    match mode {
        MonitorMode::Detailed => detailed(out, frame)?,
        MonitorMode::Simple => {
            writeln!(out, "Card Type: {}", frame.format())?;
            writeln!(out, "Data: {}", frame.text())?;
        }
    }

    rule(out, '-', RULE_NARROW)
}

fn detailed(out: &mut impl Write, frame: &RawFrame) -> io::Result<()> {
    writeln!(out, "Card Type: {}", frame.format())?;
    writeln!(out, "Raw Data: {}", frame.text())?;
    writeln!(out, "Hex Data: {}", frame.hex())?;
    writeln!(
        out,
        "Decimal Data: {}",
        frame.decimal().as_deref().unwrap_or("Conversion error")
    )?;
    writeln!(out, "Data Length: {} characters", frame.len())?;
    writeln!(
        out,
        "Timestamp: {}",
        frame.captured_at().format("%Y-%m-%dT%H:%M:%S%.6f")
    )?;
    writeln!(out)?;

    if let Some(result) = frame.validation() {
        writeln!(out, "Turkish ID Card Details:")?;
        writeln!(out, "  Full Number: {}", frame.text())?;
        validation_lines(out, &result)?;
        writeln!(out)?;
    } else if let Some(details) = frame.rfid_details() {
        writeln!(out, "RFID Card Details:")?;
        writeln!(out, "  Card Number: {}", details.card_number)?;
        writeln!(out, "  Format: {}", details.length_format)?;
        writeln!(out, "  Numeric Only: {}", details.numeric_only)?;
        writeln!(out, "  Alpha-Numeric: {}", details.alphanumeric)?;
        writeln!(out)?;
    }

    Ok(())
}

fn validation_lines(out: &mut impl Write, result: &ValidationResult) -> io::Result<()> {
    writeln!(out, "  Valid: {}", yes_no(result.is_valid))?;
    if let Some(reason) = result.failure_reason() {
        writeln!(out, "  Reason: {}", reason)?;
    }
    writeln!(
        out,
        "  Check Digit 10: expected {}, actual {}",
        result.check_digit_10_expected, result.check_digit_10_actual
    )?;
    writeln!(
        out,
        "  Check Digit 11: expected {}, actual {}",
        result.check_digit_11_expected, result.check_digit_11_actual
    )?;
    writeln!(
        out,
        "  Sums: odd={}, even={}, first ten={}",
        result.odd_sum, result.even_sum, result.first_ten_sum
    )
}

/// Summary printed when a monitoring session ends
pub fn session_summary(out: &mut impl Write, summary: &MonitorSummary) -> io::Result<()> {
    writeln!(out)?;
    match summary.stopped_by {
        StopReason::DurationElapsed => writeln!(
            out,
            "Monitoring stopped after {} seconds",
            summary.elapsed.as_secs()
        )?,
        StopReason::Interrupted => writeln!(out, "✓ Monitoring stopped by user")?,
    }
    writeln!(out, "Total reads: {}", summary.reads)
}

/// Standalone check of a number typed on the command line
///
/// Returns whether the input is a valid TC Kimlik number.
pub fn validation(out: &mut impl Write, input: &str) -> io::Result<bool> {
    writeln!(out)?;
    writeln!(out, "Testing: {}", input)?;
    writeln!(out, "Card Type: {}", classify(input))?;

    let valid = match tckimlik::validate(input) {
        Ok(result) => {
            validation_lines(out, &result)?;
            result.is_valid
        }
        Err(e) => {
            writeln!(out, "  Valid: {}", yes_no(false))?;
            writeln!(out, "  Error: {}", e)?;
            false
        }
    };

    writeln!(out, "  Hex Data: {}", spaced_hex(input.as_bytes()))?;
    writeln!(
        out,
        "  Decimal Data: {}",
        hex_to_decimal(&hex::encode_upper(input)).as_deref().unwrap_or("N/A")
    )?;

    Ok(valid)
}

/// Port listing with probe results
pub fn ports(out: &mut impl Write, ports: &[(PortInfo, bool)]) -> io::Result<()> {
    writeln!(out, "Available Serial Ports:")?;
    rule(out, '=', 40)?;

    if ports.is_empty() {
        writeln!(out, "No serial ports found!")?;
        writeln!(out, "Please check your hardware connections.")?;
        return Ok(());
    }

    for (i, (port, ok)) in ports.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, port.device)?;
        writeln!(out, "   Description: {}", port.description)?;
        writeln!(
            out,
            "   Manufacturer: {}",
            port.manufacturer.as_deref().unwrap_or("n/a")
        )?;
        writeln!(out, "   Hardware ID: {}", port.hardware_id)?;
        writeln!(out, "   Opens: {}", yes_no(*ok))?;
        writeln!(out)?;
    }

    writeln!(out, "Summary:")?;
    rule(out, '-', 40)?;

    let working: Vec<&str> = ports
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(p, _)| p.device.as_str())
        .collect();

    if working.is_empty() {
        writeln!(out, "✗ No working ports found")?;
        writeln!(out, "   Check your hardware connections and drivers")
    } else {
        writeln!(out, "✓ Working ports: {}", working.join(", "))?;
        writeln!(out, "   Recommended: {}", working[0])
    }
}
