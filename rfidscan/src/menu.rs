//! Interactive menu

use std::io::{self, Write};

use crate::monitor::{MonitorMode, MonitorOptions};

/// Menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ContinuousDetailed,
    ContinuousSimple,
    TimedDetailed,
    TimedSimple,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::ContinuousDetailed,
        MenuChoice::ContinuousSimple,
        MenuChoice::TimedDetailed,
        MenuChoice::TimedSimple,
        MenuChoice::Exit,
    ];

    /// Parse a typed selection (`"1"` to `"5"`)
    pub fn parse(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ContinuousDetailed => "Continuous monitoring (detailed)",
            Self::ContinuousSimple => "Continuous monitoring (simple)",
            Self::TimedDetailed => "30-second monitoring (detailed)",
            Self::TimedSimple => "30-second monitoring (simple)",
            Self::Exit => "Exit",
        }
    }

    /// Session settings for this entry, `None` for exit
    pub fn options(&self) -> Option<MonitorOptions> {
        match self {
            Self::ContinuousDetailed => Some(MonitorOptions::continuous(MonitorMode::Detailed)),
            Self::ContinuousSimple => Some(MonitorOptions::continuous(MonitorMode::Simple)),
            Self::TimedDetailed => Some(MonitorOptions::timed(MonitorMode::Detailed)),
            Self::TimedSimple => Some(MonitorOptions::timed(MonitorMode::Simple)),
            Self::Exit => None,
        }
    }
}

/// Print the menu and prompt
pub fn render(out: &mut impl Write, port: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "RFID Reader Test ({})", port)?;
    writeln!(out, "{}", "=".repeat(60))?;
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, choice.label())?;
    }
    write!(out, "Select an option (1-5): ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::ContinuousDetailed));
        assert_eq!(MenuChoice::parse(" 2\n"), Some(MenuChoice::ContinuousSimple));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::TimedDetailed));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::TimedSimple));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "0", "6", "-1", "one", "1.5"] {
            assert_eq!(MenuChoice::parse(input), None, "input {:?}", input);
        }
    }

    #[test]
    fn test_options() {
        assert_eq!(
            MenuChoice::TimedSimple.options(),
            Some(MonitorOptions {
                mode: MonitorMode::Simple,
                duration: Some(Duration::from_secs(30)),
            })
        );
        assert_eq!(
            MenuChoice::ContinuousDetailed.options(),
            Some(MonitorOptions {
                mode: MonitorMode::Detailed,
                duration: None,
            })
        );
        assert_eq!(MenuChoice::Exit.options(), None);
    }

    #[test]
    fn test_render() {
        let mut buf = Vec::new();
        render(&mut buf, "COM4").unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("RFID Reader Test (COM4)"));
        assert!(text.contains("1. Continuous monitoring (detailed)"));
        assert!(text.contains("5. Exit"));
        assert!(text.ends_with("Select an option (1-5): "));
    }
}
