//! Console output formatting.
//!
//! Human-readable progress and result lines, coloured with `console`.

use crate::types::Target;
use console::style;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::time::Duration;

/// Print the announcement shown before scanning begins.
pub fn print_scan_header(target: &Target) {
    let ports = target.ports();
    println!(
        "{} scan on {} from port {} to port {}",
        style("Starting").cyan(),
        style(target).white().bold(),
        ports.start(),
        ports.end()
    );
}

/// Print the open ports found, or a note that there were none.
pub fn print_open_ports(open_ports: &BTreeSet<u16>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_open_ports(&mut out, open_ports)
}

fn write_open_ports<W: Write>(out: &mut W, open_ports: &BTreeSet<u16>) -> io::Result<()> {
    writeln!(out)?;
    if open_ports.is_empty() {
        writeln!(out, "{}", style("No open ports found.").dim())?;
        return Ok(());
    }

    writeln!(out, "{}", style("Open Ports:").bold())?;
    for port in open_ports {
        writeln!(out, "Port {} is {}.", port, style("open").green().bold())?;
    }
    Ok(())
}

/// Print the wall-clock time the scan took.
pub fn print_duration(elapsed: Duration) {
    println!();
    println!(
        "{} {}",
        style("Scan completed in:").bold(),
        format_duration(elapsed)
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Format a duration as `H:MM:SS.ffffff`.
fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        elapsed.subsec_micros()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "0:00:01.500000");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1:02:05.000000");
    }

    #[test]
    fn test_write_open_ports() {
        console::set_colors_enabled(false);

        let mut buf = Vec::new();
        let ports: BTreeSet<u16> = [443, 22].into_iter().collect();
        write_open_ports(&mut buf, &ports).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "\nOpen Ports:\nPort 22 is open.\nPort 443 is open.\n");
    }

    #[test]
    fn test_write_no_open_ports() {
        console::set_colors_enabled(false);

        let mut buf = Vec::new();
        write_open_ports(&mut buf, &BTreeSet::new()).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "\nNo open ports found.\n");
    }
}
