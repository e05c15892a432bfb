//! rfidscan command line tool

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info};

use rfidscan::cli::{Cli, Command};
use rfidscan::{menu, report, MenuChoice, Monitor, Reader, SerialTransport};
use rfidscan_transport::discovery;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    rfidscan::logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("✗ {:#}", e);
            if let Some(hint) = e.downcast_ref::<rfidscan::Error>().and_then(|e| e.hint()) {
                eprintln!("   {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    match &cli.command {
        Some(Command::Validate { numbers }) => {
            for number in numbers {
                report::validation(&mut stdout, number)?;
            }
            return Ok(());
        }
        Some(Command::Ports) => return list_ports(&mut stdout),
        _ => {}
    }

    let port = resolve_port(&cli, &mut stdout)?;
    report::settings(&mut stdout, &port, &cli.serial_config())?;

    let reader = Reader::serial(port.clone(), cli.serial_config())
        .with_read_timeout(cli.read_timeout());
    let mut monitor = Monitor::new(reader);

    let (stop_tx, stop) = watch::channel(false);
    let stop_tx = Arc::new(stop_tx);
    tokio::spawn(forward_ctrl_c(Arc::clone(&stop_tx)));

    match cli.command.as_ref().and_then(Command::monitor_options) {
        Some(options) => {
            monitor
                .run(options, &mut stdout, &stop)
                .await
                .with_context(|| format!("Monitoring {} failed", port))?;
        }
        None => menu_loop(&mut monitor, &port, &stop_tx, &stop).await?,
    }

    Ok(())
}

/// Turn every Ctrl+C into a stop request
async fn forward_ctrl_c(stop_tx: Arc<watch::Sender<bool>>) {
    while tokio::signal::ctrl_c().await.is_ok() {
        info!("Stop requested");
        stop_tx.send_replace(true);
    }
}

fn resolve_port(cli: &Cli, out: &mut impl Write) -> anyhow::Result<String> {
    if let Some(port) = &cli.port {
        return Ok(port.clone());
    }

    writeln!(out, "🔍 Detecting available serial ports...")?;
    let port = discovery::detect_best_port().map_err(rfidscan::Error::from)?;
    writeln!(out, "✓ Selected {} as the best available port", port)?;

    Ok(port)
}

fn list_ports(out: &mut impl Write) -> anyhow::Result<()> {
    let ports = discovery::list_ports().map_err(rfidscan::Error::from)?;

    let probed: Vec<_> = ports
        .into_iter()
        .map(|port| {
            let ok = discovery::probe(&port.device);
            (port, ok)
        })
        .collect();

    report::ports(out, &probed)?;
    Ok(())
}

async fn menu_loop(
    monitor: &mut Monitor<SerialTransport>,
    port: &str,
    stop_tx: &watch::Sender<bool>,
    stop: &watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interrupted = stop.clone();

    loop {
        menu::render(&mut stdout, port)?;
        interrupted.borrow_and_update();

        // Ctrl+C at the prompt leaves the menu
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = interrupted.changed() => None,
        };

        let Some(line) = line else {
            writeln!(stdout)?;
            break;
        };

        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(stdout, "✗ Invalid choice: {}", line.trim())?;
            continue;
        };

        let Some(options) = choice.options() else {
            break;
        };

        stop_tx.send_replace(false);
        monitor
            .run(options, &mut stdout, stop)
            .await
            .with_context(|| format!("Monitoring {} failed", port))?;
    }

    if monitor.read_count() > 0 {
        writeln!(stdout, "Total reads this run: {}", monitor.read_count())?;
    }
    writeln!(stdout, "Goodbye!")?;

    Ok(())
}
