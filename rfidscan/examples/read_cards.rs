//! Read a few cards and validate any TC Kimlik numbers

use rfidscan::{Reader, SerialConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> rfidscan::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Change to your reader's port
    let port = std::env::var("READER_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    println!("Opening {}...", port);

    let mut reader = Reader::serial(port, SerialConfig::default());

    reader.connect().await?;
    println!("✓ Connected! Present up to 5 cards");

    let mut reads = 0;
    while reads < 5 {
        let Some(frame) = reader.next_frame(reads + 1).await? else {
            continue;
        };
        reads += 1;

        println!("{}", frame);

        if let Some(result) = frame.validation() {
            println!("  valid: {}", result.is_valid);
        }
    }

    reader.disconnect().await?;
    println!("✓ Disconnected");

    Ok(())
}
