//! Host UART transmit task
//!
//! Writes each status line from the controller, CRLF terminated.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::RESPONSES;

/// Serial TX task - sends status lines to the host
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let response = RESPONSES.receive().await;
        let line = response.to_line();

        if let Err(e) = write_line(&mut tx, line.as_bytes()).await {
            warn!("Failed to send status line: {:?}", e);
            continue;
        }
        trace!("TX: {}", line.as_str());
    }
}

async fn write_line(tx: &mut BufferedUartTx, line: &[u8]) -> Result<(), embassy_rp::uart::Error> {
    tx.write_all(line).await?;
    tx.write_all(b"\r\n").await?;
    tx.flush().await
}
