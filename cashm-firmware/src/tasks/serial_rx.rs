//! Host UART receive task
//!
//! Assembles newline-terminated lines from the kiosk host and turns each
//! one into a request for the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use cashm_protocol::{Command, LineBuffer, Request};

use crate::channels::REQUESTS;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - receives and parses host lines
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    let request: Request = match lines.feed(byte) {
                        Ok(Some(line)) => Command::parse(&line),
                        Ok(None) => continue,
                        Err(e) => Err(e.into()),
                    };
                    forward(request).await;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Hand a request to the controller
async fn forward(request: Request) {
    match &request {
        Ok(command) => debug!("Command: {:?}", command),
        Err(e) => debug!("Rejected line: {:?}", e),
    }
    // Blocks while a cycle runs and the queue is full; the UART buffer absorbs the backlog
    REQUESTS.send(request).await;
}
