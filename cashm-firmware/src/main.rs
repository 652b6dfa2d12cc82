//! CASHM Board A - Note Sorting Gantry Firmware
//!
//! Firmware for the RP2040 controller of the kiosk's CoreXY sorting gantry.
//! The kiosk host sends one line per note (its face value) or a named
//! command over UART; the gantry picks the note off the intake tray with a
//! vacuum cup and drops it into the compartment for its denomination.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cashm_core::sorter::Sorter;
use cashm_drivers::{GantryPins, GantryPolarity, PinGantry, RelayPump};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Host link baud rate
const HOST_BAUD: u32 = 115_200;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("CASHM Board A firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Host link: GPIO0 TX, GPIO1 RX
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = HOST_BAUD;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for host communication");

    // Stepper drivers: A STEP/DIR GPIO2/3, B GPIO4/5, Z GPIO6/7, shared EN GPIO8.
    // EN is active low; start high so the drivers stay released until homing.
    // Switches: X/Y/Z limits GPIO9/10/11, e-stop GPIO12, all to ground.
    let pins = GantryPins {
        a_step: Output::new(p.PIN_2, Level::Low),
        a_dir: Output::new(p.PIN_3, Level::Low),
        b_step: Output::new(p.PIN_4, Level::Low),
        b_dir: Output::new(p.PIN_5, Level::Low),
        z_step: Output::new(p.PIN_6, Level::Low),
        z_dir: Output::new(p.PIN_7, Level::Low),
        enable: Output::new(p.PIN_8, Level::High),
        x_limit: Input::new(p.PIN_9, Pull::Up),
        y_limit: Input::new(p.PIN_10, Pull::Up),
        z_limit: Input::new(p.PIN_11, Pull::Up),
        estop: Input::new(p.PIN_12, Pull::Up),
    };
    let gantry = PinGantry::new(pins, GantryPolarity::default());

    // Vacuum pump relay module on GPIO13, active low
    let pump = RelayPump::new_active_low(Output::new(p.PIN_13, Level::High));

    info!("Gantry and pump initialized");

    let sorter = match Sorter::new(gantry, pump, Delay, &config) {
        Ok(sorter) => sorter,
        Err(e) => {
            // config::load only returns validated configurations
            defmt::panic!("Controller rejected configuration: {:?}", e);
        }
    };

    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::serial_tx_task(tx)).unwrap();
    spawner.spawn(tasks::controller_task(sorter)).unwrap();

    info!("All tasks spawned, firmware running");
}
