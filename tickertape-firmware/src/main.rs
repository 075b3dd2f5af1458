//! Tickertape - Networked Stock Ticker Firmware
//!
//! Firmware binary for a Raspberry Pi Pico W with a 128x64 SSD1306 OLED on
//! I2C0 and a speed button. Joins the configured network, polls Finnhub for
//! quotes and scrolls them across the display; when the network is missing
//! it lists the networks it can see instead.

#![no_std]
#![no_main]

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_net::StackResources;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::pio::Pio;
use embassy_time::{Delay, Instant};
use rand_core::RngCore;
use reqwless::client::{HttpClient, TlsConfig, TlsVerify};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tickertape_core::app::AppController;
use tickertape_core::traits::Clock;
use tickertape_display::{Ssd1306, DEFAULT_ADDRESS};
use tickertape_finnhub::FinnhubSource;

use crate::config::load_config;
use crate::wifi::PicoWifi;

mod config;
mod tasks;
mod wifi;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// TLS record buffers (a full 16 KiB record plus header on receive)
const TLS_READ_BUF_SIZE: usize = 16640;
const TLS_WRITE_BUF_SIZE: usize = 4096;

/// One HTTPS connection at a time
type Tcp = TcpClient<'static, 1, 4096, 4096>;

// Static cells for driver state and network buffers (must live forever)
static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
static TCP_STATE: StaticCell<TcpClientState<1, 4096, 4096>> = StaticCell::new();
static TCP_CLIENT: StaticCell<Tcp> = StaticCell::new();
static DNS_SOCKET: StaticCell<DnsSocket<'static>> = StaticCell::new();
static TLS_READ_BUF: StaticCell<[u8; TLS_READ_BUF_SIZE]> = StaticCell::new();
static TLS_WRITE_BUF: StaticCell<[u8; TLS_WRITE_BUF_SIZE]> = StaticCell::new();

/// Milliseconds since boot from the embassy time driver
struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tickertape firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = load_config();

    // Radio: CYW43439 over PIO SPI (Pico W wiring: PWR=GP23, CS=GP25,
    // DIO=GP24, CLK=GP29)
    let fw = include_bytes!(concat!(env!("OUT_DIR"), "/43439A0.bin"));
    let clm = include_bytes!(concat!(env!("OUT_DIR"), "/43439A0_clm.bin"));

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(tasks::cyw43_task(runner)).unwrap();

    // init() loads the CLM and applies the worldwide "XX" locale; cyw43 has
    // no public country setter. XX still receives beacons on channels 12-13,
    // which is all the passive fallback scan needs.
    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("Radio initialized");

    // IP stack with DHCP
    let mut rng = RoscRng;
    let (stack, runner) = embassy_net::new(
        net_device,
        embassy_net::Config::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        rng.next_u64(),
    );
    spawner.spawn(tasks::net_task(runner)).unwrap();

    // HTTPS client for the quote source. The server certificate is not
    // verified (embedded-tls has no CA store here), so the session is
    // encrypted but unauthenticated and the API token is exposed to an
    // on-path attacker.
    let tcp = TCP_CLIENT.init(TcpClient::new(stack, TCP_STATE.init(TcpClientState::new())));
    let dns = DNS_SOCKET.init(DnsSocket::new(stack));
    let tls = TlsConfig::new(
        rng.next_u64(),
        TLS_READ_BUF.init([0; TLS_READ_BUF_SIZE]),
        TLS_WRITE_BUF.init([0; TLS_WRITE_BUF_SIZE]),
        TlsVerify::None,
    );
    let source = FinnhubSource::new(
        HttpClient::new_with_tls(tcp, dns, tls),
        config.feed.api_token.as_str(),
    );

    // Display: SSD1306 on I2C0 (SDA=GP4, SCL=GP5)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let mut oled = Ssd1306::new(bus, DEFAULT_ADDRESS);
    if let Err(e) = oled.init().await {
        // Keep running; the ticker still works without a display
        error!("OLED init failed: {}", e);
    } else {
        info!("OLED initialized");
    }

    // Speed button to ground on GP15
    let button = Input::new(p.PIN_15, Pull::Up);

    let app = AppController::new(
        config,
        PicoWifi::new(control, stack),
        source,
        oled,
        button,
        EmbassyClock,
        Delay,
    );

    info!("Tasks spawned, entering control loop");
    app.run().await
}
