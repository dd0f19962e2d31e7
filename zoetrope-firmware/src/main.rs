//! Zoetrope display module firmware
//!
//! Firmware for the display half of a split keyboard (nRF52840 with a
//! 160x68 Sharp memory LCD). Runs the shuffled art slideshow in the art
//! region, keeps the battery and link sidebar current, and speaks the
//! 4-byte link protocol with the keyboard half over UART.

#![no_std]
#![no_main]

mod art;
mod lcd;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, select4, Either, Either4};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::peripherals::{RNG, UARTE0};
use embassy_nrf::rng::{self, Rng};
use embassy_nrf::saadc::{self, ChannelConfig, Saadc, VddhDiv5Input};
use embassy_nrf::uarte::{self, UarteRx, UarteTx};
use embassy_nrf::{bind_interrupts, spim};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration, Instant, Ticker, Timer};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use {defmt_rtt as _, panic_probe as _};

use zoetrope_core::config::SlideshowConfig;
use zoetrope_core::link::{FrameParser, LinkFrame, LinkMonitor, HEARTBEAT_INTERVAL_MS};
use zoetrope_core::sequencer::Slideshow;
use zoetrope_core::status::{BatteryFilter, BatteryStatus, StatusEvent, StatusState};
use zoetrope_core::traits::{RandomError, RandomSource};
use zoetrope_display::{layout, statusbar};

use crate::art::FRAME_COUNT;
use crate::lcd::SharpLcd;

mod slideshow_config {
    include!(concat!(env!("OUT_DIR"), "/slideshow_config.rs"));
}
use slideshow_config::SLIDESHOW_INTERVAL_MS;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<embassy_nrf::peripherals::SPI3>;
    UARTE0_UART0 => uarte::InterruptHandler<UARTE0>;
    SAADC => saadc::InterruptHandler;
    RNG => rng::InterruptHandler<RNG>;
});

/// Sleep/wake requests from the keyboard half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum PowerEvent {
    Sleep,
    Wake,
}

/// Channel capacity for sidebar state changes
const STATUS_CHANNEL_SIZE: usize = 8;

/// Channel capacity for sleep/wake requests
const POWER_CHANNEL_SIZE: usize = 4;

/// Battery and link changes headed for the sidebar
static STATUS_EVENTS: Channel<CriticalSectionRawMutex, StatusEvent, STATUS_CHANNEL_SIZE> =
    Channel::new();

/// Sleep/wake requests decoded from the link
static POWER_EVENTS: Channel<CriticalSectionRawMutex, PowerEvent, POWER_CHANNEL_SIZE> =
    Channel::new();

/// Latest battery percentage, reported upstream by the TX task
static BATTERY_PERCENT: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// How often the battery is sampled
const BATTERY_SAMPLE_SECS: u64 = 5;

/// How long a quiet UART is polled before the silence counter advances
const LINK_POLL_MS: u64 = 250;

/// Flush retries before an update is dropped
const FLUSH_ATTEMPTS: u32 = 3;

/// Pause between flush retries
const FLUSH_RETRY_MS: u64 = 50;

/// Hardware RNG behind the sequencer's entropy trait.
struct HardwareEntropy {
    rng: Rng<'static, RNG>,
}

impl RandomSource for HardwareEntropy {
    fn next_u32(&mut self) -> Result<u32, RandomError> {
        let mut bytes = [0u8; 4];
        self.rng.blocking_fill_bytes(&mut bytes);
        Ok(u32::from_le_bytes(bytes))
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Zoetrope display module starting...");

    let p = embassy_nrf::init(Default::default());

    // SPI for the Sharp memory LCD (SCK=P0.20, MOSI=P0.17, CS=P0.06).
    // The panel latches on an active-high CS driven as a plain GPIO.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M1;
    let spim = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_20, p.P0_17, spi_config);
    let cs = Output::new(p.P0_06, Level::Low, OutputDrive::Standard);

    let mut panel = SharpLcd::new(spim, cs);
    if let Err(e) = panel.init().await {
        error!("Failed to initialize LCD: {:?}", e);
    } else {
        info!("LCD initialized");
    }

    // UART to the keyboard half (RX=P0.08, TX=P1.04)
    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P1_04, uart_config);
    let (tx, rx) = uart.split();

    // Battery supply sensed as VDDH/5, charger state on P0.03 (active low)
    let channel_config = ChannelConfig::single_ended(VddhDiv5Input);
    let adc = Saadc::new(p.SAADC, Irqs, saadc::Config::default(), [channel_config]);
    let charging = Input::new(p.P0_03, Pull::Up);

    // Hardware RNG feeds the shuffle
    let entropy = HardwareEntropy {
        rng: Rng::new(p.RNG, Irqs),
    };

    spawner.spawn(display_task(panel, entropy)).unwrap();
    spawner.spawn(battery_task(adc, charging)).unwrap();
    spawner.spawn(link_rx_task(rx)).unwrap();
    spawner.spawn(link_tx_task(tx)).unwrap();

    info!("All tasks spawned");
}

/// Display task - owns the panel, the sidebar state and the slideshow.
///
/// Everything that draws lives here, so a single flush covers whatever
/// changed and the panel is never written from two tasks at once.
#[embassy_executor::task]
async fn display_task(mut panel: SharpLcd<'static>, mut entropy: HardwareEntropy) {
    info!("Display task started");

    let mut status = StatusState::new();
    statusbar::draw_status(&mut panel, &status).ok();

    let config = SlideshowConfig::with_interval_ms(SLIDESHOW_INTERVAL_MS);
    let mut slideshow = match Slideshow::<FRAME_COUNT>::start(config, &mut entropy, &mut panel) {
        Ok(slideshow) => {
            info!("Slideshow running, one frame every {} ms", SLIDESHOW_INTERVAL_MS);
            Some(slideshow)
        }
        // No entropy means no shuffle. The sidebar still works, so run
        // degraded rather than looping a fixed order; a later wake retries.
        Err(e) => {
            error!("Slideshow failed to start: {:?}", e);
            None
        }
    };
    flush_with_retry(&mut panel).await;

    let mut frames = Ticker::every(Duration::from_millis(u64::from(SLIDESHOW_INTERVAL_MS)));
    let mut vcom = Ticker::every(Duration::from_secs(1));

    loop {
        match select4(
            STATUS_EVENTS.receive(),
            POWER_EVENTS.receive(),
            frames.next(),
            vcom.next(),
        )
        .await
        {
            Either4::First(event) => {
                let next = status.apply(event);
                if next != status {
                    status = next;
                    statusbar::draw_status(&mut panel, &status).ok();
                    flush_with_retry(&mut panel).await;
                }
            }
            Either4::Second(PowerEvent::Sleep) => {
                if slideshow.take().is_some() {
                    info!("Sleep: slideshow stopped");
                    panel.fill_solid(&layout::art_region(), BinaryColor::Off).ok();
                    flush_with_retry(&mut panel).await;
                }
            }
            Either4::Second(PowerEvent::Wake) => {
                if slideshow.is_none() {
                    match Slideshow::start(config, &mut entropy, &mut panel) {
                        Ok(restarted) => {
                            slideshow = Some(restarted);
                            frames.reset();
                            flush_with_retry(&mut panel).await;
                            info!("Wake: slideshow restarted");
                        }
                        Err(e) => error!("Slideshow failed to restart: {:?}", e),
                    }
                }
            }
            Either4::Third(()) => {
                if let Some(show) = slideshow.as_mut() {
                    match show.tick(&mut entropy, &mut panel) {
                        Ok(frame) => debug!("Frame {} ({}/{})", frame, show.cursor(), FRAME_COUNT),
                        Err(e) => warn!("Slideshow tick failed: {:?}", e),
                    }
                    flush_with_retry(&mut panel).await;
                }
            }
            Either4::Fourth(()) => {
                if let Err(e) = panel.maintain().await {
                    warn!("VCOM maintain failed: {:?}", e);
                }
            }
        }
    }
}

/// Flush the panel, retrying a few times before dropping the update.
///
/// Dirty lines stay dirty across a failed flush, so a dropped update is
/// resent with the next one.
async fn flush_with_retry(panel: &mut SharpLcd<'static>) {
    for attempt in 1..=FLUSH_ATTEMPTS {
        match panel.flush().await {
            Ok(()) => return,
            Err(e) => {
                warn!("LCD flush failed (attempt {}): {:?}", attempt, e);
                Timer::after_millis(FLUSH_RETRY_MS).await;
            }
        }
    }
    error!("LCD flush abandoned after {} attempts", FLUSH_ATTEMPTS);
}

/// Battery task - SAADC readings through the moving average filter,
/// published to the sidebar and the TX task when they change.
#[embassy_executor::task]
async fn battery_task(mut adc: Saadc<'static, 1>, charging: Input<'static>) {
    info!("Battery task started");

    let mut filter = BatteryFilter::new();
    let mut published: Option<BatteryStatus> = None;

    loop {
        let mut buf = [0i16; 1];
        adc.sample(&mut buf).await;

        let mv = vddh_millivolts(buf[0]);
        let status = BatteryStatus {
            percent: filter.update(mv),
            charging: charging.is_low(),
        };

        if published != Some(status) {
            debug!(
                "Battery: {} mV -> {}%, charging={}",
                mv, status.percent, status.charging
            );
            STATUS_EVENTS.send(StatusEvent::Battery(status)).await;
            BATTERY_PERCENT.signal(status.percent);
            published = Some(status);
        }

        Timer::after_secs(BATTERY_SAMPLE_SECS).await;
    }
}

/// Convert a raw VDDH/5 sample to supply millivolts.
///
/// 12-bit result, gain 1/6 against the 0.6 V reference: full scale is
/// 3.6 V at the input, times five for the internal divider.
fn vddh_millivolts(raw: i16) -> u16 {
    let raw = raw.max(0) as u32;
    (raw * 18_000 / 4_096) as u16
}

/// Link RX task - parses frames from the keyboard half and tracks link
/// liveness for the sidebar.
#[embassy_executor::task]
async fn link_rx_task(mut rx: UarteRx<'static, UARTE0>) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut monitor = LinkMonitor::new();
    let mut published = monitor.state();
    let mut last_poll = Instant::now();
    let mut buf = [0u8; 1];

    loop {
        let result = with_timeout(Duration::from_millis(LINK_POLL_MS), rx.read(&mut buf)).await;

        monitor.advance(last_poll.elapsed().as_millis() as u32);
        last_poll = Instant::now();

        match result {
            Ok(Ok(())) => match parser.feed(buf[0]) {
                Ok(Some(frame)) => handle_frame(frame, &mut monitor).await,
                Ok(None) => {}
                Err(e) => warn!("Link frame error: {:?}", e),
            },
            Ok(Err(e)) => {
                warn!("UART read error: {:?}", e);
                Timer::after_millis(10).await;
            }
            // Quiet bus; the silence counter above is the only effect.
            Err(_) => {}
        }

        let state = monitor.state();
        if state != published {
            info!("Link {:?}", state);
            STATUS_EVENTS.send(StatusEvent::Link(state)).await;
            published = state;
        }
    }
}

/// Dispatch one parsed link frame.
async fn handle_frame(frame: LinkFrame, monitor: &mut LinkMonitor) {
    match frame {
        LinkFrame::Heartbeat { seq } => {
            let missed = monitor.heartbeat(seq);
            if missed > 0 {
                warn!("Link: {} heartbeats missed", missed);
            } else {
                trace!("Heartbeat {}", seq);
            }
        }
        LinkFrame::Sleep => {
            debug!("Sleep requested");
            POWER_EVENTS.send(PowerEvent::Sleep).await;
        }
        LinkFrame::Wake => {
            debug!("Wake requested");
            POWER_EVENTS.send(PowerEvent::Wake).await;
        }
        LinkFrame::Battery { .. } => {
            // Battery reports flow the other way; tolerated, not used.
            trace!("Ignoring inbound battery frame");
        }
    }
}

/// Link TX task - heartbeats on a fixed cadence, battery reports as they
/// arrive from the battery task.
#[embassy_executor::task]
async fn link_tx_task(mut tx: UarteTx<'static, UARTE0>) {
    info!("Link TX task started");

    let mut heartbeat = Ticker::every(Duration::from_millis(u64::from(HEARTBEAT_INTERVAL_MS)));
    let mut seq: u8 = 0;

    loop {
        let frame = match select(heartbeat.next(), BATTERY_PERCENT.wait()).await {
            Either::First(()) => {
                seq = seq.wrapping_add(1);
                LinkFrame::Heartbeat { seq }
            }
            Either::Second(percent) => LinkFrame::Battery { percent },
        };

        let bytes = frame.encode();
        if let Err(e) = tx.write(&bytes).await {
            warn!("UART write error: {:?}", e);
            Timer::after_millis(10).await;
        }
    }
}
