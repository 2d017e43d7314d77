//! Lumina - Proximity-Dimmed Luminaire Firmware
//!
//! Main firmware binary for RP2040-based lamp boards. A single proximity
//! sensor switches and dims the LED output.
//!
//! Two execution contexts:
//! - a high-priority interrupt executor running the proximity edge task
//!   and the 500 Hz fade task, so edges are timestamped even while the
//!   main loop is busy sampling the thermistor
//! - the thread-mode main loop running `Lamp::tick` every 10 ms, or asleep
//!   until the next proximity edge while the lamp is off

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{Adc, Channel as AdcChannel};
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::{Config as PwmHwConfig, Pwm};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use lumina_core::config::{BoardConfig, PinConfig, PwmConfig, ThermistorConfig};
use lumina_core::scheduler::Lamp;
use lumina_core::shared::SharedState;
use lumina_drivers::sensor::NtcThermistor;
use lumina_hal::{ProximityLine, WallClock};
use lumina_hal_rp2040::{
    EmbassyClock, ProximityInput, Rp2040Adc, Rp2040FlashStore, Rp2040Pwm, Rp2040Watchdog,
};

mod channels;
mod controller;
mod tasks;

use channels::FADE_KICK;

include!(concat!(env!("OUT_DIR"), "/board.rs"));

// PWM slice 0 and ADC0 are wired on the board; board.toml must agree
const _: () = assert!(BOARD.pins.pwm_a == 16 && BOARD.pins.pwm_b == 17);
const _: () = assert!(BOARD.pins.thermistor == 26);
const _: () = assert!(BOARD.pins.proximity == 2);

/// LED output type shared with interrupt context
pub type LedPwm = Rp2040Pwm<'static>;

/// Main-loop controller with the board drivers
pub type AppLamp = Lamp<
    'static,
    LedPwm,
    Rp2040FlashStore<'static>,
    NtcThermistor<Rp2040Adc<'static>, Delay>,
    Rp2040Watchdog,
>;

/// State shared between the edge/fade tasks and the main loop
pub static SHARED: SharedState<LedPwm> = SharedState::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Lumina firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let watchdog = Rp2040Watchdog::new(Watchdog::new(p.WATCHDOG));
    if watchdog.caused_reset() {
        warn!("Previous reset was caused by the watchdog");
    }

    // LED output on both channels of slice 0
    let pwm = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, PwmHwConfig::default());
    SHARED.install_output(Rp2040Pwm::new(pwm, &BOARD.pwm));

    // Thermistor divider on ADC0
    let adc = Adc::new_blocking(p.ADC, Default::default());
    let channel = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let sensor = NtcThermistor::new(Rp2040Adc::new(adc, channel), Delay, BOARD.thermistor);

    let store = Rp2040FlashStore::new(Flash::new_blocking(p.FLASH));

    // Pull the idle level so a missing sensor reads as "clear"
    let pull = if BOARD.pins.proximity_inverted {
        Pull::Up
    } else {
        Pull::Down
    };
    let proximity = ProximityInput::new(Input::new(p.PIN_2, pull), BOARD.pins.proximity_inverted);
    let asserted = proximity.is_asserted();

    let clock = EmbassyClock;
    let lamp = Lamp::boot(
        &SHARED,
        store,
        BOARD.store_offset,
        sensor,
        watchdog,
        asserted,
        clock.now_ms(),
    );

    // Power-up fade-in
    FADE_KICK.signal(());

    // Edge and fade handling preempt the main loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(tasks::proximity_task(proximity)).unwrap();
    high.spawn(tasks::fade_task()).unwrap();

    info!("All tasks spawned, firmware running");
    controller::run(lamp).await
}
