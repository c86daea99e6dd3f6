#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c, InterruptHandler};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Instant};
use trellis_noise::{
    Result, app,
    config::I2C_FREQUENCY_HZ,
    rng::Rng16,
    trellis::MultiTrellis,
};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    I2C0_IRQ => InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    match inner_main().await {
        Err(err) => app::halt(err).await,
    }
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // I2C0: SDA on GP4, SCL on GP5. All four panels share the bus.
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY_HZ;
    let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, config);

    let mut trellis = MultiTrellis::new(bus, Delay);
    trellis.begin().await?;
    defmt::info!("trellis ready");

    // Boot time varies with bus timing, which is enough to vary the start.
    let mut rng = Rng16::default();
    rng.add_entropy(Instant::now().as_ticks() as u16);

    app::run(&mut trellis, rng).await
}
