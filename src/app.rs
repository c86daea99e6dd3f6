//! The firmware's control loop.
//!
//! One task, no concurrency: poll the keys (at most every
//! [`POLL_INTERVAL`](crate::config::POLL_INTERVAL)), then render and show a
//! frame, forever.

use defmt::{debug, error, info, warn};
use embassy_time::{Duration, Instant, Timer};

use crate::Error;
use crate::animation::Animation;
use crate::config::POLL_INTERVAL;
use crate::controls::{Action, Edge};
use crate::frame::MatrixFrame;
use crate::palette::presets::PRESETS;
use crate::rng::Rng16;
use crate::trellis::{KeyEvents, KeyPad, LedMatrix};

/// Run the animation on `matrix` forever.
///
/// Bus errors are logged and the loop carries on with the next frame.
pub async fn run<M>(matrix: &mut M, rng: Rng16) -> !
where
    M: LedMatrix + KeyPad,
{
    let mut animation = Animation::new(rng);
    let mut frame = MatrixFrame::new();
    let mut events = KeyEvents::new();
    let mut next_poll = Instant::now();
    info!("noise animation running: {}", animation.config().brightness);

    loop {
        let now = Instant::now();
        if now >= next_poll {
            next_poll = now + POLL_INTERVAL;
            events.clear();
            if let Err(err) = matrix.poll(&mut events).await {
                warn!("key poll failed: {}", err);
            }
            for &event in &events {
                if event.edge == Edge::Rising {
                    debug!("pressed {}", event.key);
                }
                if let Some(action) = animation.handle_key(event) {
                    log_action(action);
                }
            }
        }

        animation.next_frame(&mut frame);
        matrix.set_brightness(animation.config().brightness);
        if let Err(err) = matrix.write_frame(&frame).await {
            warn!("frame write failed: {}", err);
        }
        if let Err(err) = matrix.show().await {
            warn!("frame show failed: {}", err);
        }
    }
}

fn log_action(action: Action) {
    match action {
        Action::SelectPreset(preset_index) => {
            let name = PRESETS
                .get(usize::from(preset_index))
                .map_or("?", |preset| preset.name);
            info!("preset {}: {=str}", preset_index, name);
        }
        other => info!("{}", other),
    }
}

/// Stop for good after an unrecoverable start-up failure.
///
/// Logs once, then idles forever; there is no retry.
pub async fn halt(err: Error) -> ! {
    error!("trellis init failed, halting: {}", err);
    loop {
        Timer::after(Duration::from_millis(1)).await;
    }
}
