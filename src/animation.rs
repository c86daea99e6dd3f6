//! The noise animation as a whole: field, color mapper, and current parameters.
//!
//! See [`Animation`] for usage.

use crate::config::{AnimationConfig, HEIGHT, WIDTH};
use crate::controls::{Action, KeyEvent, action_for};
use crate::frame::MatrixFrame;
use crate::noise::NoiseField;
use crate::render::ColorMapper;
use crate::rng::Rng16;

/// Owns everything needed to produce frames and react to keys.
///
/// # Example
///
/// ```rust
/// use trellis_noise::animation::Animation;
/// use trellis_noise::controls::{Action, KeyEvent};
/// use trellis_noise::frame::MatrixFrame;
/// use trellis_noise::rng::Rng16;
///
/// let mut animation = Animation::new(Rng16::default());
/// let mut frame = MatrixFrame::new();
///
/// // Bottom-left key: slowest speed.
/// assert_eq!(animation.handle_key(KeyEvent::pressed(48)), Some(Action::SetSpeed(2)));
/// animation.next_frame(&mut frame);
/// assert_eq!(animation.config().speed, 2);
/// ```
#[derive(Clone, Debug)]
pub struct Animation {
    noise: NoiseField<WIDTH, HEIGHT>,
    mapper: ColorMapper,
    config: AnimationConfig,
    rng: Rng16,
}

impl Animation {
    /// Start at a random point in noise space with the power-on preset.
    #[must_use]
    pub fn new(mut rng: Rng16) -> Self {
        let noise = NoiseField::new(&mut rng);
        let config = AnimationConfig::power_on(&mut rng);
        Self {
            noise,
            mapper: ColorMapper::new(),
            config,
            rng,
        }
    }

    /// Current parameters.
    #[must_use]
    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Current noise field.
    #[must_use]
    pub const fn noise(&self) -> &NoiseField<WIDTH, HEIGHT> {
        &self.noise
    }

    /// React to a key event, returning the action taken (if any).
    ///
    /// The new parameters show up together on the next frame.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<Action> {
        let action = action_for(event)?;
        self.config = self.config.apply(action, &mut self.rng);
        Some(action)
    }

    /// Advance the noise field one step and paint `frame` from it.
    pub fn next_frame(&mut self, frame: &mut MatrixFrame) {
        self.noise.advance(self.config.speed, self.config.scale);
        self.mapper.paint(&self.noise, &self.config, frame);
    }
}
