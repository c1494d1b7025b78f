use super::scene::Vec2;

const SHAKE_CYCLES_PER_SECOND_X: f32 = 23.0;
const SHAKE_CYCLES_PER_SECOND_Y: f32 = 17.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TimedEffect {
    duration_seconds: f32,
    elapsed_seconds: f32,
}

impl TimedEffect {
    fn new(duration_seconds: f32) -> Self {
        Self {
            duration_seconds: duration_seconds.max(0.0),
            elapsed_seconds: 0.0,
        }
    }

    fn progress(&self) -> f32 {
        if self.duration_seconds <= 0.0 {
            return 1.0;
        }
        (self.elapsed_seconds / self.duration_seconds).clamp(0.0, 1.0)
    }

    fn finished(&self) -> bool {
        self.elapsed_seconds >= self.duration_seconds
    }
}

/// Camera shake and fade, advanced once per tick by the scene host.
///
/// A finished fade holds the screen black until [`CameraEffects::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraEffects {
    shake: Option<TimedEffect>,
    fade: Option<TimedEffect>,
}

impl CameraEffects {
    pub fn shake(&mut self, duration_seconds: f32) {
        self.shake = Some(TimedEffect::new(duration_seconds));
    }

    pub fn fade_out(&mut self, duration_seconds: f32) {
        self.fade = Some(TimedEffect::new(duration_seconds));
    }

    pub fn reset(&mut self) {
        self.shake = None;
        self.fade = None;
    }

    pub fn tick(&mut self, dt_seconds: f32) {
        if let Some(shake) = &mut self.shake {
            shake.elapsed_seconds += dt_seconds;
        }
        if self.shake.is_some_and(|shake| shake.finished()) {
            self.shake = None;
        }
        if let Some(fade) = &mut self.fade {
            fade.elapsed_seconds = (fade.elapsed_seconds + dt_seconds).min(fade.duration_seconds);
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.shake.is_some() || self.fade.is_some()
    }

    /// Offset applied to every world draw; decays linearly to zero.
    pub fn shake_offset(&self, amplitude: f32) -> Vec2 {
        let Some(shake) = self.shake else {
            return Vec2::default();
        };
        let strength = amplitude * (1.0 - shake.progress());
        let t = shake.elapsed_seconds * std::f32::consts::TAU;
        Vec2 {
            x: (t * SHAKE_CYCLES_PER_SECOND_X).sin() * strength,
            y: (t * SHAKE_CYCLES_PER_SECOND_Y).cos() * strength,
        }
    }

    /// 0.0 is untouched, 1.0 is fully black.
    pub fn fade_alpha(&self) -> f32 {
        self.fade.map_or(0.0, |fade| fade.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_effects_have_no_offset_or_fade() {
        let fx = CameraEffects::default();
        assert!(!fx.is_active());
        assert_eq!(fx.shake_offset(4.0), Vec2::default());
        assert_eq!(fx.fade_alpha(), 0.0);
    }

    #[test]
    fn shake_expires_after_its_duration() {
        let mut fx = CameraEffects::default();
        fx.shake(0.5);
        fx.tick(0.25);
        assert!(fx.is_shaking());
        fx.tick(0.25);
        assert!(!fx.is_shaking());
        assert_eq!(fx.shake_offset(4.0), Vec2::default());
    }

    #[test]
    fn shake_offset_stays_within_amplitude() {
        let mut fx = CameraEffects::default();
        fx.shake(1.0);
        for _ in 0..30 {
            fx.tick(1.0 / 60.0);
            let offset = fx.shake_offset(3.0);
            assert!(offset.x.abs() <= 3.0);
            assert!(offset.y.abs() <= 3.0);
        }
    }

    #[test]
    fn fade_ramps_and_holds_until_reset() {
        let mut fx = CameraEffects::default();
        fx.fade_out(0.25);
        fx.tick(0.125);
        assert!((fx.fade_alpha() - 0.5).abs() < 0.0001);
        fx.tick(1.0);
        assert_eq!(fx.fade_alpha(), 1.0);
        assert!(fx.is_active());

        fx.reset();
        assert_eq!(fx.fade_alpha(), 0.0);
        assert!(!fx.is_active());
    }

    #[test]
    fn zero_length_fade_is_immediately_black() {
        let mut fx = CameraEffects::default();
        fx.fade_out(0.0);
        assert_eq!(fx.fade_alpha(), 1.0);
    }
}
