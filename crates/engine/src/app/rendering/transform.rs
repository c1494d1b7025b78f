use crate::app::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Uniform playfield-to-window mapping: the playfield is scaled to fit and
/// centred, leaving letterbox bars on the long axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlayfieldFit {
    pub(crate) scale: f32,
    pub(crate) offset_x: f32,
    pub(crate) offset_y: f32,
}

pub(crate) fn playfield_fit(playfield: Vec2, viewport: Viewport) -> Option<PlayfieldFit> {
    if playfield.x <= 0.0 || playfield.y <= 0.0 || viewport.width == 0 || viewport.height == 0 {
        return None;
    }
    let scale_x = viewport.width as f32 / playfield.x;
    let scale_y = viewport.height as f32 / playfield.y;
    let scale = scale_x.min(scale_y);
    Some(PlayfieldFit {
        scale,
        offset_x: (viewport.width as f32 - playfield.x * scale) * 0.5,
        offset_y: (viewport.height as f32 - playfield.y * scale) * 0.5,
    })
}

pub fn world_to_screen(world: Vec2, playfield: Vec2, viewport: Viewport) -> (i32, i32) {
    let Some(fit) = playfield_fit(playfield, viewport) else {
        return (0, 0);
    };
    let x = fit.offset_x + world.x * fit.scale;
    let y = fit.offset_y + world.y * fit.scale;
    (x.round() as i32, y.round() as i32)
}

/// Returns `None` for cursors over the letterbox bars.
pub fn screen_to_world(screen_px: Vec2, playfield: Vec2, viewport: Viewport) -> Option<Vec2> {
    let fit = playfield_fit(playfield, viewport)?;
    let world = Vec2 {
        x: (screen_px.x - fit.offset_x) / fit.scale,
        y: (screen_px.y - fit.offset_y) / fit.scale,
    };
    let inside = (0.0..=playfield.x).contains(&world.x) && (0.0..=playfield.y).contains(&world.y);
    inside.then_some(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYFIELD: Vec2 = Vec2 { x: 640.0, y: 360.0 };

    #[test]
    fn origin_maps_to_top_left_when_aspect_matches() {
        let viewport = Viewport {
            width: 1280,
            height: 720,
        };
        assert_eq!(world_to_screen(Vec2::new(0.0, 0.0), PLAYFIELD, viewport), (0, 0));
        assert_eq!(
            world_to_screen(Vec2::new(100.0, 50.0), PLAYFIELD, viewport),
            (200, 100)
        );
    }

    #[test]
    fn taller_window_letterboxes_vertically() {
        let viewport = Viewport {
            width: 640,
            height: 480,
        };
        let fit = playfield_fit(PLAYFIELD, viewport).expect("fit");
        assert!((fit.scale - 1.0).abs() < 0.0001);
        assert!((fit.offset_y - 60.0).abs() < 0.0001);
        assert_eq!(world_to_screen(Vec2::new(0.0, 0.0), PLAYFIELD, viewport), (0, 60));
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let viewport = Viewport {
            width: 1000,
            height: 1000,
        };
        let world = Vec2::new(320.0, 90.0);
        let (sx, sy) = world_to_screen(world, PLAYFIELD, viewport);
        let back = screen_to_world(Vec2::new(sx as f32, sy as f32), PLAYFIELD, viewport)
            .expect("inside playfield");
        assert!((back.x - world.x).abs() < 1.0);
        assert!((back.y - world.y).abs() < 1.0);
    }

    #[test]
    fn letterbox_cursor_is_outside_the_playfield() {
        let viewport = Viewport {
            width: 640,
            height: 480,
        };
        assert_eq!(screen_to_world(Vec2::new(10.0, 5.0), PLAYFIELD, viewport), None);
    }

    #[test]
    fn degenerate_viewport_has_no_mapping() {
        let viewport = Viewport {
            width: 0,
            height: 720,
        };
        assert_eq!(screen_to_world(Vec2::new(1.0, 1.0), PLAYFIELD, viewport), None);
    }
}
