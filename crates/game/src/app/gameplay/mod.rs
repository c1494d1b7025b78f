use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use engine::{
    EntityId, HudBar, InputSnapshot, RenderableDesc, RenderableKind, Scene, SceneCommand,
    SceneWorld, TimerHandle, TimerSet, Transform, Vec2,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::config::GameConfig;

const PLAYER_INDEX: usize = 0;
const PLAYER_HALF_EXTENT: f32 = 8.0;
const HELPER_HALF_EXTENT: f32 = 7.0;
const TRASH_HALF_EXTENT: f32 = 5.0;
const ANIMAL_HALF_EXTENT: f32 = 7.0;
const BIN_HALF_EXTENT: f32 = 10.0;
const BOOTH_HALF_EXTENT: f32 = 12.0;
const HELD_ITEM_OFFSET: Vec2 = Vec2 { x: 0.0, y: -10.0 };
const PLAYER_COLOR: [u8; 4] = [40, 90, 200, 255];
const HELPER_COLOR: [u8; 4] = [90, 160, 230, 255];
const BIN_COLOR: [u8; 4] = [30, 130, 60, 255];
const BOOTH_COLOR: [u8; 4] = [200, 120, 40, 255];
const TRASH_VARIANT_COLORS: [[u8; 4]; 3] = [
    [120, 120, 120, 255],
    [170, 60, 60, 255],
    [230, 230, 230, 255],
];
const ANIMAL_VARIANT_COLORS: [[u8; 4]; 2] = [[150, 90, 40, 255], [240, 170, 170, 255]];
const HEALTH_BAR_COLOR: [u8; 4] = [210, 50, 50, 255];
const CONVINCING_BAR_COLOR: [u8; 4] = [240, 200, 40, 255];

include!("types.rs");
include!("queue.rs");
include!("systems.rs");
include!("scene_state.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_scene(config: GameConfig) -> Box<dyn Scene> {
    Box::new(BeachScene::new(config))
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
