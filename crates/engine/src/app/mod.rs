mod effects;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod timers;

pub use effects::CameraEffects;
pub use input::InputSnapshot;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{screen_to_world, world_to_screen, Renderer, Viewport};
pub use scene::{
    Entity, EntityId, HudBar, RenderableDesc, RenderableKind, Scene, SceneCommand, SceneWorld,
    Transform, Vec2, DEFAULT_PLAYFIELD,
};
pub use timers::{TimerHandle, TimerSet};
