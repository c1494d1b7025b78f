pub mod app;

pub use app::{
    run_app, screen_to_world, world_to_screen, AppError, CameraEffects, Entity, EntityId,
    HudBar, InputSnapshot, LoopConfig, Renderer, RenderableDesc, RenderableKind, Scene,
    SceneCommand, SceneWorld, TimerHandle, TimerSet, Transform, Vec2, Viewport,
    DEFAULT_PLAYFIELD,
};
