use super::effects::CameraEffects;
use super::input::InputSnapshot;
use super::rendering::{screen_to_world, Viewport};

/// Logical playfield size used until a scene sets its own.
pub const DEFAULT_PLAYFIELD: Vec2 = Vec2 { x: 640.0, y: 360.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    /// Unload the scene, clear its world and load it again.
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// World-space point. The playfield origin is the top-left corner and
/// y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    pub position: Vec2,
}

impl Transform {
    pub const fn at(position: Vec2) -> Self {
        Self { position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderableKind {
    Solid { rgba: [u8; 4] },
}

#[derive(Debug, Clone)]
pub struct RenderableDesc {
    pub kind: RenderableKind,
    /// Half of the square's side in world units; also the pick radius.
    pub half_extent: f32,
    pub debug_name: &'static str,
}

/// Gauge drawn along the top of the playfield, filled to `fraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudBar {
    pub fraction: f32,
    pub rgba: [u8; 4],
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub transform: Transform,
    pub renderable: RenderableDesc,
    pub interactive: bool,
    applied_spawn_order: u64,
}

impl Entity {
    pub fn applied_spawn_order(&self) -> u64 {
        self.applied_spawn_order
    }

    fn contains_point(&self, point: Vec2) -> bool {
        let half = self.renderable.half_extent.max(0.0);
        let position = self.transform.position;
        point.x >= position.x - half
            && point.x <= position.x + half
            && point.y >= position.y - half
            && point.y <= position.y + half
    }
}

#[derive(Debug, Default)]
struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Sprite store owned by the engine. Spawns and despawns are deferred
/// until [`SceneWorld::apply_pending`], which the loop calls after every
/// tick.
#[derive(Debug)]
pub struct SceneWorld {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
    next_applied_spawn_order: u64,
    playfield: Vec2,
    camera_fx: CameraEffects,
    hud_bars: Vec<HudBar>,
    order_markers: Vec<Vec2>,
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self {
            allocator: EntityIdAllocator::default(),
            entities: Vec::new(),
            pending_spawns: Vec::new(),
            pending_despawns: Vec::new(),
            next_applied_spawn_order: 0,
            playfield: DEFAULT_PLAYFIELD,
            camera_fx: CameraEffects::default(),
            hud_bars: Vec::new(),
            order_markers: Vec::new(),
        }
    }
}

impl SceneWorld {
    pub fn spawn(&mut self, transform: Transform, renderable: RenderableDesc) -> EntityId {
        self.spawn_internal(transform, renderable, false)
    }

    pub fn spawn_interactive(
        &mut self,
        transform: Transform,
        renderable: RenderableDesc,
    ) -> EntityId {
        self.spawn_internal(transform, renderable, true)
    }

    fn spawn_internal(
        &mut self,
        transform: Transform,
        renderable: RenderableDesc,
        interactive: bool,
    ) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity {
            id,
            transform,
            renderable,
            interactive,
            applied_spawn_order: 0,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        if let Some(index) = self.pending_spawns.iter().position(|entity| entity.id == id) {
            self.pending_spawns.remove(index);
            return true;
        }
        if !self.entities.iter().any(|entity| entity.id == id) {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_unstable();
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities
                .retain(|entity| pending.binary_search(&entity.id).is_err());
            self.pending_despawns.clear();
        }

        for mut entity in self.pending_spawns.drain(..) {
            entity.applied_spawn_order = self.next_applied_spawn_order;
            self.next_applied_spawn_order = self.next_applied_spawn_order.saturating_add(1);
            self.entities.push(entity);
        }
    }

    /// Drops every entity and presentation overlay. Ids keep counting up
    /// so handles from before the clear never alias new entities.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
        self.next_applied_spawn_order = 0;
        self.playfield = DEFAULT_PLAYFIELD;
        self.camera_fx.reset();
        self.hud_bars.clear();
        self.order_markers.clear();
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Moves an entity whether or not its spawn has been applied yet.
    pub fn set_position(&mut self, id: EntityId, position: Vec2) -> bool {
        let entity = self
            .entities
            .iter_mut()
            .chain(self.pending_spawns.iter_mut())
            .find(|entity| entity.id == id);
        match entity {
            Some(entity) => {
                entity.transform.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_interactive(&mut self, id: EntityId, interactive: bool) -> bool {
        let entity = self
            .entities
            .iter_mut()
            .chain(self.pending_spawns.iter_mut())
            .find(|entity| entity.id == id);
        match entity {
            Some(entity) => {
                entity.interactive = interactive;
                true
            }
            None => false,
        }
    }

    pub fn playfield(&self) -> Vec2 {
        self.playfield
    }

    pub fn set_playfield(&mut self, playfield: Vec2) {
        self.playfield = playfield;
    }

    pub fn camera_fx(&self) -> &CameraEffects {
        &self.camera_fx
    }

    pub fn camera_fx_mut(&mut self) -> &mut CameraEffects {
        &mut self.camera_fx
    }

    pub fn set_hud_bars(&mut self, bars: Vec<HudBar>) {
        self.hud_bars = bars;
    }

    pub fn hud_bars(&self) -> &[HudBar] {
        &self.hud_bars
    }

    pub fn set_order_markers(&mut self, markers: Vec<Vec2>) {
        self.order_markers = markers;
    }

    pub fn order_markers(&self) -> &[Vec2] {
        &self.order_markers
    }

    /// Latest-spawned interactive entity whose square covers `point`.
    pub fn pick_topmost_interactive_at(&self, point: Vec2) -> Option<EntityId> {
        let mut best: Option<(u64, EntityId)> = None;
        for entity in &self.entities {
            if !entity.interactive || !entity.contains_point(point) {
                continue;
            }
            match best {
                Some((order, _)) if order >= entity.applied_spawn_order => {}
                _ => best = Some((entity.applied_spawn_order, entity.id)),
            }
        }
        best.map(|(_, id)| id)
    }

    pub fn pick_topmost_interactive_at_cursor(
        &self,
        cursor_position_px: Vec2,
        window_size: (u32, u32),
    ) -> Option<EntityId> {
        let viewport = Viewport {
            width: window_size.0,
            height: window_size.1,
        };
        let point = screen_to_world(cursor_position_px, self.playfield, viewport)?;
        self.pick_topmost_interactive_at(point)
    }
}

pub trait Scene {
    fn load(&mut self, world: &mut SceneWorld);
    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
    ) -> SceneCommand;
    fn render(&mut self, world: &SceneWorld);
    fn unload(&mut self, world: &mut SceneWorld);
    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        None
    }
}

pub(crate) struct SceneHost {
    scene: Box<dyn Scene>,
    world: SceneWorld,
    is_loaded: bool,
}

impl SceneHost {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            world: SceneWorld::default(),
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load(&mut self.world);
        self.is_loaded = true;
    }

    pub(crate) fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        let command = self.scene.update(fixed_dt_seconds, input, &mut self.world);
        self.world.camera_fx_mut().tick(fixed_dt_seconds);
        command
    }

    pub(crate) fn apply_pending(&mut self) {
        self.world.apply_pending();
    }

    pub(crate) fn restart(&mut self) {
        if self.is_loaded {
            self.scene.unload(&mut self.world);
        }
        self.world.clear();
        self.scene.load(&mut self.world);
        self.world.apply_pending();
        self.is_loaded = true;
    }

    pub(crate) fn render(&mut self) {
        self.scene.render(&self.world);
    }

    pub(crate) fn world(&self) -> &SceneWorld {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut SceneWorld {
        &mut self.world
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title(&self.world)
    }

    pub(crate) fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload(&mut self.world);
            self.world.clear();
            self.is_loaded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(debug_name: &'static str, half_extent: f32) -> RenderableDesc {
        RenderableDesc {
            kind: RenderableKind::Solid {
                rgba: [220, 220, 240, 255],
            },
            half_extent,
            debug_name,
        }
    }

    struct TestScene {
        spawn_count: usize,
        loads: usize,
        unloads: usize,
    }

    impl Scene for TestScene {
        fn load(&mut self, world: &mut SceneWorld) {
            self.loads += 1;
            for _ in 0..self.spawn_count {
                world.spawn(Transform::default(), square("test", 4.0));
            }
            world.apply_pending();
        }

        fn update(
            &mut self,
            _fixed_dt_seconds: f32,
            _input: &InputSnapshot,
            _world: &mut SceneWorld,
        ) -> SceneCommand {
            SceneCommand::None
        }

        fn render(&mut self, _world: &SceneWorld) {}

        fn unload(&mut self, _world: &mut SceneWorld) {
            self.unloads += 1;
        }
    }

    struct SteppingScene {
        step_x: f32,
        stepped: Option<EntityId>,
    }

    impl Scene for SteppingScene {
        fn load(&mut self, world: &mut SceneWorld) {
            self.stepped = Some(world.spawn(Transform::default(), square("step", 4.0)));
            world.apply_pending();
        }

        fn update(
            &mut self,
            _fixed_dt_seconds: f32,
            _input: &InputSnapshot,
            world: &mut SceneWorld,
        ) -> SceneCommand {
            let Some(id) = self.stepped else {
                return SceneCommand::None;
            };
            if let Some(position) = world.find_entity(id).map(|entity| entity.transform.position) {
                world.set_position(id, Vec2::new(position.x + self.step_x, position.y));
            }
            SceneCommand::None
        }

        fn render(&mut self, _world: &SceneWorld) {}

        fn unload(&mut self, _world: &mut SceneWorld) {}
    }

    #[test]
    fn allocator_never_reuses_ids() {
        let mut allocator = EntityIdAllocator::default();
        let first = allocator.allocate();
        let second = allocator.allocate();
        let third = allocator.allocate();

        assert_eq!(first.0, 0);
        assert_eq!(second.0, 1);
        assert_eq!(third.0, 2);
    }

    #[test]
    fn scene_world_spawn_and_despawn_updates_count() {
        let mut world = SceneWorld::default();
        let id = world.spawn(Transform::default(), square("spawned", 4.0));
        world.apply_pending();
        assert_eq!(world.entity_count(), 1);

        assert!(world.despawn(id));
        world.apply_pending();
        assert_eq!(world.entity_count(), 0);
        assert!(!world.despawn(id));
    }

    #[test]
    fn despawning_a_pending_spawn_cancels_it() {
        let mut world = SceneWorld::default();
        let id = world.spawn(Transform::default(), square("short_lived", 4.0));
        assert!(world.despawn(id));
        world.apply_pending();

        assert_eq!(world.entity_count(), 0);
        assert!(world.find_entity(id).is_none());
    }

    #[test]
    fn duplicate_pending_despawns_are_idempotent() {
        let mut world = SceneWorld::default();
        let doomed = world.spawn(Transform::default(), square("doomed", 4.0));
        let survivor = world.spawn(
            Transform::at(Vec2::new(3.0, 1.0)),
            square("survivor", 4.0),
        );
        world.apply_pending();

        assert!(world.despawn(doomed));
        assert!(world.despawn(doomed));
        world.apply_pending();

        assert_eq!(world.entity_count(), 1);
        assert!(world.find_entity(doomed).is_none());
        assert!(world.find_entity(survivor).is_some());
    }

    #[test]
    fn set_position_reaches_pending_and_applied_entities() {
        let mut world = SceneWorld::default();
        let applied = world.spawn(Transform::default(), square("applied", 4.0));
        world.apply_pending();
        let pending = world.spawn(Transform::default(), square("pending", 4.0));

        assert!(world.set_position(applied, Vec2::new(5.0, 6.0)));
        assert!(world.set_position(pending, Vec2::new(7.0, 8.0)));
        assert!(!world.set_position(EntityId(99), Vec2::default()));
        world.apply_pending();

        assert_eq!(
            world.find_entity(applied).expect("applied").transform.position,
            Vec2::new(5.0, 6.0)
        );
        assert_eq!(
            world.find_entity(pending).expect("pending").transform.position,
            Vec2::new(7.0, 8.0)
        );
    }

    #[test]
    fn pick_prefers_latest_spawned_interactive_entity() {
        let mut world = SceneWorld::default();
        let below = world.spawn_interactive(
            Transform::at(Vec2::new(100.0, 100.0)),
            square("below", 10.0),
        );
        let above = world.spawn_interactive(
            Transform::at(Vec2::new(104.0, 100.0)),
            square("above", 10.0),
        );
        world.spawn(
            Transform::at(Vec2::new(102.0, 100.0)),
            square("decor", 10.0),
        );
        world.apply_pending();

        assert_eq!(
            world.pick_topmost_interactive_at(Vec2::new(102.0, 100.0)),
            Some(above)
        );
        assert_eq!(
            world.pick_topmost_interactive_at(Vec2::new(91.0, 100.0)),
            Some(below)
        );
        assert_eq!(world.pick_topmost_interactive_at(Vec2::new(300.0, 10.0)), None);
    }

    #[test]
    fn non_interactive_entities_are_never_picked() {
        let mut world = SceneWorld::default();
        let id = world.spawn_interactive(
            Transform::at(Vec2::new(50.0, 50.0)),
            square("toggle", 5.0),
        );
        world.apply_pending();
        assert!(world.set_interactive(id, false));

        assert_eq!(world.pick_topmost_interactive_at(Vec2::new(50.0, 50.0)), None);
    }

    #[test]
    fn cursor_pick_maps_through_playfield_scale() {
        let mut world = SceneWorld::default();
        let id = world.spawn_interactive(
            Transform::at(Vec2::new(100.0, 50.0)),
            square("target", 4.0),
        );
        world.apply_pending();

        // 1280x720 shows the 640x360 playfield at exactly 2x.
        let picked =
            world.pick_topmost_interactive_at_cursor(Vec2::new(200.0, 100.0), (1280, 720));
        assert_eq!(picked, Some(id));
    }

    #[test]
    fn clear_resets_overlays_but_not_id_allocation() {
        let mut world = SceneWorld::default();
        let first = world.spawn(Transform::default(), square("first", 4.0));
        world.apply_pending();
        world.set_hud_bars(vec![HudBar {
            fraction: 0.5,
            rgba: [255, 0, 0, 255],
        }]);
        world.set_order_markers(vec![Vec2::new(1.0, 1.0)]);
        world.set_playfield(Vec2::new(100.0, 100.0));
        world.camera_fx_mut().shake(0.5);

        world.clear();
        let second = world.spawn(Transform::default(), square("second", 4.0));

        assert!(second.0 > first.0);
        assert!(world.hud_bars().is_empty());
        assert!(world.order_markers().is_empty());
        assert_eq!(world.playfield(), DEFAULT_PLAYFIELD);
        assert!(!world.camera_fx().is_active());
    }

    #[test]
    fn restart_unloads_clears_and_reloads() {
        let mut host = SceneHost::new(Box::new(TestScene {
            spawn_count: 2,
            loads: 0,
            unloads: 0,
        }));
        host.load();
        host.apply_pending();
        host.world_mut().spawn(Transform::default(), square("extra", 4.0));
        host.apply_pending();
        assert_eq!(host.world().entity_count(), 3);

        host.restart();

        assert_eq!(host.world().entity_count(), 2);
    }

    #[test]
    fn update_advances_scene_and_camera_effects() {
        let mut host = SceneHost::new(Box::new(SteppingScene {
            step_x: 1.5,
            stepped: None,
        }));
        host.load();
        host.world_mut().camera_fx_mut().shake(0.05);

        for _ in 0..4 {
            let command = host.update(1.0 / 60.0, &InputSnapshot::empty());
            assert_eq!(command, SceneCommand::None);
            host.apply_pending();
        }

        let x = host.world().entities()[0].transform.position.x;
        assert!((x - 6.0).abs() < 0.0001);
        assert!(!host.world().camera_fx().is_shaking());
    }
}
