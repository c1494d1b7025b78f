struct BeachScene {
    config: GameConfig,
    state: Option<GameState>,
}

impl BeachScene {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    fn handle_click(state: &mut GameState, input: &InputSnapshot, world: &SceneWorld) {
        if !input.left_click_pressed() {
            return;
        }
        let Some(cursor_px) = input.cursor_position_px() else {
            return;
        };
        match world.pick_topmost_interactive_at_cursor(cursor_px, input.window_size()) {
            Some(picked) => state.on_click(picked),
            None => trace!(x = cursor_px.x, y = cursor_px.y, "click_missed"),
        }
    }
}

impl Scene for BeachScene {
    fn load(&mut self, world: &mut SceneWorld) {
        let state = GameState::new(self.config.clone(), world);
        state.sync_presentation(world);
        info!(
            health = state.health,
            seeded = self.config.rng_seed.is_some(),
            "scene_loaded"
        );
        self.state = Some(state);
    }

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
    ) -> SceneCommand {
        let Some(state) = self.state.as_mut() else {
            return SceneCommand::None;
        };

        Self::handle_click(state, input, world);
        let command = state.tick(tick_duration(fixed_dt_seconds), world);
        state.sync_presentation(world);
        command
    }

    fn render(&mut self, _world: &SceneWorld) {}

    fn unload(&mut self, _world: &mut SceneWorld) {
        if let Some(state) = self.state.take() {
            info!(
                health = state.health,
                helpers = state.helper_count(),
                "scene_unloaded"
            );
        }
    }

    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        self.state.as_ref().map(GameState::debug_title)
    }
}
