/// All mutable gameplay data for one round. Rebuilt from scratch on every
/// scene load; sprites in the world are referenced by `EntityId` only.
#[derive(Debug)]
struct GameState {
    config: GameConfig,
    health: u32,
    alive: bool,
    convincing: u32,
    at_booth: bool,
    /// Index 0 is the player; helpers follow in recruitment order.
    actors: Vec<Actor>,
    collectibles: BTreeMap<EntityId, Collectible>,
    bin: Fixture,
    booth: Fixture,
    timers: TimerSet<GameTimer>,
    decay_timer: Option<TimerHandle>,
    trash_spawn_timer: Option<TimerHandle>,
    animal_spawn_timer: Option<TimerHandle>,
    convincing_timer: Option<TimerHandle>,
    rng: StdRng,
}

impl GameState {
    fn new(config: GameConfig, world: &mut SceneWorld) -> Self {
        world.set_playfield(config.playfield());

        let bin = spawn_fixture(world, config.bin_position.to_vec2(), "bin", BIN_COLOR, BIN_HALF_EXTENT);
        let booth = spawn_fixture(
            world,
            config.booth_position.to_vec2(),
            "booth",
            BOOTH_COLOR,
            BOOTH_HALF_EXTENT,
        );
        let player_position = config.player_start.to_vec2();
        let player_entity = world.spawn(
            Transform::at(player_position),
            solid_renderable("player", PLAYER_COLOR, PLAYER_HALF_EXTENT),
        );
        let player = Actor::new(
            player_entity,
            ActorRole::Player,
            player_position,
            config.player_speed,
        );

        let mut timers = TimerSet::new();
        let decay_timer = timers.add_repeating(GameTimer::HealthDecay, config.health_decay_interval());
        let trash_spawn_timer =
            timers.add_repeating(GameTimer::SpawnTrash, config.trash_spawn_interval());
        let animal_spawn_timer =
            timers.add_repeating(GameTimer::SpawnAnimal, config.animal_spawn_interval());
        let convincing_timer = (config.max_helpers > 0).then(|| {
            timers.add_repeating(GameTimer::ConvincingTick, config.convincing_interval())
        });

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            health: config.starting_health,
            alive: true,
            convincing: 0,
            at_booth: false,
            actors: vec![player],
            collectibles: BTreeMap::new(),
            bin,
            booth,
            timers,
            decay_timer: Some(decay_timer),
            trash_spawn_timer: Some(trash_spawn_timer),
            animal_spawn_timer: Some(animal_spawn_timer),
            convincing_timer,
            rng,
            config,
        }
    }

    fn player(&self) -> &Actor {
        &self.actors[PLAYER_INDEX]
    }

    fn helper_count(&self) -> usize {
        self.actors.len().saturating_sub(1)
    }

    /// Routes a click on `picked` into the player's queue.
    fn on_click(&mut self, picked: EntityId) {
        if !self.alive {
            debug!(entity = picked.0, "click_ignored_after_game_over");
            return;
        }

        let fixture = if picked == self.bin.entity {
            Some((self.bin, ActionKind::Bin))
        } else if picked == self.booth.entity {
            Some((self.booth, ActionKind::Booth))
        } else {
            None
        };
        if let Some((fixture, kind)) = fixture {
            self.actors[PLAYER_INDEX].queue.push(Action {
                target: fixture.position,
                kind,
                object: fixture.entity,
            });
            debug!(kind = kind.as_token(), "action_queued");
            return;
        }

        let Some(item) = self.collectibles.get_mut(&picked) else {
            debug!(entity = picked.0, "click_ignored");
            return;
        };
        let kind = item.kind.action_kind();
        debug_assert!(kind.is_toggleable());

        if !item.is_targeted {
            item.is_targeted = true;
            item.clicked = true;
            let action = Action {
                target: item.position,
                kind,
                object: picked,
            };
            self.actors[PLAYER_INDEX].queue.push(action);
            debug!(kind = kind.as_token(), object = picked.0, "action_queued");
        } else if item.clicked {
            item.is_targeted = false;
            item.clicked = false;
            let removed = self.cancel_player_action(picked);
            debug!(object = picked.0, removed, "action_cancelled");
        } else {
            debug!(object = picked.0, "click_ignored_helper_target");
        }
    }

    fn cancel_player_action(&mut self, object: EntityId) -> usize {
        let player = &mut self.actors[PLAYER_INDEX];
        let removed = player.queue.cancel(object);
        if let Some(current) = player.state.current_action() {
            let still_head = player
                .queue
                .head()
                .is_some_and(|head| head.object == current.object);
            if !still_head {
                player.state = ActorState::Idle;
            }
        }
        removed
    }

    /// Advances timers by one tick, dispatches what fired, then runs the
    /// actor systems while the round is alive.
    fn tick(&mut self, dt: Duration, world: &mut SceneWorld) -> SceneCommand {
        let mut command = SceneCommand::None;
        for timer in self.timers.advance(dt) {
            if self.handle_timer(timer, world) == SceneCommand::Restart {
                command = SceneCommand::Restart;
            }
        }
        if self.alive {
            self.run_actor_systems(world);
        }
        command
    }

    fn handle_timer(&mut self, timer: GameTimer, world: &mut SceneWorld) -> SceneCommand {
        match timer {
            GameTimer::HealthDecay => self.decay_health(world),
            GameTimer::SpawnTrash => self.spawn_collectible(CollectibleKind::Trash, world),
            GameTimer::SpawnAnimal => self.spawn_collectible(CollectibleKind::Animal, world),
            GameTimer::ConvincingTick => self.advance_convincing(world),
            GameTimer::RescueComplete { actor, animal } => {
                self.complete_rescue(actor, animal, world)
            }
            GameTimer::GameOverFade => {
                let fade = millis_to_secs(self.config.game_over.fade_ms);
                world.camera_fx_mut().fade_out(fade);
            }
            GameTimer::GameOverRestart => {
                info!("restart_requested");
                return SceneCommand::Restart;
            }
        }
        SceneCommand::None
    }

    fn decay_health(&mut self, world: &mut SceneWorld) {
        if !self.alive {
            return;
        }
        self.health = self.health.saturating_sub(1);
        trace!(health = self.health, "health_decayed");
        if self.health == 0 {
            self.trigger_game_over(world);
        }
    }

    fn restore_health(&mut self) {
        if self.alive {
            self.health = self.health.saturating_add(self.config.restore_bonus);
        }
    }

    fn trigger_game_over(&mut self, world: &mut SceneWorld) {
        if !self.alive {
            return;
        }
        self.alive = false;
        for handle in [
            self.decay_timer.take(),
            self.trash_spawn_timer.take(),
            self.animal_spawn_timer.take(),
            self.convincing_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.timers.cancel(handle);
        }

        let timings = &self.config.game_over;
        world
            .camera_fx_mut()
            .shake(millis_to_secs(timings.shake_ms));
        self.timers.add_delayed(
            GameTimer::GameOverFade,
            Duration::from_millis(timings.fade_delay_ms),
        );
        self.timers.add_delayed(
            GameTimer::GameOverRestart,
            Duration::from_millis(timings.restart_delay_ms),
        );
        info!(
            helpers = self.helper_count(),
            queued = self.player().queue.len(),
            "game_over"
        );
    }

    fn spawn_collectible(&mut self, kind: CollectibleKind, world: &mut SceneWorld) {
        if !self.alive {
            return;
        }
        let cap = match kind {
            CollectibleKind::Trash => self.config.max_trash,
            CollectibleKind::Animal => self.config.max_animals,
        };
        let on_ground = self
            .collectibles
            .values()
            .filter(|item| item.kind == kind)
            .count();
        if on_ground >= cap {
            trace!(kind = kind.action_kind().as_token(), on_ground, "spawn_capped");
            return;
        }

        let margin = self.config.spawn_margin;
        let playfield = self.config.playfield();
        let position = Vec2::new(
            self.rng.gen_range(margin..=playfield.x - margin),
            self.rng.gen_range(margin..=playfield.y - margin),
        );
        let variant = self.rng.gen_range(0..kind.variant_count());
        self.place_collectible(kind, position, variant, world);
    }

    fn place_collectible(
        &mut self,
        kind: CollectibleKind,
        position: Vec2,
        variant: usize,
        world: &mut SceneWorld,
    ) -> EntityId {
        let entity = world.spawn_interactive(Transform::at(position), kind.renderable(variant));
        self.collectibles.insert(
            entity,
            Collectible {
                entity,
                kind,
                position,
                variant,
                is_targeted: false,
                clicked: false,
            },
        );
        debug!(
            entity = entity.0,
            kind = kind.action_kind().as_token(),
            variant,
            x = position.x,
            y = position.y,
            "collectible_spawned"
        );
        entity
    }

    fn advance_convincing(&mut self, world: &mut SceneWorld) {
        if !self.alive || !self.at_booth || self.helper_count() >= self.config.max_helpers {
            return;
        }
        self.convincing = self
            .convincing
            .saturating_add(self.config.convincing_step)
            .min(self.config.convincing_max);
        if self.convincing < self.config.convincing_max {
            return;
        }

        self.convincing = 0;
        self.recruit_helper(world);
        if self.helper_count() >= self.config.max_helpers {
            if let Some(handle) = self.convincing_timer.take() {
                self.timers.cancel(handle);
            }
            info!(helpers = self.helper_count(), "helper_cap_reached");
        }
    }

    fn recruit_helper(&mut self, world: &mut SceneWorld) {
        let specialty = HelperSpecialty::for_recruit(self.helper_count());
        let position = self.booth.position;
        let entity = world.spawn(
            Transform::at(position),
            solid_renderable("helper", HELPER_COLOR, HELPER_HALF_EXTENT),
        );
        self.actors.push(Actor::new(
            entity,
            ActorRole::Helper(specialty),
            position,
            self.config.helper_speed,
        ));
        info!(
            helper = entity.0,
            specialty = specialty.collects().action_kind().as_token(),
            helpers = self.helper_count(),
            "helper_recruited"
        );
    }

    fn complete_rescue(&mut self, actor: EntityId, animal: EntityId, world: &mut SceneWorld) {
        if self.collectibles.remove(&animal).is_some() {
            world.despawn(animal);
            self.restore_health();
            info!(health = self.health, animal = animal.0, "animal_rescued");
        } else {
            warn!(animal = animal.0, "rescued_animal_missing");
        }

        let Some(rescuer) = self.actors.iter_mut().find(|candidate| candidate.entity == actor) else {
            return;
        };
        if rescuer.state == (ActorState::Frozen { animal }) {
            rescuer.state = ActorState::Idle;
        }
    }

    /// Pushes actor positions, gauges and the player's order markers into
    /// the engine world.
    fn sync_presentation(&self, world: &mut SceneWorld) {
        for actor in &self.actors {
            world.set_position(actor.entity, actor.position);
            if let Some(item) = actor.held {
                world.set_position(item, held_item_position(actor.position));
            }
        }

        world.set_hud_bars(vec![
            HudBar {
                fraction: fraction(self.health, self.config.starting_health),
                rgba: HEALTH_BAR_COLOR,
            },
            HudBar {
                fraction: fraction(self.convincing, self.config.convincing_max),
                rgba: CONVINCING_BAR_COLOR,
            },
        ]);
        world.set_order_markers(self.player().queue.iter().map(|action| action.target).collect());
    }

    fn debug_title(&self) -> String {
        format!(
            "{} | health {} | queue {} | helpers {}",
            self.config.window.title,
            self.health,
            self.player().queue.len(),
            self.helper_count()
        )
    }
}

fn spawn_fixture(
    world: &mut SceneWorld,
    position: Vec2,
    debug_name: &'static str,
    rgba: [u8; 4],
    half_extent: f32,
) -> Fixture {
    let entity = world.spawn_interactive(
        Transform::at(position),
        solid_renderable(debug_name, rgba, half_extent),
    );
    Fixture { entity, position }
}
