impl GameState {
    /// Per-tick actor pass: helpers pick work, then every actor resolves,
    /// promotes and moves in that order. Frozen actors sit the tick out.
    fn run_actor_systems(&mut self, world: &mut SceneWorld) {
        self.assign_helper_work();
        for index in 0..self.actors.len() {
            self.step_actor(index, world);
        }
    }

    fn assign_helper_work(&mut self) {
        for index in 0..self.actors.len() {
            let actor = &self.actors[index];
            let ActorRole::Helper(specialty) = actor.role else {
                continue;
            };
            if actor.state != ActorState::Idle || !actor.queue.is_empty() {
                continue;
            }

            if actor.held.is_some() {
                let action = Action {
                    target: self.bin.position,
                    kind: ActionKind::Bin,
                    object: self.bin.entity,
                };
                self.actors[index].queue.push(action);
                continue;
            }

            let Some(object) = nearest_untargeted(
                &self.collectibles,
                specialty.collects(),
                actor.position,
            ) else {
                continue;
            };
            let Some(item) = self.collectibles.get_mut(&object) else {
                continue;
            };
            item.is_targeted = true;
            let action = Action {
                target: item.position,
                kind: item.kind.action_kind(),
                object,
            };
            let helper = &mut self.actors[index];
            helper.queue.push(action);
            debug!(
                helper = helper.entity.0,
                object = object.0,
                kind = action.kind.as_token(),
                "helper_assigned"
            );
        }
    }

    fn step_actor(&mut self, index: usize, world: &mut SceneWorld) {
        if let ActorState::Resolving(action) = self.actors[index].state {
            self.resolve_action(index, action, world);
        }
        if self.actors[index].state == ActorState::Idle {
            self.promote_queue_head(index);
        }
        if let ActorState::Moving(target) = self.actors[index].state {
            self.advance_toward(index, target);
        }
    }

    fn promote_queue_head(&mut self, index: usize) {
        let actor = &mut self.actors[index];
        let Some(head) = actor.queue.head().copied() else {
            return;
        };
        actor.state = ActorState::Moving(ActiveTarget::new(head));
        if actor.is_player() && self.at_booth {
            self.at_booth = false;
            debug!("left_booth");
        }
    }

    fn advance_toward(&mut self, index: usize, target: ActiveTarget) {
        let tolerance = self.config.arrival_tolerance;
        let actor = &mut self.actors[index];
        let goal = target.action.target;

        let (x, x_arrived) = if target.x_arrived {
            (actor.position.x, true)
        } else {
            step_axis(actor.position.x, goal.x, actor.speed, tolerance)
        };
        let (y, y_arrived) = if target.y_arrived {
            (actor.position.y, true)
        } else {
            step_axis(actor.position.y, goal.y, actor.speed, tolerance)
        };
        actor.position = Vec2::new(x, y);

        actor.state = if x_arrived && y_arrived {
            ActorState::Resolving(target.action)
        } else {
            ActorState::Moving(ActiveTarget {
                action: target.action,
                x_arrived,
                y_arrived,
            })
        };
    }

    fn resolve_action(&mut self, index: usize, action: Action, world: &mut SceneWorld) {
        let actor = &mut self.actors[index];
        match actor.queue.head() {
            Some(head) if head.object == action.object => {
                actor.queue.pop_head();
            }
            _ => warn!(
                actor = actor.entity.0,
                object = action.object.0,
                "resolved_action_not_at_queue_head"
            ),
        }
        actor.state = ActorState::Idle;

        match action.kind {
            ActionKind::Trash => self.resolve_pickup(index, action.object, world),
            ActionKind::Bin => self.resolve_deposit(index, world),
            ActionKind::Animal => self.resolve_rescue_start(index, action.object, world),
            ActionKind::Booth => {
                if self.actors[index].is_player() {
                    self.at_booth = true;
                    info!("arrived_at_booth");
                }
            }
        }
    }

    fn resolve_pickup(&mut self, index: usize, object: EntityId, world: &mut SceneWorld) {
        let hands_free = self.actors[index].held.is_none();
        let on_ground = self
            .collectibles
            .get(&object)
            .is_some_and(|item| item.kind == CollectibleKind::Trash);
        if !hands_free || !on_ground {
            debug!(object = object.0, hands_free, on_ground, "pickup_skipped");
            self.release_target(object);
            return;
        }

        let Some(item) = self.collectibles.remove(&object) else {
            return;
        };
        let actor = &mut self.actors[index];
        actor.held = Some(item.entity);
        world.set_interactive(item.entity, false);
        world.set_position(item.entity, held_item_position(actor.position));
        debug!(
            actor = actor.entity.0,
            object = item.entity.0,
            variant = item.variant,
            "trash_picked_up"
        );
    }

    fn resolve_deposit(&mut self, index: usize, world: &mut SceneWorld) {
        let Some(item) = self.actors[index].held.take() else {
            debug!(actor = self.actors[index].entity.0, "deposit_with_empty_hands");
            return;
        };
        world.despawn(item);
        self.restore_health();
        info!(health = self.health, item = item.0, "deposit");
    }

    fn resolve_rescue_start(&mut self, index: usize, animal: EntityId, world: &mut SceneWorld) {
        let hands_free = self.actors[index].held.is_none();
        let on_ground = self
            .collectibles
            .get(&animal)
            .is_some_and(|item| item.kind == CollectibleKind::Animal);
        if !hands_free || !on_ground {
            debug!(animal = animal.0, hands_free, on_ground, "rescue_skipped");
            self.release_target(animal);
            return;
        }

        world.set_interactive(animal, false);
        let actor = &mut self.actors[index];
        actor.state = ActorState::Frozen { animal };
        let key = GameTimer::RescueComplete {
            actor: actor.entity,
            animal,
        };
        self.timers.add_delayed(key, self.config.rescue_delay());
        debug!(actor = actor.entity.0, animal = animal.0, "rescue_started");
    }

    fn release_target(&mut self, object: EntityId) {
        if let Some(item) = self.collectibles.get_mut(&object) {
            item.is_targeted = false;
            item.clicked = false;
        }
    }
}
