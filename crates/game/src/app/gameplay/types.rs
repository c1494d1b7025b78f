#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    Trash,
    Animal,
    Bin,
    Booth,
}

impl ActionKind {
    /// Collectible kinds toggle on re-click; fixtures always append.
    fn is_toggleable(self) -> bool {
        matches!(self, Self::Trash | Self::Animal)
    }

    fn as_token(self) -> &'static str {
        match self {
            Self::Trash => "trash",
            Self::Animal => "animal",
            Self::Bin => "bin",
            Self::Booth => "booth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Action {
    target: Vec2,
    kind: ActionKind,
    object: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectibleKind {
    Trash,
    Animal,
}

impl CollectibleKind {
    fn action_kind(self) -> ActionKind {
        match self {
            Self::Trash => ActionKind::Trash,
            Self::Animal => ActionKind::Animal,
        }
    }

    fn variant_count(self) -> usize {
        match self {
            Self::Trash => TRASH_VARIANT_COLORS.len(),
            Self::Animal => ANIMAL_VARIANT_COLORS.len(),
        }
    }

    fn renderable(self, variant: usize) -> RenderableDesc {
        let (rgba, half_extent, debug_name) = match self {
            Self::Trash => (
                TRASH_VARIANT_COLORS[variant % TRASH_VARIANT_COLORS.len()],
                TRASH_HALF_EXTENT,
                "trash",
            ),
            Self::Animal => (
                ANIMAL_VARIANT_COLORS[variant % ANIMAL_VARIANT_COLORS.len()],
                ANIMAL_HALF_EXTENT,
                "animal",
            ),
        };
        solid_renderable(debug_name, rgba, half_extent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelperSpecialty {
    Trash,
    Animal,
}

impl HelperSpecialty {
    /// Recruits alternate specialties, trash first.
    fn for_recruit(existing_helpers: usize) -> Self {
        if existing_helpers % 2 == 0 {
            Self::Trash
        } else {
            Self::Animal
        }
    }

    fn collects(self) -> CollectibleKind {
        match self {
            Self::Trash => CollectibleKind::Trash,
            Self::Animal => CollectibleKind::Animal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActorRole {
    Player,
    Helper(HelperSpecialty),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveTarget {
    action: Action,
    x_arrived: bool,
    y_arrived: bool,
}

impl ActiveTarget {
    fn new(action: Action) -> Self {
        Self {
            action,
            x_arrived: false,
            y_arrived: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActorState {
    Idle,
    Moving(ActiveTarget),
    Resolving(Action),
    /// Rescuing `animal`; released by the rescue completion timer.
    Frozen { animal: EntityId },
}

impl ActorState {
    fn current_action(&self) -> Option<Action> {
        match self {
            Self::Moving(target) => Some(target.action),
            Self::Resolving(action) => Some(*action),
            Self::Idle | Self::Frozen { .. } => None,
        }
    }
}

#[derive(Debug)]
struct Actor {
    entity: EntityId,
    role: ActorRole,
    position: Vec2,
    speed: f32,
    held: Option<EntityId>,
    queue: ActionQueue,
    state: ActorState,
}

impl Actor {
    fn new(entity: EntityId, role: ActorRole, position: Vec2, speed: f32) -> Self {
        Self {
            entity,
            role,
            position,
            speed,
            held: None,
            queue: ActionQueue::default(),
            state: ActorState::Idle,
        }
    }

    fn is_player(&self) -> bool {
        self.role == ActorRole::Player
    }
}

/// On-ground trash or animal. Picked-up trash leaves the ground map and is
/// tracked only through the carrying actor's `held`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Collectible {
    entity: EntityId,
    kind: CollectibleKind,
    position: Vec2,
    variant: usize,
    is_targeted: bool,
    clicked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fixture {
    entity: EntityId,
    position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameTimer {
    HealthDecay,
    SpawnTrash,
    SpawnAnimal,
    ConvincingTick,
    RescueComplete { actor: EntityId, animal: EntityId },
    GameOverFade,
    GameOverRestart,
}
