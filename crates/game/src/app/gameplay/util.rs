/// Moves one axis toward `target` by at most `speed`. An axis already
/// within `tolerance` does not move and reports arrival.
fn step_axis(current: f32, target: f32, speed: f32, tolerance: f32) -> (f32, bool) {
    let delta = target - current;
    if delta.abs() <= tolerance {
        return (current, true);
    }
    (current + delta.signum() * speed.min(delta.abs()), false)
}

fn nearest_untargeted(
    collectibles: &BTreeMap<EntityId, Collectible>,
    kind: CollectibleKind,
    from: Vec2,
) -> Option<EntityId> {
    let mut best: Option<(f32, EntityId)> = None;
    for item in collectibles.values() {
        if item.kind != kind || item.is_targeted {
            continue;
        }
        let distance_sq = from.distance_sq(item.position);
        match best {
            Some((best_distance_sq, _)) if best_distance_sq <= distance_sq => {}
            _ => best = Some((distance_sq, item.entity)),
        }
    }
    best.map(|(_, entity)| entity)
}

fn held_item_position(carrier: Vec2) -> Vec2 {
    Vec2::new(carrier.x + HELD_ITEM_OFFSET.x, carrier.y + HELD_ITEM_OFFSET.y)
}

fn solid_renderable(debug_name: &'static str, rgba: [u8; 4], half_extent: f32) -> RenderableDesc {
    RenderableDesc {
        kind: RenderableKind::Solid { rgba },
        half_extent,
        debug_name,
    }
}

fn fraction(value: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (value as f32 / max as f32).clamp(0.0, 1.0)
}

fn millis_to_secs(millis: u64) -> f32 {
    millis as f32 / 1000.0
}

fn tick_duration(fixed_dt_seconds: f32) -> Duration {
    Duration::try_from_secs_f32(fixed_dt_seconds).unwrap_or(Duration::ZERO)
}
