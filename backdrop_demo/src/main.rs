//! Backdrop demo application
//!
//! Builds a small panel hierarchy, then moves, hides and removes its content
//! while stepping the animation clock, logging where the panel ends up.

use std::time::Duration;

use scene_backdrop::foundation::logging;
use scene_backdrop::prelude::*;

const FRAME: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to load backdrop def: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create backdrop: {0}")]
    Backdrop(#[from] BackdropError),
}

struct BackdropDemo {
    world: World,
    backdrops: BackdropSystem,
    owner: Entity,
}

impl BackdropDemo {
    fn new(def: &BackdropDef) -> Result<Self, DemoError> {
        let mut world = World::new();
        let mut backdrops = BackdropSystem::new(&world);
        backdrops.initialize(&mut world);

        let owner = world.create_entity();
        world.transform_system_mut().create(owner, Transform::identity());
        backdrops.create(&mut world, owner, BACKDROP_DEF_TYPE, def)?;

        Ok(Self { world, backdrops, owner })
    }

    fn add_item(&mut self, position: Vec3, half_extent: f32) -> Entity {
        let item = self.world.create_entity();
        let transforms = self.world.transform_system_mut();
        transforms.create(item, Transform::from_position(position));
        transforms.set_aabb(
            item,
            Aabb::new(Vec3::repeat(-half_extent), Vec3::repeat(half_extent)),
        );
        transforms.add_child(self.owner, item);
        self.backdrops.process_events(&mut self.world);
        item
    }

    fn run_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            self.backdrops.advance_animations(&mut self.world, FRAME);
        }
    }

    fn report(&self, label: &str) {
        let Some(panel) = self.backdrops.backdrop_renderable_entity(self.owner) else {
            return;
        };
        let position = self
            .world
            .transform_system()
            .sqt(panel)
            .map_or(Vec3::zeros(), |sqt| sqt.position);
        let size = self
            .world
            .render_system()
            .quad(panel)
            .map_or(Vec2::zeros(), |quad| quad.size);
        log::info!(
            "{label}: panel at ({:.3}, {:.3}, {:.3}) size {:.3} x {:.3}",
            position.x,
            position.y,
            position.z,
            size.x,
            size.y
        );
        if let Some(bounds) = self.world.transform_system().aabb(self.owner) {
            log::info!("{label}: owner bounds {:?} .. {:?}", bounds.min.as_slice(), bounds.max.as_slice());
        }
    }
}

fn main() -> Result<(), DemoError> {
    logging::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/assets/panel.ron").to_owned());
    log::info!("Loading backdrop def from {path}");
    let def = BackdropDef::load_from_file(&path)?;

    let mut demo = BackdropDemo::new(&def)?;
    demo.report("empty");

    let title = demo.add_item(Vec3::new(0.0, 0.3, 0.0), 0.1);
    let body = demo.add_item(Vec3::new(0.2, -0.1, 0.0), 0.25);
    demo.run_frames(6);
    demo.report("with content");

    demo.world.transform_system_mut().disable(body);
    demo.backdrops.process_events(&mut demo.world);
    demo.run_frames(2);
    demo.report("body hidden, mid animation");
    demo.run_frames(4);
    demo.report("body hidden");

    demo.world.transform_system_mut().remove_parent(title);
    demo.world.transform_system_mut().remove_parent(body);
    demo.backdrops.process_events(&mut demo.world);
    demo.run_frames(6);
    demo.report("emptied");

    demo.backdrops.shutdown(&demo.world);
    Ok(())
}
