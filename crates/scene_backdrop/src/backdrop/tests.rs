//! Backdrop system scenarios driven through a full world

use std::cell::Cell;
use std::f32::consts::{FRAC_PI_4, SQRT_2};
use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;

use super::*;
use crate::animation::AnimationSystem;
use crate::ecs::{Entity, World};
use crate::events::Event;
use crate::foundation::logging;
use crate::foundation::math::{Aabb, Quat, Transform, Vec2, Vec3};
use crate::scene::{Quad, RenderRecorder, RenderSystem};

const EPSILON: f32 = 1e-4;

fn setup(world: &mut World) -> BackdropSystem {
    logging::init_for_tests();
    let mut system = BackdropSystem::new(world);
    system.initialize(world);
    system
}

fn spawn_owner(world: &mut World) -> Entity {
    let owner = world.create_entity();
    world.transform_system_mut().create(owner, Transform::identity());
    owner
}

fn spawn_child(world: &mut World, parent: Entity, sqt: Transform, aabb: Option<Aabb>) -> Entity {
    let child = world.create_entity();
    let transforms = world.transform_system_mut();
    transforms.create(child, sqt);
    if let Some(aabb) = aabb {
        transforms.set_aabb(child, aabb);
    }
    transforms.add_child(parent, child);
    child
}

fn unit_box() -> Aabb {
    Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
}

fn quad_def(behavior: AabbBehavior) -> BackdropDef {
    BackdropDef {
        offset: Vec3::new(0.0, 0.0, -0.05),
        margin: Vec2::new(0.1, 0.1),
        aabb_behavior: behavior,
        quad: Some(QuadDef::default()),
        ..BackdropDef::default()
    }
}

fn animated_def(behavior: AabbBehavior) -> BackdropDef {
    BackdropDef {
        animate_aabb_duration_ms: 100,
        ..quad_def(behavior)
    }
}

fn panel_quad(world: &World, system: &BackdropSystem, owner: Entity) -> Quad {
    let panel = system.backdrop_renderable_entity(owner).unwrap();
    world.render_system().quad(panel).cloned().unwrap()
}

fn panel_position(world: &World, system: &BackdropSystem, owner: Entity) -> Vec3 {
    let panel = system.backdrop_renderable_entity(owner).unwrap();
    world.transform_system().sqt(panel).unwrap().position
}

fn assert_aabb_eq(actual: &Aabb, expected: &Aabb) {
    assert_relative_eq!(actual.min, expected.min, epsilon = EPSILON);
    assert_relative_eq!(actual.max, expected.max, epsilon = EPSILON);
}

#[test]
fn test_single_child_content_bounds() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();

    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &unit_box());
    assert_relative_eq!(
        panel_position(&world, &system, owner),
        Vec3::new(0.0, 0.0, -1.05),
        epsilon = EPSILON
    );
    assert_relative_eq!(
        panel_quad(&world, &system, owner).size,
        Vec2::new(2.2, 2.2),
        epsilon = EPSILON
    );
    assert_eq!(world.transform_system().aabb(owner), Some(&unit_box()));
}

#[test]
fn test_union_of_translated_children() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();

    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    spawn_child(
        &mut world,
        owner,
        Transform::from_position(Vec3::new(2.0, 0.5, 0.0)),
        Some(unit_box()),
    );
    system.process_events(&mut world);

    let expected = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(3.0, 1.5, 1.0));
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &expected);
    assert_relative_eq!(
        panel_position(&world, &system, owner),
        Vec3::new(1.0, 0.25, -1.05),
        epsilon = EPSILON
    );
}

#[test]
fn test_disabled_and_boundless_children_are_skipped() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::None))
        .unwrap();

    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    spawn_child(&mut world, owner, Transform::from_position(Vec3::new(10.0, 0.0, 0.0)), None);
    let hidden = spawn_child(
        &mut world,
        owner,
        Transform::from_position(Vec3::new(-5.0, 0.0, 0.0)),
        Some(unit_box()),
    );
    world.transform_system_mut().disable(hidden);
    system.process_events(&mut world);

    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &unit_box());
    // None leaves the owner's bounds alone
    assert!(world.transform_system().aabb(owner).is_none());

    world.transform_system_mut().enable(hidden);
    system.process_events(&mut world);
    assert_relative_eq!(
        system.backdrop_aabb(owner).unwrap().min,
        Vec3::new(-6.0, -1.0, -1.0),
        epsilon = EPSILON
    );
}

#[test]
fn test_panel_bounds_are_not_content() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();
    let child = spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);
    let panel = system.backdrop_renderable_entity(owner).unwrap();
    let huge = Aabb::new(Vec3::repeat(-50.0), Vec3::repeat(50.0));

    // A panel bounds change alone does not re-aggregate
    let marker = Aabb::new(Vec3::new(-2.0, -2.0, 0.0), Vec3::new(2.0, 2.0, 0.0));
    system.set_backdrop_aabb(&mut world, owner, marker);
    world.transform_system_mut().set_aabb(panel, huge);
    system.process_events(&mut world);
    assert_eq!(system.backdrop_aabb(owner), Some(&marker));

    // Aggregation skips the panel even when it has bounds
    world.transform_system_mut().set_aabb(child, unit_box());
    system.process_events(&mut world);
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &unit_box());
    assert_aabb_eq(world.transform_system().aabb(owner).unwrap(), &unit_box());
}

#[test]
fn test_rotated_child_uses_corner_bounds() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();

    let rotation = Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_4);
    spawn_child(
        &mut world,
        owner,
        Transform::from_position_rotation(Vec3::zeros(), rotation),
        Some(unit_box()),
    );
    system.process_events(&mut world);

    let expected = Aabb::new(Vec3::new(-SQRT_2, -SQRT_2, -1.0), Vec3::new(SQRT_2, SQRT_2, 1.0));
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &expected);
    assert_aabb_eq(world.transform_system().aabb(owner).unwrap(), &expected);
}

#[test]
fn test_backdrop_behavior_merges_panel_into_owner() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Backdrop))
        .unwrap();

    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &unit_box());
    let expected = Aabb::new(Vec3::new(-1.1, -1.1, -1.05), Vec3::new(1.1, 1.1, 1.0));
    assert_aabb_eq(world.transform_system().aabb(owner).unwrap(), &expected);
}

#[test]
fn test_empty_backdrop_keeps_its_footprint() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Backdrop))
        .unwrap();

    let footprint = Aabb::new(Vec3::new(-0.1, -0.1, -0.05), Vec3::new(0.1, 0.1, -0.05));
    assert!(system.backdrop(owner).unwrap().is_empty());
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &footprint);
    assert_aabb_eq(world.transform_system().aabb(owner).unwrap(), &footprint);
    // The stored footprint is not grown a second time
    assert_relative_eq!(
        panel_quad(&world, &system, owner).size,
        Vec2::new(0.2, 0.2),
        epsilon = EPSILON
    );
}

#[test]
fn test_empty_content_backdrop_resolves_to_zero_box() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();

    assert_eq!(system.backdrop_aabb(owner), Some(&Aabb::default()));
    assert_eq!(world.transform_system().aabb(owner), Some(&Aabb::default()));
    assert_relative_eq!(
        panel_quad(&world, &system, owner).size,
        Vec2::new(0.2, 0.2),
        epsilon = EPSILON
    );
}

#[test]
fn test_first_resolution_is_not_animated() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &animated_def(AabbBehavior::Content))
        .unwrap();

    assert_eq!(system.backdrop_aabb(owner), Some(&Aabb::default()));
    let animation = world.animation_system().unwrap();
    assert!(!animation.is_animating(owner, BackdropAabbChannel::CHANNEL_NAME));

    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    // Later changes go through the animation system
    assert_eq!(system.backdrop_aabb(owner), Some(&Aabb::default()));
    let animation = world.animation_system().unwrap();
    assert!(animation.is_animating(owner, BackdropAabbChannel::CHANNEL_NAME));

    system.advance_animations(&mut world, Duration::from_millis(50));
    let half = Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &half);
    assert_aabb_eq(world.transform_system().aabb(owner).unwrap(), &half);

    system.advance_animations(&mut world, Duration::from_millis(60));
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &unit_box());
    let animation = world.animation_system().unwrap();
    assert!(!animation.is_animating(owner, BackdropAabbChannel::CHANNEL_NAME));
}

#[test]
fn test_shrinking_to_empty_animates_towards_footprint() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &animated_def(AabbBehavior::Backdrop))
        .unwrap();
    let child = spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);
    system.advance_animations(&mut world, Duration::from_millis(120));
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &unit_box());

    world.transform_system_mut().remove_parent(child);
    system.process_events(&mut world);

    // The stored content bounds become the panel they were drawn as
    let grown = Aabb::new(Vec3::new(-1.1, -1.1, -1.05), Vec3::new(1.1, 1.1, -1.05));
    assert!(system.backdrop(owner).unwrap().is_empty());
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &grown);

    system.advance_animations(&mut world, Duration::from_millis(50));
    let midway = Aabb::new(Vec3::new(-0.6, -0.6, -0.55), Vec3::new(0.6, 0.6, -0.55));
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &midway);
    assert_relative_eq!(
        panel_quad(&world, &system, owner).size,
        Vec2::new(1.2, 1.2),
        epsilon = EPSILON
    );
    assert_relative_eq!(panel_position(&world, &system, owner).z, -0.55, epsilon = EPSILON);

    system.advance_animations(&mut world, Duration::from_millis(60));
    assert_relative_eq!(
        panel_quad(&world, &system, owner).size,
        Vec2::new(0.2, 0.2),
        epsilon = EPSILON
    );
}

#[test]
fn test_growing_from_empty_starts_at_footprint() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &animated_def(AabbBehavior::Backdrop))
        .unwrap();
    assert!(system.backdrop(owner).unwrap().is_empty());

    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    // Animation starts from a zero box, which grows to the empty footprint
    assert!(!system.backdrop(owner).unwrap().is_empty());
    assert_eq!(system.backdrop_aabb(owner), Some(&Aabb::default()));

    system.advance_animations(&mut world, Duration::ZERO);
    assert_relative_eq!(
        panel_quad(&world, &system, owner).size,
        Vec2::new(0.2, 0.2),
        epsilon = EPSILON
    );

    system.advance_animations(&mut world, Duration::from_millis(50));
    let half = Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));
    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &half);
    assert_relative_eq!(
        panel_quad(&world, &system, owner).size,
        Vec2::new(1.2, 1.2),
        epsilon = EPSILON
    );
}

#[test]
fn test_missing_animation_system_applies_immediately() {
    let mut world = World::headless();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &animated_def(AabbBehavior::Content))
        .unwrap();

    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    assert_aabb_eq(system.backdrop_aabb(owner).unwrap(), &unit_box());
}

#[test]
fn test_nine_patch_backdrop() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    let def = BackdropDef {
        quad: None,
        ..quad_def(AabbBehavior::Content)
    };
    system.create(&mut world, owner, BACKDROP_DEF_TYPE, &def).unwrap();
    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    let panel = system.backdrop_renderable_entity(owner).unwrap();
    let size = world.nine_patch_system().unwrap().size(panel).unwrap();
    assert_relative_eq!(size, Vec2::new(2.2, 2.2), epsilon = EPSILON);
    assert!(world.render_system().quad(panel).is_none());

    // Quads do not apply to nine-patch panels
    let quad = Quad {
        corner_radius: 0.5,
        ..Quad::default()
    };
    system.set_backdrop_quad(&mut world, owner, quad);
    assert_eq!(system.backdrop(owner).unwrap().quad().corner_radius, 0.0);
    assert!(world.render_system().quad(panel).is_none());
}

#[test]
fn test_set_backdrop_quad_refits_the_panel() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();
    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    let quad = Quad {
        verts: (4, 4),
        corner_radius: 0.25,
        corner_verts: 6,
        ..Quad::default()
    };
    system.set_backdrop_quad(&mut world, owner, quad);

    let drawn = panel_quad(&world, &system, owner);
    assert_eq!(drawn.verts, (4, 4));
    assert_eq!(drawn.corner_verts, 6);
    assert_relative_eq!(drawn.size, Vec2::new(2.2, 2.2), epsilon = EPSILON);
}

#[test]
fn test_create_errors() {
    let mut world = World::headless();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    let def = quad_def(AabbBehavior::None);

    assert_eq!(
        system.create(&mut world, owner, "QuadDef", &def),
        Err(BackdropError::InvalidDefType("QuadDef".to_owned()))
    );
    assert!(!system.has_backdrop(owner));

    let nine_patch = BackdropDef { quad: None, ..def.clone() };
    assert_eq!(
        system.create(&mut world, owner, BACKDROP_DEF_TYPE, &nine_patch),
        Err(BackdropError::MissingNinePatchSystem(owner))
    );
    assert!(!system.has_backdrop(owner));
    assert_eq!(world.transform_system().children(owner), Some(&[][..]));

    system.create(&mut world, owner, BACKDROP_DEF_TYPE, &def).unwrap();
    let panel = system.backdrop_renderable_entity(owner);
    assert_eq!(
        system.create(&mut world, owner, BACKDROP_DEF_TYPE, &def),
        Err(BackdropError::AlreadyExists(owner))
    );
    assert_eq!(system.backdrop_renderable_entity(owner), panel);
    assert_eq!(world.transform_system().children(owner).map(<[Entity]>::len), Some(1));
}

#[test]
fn test_owner_without_transform_is_rejected() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = world.create_entity();

    assert_eq!(
        system.create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::None)),
        Err(BackdropError::PanelNotAttached(owner))
    );
    assert!(!system.has_backdrop(owner));
    assert_eq!(system.process_events(&mut world), 0);

    // Once the owner is in the hierarchy the backdrop can be created
    world.transform_system_mut().create(owner, Transform::identity());
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::None))
        .unwrap();
    let panel = system.backdrop_renderable_entity(owner).unwrap();
    assert_eq!(world.transform_system().parent(panel), Some(owner));
}

#[test]
fn test_panel_blueprint() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let with_blueprint = spawn_owner(&mut world);
    let bare = spawn_owner(&mut world);
    let def = BackdropDef {
        blueprint: Some("backdrop-panel".to_owned()),
        ..quad_def(AabbBehavior::None)
    };
    system.create(&mut world, with_blueprint, BACKDROP_DEF_TYPE, &def).unwrap();
    let empty_name = BackdropDef {
        blueprint: Some(String::new()),
        ..def
    };
    system.create(&mut world, bare, BACKDROP_DEF_TYPE, &empty_name).unwrap();

    let transforms = world.transform_system();
    let panel = system.backdrop_renderable_entity(with_blueprint).unwrap();
    assert_eq!(transforms.blueprint(panel), Some("backdrop-panel"));
    assert_eq!(transforms.parent(panel), Some(with_blueprint));

    let panel = system.backdrop_renderable_entity(bare).unwrap();
    assert_eq!(transforms.blueprint(panel), None);
    assert_eq!(transforms.parent(panel), Some(bare));
}

#[test]
fn test_reparenting_updates_both_backdrops() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let (first, second) = (spawn_owner(&mut world), spawn_owner(&mut world));
    for owner in [first, second] {
        system
            .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
            .unwrap();
    }
    let child = spawn_child(&mut world, first, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);
    assert_aabb_eq(system.backdrop_aabb(first).unwrap(), &unit_box());

    world.transform_system_mut().add_child(second, child);
    system.process_events(&mut world);

    assert_eq!(system.backdrop_aabb(first), Some(&Aabb::default()));
    assert_aabb_eq(system.backdrop_aabb(second).unwrap(), &unit_box());
}

#[test]
fn test_nested_backdrops_propagate_bounds() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let outer = spawn_owner(&mut world);
    system
        .create(&mut world, outer, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();
    let inner = spawn_child(&mut world, outer, Transform::from_position(Vec3::new(5.0, 0.0, 0.0)), None);
    system
        .create(&mut world, inner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();

    spawn_child(&mut world, inner, Transform::identity(), Some(unit_box()));
    system.process_events(&mut world);

    // The inner owner's bounds feed the outer aggregation
    let expected = Aabb::new(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
    assert_aabb_eq(system.backdrop_aabb(outer).unwrap(), &expected);
}

#[test]
fn test_desired_size_is_forwarded_to_children() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::None))
        .unwrap();
    let child = spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));
    let source = world.create_entity();

    world.dispatcher().send(Event::DesiredSizeChanged {
        target: owner,
        source,
        x: Some(3.0),
        y: None,
        z: Some(0.5),
    });
    system.process_events(&mut world);

    let layout = world.layout_box_system().unwrap();
    let panel = system.backdrop_renderable_entity(owner).unwrap();
    for entity in [child, panel] {
        let desired = layout.desired_size(entity).unwrap();
        assert_eq!(desired.source, source);
        assert_eq!((desired.x, desired.y, desired.z), (Some(3.0), None, Some(0.5)));
    }
    assert!(layout.desired_size(owner).is_none());
}

struct SortOrderSpy {
    inner: RenderRecorder,
    refreshes: Rc<Cell<usize>>,
}

impl RenderSystem for SortOrderSpy {
    fn set_quad(&mut self, entity: Entity, quad: &Quad) {
        self.inner.set_quad(entity, quad);
    }

    fn quad(&self, entity: Entity) -> Option<&Quad> {
        self.inner.quad(entity)
    }

    fn sort_order_offset(&self, entity: Entity) -> i32 {
        self.inner.sort_order_offset(entity)
    }

    fn set_sort_order_offset(&mut self, entity: Entity, offset: i32) {
        self.refreshes.set(self.refreshes.get() + 1);
        self.inner.set_sort_order_offset(entity, offset);
    }
}

#[test]
fn test_owner_changes_refresh_panel_sort_order() {
    let refreshes = Rc::new(Cell::new(0));
    let spy = SortOrderSpy {
        inner: RenderRecorder::new(),
        refreshes: Rc::clone(&refreshes),
    };
    let mut world = World::new().with_render_system(Box::new(spy));
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::None))
        .unwrap();
    let panel = system.backdrop_renderable_entity(owner).unwrap();
    world.render_system_mut().set_sort_order_offset(panel, 3);
    refreshes.set(0);

    world.transform_system_mut().disable(owner);
    system.process_events(&mut world);

    assert_eq!(refreshes.get(), 1);
    assert_eq!(world.render_system().sort_order_offset(panel), 3);
}

#[test]
fn test_missing_panel_is_reported_not_fatal() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();
    let before = system.backdrop_aabb(owner).copied();

    let panel = system.backdrop_renderable_entity(owner).unwrap();
    world.transform_system_mut().destroy(panel);
    system.process_events(&mut world);

    assert!(system.has_backdrop(owner));
    assert_eq!(system.backdrop_aabb(owner).copied(), before);
}

#[test]
fn test_accessors() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    let stranger = world.create_entity();
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &animated_def(AabbBehavior::None))
        .unwrap();

    assert!(system.has_backdrop(owner));
    assert_eq!(
        system.backdrop_aabb_animation_duration(owner),
        Duration::from_millis(100)
    );
    system.set_backdrop_aabb_animation_duration(owner, Duration::ZERO);
    assert_eq!(system.backdrop_aabb_animation_duration(owner), Duration::ZERO);

    // Misses warn and fall back to empty values
    assert!(!system.has_backdrop(stranger));
    assert_eq!(system.backdrop_renderable_entity(stranger), None);
    assert_eq!(system.backdrop_aabb(stranger), None);
    assert_eq!(system.backdrop_aabb_animation_duration(stranger), Duration::ZERO);
    system.set_backdrop_aabb_animation_duration(stranger, Duration::from_secs(1));
    system.set_backdrop_aabb(&mut world, stranger, unit_box());
    assert!(!system.has_backdrop(stranger));

    system.destroy(owner);
    assert!(!system.has_backdrop(owner));
    assert_eq!(world.transform_system().children(owner).map(<[Entity]>::len), Some(1));
}

#[test]
fn test_channel_round_trips_through_the_system() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();
    assert!(world
        .animation_system()
        .unwrap()
        .has_channel(BackdropAabbChannel::CHANNEL_NAME));

    BackdropAabbChannel::set(&mut system, &mut world, owner, &unit_box().to_array());
    assert_eq!(BackdropAabbChannel::get(&system, owner), Some(unit_box().to_array()));
    assert_eq!(world.transform_system().aabb(owner), Some(&unit_box()));

    // Wrong arity is ignored
    BackdropAabbChannel::set(&mut system, &mut world, owner, &[1.0, 2.0]);
    assert_eq!(system.backdrop_aabb(owner), Some(&unit_box()));
}

#[test]
fn test_shutdown_stops_event_handling() {
    let mut world = World::new();
    let mut system = setup(&mut world);
    let owner = spawn_owner(&mut world);
    system
        .create(&mut world, owner, BACKDROP_DEF_TYPE, &quad_def(AabbBehavior::Content))
        .unwrap();

    system.shutdown(&world);
    spawn_child(&mut world, owner, Transform::identity(), Some(unit_box()));

    assert_eq!(system.process_events(&mut world), 0);
    assert_eq!(system.backdrop_aabb(owner), Some(&Aabb::default()));
}

#[test]
fn test_binding_names() {
    assert_eq!(bindings::ALL.len(), 4);
    assert!(bindings::ALL.iter().all(|name| name.starts_with("lull.Backdrop.")));
    assert_eq!(bindings::HAS_BACKDROP, "lull.Backdrop.HasBackdrop");
}
