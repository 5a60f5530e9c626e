//! Tests for selection and constrained drag

use bevy::prelude::*;
use dragthrow::interaction::pointer::PointerMapper;
use dragthrow::interaction::selection::{SceneHit, SelectionController, SelectionScene};
use dragthrow::interaction::types::{
    BodyState, DragBody, Interactable, LayerMask, SelectSettings,
};

const CENTER: Vec2 = Vec2::new(400.0, 400.0);
const RADIUS: f32 = 0.5;

fn mapper() -> PointerMapper {
    PointerMapper::perspective(
        Vec3::ZERO,
        Quat::IDENTITY,
        std::f32::consts::FRAC_PI_2,
        0.1,
        1000.0,
        Vec2::new(800.0, 800.0),
    )
}

#[derive(Default)]
struct Counter {
    touches: u32,
}

impl Interactable for Counter {
    fn on_interact(&mut self) {
        self.touches += 1;
    }
}

struct Ball {
    state: BodyState,
    has_body: bool,
    layer: u32,
    counter: Option<Counter>,
}

impl Ball {
    fn dynamic(position: Vec3) -> Self {
        Self {
            state: BodyState::at(position),
            has_body: true,
            layer: 1,
            counter: None,
        }
    }
}

/// Spheres of radius `RADIUS`, addressed by index. Removed balls leave `None`.
#[derive(Default)]
struct BallScene {
    balls: Vec<Option<Ball>>,
}

impl BallScene {
    fn with(balls: Vec<Ball>) -> Self {
        Self {
            balls: balls.into_iter().map(Some).collect(),
        }
    }

    fn ball(&self, index: usize) -> &Ball {
        self.balls[index].as_ref().expect("ball exists")
    }
}

impl SelectionScene for BallScene {
    type Object = usize;
    type Body<'a>
        = &'a mut BodyState
    where
        Self: 'a;

    fn raycast(&self, ray: Ray3d, max_distance: f32, mask: LayerMask) -> Option<SceneHit<usize>> {
        let direction = ray.direction.as_vec3();
        self.balls
            .iter()
            .enumerate()
            .filter_map(|(index, ball)| {
                let ball = ball.as_ref()?;
                if !mask.contains(ball.layer) {
                    return None;
                }
                let to_center = ball.state.position - ray.origin;
                let along = to_center.dot(direction);
                let off_axis_sq = to_center.length_squared() - along * along;
                if along < 0.0 || off_axis_sq > RADIUS * RADIUS {
                    return None;
                }
                let distance = along - (RADIUS * RADIUS - off_axis_sq).sqrt();
                (distance <= max_distance).then(|| SceneHit {
                    object: index,
                    point: ray.origin + direction * distance,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn position(&self, object: usize) -> Option<Vec3> {
        self.balls.get(object)?.as_ref().map(|b| b.state.position)
    }

    fn set_position(&mut self, object: usize, position: Vec3) {
        if let Some(Some(ball)) = self.balls.get_mut(object) {
            ball.state.position = position;
        }
    }

    fn body(&mut self, object: usize) -> Option<&mut BodyState> {
        let ball = self.balls.get_mut(object)?.as_mut()?;
        ball.has_body.then_some(&mut ball.state)
    }

    fn interactable(&mut self, object: usize) -> Option<&mut dyn Interactable> {
        let ball = self.balls.get_mut(object)?.as_mut()?;
        let counter: &mut dyn Interactable = ball.counter.as_mut()?;
        Some(counter)
    }
}

#[test]
fn test_press_selects_nearest_hit() {
    let mut scene = BallScene::with(vec![
        Ball::dynamic(Vec3::new(0.0, 0.0, -20.0)),
        Ball::dynamic(Vec3::new(0.0, 0.0, -10.0)),
    ]);
    let mut controller = SelectionController::new(SelectSettings::default());

    assert_eq!(controller.press(&mapper(), CENTER, &mut scene), Some(1));

    let selection = controller.selection().expect("selected");
    assert!((selection.grab_distance - 9.5).abs() < 1e-4);
    assert!(selection
        .grab_offset
        .abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), 1e-4));
    assert_eq!(selection.original_gravity, Some(1.0));
    assert!(!scene.ball(1).state.gravity_enabled());
    assert!(scene.ball(0).state.gravity_enabled());
}

#[test]
fn test_press_miss_leaves_state_alone() {
    let mut scene = BallScene::with(vec![Ball::dynamic(Vec3::new(0.0, 0.0, -10.0))]);
    let mut controller = SelectionController::new(SelectSettings::default());

    assert_eq!(controller.press(&mapper(), Vec2::new(5.0, 5.0), &mut scene), None);
    assert!(controller.selected().is_none());
    assert!(scene.ball(0).state.gravity_enabled());
}

#[test]
fn test_press_respects_distance_and_mask() {
    let mut far = Ball::dynamic(Vec3::new(0.0, 0.0, -2000.0));
    far.layer = 1;
    let mut masked = Ball::dynamic(Vec3::new(0.0, 0.0, -10.0));
    masked.layer = 2;
    let mut scene = BallScene::with(vec![far, masked]);
    let settings = SelectSettings {
        layer_mask: LayerMask(1),
        ..default()
    };
    let mut controller = SelectionController::new(settings);

    assert_eq!(controller.press(&mapper(), CENTER, &mut scene), None);
}

#[test]
fn test_press_notifies_interactable() {
    let mut ball = Ball::dynamic(Vec3::new(0.0, 0.0, -10.0));
    ball.counter = Some(Counter::default());
    let mut scene = BallScene::with(vec![ball]);
    let mut controller = SelectionController::new(SelectSettings::default());

    controller.press(&mapper(), CENTER, &mut scene);
    assert_eq!(scene.ball(0).counter.as_ref().map(|c| c.touches), Some(1));
}

#[test]
fn test_second_press_keeps_first_selection() {
    let mut scene = BallScene::with(vec![
        Ball::dynamic(Vec3::new(0.0, 0.0, -10.0)),
        Ball::dynamic(Vec3::new(4.0, 0.0, -10.0)),
    ]);
    let mut controller = SelectionController::new(SelectSettings::default());

    assert_eq!(controller.press(&mapper(), CENTER, &mut scene), Some(0));
    assert_eq!(controller.press(&mapper(), Vec2::new(560.0, 400.0), &mut scene), None);
    assert_eq!(controller.selected(), Some(0));
}

#[test]
fn test_drag_interpolates_toward_pointer() {
    let mut scene = BallScene::with(vec![Ball::dynamic(Vec3::new(0.0, 0.0, -10.0))]);
    let mut controller = SelectionController::new(SelectSettings::default());
    controller.press(&mapper(), CENTER, &mut scene);

    scene.balls[0].as_mut().unwrap().state.linear_velocity = Vec3::Y;
    scene.balls[0].as_mut().unwrap().state.angular_velocity = Vec3::X;

    // x = 0.2 in NDC; at distance 9.5 that is 1.9 to the right.
    let pointer = Vec2::new(480.0, 400.0);
    controller.drag(&mapper(), pointer, 0.02, &mut scene);

    let state = scene.ball(0).state;
    assert!(state.position.abs_diff_eq(Vec3::new(0.76, 0.0, -10.0), 1e-4));
    assert_eq!(state.linear_velocity, Vec3::ZERO);
    assert_eq!(state.angular_velocity, Vec3::ZERO);
}

#[test]
fn test_large_step_snaps_to_target() {
    let mut scene = BallScene::with(vec![Ball::dynamic(Vec3::new(0.0, 0.0, -10.0))]);
    let mut controller = SelectionController::new(SelectSettings::default());
    controller.press(&mapper(), CENTER, &mut scene);

    controller.drag(&mapper(), Vec2::new(480.0, 400.0), 0.5, &mut scene);
    assert!(scene
        .ball(0)
        .state
        .position
        .abs_diff_eq(Vec3::new(1.9, 0.0, -10.0), 1e-4));
}

#[test]
fn test_kinematic_body_moves_by_transform_only() {
    let mut ball = Ball::dynamic(Vec3::new(0.0, 0.0, -10.0));
    ball.state.kinematic = true;
    ball.state.linear_velocity = Vec3::Y;
    let mut scene = BallScene::with(vec![ball]);
    let mut controller = SelectionController::new(SelectSettings::default());
    controller.press(&mapper(), CENTER, &mut scene);

    controller.drag(&mapper(), Vec2::new(480.0, 400.0), 0.02, &mut scene);

    let state = scene.ball(0).state;
    assert!(state.position.abs_diff_eq(Vec3::new(0.76, 0.0, -10.0), 1e-4));
    assert_eq!(state.linear_velocity, Vec3::Y);
}

#[test]
fn test_object_without_body_is_moved_and_released() {
    let mut ball = Ball::dynamic(Vec3::new(0.0, 0.0, -10.0));
    ball.has_body = false;
    ball.state.gravity_scale = 0.0;
    let mut scene = BallScene::with(vec![ball]);
    let mut controller = SelectionController::new(SelectSettings::default());

    assert_eq!(controller.press(&mapper(), CENTER, &mut scene), Some(0));
    assert_eq!(controller.selection().unwrap().original_gravity, None);

    controller.drag(&mapper(), Vec2::new(480.0, 400.0), 0.02, &mut scene);
    assert!(scene.ball(0).state.position.x > 0.0);

    assert_eq!(controller.release(&mut scene), Some(0));
    assert_eq!(scene.ball(0).state.gravity_scale, 0.0);
}

#[test]
fn test_release_restores_gravity() {
    let mut scene = BallScene::with(vec![Ball::dynamic(Vec3::new(0.0, 0.0, -10.0))]);
    let mut controller = SelectionController::new(SelectSettings::default());
    controller.press(&mapper(), CENTER, &mut scene);
    assert!(!scene.ball(0).state.gravity_enabled());

    assert_eq!(controller.release(&mut scene), Some(0));
    assert!(scene.ball(0).state.gravity_enabled());
    assert_eq!(controller.release(&mut scene), None);
}

#[test]
fn test_release_restores_authored_gravity_scale() {
    let mut ball = Ball::dynamic(Vec3::new(0.0, 0.0, -10.0));
    ball.state.gravity_scale = 0.5;
    let mut scene = BallScene::with(vec![ball]);
    let mut controller = SelectionController::new(SelectSettings::default());

    controller.press(&mapper(), CENTER, &mut scene);
    assert_eq!(controller.selection().unwrap().original_gravity, Some(0.5));
    assert_eq!(scene.ball(0).state.gravity_scale, 0.0);

    controller.drag(&mapper(), CENTER, 0.02, &mut scene);
    controller.release(&mut scene);
    assert_eq!(scene.ball(0).state.gravity_scale, 0.5);
}

#[test]
fn test_disappeared_object_clears_selection() {
    let mut scene = BallScene::with(vec![Ball::dynamic(Vec3::new(0.0, 0.0, -10.0))]);
    let mut controller = SelectionController::new(SelectSettings::default());
    controller.press(&mapper(), CENTER, &mut scene);

    scene.balls[0] = None;
    controller.drag(&mapper(), Vec2::new(480.0, 400.0), 0.02, &mut scene);

    assert!(controller.selected().is_none());
    assert_eq!(controller.release(&mut scene), None);
}

#[test]
fn test_body_trait_through_reference() {
    fn park(mut body: impl DragBody) {
        body.set_gravity_scale(0.0);
        body.move_to(Vec3::ZERO);
    }

    let mut state = BodyState::at(Vec3::ONE);
    park(&mut state);
    assert_eq!(state.position, Vec3::ZERO);
    assert!(!state.gravity_enabled());
}
