//! Animation system seam
//!
//! Systems animate their state through named channels of `f32` values. They
//! hand a target and a duration to the [`AnimationSystem`], then each frame
//! apply the interpolated [`ChannelFrame`]s it returns from
//! [`AnimationSystem::advance`].

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::ecs::Entity;

/// One interpolated value for an entity's channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelFrame {
    /// Animated entity
    pub entity: Entity,
    /// Channel the values belong to
    pub channel: String,
    /// Interpolated values, one per channel dimension
    pub values: Vec<f32>,
}

/// Reads the current value of a channel for an entity, used as the start
/// point of a new animation
pub type ChannelReader<'a> = dyn Fn(Entity, &str) -> Option<Vec<f32>> + 'a;

/// Interpolates channel values over time
pub trait AnimationSystem {
    /// Make `name` available for animation with the given dimension count
    fn register_channel(&mut self, name: &str, dimensions: usize, pool_size: usize);

    /// Whether `name` has been registered
    fn has_channel(&self, name: &str) -> bool;

    /// Animate `channel` on `entity` towards `target` over `duration`,
    /// replacing any animation already running on it
    fn set_target(&mut self, entity: Entity, channel: &str, target: &[f32], duration: Duration);

    /// Whether `channel` on `entity` is still animating
    fn is_animating(&self, entity: Entity, channel: &str) -> bool;

    /// Step all animations by `delta` and return the new values.
    /// `current` supplies start values for animations that have not begun.
    fn advance(&mut self, delta: Duration, current: &ChannelReader<'_>) -> Vec<ChannelFrame>;
}

#[derive(Debug)]
struct Track {
    start: Option<Vec<f32>>,
    target: Vec<f32>,
    duration: Duration,
    elapsed: Duration,
}

/// Linear-interpolation [`AnimationSystem`]
#[derive(Debug, Default)]
pub struct Tweener {
    channels: HashMap<String, usize>,
    tracks: BTreeMap<(Entity, String), Track>,
}

impl Tweener {
    /// Create a tweener with no registered channels
    pub fn new() -> Self {
        Self::default()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl AnimationSystem for Tweener {
    fn register_channel(&mut self, name: &str, dimensions: usize, pool_size: usize) {
        log::debug!("Registering animation channel {name} ({dimensions} values, pool {pool_size})");
        self.channels.insert(name.to_owned(), dimensions);
    }

    fn has_channel(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    fn set_target(&mut self, entity: Entity, channel: &str, target: &[f32], duration: Duration) {
        let Some(&dimensions) = self.channels.get(channel) else {
            log::warn!("Animation channel {channel} is not registered");
            return;
        };
        if target.len() != dimensions {
            log::warn!(
                "Channel {channel} expects {dimensions} values, got {}",
                target.len()
            );
            return;
        }
        self.tracks.insert(
            (entity, channel.to_owned()),
            Track {
                start: None,
                target: target.to_vec(),
                duration,
                elapsed: Duration::ZERO,
            },
        );
    }

    fn is_animating(&self, entity: Entity, channel: &str) -> bool {
        self.tracks.contains_key(&(entity, channel.to_owned()))
    }

    fn advance(&mut self, delta: Duration, current: &ChannelReader<'_>) -> Vec<ChannelFrame> {
        let mut frames = Vec::with_capacity(self.tracks.len());
        let mut finished = Vec::new();

        for ((entity, channel), track) in &mut self.tracks {
            if track.start.is_none() {
                track.start = Some(
                    current(*entity, channel)
                        .filter(|v| v.len() == track.target.len())
                        .unwrap_or_else(|| track.target.clone()),
                );
            }
            track.elapsed += delta;
            let t = if track.duration.is_zero() {
                1.0
            } else {
                (track.elapsed.as_secs_f32() / track.duration.as_secs_f32()).min(1.0)
            };

            let start = track.start.as_deref().unwrap_or(&track.target);
            let values = start
                .iter()
                .zip(&track.target)
                .map(|(a, b)| if t >= 1.0 { *b } else { lerp(*a, *b, t) })
                .collect();
            frames.push(ChannelFrame {
                entity: *entity,
                channel: channel.clone(),
                values,
            });
            if t >= 1.0 {
                finished.push((*entity, channel.clone()));
            }
        }

        for key in finished {
            self.tracks.remove(&key);
        }
        frames
    }
}
