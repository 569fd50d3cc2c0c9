//! Tweens
//!
//! A tween interpolates a handful of properties on one target over a duration.

use std::fmt;
use std::rc::Rc;

use super::ease::Ease;
use super::value::{Animatable, Prop, Value};

/// Seconds, used when neither the tween nor its timeline names a duration
pub const DEFAULT_DURATION: f64 = 0.5;

/// What to animate and how
#[derive(Default)]
pub struct TweenVars {
    pub(crate) props: Vec<(Prop, Value)>,
    pub(crate) duration: Option<f64>,
    pub(crate) ease: Option<Ease>,
    pub(crate) on_complete: Option<Box<dyn FnOnce()>>,
}

impl TweenVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, prop: Prop, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.props.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.props.push((prop, value)),
        }
        self
    }

    /// Duration in seconds
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds.max(0.0));
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Runs once after the final frame. Not called if the tween is overwritten.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TweenVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenVars")
            .field("props", &self.props)
            .field("duration", &self.duration)
            .field("ease", &self.ease)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Animate from current values to the given ones, or from the given ones back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    To,
    From,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Track {
    pub prop: Prop,
    pub from: Value,
    pub to: Value,
}

/// Resolve start/end values against the target's current state
pub(crate) fn capture(target: &dyn Animatable, props: &[(Prop, Value)], direction: Direction) -> Vec<Track> {
    props
        .iter()
        .map(|&(prop, given)| {
            let current = target.read(prop);
            match direction {
                Direction::To => Track { prop, from: current, to: given },
                Direction::From => Track { prop, from: given, to: current },
            }
        })
        .collect()
}

pub(crate) fn render(target: &dyn Animatable, tracks: &[Track], eased: f64) {
    for track in tracks {
        target.write(track.prop, track.from.lerp(track.to, eased));
    }
}

/// Identity of an animated target, for overwrite detection
pub(crate) fn same_target(a: &Rc<dyn Animatable>, b: &Rc<dyn Animatable>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// A standalone tween running on the engine
pub(crate) struct Tween {
    pub target: Rc<dyn Animatable>,
    pub tracks: Vec<Track>,
    /// Milliseconds
    pub duration: f64,
    pub ease: Ease,
    pub started_at: Option<f64>,
    pub on_complete: Option<Box<dyn FnOnce()>>,
}

impl Tween {
    pub fn new(target: Rc<dyn Animatable>, vars: TweenVars, direction: Direction) -> Self {
        let tracks = capture(target.as_ref(), &vars.props, direction);
        if direction == Direction::From {
            // from-tweens show their start state right away
            render(target.as_ref(), &tracks, 0.0);
        }
        Self {
            target,
            tracks,
            duration: vars.duration.unwrap_or(DEFAULT_DURATION) * 1000.0,
            ease: vars.ease.unwrap_or_default(),
            started_at: None,
            on_complete: vars.on_complete,
        }
    }

    /// Render the frame at `now`; returns true once finished
    pub fn advance(&mut self, now: f64) -> bool {
        let start = *self.started_at.get_or_insert(now);
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            ((now - start) / self.duration).clamp(0.0, 1.0)
        };
        render(self.target.as_ref(), &self.tracks, self.ease.apply(progress));
        progress >= 1.0
    }

    /// Drop tracks that a newer tween on the same target now owns
    pub fn yield_props(&mut self, props: &[(Prop, Value)]) {
        self.tracks.retain(|t| !props.iter().any(|(p, _)| *p == t.prop));
    }
}
