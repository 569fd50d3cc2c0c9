//! Timelines
//!
//! Children are placed on a shared clock, either appended after the current
//! end or pinned at an absolute offset. The whole timeline can repeat and
//! play back and forth (yoyo).

use std::rc::Rc;

use super::ease::Ease;
use super::tween::{capture, render, Direction, Track, TweenVars, DEFAULT_DURATION};
use super::value::{Animatable, Prop, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Times(u32),
    Forever,
}

struct Child {
    target: Rc<dyn Animatable>,
    props: Vec<(Prop, Value)>,
    /// Seconds from timeline start
    offset: f64,
    duration: f64,
    ease: Ease,
    tracks: Option<Vec<Track>>,
}

pub struct Timeline {
    children: Vec<Child>,
    default_duration: f64,
    default_ease: Ease,
    repeat: Repeat,
    yoyo: bool,
    started_at: Option<f64>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            default_duration: DEFAULT_DURATION,
            default_ease: Ease::default(),
            repeat: Repeat::Times(0),
            yoyo: false,
            started_at: None,
        }
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration and ease for children that do not set their own
    pub fn defaults(mut self, duration: f64, ease: Ease) -> Self {
        self.default_duration = duration.max(0.0);
        self.default_ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Append after everything already placed
    pub fn to(self, target: Rc<dyn Animatable>, vars: TweenVars) -> Self {
        let end = self.duration();
        self.to_at(target, vars, end)
    }

    /// Place at `position` seconds from the start
    pub fn to_at(mut self, target: Rc<dyn Animatable>, vars: TweenVars, position: f64) -> Self {
        self.children.push(Child {
            target,
            props: vars.props,
            offset: position.max(0.0),
            duration: vars.duration.unwrap_or(self.default_duration),
            ease: vars.ease.unwrap_or(self.default_ease),
            tracks: None,
        });
        self
    }

    /// Length of one pass in seconds
    pub fn duration(&self) -> f64 {
        self.children
            .iter()
            .map(|c| c.offset + c.duration)
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Playhead position within one pass, and whether playback is over
    fn playhead(&self, elapsed: f64) -> (f64, bool) {
        let pass = self.duration();
        if pass <= 0.0 {
            return (0.0, true);
        }
        let mut iteration = (elapsed / pass).floor();
        let mut local = elapsed - iteration * pass;
        let mut done = false;

        if let Repeat::Times(n) = self.repeat {
            let last = f64::from(n);
            if iteration > last {
                iteration = last;
                local = pass;
                done = true;
            }
        }
        if self.yoyo && iteration as u64 % 2 == 1 {
            local = pass - local;
        }
        (local, done)
    }

    /// Render the frame at `now` (ms); returns true once finished
    pub(crate) fn advance(&mut self, now: f64) -> bool {
        let start = *self.started_at.get_or_insert(now);
        let (local, done) = self.playhead((now - start) / 1000.0);

        for child in &mut self.children {
            let reached = local >= child.offset;
            if child.tracks.is_none() && !reached {
                continue;
            }
            let tracks = child
                .tracks
                .get_or_insert_with(|| capture(child.target.as_ref(), &child.props, Direction::To));
            let progress = if child.duration <= 0.0 {
                if reached { 1.0 } else { 0.0 }
            } else {
                ((local - child.offset) / child.duration).clamp(0.0, 1.0)
            };
            render(child.target.as_ref(), tracks, child.ease.apply(progress));
        }
        done
    }
}
