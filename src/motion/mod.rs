//! Motion Engine
//!
//! A small tween engine driven by an external clock. In the browser the
//! clock is `requestAnimationFrame` (see `raf`); tests tick it by hand.
//!
//! Standalone tweens overwrite each other: starting a tween on a target
//! takes the animated properties away from older tweens on that target.
//! A tween left with nothing to animate is dropped without completing.

mod ease;
mod timeline;
mod tween;
mod value;

pub use ease::Ease;
pub use timeline::{Repeat, Timeline};
pub use tween::TweenVars;
pub use value::{Animatable, Prop, Rgba, Value};

use std::cell::RefCell;
use std::rc::Rc;

use tween::{same_target, Direction, Tween};

/// Schedules animations; the seam between page behaviors and the engine
pub trait TweenScheduler {
    /// Animate `target` from its current values to `vars`
    fn to(&self, target: Rc<dyn Animatable>, vars: TweenVars);
    /// Animate `target` from `vars` to its current values
    fn from(&self, target: Rc<dyn Animatable>, vars: TweenVars);
    fn play(&self, timeline: Timeline);
}

enum Running {
    Tween(Tween),
    Timeline(Timeline),
}

#[derive(Default)]
struct Engine {
    running: Vec<Running>,
}

/// Shared handle to the engine
#[derive(Clone, Default)]
pub struct Motion {
    inner: Rc<RefCell<Engine>>,
}

impl Motion {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&self, target: Rc<dyn Animatable>, vars: TweenVars, direction: Direction) {
        let mut engine = self.inner.borrow_mut();
        for running in &mut engine.running {
            if let Running::Tween(t) = running {
                if same_target(&t.target, &target) {
                    t.yield_props(&vars.props);
                }
            }
        }
        engine
            .running
            .retain(|r| !matches!(r, Running::Tween(t) if t.tracks.is_empty()));

        let tween = Tween::new(target, vars, direction);
        engine.running.push(Running::Tween(tween));
    }

    /// Render every running animation at `now` (ms), then run completion
    /// callbacks for the ones that finished.
    pub fn tick(&self, now: f64) {
        let finished = {
            let mut engine = self.inner.borrow_mut();

            let mut callbacks: Vec<Box<dyn FnOnce()>> = Vec::new();
            engine.running.retain_mut(|running| {
                let done = match running {
                    Running::Tween(t) => t.advance(now),
                    Running::Timeline(tl) => tl.advance(now),
                };
                if done {
                    if let Running::Tween(t) = running {
                        callbacks.extend(t.on_complete.take());
                    }
                }
                !done
            });
            callbacks
        };

        for callback in finished {
            callback();
        }
    }

    /// Number of animations still running
    pub fn active(&self) -> usize {
        self.inner.borrow().running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active() == 0
    }
}

impl TweenScheduler for Motion {
    fn to(&self, target: Rc<dyn Animatable>, vars: TweenVars) {
        self.start(target, vars, Direction::To);
    }

    fn from(&self, target: Rc<dyn Animatable>, vars: TweenVars) {
        self.start(target, vars, Direction::From);
    }

    fn play(&self, timeline: Timeline) {
        if timeline.is_empty() {
            return;
        }
        self.inner.borrow_mut().running.push(Running::Timeline(timeline));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;
    use std::cell::Cell;

    fn num(el: &FakeElement, prop: Prop) -> f64 {
        el.read(prop).as_num().unwrap()
    }

    #[test]
    fn test_tween_runs_to_completion() {
        let motion = Motion::new();
        let el = Rc::new(FakeElement::new());
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();

        motion.to(
            el.clone(),
            TweenVars::new()
                .set(Prop::Opacity, 0.0)
                .duration(0.4)
                .ease(Ease::None)
                .on_complete(move || flag.set(true)),
        );
        motion.tick(100.0);
        assert_eq!(num(&el, Prop::Opacity), 1.0);
        motion.tick(300.0);
        assert!((num(&el, Prop::Opacity) - 0.5).abs() < 1e-9);
        assert!(!done.get());
        motion.tick(500.0);
        assert_eq!(num(&el, Prop::Opacity), 0.0);
        assert!(done.get());
        assert!(motion.is_idle());
    }

    #[test]
    fn test_from_renders_start_immediately() {
        let motion = Motion::new();
        let el = Rc::new(FakeElement::new());
        motion.from(el.clone(), TweenVars::new().set(Prop::Scale, 0.95).duration(0.4));
        assert_eq!(num(&el, Prop::Scale), 0.95);
        motion.tick(0.0);
        motion.tick(400.0);
        assert_eq!(num(&el, Prop::Scale), 1.0);
    }

    #[test]
    fn test_newer_tween_overwrites_same_props() {
        let motion = Motion::new();
        let el = Rc::new(FakeElement::new());
        let fired = Rc::new(Cell::new(0));

        let f = fired.clone();
        motion.to(
            el.clone(),
            TweenVars::new().set(Prop::Opacity, 0.0).on_complete(move || f.set(f.get() + 1)),
        );
        motion.tick(0.0);
        motion.to(el.clone(), TweenVars::new().set(Prop::Opacity, 1.0).duration(0.1));
        assert_eq!(motion.active(), 1);

        motion.tick(50.0);
        motion.tick(2000.0);
        assert_eq!(num(&el, Prop::Opacity), 1.0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_other_props_keep_running() {
        let motion = Motion::new();
        let el = Rc::new(FakeElement::new());
        motion.to(el.clone(), TweenVars::new().set(Prop::Opacity, 0.0).set(Prop::Scale, 2.0));
        motion.to(el.clone(), TweenVars::new().set(Prop::Opacity, 0.5));
        assert_eq!(motion.active(), 2);
        motion.tick(0.0);
        motion.tick(1000.0);
        assert_eq!(num(&el, Prop::Scale), 2.0);
        assert_eq!(num(&el, Prop::Opacity), 0.5);
    }

    #[test]
    fn test_callback_may_schedule_more() {
        let motion = Motion::new();
        let el = Rc::new(FakeElement::new());
        let chained = motion.clone();
        let target = el.clone();
        motion.to(
            el.clone(),
            TweenVars::new().set(Prop::X, 10.0).duration(0.0).on_complete(move || {
                chained.to(target, TweenVars::new().set(Prop::X, 20.0).duration(0.0));
            }),
        );
        motion.tick(0.0);
        assert_eq!(num(&el, Prop::X), 10.0);
        assert_eq!(motion.active(), 1);
        motion.tick(16.0);
        assert_eq!(num(&el, Prop::X), 20.0);
        assert!(motion.is_idle());
    }

    #[test]
    fn test_empty_timeline_ignored() {
        let motion = Motion::new();
        motion.play(Timeline::new());
        assert!(motion.is_idle());
    }
}
