//! Gradient Backdrop
//!
//! Four soft blobs drift, grow and shift tint behind the page, then drift
//! back, forever.

use std::rc::Rc;

use web_sys::Document;

use crate::config::BackdropConfig;
use crate::dom::query_all;
use crate::error::PageError;
use crate::motion::{Animatable, Ease, Prop, Repeat, Rgba, Timeline, TweenScheduler, TweenVars};

/// Where one blob ends up at the far end of the yoyo
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobMotion {
    pub selector: &'static str,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub tint: Rgba,
}

pub const BLOBS: [BlobMotion; 4] = [
    BlobMotion {
        selector: ".gradient-blob-1",
        x: -100.0,
        y: 50.0,
        scale: 1.1,
        tint: Rgba::new(220.0, 220.0, 220.0, 0.08),
    },
    BlobMotion {
        selector: ".gradient-blob-2",
        x: 80.0,
        y: -80.0,
        scale: 1.15,
        tint: Rgba::new(150.0, 150.0, 150.0, 0.12),
    },
    BlobMotion {
        selector: ".gradient-blob-3",
        x: -60.0,
        y: -60.0,
        scale: 1.2,
        tint: Rgba::new(180.0, 180.0, 180.0, 0.08),
    },
    BlobMotion {
        selector: ".gradient-blob-4",
        x: 70.0,
        y: 70.0,
        scale: 1.1,
        tint: Rgba::new(160.0, 160.0, 160.0, 0.1),
    },
];

impl BlobMotion {
    fn vars(&self) -> TweenVars {
        TweenVars::new()
            .set(Prop::X, self.x)
            .set(Prop::Y, self.y)
            .set(Prop::Scale, self.scale)
            .set(Prop::BackgroundColor, self.tint)
    }
}

/// One yoyo timeline moving every found blob in parallel. `blobs` pairs each
/// motion with the elements it applies to.
pub fn blob_timeline(
    blobs: impl IntoIterator<Item = (BlobMotion, Vec<Rc<dyn Animatable>>)>,
    leg_duration: f64,
) -> Timeline {
    let mut timeline = Timeline::new()
        .defaults(leg_duration, Ease::None)
        .repeat(Repeat::Forever)
        .yoyo(true);
    for (motion, targets) in blobs {
        for target in targets {
            timeline = timeline.to_at(target, motion.vars(), 0.0);
        }
    }
    timeline
}

pub fn wire(
    document: &Document,
    scheduler: &Rc<dyn TweenScheduler>,
    config: &BackdropConfig,
) -> Result<(), PageError> {
    if !config.enabled {
        tracing::debug!("backdrop animation disabled");
        return Ok(());
    }
    let mut found = Vec::with_capacity(BLOBS.len());
    for blob in BLOBS {
        let targets: Vec<Rc<dyn Animatable>> = query_all(document, blob.selector)?
            .into_iter()
            .map(|el| el as Rc<dyn Animatable>)
            .collect();
        if targets.is_empty() {
            tracing::debug!(selector = blob.selector, "blob not on page");
        }
        found.push((blob, targets));
    }

    let timeline = blob_timeline(found, config.leg_duration);
    let blobs = timeline.len();
    scheduler.play(timeline);
    tracing::debug!(blobs, "backdrop animation started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Motion, Value};
    use crate::testing::FakeElement;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn setup() -> (Motion, Vec<Rc<FakeElement>>) {
        let els: Vec<_> = BLOBS.iter().map(|_| Rc::new(FakeElement::new())).collect();
        let pairs = BLOBS
            .iter()
            .zip(&els)
            .map(|(b, el)| (*b, vec![el.clone() as Rc<dyn Animatable>]));
        let motion = Motion::new();
        motion.play(blob_timeline(pairs, 15.0));
        (motion, els)
    }

    #[test]
    fn test_blobs_reach_targets_after_one_leg() {
        let (motion, els) = setup();
        motion.tick(0.0);
        motion.tick(15_000.0);
        for (blob, el) in BLOBS.iter().zip(&els) {
            assert!(close(el.num(Prop::X), blob.x));
            assert!(close(el.num(Prop::Y), blob.y));
            assert!(close(el.num(Prop::Scale), blob.scale));
            assert_eq!(el.read(Prop::BackgroundColor), Value::Color(blob.tint));
        }
    }

    #[test]
    fn test_blobs_move_linearly() {
        let (motion, els) = setup();
        motion.tick(0.0);
        motion.tick(7_500.0);
        assert!(close(els[0].num(Prop::X), -50.0));
        assert!(close(els[1].num(Prop::Y), -40.0));
    }

    #[test]
    fn test_yoyo_returns_and_never_ends() {
        let (motion, els) = setup();
        motion.tick(0.0);
        motion.tick(15_000.0);
        motion.tick(30_000.0);
        assert!(close(els[3].num(Prop::X), 0.0));
        assert!(close(els[3].num(Prop::Scale), 1.0));
        motion.tick(600_000.0);
        assert!(!motion.is_idle());
    }

    #[test]
    fn test_missing_blobs_left_out() {
        let el = Rc::new(FakeElement::new());
        let timeline = blob_timeline(
            [(BLOBS[0], vec![el as Rc<dyn Animatable>]), (BLOBS[1], Vec::new())],
            15.0,
        );
        assert_eq!(timeline.len(), 1);
    }
}
