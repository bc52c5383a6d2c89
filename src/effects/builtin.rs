use std::sync::Arc;

use crate::effects::presentation::{
    Edge, Presentation, PresentationRegistry, params_object, parse_edge, parse_positive_f64,
};
use crate::effects::style::{ClipShape, FULL_COVER_RADIUS, StyleDescriptor};
use crate::foundation::core::{Direction, Rect, Vec2};

pub(crate) fn register_all(reg: &mut PresentationRegistry) {
    reg.register_static("cut", Cut);
    reg.register_static("fade", Fade);
    reg.register_static("clock_wipe", ClockWipe);
    reg.register_static("iris", Iris);
    reg.register("slide", |params| {
        let p = params_object("slide", params)?;
        let from = parse_edge("slide", p, Edge::Right)?;
        Ok(Arc::new(Slide { from }) as Arc<dyn Presentation>)
    });
    reg.register("wipe", |params| {
        let p = params_object("wipe", params)?;
        let from = parse_edge("wipe", p, Edge::Left)?;
        Ok(Arc::new(Wipe { from }) as Arc<dyn Presentation>)
    });
    reg.register("flip", |params| {
        let p = params_object("flip", params)?;
        let from = parse_edge("flip", p, Edge::Right)?;
        let perspective_px = parse_positive_f64("flip", "perspective", p, 1000.0)?;
        Ok(Arc::new(Flip {
            from,
            perspective_px,
        }) as Arc<dyn Presentation>)
    });
}

/// Hard switch: the incoming scene pops in once the window completes.
#[derive(Clone, Copy, Debug)]
pub struct Cut;

impl Presentation for Cut {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        let done = progress >= 1.0;
        match direction {
            Direction::Entering => StyleDescriptor::with_opacity(if done { 1.0 } else { 0.0 }),
            Direction::Exiting => StyleDescriptor::with_opacity(if done { 0.0 } else { 1.0 }),
            Direction::Steady => StyleDescriptor::identity(),
        }
    }
}

/// Cross-fade through opacity. Opacity is clamped even when the timing overshoots.
#[derive(Clone, Copy, Debug)]
pub struct Fade;

impl Presentation for Fade {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        let p = progress.clamp(0.0, 1.0);
        match direction {
            Direction::Entering => StyleDescriptor::with_opacity(p),
            Direction::Exiting => StyleDescriptor::with_opacity(1.0 - p),
            Direction::Steady => StyleDescriptor::identity(),
        }
    }
}

/// Incoming scene pushes in from an edge while the outgoing one leaves through the opposite
/// edge. Overshoot is kept so back/elastic timings bounce past the resting position.
#[derive(Clone, Copy, Debug)]
pub struct Slide {
    /// Edge the incoming scene enters from.
    pub from: Edge,
}

impl Presentation for Slide {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        // Unit vector pointing from the resting position towards the entry edge.
        let toward_entry = match self.from {
            Edge::Left => Vec2::new(-1.0, 0.0),
            Edge::Right => Vec2::new(1.0, 0.0),
            Edge::Top => Vec2::new(0.0, -1.0),
            Edge::Bottom => Vec2::new(0.0, 1.0),
        };
        let translate = match direction {
            Direction::Entering => toward_entry * (1.0 - progress),
            Direction::Exiting => -toward_entry * progress,
            Direction::Steady => return StyleDescriptor::identity(),
        };
        StyleDescriptor {
            translate,
            ..StyleDescriptor::identity()
        }
    }
}

/// Rectangular reveal sweeping in from an edge; the outgoing scene keeps the uncovered part.
#[derive(Clone, Copy, Debug)]
pub struct Wipe {
    /// Edge the reveal starts at.
    pub from: Edge,
}

impl Presentation for Wipe {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        let p = progress.clamp(0.0, 1.0);
        let (revealed, remaining) = match self.from {
            Edge::Left => (Rect::new(0.0, 0.0, p, 1.0), Rect::new(p, 0.0, 1.0, 1.0)),
            Edge::Right => (
                Rect::new(1.0 - p, 0.0, 1.0, 1.0),
                Rect::new(0.0, 0.0, 1.0 - p, 1.0),
            ),
            Edge::Top => (Rect::new(0.0, 0.0, 1.0, p), Rect::new(0.0, p, 1.0, 1.0)),
            Edge::Bottom => (
                Rect::new(0.0, 1.0 - p, 1.0, 1.0),
                Rect::new(0.0, 0.0, 1.0, 1.0 - p),
            ),
        };
        let clip = match direction {
            Direction::Entering => ClipShape::Rect(revealed),
            Direction::Exiting => ClipShape::Rect(remaining),
            Direction::Steady => return StyleDescriptor::identity(),
        };
        StyleDescriptor {
            clip,
            ..StyleDescriptor::identity()
        }
    }
}

/// Card flip: both scenes rotate together half a turn, each showing only its front face.
#[derive(Clone, Copy, Debug)]
pub struct Flip {
    /// Edge the incoming face swings in from; left/right rotate about Y, top/bottom about X.
    pub from: Edge,
    /// Perspective distance in pixels.
    pub perspective_px: f64,
}

impl Presentation for Flip {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        let sign = match self.from {
            Edge::Right | Edge::Bottom => 1.0,
            Edge::Left | Edge::Top => -1.0,
        };
        let angle = match direction {
            Direction::Entering => sign * 180.0 * (1.0 - progress),
            Direction::Exiting => -sign * 180.0 * progress,
            Direction::Steady => return StyleDescriptor::identity(),
        };
        let (rotate_x_deg, rotate_y_deg) = match self.from {
            Edge::Left | Edge::Right => (0.0, angle),
            Edge::Top | Edge::Bottom => (angle, 0.0),
        };
        StyleDescriptor {
            rotate_x_deg,
            rotate_y_deg,
            perspective_px: Some(self.perspective_px),
            ..StyleDescriptor::identity()
        }
    }
}

/// Clock-hand sweep from 12 o'clock, clockwise.
#[derive(Clone, Copy, Debug)]
pub struct ClockWipe;

impl Presentation for ClockWipe {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        let swept = 360.0 * progress.clamp(0.0, 1.0);
        let clip = match direction {
            Direction::Entering => ClipShape::Sector {
                start_deg: 0.0,
                sweep_deg: swept,
            },
            Direction::Exiting => ClipShape::Sector {
                start_deg: swept,
                sweep_deg: 360.0 - swept,
            },
            Direction::Steady => return StyleDescriptor::identity(),
        };
        StyleDescriptor {
            clip,
            ..StyleDescriptor::identity()
        }
    }
}

/// Circular aperture: opens on the incoming scene, closes on the outgoing one.
#[derive(Clone, Copy, Debug)]
pub struct Iris;

impl Presentation for Iris {
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor {
        let p = progress.clamp(0.0, 1.0);
        let radius = match direction {
            Direction::Entering => FULL_COVER_RADIUS * p,
            Direction::Exiting => FULL_COVER_RADIUS * (1.0 - p),
            Direction::Steady => return StyleDescriptor::identity(),
        };
        StyleDescriptor {
            clip: ClipShape::Circle { radius },
            ..StyleDescriptor::identity()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/builtin.rs"]
mod tests;
