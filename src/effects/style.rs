use crate::foundation::core::{Affine, Rect, Vec2};

const EPS: f64 = 1e-9;

/// Radius (in unit-square coordinates) of the smallest centred circle covering the square.
pub const FULL_COVER_RADIUS: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Clip region in unit coordinates: `(0, 0)` is the top-left and `(1, 1)` the bottom-right
/// of the scene's content box.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipShape {
    /// No clipping.
    #[default]
    None,
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Pie slice centred on the content box; angles are clockwise from 12 o'clock.
    Sector {
        /// Start angle in degrees.
        start_deg: f64,
        /// Sweep in degrees, `>= 360` covers everything.
        sweep_deg: f64,
    },
    /// Circle centred on the content box.
    Circle {
        /// Radius in unit coordinates; [`FULL_COVER_RADIUS`] reaches the corners.
        radius: f64,
    },
}

impl ClipShape {
    /// `true` when the clip lets nothing through.
    pub fn is_empty(&self) -> bool {
        match *self {
            Self::None => false,
            Self::Rect(r) => {
                let r = r.intersect(Rect::new(0.0, 0.0, 1.0, 1.0));
                r.width() <= EPS || r.height() <= EPS
            }
            Self::Sector { sweep_deg, .. } => sweep_deg <= EPS,
            Self::Circle { radius } => radius <= EPS,
        }
    }

    /// `true` when the clip covers the whole unit square.
    pub fn covers_all(&self) -> bool {
        match *self {
            Self::None => true,
            Self::Rect(r) => {
                r.x0 <= EPS && r.y0 <= EPS && r.x1 >= 1.0 - EPS && r.y1 >= 1.0 - EPS
            }
            Self::Sector { sweep_deg, .. } => sweep_deg >= 360.0 - EPS,
            Self::Circle { radius } => radius >= FULL_COVER_RADIUS - EPS,
        }
    }
}

/// Renderer-agnostic description of how to draw one scene layer for one frame.
///
/// Translation is expressed in fractions of the canvas size so the descriptor stays
/// independent of output resolution. Rotations are 3D rotations about the content centre with
/// the back face hidden.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleDescriptor {
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Offset as a fraction of canvas width/height.
    pub translate: Vec2,
    /// Uniform scale about the content centre.
    pub scale: f64,
    /// Rotation about the horizontal axis, degrees.
    pub rotate_x_deg: f64,
    /// Rotation about the vertical axis, degrees.
    pub rotate_y_deg: f64,
    /// CSS-style perspective distance for 3D rotation, if any.
    pub perspective_px: Option<f64>,
    /// Clip region.
    pub clip: ClipShape,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self::identity()
    }
}

impl StyleDescriptor {
    /// Fully visible, untransformed, unclipped.
    pub const fn identity() -> Self {
        Self {
            opacity: 1.0,
            translate: Vec2::ZERO,
            scale: 1.0,
            rotate_x_deg: 0.0,
            rotate_y_deg: 0.0,
            perspective_px: None,
            clip: ClipShape::None,
        }
    }

    /// Identity with the given opacity.
    pub fn with_opacity(opacity: f64) -> Self {
        Self {
            opacity,
            ..Self::identity()
        }
    }

    /// `true` when nothing of the content can be seen.
    pub fn is_fully_hidden(&self) -> bool {
        self.opacity <= EPS
            || self.scale <= EPS
            || self.clip.is_empty()
            || self.translate.x.abs() >= 1.0 - EPS
            || self.translate.y.abs() >= 1.0 - EPS
            || faces_away(self.rotate_x_deg)
            || faces_away(self.rotate_y_deg)
    }

    /// `true` when the content is drawn exactly as if no style were applied.
    pub fn is_fully_visible(&self) -> bool {
        self.opacity >= 1.0 - EPS
            && (self.scale - 1.0).abs() <= EPS
            && self.translate.hypot() <= EPS
            && is_upright(self.rotate_x_deg)
            && is_upright(self.rotate_y_deg)
            && self.clip.covers_all()
    }

    /// Stack `other` on top of `self`: opacity and scale multiply, translation and rotation
    /// add, and rectangular clips intersect. When both sides clip with different shapes the
    /// receiver's clip wins.
    pub fn compose(&self, other: &StyleDescriptor) -> StyleDescriptor {
        let clip = match (self.clip, other.clip) {
            (ClipShape::None, c) => c,
            (c, ClipShape::None) => c,
            (ClipShape::Rect(a), ClipShape::Rect(b)) => ClipShape::Rect(a.intersect(b)),
            (c, _) => c,
        };
        StyleDescriptor {
            opacity: self.opacity * other.opacity,
            translate: self.translate + other.translate,
            scale: self.scale * other.scale,
            rotate_x_deg: self.rotate_x_deg + other.rotate_x_deg,
            rotate_y_deg: self.rotate_y_deg + other.rotate_y_deg,
            perspective_px: other.perspective_px.or(self.perspective_px),
            clip,
        }
    }

    /// 2D part of the style for a `width x height` canvas: scale about the centre, then
    /// translate. 3D rotations are left to the renderer.
    pub fn to_affine(&self, width: f64, height: f64) -> Affine {
        let centre = Vec2::new(width * 0.5, height * 0.5);
        let offset = Vec2::new(self.translate.x * width, self.translate.y * height);
        Affine::translate(offset)
            * Affine::translate(centre)
            * Affine::scale(self.scale)
            * Affine::translate(-centre)
    }
}

fn faces_away(deg: f64) -> bool {
    deg.to_radians().cos() <= EPS
}

fn is_upright(deg: f64) -> bool {
    (deg.to_radians().cos() - 1.0).abs() <= EPS
}

#[cfg(test)]
#[path = "../../tests/unit/effects/style.rs"]
mod tests;
