//! Screen-space geometry. Coordinates are CSS pixels with the origin at the
//! top-left of the viewport and `y` growing downward.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
///
/// The platform announces soft-keyboard frames with both origin/size and the
/// precomputed edges of a DOMRect, so serialization follows that shape; the
/// edges are derived on the way out and ignored on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> f64 { self.x }

    pub fn top(&self) -> f64 { self.y }

    pub fn right(&self) -> f64 { self.x + self.width }

    pub fn bottom(&self) -> f64 { self.y + self.height }

    /// True when the interiors overlap. Rectangles that only share an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Visible screen area used to bound placement decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport { Viewport { width, height } }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left() >= 0.0
            && rect.top() >= 0.0
            && rect.right() <= self.width
            && rect.bottom() <= self.height
    }
}

impl Serialize for Rect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        #[derive(Serialize)]
        struct RectSer {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
            top: f64,
            left: f64,
            right: f64,
            bottom: f64,
        }

        let helper = RectSer {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            top: self.top(),
            left: self.left(),
            right: self.right(),
            bottom: self.bottom(),
        };

        helper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        #[derive(Deserialize)]
        struct RectDe {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
            // DOMRect edges, redundant with origin/size.
            #[serde(default)]
            #[allow(dead_code)]
            top: Option<f64>,
            #[serde(default)]
            #[allow(dead_code)]
            left: Option<f64>,
            #[serde(default)]
            #[allow(dead_code)]
            right: Option<f64>,
            #[serde(default)]
            #[allow(dead_code)]
            bottom: Option<f64>,
        }

        let helper = RectDe::deserialize(deserializer)?;
        Ok(Rect::new(helper.x, helper.y, helper.width, helper.height))
    }
}
