use skel_base::Vec2;

/// One detected body landmark in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub position: Vec2<f32>,
    /// Model-reported certainty in [0.0, 1.0], carried unchanged from detection to render
    pub confidence: f32,
}

impl Joint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            confidence,
        }
    }
}

/// An ordered set of joints for one detection tick.
///
/// A frame produced by the mapper is index-aligned with the keypoint schema;
/// a frame produced by the confidence filter is not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub joints: Vec<Joint>,
}

impl Frame {
    pub fn new(joints: Vec<Joint>) -> Self {
        Self { joints }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Joint> {
        self.joints.iter()
    }
}

impl From<Vec<Joint>> for Frame {
    fn from(joints: Vec<Joint>) -> Self {
        Self { joints }
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Joint;
    type IntoIter = std::slice::Iter<'a, Joint>;

    fn into_iter(self) -> Self::IntoIter {
        self.joints.iter()
    }
}

/// Order of the two spatial values inside each model output triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// (y, x, confidence), MoveNet's native layout
    #[default]
    YxConfidence,
    /// (x, y, confidence)
    XyConfidence,
}

/// Space the raw coordinates are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Values in [0, 1] relative to the source image
    #[default]
    Normalized,
    /// Pixels of the model input (or source) image
    Pixels,
}

/// A keypoint as emitted by a detection source, always stored as (x, y, confidence)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawKeypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

/// Raw keypoints for one tick, before mapping to the screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawKeypoints {
    pub points: Vec<RawKeypoint>,
    pub space: CoordinateSpace,
}

impl RawKeypoints {
    pub fn new(points: Vec<RawKeypoint>, space: CoordinateSpace) -> Self {
        Self { points, space }
    }

    /// Nothing detected this tick
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a flat buffer of triples, converting from `order` to (x, y, confidence).
    ///
    /// This is the only place where the model's axis order is undone. A buffer
    /// that is empty or not a whole number of triples decodes to no keypoints.
    pub fn from_flat(data: &[f32], order: AxisOrder, space: CoordinateSpace) -> Self {
        if data.is_empty() || data.len() % 3 != 0 {
            return Self::empty();
        }

        let points = data
            .chunks_exact(3)
            .map(|t| match order {
                AxisOrder::YxConfidence => RawKeypoint {
                    x: t[1],
                    y: t[0],
                    confidence: t[2],
                },
                AxisOrder::XyConfidence => RawKeypoint {
                    x: t[0],
                    y: t[1],
                    confidence: t[2],
                },
            })
            .collect();

        Self { points, space }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
