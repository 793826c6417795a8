use crate::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: std::ops::Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: std::ops::Add<Output = T> + PartialOrd + Copy> Rect<T> {
    /// Closed containment: points on the far edges count as inside.
    ///
    /// A canvas of width `w` accepts `x == w`, which matches how overlay joints
    /// are culled against `[0, w] x [0, h]`.
    pub fn contains_point_inclusive(&self, point: Vec2<T>) -> bool {
        let max = self.max();
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= max.x
            && point.y <= max.y
    }
}

impl Rect<f32> {
    /// Smallest rectangle enclosing all points, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2<f32>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::from_min_max(min, max))
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }
}
