use crate::OverlayError;
use skel_base::Vec2;
use skel_infer::Connection;

pub type Rgb = [u8; 3];

/// One joint marker: a filled disc with an optional ring around it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub joint: usize,
    pub center: Vec2<f32>,
    pub radius: f32,
    pub color: Rgb,
    pub alpha: f32,
    /// Ring width in pixels, 0 for none
    pub outline: f32,
    pub outline_color: Rgb,
}

/// One connection drawn between two joint positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub connection: Connection,
    pub from: Vec2<f32>,
    pub to: Vec2<f32>,
    pub width: f32,
    pub color: Rgb,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Segment(Segment),
    Marker(Marker),
}

/// Anything the skeleton renderer can draw onto.
///
/// Coordinates are destination pixels. Implementations clip to their own
/// bounds; culling of joints is the renderer's job.
pub trait Surface {
    fn size(&self) -> Vec2<f32>;
    fn draw_segment(&mut self, segment: &Segment);
    fn draw_marker(&mut self, marker: &Marker);
}

/// Records draw commands instead of rasterizing them.
///
/// This is the point data handed to an external compositor each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    size: Vec2<f32>,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Marker(m) => Some(m),
            DrawCommand::Segment(_) => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Segment(s) => Some(s),
            DrawCommand::Marker(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Draw the recorded commands, in order, onto another surface
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Segment(s) => surface.draw_segment(s),
                DrawCommand::Marker(m) => surface.draw_marker(m),
            }
        }
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2<f32> {
        self.size
    }

    fn draw_segment(&mut self, segment: &Segment) {
        self.commands.push(DrawCommand::Segment(*segment));
    }

    fn draw_marker(&mut self, marker: &Marker) {
        self.commands.push(DrawCommand::Marker(*marker));
    }
}

/// Packed HWC RGB pixel buffer with alpha-blended drawing
#[derive(Clone, PartialEq)]
pub struct RgbSurface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl std::fmt::Debug for RgbSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RgbSurface({}x{})", self.width, self.height)
    }
}

impl RgbSurface {
    /// A black surface
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Wrap an existing HWC RGB buffer, e.g. a camera frame
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self, OverlayError> {
        if data.len() != width * height * 3 {
            return Err(OverlayError::Config(format!(
                "rgb buffer of {} bytes does not fit {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    pub fn fill(&mut self, color: Rgb) {
        for px in self.data.chunks_exact_mut(3) {
            px.copy_from_slice(&color);
        }
    }

    /// Convert to packed 0x00RRGGBB for window back-buffers
    pub fn to_argb(&self) -> Vec<u32> {
        self.data
            .chunks_exact(3)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
            .collect()
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 3;
        let alpha = alpha.clamp(0.0, 1.0);
        for (dst, src) in self.data[idx..idx + 3].iter_mut().zip(color) {
            let mixed = *dst as f32 * (1.0 - alpha) + src as f32 * alpha;
            *dst = mixed.round() as u8;
        }
    }
}

impl Surface for RgbSurface {
    fn size(&self) -> Vec2<f32> {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn draw_segment(&mut self, segment: &Segment) {
        let path = line_pixels(
            to_px(segment.from.x),
            to_px(segment.from.y),
            to_px(segment.to.x),
            to_px(segment.to.y),
            self.width as i64,
            self.height as i64,
        );

        // stamp a disc along the path for strokes wider than a pixel
        let brush = (segment.width.max(0.0) / 2.0).floor() as i64;
        let mut pixels = Vec::with_capacity(path.len() * (2 * brush as usize + 1).pow(2));
        for (x, y) in path {
            for dy in -brush..=brush {
                for dx in -brush..=brush {
                    if dx * dx + dy * dy <= brush * brush {
                        pixels.push((x + dx, y + dy));
                    }
                }
            }
        }
        pixels.sort_unstable();
        pixels.dedup();

        for (x, y) in pixels {
            self.blend_pixel(x, y, segment.color, segment.alpha);
        }
    }

    fn draw_marker(&mut self, marker: &Marker) {
        let cx = to_px(marker.center.x);
        let cy = to_px(marker.center.y);
        let inner = marker.radius.max(0.0);
        let outer = inner + marker.outline.max(0.0);
        let reach = outer.ceil() as i64;
        let (inner2, outer2) = (inner * inner, outer * outer);

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let d2 = (dx * dx + dy * dy) as f32;
                if d2 <= inner2 {
                    self.blend_pixel(cx + dx, cy + dy, marker.color, marker.alpha);
                } else if d2 <= outer2 {
                    self.blend_pixel(cx + dx, cy + dy, marker.outline_color, marker.alpha);
                }
            }
        }
    }
}

// keeps clip arithmetic far away from i64 overflow
const COORD_LIMIT: f32 = 1.0e6;

fn to_px(v: f32) -> i64 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT).round() as i64
}

/// Pixels of a Bresenham line, clipped to `[0, width) x [0, height)`
pub fn line_pixels(
    mut x0: i64,
    mut y0: i64,
    mut x1: i64,
    mut y1: i64,
    width: i64,
    height: i64,
) -> Vec<(i64, i64)> {
    if width <= 0 || height <= 0 {
        return Vec::new();
    }

    // Cohen-Sutherland clipping
    loop {
        let outcode0 = compute_outcode(x0, y0, width, height);
        let outcode1 = compute_outcode(x1, y1, width, height);

        if (outcode0 | outcode1) == 0 {
            break;
        } else if (outcode0 & outcode1) != 0 {
            return Vec::new();
        } else {
            let outcode = if outcode0 != 0 { outcode0 } else { outcode1 };
            let (x, y) = clip_point(x0, y0, x1, y1, outcode, width, height);

            if outcode == outcode0 {
                x0 = x;
                y0 = y;
            } else {
                x1 = x;
                y1 = y;
            }
        }
    }

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let mut pixels = Vec::with_capacity((dx.max(dy) + 1) as usize);

    loop {
        pixels.push((x0, y0));

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }

    pixels
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn compute_outcode(x: i64, y: i64, width: i64, height: i64) -> u8 {
    let mut code = INSIDE;
    if x < 0 {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y >= height {
        code |= BOTTOM;
    }
    code
}

fn clip_point(
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    outcode: u8,
    width: i64,
    height: i64,
) -> (i64, i64) {
    let dx = x1 - x0;
    let dy = y1 - y0;

    if outcode & TOP != 0 {
        (x0 + dx * (0 - y0) / dy, 0)
    } else if outcode & BOTTOM != 0 {
        (x0 + dx * (height - 1 - y0) / dy, height - 1)
    } else if outcode & LEFT != 0 {
        (0, y0 + dy * (0 - x0) / dx)
    } else {
        (width - 1, y0 + dy * (width - 1 - x0) / dx)
    }
}
