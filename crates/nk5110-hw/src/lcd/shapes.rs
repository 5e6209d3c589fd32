//! Rectangles and rounded rectangles.
//!
//! Rounded corners are rasterized with the midpoint circle algorithm, one
//! quarter per [`Corner`]. Outlines plot the arc pixels; fills sweep the
//! quarter-disk with horizontal spans.

use super::framebuffer::Framebuffer;

/// One 90° quarter of a circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All four corners in drawing order.
    pub const ALL: [Corner; 4] = [
        Corner::TopRight,
        Corner::TopLeft,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Plots the quarter-circle outline of radius `r` centred on `(cx, cy)`.
    pub fn plot_arc(self, fb: &mut Framebuffer, cx: i32, cy: i32, r: i32, set: bool) {
        let mut arc = MidpointArc::new(r);
        while arc.x < arc.y {
            arc.step();
            let (x, y) = (arc.x, arc.y);
            let points = match self {
                Corner::TopRight => [(cx + x, cy - y), (cx + y, cy - x)],
                Corner::TopLeft => [(cx - y, cy - x), (cx - x, cy - y)],
                Corner::BottomLeft => [(cx - x, cy + y), (cx - y, cy + x)],
                Corner::BottomRight => [(cx + y, cy + x), (cx + x, cy + y)],
            };
            for (px, py) in points {
                fb.plot(px, py, set);
            }
        }
    }

    /// Fills the quarter-disk of radius `r` centred on `(cx, cy)`.
    ///
    /// The `x != y` guard skips the mirrored span on the 45° row, which the
    /// primary span already covers.
    pub fn fill_arc(self, fb: &mut Framebuffer, cx: i32, cy: i32, r: i32, set: bool) {
        let mut arc = MidpointArc::new(r);
        while arc.x <= arc.y {
            let (x, y) = (arc.x, arc.y);
            let primary = y > 0;
            let mirrored = x > 0 && x != y;
            match self {
                Corner::TopRight => {
                    if primary {
                        fb.fast_hline(cx, cy - y, x + 1, set);
                    }
                    if mirrored {
                        fb.fast_hline(cx, cy - x, y + 1, set);
                    }
                }
                Corner::TopLeft => {
                    if primary {
                        fb.fast_hline(cx - x, cy - y, x + 1, set);
                    }
                    if mirrored {
                        fb.fast_hline(cx - y, cy - x, y + 1, set);
                    }
                }
                Corner::BottomLeft => {
                    if mirrored {
                        fb.fast_hline(cx - y, cy + x, y + 1, set);
                    }
                    if primary {
                        fb.fast_hline(cx - x, cy + y, x + 1, set);
                    }
                }
                Corner::BottomRight => {
                    if mirrored {
                        fb.fast_hline(cx, cy + x, y + 1, set);
                    }
                    if primary {
                        fb.fast_hline(cx, cy + y, x + 1, set);
                    }
                }
            }
            arc.step();
        }
    }

    /// Arc centre for this corner of a `w` x `h` box at `(x, y)` with radius `r`.
    fn centre(self, x: i32, y: i32, w: i32, h: i32, r: i32) -> (i32, i32) {
        match self {
            Corner::TopRight => (x + w - r - 1, y + r),
            Corner::TopLeft => (x + r, y + r),
            Corner::BottomLeft => (x + r, y + h - r - 1),
            Corner::BottomRight => (x + w - r - 1, y + h - r - 1),
        }
    }
}

/// Midpoint circle recurrence over one octant, starting at `(0, r)`.
struct MidpointArc {
    f: i32,
    ddf_x: i32,
    ddf_y: i32,
    x: i32,
    y: i32,
}

impl MidpointArc {
    fn new(r: i32) -> Self {
        Self {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }

    fn step(&mut self) {
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
    }
}

/// Limits the corner radius to half the shorter side.
fn clamp_radius(w: i32, h: i32, r: i32) -> i32 {
    let r = r.max(0);
    if r > w / 2 || r > h / 2 {
        w.min(h) / 2
    } else {
        r
    }
}

impl Framebuffer {
    /// Draws the outline of a rectangle.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, set: bool) {
        if w < 1 || h < 1 {
            return;
        }
        let (x, y) = (i32::from(x), i32::from(y));
        let x2 = x + i32::from(w) - 1;
        let y2 = y + i32::from(h) - 1;

        self.line(x, y, x2, y, set); // Top
        self.line(x2, y, x2, y2, set); // Right
        self.line(x2, y2, x, y2, set); // Bottom
        self.line(x, y2, x, y, set); // Left
    }

    /// Draws a solid filled rectangle.
    pub fn draw_frect(&mut self, x: i16, y: i16, w: i16, h: i16, set: bool) {
        self.frect(x.into(), y.into(), w.into(), h.into(), set);
    }

    fn frect(&mut self, x: i32, y: i32, w: i32, h: i32, set: bool) {
        for row in y..y + h {
            self.fast_hline(x, row, w, set);
        }
    }

    /// Draws the outline of a rectangle with rounded corners.
    ///
    /// `r` is clamped to half the shorter side.
    pub fn draw_rrect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, set: bool) {
        let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
        let r = clamp_radius(w, h, r.into());

        self.fast_hline(x + r, y, w - 2 * r, set);
        self.fast_hline(x + r, y + h - 1, w - 2 * r, set);
        self.frect(x, y + r, 1, h - 2 * r, set);
        self.frect(x + w - 1, y + r, 1, h - 2 * r, set);

        for corner in Corner::ALL {
            let (cx, cy) = corner.centre(x, y, w, h, r);
            corner.plot_arc(self, cx, cy, r, set);
        }
    }

    /// Draws a solid filled rectangle with rounded corners.
    ///
    /// `r` is clamped to half the shorter side.
    pub fn draw_rfrect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, set: bool) {
        let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
        let r = clamp_radius(w, h, r.into());

        self.frect(x, y + r, w, h - 2 * r, set);
        self.frect(x + r, y, w - 2 * r, r, set);
        self.frect(x + r, y + h - r, w - 2 * r, r, set);

        for corner in Corner::ALL {
            let (cx, cy) = corner.centre(x, y, w, h, r);
            corner.fill_arc(self, cx, cy, r, set);
        }
    }
}
