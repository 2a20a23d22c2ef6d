//! Placement of the runaway No button and of Yes decoys.
//!
//! Coordinates are viewport pixels, as returned by `getBoundingClientRect`.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Rect of a box of `size` placed with its top-left corner at `at`.
    pub fn at(at: Point, size: Size) -> Self {
        Self::new(at.x, at.y, size.width, size.height)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

/// Uniform sample in `[min, max]`. An inverted range (region too small for
/// the control) collapses to `min`.
fn sample_axis<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Random top-left corner keeping a `control` sized box inside `region`
/// shrunk by `margin` on every side.
pub fn teleport_target<R: Rng + ?Sized>(region: Rect, control: Size, margin: f64, rng: &mut R) -> Point {
    let min_x = region.left + margin;
    let max_x = region.right - control.width - margin;
    let min_y = region.top + margin;
    let max_y = region.bottom - control.height - margin;
    Point {
        x: sample_axis(min_x, max_x, rng),
        y: sample_axis(min_y, max_y, rng),
    }
}

/// Like [`teleport_target`] but never above `subtitle.bottom + gap`, so decoys
/// stay clear of the taunt text. When the subtitle sits too low to leave room
/// below it, the whole margined region is used and overlap is accepted.
pub fn decoy_target<R: Rng + ?Sized>(
    region: Rect,
    control: Size,
    subtitle: Rect,
    margin: f64,
    gap: f64,
    rng: &mut R,
) -> Point {
    let min_x = region.left + margin;
    let max_x = region.right - control.width - margin;
    let max_y = region.bottom - control.height - margin;
    let below_subtitle = subtitle.bottom + gap;
    let min_y = if below_subtitle <= max_y {
        (region.top + margin).max(below_subtitle)
    } else {
        region.top + margin
    };
    Point {
        x: sample_axis(min_x, max_x, rng),
        y: sample_axis(min_y, max_y, rng),
    }
}

/// Spawned Yes decoys. No cap; drained only on success.
#[derive(Debug)]
pub struct DecoySet<D> {
    decoys: Vec<D>,
}

impl<D> Default for DecoySet<D> {
    fn default() -> Self {
        Self { decoys: Vec::new() }
    }
}

impl<D> DecoySet<D> {
    pub fn push(&mut self, decoy: D) {
        self.decoys.push(decoy);
    }

    pub fn len(&self) -> usize {
        self.decoys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoys.is_empty()
    }

    pub fn drain(&mut self) -> Vec<D> {
        std::mem::take(&mut self.decoys)
    }
}
