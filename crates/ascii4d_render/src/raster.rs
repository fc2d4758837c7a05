//! Integer line rasterization (Bresenham)

/// Iterator over the lattice points of a line segment, both ends included.
#[derive(Clone, Debug)]
pub struct LineIter {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl LineIter {
    pub fn new((x0, y0): (i32, i32), (x1, y1): (i32, i32)) -> Self {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for LineIter {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let point = (self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // Every step advances the major axis by one
        let remaining = (self.x1 - self.x).abs().max((self.y1 - self.y).abs()) as usize + 1;
        (remaining, Some(remaining))
    }
}

/// Lattice points from `from` to `to`, inclusive, in drawing order.
pub fn rasterize(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
    LineIter::new(from, to).collect()
}
