//! Clipping against the viewport rectangle.

use crate::geom::{PixelRect, ScreenPoint};

use super::ScreenQuad;

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Cohen-Sutherland segment clipping.
pub(super) fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: PixelRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if !(start.x.is_finite() && start.y.is_finite() && end.x.is_finite() && end.y.is_finite()) {
        return None;
    }
    let mut out_start = region_code(start, rect);
    let mut out_end = region_code(end, rect);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x, y) = if (out_code & TOP) != 0 {
            let y = rect.top();
            (start.x + (end.x - start.x) * (y - start.y) / (end.y - start.y), y)
        } else if (out_code & BOTTOM) != 0 {
            let y = rect.bottom;
            (start.x + (end.x - start.x) * (y - start.y) / (end.y - start.y), y)
        } else if (out_code & RIGHT) != 0 {
            let x = rect.right();
            (x, start.y + (end.y - start.y) * (x - start.x) / (end.x - start.x))
        } else {
            let x = rect.left;
            (x, start.y + (end.y - start.y) * (x - start.x) / (end.x - start.x))
        };

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, rect);
        } else {
            end = new_point;
            out_end = region_code(end, rect);
        }
    }
}

/// Intersect the rectangle spanned by two corners with the viewport.
pub(super) fn clip_rect(a: ScreenPoint, b: ScreenPoint, rect: PixelRect) -> Option<ScreenQuad> {
    let min_x = a.x.min(b.x).max(rect.left);
    let max_x = a.x.max(b.x).min(rect.right());
    let min_y = a.y.min(b.y).max(rect.bottom);
    let max_y = a.y.max(b.y).min(rect.top());
    if !(min_x < max_x && min_y < max_y) {
        return None;
    }
    Some(ScreenQuad {
        min: ScreenPoint::new(min_x, min_y),
        max: ScreenPoint::new(max_x, max_y),
    })
}

fn region_code(point: ScreenPoint, rect: PixelRect) -> u8 {
    let mut code = 0;
    if point.x < rect.left {
        code |= LEFT;
    } else if point.x > rect.right() {
        code |= RIGHT;
    }
    if point.y < rect.bottom {
        code |= BOTTOM;
    } else if point.y > rect.top() {
        code |= TOP;
    }
    code
}
