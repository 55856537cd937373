use crate::geometry::{BoundsMargins, Size, Transform};

/// Returns `transform` with its offsets pulled back inside the viewport.
///
/// Horizontally the offset is only clamped: content narrower than the viewport
/// may rest anywhere between the margins, wider content may not expose empty
/// space past them. Vertically, content shorter than the viewport is always
/// centered; taller content is clamped like the horizontal axis.
pub fn bounded_transform(transform: Transform, content: Size, viewport: Size) -> Transform {
    let scaled = content.scaled(transform.scale);
    let margins = BoundsMargins::for_viewport(viewport);

    let (min_x, max_x) = if scaled.width + 2.0 * margins.x <= viewport.width {
        (margins.x, viewport.width - scaled.width - margins.x)
    } else {
        (viewport.width - scaled.width - margins.x, margins.x)
    };

    let mut bounded = transform;
    if bounded.x < min_x {
        bounded.x = min_x;
    }
    if bounded.x > max_x {
        bounded.x = max_x;
    }

    if scaled.height + 2.0 * margins.y <= viewport.height {
        bounded.y = viewport.height / 2.0 - scaled.height / 2.0;
    } else {
        let min_y = viewport.height - scaled.height - margins.y;
        let max_y = margins.y;
        if bounded.y < min_y {
            bounded.y = min_y;
        }
        if bounded.y > max_y {
            bounded.y = max_y;
        }
    }

    bounded
}
