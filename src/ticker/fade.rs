//! Edge fade overlay: the fade colour is opaque at both ends of the scroll
//! axis and clears over the first and last fifth.

use super::animation::Axis;

/// Fraction of the container length covered by each fading edge.
pub const FADE_EDGE_FRACTION: f64 = 0.2;

/// Default overlay colour.
pub const DEFAULT_FADE_COLOR: &str = "#fff";

/// Opacity of the fade colour at `position`, measured along the scroll axis
/// from 0.0 (leading edge) to 1.0 (trailing edge).
pub fn fade_opacity(position: f64) -> f64 {
    if !position.is_finite() {
        return 0.0;
    }
    let position = position.clamp(0.0, 1.0);
    if position < FADE_EDGE_FRACTION {
        1.0 - position / FADE_EDGE_FRACTION
    } else if position > 1.0 - FADE_EDGE_FRACTION {
        (position - (1.0 - FADE_EDGE_FRACTION)) / FADE_EDGE_FRACTION
    } else {
        0.0
    }
}

/// Opacity for cell `index` of `len` cells, sampled at the cell centre.
pub fn cell_fade_opacity(index: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    fade_opacity((index as f64 + 0.5) / len as f64)
}

/// CSS `background-image` for hosts that draw the overlay as an element.
/// Horizontal tickers fade left and right, vertical ones top and bottom.
///
/// `color` is expected as a hex colour, so the `00` alpha suffix yields its
/// transparent form.
pub fn fade_gradient_css(axis: Axis, color: &str) -> String {
    let angle = match axis {
        Axis::Horizontal => "90deg, ",
        Axis::Vertical => "",
    };
    format!("linear-gradient({angle}{color}, {color}00 20%, {color}00 80%, {color})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_opacity_profile() {
        assert!(close(fade_opacity(0.0), 1.0));
        assert!(close(fade_opacity(0.1), 0.5));
        assert!(close(fade_opacity(0.2), 0.0));
        assert!(close(fade_opacity(0.5), 0.0));
        assert!(close(fade_opacity(0.8), 0.0));
        assert!(close(fade_opacity(0.9), 0.5));
        assert!(close(fade_opacity(1.0), 1.0));
    }

    #[test]
    fn test_opacity_out_of_range() {
        assert!(close(fade_opacity(-3.0), 1.0));
        assert!(close(fade_opacity(7.0), 1.0));
        assert_eq!(fade_opacity(f64::NAN), 0.0);
    }

    #[test]
    fn test_cell_opacity_is_symmetric() {
        let len = 10;
        for i in 0..len {
            assert!(close(
                cell_fade_opacity(i, len),
                cell_fade_opacity(len - 1 - i, len)
            ));
        }
        assert!(close(cell_fade_opacity(0, 10), 0.75));
        assert_eq!(cell_fade_opacity(5, 10), 0.0);
        assert_eq!(cell_fade_opacity(0, 0), 0.0);
    }

    #[test]
    fn test_gradient_follows_axis() {
        assert_eq!(
            fade_gradient_css(Axis::Horizontal, DEFAULT_FADE_COLOR),
            "linear-gradient(90deg, #fff, #fff00 20%, #fff00 80%, #fff)"
        );
        assert_eq!(
            fade_gradient_css(Axis::Vertical, "#000000"),
            "linear-gradient(#000000, #00000000 20%, #00000000 80%, #000000)"
        );
    }
}
