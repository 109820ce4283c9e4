use smart_leds::RGB8;

use crate::math8::scale8;

pub type Rgb = RGB8;

/// All channels off.
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Color of the leading drop pixel.
pub const DROP_COLOR: Rgb = Rgb {
    r: 0,
    g: 150,
    b: 255,
};

/// Cyan-blue tail pixel for the given blue level.
///
/// Green is a third of blue, truncated.
pub const fn trail_color(brightness: u8) -> Rgb {
    Rgb {
        r: 0,
        g: brightness / 3,
        b: brightness,
    }
}

/// Scale every channel of `color` by `scale` (0-255 = 0.0-1.0).
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}
