mod tests {
    use drip_light::color::{DROP_COLOR, Rgb, scale_color};
    use drip_light::math8::{ease_in_quad, scale8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_scale_color() {
        assert_eq!(scale_color(DROP_COLOR, 255), DROP_COLOR);
        assert_eq!(scale_color(DROP_COLOR, 128), Rgb { r: 0, g: 75, b: 128 });
    }

    #[test]
    fn test_ease_in_quad() {
        assert_eq!(ease_in_quad(0.0), 0.0);
        assert_eq!(ease_in_quad(0.5), 0.25);
        assert_eq!(ease_in_quad(1.0), 1.0);
    }
}
