mod tests {
    use drip_light::color::{BLACK, DROP_COLOR, Rgb, trail_color};
    use drip_light::{DripAnimator, DripConfig, DripConfigError, TickOutcome};

    const TRAIL_1: Rgb = Rgb { r: 0, g: 40, b: 120 };
    const TRAIL_2: Rgb = Rgb { r: 0, g: 30, b: 90 };

    fn animator(len: usize) -> DripAnimator {
        DripAnimator::new(DripConfig::new(len).unwrap())
    }

    fn main_index(animator: &DripAnimator) -> usize {
        animator.state().position.floor() as usize
    }

    #[test]
    fn test_first_tick_scenario() {
        let mut drip = animator(12);
        let mut leds = [BLACK; 12];
        assert!(drip.trigger());

        assert_eq!(drip.tick(&mut leds), TickOutcome::Running);
        assert!((drip.state().position - 0.25).abs() < 1e-6);
        assert_eq!(leds[0], DROP_COLOR);
        assert!(leds[1..].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut drip = animator(12);
        let mut leds = [TRAIL_1; 12];
        assert_eq!(drip.tick(&mut leds), TickOutcome::Idle);
        assert!(leds.iter().all(|led| *led == TRAIL_1));
        assert!(!drip.is_active());
    }

    #[test]
    fn test_trigger_while_active_keeps_position() {
        let mut drip = animator(12);
        let mut leds = [BLACK; 12];
        drip.trigger();
        drip.tick(&mut leds);
        drip.tick(&mut leds);
        let position = drip.state().position;

        assert!(!drip.trigger());
        assert!(drip.is_active());
        assert_eq!(drip.state().position, position);
    }

    #[test]
    fn test_step_follows_quadratic_ease_in() {
        let mut drip = animator(12);
        let mut leds = [BLACK; 12];
        drip.trigger();

        let mut previous = drip.state().position;
        let mut previous_step = 0.0;
        while drip.tick(&mut leds) == TickOutcome::Running {
            let position = drip.state().position;
            let progress = previous / 11.0;
            let expected = 0.25 + progress * progress * 2.0;
            let step = position - previous;

            assert!((step - expected).abs() < 1e-5, "step {step} != {expected}");
            assert!(step > previous_step);
            if previous >= 5.0 && previous < 5.5 {
                assert!(step > 0.6);
            }
            previous_step = step;
            previous = position;
        }
    }

    #[test]
    fn test_completes_once_at_end() {
        let mut drip = animator(12);
        let mut leds = [BLACK; 12];
        drip.trigger();

        let mut completions = 0;
        let mut previous = 0.0;
        for _ in 0..100 {
            match drip.tick(&mut leds) {
                TickOutcome::Completed => completions += 1,
                TickOutcome::Running => {}
                TickOutcome::Idle => break,
            }
            assert!(drip.state().position >= previous);
            previous = drip.state().position;
        }

        assert_eq!(completions, 1);
        assert!(!drip.is_active());
        assert_eq!(drip.state().position, 11.0);
        assert_eq!(leds[11], DROP_COLOR);
        assert_eq!(leds[10], TRAIL_1);
        assert_eq!(leds[9], TRAIL_2);

        for _ in 0..5 {
            assert_eq!(drip.tick(&mut leds), TickOutcome::Idle);
        }
    }

    #[test]
    fn test_new_cycle_after_completion() {
        let mut drip = animator(2);
        let mut leds = [BLACK; 2];
        drip.trigger();
        assert_eq!(drip.tick(&mut leds), TickOutcome::Running);
        assert_eq!(drip.tick(&mut leds), TickOutcome::Running);
        assert_eq!(drip.tick(&mut leds), TickOutcome::Completed);
        assert_eq!(leds, [TRAIL_1, DROP_COLOR]);

        assert!(drip.trigger());
        assert_eq!(drip.state().position, 0.0);
        assert_eq!(drip.tick(&mut leds), TickOutcome::Running);
        assert_eq!(leds, [DROP_COLOR, BLACK]);
    }

    #[test]
    fn test_every_frame_draws_drop_and_trail() {
        for len in [2, 3, 12, 18, 60] {
            let mut drip = animator(len);
            let mut leds = vec![BLACK; len];
            drip.trigger();

            let mut ticks = 0;
            while drip.is_active() {
                drip.tick(&mut leds);
                ticks += 1;
                assert!(ticks < 1000, "drip on {len} pixels never finished");

                let main = main_index(&drip);
                assert!(main < len);
                for (index, led) in leds.iter().enumerate() {
                    let expected = match main.checked_sub(index) {
                        Some(0) => DROP_COLOR,
                        Some(1) => TRAIL_1,
                        Some(2) => TRAIL_2,
                        _ => BLACK,
                    };
                    assert_eq!(*led, expected, "pixel {index} with drop at {main}");
                }
            }
        }
    }

    #[test]
    fn test_render_stays_within_strip() {
        let mut drip = animator(12);
        let mut leds = [TRAIL_2; 20];
        drip.trigger();
        while drip.is_active() {
            drip.tick(&mut leds);
        }
        assert!(leds[12..].iter().all(|led| *led == TRAIL_2));
    }

    #[test]
    fn test_trail_brightness_falloff() {
        let config = DripConfig::new(12).unwrap();
        assert_eq!(config.trail_brightness(1), Some(120));
        assert_eq!(config.trail_brightness(2), Some(90));
        assert_eq!(config.trail_brightness(4), Some(30));
        assert_eq!(config.trail_brightness(5), None);
        assert_eq!(config.trail_brightness(9), None);
        assert_eq!(trail_color(120), TRAIL_1);
        assert_eq!(trail_color(100), Rgb { r: 0, g: 33, b: 100 });
    }

    #[test]
    fn test_long_trail_skips_dark_pixels() {
        let config = DripConfig::new(12).unwrap().with_trail_length(7);
        let mut drip = DripAnimator::new(config);
        let mut leds = [BLACK; 12];
        drip.trigger();
        while drip.is_active() {
            drip.tick(&mut leds);
        }

        assert_eq!(leds[11], DROP_COLOR);
        assert_eq!(leds[7], trail_color(30));
        assert_eq!(leds[6], BLACK);
        assert_eq!(leds[5], BLACK);
        assert_eq!(leds[4], BLACK);
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(DripConfig::new(1), Err(DripConfigError::TooShort(1)));
        assert_eq!(DripConfig::new(301), Err(DripConfigError::TooLong(301, 300)));
        assert!(DripConfig::new(300).is_ok());

        let config = DripConfig::new(12).unwrap();
        assert_eq!(
            config.with_motion(0.0, 2.0),
            Err(DripConfigError::Velocity(0.0))
        );
        assert_eq!(
            config.with_motion(0.25, -1.0),
            Err(DripConfigError::Acceleration(-1.0))
        );
        assert!(config.with_motion(0.5, 0.0).is_ok());
        assert_eq!(
            DripConfigError::TooShort(1).to_string(),
            "strip needs at least 2 pixels, got 1"
        );
    }

    #[test]
    fn test_custom_motion_changes_speed() {
        let fast = DripConfig::new(12).unwrap().with_motion(1.0, 0.0).unwrap();
        let mut drip = DripAnimator::new(fast);
        let mut leds = [BLACK; 12];
        drip.trigger();

        let mut ticks = 0;
        while drip.tick(&mut leds) == TickOutcome::Running {
            ticks += 1;
        }
        assert_eq!(ticks, 10);
    }
}
