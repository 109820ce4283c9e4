mod tests {
    use std::time::Duration;

    use clap::Parser;
    use drip_light::color::{BLACK, Rgb, trail_color};
    use drip_light::config::{Cli, Command, Driver, RunArgs};
    use drip_light::{DripAnimator, DripConfigError, IdleBehavior};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("drip-light").chain(args.iter().copied()))
    }

    fn run_args(args: &[&str]) -> RunArgs {
        let Command::Run(args) = parse(args).unwrap().command else {
            panic!("expected run");
        };
        args
    }

    #[test]
    fn test_run_defaults() {
        let Command::Run(args) = parse(&["run"]).unwrap().command else {
            panic!("expected run");
        };
        assert_eq!(args.url, "ws://localhost:3000");
        assert_eq!(args.leds, 12);
        assert_eq!(args.driver, Driver::Spi);
        assert_eq!(args.idle, IdleBehavior::Hold);

        let config = args.runtime_config().unwrap();
        assert_eq!(config.tick.as_millis(), 50);
        assert_eq!(config.renderer.drip.len(), 12);
        assert_eq!(config.renderer.drip.trail_length(), 2);
        assert_eq!(config.backoff.min, Duration::from_millis(250));
    }

    #[test]
    fn test_run_overrides() {
        let cli = parse(&[
            "run",
            "--leds",
            "18",
            "--driver",
            "terminal",
            "--idle",
            "clear",
            "--url",
            "ws://10.0.0.2:3000",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.driver, Driver::Terminal);

        let config = args.runtime_config().unwrap();
        assert_eq!(config.url, "ws://10.0.0.2:3000");
        assert_eq!(config.renderer.drip.len(), 18);
        assert_eq!(config.renderer.idle, IdleBehavior::Clear);
    }

    #[test]
    fn test_invalid_strip_is_rejected() {
        let Command::Run(args) = parse(&["run", "--leds", "1"]).unwrap().command else {
            panic!("expected run");
        };
        assert_eq!(args.runtime_config().unwrap_err(), DripConfigError::TooShort(1));

        let Command::Run(args) = parse(&["run", "--velocity-base", "0"]).unwrap().command else {
            panic!("expected run");
        };
        assert_eq!(args.runtime_config().unwrap_err(), DripConfigError::Velocity(0.0));
    }

    #[test]
    fn test_zero_periods_are_rejected() {
        assert!(parse(&["run", "--tick-ms", "0"]).is_err());
        assert!(parse(&["run", "--backoff-min-ms", "0"]).is_err());
        assert!(parse(&["run", "--backoff-max-ms", "0"]).is_err());
        assert!(parse(&["relay", "--pulse-ms", "0"]).is_err());
    }

    #[test]
    fn test_custom_trail_and_color() {
        let args = run_args(&[
            "run",
            "--leds",
            "12",
            "--trail-brightness",
            "200",
            "--trail-falloff",
            "100",
            "--drop-color",
            "255, 0, 0",
        ]);
        let red = Rgb { r: 255, g: 0, b: 0 };
        assert_eq!(args.drop_color, red);

        let mut animator = DripAnimator::new(args.drip_config().unwrap());
        let mut leds = [BLACK; 12];
        animator.trigger();
        while animator.state().position < 3.0 {
            animator.tick(&mut leds);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let main = animator.state().position as usize;
        assert_eq!(leds[main], red);
        assert_eq!(leds[main - 1], trail_color(100));
        // 200 - 2 * 100 reaches zero, so the second trail pixel stays off.
        assert_eq!(leds[main - 2], BLACK);
    }

    #[test]
    fn test_default_trail_and_color() {
        let args = run_args(&["run"]);
        let config = args.drip_config().unwrap();
        assert_eq!(config.len(), 12);
        assert!(!config.is_empty());
        assert_eq!(config.trail_brightness(1), Some(120));
        assert_eq!(config.trail_brightness(2), Some(90));
        assert_eq!(args.drop_color, drip_light::color::DROP_COLOR);
    }

    #[test]
    fn test_bad_colors_are_rejected() {
        assert!(parse(&["run", "--drop-color", "0,150"]).is_err());
        assert!(parse(&["run", "--drop-color", "0,150,256"]).is_err());
        assert!(parse(&["run", "--drop-color", "blue"]).is_err());
    }

    #[test]
    fn test_relay_defaults() {
        let Command::Relay(args) = parse(&["relay"]).unwrap().command else {
            panic!("expected relay");
        };
        assert_eq!(args.listen.port(), 3000);
        assert_eq!(args.pulse(), Duration::from_secs(1));
    }
}
