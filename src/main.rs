use anyhow::Context;
use clap::Parser;
use drip_light::PixelSink;
use drip_light::config::{Cli, Command, Driver, RelayArgs, RunArgs};
use drip_light::relay::Relay;
use drip_light::runtime::{self, RuntimeConfig};
use drip_light::sink::{MemorySink, TerminalSink, Ws2812Spi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(&args).await,
        Command::Relay(args) => relay(&args).await,
    }
}

async fn run(args: &RunArgs) -> anyhow::Result<()> {
    let config = args.runtime_config().context("invalid drip parameters")?;
    match args.driver {
        Driver::Spi => {
            let sink = Ws2812Spi::open(&args.spi_device, args.leds, args.spi_speed_hz)
                .with_context(|| format!("unable to open {}", args.spi_device.display()))?;
            serve(&config, sink).await;
        }
        Driver::Terminal => serve(&config, TerminalSink::stdout(args.leds)).await,
        Driver::Headless => serve(&config, MemorySink::headless(args.leds)).await,
    }
    Ok(())
}

async fn serve<S: PixelSink>(config: &RuntimeConfig, sink: S) {
    runtime::run(config, sink, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("unable to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    })
    .await;
}

async fn relay(args: &RelayArgs) -> anyhow::Result<()> {
    let relay = Relay::bind(args.listen, args.pulse())
        .await
        .with_context(|| format!("unable to listen on {}", args.listen))?;
    tokio::select! {
        result = relay.run() => result.context("relay stopped")?,
        result = tokio::signal::ctrl_c() => {
            result.context("unable to listen for Ctrl-C")?;
            log::info!("shutting down");
        }
    }
    Ok(())
}
