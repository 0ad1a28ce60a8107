use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use sensor_fleet_monitor::config::MonitorConfig;
use sensor_fleet_monitor::view::render;
use sensor_fleet_monitor::{HttpGateway, ReadingForm, SensorGateway, SyncController, SyncOutcome};

const HELP: &str = "Commands: refresh | add <vibration> <temperature> <torque> <current> <noise> | show | quit";

async fn show<G: SensorGateway>(controller: &SyncController<G>) {
    for line in render(&controller.snapshot().await) {
        info!("{}", line);
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Run one operator command, returning false when the operator wants to quit
async fn handle_command<G: SensorGateway>(controller: &SyncController<G>, line: &str) -> bool {
    let mut words = line.split_whitespace();
    match words.next() {
        None => {}
        Some("r") | Some("refresh") => {
            if controller.refresh().await != SyncOutcome::Skipped {
                show(controller).await;
            }
        }
        Some("add") => {
            let mut form = ReadingForm::from_values(words);
            match controller.submit(&mut form).await {
                Ok(SyncOutcome::Completed) => {
                    info!("Sensor data submitted successfully.");
                    show(controller).await;
                }
                Ok(SyncOutcome::Failed) => show(controller).await,
                Ok(SyncOutcome::Skipped) => {}
                Err(e) => warn!("Invalid input: {}", e),
            }
        }
        Some("show") => show(controller).await,
        Some("q") | Some("quit") => return false,
        Some(other) => {
            warn!("Unknown command '{}'", other);
            info!("{}", HELP);
        }
    }
    true
}

async fn main_loop(config: MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting sensor fleet monitor");

    let controller = SyncController::new(HttpGateway::new(config.endpoint.clone()));

    // Initial load
    controller.refresh().await;
    show(&controller).await;
    info!("{}", HELP);

    let mut ticker = config.refresh_interval.map(|period| {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                if controller.refresh().await == SyncOutcome::Completed {
                    show(&controller).await;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if !handle_command(&controller, &line).await {
                            return Ok(());
                        }
                    }
                    None => {
                        info!("Operator input closed, continuing with automatic refresh only");
                        stdin_open = false;
                        if ticker.is_none() {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match MonitorConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            // keep the sender alive so shutdown is not signalled
            std::future::pending::<()>().await;
        }
        let _ = tx.send(());
    });

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(config) => {
            match result {
                Ok(_) => info!("Program completed successfully"),
                Err(e) => error!("Fatal error: {}", e),
            }
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
