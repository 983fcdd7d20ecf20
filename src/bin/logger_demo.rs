use news_service::logger::*;

fn main() -> anyhow::Result<()> {
    let logging = Logging::new_bootstrap();
    let logger = logging.logger("demo");
    log_event!(logger, trace, "bootstrap trace log");
    log_event!(logger, debug, "bootstrap debug log");
    log_event!(logger, info, "bootstrap info log");

    let config = LogConfig {
        filter: "debug".to_string(),
    };
    logging.reload_from_config(&config)?;
    log_event!(logger, trace, "application trace log");
    log_event!(logger, debug, "application debug log");
    log_event!(logger.child("demo_child"), info, answer = 42, "application info log");

    Ok(())
}
