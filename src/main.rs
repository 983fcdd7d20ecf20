use news_service::api;
use news_service::logger::*;
use news_service::server::*;
use news_service::settings::*;
use std::fs;
use std::sync::Arc;
use tokio::signal;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging = Logging::new_bootstrap();
    let logger = logging.logger("main");

    let project_settings = parse_settings(cli.settings.as_deref())?;
    log_event!(logger, info, ?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logging.reload_from_config(&logger_config)?;

    let address: std::net::SocketAddr = project_settings.http.address.parse()?;

    let server = Arc::new(Server::try_new(&project_settings, &logging).await?);

    let routes = api::routes(server.clone()).recover(api::recover_error);

    let shutdown = {
        let server = server.clone();
        let logger = logger.clone();
        async move {
            shutdown_signal(logger).await;
            server.cancel_requests();
        }
    };

    match &project_settings.http.tls {
        Some(tls) => {
            if !fs::metadata(&tls.cert_path)?.is_file() {
                return Err(anyhow::anyhow!(
                    "TLS cert is not a regular file: {:?}",
                    tls.cert_path
                ));
            }
            if !fs::metadata(&tls.key_path)?.is_file() {
                return Err(anyhow::anyhow!(
                    "TLS key is not a regular file: {:?}",
                    tls.key_path
                ));
            }

            let (bound, serving) = warp::serve(routes)
                .tls()
                .cert_path(&tls.cert_path)
                .key_path(&tls.key_path)
                .bind_with_graceful_shutdown(address, shutdown);
            log_event!(logger, info, addr = %bound, "HTTPS server listening");
            serving.await;
        }
        None => {
            let (bound, serving) = warp::serve(routes)
                .try_bind_with_graceful_shutdown(address, shutdown)?;
            log_event!(logger, info, addr = %bound, "HTTP server listening");
            serving.await;
        }
    }

    let shutdown_timeout = std::time::Duration::from_secs(10);
    match tokio::time::timeout(shutdown_timeout, server.shutdown()).await {
        Ok(_) => log_event!(logger, info, "server shutdown successfully"),
        Err(_) => log_event!(logger, error, "server shutdown timed out"),
    }

    Ok(())
}

async fn shutdown_signal(logger: Logger) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log_event!(logger, error, error = %e, "could not listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log_event!(logger, error, error = %e, "could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log_event!(logger, info, "shutting down server");
}
