use anyhow::{Result, anyhow};
use std::fmt;
use tracing::{Dispatch, Span, dispatcher};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Registry, fmt as tfmt, layer::SubscriberExt, reload};

pub struct LogConfig {
    pub filter: String,
}

/// Owns the subscriber for the whole process.
///
/// Nothing is installed as the global default: components get a [`Logger`]
/// handed to them and every event is dispatched through it.
pub struct Logging {
    dispatch: Dispatch,
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logging {
    pub fn new_bootstrap() -> Self {
        Self::build("info", std::io::stdout, true)
    }

    /// Plain-text subscriber writing to `writer`, mostly for capturing output in tests.
    pub fn with_writer<W>(filter: &str, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::build(filter, writer, false)
    }

    fn build<W>(filter: &str, writer: W, ansi: bool) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::new(filter);
        let (filter, reload_handle) = reload::Layer::new(filter);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(tfmt::layer().with_ansi(ansi).with_writer(writer));

        Self {
            dispatch: Dispatch::new(subscriber),
            reload_handle,
        }
    }

    pub fn reload_from_config(&self, config: &LogConfig) -> Result<()> {
        let filter = EnvFilter::try_new(&config.filter).map_err(|e| anyhow!(e))?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }

    pub fn logger(&self, component: &'static str) -> Logger {
        Logger::new(self.dispatch.clone(), component)
    }
}

/// Handle passed into each component. Events emitted through it carry the
/// component span and go to the dispatcher it was created from.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    span: Span,
}

impl Logger {
    fn new(dispatch: Dispatch, component: &'static str) -> Self {
        let span = dispatcher::with_default(&dispatch, || {
            tracing::info_span!("component", component = %component)
        });
        Self { dispatch, span }
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
            span: Span::none(),
        }
    }

    pub fn child(&self, component: &'static str) -> Self {
        Self::new(self.dispatch.clone(), component)
    }

    pub fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, || self.span.in_scope(f))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("span", &self.span).finish()
    }
}

/// Emit a `tracing` event through an injected [`Logger`].
///
/// `log_event!(self.logger, warn, id = %id, "article not found")`
#[macro_export]
macro_rules! log_event {
    ($logger:expr, $level:ident, $($arg:tt)+) => {
        $logger.scoped(|| ::tracing::$level!($($arg)+))
    };
}
