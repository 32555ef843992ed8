//! Logging for tests. Call [`init_test_setup`] at the top of a test; the
//! subscriber is installed once per test binary.
//!
//! Filtering follows `RUST_LOG` when set, otherwise `taxforge=debug`.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

const DEFAULT_TEST_FILTER: &str = "taxforge=debug";

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        // another harness may have installed a global subscriber already
        if subscriber.try_init().is_err() {
            eprintln!("test logging: global subscriber already set");
        }
        debug!("test logging ready");
    });
}
