/// Install the tracing subscriber for the process.
///
/// Filter comes from `LIMONE_LOG` (same syntax as `RUST_LOG`); sqlx noise is
/// capped at warn by default. Events go to stderr so command output on stdout
/// stays machine-readable. Safe to call more than once; later calls are
/// no-ops.
pub fn init() {
    let _ = tracing_log::LogTracer::init();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LIMONE_LOG").unwrap_or_else(|_| "limone=info,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init();
}
