// Timing helper for network-bound work.

use std::future::Future;
use std::time::Instant;

use tracing::info;

/// Await `fut` and log how long it took under `label`.
pub async fn measure<F: Future>(label: &str, fut: F) -> F::Output {
    let start = Instant::now();
    let output = fut.await;
    info!(
        label,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "[PERF]"
    );
    output
}
