use std::time::Duration;

use tokio::sync::mpsc;

/// Quiescence window applied to search box input before a query fires.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Coalesces a stream of text-change events into one trigger per burst.
///
/// Every observed value replaces the pending one and restarts the window;
/// once the window passes with no new input, the last value is forwarded to
/// the trigger channel. Dropping the handle tears the worker down and
/// discards any pending value, so no stray query fires after teardown.
pub struct QueryDebouncer {
    input_tx: mpsc::UnboundedSender<String>,
}

impl QueryDebouncer {
    /// Spawn the debounce worker. Must be called from within a Tokio runtime.
    /// Returns the input handle and the receiver the coalesced triggers land
    /// on, in burst order.
    pub fn spawn(window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
        let (trigger_tx, trigger_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            while let Some(first) = input_rx.recv().await {
                let mut pending = first;
                loop {
                    match tokio::time::timeout(window, input_rx.recv()).await {
                        // Newer input inside the window replaces the pending
                        // value and restarts the clock.
                        Ok(Some(next)) => pending = next,
                        // Input side closed mid-window: teardown. The pending
                        // value must not fire.
                        Ok(None) => {
                            tracing::debug!(
                                target: "limone",
                                event = "debounce_discard_on_teardown"
                            );
                            return;
                        }
                        // Quiet for a full window: forward the last value.
                        Err(_) => break,
                    }
                }
                if trigger_tx.send(pending).is_err() {
                    return;
                }
            }
        });

        (Self { input_tx }, trigger_rx)
    }

    /// Feed one text-change event into the worker.
    pub fn observe(&self, text: impl Into<String>) {
        if self.input_tx.send(text.into()).is_err() {
            tracing::warn!(target: "limone", event = "debounce_worker_gone");
        }
    }
}
