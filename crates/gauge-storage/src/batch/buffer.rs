//! Write-buffer coordinator: a dedicated thread multiplexing record
//! arrival, a periodic flush tick, and a stop signal.
//!
//! Producers interact only through the bounded data channel, so the
//! staging buffer needs no lock. Backpressure exists solely at enqueue
//! time. Nothing cancels an in-flight flush: a stop request is observed
//! at the next `select!` after the current flush returns.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver, SendTimeoutError, Sender};
use gauge_core::config::BufferConfig;
use gauge_core::errors::{BufferError, StorageError};
use gauge_core::traits::StorageSink;
use gauge_core::Measurement;
use tracing::{info, warn};

/// How long `add_datapoint` waits on a full channel before giving up.
const ENQUEUE_TIMEOUT: Duration = Duration::from_secs(1);

/// Counters reported when the coordinator exits.
#[derive(Debug, Default, Clone)]
pub struct FlushStats {
    pub flushes: usize,
    pub failed_flushes: usize,
    pub rows_written: usize,
}

/// Owns the staging buffer and the flush policy. Only the coordinator
/// thread touches it.
struct BufferCoordinator<S: StorageSink> {
    buf: Vec<Measurement>,
    sink: S,
    max_size: usize,
    stats: FlushStats,
}

impl<S: StorageSink> BufferCoordinator<S> {
    fn new(sink: S, max_size: usize) -> Self {
        Self {
            buf: Vec::with_capacity(max_size),
            sink,
            max_size,
            stats: FlushStats::default(),
        }
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    /// Append one record, flushing first if the buffer is full.
    ///
    /// Only a fatal flush error propagates. Anything else leaves the
    /// records in place to be retried with the next cycle, so the buffer
    /// can run past `max_size` under persistent failure. There is no
    /// retention ceiling and no dead-letter path.
    fn on_record(&mut self, m: Measurement) -> Result<(), StorageError> {
        if self.buf.len() >= self.max_size {
            self.flush_lossy()?;
        }
        self.buf.push(m);
        Ok(())
    }

    /// Flush, absorbing non-fatal errors.
    fn flush_lossy(&mut self) -> Result<(), StorageError> {
        match self.flush() {
            Err(e) if !e.is_fatal() => {
                self.stats.failed_flushes += 1;
                warn!(
                    error = %e,
                    pending = self.buf.len(),
                    "flush failed; records retained for next cycle"
                );
                Ok(())
            }
            other => other,
        }
    }

    /// Hand the buffer to the sink; clear it only on success. An empty
    /// buffer never reaches the storage layer.
    fn flush(&mut self) -> Result<(), StorageError> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.sink.write(&self.buf)?;
        self.stats.flushes += 1;
        self.stats.rows_written += self.buf.len();
        self.buf.clear();
        Ok(())
    }

    fn into_stats(self) -> FlushStats {
        self.stats
    }
}

/// Handle to the coordinator thread.
///
/// `add_datapoint` is safe under concurrent producers; `shutdown`
/// consumes the handle, so it can be issued at most once.
pub struct WriteBuffer {
    data_tx: Sender<Measurement>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<Result<FlushStats, StorageError>>>,
}

impl WriteBuffer {
    /// Spawn the coordinator thread over `sink`. The data channel is
    /// bounded to `max_buffered`, which is where backpressure originates.
    pub fn spawn<S: StorageSink + 'static>(sink: S, config: &BufferConfig) -> Self {
        let max_size = config.effective_max_buffered();
        let interval = config.effective_flush_interval();
        let (data_tx, data_rx) = bounded(max_size);
        let (stop_tx, stop_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("gauge-write-buffer".to_string())
            .spawn(move || run_loop(BufferCoordinator::new(sink, max_size), data_rx, stop_rx, interval))
            .expect("failed to spawn write buffer thread");

        Self {
            data_tx,
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Enqueue one pre-validated record, waiting up to one second under
    /// backpressure before failing with `BackpressureTimeout`.
    pub fn add_datapoint(&self, m: Measurement) -> Result<(), BufferError> {
        match self.data_tx.send_timeout(m, ENQUEUE_TIMEOUT) {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(_)) => Err(BufferError::BackpressureTimeout),
            Err(SendTimeoutError::Disconnected(_)) => Err(BufferError::Disconnected),
        }
    }

    /// Two-phase shutdown: lodge the stop signal (capacity-1 channel, so
    /// this never blocks), then join. The coordinator stops accepting,
    /// drains records already queued, performs one final flush, and its
    /// stats, or the error that killed it, come back here.
    pub fn shutdown(mut self) -> Result<FlushStats, StorageError> {
        let _ = self.stop_tx.try_send(());
        self.join()
    }

    fn join(&mut self) -> Result<FlushStats, StorageError> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| StorageError::Sqlite {
                message: "write buffer thread panicked".to_string(),
            })?,
            None => Ok(FlushStats::default()),
        }
    }
}

impl Drop for WriteBuffer {
    fn drop(&mut self) {
        // Best-effort stop if `shutdown` was never called.
        let _ = self.stop_tx.try_send(());
    }
}

fn run_loop<S: StorageSink>(
    mut coord: BufferCoordinator<S>,
    data_rx: Receiver<Measurement>,
    stop_rx: Receiver<()>,
    interval: Duration,
) -> Result<FlushStats, StorageError> {
    info!(
        max_size = coord.max_size,
        interval_secs = interval.as_secs(),
        "write buffer coordinator started"
    );
    let ticker = tick(interval);
    loop {
        // No priority among simultaneously ready sources; `select!`
        // picks one arbitrarily.
        select! {
            recv(data_rx) -> msg => match msg {
                Ok(m) => coord.on_record(m)?,
                // All producers dropped: same exit path as a stop signal.
                Err(_) => break,
            },
            recv(ticker) -> _ => coord.flush_lossy()?,
            recv(stop_rx) -> _ => break,
        }
    }
    // Stop accepting, drain what already arrived, one final flush.
    while let Ok(m) = data_rx.try_recv() {
        coord.on_record(m)?;
    }
    coord.flush()?;
    let stats = coord.into_stats();
    info!(
        flushes = stats.flushes,
        failed_flushes = stats.failed_flushes,
        rows = stats.rows_written,
        "write buffer coordinator stopped"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn sample(value: f64) -> Measurement {
        Measurement::new(Uuid::new_v4(), value, Utc::now())
    }

    /// Sink that records batch sizes and optionally fails the first
    /// `fail_times` calls.
    #[derive(Default)]
    struct CountingSink {
        batches: Vec<usize>,
        fail_times: usize,
    }

    impl StorageSink for CountingSink {
        fn write(&mut self, batch: &[Measurement]) -> Result<(), StorageError> {
            if self.fail_times > 0 {
                self.fail_times -= 1;
                return Err(StorageError::Execute {
                    message: "injected".to_string(),
                });
            }
            self.batches.push(batch.len());
            Ok(())
        }
    }

    #[test]
    fn buffer_length_tracks_enqueues_under_limit() {
        let mut coord = BufferCoordinator::new(CountingSink::default(), 10);
        for i in 0..10 {
            coord.on_record(sample(i as f64)).unwrap();
            assert_eq!(coord.len(), i + 1);
        }
        assert!(coord.sink.batches.is_empty(), "no flush below the limit");
    }

    #[test]
    fn overflow_flushes_once_and_keeps_the_overflowing_record() {
        let mut coord = BufferCoordinator::new(CountingSink::default(), 10);
        for i in 0..=10 {
            coord.on_record(sample(i as f64)).unwrap();
        }
        assert_eq!(coord.sink.batches, vec![10]);
        assert_eq!(coord.len(), 1);
    }

    #[test]
    fn empty_flush_never_reaches_the_sink() {
        let mut coord = BufferCoordinator::new(CountingSink::default(), 4);
        coord.flush().unwrap();
        coord.flush_lossy().unwrap();
        assert!(coord.sink.batches.is_empty());
    }

    #[test]
    fn failed_flush_retains_records_for_the_next_cycle() {
        let sink = CountingSink {
            batches: Vec::new(),
            fail_times: 1,
        };
        let mut coord = BufferCoordinator::new(sink, 2);
        for i in 0..3 {
            // The third append triggers a flush that fails; the buffer
            // keeps all records and exceeds max_size.
            coord.on_record(sample(i as f64)).unwrap();
        }
        assert_eq!(coord.len(), 3);
        assert_eq!(coord.stats.failed_flushes, 1);
        // The fourth append retries the whole backlog.
        coord.on_record(sample(3.0)).unwrap();
        assert_eq!(coord.sink.batches, vec![3]);
        assert_eq!(coord.len(), 1);
    }

    #[test]
    fn enqueue_times_out_on_full_unconsumed_channel() {
        let (data_tx, _data_rx) = bounded(1);
        let (stop_tx, _stop_rx) = bounded(1);
        let wb = WriteBuffer {
            data_tx,
            stop_tx,
            handle: None,
        };
        wb.add_datapoint(sample(0.0)).unwrap();

        let start = Instant::now();
        let err = wb.add_datapoint(sample(1.0)).unwrap_err();
        let waited = start.elapsed();
        assert_eq!(err, BufferError::BackpressureTimeout);
        assert!(
            waited >= Duration::from_millis(900),
            "returned after {waited:?}, before the configured wait"
        );
    }
}
