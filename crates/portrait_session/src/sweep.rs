use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::selection::SharedSession;

/// Samples along the sweep ellipse.
pub const SWEEP_SAMPLES: usize = 50;

/// The closed sweep path through the classification diagram: an ellipse
/// crossing every region, det = 0.25 + 0.5 cos θ, trace = 2 sin θ.
///
/// θ spans [0, 2π] inclusive, so the final sample repeats the first and the
/// loop closes visually. Points are (det, trace) pairs.
pub fn sweep_path(samples: usize) -> Vec<[f64; 2]> {
    let step = if samples > 1 {
        TAU / (samples - 1) as f64
    } else {
        0.0
    };
    (0..samples)
        .map(|k| {
            let theta = step * k as f64;
            [0.25 + 0.5 * theta.cos(), 2.0 * theta.sin()]
        })
        .collect()
}

/// Drives the selection around the sweep ellipse on a worker thread.
///
/// Each tick applies the next path point through the shared session entry
/// point, then sleeps whatever remains of the tick interval (a soft
/// throttle). Stopping is cooperative: the worker checks a flag once per
/// iteration, so cancellation latency is at most one tick. The path index
/// survives stop/start, resuming the sweep where it left off.
pub struct AutoSweep {
    session: SharedSession,
    tick: Duration,
    running: Arc<AtomicBool>,
    index: Arc<AtomicUsize>,
    worker: Option<JoinHandle<()>>,
}

impl AutoSweep {
    pub fn new(session: SharedSession, tick: Duration) -> Self {
        Self {
            session,
            tick,
            running: Arc::new(AtomicBool::new(false)),
            index: Arc::new(AtomicUsize::new(0)),
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Next position along the sweep path.
    pub fn index(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Spawns the worker; a no-op if it is already running.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let index = Arc::clone(&self.index);
        let session = Arc::clone(&self.session);
        let tick = self.tick;
        let path = sweep_path(SWEEP_SAMPLES);

        self.worker = Some(thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                let started = Instant::now();

                let at = index.load(Ordering::SeqCst);
                let [det, trace] = path[at];
                index.store((at + 1) % path.len(), Ordering::SeqCst);

                match session.lock() {
                    Ok(mut state) => {
                        // A rejected tick keeps the previous portrait; the
                        // sweep just moves on to the next point.
                        let _ = state.apply_selection(trace, det);
                    }
                    // Poisoned session: another writer panicked, stop
                    // sweeping.
                    Err(_) => break,
                }

                if let Some(remaining) = tick.checked_sub(started.elapsed()) {
                    thread::sleep(remaining);
                }
            }
        }));
    }

    /// Requests cancellation and joins the worker.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    pub fn toggle(&mut self) {
        if self.worker.is_some() {
            self.stop();
        } else {
            self.start();
        }
    }
}

impl Drop for AutoSweep {
    fn drop(&mut self) {
        self.stop();
    }
}
