//! Background-thread displacement generation.
//!
//! One long-lived worker owns the synthesizer and its scratch state; the
//! consumer thread posts "generate for time T" requests into a single-slot
//! mailbox and polls for finished images. Handoff is a mutex-guarded buffer
//! swap, so the consumer never observes a partially written image and never
//! blocks on an FFT pass.

use glam::{Vec2, Vec3};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::error::ConfigError;
use crate::params::{wind_speed_from_max_wave_height, OceanGeneratorConfig};
use crate::synthesizer::SpectralFieldSynthesizer;

/// Single-slot request mailbox: the latest request wins and duplicates of
/// the previous request are dropped.
///
/// Deliberately not a queue. Queueing historical times would reintroduce the
/// latency the single slot exists to avoid; the worker always computes the
/// newest requested time.
#[derive(Debug, Default)]
pub(crate) struct RequestSlot {
    pending: Option<f64>,
    last_requested: Option<f64>,
}

impl RequestSlot {
    /// Store a request, overwriting any unconsumed one. Returns false
    /// without storing when `time` matches the previous request, i.e. the
    /// simulation clock has not advanced.
    pub fn post(&mut self, time: f64) -> bool {
        if self.last_requested == Some(time) {
            return false;
        }
        self.last_requested = Some(time);
        self.pending = Some(time);
        true
    }

    pub fn take(&mut self) -> Option<f64> {
        self.pending.take()
    }
}

struct Shared {
    slot: RequestSlot,
    /// Wind change applied by the worker before its next cycle
    wind_change: Option<Vec2>,
    /// Buffer the worker most recently completed
    result: Vec<Vec3>,
    result_ready: bool,
    terminate: bool,
    /// Completed generation cycles
    cycles: u64,
}

/// Asynchronous ocean displacement generator.
///
/// All methods are called from the consumer thread; the worker thread is an
/// implementation detail joined on drop.
pub struct AsyncDisplacementGenerator {
    shared: Arc<(Mutex<Shared>, Condvar)>,
    worker: Option<thread::JoinHandle<()>>,

    /// Front buffer owned exclusively by the consumer thread
    current: Vec<Vec3>,

    resolution: usize,
    world_size_m: f32,
    gravity: f32,
    wind_heading: Vec2,
}

impl AsyncDisplacementGenerator {
    pub fn new(config: OceanGeneratorConfig) -> Result<Self, ConfigError> {
        // Built on the caller's thread so configuration errors surface here
        let synthesizer = SpectralFieldSynthesizer::new(config.clone())?;

        let size = config.resolution * config.resolution;
        let shared = Arc::new((
            Mutex::new(Shared {
                slot: RequestSlot::default(),
                wind_change: None,
                result: vec![Vec3::ZERO; size],
                result_ready: false,
                terminate: false,
                cycles: 0,
            }),
            Condvar::new(),
        ));

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("wave-displacement".into())
            .spawn(move || worker_loop(synthesizer, worker_shared))?;

        Ok(Self {
            shared,
            worker: Some(worker),
            current: vec![Vec3::ZERO; size],
            resolution: config.resolution,
            world_size_m: config.world_size_m,
            gravity: config.gravity,
            wind_heading: config.wind_velocity.normalize_or(Vec2::X),
        })
    }

    /// Request generation of the wave state at `time_s`.
    ///
    /// Returns false (and wakes nothing) when `time_s` equals the previous
    /// request, so a paused simulation clock costs no recomputation.
    pub fn request_generate(&self, time_s: f64) -> bool {
        let (lock, cvar) = &*self.shared;
        let posted = lock.lock().unwrap().slot.post(time_s);
        if posted {
            cvar.notify_one();
        }
        posted
    }

    /// Swap a finished image into the current slot if one is ready.
    ///
    /// Returns false when no new result is available; the previous image
    /// stays valid, so a slow cycle shows a stale-but-complete frame.
    pub fn try_swap_if_ready(&mut self) -> bool {
        let (lock, _) = &*self.shared;
        let mut state = lock.lock().unwrap();
        if !state.result_ready {
            return false;
        }
        std::mem::swap(&mut self.current, &mut state.result);
        state.result_ready = false;
        true
    }

    /// Update the wind; the worker rebuilds the initial spectrum before its
    /// next generation cycle rather than blocking this thread.
    pub fn set_wind_velocity(&mut self, wind_velocity: Vec2) {
        self.wind_heading = wind_velocity.normalize_or(self.wind_heading);
        let (lock, _) = &*self.shared;
        lock.lock().unwrap().wind_change = Some(wind_velocity);
    }

    /// Change wind speed along the current heading.
    pub fn set_wind_speed(&mut self, wind_speed: f32) {
        let heading = self.wind_heading;
        self.set_wind_velocity(heading * wind_speed);
    }

    /// Drive the wind from a target maximum wave height in meters.
    pub fn set_max_wave_height(&mut self, height_m: f32) {
        self.set_wind_speed(wind_speed_from_max_wave_height(height_m, self.gravity));
    }

    /// The most recently swapped-in displacement image: `resolution^2`
    /// pixels of `(horizontal-x, horizontal-z, vertical)` meters, row-major.
    pub fn current_image(&self) -> &[Vec3] {
        &self.current
    }

    /// Raw byte view of the current image, laid out for verbatim upload
    /// into an RGB32F texture.
    pub fn image_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.current)
    }

    /// World-space size in meters of the periodic tile the image covers.
    pub fn texture_world_size(&self) -> f32 {
        self.world_size_m
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of generation cycles the worker has completed.
    pub fn completed_cycles(&self) -> u64 {
        let (lock, _) = &*self.shared;
        lock.lock().unwrap().cycles
    }
}

impl Drop for AsyncDisplacementGenerator {
    fn drop(&mut self) {
        let (lock, cvar) = &*self.shared;
        {
            let mut state = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            state.terminate = true;
        }
        cvar.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(
    mut synthesizer: SpectralFieldSynthesizer,
    shared: Arc<(Mutex<Shared>, Condvar)>,
) {
    let (lock, cvar) = &*shared;
    let resolution = synthesizer.resolution();
    let mut back = vec![Vec3::ZERO; resolution * resolution];

    info!(resolution, "displacement worker started");

    loop {
        // Block until a request or termination arrives. Taking the wind
        // change under the same lock keeps parameter updates atomic
        // relative to the handoff.
        let (time_s, wind_change) = {
            let mut state = lock.lock().unwrap();
            loop {
                if state.terminate {
                    return;
                }
                if let Some(time_s) = state.slot.take() {
                    break (time_s, state.wind_change.take());
                }
                state = cvar.wait(state).unwrap();
            }
        };

        if let Some(wind) = wind_change {
            debug!(?wind, "rebuilding initial spectrum for new wind");
            synthesizer.set_wind_velocity(wind);
        }

        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            synthesizer.generate(time_s as f32, &mut back)
        }));
        if outcome.is_err() {
            // Leave the consumer on its last good frame instead of
            // propagating into the render loop
            error!("displacement generation panicked; worker stopping");
            return;
        }
        debug!(
            time_s,
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "generated displacement field"
        );

        let mut state = lock.lock().unwrap();
        std::mem::swap(&mut state.result, &mut back);
        state.result_ready = true;
        state.cycles += 1;
    }
}
