use super::voices::ToneBank;
use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use crossbeam_channel::{Receiver, Sender, bounded};
use fretwise_core::playback::{AudioOutput, ToneRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// State shared with the audio callback
struct StreamShared {
    bank: Arc<Mutex<ToneBank>>,
    /// Frames rendered since the stream started; the stream clock
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

/// Handle to the output stream.
///
/// `cpal::Stream` is not `Send` on every platform, so the stream lives on
/// its own thread until the handle is dropped.
pub struct AudioPlayerHandle {
    bank: Arc<Mutex<ToneBank>>,
    frames: Arc<AtomicU64>,
    sample_rate: f32,
    shutdown_tx: Sender<()>,
    _thread: JoinHandle<()>,
}

impl AudioPlayerHandle {
    pub fn new() -> Result<Self> {
        let (ready_tx, ready_rx) = bounded::<Result<StreamShared, String>>(1);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        let thread = thread::spawn(move || match open_stream() {
            Ok((stream, shared)) => {
                if ready_tx.send(Ok(shared)).is_err() {
                    return;
                }
                park_until_shutdown(stream, shutdown_rx);
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
            }
        });

        let shared = ready_rx
            .recv()
            .map_err(|e| anyhow!("Audio thread exited early: {}", e))?
            .map_err(|e| anyhow!(e))?;

        log::info!("Audio output ready at {} Hz", shared.sample_rate);

        Ok(Self {
            bank: shared.bank,
            frames: shared.frames,
            sample_rate: shared.sample_rate,
            shutdown_tx,
            _thread: thread,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn with_bank<F: FnOnce(&mut ToneBank, f64)>(&self, f: F) -> Result<()> {
        let now = self.now();
        let mut bank = self
            .bank
            .lock()
            .map_err(|e| anyhow!("Failed to lock tone bank: {}", e))?;
        f(&mut bank, now);
        Ok(())
    }
}

impl AudioOutput for AudioPlayerHandle {
    fn now(&self) -> f64 {
        self.frames.load(Ordering::Relaxed) as f64 / self.sample_rate as f64
    }

    fn schedule_tone(&self, frequency: f64, duration: f64, start_offset: f64) -> Result<()> {
        self.with_bank(|bank, now| {
            bank.prune(now);
            bank.schedule_tone(frequency, now + start_offset.max(0.0), duration);
        })
    }

    fn schedule_tones(&self, tones: &[ToneRequest]) -> Result<()> {
        self.with_bank(|bank, now| {
            bank.prune(now);
            bank.schedule_tones(now, tones);
        })
    }

    fn click(&self, accent: bool) -> Result<()> {
        self.with_bank(|bank, now| bank.click(now, accent))
    }

    fn stop_all(&self) -> Result<()> {
        self.with_bank(|bank, now| bank.stop_all(now))
    }
}

impl Drop for AudioPlayerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

fn park_until_shutdown(stream: Stream, shutdown_rx: Receiver<()>) {
    // Either a shutdown message or a dropped handle ends the stream
    let _ = shutdown_rx.recv();
    if let Err(e) = stream.pause() {
        log::debug!("Failed to pause stream on shutdown: {}", e);
    }
}

fn open_stream() -> Result<(Stream, StreamShared)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;
    let config = device.default_output_config()?;

    let sample_format = config.sample_format();
    let config: StreamConfig = config.into();
    let sample_rate = config.sample_rate.0 as f32;

    let shared = StreamShared {
        bank: Arc::new(Mutex::new(ToneBank::new(sample_rate))),
        frames: Arc::new(AtomicU64::new(0)),
        sample_rate,
    };

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, &shared)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, &shared)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, &shared)?,
        _ => return Err(anyhow!("Unsupported sample format: {:?}", sample_format)),
    };
    stream
        .play()
        .map_err(|e| anyhow!("Failed to play stream: {}", e))?;

    Ok((stream, shared))
}

fn build_stream<T>(device: &cpal::Device, config: &StreamConfig, shared: &StreamShared) -> Result<Stream>
where
    T: Sample + SizedSample + Send + 'static + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    let sample_rate = shared.sample_rate as f64;
    let bank = shared.bank.clone();
    let frames = shared.frames.clone();
    let mut mono: Vec<f32> = Vec::new();

    let err_fn = |err| log::error!("an error occurred on the output audio stream: {:?}", err);

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let frame_count = data.len() / channels;
                let start_frame = frames.load(Ordering::Relaxed);
                mono.resize(frame_count, 0.0);

                match bank.lock() {
                    Ok(mut bank) => bank.render(start_frame as f64 / sample_rate, &mut mono),
                    Err(_) => mono.iter_mut().for_each(|s| *s = 0.0),
                }

                for (frame, value) in data.chunks_mut(channels).zip(mono.iter()) {
                    let value: T = cpal::Sample::from_sample(*value);
                    for sample in frame.iter_mut() {
                        *sample = value;
                    }
                }
                frames.fetch_add(frame_count as u64, Ordering::Relaxed);
            },
            err_fn,
            None,
        )
        .map_err(|e| anyhow!("Failed to build output stream: {}", e))?;

    Ok(stream)
}

/// Output used when no audio device is available.
///
/// Keeps a wall clock so transport timing still works; tones are only logged.
pub struct SilentOutput {
    started: Instant,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SilentOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for SilentOutput {
    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn schedule_tone(&self, frequency: f64, duration: f64, start_offset: f64) -> Result<()> {
        log::debug!(
            "silent tone {:.2} Hz for {:.3}s at +{:.3}s",
            frequency,
            duration,
            start_offset
        );
        Ok(())
    }

    fn click(&self, accent: bool) -> Result<()> {
        log::debug!("silent click (accent: {})", accent);
        Ok(())
    }

    fn stop_all(&self) -> Result<()> {
        Ok(())
    }
}

/// Open the default device, falling back to silence when none is available
pub fn open_output() -> Arc<dyn AudioOutput> {
    match AudioPlayerHandle::new() {
        Ok(handle) => Arc::new(handle),
        Err(e) => {
            log::warn!("Audio unavailable, continuing without sound: {}", e);
            Arc::new(SilentOutput::new())
        }
    }
}
