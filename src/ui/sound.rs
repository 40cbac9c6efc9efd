/// Sound engine: procedural 8-bit style cues via rodio.
///
/// Buffers are generated once at init. Playback is fire-and-forget.
///
/// Build without the "sound" feature to get a silent stub instead.

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::TAU;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_caught: Arc<Vec<u8>>,
        sfx_start: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_caught: Arc::new(make_wav(&gen_caught())),
                sfx_start: Arc::new(make_wav(&gen_start())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }

        pub fn play_caught(&self) { self.play(&self.sfx_caught); }
        pub fn play_start(&self) { self.play(&self.sfx_start); }
    }

    /// One note: sine plus a little octave, linear decay to `1 - decay`.
    fn note(freq: f32, duration: f32, decay: f32, volume: f32, out: &mut Vec<f32>) {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32) * decay;
            let wave = (t * freq * TAU).sin() * 0.8 + (t * freq * 2.0 * TAU).sin() * 0.2;
            out.push(wave * env * volume);
        }
    }

    /// Caught: falling "wah-wah" ending in a long low tone.
    fn gen_caught() -> Vec<f32> {
        let mut samples = Vec::new();
        for &freq in &[392.0_f32, 370.0, 349.0] { // G4, F#4, F4
            note(freq, 0.18, 0.4, 0.3, &mut samples);
        }
        note(330.0, 0.5, 1.0, 0.3, &mut samples); // E4, fades out
        samples
    }

    /// New game: two quick rising blips.
    fn gen_start() -> Vec<f32> {
        let mut samples = Vec::new();
        note(660.0, 0.05, 1.0, 0.25, &mut samples);
        note(990.0, 0.07, 1.0, 0.25, &mut samples);
        samples
    }

    /// Mono 16-bit PCM WAV.
    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let data_size = samples.len() as u32 * 2;
        let mut buf = Vec::with_capacity(44 + data_size as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&1u16.to_le_bytes()); // mono
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
        buf.extend_from_slice(&2u16.to_le_bytes()); // block align
        buf.extend_from_slice(&16u16.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }
        buf
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_caught(&self) {}
    pub fn play_start(&self) {}
}
