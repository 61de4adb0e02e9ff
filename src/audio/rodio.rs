//! Rodio-backed audio handle
//!
//! Lazily opens the default output device on the first play call so that a
//! machine without audio degrades to the player's fallback ladder instead
//! of failing startup. The track loops while the card is open.

use crate::audio::AudioBackend;
use crate::{Result, SmittenError};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

pub struct RodioBackend {
    track: PathBuf,
    looped: bool,
    volume: f32,
    muted: bool,
    // The OutputStream must stay alive for the sink to keep producing sound
    stream: Option<(OutputStream, Sink)>,
}

impl RodioBackend {
    pub fn new(track: PathBuf, looped: bool) -> Self {
        Self {
            track,
            looped,
            volume: 1.0,
            muted: false,
            stream: None,
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    fn open(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SmittenError::AudioError(format!("no output device: {}", e)))?;
        let sink = Sink::try_new(&handle)
            .map_err(|e| SmittenError::AudioError(format!("sink creation failed: {}", e)))?;
        let file = File::open(&self.track).map_err(|e| {
            SmittenError::AudioError(format!("cannot open {}: {}", self.track.display(), e))
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| {
            SmittenError::AudioError(format!("cannot decode {}: {}", self.track.display(), e))
        })?;
        sink.pause();
        sink.set_volume(self.effective_volume());
        if self.looped {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }
        self.stream = Some((stream, sink));
        Ok(())
    }
}

impl AudioBackend for RodioBackend {
    fn play(&mut self) -> Result<()> {
        self.open()?;
        if let Some((_, sink)) = &self.stream {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some((_, sink)) = &self.stream {
            sink.pause();
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some((_, sink)) = &self.stream {
            sink.set_volume(self.effective_volume());
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some((_, sink)) = &self.stream {
            sink.set_volume(self.effective_volume());
        }
    }

    fn is_paused(&self) -> bool {
        match &self.stream {
            Some((_, sink)) => sink.is_paused(),
            None => true,
        }
    }
}
