use crate::config::SoundOutput;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, StreamError};
use std::f32::consts::TAU;
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;
use tracing::warn;

/// Moments in a game that deserve a sound
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    Start,
    /// The snake ate safe food
    Success,
    /// The snake ate hazardous food
    Error,
    GameOver,
}

impl Cue {
    /// Number of times to ring the terminal bell for this cue
    fn rings(self) -> usize {
        match self {
            Cue::Start | Cue::Success => 1,
            Cue::Error => 2,
            Cue::GameOver => 3,
        }
    }

    fn notes(self) -> &'static [Note] {
        match self {
            Cue::Start => START_TUNE,
            Cue::Success => SUCCESS_TUNE,
            Cue::Error => ERROR_TUNE,
            Cue::GameOver => GAME_OVER_TUNE,
        }
    }

    /// Return a synthesized tune for this cue
    pub(crate) fn melody(self) -> Melody {
        Melody::new(self.notes())
    }
}

/// Something that can play sounds.  Playing is fire-and-forget; errors are
/// reported so that the caller can log them, but must not stop the game.
pub(crate) trait Sounds {
    fn play(&mut self, cue: Cue) -> io::Result<()>;
}

impl<S: Sounds + ?Sized> Sounds for Box<S> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        (**self).play(cue)
    }
}

/// Open the sound output selected in the configuration.  If the default
/// audio device can't be opened, the terminal bell is used instead.
pub(crate) fn open(output: SoundOutput) -> Box<dyn Sounds> {
    match output {
        SoundOutput::Speaker => match Speaker::new() {
            Ok(speaker) => Box::new(speaker),
            Err(e) => {
                warn!(error = %e, "Failed to open audio device; using terminal bell");
                Box::new(Bell::new(io::stdout()))
            }
        },
        SoundOutput::Bell => Box::new(Bell::new(io::stdout())),
        SoundOutput::Off => Box::new(Silent),
    }
}

/// Plays synthesized tunes on the default audio device
pub(crate) struct Speaker {
    // Dropping the stream stops all sound.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Speaker {
    pub(crate) fn new() -> Result<Speaker, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Speaker {
            _stream: stream,
            handle,
        })
    }
}

impl fmt::Debug for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speaker").finish_non_exhaustive()
    }
}

impl Sounds for Speaker {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        let sink = Sink::try_new(&self.handle).map_err(io::Error::other)?;
        sink.append(cue.melody());
        sink.detach();
        Ok(())
    }
}

/// Plays sounds by ringing the terminal bell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Bell<W> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub(crate) fn new(out: W) -> Bell<W> {
        Bell { out }
    }
}

impl<W: Write> Sounds for Bell<W> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        self.out.write_all("\x07".repeat(cue.rings()).as_bytes())?;
        self.out.flush()
    }
}

/// Plays nothing
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Silent;

impl Sounds for Silent {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}

const START_TUNE: &[Note] = &[
    Note::sine(523.25, 80),
    Note::sine(659.25, 80),
    Note::sine(783.99, 140),
];

const SUCCESS_TUNE: &[Note] = &[Note::sine(880.0, 50), Note::sine(1318.51, 90)];

const ERROR_TUNE: &[Note] = &[Note::square(233.08, 100), Note::square(196.0, 180)];

const GAME_OVER_TUNE: &[Note] = &[
    Note::square(392.0, 150),
    Note::square(329.63, 150),
    Note::square(261.63, 150),
    Note::sine(130.81, 450),
];

const SAMPLE_RATE: u32 = 48_000;

/// Seconds per sample at [`SAMPLE_RATE`]
const SAMPLE_PERIOD: f32 = 1.0 / 48_000.0;

/// Length of the fade in and out at either end of each note, in samples
const FADE_FRAMES: u16 = 480;

const VOLUME: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Wave {
    Sine,
    Square,
}

impl Wave {
    /// Amplitude at `phase`, a fraction of one cycle
    fn sample(self, phase: f32) -> f32 {
        match self {
            Wave::Sine => (phase * TAU).sin(),
            // Square waves are much louder than sines at the same amplitude.
            Wave::Square if phase < 0.5 => 0.5,
            Wave::Square => -0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Note {
    /// Pitch in hertz
    freq: f32,

    /// Length in milliseconds
    millis: u32,

    wave: Wave,
}

impl Note {
    const fn sine(freq: f32, millis: u32) -> Note {
        Note {
            freq,
            millis,
            wave: Wave::Sine,
        }
    }

    const fn square(freq: f32, millis: u32) -> Note {
        Note {
            freq,
            millis,
            wave: Wave::Square,
        }
    }

    /// Length in samples
    fn frames(self) -> u32 {
        self.millis.saturating_mul(SAMPLE_RATE / 1000)
    }
}

/// Volume multiplier for a sample `n` samples away from the nearest end of
/// a note
fn fade(n: u32) -> f32 {
    u16::try_from(n).map_or(1.0, |n| {
        (f32::from(n) / f32::from(FADE_FRAMES)).min(1.0)
    })
}

/// A mono audio source that plays a sequence of notes once
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Melody {
    notes: &'static [Note],
    index: usize,

    /// Samples played so far of the current note
    frame: u32,

    /// Position within the current cycle of the current note
    phase: f32,
}

impl Melody {
    fn new(notes: &'static [Note]) -> Melody {
        Melody {
            notes,
            index: 0,
            frame: 0,
            phase: 0.0,
        }
    }
}

impl Iterator for Melody {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        while let Some(&note) = self.notes.get(self.index) {
            let len = note.frames();
            if self.frame >= len {
                self.index += 1;
                self.frame = 0;
                self.phase = 0.0;
                continue;
            }
            let remaining = len - self.frame - 1;
            let sample =
                note.wave.sample(self.phase) * fade(self.frame) * fade(remaining) * VOLUME;
            self.phase = note.freq.mul_add(SAMPLE_PERIOD, self.phase).fract();
            self.frame += 1;
            return Some(sample);
        }
        None
    }
}

impl Source for Melody {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        let millis = self.notes.iter().map(|n| u64::from(n.millis)).sum();
        Some(Duration::from_millis(millis))
    }
}
