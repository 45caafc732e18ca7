use super::EngineError;
use lofty::{file::AudioFile, probe::Probe};
use rodio::{
    ChannelCount, Decoder, OutputStream, OutputStreamBuilder, Sink, Source,
    decoder::builder::SeekMode,
};
use std::{
    fs::File,
    io::BufReader,
    num::NonZero,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

/// A rodio sink plus the stream that keeps it alive.
///
/// Sources are appended paused; nothing is audible until [`play`]
/// is called.
///
/// [`play`]: RodioBackend::play
pub(crate) struct RodioBackend {
    sink: Sink,
    source_ended: Arc<AtomicBool>,
    _stream: OutputStream,
}

impl RodioBackend {
    pub fn new() -> Result<Self, EngineError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();

        Ok(Self {
            sink,
            source_ended: Arc::new(AtomicBool::new(false)),
            _stream: stream,
        })
    }

    /// Replace the current source. Returns the track length when either
    /// the decoder or the file's tags know it.
    pub fn load(&mut self, path: &Path) -> Result<Option<Duration>, EngineError> {
        let source = decode(path)?;
        let duration = source.total_duration().or_else(|| probe_duration(path));

        self.source_ended.store(false, Ordering::SeqCst);
        let watched = EndWatch::new(source, Arc::clone(&self.source_ended));

        self.sink.clear();
        self.sink.pause();
        self.sink.append(watched);

        Ok(duration)
    }

    pub fn play(&mut self) {
        self.sink.play();
    }

    pub fn pause(&mut self) {
        self.sink.pause();
    }

    pub fn seek(&mut self, pos: Duration) -> Result<(), EngineError> {
        self.sink
            .try_seek(pos)
            .map_err(|e| EngineError::Seek(e.to_string()))
    }

    pub fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    pub fn is_empty(&self) -> bool {
        self.sink.empty()
    }

    /// The appended source ran out, as opposed to being cleared.
    pub fn source_ended(&self) -> bool {
        self.source_ended.load(Ordering::SeqCst) && self.sink.empty()
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, EngineError> {
    let open_err = |source| EngineError::Open {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let len = file.metadata().map_err(open_err)?.len();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(len)
        .with_seek_mode(SeekMode::Fastest)
        .with_seekable(true);

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = ext.to_lowercase();
        let hint = match ext.as_str() {
            "adif" | "adts" => "aac",
            "m4a" | "m4b" | "mp4" => "audio/mp4",
            "oga" | "opus" => "audio/ogg",
            "wave" => "wav",
            other => other,
        };
        builder = builder.with_hint(hint);
    }

    builder.build().map_err(|e| decode_err(path, e))
}

fn decode_err(path: &Path, e: impl std::fmt::Display) -> EngineError {
    EngineError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn probe_duration(path: &Path) -> Option<Duration> {
    Probe::open(path)
        .and_then(|p| p.read())
        .ok()
        .map(|file| file.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Passes samples through untouched and raises a flag once the inner
/// source is exhausted.
struct EndWatch<I> {
    input: I,
    ended: Arc<AtomicBool>,
}

impl<I> EndWatch<I> {
    fn new(input: I, ended: Arc<AtomicBool>) -> Self {
        EndWatch { input, ended }
    }
}

impl<I> Iterator for EndWatch<I>
where
    I: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.input.next();
        if sample.is_none() {
            self.ended.store(true, Ordering::SeqCst);
        }
        sample
    }
}

impl<I> Source for EndWatch<I>
where
    I: Source<Item = f32>,
{
    fn channels(&self) -> ChannelCount {
        self.input.channels()
    }

    fn sample_rate(&self) -> NonZero<u32> {
        self.input.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.input.total_duration()
    }

    fn current_span_len(&self) -> Option<usize> {
        self.input.current_span_len()
    }

    fn bits_per_sample(&self) -> Option<rodio::BitDepth> {
        self.input.bits_per_sample()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.input.try_seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_open_error() {
        let err = decode(Path::new("/definitely/not/here.mp3")).unwrap_err();
        assert!(matches!(err, EngineError::Open { .. }));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let err = decode(&path).unwrap_err();
        assert!(matches!(err, EngineError::Decode { .. }));
        assert_eq!(probe_duration(&path), None);
    }
}
