//! Plays the cue clips through the default audio output.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use anyhow::Context as _;
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::cues::{CuePurpose, CueStore};

type CueSource = Buffered<Decoder<BufReader<File>>>;

/// Something able to sound the cue clips.
///
/// The session loop only talks to this trait, so it can run against a muted
/// or fake implementation just as well as against a real output device.
pub trait Cues {
    /// Start the clip and hand back control over it.
    fn play(&self, purpose: CuePurpose) -> CueHandle;

    /// Fire-and-forget variant: the clip keeps sounding until it ends on
    /// its own.
    fn cue(&self, purpose: CuePurpose) {
        let _ = self.play(purpose);
    }
}

/// Control over one started clip.
pub struct CueHandle {
    sink: Option<Sink>,
}

impl CueHandle {
    /// A handle that controls nothing. Used when no clip could be started.
    pub fn silent() -> CueHandle {
        CueHandle { sink: None }
    }

    pub fn stop(&self) {
        if let Some(sink) = &self.sink {
            sink.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        match &self.sink {
            Some(sink) => !sink.empty(),
            None => false,
        }
    }
}

impl Drop for CueHandle {
    // Dropping a Sink cuts its clip short; handing it off lets the clip
    // finish on its own.
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.detach();
        }
    }
}

/// Sounds nothing. Stands in for the bank on muted runs and whenever the
/// audio setup failed.
pub struct Muted;

impl Cues for Muted {
    fn play(&self, _purpose: CuePurpose) -> CueHandle {
        CueHandle::silent()
    }
}

/// All five clips decoded and ready to play.
pub struct CueBank {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sources: HashMap<CuePurpose, CueSource>,
}

impl CueBank {
    /// Open the default output device and decode every clip in `store`.
    pub fn load(store: &CueStore) -> anyhow::Result<CueBank> {
        let (stream, handle) =
            OutputStream::try_default().context("unable to open an audio output device")?;
        let sources = decode_cues(store)?;
        Ok(CueBank {
            _stream: stream,
            handle,
            sources,
        })
    }
}

impl Cues for CueBank {
    fn play(&self, purpose: CuePurpose) -> CueHandle {
        let source = match self.sources.get(&purpose) {
            Some(source) => source.clone(),
            None => return CueHandle::silent(),
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                CueHandle { sink: Some(sink) }
            }
            Err(_) => CueHandle::silent(),
        }
    }
}

/// Read and decode every clip of `store`.
pub fn decode_cues(store: &CueStore) -> anyhow::Result<HashMap<CuePurpose, CueSource>> {
    let mut sources = HashMap::new();
    for purpose in CuePurpose::all() {
        let path = store.local_path(purpose);
        let file = File::open(&path).with_context(|| {
            format!(
                "unable to open the {} clip at {} (run `fetch` first)",
                purpose.name(),
                path.display()
            )
        })?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("unable to decode the {} clip", purpose.name()))?;
        sources.insert(purpose, source.buffered());
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture_clip(path: &std::path::Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..16 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn a_silent_handle_reports_nothing_playing() {
        let handle = CueHandle::silent();

        assert!(!handle.is_playing());
        handle.stop();
    }

    #[test]
    fn all_stocked_clips_decode() {
        let dir = tempfile::tempdir().unwrap();
        let store = CueStore::new(Some(dir.path().to_path_buf()));
        for purpose in CuePurpose::all() {
            write_fixture_clip(&store.local_path(purpose));
        }

        let sources = decode_cues(&store).unwrap();

        assert_eq!(sources.len(), CuePurpose::all().len());
    }

    #[test]
    fn a_missing_clip_names_itself_in_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CueStore::new(Some(dir.path().to_path_buf()));
        for purpose in CuePurpose::all() {
            if purpose != CuePurpose::Running {
                write_fixture_clip(&store.local_path(purpose));
            }
        }

        let err = decode_cues(&store).err().unwrap();

        assert!(format!("{err:#}").contains("running"));
    }
}
