//! The fixed set of cue clips and their on-disk store.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;

lazy_static! {
    /// Per-user clip directory, e.g. `~/.local/share/interval-timer/audio`.
    static ref DEFAULT_AUDIO_DIR: PathBuf = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("interval-timer")
        .join("audio");
}

/// The transition sounds of a session, each backed by one pre-recorded clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CuePurpose {
    /// Tick for the last seconds of every countdown.
    Beep,
    /// Begin of a repetition.
    Ignition,
    /// Keeps sounding while a repetition is worked.
    Running,
    /// End of a repetition.
    End,
    /// Final ending signal after the whole session.
    Finish,
}

impl CuePurpose {
    /// Every purpose, in a stable order.
    pub fn all() -> [CuePurpose; 5] {
        [
            CuePurpose::Beep,
            CuePurpose::Ignition,
            CuePurpose::Running,
            CuePurpose::End,
            CuePurpose::Finish,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            CuePurpose::Beep => "beep",
            CuePurpose::Ignition => "ignition",
            CuePurpose::Running => "running",
            CuePurpose::End => "end",
            CuePurpose::Finish => "finish",
        }
    }

    /// Download source of the clip. The local filename is derived from the
    /// URL, so this table is the single place a clip is named.
    pub fn url(self) -> &'static str {
        match self {
            CuePurpose::Beep => "http://tastyspleen.net/~quake2/baseq2/sound/world/clock.wav",
            CuePurpose::Ignition => "http://billor.chsh.chc.edu.tw/sound/rocket.wav",
            CuePurpose::Running => "https://www.soundjay.com/human/heartbeat-04.wav",
            CuePurpose::End => {
                "https://www.wavsource.com/snds_2020-06-10_7014036401687385/sfx/boxing_bell.wav"
            }
            CuePurpose::Finish => {
                "https://www.wavsource.com/snds_2020-06-10_7014036401687385/sfx/applause2_x.wav"
            }
        }
    }
}

/// The portion of a download URL after the last slash.
pub fn filename_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// What [`CueStore::ensure`] had to do for a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded,
    AlreadyPresent,
}

/// On-disk location of the cue clips.
pub struct CueStore {
    audio_dir: PathBuf,
}

impl CueStore {
    pub fn new(audio_dir: Option<PathBuf>) -> CueStore {
        CueStore {
            audio_dir: audio_dir.unwrap_or_else(|| DEFAULT_AUDIO_DIR.clone()),
        }
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    pub fn local_path(&self, purpose: CuePurpose) -> PathBuf {
        self.audio_dir.join(filename_from_url(purpose.url()))
    }

    /// Make sure the clip for `purpose` exists locally, downloading it when
    /// missing. An already present clip is left untouched unless `overwrite`
    /// is set.
    pub fn ensure(&self, purpose: CuePurpose, overwrite: bool) -> anyhow::Result<FetchOutcome> {
        let dest = self.local_path(purpose);
        if dest.exists() && !overwrite {
            return Ok(FetchOutcome::AlreadyPresent);
        }

        fs::create_dir_all(&self.audio_dir).with_context(|| {
            format!(
                "unable to create audio directory {}",
                self.audio_dir.display()
            )
        })?;
        download_to(purpose.url(), &dest)
            .with_context(|| format!("unable to download the {} clip", purpose.name()))?;
        Ok(FetchOutcome::Downloaded)
    }

    /// Make sure every clip exists locally.
    pub fn ensure_all(&self, overwrite: bool) -> anyhow::Result<()> {
        for purpose in CuePurpose::all() {
            self.ensure(purpose, overwrite)?;
        }
        Ok(())
    }
}

fn http_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(30))
        .build()
}

/// Stream `url` into `dest` with a progress bar, going through a `.part`
/// file so an interrupted download never leaves a half-written clip behind.
fn download_to(url: &str, dest: &Path) -> anyhow::Result<()> {
    let resp = http_agent()
        .get(url)
        .call()
        .with_context(|| format!("request to {url} failed"))?;

    let pb = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("  {msg} [{bar:30}] {bytes}/{total_bytes} {bytes_per_sec}")
    {
        pb.set_style(style);
    }
    pb.set_message(filename_from_url(url).to_owned());
    if let Some(len) = resp
        .header("content-length")
        .and_then(|v| v.parse::<u64>().ok())
    {
        pb.set_length(len);
    }

    let tmp = dest.with_extension("part");
    let mut file = fs::File::create(&tmp)
        .with_context(|| format!("unable to create {}", tmp.display()))?;
    let mut reader = resp.into_reader();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf).context("download read error")?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .with_context(|| format!("unable to write {}", tmp.display()))?;
        pb.inc(n as u64);
    }
    pb.finish();

    fs::rename(&tmp, dest)
        .with_context(|| format!("unable to move the download into {}", dest.display()))?;
    Ok(())
}
