use std::io::{Write, stdout};
use std::path::Path;

use tracing::debug;

use crate::error::{GameError, Result};
use crate::frontend::{Audio, Clip, Track};

/// Fails on the first sound file missing from `dir`.
pub fn verify_assets(dir: &Path) -> Result<()> {
    let names = Track::ALL
        .iter()
        .map(|t| t.file_name())
        .chain(Clip::ALL.iter().map(|c| c.file_name()));
    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(GameError::MissingAsset { path });
        }
    }
    Ok(())
}

/// Sound for a terminal: one-shot clips ring the bell, the music loop is only
/// tracked.
pub struct TermAudio {
    bell: bool,
    looping: Option<Track>,
}

impl TermAudio {
    pub fn new(assets: Option<&Path>, bell: bool) -> Result<Self> {
        if let Some(dir) = assets {
            verify_assets(dir)?;
        }
        Ok(TermAudio { bell, looping: None })
    }

    pub fn looping(&self) -> Option<Track> {
        self.looping
    }
}

impl Audio for TermAudio {
    fn play_loop(&mut self, track: Track) {
        debug!(?track, "music on");
        self.looping = Some(track);
    }

    fn stop_loop(&mut self) {
        if let Some(track) = self.looping.take() {
            debug!(?track, "music off");
        }
    }

    fn play_once(&mut self, clip: Clip) {
        debug!(?clip, "sound");
        if self.bell {
            let mut out = stdout();
            let _ = out.write_all(b"\x07").and_then(|_| out.flush());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_asset_is_reported_with_its_path() {
        let dir = std::env::temp_dir().join(format!("snake-assets-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(Track::Background.file_name()), b"").unwrap();

        match TermAudio::new(Some(&dir), false) {
            Err(GameError::MissingAsset { path }) => {
                assert!(path.ends_with(Clip::Food.file_name()))
            }
            other => panic!("expected a missing asset, got {:?}", other.err()),
        }

        for clip in Clip::ALL.iter() {
            fs::write(dir.join(clip.file_name()), b"").unwrap();
        }
        assert!(TermAudio::new(Some(&dir), false).is_ok());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn loop_state_follows_calls() {
        let mut audio = TermAudio::new(None, false).unwrap();
        audio.play_loop(Track::Background);
        assert_eq!(audio.looping(), Some(Track::Background));
        audio.stop_loop();
        assert_eq!(audio.looping(), None);
    }
}
