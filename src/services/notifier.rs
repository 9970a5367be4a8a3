// src/services/notifier.rs
//
// The poll loop: read the song file, forward changes to the display.

use log::{debug, info, trace, warn};
use std::future::Future;
use std::time::Duration;

use super::song_source::SongFile;
use crate::models::{DisplaySink, ReadOutcome};

pub struct ChangeNotifier<S> {
    source: SongFile,
    interval: Duration,
    sink: S,
    // Last non-empty text sent to the sink
    observed: Option<String>,
}

impl<S: DisplaySink> ChangeNotifier<S> {
    pub fn new(source: SongFile, interval: Duration, sink: S) -> Self {
        Self {
            source,
            interval,
            sink,
            observed: None,
        }
    }

    pub fn observed(&self) -> Option<&str> {
        self.observed.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// One cycle. Returns the new text when the sink was notified.
    pub fn poll_once(&mut self) -> Option<&str> {
        let song = match self.source.read() {
            ReadOutcome::Text(song) => song,
            ReadOutcome::Empty => {
                trace!("{} is empty", self.source.path().display());
                return None;
            }
            ReadOutcome::Missing => {
                debug!("File not found: {}", self.source.path().display());
                return None;
            }
            ReadOutcome::Failed(err) => {
                warn!("Failed to read {}: {}", self.source.path().display(), err);
                return None;
            }
        };

        if self.observed.as_deref() == Some(song.as_str()) {
            return None;
        }

        if let Err(err) = self.sink.update(&song) {
            warn!("Failed to send song update: {}", err);
        }
        info!("Song updated: {}", song);
        self.observed = Some(song);
        self.observed.as_deref()
    }

    /// Polls until `shutdown` resolves, then stops the sink and hands it back.
    pub async fn run<F>(mut self, shutdown: F) -> S
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            "Watching {} every {:?}",
            self.source.path().display(),
            self.interval
        );

        loop {
            self.poll_once();

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Shutting down");
        if let Err(err) = self.sink.stop() {
            warn!("Failed to stop display: {}", err);
        }
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FAST_POLL_INTERVAL;
    use crate::test_support::RecordingSink;
    use std::fs;
    use std::path::Path;
    use tokio::sync::oneshot;

    fn notifier_for(path: &Path) -> ChangeNotifier<RecordingSink> {
        ChangeNotifier::new(SongFile::new(path), FAST_POLL_INTERVAL, RecordingSink::default())
    }

    #[test]
    fn test_unchanged_content_notifies_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        fs::write(&path, "Song A").unwrap();
        let mut notifier = notifier_for(&path);

        assert_eq!(notifier.poll_once(), Some("Song A"));
        for _ in 0..5 {
            assert_eq!(notifier.poll_once(), None);
        }
        assert_eq!(notifier.sink().updates(), vec!["Song A"]);
    }

    #[test]
    fn test_sequence_forwards_only_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        let mut notifier = notifier_for(&path);

        for content in ["A", "A", "B", "B", "C"] {
            fs::write(&path, content).unwrap();
            notifier.poll_once();
        }

        assert_eq!(notifier.sink().updates(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_whitespace_changes_are_not_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        let mut notifier = notifier_for(&path);

        fs::write(&path, "Song A").unwrap();
        notifier.poll_once();
        fs::write(&path, "  Song A\n").unwrap();
        notifier.poll_once();

        assert_eq!(notifier.sink().updates(), vec!["Song A"]);
    }

    #[test]
    fn test_empty_content_is_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        let mut notifier = notifier_for(&path);

        fs::write(&path, "Song A").unwrap();
        notifier.poll_once();
        fs::write(&path, "   \n").unwrap();
        assert_eq!(notifier.poll_once(), None);

        assert_eq!(notifier.observed(), Some("Song A"));
        assert_eq!(notifier.sink().updates(), vec!["Song A"]);

        // Same song coming back after a blank is not a change
        fs::write(&path, "Song A").unwrap();
        assert_eq!(notifier.poll_once(), None);
    }

    #[test]
    fn test_missing_file_then_appears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        let mut notifier = notifier_for(&path);

        for _ in 0..4 {
            assert_eq!(notifier.poll_once(), None);
        }
        fs::write(&path, "X").unwrap();
        assert_eq!(notifier.poll_once(), Some("X"));

        assert_eq!(notifier.sink().updates(), vec!["X"]);
    }

    #[test]
    fn test_file_removed_keeps_last_song() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        let mut notifier = notifier_for(&path);

        fs::write(&path, "Song A").unwrap();
        notifier.poll_once();
        fs::remove_file(&path).unwrap();
        notifier.poll_once();
        fs::write(&path, "Song A").unwrap();
        notifier.poll_once();

        assert_eq!(notifier.sink().updates(), vec!["Song A"]);
    }

    #[test]
    fn test_sink_failure_does_not_stop_polling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        let sink = RecordingSink::failing();
        let mut notifier = ChangeNotifier::new(SongFile::new(&path), FAST_POLL_INTERVAL, sink);

        fs::write(&path, "A").unwrap();
        assert_eq!(notifier.poll_once(), Some("A"));
        fs::write(&path, "B").unwrap();
        assert_eq!(notifier.poll_once(), Some("B"));

        assert_eq!(notifier.sink().updates(), vec!["A", "B"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_until_shutdown_then_stops_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songConfig.txt");
        fs::write(&path, "A").unwrap();
        let notifier = notifier_for(&path);
        let (tx, rx) = oneshot::channel::<()>();

        let writer = async move {
            tokio::time::sleep(Duration::from_millis(250)).await;
            fs::write(&path, "B").unwrap();
            tokio::time::sleep(Duration::from_millis(250)).await;
            tx.send(()).unwrap();
        };
        let shutdown = async move {
            let _ = rx.await;
        };

        let (sink, ()) = tokio::join!(notifier.run(shutdown), writer);

        assert_eq!(sink.updates(), vec!["A", "B"]);
        assert_eq!(sink.stop_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_sink_even_without_updates() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = notifier_for(&dir.path().join("missing.txt"));

        let sink = notifier
            .run(tokio::time::sleep(Duration::from_secs(1)))
            .await;

        assert!(sink.updates().is_empty());
        assert_eq!(sink.stop_count(), 1);
    }
}
