//! Background playback of a collection.

use tokio::task::JoinHandle;
use xmaslights_core::{Animation, Error, Result};

use crate::{Collection, PlaybackHandle, PlaybackState, PlaybackSummary, UnitsRender};

type PlaybackTask<R> = JoinHandle<(Collection<R>, Result<PlaybackSummary>)>;

/// Plays animations of a single collection in a background task.
///
/// To prevent data races the playback task takes the collection entirely, making it
/// impossible to modify the units while an animation is being played. The collection comes
/// back once the task is stopped or finished.
#[derive(Debug)]
pub struct Player<R> {
    collection: Option<Collection<R>>,
    task: Option<PlaybackTask<R>>,
    handle: PlaybackHandle,
}

impl<R> Player<R>
where
    R: UnitsRender + Send + 'static,
{
    /// Creates a new player for the given collection.
    pub fn new(collection: Collection<R>) -> Self {
        Self {
            handle: collection.handle(),
            collection: Some(collection),
            task: None,
        }
    }

    /// Returns a handle to control the playback from other tasks.
    pub fn handle(&self) -> PlaybackHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> PlaybackState {
        self.handle.state()
    }

    /// Returns true if there is a playback task which is still running.
    pub fn is_playing(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Returns the collection, unless it is borrowed by a playback task.
    pub fn collection(&self) -> Option<&Collection<R>> {
        self.collection.as_ref()
    }

    /// Returns the mutable collection, unless it is borrowed by a playback task.
    pub fn collection_mut(&mut self) -> Option<&mut Collection<R>> {
        self.collection.as_mut()
    }

    /// Starts playing the animation in a new task.
    ///
    /// A running playback is left untouched and [`Error::AlreadyPlaying`] is returned. The
    /// collection of a finished task is taken back first.
    pub async fn play(&mut self, animation: Animation, looping: bool) -> Result<()> {
        if self.is_playing() {
            return Err(Error::AlreadyPlaying);
        }
        if let Err(err) = self.wait().await {
            log::warn!("Previous animation ended with an error: {err}");
        }

        let Some(mut collection) = self.collection.take() else {
            return Err(Error::AlreadyPlaying);
        };
        let pacer = match collection.start(&animation, looping) {
            Ok(pacer) => pacer,
            Err(err) => {
                self.collection = Some(collection);
                return Err(err);
            }
        };

        log::info!("Starting a new playback task of {} frames", animation.len());
        self.task = Some(tokio::spawn(async move {
            let summary = collection.run(animation, pacer).await;
            (collection, summary)
        }));
        Ok(())
    }

    pub fn request_pause(&self) {
        self.handle.request_pause();
    }

    pub fn request_resume(&self) {
        self.handle.request_resume();
    }

    /// Asks the playback task to stop without waiting for it, see [`Self::stop`].
    pub fn request_stop(&self) {
        self.handle.request_stop();
    }

    /// Stops the playback task at the next frame boundary and takes the collection back.
    ///
    /// Returns `None` if there was nothing to stop.
    pub async fn stop(&mut self) -> Result<Option<PlaybackSummary>> {
        if self.task.is_none() {
            return Ok(None);
        }

        log::info!("Stopping a playback task");
        self.handle.request_stop();
        self.wait().await
    }

    /// Waits until the playback task finishes on its own and takes the collection back.
    ///
    /// Returns `None` if there was no playback task.
    pub async fn wait(&mut self) -> Result<Option<PlaybackSummary>> {
        let Some(task) = self.task.take() else {
            return Ok(None);
        };

        let (collection, summary) = task.await.expect("Unable to finish a playback task");
        self.collection = Some(collection);
        summary.map(Some)
    }
}

impl<R> Drop for Player<R> {
    fn drop(&mut self) {
        // A detached task would keep looping forever, so let it stop and tear down on its own.
        if self.task.is_some() {
            log::debug!("Player dropped, stopping the playback task");
            self.handle.request_stop();
        }
    }
}
