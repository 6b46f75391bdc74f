//! In-process media library
//!
//! Stands in for the device gallery: permission is a switch and picker
//! results are queued ahead of time.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use findr_core::{ImagePickerOptions, MediaLibrary, RepoResult};

#[derive(Default)]
struct MediaState {
    /// Next picker outcomes; `None` is a cancelled picker
    picks: VecDeque<Option<String>>,
    last_options: Option<ImagePickerOptions>,
}

/// Media library whose picker returns pre-queued results
#[derive(Clone)]
pub struct MemoryMediaLibrary {
    granted: Arc<AtomicBool>,
    picker_launches: Arc<AtomicUsize>,
    state: Arc<Mutex<MediaState>>,
}

impl MemoryMediaLibrary {
    pub fn new(granted: bool) -> Self {
        Self {
            granted: Arc::new(AtomicBool::new(granted)),
            picker_launches: Arc::new(AtomicUsize::new(0)),
            state: Arc::new(Mutex::new(MediaState::default())),
        }
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }

    /// Queue the URI the picker returns next
    pub fn queue_pick(&self, uri: impl Into<String>) {
        self.state.lock().picks.push_back(Some(uri.into()));
    }

    /// Queue a cancelled picker
    pub fn queue_cancel(&self) {
        self.state.lock().picks.push_back(None);
    }

    pub fn picker_launches(&self) -> usize {
        self.picker_launches.load(Ordering::SeqCst)
    }

    /// Options passed on the most recent picker launch
    pub fn last_options(&self) -> Option<ImagePickerOptions> {
        self.state.lock().last_options.clone()
    }
}

impl Default for MemoryMediaLibrary {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl MediaLibrary for MemoryMediaLibrary {
    async fn request_permission(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    #[instrument(skip(self))]
    async fn pick_image(&self, options: &ImagePickerOptions) -> RepoResult<Option<String>> {
        self.picker_launches.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        state.last_options = Some(options.clone());
        // An empty queue behaves like the user backing out
        let pick = state.picks.pop_front().flatten();
        debug!(picked = pick.is_some(), "Image picker closed");
        Ok(pick)
    }
}
