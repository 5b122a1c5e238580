// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording dialog host.

use sound_settings_core::{DialogPort, DialogRequest};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct DialogsInner {
    shown: Vec<DialogRequest>,
    open: Option<DialogRequest>,
    dismissals: usize,
}

/// [`DialogPort`] that records presented and dismissed dialogs.
#[derive(Clone, Default)]
pub struct RecordingDialogs {
    inner: Arc<Mutex<DialogsInner>>,
}

impl RecordingDialogs {
    /// Create a host with no dialogs shown.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DialogsInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every dialog presented, oldest first.
    pub fn shown(&self) -> Vec<DialogRequest> {
        self.lock().shown.clone()
    }

    /// Dialog currently open, if any.
    pub fn open(&self) -> Option<DialogRequest> {
        self.lock().open.clone()
    }

    /// Mark the open dialog closed, as a host does once the user answers.
    pub fn close(&self) {
        self.lock().open = None;
    }

    /// Number of `dismiss` calls made by the screen.
    pub fn dismissals(&self) -> usize {
        self.lock().dismissals
    }
}

impl DialogPort for RecordingDialogs {
    fn show(&self, request: &DialogRequest) {
        let mut inner = self.lock();
        inner.shown.push(request.clone());
        inner.open = Some(request.clone());
    }

    fn dismiss(&self) {
        let mut inner = self.lock();
        inner.open = None;
        inner.dismissals += 1;
    }
}
