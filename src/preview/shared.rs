//! State and fields shared between the previewer and its fetch adapters

use super::error::{PreviewError, Result};
use super::types::{IconHandle, LoadOutcome, PreviewFields, PreviewState};
use super::ui_context::UiContext;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Observable preview state plus display fields
///
/// Every writer refuses to run off the owning UI context, so the mutex is
/// never contended; it only satisfies `Sync`. Writes carry the generation of
/// the load that produced them and are dropped if a newer load has started
/// since.
#[derive(Debug)]
pub(crate) struct PreviewShared {
    ui: UiContext,
    fields: Mutex<PreviewFields>,
    state: watch::Sender<PreviewState>,
    generation: AtomicU64,
}

impl PreviewShared {
    pub(crate) fn new(fields: PreviewFields, ui: UiContext) -> Self {
        let (state, _) = watch::channel(PreviewState::Initial);
        Self {
            ui,
            fields: Mutex::new(fields),
            state,
            generation: AtomicU64::new(0),
        }
    }

    fn fields_mut(&self) -> MutexGuard<'_, PreviewFields> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_on_ui(&self) -> Result<()> {
        if self.ui.is_current() {
            Ok(())
        } else {
            Err(PreviewError::OffUiContext)
        }
    }

    fn ensure_current(&self, generation: u64) -> Result<()> {
        if self.generation.load(Ordering::SeqCst) == generation {
            Ok(())
        } else {
            tracing::debug!(generation, "dropping write from superseded load");
            Err(PreviewError::Superseded)
        }
    }

    /// Snapshot of the display fields
    pub(crate) fn fields(&self) -> PreviewFields {
        self.fields_mut().clone()
    }

    pub(crate) fn state(&self) -> PreviewState {
        *self.state.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.subscribe()
    }

    pub(crate) fn has_icon(&self) -> bool {
        self.fields_mut().icon.is_some()
    }

    fn set_state(&self, state: PreviewState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            tracing::debug!(from = %previous, to = %state, "preview state changed");
        }
    }

    /// Invalidate every load in flight without starting a new one
    pub(crate) fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Start a new load cycle, superseding any in flight
    pub(crate) fn begin_load(&self) -> Result<u64> {
        self.ensure_on_ui()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(PreviewState::Loading);
        Ok(generation)
    }

    /// Store the icon; its arrival alone promotes the state to `Loaded`
    pub(crate) fn apply_icon(&self, generation: u64, icon: IconHandle) -> Result<()> {
        self.ensure_on_ui()?;
        self.ensure_current(generation)?;

        let newly_set = {
            let mut fields = self.fields_mut();
            let was_unset = fields.icon.is_none();
            fields.icon = Some(icon);
            was_unset
        };

        if newly_set {
            self.set_state(PreviewState::Loaded);
        }
        Ok(())
    }

    /// Store size and type together
    pub(crate) fn apply_display_info(
        &self,
        generation: u64,
        file_size: String,
        file_type: String,
    ) -> Result<()> {
        self.ensure_on_ui()?;
        self.ensure_current(generation)?;

        let mut fields = self.fields_mut();
        fields.file_size = Some(file_size);
        fields.file_type = Some(file_type);
        Ok(())
    }

    /// Settle the state from both sub-fetch outcomes
    pub(crate) fn reconcile(&self, generation: u64, outcome: LoadOutcome) -> Result<()> {
        self.ensure_on_ui()?;
        self.ensure_current(generation)?;
        self.set_state(outcome.reconciled_state());
        Ok(())
    }
}
