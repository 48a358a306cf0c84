//! Binding between the open reading selection and playback
//!
//! Recitation belongs to the surah or juz on screen. When the reader opens a
//! different one, whatever was playing stops.

use crate::controller::PlaylistController;
use tilawa_core::AppContext;
use tokio::task::JoinHandle;
use tracing::debug;

/// Stop `controller` whenever the selection in `context` changes
///
/// Changes to other settings (theme, font size, ...) are ignored. The task
/// ends once every handle to the context has been dropped; abort the returned
/// handle to end it earlier.
pub fn follow_selection(controller: &PlaylistController, context: &AppContext) -> JoinHandle<()> {
    let controller = controller.clone();
    let mut settings = context.subscribe();
    let mut selection = settings.borrow_and_update().selection;

    tokio::spawn(async move {
        while settings.changed().await.is_ok() {
            let current = settings.borrow_and_update().selection;
            if current == selection {
                continue;
            }
            debug!(from = ?selection, to = ?current, "Selection changed, stopping playback");
            selection = current;
            controller.stop().await;
        }
        debug!("Application context dropped, selection binding ended");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilawa_core::{Selection, Theme};

    #[tokio::test]
    async fn ends_when_context_dropped() {
        let controller = PlaylistController::new(std::sync::Arc::new(NullRenderer));
        let context = AppContext::default();
        let task = follow_selection(&controller, &context);

        context.update(|settings| settings.theme = Theme::Dark);
        context.set_selection(Some(Selection::juz(30).unwrap()));
        drop(context);

        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .expect("binding should end")
            .unwrap();
    }

    struct NullRenderer;

    #[async_trait::async_trait]
    impl tilawa_core::AudioRenderer for NullRenderer {
        async fn load(&self, _resource: &str) -> tilawa_core::Result<tilawa_core::RenderHandle> {
            Ok(tilawa_core::RenderHandle(1))
        }
        async fn play(&self, _handle: tilawa_core::RenderHandle) -> tilawa_core::Result<()> {
            Ok(())
        }
        async fn stop(&self, _handle: tilawa_core::RenderHandle) -> tilawa_core::Result<()> {
            Ok(())
        }
        async fn release(&self, _handle: tilawa_core::RenderHandle) -> tilawa_core::Result<()> {
            Ok(())
        }
        async fn set_rate(
            &self,
            _handle: tilawa_core::RenderHandle,
            _rate: f32,
        ) -> tilawa_core::Result<()> {
            Ok(())
        }
        fn on_completion(&self, _handle: tilawa_core::RenderHandle) -> tilawa_core::CompletionSignal {
            tokio::sync::oneshot::channel().1
        }
    }
}
