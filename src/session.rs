use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};

use crate::camera::error::CameraError;
use crate::camera::types::{Facing, FeedConfig};
use crate::config::Settings;
use crate::control::dispatch::{GestureDispatcher, Outcome};
use crate::control::gesture::Gesture;
use crate::control::player::PlaybackState;
use crate::diagnostics::stats::SessionStats;
use crate::feedback::presenter::FeedbackPresenter;
use crate::link::endpoint::endpoint_url;
use crate::link::manager::{ConnectionManager, GestureCallback};
use crate::sampler::pump::FrameSampler;

/// Errors that abort the session at startup.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Wire the inbound side of the link.
///
/// Dispatch runs before presentation so transient indicators reflect the
/// *resulting* player state; the persistent gesture indicator tracks every
/// label, including ones the dispatcher discards.
pub fn gesture_callback(
    dispatcher: Arc<Mutex<GestureDispatcher>>,
    player: Arc<Mutex<PlaybackState>>,
    presenter: FeedbackPresenter,
    stats: Arc<Mutex<SessionStats>>,
) -> GestureCallback {
    Arc::new(move |label| {
        stats.lock().record_gesture_received();
        let outcome = dispatcher.lock().dispatch(label, Instant::now());
        if let Outcome::Applied(_) = outcome {
            stats.lock().record_gesture_accepted();
        }

        presenter.show_gesture(label);
        if let Some(gesture) = label.and_then(Gesture::from_label) {
            if gesture.affects_volume() {
                presenter.volume_indicator(player.lock().volume());
            } else if gesture.affects_position() {
                presenter.seek_indicator(gesture == Gesture::RightSwipe);
            }
        }
    })
}

/// Run one full control-loop session until Ctrl-C.
pub async fn run(settings: Settings) -> Result<(), SessionError> {
    let presenter = FeedbackPresenter::new(settings.indicator_ttl());
    let stats = Arc::new(Mutex::new(SessionStats::new()));

    // Camera acquisition failures are fatal: surface on the status
    // indicator and bail, no retry.
    let feed_config = FeedConfig {
        width: settings.frame_width,
        height: settings.frame_height,
        facing: Facing::Front,
    };
    let mut feed = match crate::camera::backend_for(&settings.camera)
        .and_then(|backend| backend.open(&feed_config))
    {
        Ok(feed) => feed,
        Err(e) => {
            presenter.set_connection(&format!("Error: {e}"), false);
            return Err(e.into());
        }
    };

    let player = Arc::new(Mutex::new(PlaybackState::new(settings.media_duration_secs)));
    let dispatcher = Arc::new(Mutex::new(GestureDispatcher::new(settings.debounce())));
    dispatcher.lock().attach(Arc::clone(&player));

    let on_gesture = gesture_callback(
        Arc::clone(&dispatcher),
        Arc::clone(&player),
        presenter.clone(),
        Arc::clone(&stats),
    );

    let url = endpoint_url(&settings.host, settings.secure);
    info!("recognizer endpoint: {url}");
    let (manager, link) = ConnectionManager::new(
        url,
        settings.reconnect_delay(),
        presenter.clone(),
        on_gesture,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let manager_task = tokio::spawn(manager.run(shutdown_rx.clone()));

    let sampler = FrameSampler::new(
        feed.buffer(),
        link,
        Arc::clone(&stats),
        settings.sample_interval(),
        settings.frame_width,
        settings.frame_height,
        settings.jpeg_quality,
    );
    let sampler_task = tokio::spawn(sampler.run(shutdown_rx));

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => error!("failed to listen for shutdown signal: {e}"),
    }

    // Best-effort teardown: close the link, release the camera.
    let _ = shutdown_tx.send(true);
    let _ = tokio::time::timeout(std::time::Duration::from_secs(2), async {
        let _ = manager_task.await;
        let _ = sampler_task.await;
    })
    .await;
    feed.stop();

    info!(stats = ?stats.lock().snapshot(), "session ended");
    Ok(())
}
