use repairkit_domain::ports::{FeedbackCue, FeedbackSink};
use repairkit_types::ActorId;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Logs cues instead of playing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn play(&self, actor: &ActorId, cue: &FeedbackCue) {
        info!(actor = %actor, track = %cue.track, sound = %cue.sound, "repair feedback");
    }
}

/// Captures cues for later inspection.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    cues: Mutex<Vec<(ActorId, FeedbackCue)>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<(ActorId, FeedbackCue)> {
        self.cues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn play(&self, actor: &ActorId, cue: &FeedbackCue) {
        self.cues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((*actor, cue.clone()));
    }
}
