//! Shared channel infrastructure between the main thread and the logic thread.

use crate::input::InputEvent;
use crate::models::replay::ReplayData;
use crate::models::stats::ScoreAccumulator;
use crate::shared::snapshot::{GameplaySnapshot, JudgementEvent};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// System-level events sent to the logic thread.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Display resized; cursor input is rescaled from now on.
    Resize { width: u32, height: u32 },
    /// Shutdown requested.
    Quit,
}

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct PlayResult {
    pub beatmap_hash: String,
    pub score: ScoreAccumulator,
    /// Every input the session received, replay and live ones merged.
    pub replay: ReplayData,
    /// False when the run was cut short by `SystemEvent::Quit`.
    pub completed: bool,
}

/// Events produced by the logic thread.
#[derive(Debug, Clone)]
pub enum SimEvent {
    Judgement(JudgementEvent),
    Finished(PlayResult),
    /// The beatmap could not be loaded; the thread exits after sending this.
    LoadFailed(String),
}

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Main → Logic: live cursor and button events, timestamped in playback time.
    pub input_tx: Sender<(i64, InputEvent)>,
    pub input_rx: Receiver<(i64, InputEvent)>,

    /// Logic → Main: judgements and run results.
    pub event_tx: Sender<SimEvent>,
    pub event_rx: Receiver<SimEvent>,

    /// Logic → Render: gameplay snapshots.
    pub render_tx: Sender<GameplaySnapshot>,
    pub render_rx: Receiver<GameplaySnapshot>,

    /// Main → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    pub fn new() -> Self {
        let (input_tx, input_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        // Bounded render channel: max 2 snapshots queued to limit latency
        let (render_tx, render_rx) = bounded(2);

        let (sys_tx, sys_rx) = unbounded();

        Self {
            input_tx,
            input_rx,
            event_tx,
            event_rx,
            render_tx,
            render_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
