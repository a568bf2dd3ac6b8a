//! Replay engine for deterministic replay reproduction.
//!
//! Feeds a recorded `ReplayData` into a `PlaySession` at a fixed step, so the same inputs
//! produce the same judgements regardless of wall-clock timing.

use crate::beatmap::BeatmapStore;
use crate::input::InputEvent;
use crate::logic::session::{PlaySession, TickOutput};
use crate::models::replay::{ReplayData, ReplayInput};
use crate::models::stats::ScoreAccumulator;
use crate::shared::snapshot::JudgementEvent;

pub struct ReplayEngine {
    session: PlaySession,
    /// Replay inputs sorted by timestamp.
    inputs: Vec<ReplayInput>,
    input_index: usize,
    clock_ms: i64,
    step_ms: i64,
    finished: bool,
    collected: Vec<JudgementEvent>,
}

impl ReplayEngine {
    /// Wraps `session`. `step_ms` is the simulated time between ticks.
    pub fn new(session: PlaySession, replay: &ReplayData, step_ms: i64) -> Self {
        Self {
            session,
            inputs: replay.sorted_inputs(),
            input_index: 0,
            clock_ms: 0,
            step_ms: step_ms.max(1),
            finished: false,
            collected: Vec::new(),
        }
    }

    /// Advances one step: feeds due inputs, then ticks the session.
    ///
    /// Feeding stops after a press so that two presses never collapse into the same tick.
    pub fn step(&mut self, store: &BeatmapStore) -> TickOutput {
        if self.finished {
            return TickOutput::default();
        }

        self.clock_ms += self.step_ms;

        while let Some(input) = self.inputs.get(self.input_index) {
            if input.time_ms > self.clock_ms {
                break;
            }
            self.session.handle_input(input.event);
            self.input_index += 1;
            if input.event == InputEvent::Press {
                break;
            }
        }

        let output = self.session.tick(self.clock_ms, store);
        self.collected.extend_from_slice(&output.judgements);

        if self.session.is_finished() && self.input_index >= self.inputs.len() {
            self.finished = true;
            log::info!("REPLAY: Finished at {} ms", self.clock_ms);
        }

        output
    }

    /// Steps until the replay finishes or `limit_ms` of playback has elapsed.
    pub fn run_to_end(&mut self, store: &BeatmapStore, limit_ms: i64) -> ScoreAccumulator {
        while !self.finished && self.clock_ms < limit_ms {
            self.step(store);
        }
        self.session.score().clone()
    }

    /// Adds a live input behind any queued input with the same or an earlier timestamp.
    pub fn queue_input(&mut self, time_ms: i64, event: InputEvent) {
        let pending = &self.inputs[self.input_index..];
        let at = self.input_index + pending.partition_point(|input| input.time_ms <= time_ms);
        self.inputs.insert(at, ReplayInput { time_ms, event });
    }

    /// Every input known to the engine, fed or pending, in feed order.
    pub fn inputs(&self) -> &[ReplayInput] {
        &self.inputs
    }

    pub fn clock_ms(&self) -> i64 {
        self.clock_ms
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlaySession {
        &mut self.session
    }

    /// All judgements produced so far, in order.
    pub fn collected(&self) -> &[JudgementEvent] {
        &self.collected
    }
}
