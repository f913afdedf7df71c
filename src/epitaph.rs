//! Post-game epitaph
//!
//! When a run ends the session asks an external writer for a short death poem
//! about the final score. The writer is opaque and may be slow, so it runs on
//! a worker thread and the result is polled without blocking the frame loop.
//! Failures never reach the player: they become a fixed fallback verse.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;

/// Shown when the writer fails or its worker dies
pub const FAILURE_FALLBACK: &str = "墨尽，命绝。 (The ink is dry, the life is spent.)";

/// Shown when the writer succeeds with nothing to say
pub const EMPTY_FALLBACK: &str = "墨迹散去，剑意长存。 (Ink fades, but the intent of the blade remains.)";

#[derive(Debug, Error)]
pub enum EpitaphError {
    #[error("epitaph writer unavailable: {0}")]
    Unavailable(String),
    #[error("epitaph request failed: {0}")]
    Request(String),
    #[error("epitaph worker stopped without an answer")]
    WorkerLost,
    #[error("failed to start epitaph worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Something that can compose an epitaph for a score
pub trait EpitaphWriter: Send + Sync + 'static {
    fn compose(&self, score: u32) -> Result<String, EpitaphError>;
}

impl<F> EpitaphWriter for F
where
    F: Fn(u32) -> Result<String, EpitaphError> + Send + Sync + 'static,
{
    fn compose(&self, score: u32) -> Result<String, EpitaphError> {
        self(score)
    }
}

/// Request text handed to a text-generation writer
pub fn prompt(score: u32) -> String {
    format!(
        "The player just finished an ink-wash style Wuxia game with a score of {score}. \
         Generate a short, evocative \"Death Poem\" or martial arts evaluation in Chinese \
         (Traditional or Simplified) and English translation. \
         The tone should be zen, poetic, and somber. Keep it under 50 words."
    )
}

/// Offline writer: a fixed verse per score tier
pub fn offline_verse(score: u32) -> Result<String, EpitaphError> {
    let verse = match score {
        0 => "未出一剑，雨已停。 (Not a single cut, and the rain has stopped.)",
        1..=49 => "三尺青锋，一滴残墨。 (Three feet of steel, a single drop of ink.)",
        50..=199 => "剑过处，落叶无声。 (Where the blade passed, the leaves fell silent.)",
        _ => "百战墨干，山河留白。 (A hundred battles dried the ink; the mountains stay blank.)",
    };
    Ok(verse.to_string())
}

/// Map a writer result to the text shown to the player
pub fn resolve(result: Result<String, EpitaphError>) -> String {
    match result {
        Ok(text) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            log::warn!("Epitaph unavailable, using fallback: {}", e);
            FAILURE_FALLBACK.to_string()
        }
    }
}

/// Where the epitaph for the current run stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EpitaphStatus {
    /// No run has ended yet
    #[default]
    Idle,
    /// Writer is working
    Pending,
    Ready(String),
}

/// One in-flight epitaph request
#[derive(Debug)]
pub struct EpitaphTask {
    score: u32,
    rx: Option<Receiver<Result<String, EpitaphError>>>,
    done: Option<String>,
}

impl EpitaphTask {
    /// Hand `score` to `writer` on a worker thread
    pub fn spawn(writer: Arc<dyn EpitaphWriter>, score: u32) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("epitaph".into())
            .spawn(move || {
                // Receiver gone means the run was abandoned; nothing to do
                let _ = tx.send(writer.compose(score));
            });

        match worker {
            Ok(_) => {
                log::debug!("Epitaph requested for score {}", score);
                Self {
                    score,
                    rx: Some(rx),
                    done: None,
                }
            }
            Err(e) => Self {
                score,
                rx: None,
                done: Some(resolve(Err(EpitaphError::Spawn(e)))),
            },
        }
    }

    /// Check for an answer without blocking
    pub fn poll(&mut self) -> Option<&str> {
        if self.done.is_none() {
            let answer = match &self.rx {
                Some(rx) => match rx.try_recv() {
                    Ok(result) => Some(result),
                    Err(TryRecvError::Empty) => None,
                    Err(TryRecvError::Disconnected) => Some(Err(EpitaphError::WorkerLost)),
                },
                None => Some(Err(EpitaphError::WorkerLost)),
            };
            if let Some(result) = answer {
                let text = resolve(result);
                log::info!("Epitaph for score {} ready: {}", self.score, text);
                self.rx = None;
                self.done = Some(text);
            }
        }
        self.done.as_deref()
    }

    /// Block until the writer answers
    pub fn wait(&mut self) -> &str {
        if self.done.is_none() {
            let result = match self.rx.take() {
                Some(rx) => rx.recv().unwrap_or(Err(EpitaphError::WorkerLost)),
                None => Err(EpitaphError::WorkerLost),
            };
            let text = resolve(result);
            log::info!("Epitaph for score {} ready: {}", self.score, text);
            self.done = Some(text);
        }
        self.done.as_deref().unwrap_or(FAILURE_FALLBACK)
    }

    pub fn status(&self) -> EpitaphStatus {
        match &self.done {
            Some(text) => EpitaphStatus::Ready(text.clone()),
            None => EpitaphStatus::Pending,
        }
    }
}
