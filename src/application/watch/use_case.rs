//! Watch Use Case implementation

use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::{select, unbounded, Receiver, Sender};

use crate::domain::entities::{ChangeEvent, PushRun};
use crate::domain::policies::EventFilter;
use crate::domain::ports::{PushPipeline, ReloadNotifier};
use crate::domain::services::{Coalescer, CoalescerStats, Command};
use crate::domain::value_objects::WatcherState;
use crate::error::AppixResult;

use super::debounce::DebounceTimer;
use super::event::{WatchEvent, WatchOptions};
use super::invoker::{PushCompletion, PushInvoker};

/// Watch Use Case
///
/// Orchestrates continuous watching with push-on-change.
/// This is the main entry point for the `appix watch` command.
pub struct WatchUseCase {
    options: WatchOptions,
    filter: EventFilter,
    invoker: PushInvoker,
    notifier: Arc<dyn ReloadNotifier>,
    timer: DebounceTimer,
}

/// Channels the control loop feeds itself from.
struct Feedback {
    debounce_tx: Sender<()>,
    push_done_tx: Sender<PushCompletion>,
}

impl WatchUseCase {
    /// Create a new WatchUseCase
    pub fn new(
        options: WatchOptions,
        filter: EventFilter,
        pipeline: Arc<dyn PushPipeline>,
        notifier: Arc<dyn ReloadNotifier>,
    ) -> Self {
        let invoker = PushInvoker::new(pipeline, notifier.clone(), options.clone());
        Self {
            options,
            filter,
            invoker,
            notifier,
            timer: DebounceTimer::new(),
        }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start watching (blocking)
    ///
    /// Performs the initial push, then processes `changes` until a message
    /// arrives on `shutdown` (or either channel is closed). Change events
    /// delivered during the initial push stay queued and are handled after it.
    pub fn start<F>(
        &self,
        changes: Receiver<ChangeEvent>,
        shutdown: Receiver<()>,
        on_event: F,
    ) -> AppixResult<CoalescerStats>
    where
        F: Fn(WatchEvent),
    {
        if let Err(e) = self.notifier.start() {
            log::warn!("live reload disabled: {e}");
        }

        on_event(WatchEvent::WatchStarted {
            app: self.options.app_path.display().to_string(),
        });

        let initial = self.options.initial_run();
        on_event(WatchEvent::PushStarted {
            run: initial.id,
            trigger: initial.trigger,
        });
        let completion = self.invoker.run_blocking(initial);
        on_event(completion_event(&completion));

        let (debounce_tx, debounce_rx) = unbounded::<()>();
        let (push_done_tx, push_done_rx) = unbounded::<PushCompletion>();
        let feedback = Feedback {
            debounce_tx,
            push_done_tx,
        };

        let mut coalescer = Coalescer::new(initial.id.next());
        log::debug!("watching {} for changes", self.options.app_path.display());

        loop {
            select! {
                recv(changes) -> msg => match msg {
                    Ok(event) => {
                        self.handle_change(&mut coalescer, &feedback, &event, &on_event);
                    }
                    Err(_) => {
                        log::warn!("change source closed, stopping");
                        break;
                    }
                },
                recv(debounce_rx) -> msg => {
                    if msg.is_ok() {
                        log::trace!("debounce expired");
                        let command = coalescer.on_debounce_expired();
                        self.execute(command, &feedback, &on_event);
                    }
                },
                recv(push_done_rx) -> msg => {
                    if let Ok(completion) = msg {
                        on_event(completion_event(&completion));
                        let command = coalescer.on_push_completed(completion.run.id);
                        self.execute(command, &feedback, &on_event);
                        if coalescer.state() == WatcherState::Waiting {
                            log::debug!("push done, watching for file changes");
                        }
                    }
                },
                recv(shutdown) -> _ => {
                    log::debug!("shutdown requested");
                    break;
                },
            }
        }

        if let Some(id) = coalescer.in_flight() {
            log::debug!("leaving push {id} running at shutdown");
        }
        let stats = coalescer.stats();
        log::debug!("session stats: {stats:?}");
        on_event(WatchEvent::Shutdown);
        Ok(stats)
    }

    fn handle_change<F>(
        &self,
        coalescer: &mut Coalescer,
        feedback: &Feedback,
        event: &ChangeEvent,
        on_event: &F,
    ) where
        F: Fn(WatchEvent),
    {
        let Some(rel_path) = event.relative_to(&self.options.app_path) else {
            log::warn!(
                "ignoring change outside {}: {}",
                self.options.app_path.display(),
                event.path().display()
            );
            return;
        };

        if self.filter.should_ignore(rel_path) {
            log::trace!("ignored change: {}", rel_path.display());
            return;
        }

        log::debug!(
            "{} {} ({})",
            event.kind(),
            rel_path.display(),
            coalescer.state()
        );
        on_event(WatchEvent::FileChanged {
            path: display_path(rel_path),
            kind: event.kind(),
        });

        let command = coalescer.on_change();
        self.execute(command, feedback, on_event);
    }

    fn execute<F>(&self, command: Option<Command>, feedback: &Feedback, on_event: &F)
    where
        F: Fn(WatchEvent),
    {
        match command {
            None => {}
            Some(Command::ArmDebounce) => {
                let tx = feedback.debounce_tx.clone();
                self.timer.arm(move || {
                    let _ = tx.send(());
                });
            }
            Some(Command::StartPush(run)) => {
                on_event(WatchEvent::PushStarted {
                    run: run.id,
                    trigger: run.trigger,
                });
                self.invoker.spawn(run, feedback.push_done_tx.clone());
            }
        }
    }
}

fn completion_event(completion: &PushCompletion) -> WatchEvent {
    let PushRun { id: run, trigger, .. } = completion.run;
    match &completion.outcome {
        Ok(report) => WatchEvent::PushComplete {
            run,
            trigger,
            files: report.files,
            bytes: report.bytes,
            elapsed_ms: u64::try_from(completion.elapsed.as_millis()).unwrap_or(u64::MAX),
        },
        Err(e) => WatchEvent::PushFailed {
            run,
            trigger,
            message: e.to_string(),
        },
    }
}

fn display_path(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.to_string_lossy().replace('\\', "/")
    }
}
