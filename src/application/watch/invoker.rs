//! Push invoker - runs one push off the control loop

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;

use crate::domain::entities::PushRun;
use crate::domain::ports::{PushError, PushPipeline, PushReport, ReloadNotifier};

use super::event::WatchOptions;

/// Result of one push run, delivered to the control loop.
#[derive(Debug)]
pub struct PushCompletion {
    pub run: PushRun,
    pub outcome: Result<PushReport, PushError>,
    pub elapsed: Duration,
}

impl PushCompletion {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Executes push runs against the pipeline and the reload side-channel.
///
/// Pipeline errors are logged here and never returned as errors: a failed
/// push is still a completed push.
#[derive(Clone)]
pub struct PushInvoker {
    pipeline: Arc<dyn PushPipeline>,
    notifier: Arc<dyn ReloadNotifier>,
    options: WatchOptions,
}

impl PushInvoker {
    pub fn new(
        pipeline: Arc<dyn PushPipeline>,
        notifier: Arc<dyn ReloadNotifier>,
        options: WatchOptions,
    ) -> Self {
        Self {
            pipeline,
            notifier,
            options,
        }
    }

    /// Run a push on the calling thread.
    pub fn run_blocking(&self, run: PushRun) -> PushCompletion {
        let started = Instant::now();
        let request = self.options.to_push_request(&run);

        log::debug!("push {} started ({:?})", run.id, run.trigger);
        let outcome = self.pipeline.push(&request);
        let elapsed = started.elapsed();

        match &outcome {
            Ok(report) => log::debug!(
                "push {} finished in {}ms ({} files, {} bytes)",
                run.id,
                elapsed.as_millis(),
                report.files,
                report.bytes
            ),
            Err(e) => log::error!("push {} failed: {e}", run.id),
        }

        if run.sends_reload() {
            self.notifier.send_reload();
        }

        PushCompletion {
            run,
            outcome,
            elapsed,
        }
    }

    /// Run a push on its own thread and deliver the completion to `done`.
    pub fn spawn(&self, run: PushRun, done: Sender<PushCompletion>) {
        let invoker = self.clone();
        let thread_done = done.clone();
        let spawned = thread::Builder::new()
            .name(format!("appix-push-{}", run.id.value()))
            .spawn(move || {
                let completion = invoker.run_blocking(run);
                // The loop only goes away on shutdown
                let _ = thread_done.send(completion);
            });

        if let Err(e) = spawned {
            log::error!("failed to spawn push thread for run {}: {e}", run.id);
            let _ = done.send(PushCompletion {
                run,
                outcome: Err(PushError::Io(e)),
                elapsed: Duration::ZERO,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PushRunId;
    use crate::domain::ports::PushRequest;
    use crate::error::AppixResult;
    use crossbeam_channel::unbounded;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedPipeline {
        fail: bool,
        requests: Mutex<Vec<PushRequest>>,
    }

    impl ScriptedPipeline {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl PushPipeline for ScriptedPipeline {
        fn push(&self, request: &PushRequest) -> Result<PushReport, PushError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(PushError::UploadStatus { status: 500 })
            } else {
                Ok(PushReport {
                    files: 3,
                    bytes: 1024,
                    app_url: None,
                })
            }
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        reloads: AtomicUsize,
    }

    impl ReloadNotifier for CountingNotifier {
        fn start(&self) -> AppixResult<()> {
            Ok(())
        }

        fn send_reload(&self) {
            self.reloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn invoker(
        fail: bool,
        no_browser: bool,
    ) -> (PushInvoker, Arc<ScriptedPipeline>, Arc<CountingNotifier>) {
        let pipeline = ScriptedPipeline::new(fail);
        let notifier = Arc::new(CountingNotifier::default());
        let options = WatchOptions::new(PathBuf::from("/work/app")).with_no_browser(no_browser);
        let invoker = PushInvoker::new(pipeline.clone(), notifier.clone(), options);
        (invoker, pipeline, notifier)
    }

    #[test]
    fn initial_push_with_browser_does_not_reload() {
        let (invoker, pipeline, notifier) = invoker(false, false);
        let completion = invoker.run_blocking(PushRun::initial(PushRunId::new(0), false));

        assert!(completion.is_success());
        assert_eq!(notifier.reloads.load(Ordering::SeqCst), 0);
        assert!(pipeline.requests.lock().unwrap()[0].open_browser);
    }

    #[test]
    fn initial_push_without_browser_does_not_reload() {
        let (invoker, pipeline, notifier) = invoker(false, true);
        invoker.run_blocking(PushRun::initial(PushRunId::new(0), true));

        assert_eq!(notifier.reloads.load(Ordering::SeqCst), 0);
        assert!(!pipeline.requests.lock().unwrap()[0].open_browser);
    }

    #[test]
    fn failed_initial_push_does_not_reload() {
        let (invoker, _, notifier) = invoker(true, true);
        let completion = invoker.run_blocking(PushRun::initial(PushRunId::new(0), true));

        assert!(!completion.is_success());
        assert_eq!(notifier.reloads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn change_push_run_inline_reloads() {
        let (invoker, _, notifier) = invoker(false, true);
        invoker.run_blocking(PushRun::on_change(PushRunId::new(1)));

        assert_eq!(notifier.reloads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_change_push_still_reloads_and_completes() {
        let (invoker, _, notifier) = invoker(true, false);
        let (tx, rx) = unbounded();

        invoker.spawn(PushRun::on_change(PushRunId::new(4)), tx);
        let completion = rx.recv_timeout(Duration::from_secs(2)).unwrap();

        assert_eq!(completion.run.id, PushRunId::new(4));
        assert!(matches!(
            completion.outcome,
            Err(PushError::UploadStatus { status: 500 })
        ));
        assert_eq!(notifier.reloads.load(Ordering::SeqCst), 1);
    }
}
