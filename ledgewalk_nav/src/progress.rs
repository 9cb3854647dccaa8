// Progress reporting for long-running builds.
//
// The builder pushes coarse progress into a `ProgressIndicator` owned by the
// host (an editor dialog, a log, or nothing). Indicators are passive: they
// never influence the build.
//
// `ProgressTask` wraps an indicator for the lifetime of one task and closes
// it on drop, so the task ends on every exit path including errors.

/// Receives progress updates from the builder.
pub trait ProgressIndicator {
    fn begin_task(&mut self, name: &str);
    fn update_details(&mut self, details: &str);
    fn set_progress(&mut self, numerator: u32, denominator: u32);
    fn end_task(&mut self);
}

/// Discards all progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl ProgressIndicator for NullProgress {
    fn begin_task(&mut self, _name: &str) {}
    fn update_details(&mut self, _details: &str) {}
    fn set_progress(&mut self, _numerator: u32, _denominator: u32) {}
    fn end_task(&mut self) {}
}

/// Forwards progress to `tracing` at debug level.
#[derive(Clone, Debug, Default)]
pub struct LogProgress {
    task: String,
    details: String,
}

impl ProgressIndicator for LogProgress {
    fn begin_task(&mut self, name: &str) {
        self.task = name.to_owned();
        self.details.clear();
        tracing::debug!(task = %self.task, "task started");
    }

    fn update_details(&mut self, details: &str) {
        self.details = details.to_owned();
        tracing::debug!(task = %self.task, "{}", self.details);
    }

    fn set_progress(&mut self, numerator: u32, denominator: u32) {
        tracing::debug!(
            task = %self.task,
            details = %self.details,
            "progress {numerator}/{denominator}"
        );
    }

    fn end_task(&mut self) {
        tracing::debug!(task = %self.task, "task finished");
    }
}

/// An open task on an indicator. Calls `end_task` when dropped.
pub struct ProgressTask<'a> {
    indicator: &'a mut dyn ProgressIndicator,
}

impl<'a> ProgressTask<'a> {
    pub fn begin(indicator: &'a mut dyn ProgressIndicator, name: &str) -> Self {
        indicator.begin_task(name);
        Self { indicator }
    }

    pub fn update_details(&mut self, details: &str) {
        self.indicator.update_details(details);
    }

    pub fn set_progress(&mut self, numerator: u32, denominator: u32) {
        self.indicator.set_progress(numerator, denominator);
    }
}

impl Drop for ProgressTask<'_> {
    fn drop(&mut self) {
        self.indicator.end_task();
    }
}
