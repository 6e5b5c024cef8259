//! Demo job: a scripted multi-step workflow that narrates its progress.

use std::collections::HashSet;
use std::time::Duration;

use workstream_engine::{Job, JobError, JobFactory, OutputSink};
use workstream_logging::ws_debug;

use super::config::{StepConfig, WorkflowConfig};

pub(crate) struct ScriptedWorkflowFactory {
    config: WorkflowConfig,
}

impl ScriptedWorkflowFactory {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }
}

impl JobFactory for ScriptedWorkflowFactory {
    fn build(&self) -> Result<Box<dyn Job>, JobError> {
        if self.config.steps.is_empty() {
            return Err(JobError::Construction("workflow has no steps".into()));
        }
        let mut seen = HashSet::new();
        for step in &self.config.steps {
            if step.name.trim().is_empty() {
                return Err(JobError::Construction("workflow step has no name".into()));
            }
            if !seen.insert(step.name.as_str()) {
                return Err(JobError::Construction(format!(
                    "duplicate workflow step {:?}",
                    step.name
                )));
            }
        }
        Ok(Box::new(ScriptedWorkflow {
            steps: self.config.steps.clone(),
        }))
    }
}

struct ScriptedWorkflow {
    steps: Vec<StepConfig>,
}

#[async_trait::async_trait]
impl Job for ScriptedWorkflow {
    async fn run(&self, request: &str, sink: &OutputSink) -> Result<(), JobError> {
        let total = self.steps.len();
        writeln!(sink, "Running workflow for: {request}");
        for (index, step) in self.steps.iter().enumerate() {
            ws_debug!("step {} {}", index + 1, step.name);
            writeln!(sink, "Step {}/{} {}: started", index + 1, total, step.name);
            tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
            writeln!(sink, "Step {}/{} {}: done", index + 1, total, step.name);
        }
        writeln!(sink, "Final result: {total} steps completed for \"{request}\"");
        Ok(())
    }
}
