#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use workstream_engine::{Job, JobError, JobFactory, JobHandle, OutputSink};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(workstream_logging::initialize_for_tests);
}

#[derive(Debug, Clone)]
pub enum Step {
    Write(String),
    Sleep(u64),
    Fail(String),
    Panic,
}

pub fn write(text: &str) -> Step {
    Step::Write(text.to_string())
}

/// Job that plays back a fixed list of steps.
#[derive(Debug, Clone)]
pub struct ScriptJob {
    steps: Vec<Step>,
}

#[async_trait::async_trait]
impl Job for ScriptJob {
    async fn run(&self, _request: &str, sink: &OutputSink) -> Result<(), JobError> {
        for step in &self.steps {
            match step {
                Step::Write(text) => sink.append(text),
                Step::Sleep(ms) => tokio::time::sleep(Duration::from_millis(*ms)).await,
                Step::Fail(message) => return Err(JobError::Failed(message.clone())),
                Step::Panic => panic!("scripted panic"),
            }
        }
        Ok(())
    }
}

/// Factory that counts how often it was asked to build.
pub struct ScriptFactory {
    steps: Vec<Step>,
    builds: AtomicUsize,
}

impl ScriptFactory {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps,
            builds: AtomicUsize::new(0),
        })
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl JobFactory for ScriptFactory {
    fn build(&self) -> Result<Box<dyn Job>, JobError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptJob {
            steps: self.steps.clone(),
        }))
    }
}

/// Job that blocks until the test releases it, then writes `text`.
pub struct GatedJob {
    gate: Mutex<Receiver<()>>,
    text: String,
}

impl GatedJob {
    pub fn new(gate: Receiver<()>, text: &str) -> Self {
        Self {
            gate: Mutex::new(gate),
            text: text.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Job for GatedJob {
    async fn run(&self, _request: &str, sink: &OutputSink) -> Result<(), JobError> {
        let _ = self.gate.lock().unwrap().recv();
        sink.append(&self.text);
        Ok(())
    }
}

/// Echoes the request back, one line per word.
pub struct EchoJob;

#[async_trait::async_trait]
impl Job for EchoJob {
    async fn run(&self, request: &str, sink: &OutputSink) -> Result<(), JobError> {
        for word in request.split_whitespace() {
            writeln!(sink, "{word}");
        }
        Ok(())
    }
}

pub fn wait_until_finished(handle: &JobHandle, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while handle.is_running() {
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    true
}
