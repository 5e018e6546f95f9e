use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    api,
    core::SelectedFile,
};

/// Runs backend calls off the UI thread. The GUI polls `poll_results` once
/// per frame; workers push [`TaskResult`]s through the channel.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn upload_file(&self, file: SelectedFile, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let progress_sender = sender.clone();
            let progress: api::ProgressCallback = Box::new(move |percent| {
                let _ = progress_sender.send(TaskResult::UploadProgress(percent));
            });

            let result = runtime.block_on(async {
                api::upload(&base_url, &file, Some(progress)).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::UploadFinished(result));
        });
    }

    pub fn check_backend(&self, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let connected = runtime.block_on(async { api::health_check(&base_url).await.is_ok() });

            let _ = sender.send(TaskResult::BackendConnection(connected));
        });
    }

    pub fn fetch_supported_formats(&self, base_url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let formats = runtime.block_on(api::supported_formats(&base_url));

            let _ = sender.send(TaskResult::SupportedFormats(formats));
        });
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
