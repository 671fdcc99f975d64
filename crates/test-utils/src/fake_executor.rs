use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use preflight::errors::Result;
use preflight::exec::TaskExecutor;

/// A fake executor that:
/// - records which task commands were "run"
/// - returns a scripted exit code per task name (default 0).
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<String>>>,
    exit_codes: BTreeMap<String, i32>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            exit_codes: BTreeMap::new(),
        }
    }

    /// Script a non-zero exit code for the named task.
    pub fn with_exit_code(mut self, task: &str, code: i32) -> Self {
        self.exit_codes.insert(task.to_string(), code);
        self
    }
}

impl TaskExecutor for FakeExecutor {
    fn run(
        &mut self,
        task: String,
        _cmd: String,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let code = self.exit_codes.get(&task).copied().unwrap_or(0);

        Box::pin(async move {
            {
                let mut guard = executed.lock().unwrap();
                guard.push(task);
            }
            Ok(code)
        })
    }
}
