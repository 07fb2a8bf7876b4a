use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use reprise_core::{RunnableUnit, TestSuite};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Applies environment variables for the duration of a test and restores
/// the prior values on drop. Holds a process-wide lock because the test
/// harness runs tests in parallel and the environment is shared.
pub struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
    saved: Vec<(&'static str, Option<OsString>)>,
}

impl EnvGuard {
    pub fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());

        let mut saved = Vec::with_capacity(vars.len());
        for (name, value) in vars {
            saved.push((*name, env::var_os(name)));
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }

        Self { _lock: lock, saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, original) in self.saved.drain(..) {
            match original {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}

/// Leaf test-unit identifiers in suite order.
pub fn collect_ids(suite: &TestSuite) -> Vec<String> {
    suite.tests().map(|unit| unit.id().to_string()).collect()
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
