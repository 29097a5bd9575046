use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use log::info;
use mlua::{HookTriggers, Lua};

use crate::command::Dispatcher;

use super::bindings::{register_globals, ScriptContext};

/// Runs Lua script files against one dispatcher.
///
/// Each script gets its own Lua state on its own thread; all of them
/// share the dispatcher and therefore the session. A shared stop flag
/// lets the host abort long-running scripts promptly.
pub struct ScriptHost {
    dispatcher: Arc<Dispatcher>,
    running: Arc<AtomicBool>,
    threads: Vec<JoinHandle<Result<()>>>,
}

impl ScriptHost {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            running: Arc::new(AtomicBool::new(false)),
            threads: Vec::new(),
        }
    }

    /// Launches one script thread per file. Any previous batch is
    /// stopped first.
    pub fn run_files(&mut self, paths: &[PathBuf]) -> Result<usize> {
        self.stop()?;
        if paths.is_empty() {
            return Ok(0);
        }

        let mut scripts = Vec::with_capacity(paths.len());
        for path in paths {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            scripts.push((script_name(path), source));
        }

        self.running.store(true, Ordering::Release);
        for (name, source) in scripts {
            let dispatcher = Arc::clone(&self.dispatcher);
            let running = Arc::clone(&self.running);
            info!("launching script {name}");
            let handle =
                thread::spawn(move || run_script_thread(dispatcher, running, name, source));
            self.threads.push(handle);
        }
        Ok(self.threads.len())
    }

    /// Blocks until every running script finishes.
    pub fn wait(&mut self) -> Result<()> {
        self.join_threads()
    }

    /// Requests that all scripts stop and waits for them to exit.
    pub fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::Release);
        self.join_threads()
    }

    fn join_threads(&mut self) -> Result<()> {
        if self.threads.is_empty() {
            return Ok(());
        }
        let handles = std::mem::take(&mut self.threads);
        let mut errors = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => errors.push(err),
                Err(panic) => errors.push(anyhow!("script thread panicked: {:?}", panic)),
            }
        }
        if errors.is_empty() {
            self.running.store(false, Ordering::Release);
            Ok(())
        } else {
            let message = errors
                .into_iter()
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(anyhow!("{message}"))
        }
    }
}

impl Drop for ScriptHost {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn script_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_script_thread(
    dispatcher: Arc<Dispatcher>,
    running: Arc<AtomicBool>,
    name: String,
    source: String,
) -> Result<()> {
    let lua = Lua::new();
    let hook_running = Arc::clone(&running);
    lua.set_hook(
        HookTriggers {
            every_nth_instruction: Some(1000),
            ..Default::default()
        },
        move |_, _| {
            if !hook_running.load(Ordering::Acquire) {
                Err(mlua::Error::RuntimeError("script stopped by host".into()))
            } else {
                Ok(())
            }
        },
    );

    let context = ScriptContext {
        dispatcher,
        running,
    };
    register_globals(&lua, &context)?;

    lua.load(&source)
        .set_name(&name)
        .exec()
        .map_err(anyhow::Error::from)
        .context("Lua runtime error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityClass, EntityRef};
    use crate::session::Session;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_script(source: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(source.as_bytes()).unwrap();
        tmp
    }

    #[test]
    fn script_mutates_the_shared_session() {
        let session = Session::new();
        session.entities().insert(Entity::new(EntityClass::Unit, 1));
        let dispatcher = Arc::new(Dispatcher::headless(session.clone()));
        let script = write_script("heal(1, 1, 40) find(7, 2) setday(3)");

        let mut host = ScriptHost::new(dispatcher);
        let count = host.run_files(&[script.path().to_path_buf()]).unwrap();
        assert_eq!(count, 1);
        host.wait().unwrap();

        let unit = session
            .entities()
            .lookup(EntityRef::new(EntityClass::Unit, 1))
            .unwrap();
        assert_eq!(unit.health, 40.0);
        assert_eq!(session.player().item_amount(7), 2);
        assert_eq!(session.clock().day(), 3);
    }

    #[test]
    fn failing_script_surfaces_the_error() {
        let dispatcher = Arc::new(Dispatcher::headless(Session::new()));
        let script = write_script("heal(1, 9999, 5)");

        let mut host = ScriptHost::new(dispatcher);
        host.run_files(&[script.path().to_path_buf()]).unwrap();
        let err = host.wait().unwrap_err();
        assert!(err.to_string().contains("Lua runtime error"));
    }

    #[test]
    fn missing_file_fails_before_launch() {
        let dispatcher = Arc::new(Dispatcher::headless(Session::new()));
        let mut host = ScriptHost::new(dispatcher);
        let err = host
            .run_files(&[PathBuf::from("/definitely/not/here.lua")])
            .unwrap_err();
        assert!(err.to_string().contains("failed to read script"));
    }
}
