//! Common testing utilities for casement integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::rc::Rc;

use casement::config::parser::parse_config;
use casement::event::WindowEvent;
use casement::geometry::{Geometry, SharedContainer, Size};
use casement::render::RecordingRenderer;
use casement::window::ZOrderAllocator;
use casement::{WindowId, WindowManager, WindowOptions};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const SCREEN: Size = Size {
    width: 1920,
    height: 1080,
};

/// A manager with a recording renderer, a resizable container and an event log
pub struct TestEnv {
    pub wm: WindowManager<RecordingRenderer>,
    pub container: SharedContainer,
    pub events: Rc<RefCell<Vec<WindowEvent>>>,
}

impl TestEnv {
    /// Default z bounds on a 1920x1080 container
    pub fn new() -> Self {
        let container = SharedContainer::new(SCREEN);
        let wm = WindowManager::new(
            ZOrderAllocator::default(),
            Box::new(container.clone()),
            RecordingRenderer::new(),
        );
        Self::wrap(wm, container)
    }

    /// Manager built from config text
    pub fn with_config(config: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = parse_config(config)?;
        let container = SharedContainer::new(config.container.unwrap_or(SCREEN));
        let wm = WindowManager::from_config(
            &config,
            Box::new(container.clone()),
            RecordingRenderer::new(),
        )?;
        Ok(Self::wrap(wm, container))
    }

    fn wrap(mut wm: WindowManager<RecordingRenderer>, container: SharedContainer) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        wm.subscribe(move |event: &WindowEvent| sink.borrow_mut().push(event.clone()));
        Self {
            wm,
            container,
            events,
        }
    }

    /// Register an 800x600 window at `left, top`
    pub fn open(&mut self, owner: &str, left: i32, top: i32) -> Result<WindowId, Box<dyn std::error::Error>> {
        let record = self.wm.register(
            owner,
            Geometry::new(left, top, 800, 600),
            WindowOptions::default(),
        )?;
        Ok(record.id())
    }

    pub fn geometry(&self, id: WindowId) -> Geometry {
        self.wm.get(id).map(|w| w.geometry()).unwrap_or_default()
    }

    pub fn z(&self, id: WindowId) -> u32 {
        self.wm.get(id).map(|w| w.z_index()).unwrap_or_default()
    }

    /// Names of the events seen so far, then clear the log
    pub fn take_event_kinds(&self) -> Vec<&'static str> {
        self.events.borrow_mut().drain(..).map(|e| e.kind()).collect()
    }

    /// Panic with every breach if the manager is inconsistent
    pub fn assert_consistent(&self) {
        if let Err(errors) = self.wm.validate() {
            panic!("inconsistent state: {errors:#?}");
        }
    }

    /// Assert all z-indices are distinct
    pub fn assert_unique_z(&self) {
        let mut values: Vec<u32> = self.wm.registry().all().iter().map(|w| w.z_index()).collect();
        let count = values.len();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), count, "duplicate z-index");
    }
}

/// Write `content` to a uniquely named file under the temp dir
pub fn temp_file(test_name: &str, extension: &str, content: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join(format!(
        "casement-test-{test_name}-{}.{extension}",
        std::process::id()
    ));
    fs::write(&path, content)?;
    Ok(path)
}

/// Run the casement binary with `args`
pub fn run_casement(args: &[&str]) -> Result<Output, Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_casement"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()?;
    Ok(output)
}
