//! In-memory stand-ins for the firmware, used by the unit tests.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use uguid::Guid;

use crate::boot::{BootVolume, ImagePlatform, VariableStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryVolume {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryVolume {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &[u8]) -> Self {
        self.files.insert(path.to_string(), contents.to_vec());
        self
    }

    pub fn without_file(mut self, path: &str) -> Self {
        self.files.remove(path);
        self
    }
}

impl BootVolume for MemoryVolume {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.get(path).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableWrite {
    pub namespace: Guid,
    pub name: String,
    pub attributes: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryVariableStore {
    writes: Vec<VariableWrite>,
    reject: Option<(&'static str, usize)>,
}

impl MemoryVariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write to `name` with `status`.
    pub fn rejecting(mut self, name: &'static str, status: usize) -> Self {
        self.reject = Some((name, status));
        self
    }

    pub fn writes(&self) -> &[VariableWrite] {
        &self.writes
    }

    /// Latest value written under `name`.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.name == name)
            .map(|w| w.data.as_slice())
    }
}

impl VariableStore for MemoryVariableStore {
    fn set(
        &mut self,
        namespace: &Guid,
        name: &str,
        attributes: u32,
        data: &[u8],
    ) -> core::result::Result<(), usize> {
        if let Some((rejected, status)) = self.reject {
            if rejected == name {
                return Err(status);
            }
        }
        self.writes.push(VariableWrite {
            namespace: *namespace,
            name: name.to_string(),
            attributes,
            data: data.to_vec(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    Load(String),
    Clear,
    Start,
    Report(String),
    Stall(usize),
}

impl PlatformEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Clear => "clear",
            Self::Start => "start",
            Self::Report(_) => "report",
            Self::Stall(_) => "stall",
        }
    }
}

/// Image services with scripted outcomes; records every call.
#[derive(Debug, Clone)]
pub struct ScriptedPlatform {
    load_status: Option<usize>,
    start_status: usize,
    events: Vec<PlatformEvent>,
}

impl ScriptedPlatform {
    pub fn failing_load(status: usize) -> Self {
        Self {
            load_status: Some(status),
            start_status: 0,
            events: Vec::new(),
        }
    }

    pub fn failing_start(status: usize) -> Self {
        Self {
            load_status: None,
            start_status: status,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[PlatformEvent] {
        &self.events
    }
}

impl ImagePlatform for ScriptedPlatform {
    type Image = ();

    fn load_image(&mut self, path: &str) -> core::result::Result<(), usize> {
        self.events.push(PlatformEvent::Load(path.to_string()));
        match self.load_status {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn start_image(&mut self, _image: ()) -> usize {
        self.events.push(PlatformEvent::Start);
        self.start_status
    }

    fn clear_screen(&mut self) {
        self.events.push(PlatformEvent::Clear);
    }

    fn report(&mut self, message: &str) {
        self.events.push(PlatformEvent::Report(message.to_string()));
    }

    fn stall(&mut self, microseconds: usize) {
        self.events.push(PlatformEvent::Stall(microseconds));
    }
}
