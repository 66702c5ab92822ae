//! Mock hardware for testing
//!
//! Port reads are scripted per port and recorded in order; the controller
//! counts acknowledgements.

use super::pic::EndOfInterrupt;
use super::port::PortIo;
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

pub struct MockPorts {
    scripted: BTreeMap<u16, VecDeque<u8>>,
    reads: Vec<u16>,
}

impl MockPorts {
    pub fn new() -> Self {
        MockPorts {
            scripted: BTreeMap::new(),
            reads: Vec::new(),
        }
    }

    /// Queue a value for the next read of `port`
    pub fn script(&mut self, port: u16, value: u8) -> &mut Self {
        self.scripted.entry(port).or_default().push_back(value);
        self
    }

    pub fn reads(&self) -> &[u16] {
        &self.reads
    }
}

impl PortIo for MockPorts {
    fn read_u8(&mut self, port: u16) -> u8 {
        self.reads.push(port);
        self.scripted
            .get_mut(&port)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| panic!("unscripted read of port {:#x}", port))
    }
}

#[derive(Default)]
pub struct MockPics {
    pub acknowledged: usize,
}

impl EndOfInterrupt for MockPics {
    fn end_of_interrupt(&mut self) {
        self.acknowledged += 1;
    }
}
