use std::cell::RefCell;

use crate::dataloader::{DataLoader, LabeledEntry};
use crate::err::{NetError, NetResult};

/// Walks the entries in order, starting over after the last one
pub struct SimpleDataLoader {
    id: RefCell<usize>,
    data: Vec<LabeledEntry>,
}

impl DataLoader for SimpleDataLoader {
    fn next(&self) -> &LabeledEntry {
        let mut self_id = self.id.borrow_mut();

        if *self_id >= self.data.len() {
            *self_id = 0;
        }

        let ret = &self.data[*self_id];
        *self_id += 1;
        ret
    }

    fn reset(&mut self) {
        *self.id.borrow_mut() = 0;
    }

    fn len(&self) -> Option< usize > {
        Some(self.data.len())
    }

    fn pos(&self) -> Option< usize > {
        Some(*self.id.borrow())
    }
}

impl SimpleDataLoader {
    pub fn new(data: Vec<LabeledEntry>) -> NetResult<Self> {
        if data.is_empty() {
            return Err(NetError::InvalidCfg("dataset is empty".to_owned()));
        }

        Ok(Self {
            id: RefCell::new(0),
            data,
        })
    }

    pub fn entries(&self) -> &[LabeledEntry] {
        &self.data
    }
}
