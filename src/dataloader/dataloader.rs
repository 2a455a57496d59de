use crate::dataloader::databatch::LabeledEntry;

/// Source of training samples, one entry per training step
pub trait DataLoader {
    fn next(&self) -> &LabeledEntry;

    fn reset(&mut self) { }
    fn len(&self) -> Option< usize > { None }
    fn pos(&self) -> Option< usize > { None }
}
