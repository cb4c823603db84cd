use crate::engine::Storage;
use crate::{TableEngine, TableProblem};

pub struct TableEngineBuilder<P: TableProblem> {
    problem: P,
    storage: Option<Storage>,
}

impl<P: TableProblem> TableEngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            storage: None,
        }
    }
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }
    pub fn rolling(self) -> Self {
        self.with_storage(Storage::Rolling)
    }
    pub fn build(self) -> TableEngine<P> {
        TableEngine::with_storage(self.problem, self.storage.unwrap_or_default())
    }
}
