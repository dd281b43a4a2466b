use crate::store::SleepStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SleepStore,
}

impl AppState {
    pub fn new(store: SleepStore) -> Self {
        Self { store }
    }
}
