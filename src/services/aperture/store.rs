use chrono::{DateTime, Local};

/// Callback invoked with the new aperture date after every write
pub type ApertureObserver = Box<dyn FnMut(&DateTime<Local>)>;

/// Handle returned by [`ApertureStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Single owner of the configured aperture date.
///
/// The parent screen owns the store and lends it to the modal; every write
/// goes through [`ApertureStore::set_aperture_date`] so observers see each
/// change exactly once.
pub struct ApertureStore {
    aperture_date: DateTime<Local>,
    observers: Vec<(ObserverId, ApertureObserver)>,
    next_observer_id: u64,
}

impl ApertureStore {
    pub fn new(aperture_date: DateTime<Local>) -> Self {
        Self {
            aperture_date,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    pub fn aperture_date(&self) -> DateTime<Local> {
        self.aperture_date
    }

    pub fn set_aperture_date(&mut self, aperture_date: DateTime<Local>) {
        self.aperture_date = aperture_date;
        for (_, observer) in &mut self.observers {
            observer(&self.aperture_date);
        }
    }

    pub fn subscribe(&mut self, observer: ApertureObserver) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if the observer was already removed
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl Default for ApertureStore {
    fn default() -> Self {
        Self::new(Local::now())
    }
}
