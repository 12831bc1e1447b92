//! Clock trait.

use chrono::{NaiveDate, NaiveDateTime};

/// Source of the current instant, as naive UTC.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> NaiveDateTime;

    /// Current calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
