use chrono::{Local, Months, NaiveDate};

use crate::error::{Error, ErrorKind, Result};
use crate::event::{EventInput, EventRecord};
use crate::grid::{self, Weeks};
use crate::month_key::MonthKey;
use crate::store::{EventList, EventStore, Subscription};

/// State of one calendar view: the displayed month, the selected day and the
/// events shown for it.
pub struct Context {
    current: NaiveDate,
    selected: NaiveDate,
    today: NaiveDate,
    weeks: Weeks,
    show_event_form: bool,
    store: EventStore,
    events: Subscription,
}

impl Context {
    pub fn new(store: EventStore) -> Result<Self> {
        Context::at(store, Local::now().date_naive())
    }

    pub fn at(mut store: EventStore, today: NaiveDate) -> Result<Self> {
        let weeks = grid::generate_weeks_at(&today, &today, &today)?;
        let events = store.subscribe();

        Ok(Context {
            current: today,
            selected: today,
            today,
            weeks,
            show_event_form: false,
            store,
            events,
        })
    }

    fn move_month(&mut self, current: NaiveDate) -> Result<()> {
        self.weeks = grid::generate_weeks_at(&current, &self.selected, &self.today)?;
        self.current = current;
        self.show_event_form = false;
        self.store.notify_active_month(&MonthKey::from_date(&self.current));
        Ok(())
    }

    /// Displays the month containing `date`. The view stays untouched if the
    /// month cannot be shown.
    pub fn goto_month(&mut self, date: NaiveDate) -> Result<()> {
        self.move_month(date)
    }

    pub fn next_month(&mut self) -> Result<()> {
        let next = self
            .current
            .checked_add_months(Months::new(1))
            .ok_or_else(|| Error::new(ErrorKind::DateOutOfRange, "no month after this one"))?;
        self.move_month(next)
    }

    pub fn prev_month(&mut self) -> Result<()> {
        let prev = self
            .current
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| Error::new(ErrorKind::DateOutOfRange, "no month before this one"))?;
        self.move_month(prev)
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        log::debug!("Selected {}", date);
        self.weeks = grid::generate_weeks_at(&self.current, &date, &self.today)?;
        self.selected = date;
        self.show_event_form = true;
        Ok(())
    }

    /// Records the form input as an event on the selected day.
    pub fn submit_event(&mut self, input: EventInput) -> Result<EventRecord> {
        let record = input.into_record(&self.selected)?;
        self.store.record_event(record.month_key(), record.clone())?;
        Ok(record)
    }

    /// Advances the clock used for "today" flags.
    pub fn update(&mut self, today: NaiveDate) -> Result<()> {
        if self.today != today {
            self.weeks = grid::generate_weeks_at(&self.current, &self.selected, &today)?;
            self.today = today;
        }
        Ok(())
    }

    pub fn weeks(&self) -> &Weeks {
        &self.weeks
    }

    pub fn current(&self) -> &NaiveDate {
        &self.current
    }

    pub fn selected(&self) -> &NaiveDate {
        &self.selected
    }

    pub fn today(&self) -> &NaiveDate {
        &self.today
    }

    pub fn show_event_form(&self) -> bool {
        self.show_event_form
    }

    pub fn is_navigable(&self) -> bool {
        grid::is_navigable_month_at(&self.current, &self.today)
    }

    pub fn is_selectable(&self, date: &NaiveDate) -> bool {
        grid::is_selectable_month_day(date, &self.current, &self.today)
    }

    pub fn active_events(&mut self) -> &EventList {
        self.events.latest()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EventStore {
        &mut self.store
    }
}
