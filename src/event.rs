use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, ErrorKind, Result};
use crate::month_key::{format_date, MonthKey};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    id: Uuid,
    date: NaiveDateTime,
    name: String,
}

impl EventRecord {
    pub fn new(date: NaiveDateTime, name: String) -> Self {
        EventRecord {
            id: Uuid::new_v4(),
            date,
            name,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn date(&self) -> &NaiveDateTime {
        &self.date
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(&self.date)
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_date(&self.date.date()),
            self.date.format("%H:%M"),
            self.name
        )
    }
}

/// Raw values of the event form before they become a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventInput {
    pub hours: u32,
    pub minutes: u32,
    pub name: String,
}

impl EventInput {
    pub fn new(hours: u32, minutes: u32, name: &str) -> Self {
        EventInput {
            hours,
            minutes,
            name: name.to_owned(),
        }
    }

    /// Validates the whole input and attaches it to `day`. Nothing is built
    /// unless every field is acceptable.
    pub fn into_record(self, day: &NaiveDate) -> Result<EventRecord> {
        if self.hours > 23 {
            return Err(Error::new(
                ErrorKind::InvalidEventInput,
                &format!("hour {} not in 0..=23", self.hours),
            ));
        }

        if self.minutes > 59 {
            return Err(Error::new(
                ErrorKind::InvalidEventInput,
                &format!("minute {} not in 0..=59", self.minutes),
            ));
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::new(ErrorKind::InvalidEventInput, "empty event name"));
        }

        let time = NaiveTime::from_hms_opt(self.hours, self.minutes, 0)
            .ok_or_else(|| Error::from(ErrorKind::InvalidEventInput))?;

        Ok(EventRecord::new(day.and_time(time), name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn valid_input_builds_record() {
        let record = EventInput::new(10, 30, " Standup ")
            .into_record(&jan(15))
            .unwrap();

        assert_eq!(record.name(), "Standup");
        assert_eq!(*record.date(), jan(15).and_hms_opt(10, 30, 0).unwrap());
        assert_eq!(record.month_key().as_str(), "02024");
        assert_eq!(record.to_string(), "15/01/2024 10:30 Standup");
    }

    #[test]
    fn boundaries_are_accepted() {
        assert!(EventInput::new(0, 0, "a").into_record(&jan(1)).is_ok());
        assert!(EventInput::new(23, 59, "a").into_record(&jan(1)).is_ok());
    }

    #[test]
    fn invalid_input_is_rejected() {
        for input in [
            EventInput::new(24, 0, "late"),
            EventInput::new(9, 60, "off"),
            EventInput::new(9, 0, "   "),
            EventInput::default(),
        ]
        .iter()
        {
            let err = input.clone().into_record(&jan(2)).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::InvalidEventInput), "{:?}", input);
        }
    }

    #[test]
    fn records_get_distinct_ids() {
        let at = jan(3).and_hms_opt(9, 0, 0).unwrap();
        let a = EventRecord::new(at, "a".to_owned());
        let b = EventRecord::new(at, "a".to_owned());

        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }
}
