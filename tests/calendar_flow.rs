use calnote::context::Context;
use calnote::error::ErrorKind;
use calnote::event::EventInput;
use calnote::month_key::MonthKey;
use calnote::store::EventStore;
use chrono::NaiveDate;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn active_names(context: &mut Context) -> Vec<String> {
    context
        .active_events()
        .iter()
        .flatten()
        .map(|event| event.name().to_owned())
        .collect()
}

#[test]
fn submitted_events_follow_the_active_month() {
    let mut context = Context::at(EventStore::new(), ymd(2024, 1, 10)).unwrap();

    context.select_date(ymd(2024, 1, 15)).unwrap();
    context
        .submit_event(EventInput::new(10, 30, "Standup"))
        .unwrap();
    context.select_date(ymd(2024, 1, 20)).unwrap();
    context
        .submit_event(EventInput::new(9, 0, "Review"))
        .unwrap();

    assert_eq!(active_names(&mut context), vec!["Standup", "Review"]);

    context.next_month().unwrap();
    assert!(active_names(&mut context).is_empty());
    assert_eq!(context.active_events(), &None);

    context.prev_month().unwrap();
    assert_eq!(active_names(&mut context), vec!["Standup", "Review"]);

    let stored = context.store().events(&MonthKey::from("02024")).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].date(), &ymd(2024, 1, 15).and_hms_opt(10, 30, 0).unwrap());
}

#[test]
fn invalid_submission_leaves_store_untouched() {
    let mut context = Context::at(EventStore::new(), ymd(2024, 1, 10)).unwrap();
    context.select_date(ymd(2024, 1, 12)).unwrap();

    let err = context
        .submit_event(EventInput::new(25, 0, "Too late"))
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::InvalidEventInput));
    assert!(context.store().is_empty());
    assert!(active_names(&mut context).is_empty());
}

#[test]
fn filler_day_events_land_in_their_own_month() {
    let mut context = Context::at(EventStore::new(), ymd(2024, 1, 10)).unwrap();

    // The January grid starts on 31/12/2023.
    let first_cell = context.weeks()[0][0].date;
    assert_eq!(first_cell, ymd(2023, 12, 31));

    context.select_date(first_cell).unwrap();
    let record = context
        .submit_event(EventInput::new(23, 0, "New year's eve"))
        .unwrap();

    assert_eq!(record.month_key().as_str(), "112023");
    assert_eq!(context.store().len(&MonthKey::from("112023")), 1);
    assert_eq!(context.store().len(&MonthKey::from("02024")), 0);
}

#[test]
fn extra_subscribers_see_the_same_stream() {
    let mut context = Context::at(EventStore::new(), ymd(2024, 3, 1)).unwrap();
    let mut observer = context.store_mut().subscribe();

    context.select_date(ymd(2024, 3, 8)).unwrap();
    let record = context
        .submit_event(EventInput::new(18, 15, "Dinner"))
        .unwrap();

    let pending: Vec<_> = observer.iter_pending().collect();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[1], Some(vec![record.clone()]));

    let removed = context
        .store_mut()
        .remove_event(&record.month_key(), record.id())
        .unwrap();
    assert_eq!(removed, record);
    assert_eq!(observer.latest(), &Some(vec![]));
}
