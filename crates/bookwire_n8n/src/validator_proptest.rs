#[cfg(test)]
mod tests {
    use crate::models::{BookingInput, BookingPayload};
    use crate::validator::{parse_date, validate_booking_on, DATE_IN_PAST};
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn base_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    fn input_for(day: NaiveDate, hour: u32, minute: u32) -> BookingInput {
        BookingInput {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            date: Some(day.format("%Y-%m-%d").to_string()),
            time: Some(format!("{hour:02}:{minute:02}")),
            reason: Some("Checkup".to_string()),
        }
    }

    proptest! {
        // Every date/time pair on or after today is accepted
        #[test]
        fn test_future_slots_are_valid(
            offset_days in 0..3650i64,
            hour in 0u32..24,
            minute in 0u32..60,
        ) {
            let today = base_day();
            let day = today + Duration::days(offset_days);
            let result = validate_booking_on(&input_for(day, hour, minute), today);
            prop_assert!(result.valid, "unexpected errors: {:?}", result.errors);
        }

        // Any day before today yields exactly the past-date error
        #[test]
        fn test_past_days_only_fail_on_date(offset_days in 1..3650i64) {
            let today = base_day();
            let day = today - Duration::days(offset_days);
            let result = validate_booking_on(&input_for(day, 9, 0), today);
            prop_assert_eq!(result.errors, vec![DATE_IN_PAST.to_string()]);
        }

        // Formatting a real date and parsing it back yields the same date
        #[test]
        fn test_parse_date_accepts_formatted_dates(offset_days in -36500i64..36500) {
            let day = base_day() + Duration::days(offset_days);
            prop_assert_eq!(parse_date(&day.format("%Y-%m-%d").to_string()), Some(day));
        }

        // Normalization trims every field and lowercases email
        #[test]
        fn test_normalization_trims_and_lowercases(
            pad_left in "[ \t]{0,3}",
            pad_right in "[ \t]{0,3}",
            local in "[A-Za-z]{1,8}",
        ) {
            let email = format!("{pad_left}{local}@Example.COM{pad_right}");
            let input = BookingInput {
                name: Some(format!("{pad_left}Jane{pad_right}")),
                email: Some(email),
                date: Some("2030-01-02".to_string()),
                time: Some("10:00".to_string()),
                reason: Some(format!("{pad_left}Checkup{pad_right}")),
            };
            let payload = BookingPayload::from(&input);
            prop_assert_eq!(payload.name, "Jane");
            prop_assert_eq!(payload.reason, "Checkup");
            prop_assert_eq!(payload.email, format!("{}@example.com", local.to_lowercase()));
        }
    }
}
