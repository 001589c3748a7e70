/// Property-based tests using proptest
use chrono::NaiveDate;
use proptest::prelude::*;
use student_registry::models::{is_valid_email, BookingRequest, Gender, NewStudent};

proptest! {
    // The booking payload always carries the registering student's name as firstname.
    #[test]
    fn booking_request_firstname_is_student_name(name in "\\PC*", day in 1u32..=28) {
        let date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        let body = serde_json::to_value(BookingRequest::for_student(&name, date)).unwrap();

        prop_assert_eq!(body["firstname"].as_str(), Some(name.as_str()));
        prop_assert_eq!(&body["bookingdates"]["checkin"], &body["bookingdates"]["checkout"]);
    }

    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn simple_addresses_are_valid(
        local in "[a-z]{1,10}",
        domain in "[a-z]{1,10}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn blank_names_are_rejected(spaces in " {0,8}") {
        let new = NewStudent {
            name: spaces,
            email: "test@mail.com".to_string(),
            gender: Gender::Female,
        };
        prop_assert!(new.validate().is_err());
    }
}
