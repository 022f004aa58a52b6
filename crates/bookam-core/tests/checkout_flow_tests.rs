mod common;

use bookam_core::{
    checkout::{ConfirmationPage, PassengerDetailsPage, PaymentPage, SeatSelectionPage},
    models::{PassengerEntry, PassengerField},
    schema::PaymentForm,
    wizard::{Blocker, WizardError},
    BookingApi, BookingDraft, BookingError, BookingStatus, BookingStep, PaymentMethod, SeatId,
};

fn seat(label: &str) -> SeatId {
    label.parse().unwrap()
}

fn lead_entry() -> PassengerEntry {
    PassengerEntry {
        title: "Mrs".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        email: "ada@example.com".to_string(),
        phone: "08031234567".to_string(),
        terms_accepted: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_two_seat_booking_end_to_end() {
    let (_temp_dir, backend) = common::create_test_backend().await;
    let (_bus, route) = common::create_lagos_abuja(&backend).await;

    // Seat selection
    let mut seats = SeatSelectionPage::load(&backend, route.id).await.unwrap();
    seats.toggle(&seat("1A")).unwrap();
    seats.toggle(&seat("1B")).unwrap();
    let href = seats.proceed(None).unwrap().href().unwrap();
    assert!(href.starts_with("/booking/passenger-details?v=1"));

    // Passenger details: two seats, two tabs, ₦30,000
    let page = PassengerDetailsPage::from_query(&href).unwrap();
    assert_eq!(page.fare().to_string(), "₦30,000");
    let PassengerDetailsPage::Multi(mut passengers) = page else {
        panic!("two seats should open the multi-passenger page");
    };
    assert_eq!(
        passengers.wizard().tabs(),
        vec!["Passenger 1".to_string(), "Passenger 2".to_string()]
    );

    passengers.fill(0, lead_entry()).unwrap();
    assert!(passengers.wizard().can_advance());
    for (field, value) in [
        (PassengerField::Title, "Mr"),
        (PassengerField::FirstName, "Tunde"),
        (PassengerField::LastName, "Bello"),
    ] {
        passengers.set_field(1, field, value).unwrap();
    }
    assert!(passengers.wizard().is_ready());
    let href = passengers.submit().unwrap().href().unwrap();

    // Payment: online is blocked until the card is complete
    let mut payment = PaymentPage::from_query(&href).unwrap();
    assert_eq!(payment.contact().name, "Ada Obi");
    assert!(!payment.can_submit());
    *payment.form_mut() = PaymentForm::card("Ada Obi", "4111 1111 1111 1111", "08/29", "123");
    let href = payment.submit().unwrap().href().unwrap();
    assert!(!href.contains("4111"));

    // Confirmation
    let confirmation = ConfirmationPage::from_query(&href).unwrap();
    assert_eq!(confirmation.card(), Some("1111"));
    let booking = confirmation.confirm(&backend).await.unwrap();
    assert_eq!(booking.amount, 30000);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.passengers.len(), 2);
    assert_eq!(booking.card_last_four.as_deref(), Some("1111"));

    // The seats are now taken for everyone else
    let taken = backend.taken_seats(route.id).await.unwrap();
    assert_eq!(taken, vec![seat("1A"), seat("1B")]);
    let mut again = SeatSelectionPage::load(&backend, route.id).await.unwrap();
    assert!(matches!(
        again.toggle(&seat("1A")),
        Err(BookingError::SeatUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_single_seat_cash_booking_is_pending() {
    let (_temp_dir, backend) = common::create_test_backend().await;
    let (_bus, route) = common::create_lagos_abuja(&backend).await;

    let mut seats = SeatSelectionPage::load(&backend, route.id).await.unwrap();
    seats.toggle(&seat("3D")).unwrap();
    let draft = seats.proceed(None).unwrap();

    let PassengerDetailsPage::Single(mut contact) = PassengerDetailsPage::from_draft(draft).unwrap()
    else {
        panic!("one seat should open the single-passenger page");
    };
    contact.form_mut().full_name = "Jo".to_string();
    contact.form_mut().email = "jo@example.com".to_string();
    contact.form_mut().phone = "08012345678".to_string();
    let draft = contact.submit().unwrap();

    let mut payment = PaymentPage::from_draft(draft).unwrap();
    payment.set_method(PaymentMethod::Cash);
    assert!(payment.can_submit());
    let draft = payment.submit().unwrap();
    assert_eq!(draft.step, BookingStep::Confirmation);

    let booking = ConfirmationPage::from_draft(draft)
        .unwrap()
        .confirm(&backend)
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.amount, 15000);
    assert!(booking.passengers.is_empty());
    assert_eq!(booking.contact.name, "Jo");
}

#[test]
fn test_missing_seats_opens_blocked_page() {
    let page = PassengerDetailsPage::from_query("/booking/passenger-details?mode=multi").unwrap();
    let PassengerDetailsPage::Multi(page) = page else {
        panic!("expected the multi-passenger page");
    };
    assert!(page.wizard().tabs().is_empty());
    assert_eq!(page.blocker(), Some(Blocker::NoSeats));
    assert!(matches!(
        page.submit(),
        Err(BookingError::Wizard(WizardError::NoSeats))
    ));
}

#[test]
fn test_tampered_drafts_are_refused() {
    // Fare does not match the journey price
    let journey = r#"{"routeId":1,"busId":1,"fromCity":"Lagos","toCity":"Abuja","departureTime":"2025-06-02T07:00:00","arrivalTime":"2025-06-02T17:30:00","price":15000}"#;
    let query = format!(
        "/booking/passenger-details?v=1&step=passenger-details&journey={}&seats=1A,1B&price=100",
        journey.replace('"', "%22").replace('{', "%7B").replace('}', "%7D")
    );
    assert!(matches!(
        PassengerDetailsPage::from_query(&query),
        Err(BookingError::Draft { .. })
    ));

    // Newer draft versions are not understood
    assert!(PaymentPage::from_query("/booking/payment?v=9&seats=1A").is_err());

    // A payment link cannot be opened on the confirmation page
    assert!(ConfirmationPage::from_query("/booking/confirmation?step=payment").is_err());
}

#[tokio::test]
async fn test_race_for_the_same_seat() {
    let (_temp_dir, backend) = common::create_test_backend().await;
    let (_bus, route) = common::create_lagos_abuja(&backend).await;

    // Both customers load the map before either books
    let mut first = SeatSelectionPage::load(&backend, route.id).await.unwrap();
    let mut second = SeatSelectionPage::load(&backend, route.id).await.unwrap();
    first.toggle(&seat("2C")).unwrap();
    second.toggle(&seat("2C")).unwrap();

    let checkout = |page: &SeatSelectionPage| {
        let draft = page.proceed(None).unwrap();
        let PassengerDetailsPage::Single(mut contact) =
            PassengerDetailsPage::from_draft(draft).unwrap()
        else {
            panic!("expected the single-passenger page");
        };
        contact.form_mut().full_name = "Chika Eze".to_string();
        contact.form_mut().email = "chika@example.com".to_string();
        contact.form_mut().phone = "08098765432".to_string();
        let mut payment = PaymentPage::from_draft(contact.submit().unwrap()).unwrap();
        payment.set_method(PaymentMethod::Cash);
        ConfirmationPage::from_draft(payment.submit().unwrap()).unwrap()
    };

    checkout(&first).confirm(&backend).await.unwrap();
    let err = checkout(&second).confirm(&backend).await.unwrap_err();
    assert!(matches!(err, BookingError::SeatUnavailable { ref seat, .. } if seat == "2C"));
}

#[tokio::test]
async fn test_fare_is_checked_against_the_route() {
    let (_temp_dir, backend) = common::create_test_backend().await;
    let (_bus, route) = common::create_lagos_abuja(&backend).await;

    let mut seats = SeatSelectionPage::load(&backend, route.id).await.unwrap();
    seats.toggle(&seat("1A")).unwrap();
    seats.toggle(&seat("1B")).unwrap();
    let PassengerDetailsPage::Multi(mut passengers) =
        PassengerDetailsPage::from_draft(seats.proceed(None).unwrap()).unwrap()
    else {
        panic!("two seats should open the multi-passenger page");
    };
    passengers.fill(0, lead_entry()).unwrap();
    for (field, value) in [
        (PassengerField::Title, "Mr"),
        (PassengerField::FirstName, "Tunde"),
        (PassengerField::LastName, "Bello"),
    ] {
        passengers.set_field(1, field, value).unwrap();
    }
    let mut payment = PaymentPage::from_draft(passengers.submit().unwrap()).unwrap();
    payment.set_method(PaymentMethod::Cash);
    let href = payment.submit().unwrap().href().unwrap();

    // Journey price and total rewritten together still agree with each other
    let mut draft = BookingDraft::from_query(&href).unwrap();
    if let Some(journey) = draft.journey.as_mut() {
        journey.price = 1;
    }
    draft.price = Some(2);
    let cheap = ConfirmationPage::from_draft(draft).unwrap();
    assert!(matches!(
        cheap.confirm(&backend).await,
        Err(BookingError::Draft { .. })
    ));

    // The store refuses the amount even when the page is bypassed
    let mut request = ConfirmationPage::from_query(&href).unwrap().booking_request();
    request.amount = 2;
    assert!(matches!(
        backend.create_booking(&request).await,
        Err(BookingError::InvalidInput { ref field, .. }) if field == "amount"
    ));
    assert!(backend.taken_seats(route.id).await.unwrap().is_empty());

    let booking = ConfirmationPage::from_query(&href)
        .unwrap()
        .confirm(&backend)
        .await
        .unwrap();
    assert_eq!(booking.amount, 30000);
}
