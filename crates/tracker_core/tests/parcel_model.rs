use tracker_core::{Parcel, ParcelStatus};

#[test]
fn status_tokens_round_trip_through_text() {
    for status in [
        ParcelStatus::Registered,
        ParcelStatus::Sent,
        ParcelStatus::Delivered,
    ] {
        let parsed: ParcelStatus = status.as_str().parse().unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn status_parsing_ignores_case_and_whitespace() {
    let parsed: ParcelStatus = " Registered ".parse().unwrap();
    assert_eq!(parsed, ParcelStatus::Registered);
}

#[test]
fn unknown_status_token_is_rejected() {
    let err = "teleported".parse::<ParcelStatus>().unwrap_err();
    assert_eq!(err.token, "teleported");
    assert!(err.to_string().contains("teleported"));
}

#[test]
fn status_serializes_as_snake_case_token() {
    let json = serde_json::to_string(&ParcelStatus::Registered).unwrap();
    assert_eq!(json, "\"registered\"");

    let status: ParcelStatus = serde_json::from_str("\"delivered\"").unwrap();
    assert_eq!(status, ParcelStatus::Delivered);
}

#[test]
fn new_parcel_starts_registered_and_unpersisted() {
    let parcel = Parcel::new(1000, "test", "2026-01-02T03:04:05Z");
    assert_eq!(parcel.number, 0);
    assert_eq!(parcel.status, "registered");
    assert!(parcel.is_registered());
}

#[test]
fn is_registered_compares_case_insensitively() {
    let mut parcel = Parcel::new(1, "a", "2026-01-02T03:04:05Z");
    parcel.status = "ReGiStErEd".to_string();
    assert!(parcel.is_registered());

    parcel.status = "sent".to_string();
    assert!(!parcel.is_registered());
}

#[test]
fn parcel_round_trips_through_serde() {
    let parcel = Parcel {
        number: 42,
        client: 1000,
        status: "sent".to_string(),
        address: "somewhere".to_string(),
        created_at: "2026-01-02T03:04:05Z".to_string(),
    };
    let json = serde_json::to_string(&parcel).unwrap();
    let back: Parcel = serde_json::from_str(&json).unwrap();
    assert_eq!(back, parcel);
}
