use parceltrack_core::db::open_db_in_memory;
use parceltrack_core::{
    Parcel, ParcelRepository, ParcelStatus, RepoError, SqliteParcelRepository,
};

fn test_parcel(client: i64) -> Parcel {
    Parcel::new(client, "test", "2026-08-06T09:00:00Z")
}

#[test]
fn set_address_updates_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let id = repo.add(&test_parcel(10)).unwrap();
    repo.set_address(id, "new test address").unwrap();

    let loaded = repo.get(id).unwrap();
    assert_eq!(loaded.address, "new test address");
}

#[test]
fn set_address_is_dropped_once_parcel_is_sent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let id = repo.add(&test_parcel(11)).unwrap();
    repo.set_status(id, ParcelStatus::Sent).unwrap();

    repo.set_address(id, "new test address").unwrap();

    let loaded = repo.get(id).unwrap();
    assert_eq!(loaded.address, "test");
    assert_eq!(loaded.status, ParcelStatus::Sent);
}

#[test]
fn delete_removes_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let id = repo.add(&test_parcel(12)).unwrap();
    repo.delete(id).unwrap();

    let err = repo.get(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(number) if number == id));
}

#[test]
fn delete_is_dropped_once_parcel_is_sent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let id = repo.add(&test_parcel(13)).unwrap();
    repo.set_status(id, ParcelStatus::Sent).unwrap();

    repo.delete(id).unwrap();

    let loaded = repo.get(id).unwrap();
    assert_eq!(loaded.number, id);
    assert_eq!(loaded.status, ParcelStatus::Sent);
}

#[test]
fn set_status_overwrites_without_transition_checks() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let id = repo.add(&test_parcel(14)).unwrap();
    repo.set_status(id, ParcelStatus::Delivered).unwrap();
    assert_eq!(repo.get(id).unwrap().status, ParcelStatus::Delivered);

    // going backwards is legal; only the gate side effects depend on status
    repo.set_status(id, ParcelStatus::Registered).unwrap();
    assert_eq!(repo.get(id).unwrap().status, ParcelStatus::Registered);

    repo.delete(id).unwrap();
    assert!(matches!(repo.get(id), Err(RepoError::NotFound(_))));
}

#[test]
fn gated_operations_on_missing_parcel_are_silent_no_ops() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    repo.set_address(99999, "nowhere").unwrap();
    repo.set_status(99999, ParcelStatus::Sent).unwrap();
    repo.delete(99999).unwrap();
}

#[test]
fn gating_does_not_touch_other_parcels_of_same_client() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let kept = repo.add(&test_parcel(20)).unwrap();
    let removed = repo.add(&test_parcel(20)).unwrap();

    repo.delete(removed).unwrap();

    let remaining = repo.get_by_client(20).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].number, kept);
}

// Full pass through the lifecycle as calling code would drive it.
#[test]
fn registered_parcel_lifecycle_end_to_end() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let mut parcel = Parcel::new(1000, "test", "2026-08-06T09:00:00Z");
    assert_eq!(parcel.status, ParcelStatus::Registered);

    let id = repo.add(&parcel).unwrap();
    assert!(id > 0);

    parcel.number = id;
    assert_eq!(repo.get(id).unwrap(), parcel);

    repo.set_address(id, "new address").unwrap();
    assert_eq!(repo.get(id).unwrap().address, "new address");

    repo.delete(id).unwrap();
    assert!(matches!(repo.get(id), Err(RepoError::NotFound(_))));
}
