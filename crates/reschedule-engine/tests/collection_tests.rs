//! Tests for the id-keyed collection reducer.

use reschedule_engine::collection::{Collection, CollectionAction, Keyed};
use reschedule_engine::RescheduleError;

#[derive(Debug, Clone, PartialEq)]
struct Ticket {
    id: String,
    name: String,
    price_cents: u32,
}

impl Keyed for Ticket {
    fn key(&self) -> &str {
        &self.id
    }
}

fn ticket(id: &str, name: &str, price_cents: u32) -> Ticket {
    Ticket {
        id: id.to_string(),
        name: name.to_string(),
        price_cents,
    }
}

fn three_tickets() -> Collection<Ticket> {
    Collection::from_items([
        ticket("early", "Early bird", 9_900),
        ticket("regular", "Regular", 14_900),
        ticket("student", "Student", 4_900),
    ])
    .unwrap()
}

#[test]
fn add_appends_in_order() {
    let tickets = three_tickets()
        .reduce(CollectionAction::Add(ticket("vip", "VIP", 49_900)))
        .unwrap();

    let ids: Vec<&str> = tickets.ids().collect();
    assert_eq!(ids, vec!["early", "regular", "student", "vip"]);
    assert_eq!(tickets.len(), 4);
}

#[test]
fn duplicate_add_is_rejected() {
    let err = three_tickets()
        .reduce(CollectionAction::Add(ticket("early", "Again", 1)))
        .unwrap_err();
    assert_eq!(err, RescheduleError::DuplicateId("early".to_string()));
}

#[test]
fn update_replaces_in_place() {
    let tickets = three_tickets()
        .reduce(CollectionAction::Update(ticket("regular", "Regular", 12_900)))
        .unwrap();

    assert_eq!(tickets.get("regular").unwrap().price_cents, 12_900);
    let ids: Vec<&str> = tickets.ids().collect();
    assert_eq!(ids, vec!["early", "regular", "student"]);
}

#[test]
fn update_of_missing_id_is_rejected() {
    let err = three_tickets()
        .reduce(CollectionAction::Update(ticket("ghost", "Ghost", 0)))
        .unwrap_err();
    assert_eq!(err, RescheduleError::UnknownId("ghost".to_string()));
}

#[test]
fn remove_drops_item_and_order_entry() {
    let tickets = three_tickets()
        .reduce(CollectionAction::Remove("regular".to_string()))
        .unwrap();

    assert!(tickets.get("regular").is_none());
    let names: Vec<&str> = tickets.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Early bird", "Student"]);
}

#[test]
fn remove_of_missing_id_is_rejected() {
    assert!(three_tickets()
        .reduce(CollectionAction::Remove("ghost".to_string()))
        .is_err());
}

#[test]
fn move_reorders_and_clamps() {
    let tickets = three_tickets()
        .reduce(CollectionAction::Move {
            id: "student".to_string(),
            to: 0,
        })
        .unwrap()
        .reduce(CollectionAction::Move {
            id: "early".to_string(),
            to: 99,
        })
        .unwrap();

    let ids: Vec<&str> = tickets.ids().collect();
    assert_eq!(ids, vec!["student", "regular", "early"]);
}

#[test]
fn from_items_rejects_duplicates() {
    let result = Collection::from_items([ticket("a", "A", 1), ticket("a", "B", 2)]);
    assert!(result.is_err());
}

#[test]
fn empty_collection() {
    let tickets: Collection<Ticket> = Collection::new();
    assert!(tickets.is_empty());
    assert_eq!(tickets.iter().count(), 0);
}
