use super::*;

#[test]
fn test_action_city_follows_kind() {
    let task = Task::new(1, CityId(2), CityId(5), 3);

    assert_eq!(PdAction::Pickup(task).city(), CityId(2));
    assert_eq!(PdAction::Delivery(task).city(), CityId(5));
}

#[test]
fn test_capacity_delta() {
    let task = Task::new(1, CityId(0), CityId(1), 4);

    assert_eq!(PdAction::Pickup(task).capacity_delta(), -4);
    assert_eq!(PdAction::Delivery(task).capacity_delta(), 4);
}

#[test]
fn test_with_task_keeps_kind() {
    let old = Task::new(9, CityId(0), CityId(1), 1);
    let new = Task::new(9, CityId(0), CityId(1), 2);

    let action = PdAction::Delivery(old).with_task(new);
    assert!(!action.is_pickup());
    assert_eq!(action.task().weight, 2);
}

#[test]
fn test_vehicle_can_carry() {
    let vehicle = Vehicle::new("v0", 3, 1.0, CityId(0));

    assert!(vehicle.can_carry(&Task::new(1, CityId(0), CityId(1), 3)));
    assert!(!vehicle.can_carry(&Task::new(2, CityId(0), CityId(1), 4)));
}

#[test]
fn test_display() {
    let task = Task::new(12, CityId(0), CityId(1), 1);

    assert_eq!(PdAction::Pickup(task).to_string(), "P12");
    assert_eq!(PdAction::Delivery(task).to_string(), "D12");
    assert_eq!(CityId(4).to_string(), "city#4");
}
