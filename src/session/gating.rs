use super::inventory::Inventory;

/// A hotspot is open once every required item is held.
pub fn is_accessible(required: &[String], inventory: &Inventory) -> bool {
    required.iter().all(|id| inventory.holds(id))
}

/// Required ids not yet held, in definition order.
pub fn missing_items<'a>(required: &'a [String], inventory: &Inventory) -> Vec<&'a str> {
    required
        .iter()
        .filter(|id| !inventory.holds(id))
        .map(String::as_str)
        .collect()
}
