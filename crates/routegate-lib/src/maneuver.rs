//! Maneuver-to-instruction translation tables.
//!
//! Each engine has its own maneuver vocabulary. OSRM names maneuvers with
//! strings, Valhalla numbers them 1 through 29. Both are translated through a
//! static table so every input maps to some phrase.

/// Phrase used for any maneuver a table does not know.
const FALLBACK_ACTION: &str = "Continue";

const ARRIVE: &str = "Arrive at destination";

const OSRM_ACTIONS: &[(&str, &str)] = &[
    ("depart", "Head"),
    ("turn", "Turn"),
    ("arrive", ARRIVE),
    ("merge", "Merge"),
    ("fork", "Take fork"),
    ("roundabout", "Enter roundabout"),
];

/// Valhalla maneuver phrases indexed by type code. Index 0 is not a valid
/// code and falls back like any other unknown value.
const VALHALLA_ACTIONS: [&str; 30] = [
    FALLBACK_ACTION,              // 0: none
    "Head",                       // 1: start
    "Head",                       // 2: start right
    "Head",                       // 3: start left
    ARRIVE,                       // 4: destination
    ARRIVE,                       // 5: destination right
    ARRIVE,                       // 6: destination left
    "Continue",                   // 7: becomes
    "Continue",                   // 8: continue
    "Turn slightly right",        // 9: slight right
    "Turn right",                 // 10: right
    "Turn sharply right",         // 11: sharp right
    "Make a U-turn",              // 12: u-turn right
    "Make a U-turn",              // 13: u-turn left
    "Turn sharply left",          // 14: sharp left
    "Turn left",                  // 15: left
    "Turn slightly left",         // 16: slight left
    "Take the ramp",              // 17: ramp straight
    "Take the ramp on the right", // 18: ramp right
    "Take the ramp on the left",  // 19: ramp left
    "Take the exit on the right", // 20: exit right
    "Take the exit on the left",  // 21: exit left
    "Stay straight",              // 22: stay straight
    "Keep right",                 // 23: stay right
    "Keep left",                  // 24: stay left
    "Merge",                      // 25: merge
    "Enter the roundabout",       // 26: roundabout enter
    "Exit the roundabout",        // 27: roundabout exit
    "Take the ferry",             // 28: ferry enter
    "Exit the ferry",             // 29: ferry exit
];

/// Valhalla type codes for arriving at the destination.
pub const VALHALLA_DESTINATION_TYPES: [u32; 3] = [4, 5, 6];

/// Returns true for Valhalla's destination, destination-right and
/// destination-left maneuvers.
pub fn is_valhalla_destination(maneuver_type: u32) -> bool {
    VALHALLA_DESTINATION_TYPES.contains(&maneuver_type)
}

/// Instruction for an OSRM maneuver type and street name.
pub fn osrm_instruction(maneuver_type: &str, street_name: &str) -> String {
    let action = OSRM_ACTIONS
        .iter()
        .find(|(kind, _)| *kind == maneuver_type)
        .map(|(_, action)| *action)
        .unwrap_or(FALLBACK_ACTION);

    with_street(action, street_name, maneuver_type == "arrive")
}

/// Instruction for a Valhalla maneuver type code and its street names.
///
/// Only the first street name is used. Destination maneuvers never carry a
/// street suffix.
pub fn valhalla_instruction(maneuver_type: u32, street_names: &[String]) -> String {
    let action = usize::try_from(maneuver_type)
        .ok()
        .and_then(|code| VALHALLA_ACTIONS.get(code))
        .copied()
        .unwrap_or(FALLBACK_ACTION);
    let street = street_names.first().map(String::as_str).unwrap_or("");

    with_street(action, street, is_valhalla_destination(maneuver_type))
}

fn with_street(action: &str, street: &str, arriving: bool) -> String {
    if street.is_empty() || arriving {
        action.to_string()
    } else {
        format!("{} on {}", action, street)
    }
}
