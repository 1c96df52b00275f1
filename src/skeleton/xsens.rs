//! XSens 23-segment source topology as exported by Nymeria.

/// Number of body segments in the XSens suit model.
pub const NUM_PARTS: usize = 23;

/// Segment names in the order the xdata arrays store them.
pub const PART_NAMES: [&str; NUM_PARTS] = [
    "Pelvis",
    "L5",
    "L3",
    "T12",
    "T8",
    "Neck",
    "Head",
    "R_Shoulder",
    "R_UpperArm",
    "R_Forearm",
    "R_Hand",
    "L_Shoulder",
    "L_UpperArm",
    "L_Forearm",
    "L_Hand",
    "R_UpperLeg",
    "R_LowerLeg",
    "R_Foot",
    "R_Toe",
    "L_UpperLeg",
    "L_LowerLeg",
    "L_Foot",
    "L_Toe",
];

/// Parent segment of each part; `None` for the pelvis.
pub const PART_PARENTS: [Option<usize>; NUM_PARTS] = [
    None,
    Some(0),
    Some(1),
    Some(2),
    Some(3),
    Some(4),
    Some(5),
    Some(4), // R_Shoulder hangs off T8
    Some(7),
    Some(8),
    Some(9),
    Some(4), // L_Shoulder hangs off T8
    Some(11),
    Some(12),
    Some(13),
    Some(0),
    Some(15),
    Some(16),
    Some(17),
    Some(0),
    Some(19),
    Some(20),
    Some(21),
];

/// Index of a segment by name.
#[must_use]
pub fn part_index(name: &str) -> Option<usize> {
    PART_NAMES.iter().position(|part| *part == name)
}
