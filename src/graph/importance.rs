/// Weight of each distinct importing file.
const INBOUND_WEIGHT: u32 = 10;
/// Weight of each exported name.
const EXPORT_WEIGHT: u32 = 2;

/// Path-category bonus. Checked in this order, first match wins, so a file
/// under both `/components/` and `/lib/` scores the utility bonus.
pub fn path_bonus(path: &str) -> u32 {
    if path.contains("/lib/") || path.contains("/utils/") {
        5
    } else if path.contains("/components/") {
        3
    } else if path.contains("/types/") {
        4
    } else {
        0
    }
}

/// Importance of a file: 10 per distinct importing file, 2 per export, plus
/// the path bonus. Only comparable between nodes of the same snapshot.
pub fn score(path: &str, export_count: usize, inbound: usize) -> u32 {
    let inbound = u32::try_from(inbound).unwrap_or(u32::MAX);
    let exports = u32::try_from(export_count).unwrap_or(u32::MAX);
    inbound
        .saturating_mul(INBOUND_WEIGHT)
        .saturating_add(exports.saturating_mul(EXPORT_WEIGHT))
        .saturating_add(path_bonus(path))
}
