/// Map a field-percent coordinate onto `cells` terminal cells.
/// Values outside [0, 100] land outside the returned range's clamp.
pub fn percent_to_cell(pct: f64, cells: u16) -> Option<u16> {
    if cells == 0 || !(0.0..=100.0).contains(&pct) {
        return None;
    }
    let cell = (pct / 100.0 * (cells - 1) as f64).round() as u16;
    Some(cell.min(cells - 1))
}
