use heatworld_kernel::World;

/// Brightness ramp for free cells, coldest first.
const RAMP: &[u8] = b" .:-=+*@";

/// Render `world` as text: one character per cell, one line per row.
///
/// Fixed cells render as `#`, insulators as `%`, and free cells map their
/// value onto a brightness ramp.
pub fn render_ascii(world: &World) -> String {
    let w = world.width() as usize;
    let mut out = String::with_capacity((w + 1) * world.height() as usize);
    for (row_state, row_props) in world.state().chunks(w).zip(world.properties().chunks(w)) {
        for (&v, &p) in row_state.iter().zip(row_props) {
            let c = if p.is_fixed() {
                '#'
            } else if p.is_insulator() {
                '%'
            } else {
                shade(v)
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn shade(v: f32) -> char {
    let top = RAMP.len() - 1;
    let level = (v.clamp(0.0, 1.0) * top as f32).round() as usize;
    RAMP[level.min(top)] as char
}
