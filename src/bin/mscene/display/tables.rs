use std::collections::HashMap;
use std::io::{self, Write};

use molscene::{Element, Structure};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_structure_info(structure: &Structure, frames: Option<usize>) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![("Total Atoms", format!("{}", structure.atom_count()))];

    if let Some(frames) = frames {
        rows.push(("Frames", format!("{}", frames)));
    }

    if let Some(cell) = &structure.cell {
        let a = vec_len(&cell[0]);
        let b = vec_len(&cell[1]);
        let c = vec_len(&cell[2]);
        rows.push(("Cell (Å)", format!("{:.1} × {:.1} × {:.1}", a, b, c)));

        let (alpha, beta, gamma) = calc_angles(cell);
        rows.push((
            "Angles (α β γ)",
            format!("{:.1}° {:.1}° {:.1}°", alpha, beta, gamma),
        ));
    }

    if !structure.fixed.is_empty() {
        rows.push(("Fixed Atoms", format!("{}", structure.fixed.len())));
    }
    if structure.charges.is_some() {
        rows.push(("Charges", "yes".to_string()));
    }
    if structure.forces.is_some() {
        rows.push(("Forces", "yes".to_string()));
    }

    print_kv_table(&mut out, "Structure Summary", &rows);
}

pub fn print_element_distribution(structure: &Structure) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut element_counts: HashMap<Element, usize> = HashMap::new();
    for atom in &structure.atoms {
        *element_counts.entry(atom.element).or_insert(0) += 1;
    }

    let total = structure.atoms.len();
    let mut sorted: Vec<_> = element_counts
        .into_iter()
        .map(|(e, c)| (e.symbol().to_string(), c))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    print_distribution_table(&mut out, "Element Distribution", &sorted, total);
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{count_line}┬{dist_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT,
        "Element",
        "Count",
        "Distribution",
        name_w = name_w,
        count_w = count_w,
        dist_w = dist_w
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{count_line}┼{dist_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(15) {
        let pct = (*count as f64 / total as f64) * 100.0;
        let bar = make_bar(pct, max_bar_width);
        let name_s = truncate(name, name_w);
        let dist_cell = format!("{}  {:>5.1}%", bar, pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            name_s,
            count,
            dist_cell,
            name_w = name_w,
            count_w = count_w,
            dist_w = dist_w
        );
    }

    if data.len() > 15 {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more elements)", data.len() - 15),
            name_w = name_w,
            count_w = count_w,
            dist_w = dist_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{count_line}┴{dist_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT,
        "Metric",
        "Value",
        key_w = key_w,
        val_w = val_w
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
            key_w = key_w,
            val_w = val_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn vec_len(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn calc_angles(cell: &[[f64; 3]; 3]) -> (f64, f64, f64) {
    let a = &cell[0];
    let b = &cell[1];
    let c = &cell[2];

    let len_a = vec_len(a);
    let len_b = vec_len(b);
    let len_c = vec_len(c);

    let alpha = ((b[0] * c[0] + b[1] * c[1] + b[2] * c[2]) / (len_b * len_c))
        .acos()
        .to_degrees();
    let beta = ((a[0] * c[0] + a[1] * c[1] + a[2] * c[2]) / (len_a * len_c))
        .acos()
        .to_degrees();
    let gamma = ((a[0] * b[0] + a[1] * b[1] + a[2] * b[2]) / (len_a * len_b))
        .acos()
        .to_degrees();

    (alpha, beta, gamma)
}
