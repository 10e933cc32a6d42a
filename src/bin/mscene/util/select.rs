use anyhow::{bail, Result};

/// Parses an atom index selection like `"0-10,23,40-42"` into a sorted,
/// deduplicated list of zero-based indices. Ranges are inclusive.
pub fn parse_index_ranges(spec: &str) -> Result<Vec<usize>> {
    let mut indices = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            bail!("empty entry in selection '{}'", spec);
        }

        match part.split_once('-') {
            Some((lo, hi)) => {
                let lo: usize = lo
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid range start '{}'", part))?;
                let hi: usize = hi
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid range end '{}'", part))?;
                if hi < lo {
                    bail!("range '{}' runs backwards", part);
                }
                indices.extend(lo..=hi);
            }
            None => {
                let idx: usize = part
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid atom index '{}'", part))?;
                indices.push(idx);
            }
        }
    }

    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}
