//! Width-aligned text table rendering for listings.

/// Renders rows under `headers` with per-column widths, a dash separator,
/// and ` | ` column joins.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| format!("{:width$}", header, width = widths[i]))
        .collect();
    out.push_str(header_line.join(" | ").trim_end());
    out.push('\n');

    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&separator.join("-+-"));
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = width)
            })
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }

    out
}
