//! Rupiah formatting for user-facing messages

/// Format a whole-rupiah amount with comma thousands separators ("1,250,000")
pub fn format_amount(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let negative = amount < 0.0 && rounded != "0";

    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an amount as "Rp 1,250,000"
pub fn format_rupiah(amount: f64) -> String {
    format!("Rp {}", format_amount(amount))
}
