//! Turning column names into display names.

/// Humanise a column name: underscores become spaces and the result is
/// title-cased word by word.
///
/// A letter is uppercased when the preceding character is not a letter and
/// lowercased otherwise, so `order_id` becomes `Order Id` and `p2p_amt`
/// becomes `P2P Amt`.
pub fn humanize(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut prev_is_letter = false;

    for ch in column.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("order_id"), "Order Id");
        assert_eq!(humanize("amount"), "Amount");
        assert_eq!(humanize("TOTAL_SALES"), "Total Sales");
        assert_eq!(humanize("p2p_amt"), "P2P Amt");
        assert_eq!(humanize("unit price"), "Unit Price");
        assert_eq!(humanize("o'neil"), "O'Neil");
        assert_eq!(humanize(""), "");
    }
}
