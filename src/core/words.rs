//! Amount-in-words conversion using the Indian numbering scale.
//!
//! Amounts are split into crore (10^7), lakh (10^5), thousand (10^3) and a
//! remainder below one thousand. Each non-zero group is spelled out on its own
//! and followed by its scale word, so 12,34,567 reads
//! "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven".

const ONES: [&str; 20] = [
    "",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Spells out a whole rupee amount, e.g. `100_000` becomes `"One Lakh"`.
///
/// Zero is `"Zero"`. Groups that are zero are left out entirely. A crore count
/// of one hundred or more is itself spelled with the same scale, so
/// `10^12` reads "One Lakh Crore". The currency suffix is left to the caller.
#[must_use]
pub fn to_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let crores = amount / CRORE;
    let lakhs = (amount % CRORE) / LAKH;
    let thousands = (amount % LAKH) / THOUSAND;
    let rest = amount % THOUSAND;

    let mut parts = Vec::new();
    if crores > 0 {
        parts.push(format!("{} Crore", to_words(crores)));
    }
    if lakhs > 0 {
        parts.push(format!("{} Lakh", below_thousand(lakhs)));
    }
    if thousands > 0 {
        parts.push(format!("{} Thousand", below_thousand(thousands)));
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Spells out a signed total for display: rounded to whole rupees, clamped at
/// zero, then followed by `suffix` (e.g. `"Rupees Only"`).
#[must_use]
pub fn amount_in_words(total: f64, suffix: &str) -> String {
    let rupees = u64::try_from(super::format::round_rupees(total)).unwrap_or(0);
    let words = to_words(rupees);
    if suffix.is_empty() {
        words
    } else {
        format!("{words} {suffix}")
    }
}

fn below_thousand(n: u64) -> String {
    // Cast safety: callers only pass values below 1000.
    #[allow(clippy::cast_possible_truncation)]
    let n = (n % THOUSAND) as usize;
    let hundreds = n / 100;
    let rest = n % 100;

    let mut words = Vec::new();
    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("Hundred");
    }
    if rest >= 20 {
        words.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            words.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        words.push(ONES[rest]);
    }

    words.join(" ")
}
