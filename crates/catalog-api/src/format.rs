// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Display helpers for counts and durations

const THOUSAND: u128 = 1_000;
const MILLION: u128 = 1_000_000;

/// Format a count compactly: `999`, `1.5K`, `2.3M`
///
/// Values are reduced to one decimal place in fixed point, rounding half away
/// from zero, so `1_050` becomes `1.1K`. Exact halves always round up, so
/// `1_150` is `1.2K` where float-based `toFixed`-style rounding gives `1.1K`.
pub fn format_compact_number(n: u64) -> String {
    let n = u128::from(n);

    if n >= MILLION {
        with_one_decimal(n, MILLION, 'M')
    } else if n >= THOUSAND {
        with_one_decimal(n, THOUSAND, 'K')
    } else {
        n.to_string()
    }
}

fn with_one_decimal(n: u128, unit: u128, suffix: char) -> String {
    let tenths = (n * 10 + unit / 2) / unit;
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

/// Format a duration in seconds as `M:SS`
///
/// Minutes are not wrapped into hours: `3_600` is `60:00`.
pub fn format_duration(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
