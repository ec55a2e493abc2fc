//! Display formatting helpers

/// Group digits in threes with `.` separators, e.g. 67391582 -> "67.391.582"
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// "1 country" / "3 countries"
pub fn pluralize_countries(count: usize) -> String {
    if count == 1 {
        "1 country".to_string()
    } else {
        format!("{} countries", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1.000");
        assert_eq!(format_population(67391582), "67.391.582");
        assert_eq!(format_population(1_402_112_000), "1.402.112.000");
    }

    #[test]
    fn test_pluralize_countries() {
        assert_eq!(pluralize_countries(0), "0 countries");
        assert_eq!(pluralize_countries(1), "1 country");
        assert_eq!(pluralize_countries(250), "250 countries");
    }
}
